use axum::{Router, routing::get};

pub mod inventory;
pub mod items;
pub mod locations;
pub mod system;

/// Router for all resource endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/inventory", get(inventory::get_inventory))
        .route("/categories", get(inventory::get_categories))
        .merge(locations::router())
        .merge(items::router())
}
