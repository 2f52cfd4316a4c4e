//! Postgres-backed inventory store.
//!
//! ## Inventory Query
//!
//! `resolve()` compiles the filter's predicate list into one aggregate query:
//!
//! - location-scoped predicates go into the join's `WHERE` clause
//! - item-scoped predicates go into `json_agg(...) FILTER (WHERE ...)`, so a
//!   location keeps its row even when none of its items survive
//! - when any predicate is active, the same item conditions are repeated in
//!   `HAVING COUNT(i.id) FILTER (WHERE ...) > 0`
//!
//! Rows are then passed through `stockroom_inventory::finalize`, which owns the
//! ordering and inclusion rules regardless of database collation.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | StoreError |
//! |------------|----------------------|------------|
//! | Database (foreign key violation) | `23503` | `InvalidReference` |
//! | Database (other) | Any other | `Unavailable` |
//! | PoolClosed / Io / Tls / other | N/A | `Unavailable` |

use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use tracing::instrument;
use uuid::Uuid;

use stockroom_core::{ItemId, LocationId};
use stockroom_inventory::{
    InclusionRule, InventoryFilter, Item, ItemDraft, ItemSummary, Location, LocationInventory,
    NewLocation, Predicate, PredicateScope, finalize,
};

use super::r#trait::{InventoryStore, StoreError};

/// Tables and constraints the store expects. Safe to run repeatedly.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS locations (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL CHECK (btrim(name) <> ''),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS items (
    id BIGSERIAL PRIMARY KEY,
    location_id UUID NOT NULL REFERENCES locations (id) ON DELETE RESTRICT,
    name TEXT NOT NULL CHECK (btrim(name) <> ''),
    category TEXT NOT NULL CHECK (btrim(category) <> ''),
    quantity BIGINT NOT NULL CHECK (quantity >= 0),
    notes TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX IF NOT EXISTS items_location_id_idx ON items (location_id);
"#;

/// Postgres-backed inventory store.
///
/// Uses a SQLx connection pool (thread-safe, cheap to clone). Every operation is
/// a single statement; no explicit transactions are opened.
#[derive(Debug, Clone)]
pub struct PostgresInventoryStore {
    pool: PgPool,
}

impl PostgresInventoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `url`.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create missing tables and indexes.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }
}

#[async_trait]
impl InventoryStore for PostgresInventoryStore {
    #[instrument(skip(self), fields(predicates = filter.predicates().len()), err)]
    async fn resolve(&self, filter: &InventoryFilter) -> Result<Vec<LocationInventory>, StoreError> {
        let mut query = build_inventory_query(filter);
        let rows: Vec<InventoryRow> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("resolve", e))?;

        Ok(finalize(
            rows.into_iter().map(LocationInventory::from).collect(),
            InclusionRule::for_filter(filter),
        ))
    }

    #[instrument(skip(self), err)]
    async fn list_locations(&self) -> Result<Vec<Location>, StoreError> {
        let rows: Vec<LocationRow> = sqlx::query_as(
            r#"
            SELECT id, name
            FROM locations
            ORDER BY name, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_locations", e))?;

        Ok(rows.into_iter().map(Location::from).collect())
    }

    #[instrument(skip(self), fields(name = location.name()), err)]
    async fn create_location(&self, location: NewLocation) -> Result<Location, StoreError> {
        let row: LocationRow = sqlx::query_as(
            r#"
            INSERT INTO locations (id, name)
            VALUES ($1, $2)
            RETURNING id, name
            "#,
        )
        .bind(Uuid::from(LocationId::new()))
        .bind(location.name())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_location", e))?;

        Ok(row.into())
    }

    #[instrument(skip(self), fields(location_id = %id, name = location.name()), err)]
    async fn rename_location(&self, id: LocationId, location: NewLocation) -> Result<Location, StoreError> {
        let row: Option<LocationRow> = sqlx::query_as(
            r#"
            UPDATE locations
            SET name = $2
            WHERE id = $1
            RETURNING id, name
            "#,
        )
        .bind(id.as_uuid())
        .bind(location.name())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("rename_location", e))?;

        row.map(Location::from).ok_or(StoreError::NotFound)
    }

    #[instrument(skip(self), fields(location_id = %id), err)]
    async fn delete_location(&self, id: LocationId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| match map_sqlx_error("delete_location", e) {
                StoreError::InvalidReference(_) => {
                    StoreError::InvalidReference(format!("location {id} still holds items"))
                }
                other => other,
            })?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    #[instrument(skip(self, draft), fields(location_id = %draft.location_id), err)]
    async fn create_item(&self, draft: ItemDraft) -> Result<Item, StoreError> {
        let row: ItemRow = sqlx::query_as(
            r#"
            INSERT INTO items (location_id, name, category, quantity, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, location_id, name, category, quantity, notes
            "#,
        )
        .bind(draft.location_id.as_uuid())
        .bind(&draft.name)
        .bind(&draft.category)
        .bind(draft.quantity)
        .bind(&draft.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_item", e))?;

        Ok(row.into())
    }

    #[instrument(skip(self, draft), fields(item_id = %id, location_id = %draft.location_id), err)]
    async fn update_item(&self, id: ItemId, draft: ItemDraft) -> Result<Item, StoreError> {
        let row: Option<ItemRow> = sqlx::query_as(
            r#"
            UPDATE items
            SET location_id = $2,
                name = $3,
                category = $4,
                quantity = $5,
                notes = $6
            WHERE id = $1
            RETURNING id, location_id, name, category, quantity, notes
            "#,
        )
        .bind(id.get())
        .bind(draft.location_id.as_uuid())
        .bind(&draft.name)
        .bind(&draft.category)
        .bind(draft.quantity)
        .bind(&draft.notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_item", e))?;

        row.map(Item::from).ok_or(StoreError::NotFound)
    }

    #[instrument(skip(self), fields(item_id = %id), err)]
    async fn delete_item(&self, id: ItemId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_item", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

/// Compile a filter into the aggregate inventory query.
pub(crate) fn build_inventory_query(filter: &InventoryFilter) -> QueryBuilder<'static, Postgres> {
    let (location_predicates, item_predicates): (Vec<Predicate>, Vec<Predicate>) = filter
        .predicates()
        .into_iter()
        .partition(|p| p.scope() == PredicateScope::Location);

    let mut qb = QueryBuilder::new(
        "SELECT l.id, l.name, \
         COALESCE(json_agg(json_build_object(\
         'id', i.id, 'name', i.name, 'category', i.category, \
         'quantity', i.quantity, 'notes', i.notes) \
         ORDER BY i.name, i.id) FILTER (WHERE ",
    );
    push_item_conditions(&mut qb, &item_predicates);
    qb.push("), '[]'::json) AS items FROM locations l LEFT JOIN items i ON i.location_id = l.id");

    for (idx, predicate) in location_predicates.iter().enumerate() {
        qb.push(if idx == 0 { " WHERE " } else { " AND " });
        push_condition(&mut qb, predicate);
    }

    qb.push(" GROUP BY l.id, l.name");

    if InclusionRule::for_filter(filter) == InclusionRule::RequireMatch {
        qb.push(" HAVING COUNT(i.id) FILTER (WHERE ");
        push_item_conditions(&mut qb, &item_predicates);
        qb.push(") > 0");
    }

    qb.push(" ORDER BY l.name, l.id");
    qb
}

fn push_item_conditions(qb: &mut QueryBuilder<'static, Postgres>, predicates: &[Predicate]) {
    qb.push("i.id IS NOT NULL");
    for predicate in predicates {
        qb.push(" AND ");
        push_condition(qb, predicate);
    }
}

fn push_condition(qb: &mut QueryBuilder<'static, Postgres>, predicate: &Predicate) {
    match predicate {
        Predicate::LocationIs(id) => {
            qb.push("l.id = ");
            qb.push_bind(*id.as_uuid());
        }
        Predicate::CategoryIs(category) => {
            qb.push("i.category = ");
            qb.push_bind(category.clone());
        }
        Predicate::NameContains(fragment) => {
            // strpos avoids LIKE wildcards in user input.
            qb.push("strpos(lower(i.name), lower(");
            qb.push_bind(fragment.clone());
            qb.push(")) > 0");
        }
    }
}

/// Map SQLx errors to `StoreError`.
fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code().as_deref() {
                Some("23503") => StoreError::InvalidReference(msg),
                _ => StoreError::Unavailable(msg),
            }
        }
        sqlx::Error::PoolClosed => {
            StoreError::Unavailable(format!("connection pool closed in {}", operation))
        }
        _ => StoreError::Unavailable(format!("sqlx error in {}: {}", operation, err)),
    }
}

// SQLx row types

#[derive(Debug)]
struct LocationRow {
    id: Uuid,
    name: String,
}

impl<'r> sqlx::FromRow<'r, PgRow> for LocationRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(LocationRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
        })
    }
}

impl From<LocationRow> for Location {
    fn from(row: LocationRow) -> Self {
        Location {
            id: LocationId::from_uuid(row.id),
            name: row.name,
        }
    }
}

#[derive(Debug)]
struct ItemRow {
    id: i64,
    location_id: Uuid,
    name: String,
    category: String,
    quantity: i64,
    notes: Option<String>,
}

impl<'r> sqlx::FromRow<'r, PgRow> for ItemRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(ItemRow {
            id: row.try_get("id")?,
            location_id: row.try_get("location_id")?,
            name: row.try_get("name")?,
            category: row.try_get("category")?,
            quantity: row.try_get("quantity")?,
            notes: row.try_get("notes")?,
        })
    }
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item {
            id: ItemId::new(row.id),
            location_id: LocationId::from_uuid(row.location_id),
            name: row.name,
            category: row.category,
            quantity: row.quantity,
            notes: row.notes,
        }
    }
}

#[derive(Debug)]
struct InventoryRow {
    id: Uuid,
    name: String,
    items: Vec<ItemSummary>,
}

impl<'r> sqlx::FromRow<'r, PgRow> for InventoryRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let items: sqlx::types::Json<Vec<ItemSummary>> = row.try_get("items")?;
        Ok(InventoryRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            items: items.0,
        })
    }
}

impl From<InventoryRow> for LocationInventory {
    fn from(row: InventoryRow) -> Self {
        LocationInventory {
            id: LocationId::from_uuid(row.id),
            name: row.name,
            items: row.items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sql(filter: &InventoryFilter) -> String {
        build_inventory_query(filter).sql().to_string()
    }

    #[test]
    fn unfiltered_query_keeps_empty_locations() {
        let q = sql(&InventoryFilter::unfiltered());
        assert!(q.contains("LEFT JOIN items i ON i.location_id = l.id"));
        assert!(q.contains("FILTER (WHERE i.id IS NOT NULL)"));
        assert!(!q.contains("HAVING"));
        assert!(!q.contains(" WHERE l.id"));
        assert!(!q.contains('$'));
        assert!(q.ends_with("ORDER BY l.name, l.id"));
    }

    #[test]
    fn item_predicates_appear_in_aggregate_and_having() {
        let filter = InventoryFilter::new(Some("Electronic".into()), None, Some("lap".into()));
        let q = sql(&filter);

        let expected =
            "i.id IS NOT NULL AND i.category = $1 AND strpos(lower(i.name), lower($2)) > 0";
        assert!(q.contains(&format!("FILTER (WHERE {expected})")));
        assert!(q.contains(
            "HAVING COUNT(i.id) FILTER (WHERE i.id IS NOT NULL AND i.category = $3 \
             AND strpos(lower(i.name), lower($4)) > 0) > 0"
        ));
    }

    #[test]
    fn location_predicate_goes_into_where_clause() {
        let filter = InventoryFilter::new(None, Some(LocationId::new()), None);
        let q = sql(&filter);

        assert!(q.contains("ON i.location_id = l.id WHERE l.id = $1 GROUP BY"));
        assert!(q.contains("FILTER (WHERE i.id IS NOT NULL)"));
        assert!(q.contains("HAVING COUNT(i.id) FILTER (WHERE i.id IS NOT NULL) > 0"));
    }

    #[test]
    fn schema_restricts_location_deletes() {
        assert!(SCHEMA.contains("ON DELETE RESTRICT"));
        assert!(SCHEMA.contains("CHECK (quantity >= 0)"));
    }
}
