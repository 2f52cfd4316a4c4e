use stockroom_api::app::{self, services};
use stockroom_infra::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stockroom_observability::init();

    let config = Config::from_env()?;
    let services = services::build_services(&config.storage).await?;
    let app = app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
