use anyhow::Context;

use tiergate_api::app::{self, services::AppServices};
use tiergate_infra::GateConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tiergate_observability::init();

    let config = GateConfig::from_env().context("failed to load configuration")?;
    let services = AppServices::from_config(&config)?;
    let app = app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
