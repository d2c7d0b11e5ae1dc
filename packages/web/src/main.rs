use anyhow::Context;
use tracing_subscriber::EnvFilter;
use web::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::new().context("failed to load configuration")?;

    web::run(settings).await
}
