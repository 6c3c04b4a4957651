use parking_client::app;
use parking_client::config::ClientConfig;
use parking_client::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ClientConfig::load(ClientConfig::path_from_args())?;
    let _logging_guard = logging::init_logging(
        &config.log_dir,
        "parking-admin",
        &config.log_level,
        config.log_retention_days,
    )?;

    tracing::info!("Parking admin console started (backend: {}).", config.api.base_url);
    app::run_admin(&config).await?;
    tracing::info!("Parking admin console stopped.");

    Ok(())
}
