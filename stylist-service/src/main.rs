use service_core::observability::{init_metrics, init_tracing};
use service_core::shutdown::shutdown_signal;
use stylist_service::config::StylistConfig;
use stylist_service::Application;

#[tokio::main]
async fn main() -> Result<(), service_core::error::AppError> {
    let config = StylistConfig::load()?;

    init_tracing(
        "stylist-service",
        &config.common.log_level,
        config.common.otlp_endpoint.as_deref(),
    );
    init_metrics();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting stylist service");

    let application = Application::build(config).await?;

    tokio::select! {
        result = application.run_until_stopped() => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
                return Err(e.into());
            }
        }
        _ = shutdown_signal() => {}
    }

    tracing::info!("Stylist service stopped");
    Ok(())
}
