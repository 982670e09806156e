//! Stratocast ground station
//!
//! Captures rehearsed keyboard and gamepad control sequences into compact
//! recordings sized for a bandwidth-limited uplink.

mod app;
mod config;
mod history;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = config::load();
    tracing::info!(
        "Capture at {} Hz, idle timeout {} ms",
        config.capture.sample_rate,
        config.capture.idle_timeout_ms
    );

    if let Err(e) = app::run(config) {
        tracing::error!("Application error: {}", e);
        std::process::exit(1);
    }
}
