use std::process::ExitCode;
use std::sync::Arc;

use homesync_mock::run;
use homesync_mock::settings::Settings;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins; otherwise every homesync crate logs at the configured
/// level.
fn log_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        ["homesync_mock", "homesync_client", "homesync_api"]
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect::<Vec<_>>()
            .join(",")
            .into()
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    let settings = match Settings::new() {
        Ok(settings) => Arc::new(settings),
        Err(e) => {
            eprintln!("Failed to load settings: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&settings.logger.level))
        .init();

    match run(&settings).await {
        Ok(report) => {
            tracing::info!(
                "migrated {} value(s), published {} reading(s), raised {} alert(s), {} listener failure(s)",
                report.migrated,
                report.readings,
                report.alerts,
                report.failures
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("session failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
