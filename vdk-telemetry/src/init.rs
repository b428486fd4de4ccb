//! Telemetry initialization and configuration

use serde::{Deserialize, Serialize};
use std::sync::Once;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Output format of the console log layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Initialize console logging.
///
/// The filter comes from `RUST_LOG` and falls back to `info`. Calling this more
/// than once is a no-op.
///
/// # Example
/// ```
/// use vdk_telemetry::{init_telemetry, LogFormat};
/// init_telemetry("vdk-console", LogFormat::Pretty).expect("Failed to initialize telemetry");
/// ```
pub fn init_telemetry(
    service_name: &str,
    format: LogFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    INIT.call_once(|| {
        let registry = tracing_subscriber::registry().with(filter);
        match format {
            LogFormat::Pretty => registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(true)
                        .with_line_number(true)
                        .with_writer(std::io::stderr),
                )
                .init(),
            LogFormat::Json => registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_current_span(true)
                        .with_writer(std::io::stderr),
                )
                .init(),
        }

        tracing::info!(service.name = service_name, ?format, "Telemetry initialized");
    });

    Ok(())
}
