use anyhow::Result;
use clap::Parser;
use vdk_cli::cli::Cli;
use vdk_cli::{VdkConfig, commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = VdkConfig::load(cli.config.as_deref())?;

    vdk_telemetry::init_telemetry("vdk", config.telemetry.format)
        .map_err(|e| anyhow::anyhow!("failed to initialize telemetry: {}", e))?;

    commands::run(cli, config).await
}
