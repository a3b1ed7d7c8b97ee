//! Firmware FSM Visualizer

use clap::Parser;
use fsm_viz::{Config, Result, VERSION, cli, init_logging};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let config = if let Some(config_path) = &args.config {
        Config::from_file(config_path)?
    } else {
        Config::load()?
    };

    // RUST_LOG still takes precedence over the configured level
    init_logging(&config.logging.level);

    tracing::info!("Firmware FSM Visualizer v{}", VERSION);
    tracing::debug!("Parsed arguments: {:?}", args);
    tracing::debug!("Loaded configuration: {:?}", config);

    cli::execute(args, config).await?;

    Ok(())
}
