use clap::Parser;
use tracing_subscriber::EnvFilter;

use fractal_viewport::{ExplorerArgs, ExplorerConfig, run_gui};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = ExplorerArgs::parse();
    let config = ExplorerConfig::try_from(&args)?;

    run_gui(&config)?;
    Ok(())
}
