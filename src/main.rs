use std::path::PathBuf;

use clap::Parser;
use loadable::logging::init_tracing;
use loadable::LoaderConfig;

mod demo;

/// Drive a loadable fetch against a simulated source in the terminal.
#[derive(Parser, Debug)]
#[command(name = "loadable-demo", version, about)]
struct Args {
    /// Simulated latency of each load, in milliseconds.
    #[arg(long, default_value_t = 1500)]
    latency_ms: u64,

    /// Make every Nth load fail (0 disables failures).
    #[arg(long, default_value_t = 3)]
    fail_every: u32,

    /// Serve a cached value from a fallback source while loading.
    #[arg(long)]
    fallback: bool,

    /// Config file (defaults to ~/.config/loadable/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => LoaderConfig::load_from(path)?,
        None => LoaderConfig::load()?,
    };
    tracing::info!(?config, "configuration loaded");

    let source = demo::SimulatedSource::new(
        std::time::Duration::from_millis(args.latency_ms),
        args.fail_every,
    );
    demo::run(source, args.fallback, &config).await
}
