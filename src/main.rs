//! Edviron dashboard entry point

use anyhow::Context;
use clap::Parser;
use edviron_api::start_server;
use edviron_client::HttpBackend;
use edviron_config::Config;
use edviron_core::BackendRef;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "edviron-dash")]
#[command(version = "0.1.0")]
#[command(about = "Server-rendered admin dashboard for the Edviron school-fee platform", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value_os_t = Config::default_path())]
    config: PathBuf,

    /// Print a commented default configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let config = Config::load(&args.config)
        .with_context(|| format!("loading configuration from {}", args.config.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str())).init();
    log::info!("Configuration loaded from {}", args.config.display());

    let backend: BackendRef = Arc::new(HttpBackend::new(&config).context("building backend client")?);

    start_server(config, backend).await
}
