//! Spendweb main entry point

use spendweb_api::start_server;
use spendweb_config::{Config, ConfigError};
use spendweb_provider::{MockExpenseProvider, MockOptions};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "spendweb")]
#[command(author = "Spendweb Contributors")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight manager dashboard for reviewing team expense reports", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Override the configured port
    #[arg(short, long)]
    port: Option<u16>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

/// Print the error's field and suggestions before bailing out; logging may
/// not be set up yet.
fn config_failure(error: ConfigError) -> anyhow::Error {
    eprintln!("[ERROR] {}", error.to_details());
    error.into()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let (mut config, missing) = match Config::load(args.config.clone()) {
        Ok(config) => (config, false),
        Err(ConfigError::FileNotFound { .. }) => (Config::default(), true),
        Err(e) => return Err(config_failure(e)),
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str())).init();

    if missing {
        log::warn!(
            "Config file {} not found, using defaults",
            args.config.display()
        );
    } else {
        log::info!("Config loaded from {}", args.config.display());
    }

    if let Some(port) = args.port {
        config.server.port = port;
        config.validate().map_err(config_failure)?;
    }

    let provider = Arc::new(MockExpenseProvider::new(MockOptions {
        count: config.data.seed_count,
        currency: config.data.currency.clone(),
        id_start: config.data.id_start,
        seed: config.data.random_seed,
    }));
    log::info!(
        "Seeding {} mock expenses per session{}",
        config.data.seed_count,
        config
            .data
            .random_seed
            .map(|seed| format!(" (seed {})", seed))
            .unwrap_or_default()
    );

    let rt = Runtime::new()?;
    rt.block_on(start_server(config, provider))
}
