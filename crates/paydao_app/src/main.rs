mod cli;
mod shell;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use paydao_chain::{ContractGateway, JsonRpcClient};
use paydao_core::config::CONTRACT_ADDRESS_ENV;
use paydao_core::{ConfigManager, ContributorStore, PayDaoConfig, PayDaoError, logging};

use crate::shell::{Dashboard, Outcome};

/// Private Pay DAO contributor dashboard.
#[derive(Parser, Debug)]
#[command(name = "paydao", version, about)]
struct Args {
    /// Config file to use instead of ~/.paydao/config.json.
    #[arg(long, env = "PAYDAO_CONFIG")]
    config: Option<PathBuf>,

    /// Start without the sample contributors.
    #[arg(long)]
    empty: bool,
}

/// Build the gateway, or the reason chain commands are unavailable.
fn connect(config: &PayDaoConfig) -> Result<ContractGateway<JsonRpcClient>, String> {
    ContractGateway::connect_from_config(config).map_err(|e| {
        warn!("On-chain commands unavailable: {e}");
        PayDaoError::from(e).user_message()
    })
}

/// Logs sit next to a custom config; otherwise under `~/.paydao/logs`.
fn logs_dir_for(config_path: Option<&Path>) -> Result<PathBuf> {
    match config_path {
        Some(path) => Ok(path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .join("logs")),
        None => PayDaoConfig::logs_dir(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let logs_dir = logs_dir_for(args.config.as_deref())?;
    let config_manager = match args.config {
        Some(path) => ConfigManager::open(path, std::env::var(CONTRACT_ADDRESS_ENV).ok())?,
        None => ConfigManager::new()?,
    };
    let mut config = config_manager.get();

    // File-only logging: the prompt owns the terminal.
    let _log_guard =
        logging::init_logging_to_dir(&logs_dir, &logging::default_filter(&config.log_level))?;
    info!(
        "Starting paydao v{} (config {})",
        env!("CARGO_PKG_VERSION"),
        config_manager.path().display()
    );

    let store = if args.empty {
        ContributorStore::empty()
    } else {
        ContributorStore::seeded()
    };
    let mut dashboard = Dashboard::new(store, connect(&config));

    println!("{}", dashboard.overview());
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("paydao> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let latest = config_manager.get();
        if latest != config {
            info!("Config changed, reconnecting contract gateway");
            dashboard.set_gateway(connect(&latest));
            config = latest;
        }

        match dashboard.handle_line(&line).await {
            Outcome::Continue(output) if output.is_empty() => {}
            Outcome::Continue(output) => println!("{output}"),
            Outcome::Quit => break,
        }
    }

    info!(
        contributors = dashboard.store().len(),
        notifications = dashboard.notifications().all().len(),
        "paydao shutting down"
    );
    Ok(())
}
