use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use paydao_chain::{
    Address, ContractArtifact, DEFAULT_ARTIFACT_PATH, DeployParams, JsonRpcClient, Network,
    RpcConfigStore, deploy_contract,
};
use paydao_core::{PayDaoConfig, classify_error, logging};

/// Deploy the PrivatePayDAO contract and record where it landed.
#[derive(Parser, Debug)]
#[command(name = "paydao-deploy", version, about)]
struct DeployArgs {
    /// Address of the proof verifier passed to the constructor.
    #[arg(long, env = "PAYDAO_VERIFIER")]
    verifier: Address,

    /// Compiled contract artifact (JSON with a `bytecode` field).
    #[arg(long, default_value = DEFAULT_ARTIFACT_PATH)]
    artifact: PathBuf,

    /// Target network; defaults to the configured one.
    #[arg(long)]
    network: Option<Network>,

    /// RPC endpoint overriding the network default.
    #[arg(long)]
    rpc_url: Option<String>,

    /// Account the node should send the creation transaction from.
    #[arg(long)]
    from: Option<Address>,

    /// Where to write the deployment record.
    #[arg(long)]
    output: Option<PathBuf>,
}

async fn run(args: DeployArgs) -> Result<()> {
    let config = PayDaoConfig::load().context("Failed to load configuration")?;

    let network = match args.network {
        Some(network) => network,
        None => config.network.parse()?,
    };

    let mut rpcs = RpcConfigStore::with_defaults();
    if let Some(url) = args.rpc_url.or_else(|| config.rpc_url.clone()) {
        rpcs.set_custom_rpc(network, url)?;
    }
    rpcs.set_timeout(network, config.http_timeout_secs);
    let rpc = rpcs
        .get_rpc(network)
        .with_context(|| format!("No RPC endpoint for {network}"))?;
    let client = JsonRpcClient::from_rpc_config(rpc)?;

    let artifact = ContractArtifact::load(&args.artifact)?;

    let sender = match args.from {
        Some(from) => Some(from),
        None => config
            .sender_address
            .as_deref()
            .map(str::parse::<Address>)
            .transpose()?,
    };

    let params = DeployParams {
        verifier: args.verifier,
        network,
        sender,
        poll_interval: Duration::from_millis(config.receipt_poll_interval_ms),
        poll_attempts: config.receipt_poll_attempts,
    };
    let deployment = deploy_contract(&client, &artifact, &params).await?;

    let output = args.output.unwrap_or(config.deployment_info_path);
    deployment.save(&output)?;

    info!("PrivatePayDAO deployed to: {}", deployment.address);
    info!("Verifier address: {}", deployment.verifier);
    info!("Deployment info saved to {}", output.display());
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = DeployArgs::parse();

    let _log_guard = match logging::init_logging("info") {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Logging unavailable: {e:#}");
            None
        }
    };

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let classified = classify_error(&e);
            error!("Deployment failed: {e:#}");
            error!("{}", classified.user_message);
            ExitCode::FAILURE
        }
    }
}
