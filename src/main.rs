//! Voting gateway.
//!
//! Stateless HTTP front for a deployed voting contract.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ http (axum) ──▶ voting::VotingService ──▶ IntentBuilder ─────┐
//!                 │                                   └─▶ ReadQueryExecutor ─┤
//!                 │                                                          ▼
//!                 └─(testnet)─▶ SubmissionRelay ─────────────────────▶ LedgerGateway ──▶ node
//! ```
//!
//! Startup order: config → logging → metrics → ledger gateway → contract
//! binding → listener. Any failure before the listener is bound is fatal.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use voting_gateway::blockchain::{ContractBinding, RpcGateway};
use voting_gateway::config::{read_config, validate_config, ConfigError, FeeModel, GatewayConfig};
use voting_gateway::lifecycle::signals::shutdown_on_signal;
use voting_gateway::observability::{logging, metrics};
use voting_gateway::{HttpServer, Shutdown};

#[derive(Parser, Debug)]
#[command(name = "voting-gateway", version, about = "HTTP gateway for the voting contract")]
struct Args {
    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON-RPC endpoint of the ledger node.
    #[arg(short = 'u', long = "rpc-url", default_value = "http://localhost:8545")]
    rpc_url: String,

    /// Listen address, e.g. 0.0.0.0:8000.
    #[arg(long)]
    bind: Option<String>,

    /// Voting contract address; skips the deployment file.
    #[arg(long)]
    contract_address: Option<String>,

    /// Foundry broadcast file to read the contract address from.
    #[arg(long)]
    deployment_file: Option<String>,

    /// Fee model: legacy or fee-market.
    #[arg(long)]
    fee_model: Option<FeeModel>,

    /// Do not mount /testnet/* routes.
    #[arg(long)]
    disable_testnet: bool,
}

impl Args {
    fn into_config(self) -> Result<GatewayConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => GatewayConfig::default(),
        };

        // The flag always has a value; only let it override the file when
        // it was changed from the default or there is no file.
        if self.config.is_none() || self.rpc_url != GatewayConfig::default().ledger.rpc_url {
            config.ledger.rpc_url = self.rpc_url;
        }
        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
        }
        if let Some(address) = self.contract_address {
            config.contract.address = Some(address);
        }
        if let Some(file) = self.deployment_file {
            config.contract.deployment_file = Some(file);
        }
        if let Some(model) = self.fee_model {
            config.fees.model = model;
        }
        if self.disable_testnet {
            config.testnet.enabled = false;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Args::parse().into_config()?;

    logging::init(&config.observability);
    tracing::info!("voting-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        rpc_url = %config.ledger.rpc_url,
        fee_model = ?config.fees.model,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Validation already checked the address parses.
        let addr: std::net::SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let gateway = Arc::new(RpcGateway::connect(&config.ledger)?);
    let binding = ContractBinding::resolve(&config.contract)?;
    tracing::info!(contract = %binding.address(), "Voting contract bound");

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    tokio::spawn(shutdown_on_signal(shutdown.clone()));

    let server = HttpServer::new(config, gateway, binding);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
