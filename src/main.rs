//! Report Card Chain Node
//!
//! Main entry point: serves the report-card form, or verifies / prints a
//! ledger from the command line.

use clap::Parser;
use report_chain::config::{Command, NodeConfig, ServeArgs};
use report_chain::constants::CHAIN_NAME;
use report_chain::rpc::{start_rpc_server, RpcState};
use report_chain::LedgerSession;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config = NodeConfig::parse();

    match run(config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: NodeConfig) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let store = config.open_store()?;
    let session = LedgerSession::open(store)?;

    match config.command() {
        Command::Serve(args) => serve(session, &config, args).await,
        Command::Verify => {
            let report = session.validate();
            if report.is_valid() {
                println!("Ledger intact: {} blocks verified", report.length);
                println!("  Tip Hash:    {}", report.tip_hash.unwrap_or_default());
                Ok(ExitCode::SUCCESS)
            } else {
                println!("Ledger TAMPERED: {} violation(s)", report.violations.len());
                for v in &report.violations {
                    println!("  #{:<4} {}", v.position, v.message);
                }
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Show => {
            println!("{}", serde_json::to_string_pretty(session.list_blocks())?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn serve(
    session: LedgerSession<Box<dyn report_chain::ChainStore + Send>>,
    config: &NodeConfig,
    args: ServeArgs,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let stats = session.stats();
    println!("{}", CHAIN_NAME);
    println!("  Ledger:      {} ({:?})", config.ledger.display(), config.backend);
    println!("  Blocks:      {}", stats.blocks);
    println!("  Tip Hash:    {}", stats.tip_hash);
    println!();

    if args.verify_on_start {
        let report = session.validate();
        if report.is_valid() {
            tracing::info!(blocks = report.length, "Ledger verified");
        } else {
            tracing::warn!(
                violations = report.violations.len(),
                "Ledger failed verification; serving anyway"
            );
        }
    }

    let addr = args.socket_addr()?;
    let state = Arc::new(RpcState::new(session));
    start_rpc_server(state, addr).await?;
    Ok(ExitCode::SUCCESS)
}
