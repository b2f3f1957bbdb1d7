//! Node configuration
//!
//! Command-line flags with environment fallbacks.

use clap::{Parser, Subcommand, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::constants::DEFAULT_LEDGER_PATH;
use crate::error::Result;
use crate::storage::{ChainStore, JsonFileStore, SledStore};

#[derive(Parser, Debug, Clone)]
#[command(name = "report-chain-node", version, about = "Tamper-evident report card ledger")]
pub struct NodeConfig {
    /// Ledger location: a JSON file, or a directory for the sled backend
    #[arg(long, env = "REPORT_CHAIN_LEDGER", default_value = DEFAULT_LEDGER_PATH, global = true)]
    pub ledger: PathBuf,

    /// Storage backend
    #[arg(long, env = "REPORT_CHAIN_BACKEND", value_enum, default_value_t = Backend::Json, global = true)]
    pub backend: Backend,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Serve the entry form and JSON-RPC endpoint
    Serve(ServeArgs),
    /// Recompute every hash and report tampering; exits non-zero on violations
    Verify,
    /// Print the ledger as JSON
    Show,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "REPORT_CHAIN_BIND", default_value = "127.0.0.1")]
    pub bind: String,

    /// HTTP port
    #[arg(long, short, env = "REPORT_CHAIN_PORT", default_value_t = 8501)]
    pub port: u16,

    /// Validate the loaded ledger before serving and log any violations
    #[arg(long)]
    pub verify_on_start: bool,
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8501,
            verify_on_start: false,
        }
    }
}

impl ServeArgs {
    pub fn socket_addr(&self) -> std::result::Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.bind, self.port).parse()
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Single pretty-printed JSON file
    Json,
    /// Sled embedded database directory
    Sled,
}

impl NodeConfig {
    /// Subcommand to run; `serve` with defaults when none was given
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Serve(ServeArgs::default()))
    }

    /// Open the configured store
    pub fn open_store(&self) -> Result<Box<dyn ChainStore + Send>> {
        let store: Box<dyn ChainStore + Send> = match self.backend {
            Backend::Json => Box::new(JsonFileStore::new(&self.ledger)),
            Backend::Sled => Box::new(SledStore::open(&self.ledger)?),
        };
        Ok(store)
    }
}
