//! JSON-RPC API Module
//!
//! Provides the HTTP interface the report-card form and other clients use.

mod methods;
mod server;

pub use methods::*;
pub use server::*;
