//! Node module - report-card entries and the ledger session

mod entry;
mod session;

pub use entry::*;
pub use session::*;
