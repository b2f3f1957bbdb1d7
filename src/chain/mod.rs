//! Chain module - Block structure, genesis, append and validation

mod block;
mod genesis;
mod ledger;
mod timestamp;
mod validation;

pub use block::*;
pub use genesis::*;
pub use ledger::*;
pub use timestamp::*;
pub use validation::*;
