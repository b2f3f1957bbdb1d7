//! Storage module - persistence interface and its backends

mod json_file;
mod memory;
mod store;
pub mod db;

pub use json_file::*;
pub use memory::*;
pub use store::*;
pub use db::SledStore;
