//! Application wiring for the `petpal` binary
//!
//! # Module Structure
//!
//! - `config`: Configuration structures for every component
//! - `loader`: Configuration loading from files and environment
//! - `init`: Building the store, ledger and pet selection from configuration

pub mod config;
mod init;
mod loader;

pub use init::{init, App};
pub use loader::load_config;
