pub mod chain;
pub mod config;
pub mod contracts;
pub mod logging;
pub mod node;
pub mod signer;
pub mod types;
