pub mod client;
pub mod error;
pub mod storage;

pub use client::ContractsClient;
pub use error::Error;
