pub mod client;
pub mod convert;
pub mod error;

pub use client::Client;
pub use error::Error;
