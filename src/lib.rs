//! Voting gateway library.
//!
//! Builds unsigned transaction intents for the voting contract, answers read
//! queries against it, and optionally signs and relays testnet transactions.

pub mod blockchain;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod voting;

pub use config::schema::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
