//! HTTP boundary subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (request id, trace span, timeout, metrics)
//!     → extract.rs (JSON body; malformed → ApiError)
//!     → voting.rs / testnet.rs (call the service)
//!     → error.rs (BlockchainError → status + body)
//!     → Send to client
//! ```

pub mod error;
pub mod extract;
pub mod middleware;
pub mod server;
pub mod testnet;
pub mod voting;

pub use error::ApiError;
pub use extract::ApiJson;
pub use server::{AppState, HttpServer};
