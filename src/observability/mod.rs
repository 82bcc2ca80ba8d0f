//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! http middleware ──▶ metrics.rs (request counters, latency)
//! ledger gateway  ──▶ metrics.rs (node call counters, latency)
//! everything      ──▶ logging.rs (tracing events, request id spans)
//! ```
//!
//! Private keys, signed payloads and request bodies are never logged.

pub mod logging;
pub mod metrics;
