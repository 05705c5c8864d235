//! Session-data resolution client for fantasy-motorsport scoring.
//!
//! Gridwire reconstructs the full set of session classifications for a race
//! weekend from two independent, differently-shaped upstream providers: a
//! rate-limited lap-telemetry API that only publishes raw per-lap records,
//! and an unthrottled classification API with finished qualifying, sprint
//! and race results.
//!
//! # Features
//!
//! - **Rate gate**: minimum request spacing plus exponential-backoff retry
//!   for the telemetry provider, scoped per client instance
//! - **Session resolution**: heuristic mapping from `(season, round, label)`
//!   to the provider's opaque session keys
//! - **Lap-based classification**: personal-best ranking rebuilt from
//!   unordered lap records for sessions with no results endpoint
//! - **Identity reconciliation**: one canonical naming across both
//!   providers' driver and constructor schemes
//! - **Fault isolation**: one session's failure never invalidates the rest
//!   of the weekend
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use gridwire::SessionClient;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = SessionClient::new();
//!     let weekend = client.fetch_all_sessions(2024, 5).await;
//!
//!     if weekend.is_sprint_weekend() {
//!         println!("sprint weekend");
//!     }
//!     if let Some(rows) = &weekend.qualifying {
//!         for row in rows {
//!             println!("{:2} {:24} {}", row.position, row.driver, row.gap);
//!         }
//!     }
//! }
//! ```

// Core types and error handling
mod error;
pub mod timing;
pub mod types;

// Provider access
pub mod gate;
pub mod providers;
pub mod transport;

// Resolution pipeline
pub mod identity;
pub mod laps;
pub mod meetings;
pub mod orchestrator;

// Core exports
pub use error::{ResolveError, Result};
pub use gate::{GateConfig, RateGate};
pub use orchestrator::{ClientConfig, SessionClient};
pub use transport::{HttpResponse, HttpTransport, Transport};
pub use types::{ClassificationRow, SeasonRound, SessionLabel, StandingRow, WeekendResults};
