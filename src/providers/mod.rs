//! Provider adapters for the two upstream data sources.
//!
//! Each adapter owns the wire shape of its provider and converts it to the
//! crate's typed results at the boundary; nothing outside this module
//! branches on provider JSON.

pub mod classification;
pub mod telemetry;

pub use classification::ClassificationProvider;
pub use telemetry::TelemetryProvider;
