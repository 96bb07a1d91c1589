//! Metric normalizer: raw benchmark numbers -> comparable magnitudes and bar lengths.
//!
//! Everything here is pure. Bad input never errors out of this module; it
//! degrades to a safe default and logs a warning.

pub mod error;
pub mod format;
pub mod length;
pub mod throughput;

pub use error::MetricError;
pub use format::{format_latency, format_throughput};
pub use length::LengthScale;
pub use throughput::{DEFAULT_MAGNITUDE, Throughput, throughput_magnitude};
