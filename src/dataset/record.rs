//! Dataset JSON provides a flat list of operations.
//!
//! JSON shape:
//! {
//!   "operations": [
//!     {
//!       "name": "CPU L1 Cache Access",
//!       "throughput": "30 GiB/s",      // "<number> <unit>"
//!       "latency": 0.5,                // nanoseconds
//!       "description": "Ultra-fast on-core cache"
//!     },
//!     ...
//!   ]
//! }
//!
//! We validate that the dataset is non-empty and compute the maximum latency
//! used as the normalization bound. Odd rows (bad throughput, non-positive
//! latency) are kept: the normalizer degrades them to safe defaults.

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::warn;

use crate::metrics::Throughput;

/// One benchmark row as it appears in the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationRecord {
    pub name: String,

    /// "<number> <unit>", e.g. "30 GiB/s".
    pub throughput: String,

    /// Nanoseconds.
    pub latency: f64,

    #[serde(default)]
    pub description: String,
}

impl OperationRecord {
    pub fn new(name: &str, throughput: &str, latency: f64, description: &str) -> Self {
        Self {
            name: name.to_string(),
            throughput: throughput.to_string(),
            latency,
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatasetSpec {
    #[serde(default)]
    pub operations: Vec<OperationRecord>,
}

/// Validated dataset ready for the table model.
#[derive(Debug, Clone)]
pub struct ValidatedDataset {
    pub operations: Vec<OperationRecord>,
    /// Largest finite, positive latency across all rows.
    pub max_latency: f64,
}

impl DatasetSpec {
    pub fn validate_and_build(&self) -> anyhow::Result<ValidatedDataset> {
        if self.operations.is_empty() {
            bail!("dataset contained no operations");
        }

        for op in &self.operations {
            if !(op.latency.is_finite() && op.latency > 0.0) {
                warn!(
                    name = %op.name,
                    latency = op.latency,
                    "non-positive latency; bar will use the minimum length"
                );
            }
            if let Err(err) = Throughput::parse(&op.throughput) {
                warn!(name = %op.name, "{err}; bar will use the minimum speed");
            }
        }

        let max_latency = self
            .operations
            .iter()
            .map(|op| op.latency)
            .filter(|l| l.is_finite() && *l > 0.0)
            .fold(0.0f64, f64::max);

        if max_latency <= 0.0 {
            warn!("no row has a positive latency; every bar will use the minimum length");
        }

        Ok(ValidatedDataset {
            operations: self.operations.clone(),
            max_latency,
        })
    }
}

/// Read and validate a dataset JSON file.
pub fn load_dataset_file(path: &str) -> anyhow::Result<ValidatedDataset> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read dataset file {}", path))?;
    let spec: DatasetSpec =
        serde_json::from_str(&text).with_context(|| format!("parse dataset file {}", path))?;
    spec.validate_and_build()
        .with_context(|| format!("validate dataset file {}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_dataset_is_rejected() {
        let spec = DatasetSpec::default();
        let err = spec.validate_and_build().unwrap_err();
        assert!(err.to_string().contains("no operations"));
    }

    #[test]
    fn max_latency_ignores_degenerate_rows() {
        let spec = DatasetSpec {
            operations: vec![
                OperationRecord::new("a", "1 GiB/s", 100.0, ""),
                OperationRecord::new("b", "1 GiB/s", -5.0, ""),
                OperationRecord::new("c", "1 GiB/s", f64::NAN, ""),
                OperationRecord::new("d", "garbage", 2500.0, ""),
            ],
        };
        let validated = spec.validate_and_build().unwrap();
        assert_eq!(validated.max_latency, 2500.0);
        assert_eq!(validated.operations.len(), 4);
    }

    #[test]
    fn parses_json_with_optional_description() {
        let json = r#"{ "operations": [
            { "name": "Compression", "throughput": "500 MiB/s", "latency": 100000 }
        ] }"#;
        let spec: DatasetSpec = serde_json::from_str(json).unwrap();
        assert_eq!(
            spec.operations,
            vec![OperationRecord::new("Compression", "500 MiB/s", 100000.0, "")]
        );
    }
}
