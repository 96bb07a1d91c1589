//! Dataset layer: operation records, JSON loading + validation.
//!
//! This module is intentionally separate from normalization and rendering.
//! It owns:
//! - OperationRecord (one benchmark row as authored)
//! - DatasetSpec (dataset JSON) and its validated form
//! - the built-in sample dataset

pub mod record;
pub mod sample;

pub use record::{OperationRecord, ValidatedDataset, load_dataset_file};
pub use sample::sample_dataset;
