//! Table model: combine dataset rows with normalized metrics + presentation data.

pub mod palette;

pub use palette::{Palette, parse_rgb};

use serde::Serialize;

use crate::dataset::ValidatedDataset;
use crate::engine::{Direction, Effects, EngineProfile, RowParams};
use crate::metrics::{format_latency, format_throughput};

pub const TITLE: &str = "Operation Performance Visualization";
pub const LEGEND: &str =
    "Bar length = latency (longer = slower) | Movement speed = throughput (faster = better)";

#[derive(Debug, Clone, Serialize)]
pub struct RowView {
    pub name: String,
    pub description: String,
    pub throughput_label: String,
    pub latency_label: String,
    pub color: String,

    /// Engine inputs (magnitude, velocity, visual length).
    pub params: RowParams,
    pub max_position: f64,

    /// Effects per facing direction; the renderer picks one each frame.
    pub effects_forward: Effects,
    pub effects_backward: Effects,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableView {
    pub title: String,
    pub legend: String,
    pub profile: String,
    pub max_latency: f64,
    pub max_latency_label: String,
    pub rows: Vec<RowView>,
}

impl TableView {
    pub fn params(&self) -> Vec<RowParams> {
        self.rows.iter().map(|r| r.params).collect()
    }
}

/// Build the table view. Rows are ordered fastest first (by MiB/s-equivalent
/// magnitude); ties keep dataset order. Colors are assigned after sorting.
pub fn build_table_view(data: &ValidatedDataset, profile: &EngineProfile) -> TableView {
    let mut rows: Vec<(RowParams, &crate::dataset::OperationRecord)> = data
        .operations
        .iter()
        .map(|op| {
            (
                RowParams::derive(&op.throughput, op.latency, data.max_latency, profile),
                op,
            )
        })
        .collect();

    // Sort by magnitude desc (stable).
    rows.sort_by(|a, b| {
        b.0.magnitude
            .partial_cmp(&a.0.magnitude)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let rows = rows
        .into_iter()
        .enumerate()
        .map(|(i, (params, op))| RowView {
            name: op.name.clone(),
            description: op.description.clone(),
            throughput_label: format_throughput(&op.throughput),
            latency_label: format_latency(op.latency),
            color: profile.palette.color(i).to_string(),
            params,
            max_position: params.max_position(),
            effects_forward: profile.effects.effects(
                params.magnitude,
                params.visual_length,
                Direction::Forward,
            ),
            effects_backward: profile.effects.effects(
                params.magnitude,
                params.visual_length,
                Direction::Backward,
            ),
        })
        .collect();

    TableView {
        title: TITLE.to_string(),
        legend: LEGEND.to_string(),
        profile: profile.name.clone(),
        max_latency: data.max_latency,
        max_latency_label: format_latency(data.max_latency),
        rows,
    }
}
