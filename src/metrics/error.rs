use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricError {
    #[error("malformed throughput {raw:?}: expected \"<number> <unit>\"")]
    Malformed { raw: String },

    #[error("throughput {raw:?} has a negative or non-finite value")]
    InvalidValue { raw: String },

    #[error("degenerate latency bound: latency={latency}, max_latency={max_latency}")]
    DegenerateBound { latency: f64, max_latency: f64 },
}
