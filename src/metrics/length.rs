//! Log-scaled bar length from latency.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::metrics::MetricError;

/// Maps a latency to a bar length in percent of the track.
///
/// `length = clamp(ln(latency + epsilon) / ln(max_latency + epsilon) * max_len, min_len, max_len)`
///
/// `epsilon` keeps sub-nanosecond latencies away from `ln(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LengthScale {
    pub min_len: f64,
    pub max_len: f64,
    pub epsilon: f64,
}

impl Default for LengthScale {
    fn default() -> Self {
        Self {
            min_len: 5.0,
            max_len: 40.0,
            epsilon: 1.0,
        }
    }
}

impl LengthScale {
    pub fn new(min_len: f64, max_len: f64, epsilon: f64) -> Self {
        Self {
            min_len,
            max_len,
            epsilon,
        }
    }

    /// Bar length in `[min_len, max_len]`. Never NaN, never zero.
    pub fn visual_length(&self, latency: f64, max_latency: f64) -> f64 {
        match self.ratio(latency, max_latency) {
            Ok(ratio) => (ratio * self.max_len).clamp(self.min_len, self.max_len),
            Err(err) => {
                debug!("{err}; using minimum length");
                self.min_len
            }
        }
    }

    fn ratio(&self, latency: f64, max_latency: f64) -> Result<f64, MetricError> {
        let degenerate = || MetricError::DegenerateBound {
            latency,
            max_latency,
        };

        if !(latency.is_finite() && max_latency.is_finite()) || latency <= 0.0 || max_latency <= 0.0
        {
            return Err(degenerate());
        }

        let top = max_latency + self.epsilon;
        // ln() is negative below 1, which would invert the ordering; fall back to linear.
        let ratio = if top > 1.0 {
            (latency + self.epsilon).ln() / top.ln()
        } else {
            latency / max_latency
        };

        if ratio.is_finite() {
            Ok(ratio)
        } else {
            Err(degenerate())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const GLOW: LengthScale = LengthScale {
        min_len: 5.0,
        max_len: 40.0,
        epsilon: 1.0,
    };
    const CLASSIC: LengthScale = LengthScale {
        min_len: 10.0,
        max_len: 70.0,
        epsilon: 0.0,
    };

    #[test]
    fn sub_nanosecond_latency_clamps_to_min() {
        assert_eq!(GLOW.visual_length(0.5, 6e7), 5.0);
        assert_eq!(CLASSIC.visual_length(0.5, 6e7), 10.0);
    }

    #[test]
    fn max_latency_gets_max_len() {
        assert_eq!(GLOW.visual_length(6e7, 6e7), 40.0);
        assert_eq!(CLASSIC.visual_length(6e7, 6e7), 70.0);
    }

    #[test]
    fn bounded_and_non_decreasing() {
        for scale in [GLOW, CLASSIC] {
            for max in [0.2, 1.0, 3.0, 1e3, 6e7] {
                let mut prev = 0.0;
                let mut latency = max / 1e9;
                while latency <= max {
                    let len = scale.visual_length(latency, max);
                    assert!(len.is_finite());
                    assert!((scale.min_len..=scale.max_len).contains(&len));
                    assert!(len >= prev, "latency {latency} max {max}: {len} < {prev}");
                    prev = len;
                    latency *= 1.7;
                }
            }
        }
    }

    #[test]
    fn degenerate_bounds_use_min_len() {
        assert_eq!(GLOW.visual_length(0.0, 100.0), 5.0);
        assert_eq!(GLOW.visual_length(-3.0, 100.0), 5.0);
        assert_eq!(GLOW.visual_length(10.0, 0.0), 5.0);
        assert_eq!(GLOW.visual_length(f64::NAN, 100.0), 5.0);
        assert_eq!(CLASSIC.visual_length(1.0, 1.0), 70.0);
    }
}
