//! Throughput strings such as "30 GiB/s" and their MiB/s-equivalent magnitude.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use tracing::warn;

use crate::metrics::MetricError;

/// Magnitude used when a throughput string cannot be trusted.
/// Smallest tier but non-zero, so the bar still moves.
pub const DEFAULT_MAGNITUDE: f64 = 1.0;

// 1) value: decimal, optional exponent
// 2) unit: first token after the value; must not start like a number
// Anything after the unit is ignored, so "30 GiB/s (peak)" reads as 30 GiB/s.
static THROUGHPUT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*([+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?)\s*([^\s\d.+-]\S*)"#)
        .expect("throughput regex is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThroughputUnit {
    GiBps,
    MiBps,
    /// Anything else; scaled like MiB/s.
    Other(String),
}

impl ThroughputUnit {
    pub fn from_token(token: &str) -> Self {
        match token {
            "GiB/s" => ThroughputUnit::GiBps,
            "MiB/s" => ThroughputUnit::MiBps,
            other => ThroughputUnit::Other(other.to_string()),
        }
    }

    /// Factor to MiB/s.
    pub fn multiplier(&self) -> f64 {
        match self {
            ThroughputUnit::GiBps => 1024.0,
            ThroughputUnit::MiBps | ThroughputUnit::Other(_) => 1.0,
        }
    }
}

impl fmt::Display for ThroughputUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThroughputUnit::GiBps => f.write_str("GiB/s"),
            ThroughputUnit::MiBps => f.write_str("MiB/s"),
            ThroughputUnit::Other(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Throughput {
    pub value: f64,
    pub unit: ThroughputUnit,
}

impl Throughput {
    pub fn parse(raw: &str) -> Result<Self, MetricError> {
        let caps = THROUGHPUT_RE
            .captures(raw)
            .ok_or_else(|| MetricError::Malformed { raw: raw.to_string() })?;

        let value: f64 = caps[1]
            .parse()
            .map_err(|_| MetricError::Malformed { raw: raw.to_string() })?;
        if !value.is_finite() || value < 0.0 {
            return Err(MetricError::InvalidValue { raw: raw.to_string() });
        }

        Ok(Self {
            value,
            unit: ThroughputUnit::from_token(&caps[2]),
        })
    }

    /// MiB/s-equivalent.
    pub fn magnitude(&self) -> f64 {
        self.value * self.unit.multiplier()
    }
}

/// Parse `raw` and return its MiB/s-equivalent magnitude, or
/// [`DEFAULT_MAGNITUDE`] when the string is unusable.
pub fn throughput_magnitude(raw: &str) -> f64 {
    match Throughput::parse(raw) {
        Ok(t) => t.magnitude(),
        Err(err) => {
            warn!("{err}; using default magnitude {DEFAULT_MAGNITUDE}");
            DEFAULT_MAGNITUDE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn gib_is_1024_mib() {
        assert_eq!(throughput_magnitude("30 GiB/s"), 30720.0);
        assert_eq!(throughput_magnitude("70 MiB/s"), 70.0);
        for v in [0.0, 0.5, 1.0, 7.25, 500.0] {
            let gib = throughput_magnitude(&format!("{v} GiB/s"));
            let mib = throughput_magnitude(&format!("{v} MiB/s"));
            assert_eq!(gib, mib * 1024.0);
        }
    }

    #[test]
    fn monotonic_in_value_for_fixed_unit() {
        for unit in ["GiB/s", "MiB/s", "KB/s"] {
            let mut prev = f64::NEG_INFINITY;
            for v in [0.0, 0.001, 0.5, 1.0, 2.0, 25.0, 1e6] {
                let m = throughput_magnitude(&format!("{v} {unit}"));
                assert!(m >= prev, "{v} {unit}: {m} < {prev}");
                prev = m;
            }
        }
    }

    #[test]
    fn unknown_unit_is_treated_as_mib() {
        let t = Throughput::parse("12.5 ops/s").unwrap();
        assert_eq!(t.unit, ThroughputUnit::Other("ops/s".to_string()));
        assert_eq!(t.magnitude(), 12.5);
    }

    #[test]
    fn malformed_degrades_to_default() {
        for raw in ["", "fast", "GiB/s 30", "30", "-4 GiB/s", "1e400 MiB/s"] {
            assert_eq!(throughput_magnitude(raw), DEFAULT_MAGNITUDE, "{raw:?}");
        }
        assert!(matches!(
            Throughput::parse("-4 GiB/s"),
            Err(MetricError::InvalidValue { .. })
        ));
        assert!(matches!(
            Throughput::parse("fast"),
            Err(MetricError::Malformed { .. })
        ));
    }

    #[test]
    fn trailing_words_after_the_unit_are_ignored() {
        assert_eq!(throughput_magnitude("30 GiB/s extra"), 30720.0);
        assert_eq!(throughput_magnitude("70 MiB/s (random reads)"), 70.0);
    }

    #[test]
    fn zero_throughput_is_valid_not_degraded() {
        let t = Throughput::parse("0 MiB/s").unwrap();
        assert_eq!(t.magnitude(), 0.0);
        assert_eq!(throughput_magnitude("0 MiB/s"), 0.0);
        assert_eq!(throughput_magnitude("0 GiB/s"), 0.0);
    }

    #[test]
    fn tolerates_spacing() {
        assert_eq!(throughput_magnitude("  4GiB/s "), 4096.0);
        assert_eq!(throughput_magnitude("1.5   MiB/s"), 1.5);
    }
}
