//! Throughput magnitude -> bar velocity.

use serde::{Deserialize, Serialize};

use crate::metrics::DEFAULT_MAGNITUDE;

/// How a row's magnitude (MiB/s-equivalent) becomes a velocity in
/// track-percent per millisecond.
///
/// Both mappings are monotonic non-decreasing in magnitude and clamped on
/// both ends, so no row freezes and none blurs into a strobe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpeedModel {
    /// `clamp(m / divisor, min_speed, max_speed) * gain` percent per `frame_unit_ms`.
    LinearClamped {
        divisor: f64,
        min_speed: f64,
        max_speed: f64,
        gain: f64,
        frame_unit_ms: f64,
    },
    /// `clamp(cbrt(m) * scale, min_rate, max_rate)` percent per `unit_ms`.
    CubeRoot {
        scale: f64,
        min_rate: f64,
        max_rate: f64,
        unit_ms: f64,
    },
}

impl SpeedModel {
    pub fn linear_clamped() -> Self {
        SpeedModel::LinearClamped {
            divisor: 5120.0,
            min_speed: 0.001,
            max_speed: 6.0,
            gain: 3.0,
            frame_unit_ms: 16.0,
        }
    }

    pub fn cube_root() -> Self {
        SpeedModel::CubeRoot {
            scale: 2.0,
            min_rate: 1.0,
            max_rate: 120.0,
            unit_ms: 1000.0,
        }
    }

    /// Track-percent per millisecond.
    pub fn velocity(&self, magnitude: f64) -> f64 {
        let m = if magnitude.is_finite() && magnitude >= 0.0 {
            magnitude
        } else {
            DEFAULT_MAGNITUDE
        };

        match *self {
            SpeedModel::LinearClamped {
                divisor,
                min_speed,
                max_speed,
                gain,
                frame_unit_ms,
            } => (m / divisor).clamp(min_speed, max_speed) * gain / frame_unit_ms,
            SpeedModel::CubeRoot {
                scale,
                min_rate,
                max_rate,
                unit_ms,
            } => (m.cbrt() * scale).clamp(min_rate, max_rate) / unit_ms,
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        use anyhow::bail;

        let (lo, hi, rest) = match *self {
            SpeedModel::LinearClamped {
                divisor,
                min_speed,
                max_speed,
                gain,
                frame_unit_ms,
            } => (min_speed, max_speed, [divisor, gain, frame_unit_ms]),
            SpeedModel::CubeRoot {
                scale,
                min_rate,
                max_rate,
                unit_ms,
            } => (min_rate, max_rate, [scale, unit_ms, 1.0]),
        };

        if !(lo.is_finite() && hi.is_finite()) || lo <= 0.0 || lo > hi {
            bail!("speed bounds must satisfy 0 < min <= max (got {} .. {})", lo, hi);
        }
        if rest.iter().any(|x| !(x.is_finite() && *x > 0.0)) {
            bail!("speed model parameters must be positive and finite: {:?}", self);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::throughput_magnitude;

    const MAGNITUDES: [f64; 9] = [0.0, 0.01, 1.0, 25.0, 70.0, 500.0, 1024.0, 30720.0, 1e12];

    fn upper_bound(model: &SpeedModel) -> f64 {
        match *model {
            SpeedModel::LinearClamped {
                max_speed,
                gain,
                frame_unit_ms,
                ..
            } => max_speed * gain / frame_unit_ms,
            SpeedModel::CubeRoot {
                max_rate, unit_ms, ..
            } => max_rate / unit_ms,
        }
    }

    #[test]
    fn monotonic_and_bounded() {
        for model in [SpeedModel::linear_clamped(), SpeedModel::cube_root()] {
            let mut prev = 0.0;
            for m in MAGNITUDES {
                let v = model.velocity(m);
                assert!(v > 0.0 && v.is_finite());
                assert!(v >= prev, "{model:?} at {m}");
                assert!(v <= upper_bound(&model), "{model:?} at {m}");
                prev = v;
            }
        }
    }

    #[test]
    fn faster_link_moves_faster() {
        for model in [SpeedModel::linear_clamped(), SpeedModel::cube_root()] {
            let fast = model.velocity(throughput_magnitude("30 GiB/s"));
            let slow = model.velocity(throughput_magnitude("70 MiB/s"));
            assert!(fast > slow, "{model:?}: {fast} <= {slow}");
        }
    }

    #[test]
    fn degenerate_magnitude_still_moves() {
        for model in [SpeedModel::linear_clamped(), SpeedModel::cube_root()] {
            for m in [0.0, -1.0, f64::NAN, f64::INFINITY] {
                let v = model.velocity(m);
                assert!(v > 0.0 && v.is_finite(), "{model:?} at {m}: {v}");
            }
        }
    }

    #[test]
    fn cube_root_velocity_in_percent_per_ms() {
        // cbrt(1000) * 2 = 20 percent per second.
        let v = SpeedModel::cube_root().velocity(1000.0);
        assert!((v - 0.02).abs() < 1e-12);
    }

    #[test]
    fn rejects_inverted_bounds() {
        let model = SpeedModel::CubeRoot {
            scale: 2.0,
            min_rate: 10.0,
            max_rate: 1.0,
            unit_ms: 1000.0,
        };
        assert!(model.validate().is_err());
        assert!(SpeedModel::linear_clamped().validate().is_ok());
    }
}
