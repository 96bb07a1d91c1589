//! Engine profiles: one configurable engine, two shipped parameterizations.
//!
//! Profile JSON shape (every field optional, defaults from `glow`):
//! {
//!   "name": "custom",
//!   "speed": { "kind": "cube_root", "scale": 2, "min_rate": 1, "max_rate": 120, "unit_ms": 1000 },
//!   "length": { "min_len": 5, "max_len": 40, "epsilon": 1 },
//!   "effects": "motion_blur",
//!   "palette": "glow",
//!   "min_frame_ms": 16
//! }

use anyhow::{Context, bail};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;

use crate::engine::{EffectModel, SpeedModel, TRACK_PERCENT};
use crate::metrics::LengthScale;
use crate::model::Palette;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProfileName {
    /// Cube-root speed, short bars, motion blur.
    Glow,
    /// Linear clamped speed, long bars, stretch.
    Classic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineProfile {
    pub name: String,
    pub speed: SpeedModel,
    pub length: LengthScale,
    pub effects: EffectModel,
    pub palette: Palette,
    /// Frame callbacks closer together than this are coalesced.
    pub min_frame_ms: f64,
}

impl Default for EngineProfile {
    fn default() -> Self {
        Self::glow()
    }
}

impl EngineProfile {
    pub fn glow() -> Self {
        Self {
            name: "glow".to_string(),
            speed: SpeedModel::cube_root(),
            length: LengthScale::new(5.0, 40.0, 1.0),
            effects: EffectModel::MotionBlur,
            palette: Palette::Glow,
            min_frame_ms: 16.0,
        }
    }

    pub fn classic() -> Self {
        Self {
            name: "classic".to_string(),
            speed: SpeedModel::linear_clamped(),
            length: LengthScale::new(10.0, 70.0, 0.0),
            effects: EffectModel::Stretch,
            palette: Palette::Classic,
            min_frame_ms: 16.0,
        }
    }

    pub fn preset(name: ProfileName) -> Self {
        match name {
            ProfileName::Glow => Self::glow(),
            ProfileName::Classic => Self::classic(),
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let LengthScale {
            min_len,
            max_len,
            epsilon,
        } = self.length;
        if !(min_len > 0.0 && min_len <= max_len && max_len < TRACK_PERCENT) {
            bail!(
                "bar length bounds must satisfy 0 < min_len <= max_len < {} (got {} .. {})",
                TRACK_PERCENT,
                min_len,
                max_len
            );
        }
        if !(epsilon.is_finite() && epsilon >= 0.0) {
            bail!("length epsilon must be finite and >= 0 (got {})", epsilon);
        }
        if !(self.min_frame_ms.is_finite() && self.min_frame_ms >= 0.0) {
            bail!("min_frame_ms must be finite and >= 0 (got {})", self.min_frame_ms);
        }
        self.speed
            .validate()
            .with_context(|| format!("profile {}", self.name))?;
        Ok(())
    }
}

/// Read and validate an engine profile JSON file.
pub fn load_profile_file(path: &str) -> anyhow::Result<EngineProfile> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read profile file {}", path))?;
    let profile: EngineProfile =
        serde_json::from_str(&text).with_context(|| format!("parse profile file {}", path))?;
    profile
        .validate()
        .with_context(|| format!("validate profile file {}", path))?;
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn presets_are_valid() {
        EngineProfile::glow().validate().unwrap();
        EngineProfile::classic().validate().unwrap();
    }

    #[test]
    fn partial_json_falls_back_to_glow() {
        let json = r#"{ "name": "wide", "length": { "max_len": 60 } }"#;
        let profile: EngineProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.name, "wide");
        assert_eq!(profile.length, LengthScale::new(5.0, 60.0, 1.0));
        assert_eq!(profile.speed, SpeedModel::cube_root());
        profile.validate().unwrap();
    }

    #[test]
    fn linear_speed_from_json() {
        let json = r#"{ "speed": { "kind": "linear_clamped", "divisor": 1024, "min_speed": 0.01,
                        "max_speed": 4, "gain": 2, "frame_unit_ms": 16 } }"#;
        let profile: EngineProfile = serde_json::from_str(json).unwrap();
        assert!(matches!(profile.speed, SpeedModel::LinearClamped { .. }));
    }

    #[test]
    fn rejects_full_track_bars() {
        let mut profile = EngineProfile::glow();
        profile.length.max_len = 100.0;
        assert!(profile.validate().is_err());

        let mut profile = EngineProfile::classic();
        profile.length.min_len = 0.0;
        assert!(profile.validate().is_err());

        let mut profile = EngineProfile::classic();
        profile.min_frame_ms = -1.0;
        assert!(profile.validate().is_err());
    }
}
