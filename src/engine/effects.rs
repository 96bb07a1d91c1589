//! Cosmetic per-frame effects. Stateless; recomputed on every publish.

use serde::{Deserialize, Serialize};

use crate::engine::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectModel {
    /// Blur and stretch grow with throughput and bar length.
    MotionBlur,
    /// Fixed stretch toward the direction of travel, no blur.
    Stretch,
}

/// Which edge of the bar stays anchored while it is scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Effects {
    pub blur_px: f64,
    pub scale_x: f64,
    pub trail_scale: f64,
    pub anchor: Anchor,
}

const MIN_BLUR_PX: f64 = 2.0;
const MAX_BLUR_PX: f64 = 20.0;

impl EffectModel {
    pub fn effects(self, magnitude: f64, visual_length: f64, direction: Direction) -> Effects {
        let anchor = match direction {
            Direction::Forward => Anchor::Left,
            Direction::Backward => Anchor::Right,
        };

        match self {
            EffectModel::MotionBlur => {
                let raw = magnitude.max(0.0).cbrt() * (visual_length / 20.0);
                let blur_px = if raw.is_finite() {
                    raw.clamp(MIN_BLUR_PX, MAX_BLUR_PX)
                } else {
                    MIN_BLUR_PX
                };
                Effects {
                    blur_px,
                    scale_x: 1.0 + blur_px / 100.0,
                    trail_scale: blur_px / 10.0,
                    anchor,
                }
            }
            EffectModel::Stretch => Effects {
                blur_px: 0.0,
                scale_x: match direction {
                    Direction::Forward => 1.1,
                    Direction::Backward => 0.9,
                },
                trail_scale: 1.0,
                anchor,
            },
        }
    }
}
