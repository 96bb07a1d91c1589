//! Bounded 1-D bounce simulation for one row's bar.
//!
//! The bar lives on a 0..100 % track. Its left edge moves between 0 and
//! `max_position = 100 - visual_length`, reversing at each end:
//!
//!   Forward  --(position reaches max_position)--> Backward
//!   Backward --(position reaches 0)------------> Forward
//!
//! A reversal clamps the position exactly onto the bound; overshoot is not
//! carried into the next frame.

use serde::Serialize;

pub const TRACK_PERCENT: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn sign(self) -> i8 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// What a row publishes to the presentation layer each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarSnapshot {
    pub position_percent: f64,
    pub direction_sign: i8,
    pub visual_length_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Less than one frame interval elapsed; nothing was written.
    Skipped,
    Moved,
    /// The bar hit a bound this frame and now faces the other way.
    Reversed,
}

#[derive(Debug, Clone)]
pub struct Oscillator {
    position: f64,
    direction: Direction,
    last_frame_ms: f64,

    /// Track-percent per millisecond.
    velocity: f64,
    visual_length: f64,
    max_position: f64,
    min_frame_ms: f64,
}

impl Oscillator {
    pub fn new(velocity: f64, visual_length: f64, started_at_ms: f64, min_frame_ms: f64) -> Self {
        let visual_length = visual_length.clamp(0.0, TRACK_PERCENT);
        Self {
            position: 0.0,
            direction: Direction::Forward,
            last_frame_ms: started_at_ms,
            velocity: if velocity.is_finite() { velocity.max(0.0) } else { 0.0 },
            visual_length,
            max_position: TRACK_PERCENT - visual_length,
            min_frame_ms: min_frame_ms.max(0.0),
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[cfg(test)]
    pub fn max_position(&self) -> f64 {
        self.max_position
    }

    #[cfg(test)]
    pub fn last_frame_ms(&self) -> f64 {
        self.last_frame_ms
    }

    /// Frame-clock entry point. Sub-frame, negative and non-finite deltas are
    /// coalesced into the next real frame without touching any state.
    pub fn on_frame(&mut self, now_ms: f64) -> FrameOutcome {
        let dt = now_ms - self.last_frame_ms;
        if !dt.is_finite() || dt < self.min_frame_ms || dt <= 0.0 {
            return FrameOutcome::Skipped;
        }
        self.last_frame_ms = now_ms;
        self.advance(dt)
    }

    /// Move by `dt_ms` worth of travel, reversing at the bounds.
    pub fn advance(&mut self, dt_ms: f64) -> FrameOutcome {
        if !dt_ms.is_finite() || dt_ms <= 0.0 {
            return FrameOutcome::Skipped;
        }

        let candidate = self.position + f64::from(self.direction.sign()) * self.velocity * dt_ms;
        match self.direction {
            Direction::Forward if candidate >= self.max_position => {
                self.position = self.max_position;
                self.direction = Direction::Backward;
                FrameOutcome::Reversed
            }
            Direction::Backward if candidate <= 0.0 => {
                self.position = 0.0;
                self.direction = Direction::Forward;
                FrameOutcome::Reversed
            }
            _ => {
                self.position = candidate;
                FrameOutcome::Moved
            }
        }
    }

    pub fn snapshot(&self) -> BarSnapshot {
        BarSnapshot {
            position_percent: self.position,
            direction_sign: self.direction.sign(),
            visual_length_percent: self.visual_length,
        }
    }

    /// Duration of one 0 -> max -> 0 round trip, ignoring frame quantization.
    pub fn period_ms(&self) -> Option<f64> {
        if self.velocity > 0.0 && self.max_position > 0.0 {
            Some(2.0 * self.max_position / self.velocity)
        } else {
            None
        }
    }
}
