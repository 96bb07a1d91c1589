//! All rows of one table, sharing one frame scheduler.

use serde::Serialize;
use std::rc::Rc;
use tracing::{debug, warn};

use crate::engine::{
    EngineProfile, FrameClock, FrameScheduler, ManualClock, RowController, RowFrame, RowParams,
};

/// Longest stretch of virtual time [`TableAnimation::advance_to`] will step through.
pub const MAX_SIMULATED_MS: f64 = 10.0 * 60.0 * 1000.0;

// Field order matters: rows drop before the scheduler so each row can
// still cancel its pending handle.
pub struct TableAnimation {
    rows: Vec<Option<RowController>>,
    scheduler: Rc<FrameScheduler>,
}

impl TableAnimation {
    pub fn start(params: &[RowParams], profile: &EngineProfile, started_at_ms: f64) -> Self {
        let scheduler = Rc::new(FrameScheduler::new());
        let rows = params
            .iter()
            .map(|p| Some(RowController::start(&scheduler, *p, profile, started_at_ms)))
            .collect();
        debug!(rows = params.len(), profile = %profile.name, "table animation started");
        Self { rows, scheduler }
    }

    /// Deliver one repaint to every live row. Returns how many callbacks ran.
    pub fn frame(&self, now_ms: f64) -> usize {
        self.scheduler.run_frame(now_ms)
    }

    /// `None` for removed rows.
    pub fn frames(&self) -> Vec<Option<RowFrame>> {
        self.rows
            .iter()
            .map(|row| row.as_ref().map(RowController::frame))
            .collect()
    }

    /// Tear one row down; the others keep animating.
    pub fn remove_row(&mut self, index: usize) -> Option<RowFrame> {
        self.rows
            .get_mut(index)
            .and_then(Option::take)
            .map(RowController::cancel)
    }

    /// Tear every row down. Returns how many callbacks are still queued
    /// afterwards, which is zero unless something outside the rows scheduled.
    pub fn stop(&mut self) -> usize {
        for index in 0..self.rows.len() {
            self.remove_row(index);
        }
        let pending = self.pending_frames();
        debug!(pending, "table animation stopped");
        pending
    }

    /// Step `clock` forward in `frame_ms` repaints until it reads `target_ms`.
    /// Targets past [`MAX_SIMULATED_MS`] are capped; non-finite or negative
    /// targets leave the clock where it is. Returns the time reached.
    pub fn advance_to(&self, clock: &ManualClock, target_ms: f64, frame_ms: f64) -> f64 {
        let target = if target_ms.is_finite() {
            target_ms.max(0.0)
        } else {
            0.0
        };
        let target = if target > MAX_SIMULATED_MS {
            warn!(target, cap = MAX_SIMULATED_MS, "simulated time capped");
            MAX_SIMULATED_MS
        } else {
            target
        };
        let frame_ms = if frame_ms.is_finite() && frame_ms > 0.0 {
            frame_ms
        } else {
            1000.0 / 60.0
        };

        while clock.now_ms() < target {
            let step = frame_ms.min(target - clock.now_ms());
            self.frame(clock.advance(step));
        }
        clock.now_ms()
    }

    #[cfg(test)]
    pub fn live_rows(&self) -> usize {
        self.rows.iter().filter(|r| r.is_some()).count()
    }

    pub fn pending_frames(&self) -> usize {
        self.scheduler.pending()
    }
}

/// Pre-rendered animation, one loop per row.
#[derive(Debug, Clone, Serialize)]
pub struct Keyframes {
    pub frame_ms: f64,
    /// Per row: `[position_percent, direction_sign]` per frame.
    pub rows: Vec<Vec<[f64; 2]>>,
}

/// Drive a table off a manual clock and record each row until it has
/// completed one round trip (or `max_frames`, whichever is first).
pub fn sample_keyframes(
    params: &[RowParams],
    profile: &EngineProfile,
    fps: f64,
    max_frames: usize,
) -> Keyframes {
    let frame_ms = 1000.0 / fps.clamp(1.0, 60.0);
    let max_frames = max_frames.max(1);

    let wanted: Vec<usize> = params
        .iter()
        .map(|p| match p.period_ms() {
            Some(period) => ((period / frame_ms).ceil() as usize).clamp(1, max_frames),
            None => 1,
        })
        .collect();
    let total = wanted.iter().copied().max().unwrap_or(1);

    let clock = ManualClock::new(0.0);
    let animation = TableAnimation::start(params, profile, clock.now_ms());
    let mut rows: Vec<Vec<[f64; 2]>> = wanted.iter().map(|n| Vec::with_capacity(*n)).collect();

    for step in 0..total {
        if step > 0 {
            animation.frame(clock.advance(frame_ms));
        }
        for ((out, want), frame) in rows.iter_mut().zip(&wanted).zip(animation.frames()) {
            match frame {
                Some(frame) if out.len() < *want => {
                    out.push([frame.bar.position_percent, f64::from(frame.bar.direction_sign)]);
                }
                _ => {}
            }
        }
    }

    debug!(frames = total, rows = rows.len(), "sampled keyframes");
    Keyframes { frame_ms, rows }
}
