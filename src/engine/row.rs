//! Per-row controller: owns one oscillator and keeps it ticking off the
//! frame scheduler until the row goes away.
//!
//! Ownership:
//! - `RowController` holds the only strong reference to the row state.
//! - The pending frame callback holds a `Weak` to it, so a callback that fires
//!   after the controller is gone finds nothing to write to and stops the chain.
//! - Dropping (or cancelling) the controller also unschedules the pending frame.

use serde::Serialize;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{debug, trace};

use crate::engine::{
    BarSnapshot, EffectModel, Effects, EngineProfile, FrameHandle, FrameOutcome, FrameScheduler,
    Oscillator, TRACK_PERCENT,
};
use crate::metrics::throughput_magnitude;

/// Engine inputs for one row, derived once from the row record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RowParams {
    /// MiB/s-equivalent.
    pub magnitude: f64,
    /// Track-percent per millisecond.
    pub velocity: f64,
    pub visual_length: f64,
}

impl RowParams {
    pub fn derive(throughput: &str, latency: f64, max_latency: f64, profile: &EngineProfile) -> Self {
        let magnitude = throughput_magnitude(throughput);
        Self {
            magnitude,
            velocity: profile.speed.velocity(magnitude),
            visual_length: profile.length.visual_length(latency, max_latency),
        }
    }

    pub fn max_position(&self) -> f64 {
        TRACK_PERCENT - self.visual_length
    }

    pub fn period_ms(&self) -> Option<f64> {
        Oscillator::new(self.velocity, self.visual_length, 0.0, 0.0).period_ms()
    }
}

/// A published frame: where the bar is and how to dress it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RowFrame {
    #[serde(flatten)]
    pub bar: BarSnapshot,
    pub effects: Effects,
}

struct RowState {
    oscillator: Oscillator,
    magnitude: f64,
    effects: EffectModel,
    published: RowFrame,
    pending: Option<FrameHandle>,
}

impl RowState {
    fn new(params: RowParams, profile: &EngineProfile, started_at_ms: f64) -> Self {
        let oscillator = Oscillator::new(
            params.velocity,
            params.visual_length,
            started_at_ms,
            profile.min_frame_ms,
        );
        let published = publish(&oscillator, params.magnitude, profile.effects);
        Self {
            oscillator,
            magnitude: params.magnitude,
            effects: profile.effects,
            published,
            pending: None,
        }
    }

    fn on_frame(&mut self, now_ms: f64) {
        match self.oscillator.on_frame(now_ms) {
            FrameOutcome::Skipped => {}
            outcome => {
                if outcome == FrameOutcome::Reversed {
                    trace!(position = self.oscillator.position(), "bar reversed");
                }
                self.published = publish(&self.oscillator, self.magnitude, self.effects);
            }
        }
    }
}

fn publish(oscillator: &Oscillator, magnitude: f64, effects: EffectModel) -> RowFrame {
    let bar = oscillator.snapshot();
    RowFrame {
        bar,
        effects: effects.effects(magnitude, bar.visual_length_percent, oscillator.direction()),
    }
}

/// Request the next frame for `state`. The callback re-arms itself as long as
/// both the row and the scheduler are still alive.
fn schedule_next(scheduler: &Rc<FrameScheduler>, state: &Weak<RefCell<RowState>>) -> FrameHandle {
    let weak_scheduler = Rc::downgrade(scheduler);
    let weak_state = state.clone();

    scheduler.request_frame(Box::new(move |now_ms| {
        let Some(state) = weak_state.upgrade() else {
            trace!("frame fired for a released row; dropping");
            return;
        };
        state.borrow_mut().on_frame(now_ms);

        if let Some(scheduler) = weak_scheduler.upgrade() {
            let next = schedule_next(&scheduler, &weak_state);
            state.borrow_mut().pending = Some(next);
        }
    }))
}

pub struct RowController {
    state: Rc<RefCell<RowState>>,
    scheduler: Weak<FrameScheduler>,
}

impl RowController {
    pub fn start(
        scheduler: &Rc<FrameScheduler>,
        params: RowParams,
        profile: &EngineProfile,
        started_at_ms: f64,
    ) -> Self {
        let state = Rc::new(RefCell::new(RowState::new(params, profile, started_at_ms)));
        let handle = schedule_next(scheduler, &Rc::downgrade(&state));
        state.borrow_mut().pending = Some(handle);

        Self {
            state,
            scheduler: Rc::downgrade(scheduler),
        }
    }

    /// Latest published frame.
    pub fn frame(&self) -> RowFrame {
        self.state.borrow().published
    }

    /// Stop animating and return the last published frame.
    pub fn cancel(self) -> RowFrame {
        self.frame()
    }
}

impl Drop for RowController {
    fn drop(&mut self) {
        let pending = self.state.borrow_mut().pending.take();
        if let (Some(handle), Some(scheduler)) = (pending, self.scheduler.upgrade()) {
            let removed = scheduler.cancel_frame(handle);
            debug!(?handle, removed, "row torn down");
        }
    }
}
