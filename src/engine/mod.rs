//! Oscillation engine: one bouncing bar per table row.
//!
//! Data flow:
//!   record -> metrics -> RowParams (magnitude, velocity, length)
//!          -> RowController (owns Oscillator, re-armed by FrameScheduler)
//!          -> RowFrame (position, direction, effects) for the renderer

pub mod clock;
pub mod effects;
pub mod oscillator;
pub mod profile;
pub mod row;
pub mod scheduler;
pub mod speed;
pub mod table;

pub use clock::{FrameClock, ManualClock, SystemClock};
pub use effects::{EffectModel, Effects};
pub use oscillator::{BarSnapshot, Direction, FrameOutcome, Oscillator, TRACK_PERCENT};
pub use profile::{EngineProfile, ProfileName, load_profile_file};
pub use row::{RowController, RowFrame, RowParams};
pub use scheduler::{FrameHandle, FrameScheduler};
pub use speed::SpeedModel;
pub use table::{Keyframes, TableAnimation, sample_keyframes};
