//! Fixed-step animation clock for the latitude speed visualizations.
//!
//! An [`AnimationClock`] owns one [`AnimationState`] and advances it by a
//! constant step per tick. Ticks come from a [`TickSource`]: the host's
//! display refresh in a real frontend, [`FrameScheduler`] when the host drives
//! ticks by hand, or [`PacedTicks`] which paces them against the wall clock.

mod clock;
mod paced;
mod scheduler;

pub use clock::{
    AnimationClock, AnimationState, ClockSettings, MotionParams, TRACK_LENGTH, advance_position,
};
pub use paced::{MAX_FRAME_TIME_MS, PacedTicks};
pub use scheduler::{FrameScheduler, TickCallback, TickHandle, TickSource};
