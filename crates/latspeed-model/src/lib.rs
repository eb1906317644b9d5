//! Angular speed of an aircraft flying along a circle of latitude.
//!
//! An aircraft holding a constant true airspeed covers more degrees of
//! longitude per hour the closer it flies to a pole, because the circle of
//! latitude it follows shrinks with `cos(latitude)`. [`compute`] derives the
//! geometry and angular speed for one latitude and compares it to the same
//! aircraft flying along the equator.
//!
//! The crate also carries [`PerceivedSpeedEstimate`], an older sine-based
//! heuristic that does not agree with the geometric model. It is kept apart
//! from [`SpeedResult`] on purpose and never feeds the animation.

mod constants;
mod error;
mod perceived;
mod speed;

pub use constants::{
    AIRCRAFT_ALTITUDE_FT, DEGREE_SYM, EARTH_RADIUS_MI, FEET_PER_MILE, PERCEIVED_SPEED_CAP,
    SECONDS_PER_HOUR, TRUE_AIRSPEED_MPH,
};
pub use error::SpeedError;
pub use perceived::PerceivedSpeedEstimate;
pub use speed::{SpeedResult, compute, validate_latitude};
