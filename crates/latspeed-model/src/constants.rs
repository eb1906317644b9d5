//! Physical constants of the model.
//!
//! These are part of the model's contract and are deliberately not exposed
//! through configuration.

/// True airspeed of the aircraft in miles per hour.
pub const TRUE_AIRSPEED_MPH: f64 = 550.0;

/// Mean radius of the Earth in miles.
pub const EARTH_RADIUS_MI: f64 = 3959.0;

/// Seconds in one hour.
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Cruising altitude assumed by [`PerceivedSpeedEstimate`](crate::PerceivedSpeedEstimate).
pub const AIRCRAFT_ALTITUDE_FT: f64 = 35_000.0;

/// Feet in one statute mile.
pub const FEET_PER_MILE: f64 = 5280.0;

/// Upper bound of the perceived speed, as a multiple of the true airspeed.
pub const PERCEIVED_SPEED_CAP: f64 = 1.5;

/// Unicode's degree symbol
pub const DEGREE_SYM: char = '\u{00b0}';
