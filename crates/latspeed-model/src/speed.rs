//! The angular speed model.

use std::f64::consts::TAU;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::constants::{DEGREE_SYM, EARTH_RADIUS_MI, SECONDS_PER_HOUR, TRUE_AIRSPEED_MPH};
use crate::error::SpeedError;

/// Geometry and angular speed of the aircraft at one latitude.
///
/// Produced once per query by [`compute`] and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeedResult {
    /// Signed input latitude in degrees.
    pub latitude_deg: f64,
    /// Length of the circle of latitude in miles.
    pub circumference_at_latitude_mi: f64,
    /// Length of one degree of longitude along that circle, in miles.
    pub miles_per_degree: f64,
    /// Degrees of longitude covered per hour at the true airspeed.
    pub degrees_per_hour: f64,
    /// Degrees of longitude covered per second at the true airspeed.
    pub degrees_per_second: f64,
    /// Increase of the angular speed over the same flight along the equator,
    /// in percent.
    pub percent_increase_vs_equator: f64,
}

impl SpeedResult {
    /// Ratio between the angular speed at this latitude and at the equator.
    ///
    /// Equals `1 / cos(latitude)`; this is the factor the latitude marker of
    /// the linear tracks moves faster by.
    pub fn speed_factor(&self) -> f64 {
        1.0 + self.percent_increase_vs_equator / 100.0
    }

    /// Latitude magnitude in radians. The model is symmetric about the
    /// equator, so all geometry uses this value.
    pub fn latitude_rad_abs(&self) -> f64 {
        self.latitude_deg.abs().to_radians()
    }
}

impl fmt::Display for SpeedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2}{} -> {:.5}{}/s ({:+.2}% vs equator)",
            self.latitude_deg,
            DEGREE_SYM,
            self.degrees_per_second,
            DEGREE_SYM,
            self.percent_increase_vs_equator,
        )
    }
}

/// Reject latitudes that are not finite or lie outside `[-90, 90]`.
pub fn validate_latitude(latitude_deg: f64) -> Result<f64, SpeedError> {
    if latitude_deg.is_finite() && latitude_deg.abs() <= 90.0 {
        Ok(latitude_deg)
    } else {
        Err(SpeedError::Domain { latitude_deg })
    }
}

/// Angular quantities for a circle of latitude given in radians.
struct Circle {
    circumference_mi: f64,
    miles_per_degree: f64,
    degrees_per_hour: f64,
    degrees_per_second: f64,
}

impl Circle {
    fn at(lat_rad: f64) -> Self {
        let circumference_mi = TAU * EARTH_RADIUS_MI * lat_rad.cos();
        let miles_per_degree = circumference_mi / 360.0;
        let degrees_per_hour = TRUE_AIRSPEED_MPH / miles_per_degree;
        Self {
            circumference_mi,
            miles_per_degree,
            degrees_per_hour,
            degrees_per_second: degrees_per_hour / SECONDS_PER_HOUR,
        }
    }
}

/// Compute the angular speed of the aircraft at `latitude_deg`.
///
/// # Errors
///
/// - [`SpeedError::Domain`] if the latitude is not finite or `|latitude| > 90`.
/// - [`SpeedError::DivisionSingularity`] at exactly `±90`, where a degree of
///   longitude has no length. `cos(π/2)` is not exactly zero in floating
///   point, so the pole is detected on the input rather than on the divisor.
pub fn compute(latitude_deg: f64) -> Result<SpeedResult, SpeedError> {
    let latitude_deg = validate_latitude(latitude_deg)?;
    if latitude_deg.abs() == 90.0 {
        return Err(SpeedError::DivisionSingularity { latitude_deg });
    }

    let at_latitude = Circle::at(latitude_deg.abs().to_radians());
    if at_latitude.miles_per_degree <= 0.0 {
        return Err(SpeedError::DivisionSingularity { latitude_deg });
    }
    let at_equator = Circle::at(0.0);

    let percent_increase_vs_equator = (at_latitude.degrees_per_second
        - at_equator.degrees_per_second)
        / at_equator.degrees_per_second
        * 100.0;

    let result = SpeedResult {
        latitude_deg,
        circumference_at_latitude_mi: at_latitude.circumference_mi,
        miles_per_degree: at_latitude.miles_per_degree,
        degrees_per_hour: at_latitude.degrees_per_hour,
        degrees_per_second: at_latitude.degrees_per_second,
        percent_increase_vs_equator,
    };
    debug!(%result, "computed angular speed");
    Ok(result)
}
