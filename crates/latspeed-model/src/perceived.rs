//! Sine-based perceived speed heuristic.
//!
//! This estimate scales the true airspeed by `1 + 0.4 * sin(latitude)` and
//! caps it at [`PERCEIVED_SPEED_CAP`] times the airspeed. It is not derived
//! from the geometry of the circle of latitude and disagrees with
//! [`compute`](crate::compute): at 60 degrees it reports roughly +35 % where
//! the angular speed has actually doubled. It is reported next to the
//! geometric result for comparison only.

use serde::Serialize;

use crate::constants::{
    AIRCRAFT_ALTITUDE_FT, EARTH_RADIUS_MI, FEET_PER_MILE, PERCEIVED_SPEED_CAP, TRUE_AIRSPEED_MPH,
};
use crate::error::SpeedError;
use crate::speed::validate_latitude;

/// Output of the sine-based heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerceivedSpeedEstimate {
    /// Input latitude in degrees.
    pub latitude_deg: f64,
    /// Straight-line distance from a ground observer to an aircraft sitting
    /// on the observer's horizon at cruising altitude, in miles.
    pub line_of_sight_mi: f64,
    /// Angle subtended at the Earth's center between the observer and that
    /// aircraft, in radians.
    pub horizon_angle_rad: f64,
    /// Heuristic perceived speed in miles per hour.
    pub perceived_speed_mph: f64,
}

impl PerceivedSpeedEstimate {
    /// Evaluate the heuristic for `latitude_deg`.
    ///
    /// Only the magnitude of the latitude matters. The poles are valid here
    /// because nothing is divided by the circle of latitude.
    pub fn estimate(latitude_deg: f64) -> Result<Self, SpeedError> {
        let latitude_deg = validate_latitude(latitude_deg)?;
        let lat_rad = latitude_deg.abs().to_radians();

        let altitude_mi = AIRCRAFT_ALTITUDE_FT / FEET_PER_MILE;
        let orbit_r = EARTH_RADIUS_MI + altitude_mi;
        let line_of_sight_mi = (orbit_r * orbit_r - EARTH_RADIUS_MI * EARTH_RADIUS_MI).sqrt();
        let horizon_angle_rad = (EARTH_RADIUS_MI / orbit_r).acos();

        let perceived = TRUE_AIRSPEED_MPH * (1.0 + lat_rad.sin() * 0.4);

        Ok(Self {
            latitude_deg,
            line_of_sight_mi,
            horizon_angle_rad,
            perceived_speed_mph: perceived.min(TRUE_AIRSPEED_MPH * PERCEIVED_SPEED_CAP),
        })
    }

    /// Perceived speed increase over the true airspeed, in percent.
    pub fn percent_faster(&self) -> f64 {
        (self.perceived_speed_mph / TRUE_AIRSPEED_MPH - 1.0) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute;

    #[test]
    fn test_equator_matches_true_airspeed() {
        let e = PerceivedSpeedEstimate::estimate(0.0).unwrap();
        assert!((e.perceived_speed_mph - TRUE_AIRSPEED_MPH).abs() < 1e-9);
        assert!(e.percent_faster().abs() < 1e-9);
    }

    #[test]
    fn test_line_of_sight_at_cruise_altitude() {
        let e = PerceivedSpeedEstimate::estimate(12.0).unwrap();
        assert!((e.line_of_sight_mi - 229.2).abs() < 0.1, "got {}", e.line_of_sight_mi);
        assert!((e.horizon_angle_rad - 0.05783).abs() < 1e-4);
    }

    #[test]
    fn test_pole_is_valid_and_bounded() {
        let e = PerceivedSpeedEstimate::estimate(-90.0).unwrap();
        assert!((e.perceived_speed_mph - 770.0).abs() < 1e-9);
        assert!(e.perceived_speed_mph <= TRUE_AIRSPEED_MPH * PERCEIVED_SPEED_CAP);
    }

    #[test]
    fn test_rejects_out_of_domain() {
        assert!(PerceivedSpeedEstimate::estimate(120.0).is_err());
        assert!(PerceivedSpeedEstimate::estimate(f64::NAN).is_err());
    }

    #[test]
    fn test_disagrees_with_geometric_model() {
        let heuristic = PerceivedSpeedEstimate::estimate(60.0).unwrap().percent_faster();
        let geometric = compute(60.0).unwrap().percent_increase_vs_equator;
        assert!((heuristic - 34.64).abs() < 0.01, "got {heuristic}");
        assert!(geometric - heuristic > 60.0);
    }
}
