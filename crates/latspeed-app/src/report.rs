//! Human-readable and JSON rendering of a computed result.

use std::fmt;

use latspeed_model::{
    AIRCRAFT_ALTITUDE_FT, DEGREE_SYM, PerceivedSpeedEstimate, SpeedResult, TRUE_AIRSPEED_MPH,
};
use serde::Serialize;

/// Assumptions the angular speed model is built on. The first entry states
/// [`TRUE_AIRSPEED_MPH`].
pub const ASSUMPTIONS: [&str; 5] = [
    "Aircraft true speed: 550 mph",
    "Aircraft flying east-west along a line of constant latitude",
    "Observer is stationary on the ground",
    "Clear viewing conditions",
    "Earth is a perfect sphere",
];

/// `"faster"` for a non-negative change, `"slower"` otherwise.
pub fn direction_label(percent: f64) -> &'static str {
    if percent >= 0.0 { "faster" } else { "slower" }
}

/// Caption of the latitude track, e.g. `At Selected Latitude (41.4% faster)`.
pub fn track_caption(result: &SpeedResult) -> String {
    format!(
        "At Selected Latitude ({:.1}% {})",
        result.percent_increase_vs_equator,
        direction_label(result.percent_increase_vs_equator)
    )
}

/// Text report of one result, optionally followed by the perceived speed
/// heuristic.
pub struct Report<'a> {
    pub result: &'a SpeedResult,
    pub perceived: Option<&'a PerceivedSpeedEstimate>,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.result;
        let d = DEGREE_SYM;
        writeln!(f, "Location")?;
        writeln!(f, "  Latitude: {:.2}{d}", r.latitude_deg)?;
        writeln!(
            f,
            "  Circumference at latitude: {:.0} miles",
            r.circumference_at_latitude_mi
        )?;
        writeln!(
            f,
            "  Distance per degree of longitude: {:.2} miles",
            r.miles_per_degree
        )?;
        writeln!(f, "Angular speed")?;
        writeln!(f, "  Degrees covered per hour: {:.2}{d}/hr", r.degrees_per_hour)?;
        writeln!(f, "  Angular speed: {:.5}{d}/sec", r.degrees_per_second)?;
        writeln!(
            f,
            "  Increase compared to equator: {:.2}% ({})",
            r.percent_increase_vs_equator,
            direction_label(r.percent_increase_vs_equator)
        )?;
        writeln!(
            f,
            "  At equator: {TRUE_AIRSPEED_MPH:.0} mph -> at {:.2}{d}: {TRUE_AIRSPEED_MPH:.0} mph, \
             {:.2}% {} apparent motion",
            r.latitude_deg.abs(),
            r.percent_increase_vs_equator,
            direction_label(r.percent_increase_vs_equator)
        )?;

        if let Some(p) = self.perceived {
            writeln!(f, "Perceived speed heuristic (not geometric)")?;
            writeln!(
                f,
                "  Distance to aircraft on the horizon: {:.1} miles",
                p.line_of_sight_mi
            )?;
            writeln!(
                f,
                "  Perceived speed: {:.0} mph ({:.1}% faster)",
                p.perceived_speed_mph,
                p.percent_faster()
            )?;
        }

        writeln!(f, "Calculations assume:")?;
        for assumption in &ASSUMPTIONS {
            writeln!(f, "  - {assumption}")?;
        }
        if self.perceived.is_some() {
            writeln!(f, "  - Cruising altitude: {AIRCRAFT_ALTITUDE_FT:.0} feet")?;
        }
        Ok(())
    }
}

/// Machine-readable form of the same report.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub result: &'a SpeedResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perceived: Option<&'a PerceivedSpeedEstimate>,
    pub assumptions: &'static [&'static str],
}

impl<'a> JsonReport<'a> {
    pub fn new(result: &'a SpeedResult, perceived: Option<&'a PerceivedSpeedEstimate>) -> Self {
        Self {
            result,
            perceived,
            assumptions: &ASSUMPTIONS,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
