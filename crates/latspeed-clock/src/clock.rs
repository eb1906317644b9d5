//! Per-visualization animation state and its fixed-step update rule.

use std::f64::consts::TAU;

use latspeed_model::SpeedResult;
use tracing::debug;

/// Length of a linear track. Positions wrap around in `[0, TRACK_LENGTH)`.
pub const TRACK_LENGTH: f64 = 100.0;

/// Mutable animation state owned by exactly one [`AnimationClock`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimationState {
    /// Globe rotation in radians, in `[0, 2π)`.
    pub rotation_angle: f64,
    /// Equator marker position on its track, in `[0, 100)`.
    pub equator_track_position: f64,
    /// Selected-latitude marker position on its track, in `[0, 100)`.
    pub latitude_track_position: f64,
}

/// Timing of the animation, independent of any latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockSettings {
    /// Expected tick cadence of the host in Hz.
    pub tick_rate_hz: f64,
    /// Seconds the equator marker needs for one full track traversal.
    pub equator_period_secs: f64,
    /// Seconds the globe needs for one full revolution.
    pub rotation_period_secs: f64,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            tick_rate_hz: 60.0,
            equator_period_secs: 5.0,
            rotation_period_secs: 10.0,
        }
    }
}

/// Per-tick increments derived once when a clock is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionParams {
    /// Track distance the equator marker moves per tick.
    pub base_step: f64,
    /// Radians the globe rotates per tick.
    pub rotation_step: f64,
    /// Multiplier applied to `base_step` for the latitude marker.
    pub latitude_speed_factor: f64,
}

impl MotionParams {
    /// Steps for the given timing and latitude speed factor.
    ///
    /// Degenerate timings (zero, negative or non-finite) produce a step of
    /// zero, which freezes that part of the animation instead of producing
    /// NaN positions.
    pub fn new(settings: &ClockSettings, latitude_speed_factor: f64) -> Self {
        let ticks_per_traversal = settings.tick_rate_hz * settings.equator_period_secs;
        let ticks_per_revolution = settings.tick_rate_hz * settings.rotation_period_secs;
        Self {
            base_step: step_for(TRACK_LENGTH, ticks_per_traversal),
            rotation_step: step_for(TAU, ticks_per_revolution),
            latitude_speed_factor,
        }
    }

    /// Steps for animating `result` with the given timing.
    pub fn for_result(settings: &ClockSettings, result: &SpeedResult) -> Self {
        Self::new(settings, result.speed_factor())
    }
}

fn step_for(length: f64, ticks: f64) -> f64 {
    if ticks.is_finite() && ticks > 0.0 {
        length / ticks
    } else {
        0.0
    }
}

/// Advance a track position by `step * speed_factor`, wrapping at
/// [`TRACK_LENGTH`].
pub fn advance_position(position: f64, step: f64, speed_factor: f64) -> f64 {
    (position + step * speed_factor).rem_euclid(TRACK_LENGTH)
}

/// Fixed-step animation clock.
///
/// Each call to [`advance`](Self::advance) is one display tick. Positions are
/// not integrated from elapsed wall-clock time: a slow host simply animates
/// slower.
#[derive(Debug, Clone)]
pub struct AnimationClock {
    state: AnimationState,
    params: MotionParams,
    tick_count: u64,
}

impl AnimationClock {
    /// Creates a clock at rest: rotation zero and both markers at the start of
    /// their tracks.
    pub fn new(params: MotionParams) -> Self {
        debug!(
            base_step = params.base_step,
            rotation_step = params.rotation_step,
            speed_factor = params.latitude_speed_factor,
            "animation clock created"
        );
        Self {
            state: AnimationState::default(),
            params,
            tick_count: 0,
        }
    }

    /// Creates a clock animating `result` with the given timing.
    pub fn for_result(settings: &ClockSettings, result: &SpeedResult) -> Self {
        Self::new(MotionParams::for_result(settings, result))
    }

    /// Runs one tick and returns the new state.
    pub fn advance(&mut self) -> &AnimationState {
        let p = &self.params;
        self.state.equator_track_position =
            advance_position(self.state.equator_track_position, p.base_step, 1.0);
        self.state.latitude_track_position = advance_position(
            self.state.latitude_track_position,
            p.base_step,
            p.latitude_speed_factor,
        );
        self.state.rotation_angle = (self.state.rotation_angle + p.rotation_step).rem_euclid(TAU);
        self.tick_count += 1;
        &self.state
    }

    /// Current state.
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Mutable access to the state, e.g. to scrub the animation.
    pub fn state_mut(&mut self) -> &mut AnimationState {
        &mut self.state
    }

    /// Steps this clock advances by.
    pub fn params(&self) -> &MotionParams {
        &self.params
    }

    /// Number of ticks run so far.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use latspeed_model::compute;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_default_settings_traverse_in_five_seconds() {
        let params = MotionParams::new(&ClockSettings::default(), 1.0);
        assert!((params.base_step - 100.0 / 300.0).abs() < EPS);
        assert!((params.rotation_step - TAU / 600.0).abs() < EPS);
    }

    #[test]
    fn test_equator_position_after_n_ticks() {
        let b = 0.37;
        let mut clock = AnimationClock::new(MotionParams {
            base_step: b,
            rotation_step: 0.0,
            latitude_speed_factor: 1.0,
        });
        for n in 1..=2000u32 {
            clock.advance();
            let expected = (n as f64 * b) % 100.0;
            let actual = clock.state().equator_track_position;
            // Accumulated rounding may land just either side of the wrap point.
            let diff = (actual - expected).abs();
            assert!(
                diff < 1e-6 || (100.0 - diff) < 1e-6,
                "tick {n}: expected {expected}, got {actual}"
            );
        }
        assert_eq!(clock.tick_count(), 2000);
    }

    #[test]
    fn test_positions_stay_in_range() {
        let result = compute(80.0).unwrap();
        let mut clock = AnimationClock::for_result(&ClockSettings::default(), &result);
        for _ in 0..5000 {
            let s = *clock.advance();
            assert!((0.0..TRACK_LENGTH).contains(&s.equator_track_position));
            assert!((0.0..TRACK_LENGTH).contains(&s.latitude_track_position));
            assert!((0.0..TAU).contains(&s.rotation_angle));
        }
    }

    #[test]
    fn test_latitude_marker_moves_faster_by_speed_factor() {
        let result = compute(60.0).unwrap();
        let mut clock = AnimationClock::for_result(&ClockSettings::default(), &result);
        // Stay before the first wrap of the faster marker.
        for _ in 0..100 {
            clock.advance();
        }
        let s = clock.state();
        let ratio = s.latitude_track_position / s.equator_track_position;
        assert!((ratio - 2.0).abs() < 1e-9, "ratio {ratio}");
    }

    #[test]
    fn test_rotation_independent_of_tracks() {
        let settings = ClockSettings::default();
        let mut slow = AnimationClock::for_result(&settings, &compute(0.0).unwrap());
        let mut fast = AnimationClock::for_result(&settings, &compute(75.0).unwrap());
        for _ in 0..250 {
            slow.advance();
            fast.advance();
        }
        assert_eq!(slow.state().rotation_angle, fast.state().rotation_angle);
        assert_ne!(
            slow.state().latitude_track_position,
            fast.state().latitude_track_position
        );
    }

    #[test]
    fn test_clocks_from_same_result_do_not_share_state() {
        let result = compute(45.0).unwrap();
        let settings = ClockSettings::default();
        let mut globe = AnimationClock::for_result(&settings, &result);
        let mut track = AnimationClock::for_result(&settings, &result);

        globe.advance();
        globe.state_mut().equator_track_position = 42.0;
        globe.state_mut().rotation_angle = 1.0;

        assert_eq!(track.state(), &AnimationState::default());
        assert_eq!(track.tick_count(), 0);
        track.advance();
        assert!((track.state().equator_track_position - 100.0 / 300.0).abs() < EPS);
        assert_eq!(globe.state().equator_track_position, 42.0);
    }

    #[test]
    fn test_degenerate_settings_freeze_instead_of_nan() {
        let settings = ClockSettings {
            tick_rate_hz: 0.0,
            equator_period_secs: 5.0,
            rotation_period_secs: f64::NAN,
        };
        let mut clock = AnimationClock::new(MotionParams::new(&settings, 1.5));
        clock.advance();
        assert_eq!(clock.state(), &AnimationState::default());
    }

    #[test]
    fn test_advance_position_wraps() {
        assert!((advance_position(99.5, 1.0, 1.0) - 0.5).abs() < EPS);
        assert!((advance_position(10.0, 50.0, 3.0) - 60.0).abs() < EPS);
        assert_eq!(advance_position(0.0, 0.0, 1.0), 0.0);
    }
}
