//! Tick source paced against the wall clock.
//!
//! Plays the role of a display refresh signal for hosts without one, such as
//! the command-line renderer. In realtime mode each tick sleeps until one
//! interval has passed since the previous tick; otherwise ticks run
//! back-to-back and report the nominal interval.

use std::thread;
use std::time::{Duration, Instant};

use tracing::warn;

use crate::scheduler::{FrameScheduler, TickCallback, TickHandle, TickSource};

/// Largest delta reported to callbacks, in milliseconds.
/// A stalled host reports this instead of the real gap.
pub const MAX_FRAME_TIME_MS: f64 = 250.0;

const FALLBACK_TICK_RATE_HZ: f64 = 60.0;

/// Wall-clock paced wrapper around a [`FrameScheduler`].
pub struct PacedTicks {
    scheduler: FrameScheduler,
    interval: Duration,
    realtime: bool,
    previous_time: Option<Instant>,
    frame_count: u64,
}

impl PacedTicks {
    /// Creates a source ticking at `tick_rate_hz`.
    ///
    /// A rate that is not a positive finite number falls back to 60 Hz.
    pub fn new(tick_rate_hz: f64, realtime: bool) -> Self {
        let rate = if tick_rate_hz.is_finite() && tick_rate_hz > 0.0 {
            tick_rate_hz
        } else {
            warn!(tick_rate_hz, "invalid tick rate, using {FALLBACK_TICK_RATE_HZ} Hz");
            FALLBACK_TICK_RATE_HZ
        };
        Self {
            scheduler: FrameScheduler::new(),
            interval: Duration::from_secs_f64(1.0 / rate),
            realtime,
            previous_time: None,
            frame_count: 0,
        }
    }

    /// Nominal time between ticks.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Runs one tick and returns the number of callbacks invoked.
    pub fn tick(&mut self) -> usize {
        let delta_ms = if self.realtime {
            self.wait_for_next_tick()
        } else {
            self.interval.as_secs_f64() * 1000.0
        };
        self.frame_count += 1;
        self.scheduler.deliver(delta_ms)
    }

    /// Runs up to `max_ticks` ticks, stopping early once every callback has
    /// been stopped. Returns the number of ticks run.
    pub fn run(&mut self, max_ticks: u64) -> u64 {
        let mut ran = 0;
        while ran < max_ticks && !self.scheduler.is_idle() {
            self.tick();
            ran += 1;
        }
        ran
    }

    /// Total ticks run so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    fn wait_for_next_tick(&mut self) -> f64 {
        let Some(previous) = self.previous_time else {
            self.previous_time = Some(Instant::now());
            return self.interval.as_secs_f64() * 1000.0;
        };

        let due = previous + self.interval;
        let now = Instant::now();
        if due > now {
            thread::sleep(due - now);
        }

        let current = Instant::now();
        let mut delta_ms = current.duration_since(previous).as_secs_f64() * 1000.0;
        self.previous_time = Some(current);

        if delta_ms > MAX_FRAME_TIME_MS {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                delta_ms, MAX_FRAME_TIME_MS
            );
            delta_ms = MAX_FRAME_TIME_MS;
        }
        delta_ms
    }
}

impl TickSource for PacedTicks {
    fn start(&mut self, on_tick: TickCallback) -> TickHandle {
        self.scheduler.start(on_tick)
    }

    fn stop(&mut self, handle: &TickHandle) {
        self.scheduler.stop(handle);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_interval_matches_rate() {
        let ticks = PacedTicks::new(60.0, false);
        assert!((ticks.interval().as_secs_f64() - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_rate_falls_back() {
        let ticks = PacedTicks::new(0.0, false);
        assert!((ticks.interval().as_secs_f64() - 1.0 / 60.0).abs() < 1e-9);
        let ticks = PacedTicks::new(f64::NAN, false);
        assert!((ticks.interval().as_secs_f64() - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_nominal_delta_when_not_realtime() {
        let mut ticks = PacedTicks::new(50.0, false);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let inner = Rc::clone(&seen);
        ticks.start(Box::new(move |dt: f64| inner.borrow_mut().push(dt)));
        assert_eq!(ticks.run(3), 3);
        for dt in seen.borrow().iter() {
            assert!((dt - 20.0).abs() < 1e-9, "delta {dt}");
        }
    }

    #[test]
    fn test_run_stops_when_idle() {
        let mut ticks = PacedTicks::new(60.0, false);
        assert_eq!(ticks.run(10), 0, "no callbacks, nothing to run");

        let count = Rc::new(Cell::new(0u32));
        let slot: Rc<Cell<Option<TickHandle>>> = Rc::new(Cell::new(None));
        let (c, s) = (Rc::clone(&count), Rc::clone(&slot));
        let handle = ticks.start(Box::new(move |_: f64| {
            c.set(c.get() + 1);
            if c.get() == 4
                && let Some(h) = s.take()
            {
                h.cancel();
            }
        }));
        slot.set(Some(handle));

        assert_eq!(ticks.run(100), 4);
        assert_eq!(count.get(), 4);
        assert_eq!(ticks.frame_count(), 4);
    }

    #[test]
    fn test_realtime_ticks_are_paced() {
        let mut ticks = PacedTicks::new(200.0, true);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let inner = Rc::clone(&seen);
        ticks.start(Box::new(move |dt: f64| inner.borrow_mut().push(dt)));

        let start = Instant::now();
        ticks.run(4);
        // The first tick is immediate, the remaining three wait ~5ms each.
        assert!(start.elapsed() >= Duration::from_millis(14));
        for dt in seen.borrow().iter().skip(1) {
            assert!(*dt >= 4.9 && *dt <= MAX_FRAME_TIME_MS, "delta {dt}");
        }
    }
}
