//! Mounting a renderer on a tick source.
//!
//! A mounted [`Visualization`] owns its clock, renderer and canvas inside the
//! tick callback. Nothing else can reach its [`AnimationState`]; disposing the
//! visualization stops the callback and drops all three.
//!
//! [`AnimationState`]: latspeed_clock::AnimationState

use latspeed_clock::{AnimationClock, ClockSettings, TickHandle, TickSource};
use latspeed_model::SpeedResult;
use tracing::{debug, info};

use crate::canvas::Canvas;
use crate::frame::{RenderFrame, Renderer};

/// A renderer running on a tick source until disposed.
#[derive(Debug)]
pub struct Visualization {
    name: &'static str,
    handle: TickHandle,
}

impl Visualization {
    /// Starts animating `result` with `renderer` onto `canvas`.
    ///
    /// Each tick advances a fresh [`AnimationClock`] by one step, renders the
    /// new state and hands the finished canvas to `present`.
    pub fn mount<S, R, C, F>(
        source: &mut S,
        result: SpeedResult,
        settings: &ClockSettings,
        renderer: R,
        mut canvas: C,
        mut present: F,
    ) -> Self
    where
        S: TickSource + ?Sized,
        R: Renderer + 'static,
        C: Canvas + 'static,
        F: FnMut(&RenderFrame<'_>, &C) + 'static,
    {
        let name = renderer.name();
        let mut clock = AnimationClock::for_result(settings, &result);
        let handle = source.start(Box::new(move |_delta_ms: f64| {
            let state = *clock.advance();
            let frame = RenderFrame {
                state,
                result: &result,
                tick: clock.tick_count(),
            };
            renderer.render(&frame, &mut canvas);
            present(&frame, &canvas);
        }));
        info!(name, latitude = result.latitude_deg, id = handle.id(), "visualization mounted");
        Self { name, handle }
    }

    /// Name of the renderer driving this visualization.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn handle(&self) -> &TickHandle {
        &self.handle
    }

    pub fn is_disposed(&self) -> bool {
        self.handle.is_cancelled()
    }

    /// Stops the animation. No frame is rendered after this returns.
    pub fn dispose<S: TickSource + ?Sized>(self, source: &mut S) {
        source.stop(&self.handle);
        debug!(name = self.name, id = self.handle.id(), "visualization disposed");
    }
}

impl Drop for Visualization {
    fn drop(&mut self) {
        // Without the source the callback is released on its next dispatch.
        self.handle.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use latspeed_clock::FrameScheduler;
    use latspeed_model::compute;

    use super::*;
    use crate::globe::GlobeRenderer;
    use crate::recording::RecordingCanvas;
    use crate::track::LinearTrackRenderer;

    /// Canvas that reports when it is dropped.
    struct TrackedCanvas {
        inner: RecordingCanvas,
        dropped: Rc<Cell<bool>>,
    }

    impl TrackedCanvas {
        fn new(dropped: &Rc<Cell<bool>>) -> Self {
            Self {
                inner: RecordingCanvas::new(400, 300),
                dropped: Rc::clone(dropped),
            }
        }
    }

    impl Drop for TrackedCanvas {
        fn drop(&mut self) {
            self.dropped.set(true);
        }
    }

    impl Canvas for TrackedCanvas {
        fn size(&self) -> (u32, u32) {
            self.inner.size()
        }
        fn clear(&mut self, color: crate::Color) {
            self.inner.clear(color);
        }
        fn fill_path(&mut self, path: &crate::Path, paint: &crate::Paint) {
            self.inner.fill_path(path, paint);
        }
        fn stroke_path(&mut self, path: &crate::Path, paint: &crate::Paint, width: f64) {
            self.inner.stroke_path(path, paint, width);
        }
        fn set_global_alpha(&mut self, alpha: f64) {
            self.inner.set_global_alpha(alpha);
        }
        fn global_alpha(&self) -> f64 {
            self.inner.global_alpha()
        }
        fn set_shadow(&mut self, shadow: Option<crate::Shadow>) {
            self.inner.set_shadow(shadow);
        }
    }

    fn ticks_recorder() -> (Rc<RefCell<Vec<u64>>>, impl FnMut(&RenderFrame<'_>, &RecordingCanvas) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |frame: &RenderFrame<'_>, _: &RecordingCanvas| sink.borrow_mut().push(frame.tick))
    }

    #[test]
    fn test_mount_renders_every_tick() {
        let mut scheduler = FrameScheduler::new();
        let result = compute(45.0).unwrap();
        let (seen, present) = ticks_recorder();
        let viz = Visualization::mount(
            &mut scheduler,
            result,
            &ClockSettings::default(),
            GlobeRenderer::default(),
            RecordingCanvas::new(400, 300),
            present,
        );
        assert_eq!(viz.name(), "globe");

        for _ in 0..3 {
            scheduler.deliver(16.0);
        }
        assert_eq!(*seen.borrow(), vec![1, 2, 3]);
        viz.dispose(&mut scheduler);
    }

    #[test]
    fn test_no_frames_after_dispose() {
        let mut scheduler = FrameScheduler::new();
        let (seen, present) = ticks_recorder();
        let viz = Visualization::mount(
            &mut scheduler,
            compute(10.0).unwrap(),
            &ClockSettings::default(),
            LinearTrackRenderer::default(),
            RecordingCanvas::new(400, 140),
            present,
        );
        scheduler.deliver(16.0);
        viz.dispose(&mut scheduler);
        scheduler.deliver(16.0);
        scheduler.deliver(16.0);

        assert_eq!(*seen.borrow(), vec![1]);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_visualizations_are_independent() {
        let mut scheduler = FrameScheduler::new();
        let settings = ClockSettings::default();
        let globe_states = Rc::new(RefCell::new(Vec::new()));
        let track_states = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&globe_states);
        let globe = Visualization::mount(
            &mut scheduler,
            compute(60.0).unwrap(),
            &settings,
            GlobeRenderer::default(),
            RecordingCanvas::new(400, 300),
            move |frame: &RenderFrame<'_>, _: &RecordingCanvas| sink.borrow_mut().push(frame.state),
        );
        scheduler.deliver(16.0);
        scheduler.deliver(16.0);

        let sink = Rc::clone(&track_states);
        let track = Visualization::mount(
            &mut scheduler,
            compute(60.0).unwrap(),
            &settings,
            LinearTrackRenderer::default(),
            RecordingCanvas::new(400, 140),
            move |frame: &RenderFrame<'_>, _: &RecordingCanvas| sink.borrow_mut().push(frame.state),
        );
        scheduler.deliver(16.0);

        // The late visualization starts from rest instead of sharing state.
        assert_eq!(globe_states.borrow().len(), 3);
        assert_eq!(track_states.borrow().len(), 1);
        assert_eq!(track_states.borrow()[0], globe_states.borrow()[0]);

        globe.dispose(&mut scheduler);
        scheduler.deliver(16.0);
        assert_eq!(globe_states.borrow().len(), 3);
        assert_eq!(track_states.borrow().len(), 2);
        track.dispose(&mut scheduler);
    }

    #[test]
    fn test_dispose_releases_canvas() {
        let mut scheduler = FrameScheduler::new();
        let dropped = Rc::new(Cell::new(false));
        let viz = Visualization::mount(
            &mut scheduler,
            compute(30.0).unwrap(),
            &ClockSettings::default(),
            GlobeRenderer::default(),
            TrackedCanvas::new(&dropped),
            |_: &RenderFrame<'_>, _: &TrackedCanvas| {},
        );
        scheduler.deliver(16.0);
        assert!(!dropped.get());

        viz.dispose(&mut scheduler);
        assert!(dropped.get());
    }

    #[test]
    fn test_cancel_from_earlier_callback_skips_frame() {
        let mut scheduler = FrameScheduler::new();
        let dropped = Rc::new(Cell::new(false));
        let frames = Rc::new(Cell::new(0u32));
        let target: Rc<RefCell<Option<TickHandle>>> = Rc::new(RefCell::new(None));

        // Runs before the visualization within every dispatch.
        let victim = Rc::clone(&target);
        scheduler.start(Box::new(move |_: f64| {
            if let Some(handle) = victim.borrow().as_ref() {
                handle.cancel();
            }
        }));

        let viz = Visualization::mount(
            &mut scheduler,
            compute(30.0).unwrap(),
            &ClockSettings::default(),
            GlobeRenderer::default(),
            TrackedCanvas::new(&dropped),
            {
                let frames = Rc::clone(&frames);
                move |_: &RenderFrame<'_>, _: &TrackedCanvas| frames.set(frames.get() + 1)
            },
        );
        scheduler.deliver(16.0);
        assert_eq!(frames.get(), 1);

        *target.borrow_mut() = Some(viz.handle().clone());
        scheduler.deliver(16.0);
        assert_eq!(frames.get(), 1);
        assert!(dropped.get(), "released at the end of the dispatch");
        assert!(viz.is_disposed());
    }

    #[test]
    fn test_drop_without_source_cancels() {
        let mut scheduler = FrameScheduler::new();
        let (seen, present) = ticks_recorder();
        let viz = Visualization::mount(
            &mut scheduler,
            compute(20.0).unwrap(),
            &ClockSettings::default(),
            GlobeRenderer::default(),
            RecordingCanvas::new(400, 300),
            present,
        );
        drop(viz);
        scheduler.deliver(16.0);
        assert!(seen.borrow().is_empty());
        assert!(scheduler.is_idle());
    }
}
