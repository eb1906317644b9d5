//! The per-tick snapshot handed to renderers.

use latspeed_clock::AnimationState;
use latspeed_model::SpeedResult;

use crate::canvas::Canvas;

/// Snapshot of one visualization for one tick. Built fresh every tick and
/// consumed by exactly one [`Renderer::render`] call.
#[derive(Debug, Clone, Copy)]
pub struct RenderFrame<'a> {
    pub state: AnimationState,
    pub result: &'a SpeedResult,
    /// 1-based tick number of the owning clock.
    pub tick: u64,
}

/// A presentation strategy for the animation.
///
/// Rendering is a pure function of the frame: it never fails and keeps no
/// state between ticks.
pub trait Renderer {
    /// Short identifier, e.g. used to name output files.
    fn name(&self) -> &'static str;

    /// Canvas size this renderer is laid out for.
    fn preferred_size(&self) -> (u32, u32);

    /// Draws `frame` onto `canvas`, replacing its previous content.
    fn render(&self, frame: &RenderFrame<'_>, canvas: &mut dyn Canvas);
}
