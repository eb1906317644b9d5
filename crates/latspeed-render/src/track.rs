//! Two horizontal progress tracks, equator on top and the selected latitude
//! below. The latitude marker runs `1 + percent_increase_vs_equator / 100` times as fast.

use glam::DVec2;
use latspeed_clock::TRACK_LENGTH;

use crate::canvas::{Canvas, Shadow};
use crate::color::Color;
use crate::frame::{RenderFrame, Renderer};
use crate::glyph::plane_glyph;
use crate::paint::Paint;
use crate::path::Path;

/// Reference canvas size of the track view.
pub const TRACK_SIZE: (u32, u32) = (400, 140);

const BACKGROUND: Color = Color::rgb(248, 250, 252);
const EQUATOR_LANE: Color = Color::rgb(239, 246, 255);
const LATITUDE_LANE: Color = Color::rgb(220, 252, 231);
const EQUATOR_MARKER: Color = Color::rgb(37, 99, 235);
const LATITUDE_MARKER: Color = Color::rgb(22, 163, 74);
const TICK_COLOR: Color = Color::rgb(100, 116, 139);
const TICK_ALPHA: f64 = 0.25;
const TICK_SPACING: f64 = 10.0;
const MARKER_SIZE: f64 = 20.0;

/// Which of the two tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
    Equator,
    Latitude,
}

impl Lane {
    fn colors(self) -> (Color, Color) {
        match self {
            Lane::Equator => (EQUATOR_LANE, EQUATOR_MARKER),
            Lane::Latitude => (LATITUDE_LANE, LATITUDE_MARKER),
        }
    }
}

/// Renders the pair of linear tracks.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearTrackRenderer {
    /// Horizontal margin on both sides of a lane, in pixels.
    pub padding: f64,
}

impl Default for LinearTrackRenderer {
    fn default() -> Self {
        Self { padding: 24.0 }
    }
}

impl LinearTrackRenderer {
    pub fn new(padding: f64) -> Self {
        Self {
            padding: padding.max(0.0),
        }
    }

    /// Bounding box `(min, size)` of a lane on a canvas of `size`.
    pub fn lane_rect(&self, (width, height): (u32, u32), lane: Lane) -> (DVec2, DVec2) {
        let h = height as f64;
        let lane_height = (h * 0.2).max(4.0);
        let center_y = match lane {
            Lane::Equator => h * 0.3,
            Lane::Latitude => h * 0.7,
        };
        let min = DVec2::new(self.padding, center_y - lane_height * 0.5);
        let size = DVec2::new((width as f64 - 2.0 * self.padding).max(0.0), lane_height);
        (min, size)
    }

    /// Center of the marker for a track position in `[0, 100)`.
    pub fn marker_center(&self, size: (u32, u32), lane: Lane, position: f64) -> DVec2 {
        let (min, extent) = self.lane_rect(size, lane);
        let t = (position / TRACK_LENGTH).clamp(0.0, 1.0);
        DVec2::new(min.x + extent.x * t, min.y + extent.y * 0.5)
    }

    fn draw_lane(&self, canvas: &mut dyn Canvas, lane: Lane, position: f64) {
        let size = canvas.size();
        let (min, extent) = self.lane_rect(size, lane);
        let (fill, marker) = lane.colors();
        let radius = extent.y * 0.5;

        canvas.fill_path(&Path::rounded_rect(min, extent, radius), &fill.into());

        canvas.set_global_alpha(TICK_ALPHA);
        let tick = TICK_COLOR.into();
        let mut mark = TICK_SPACING;
        while mark < TRACK_LENGTH {
            let x = min.x + extent.x * mark / TRACK_LENGTH;
            let path = Path::line(DVec2::new(x, min.y + 3.0), DVec2::new(x, min.y + extent.y - 3.0));
            canvas.stroke_path(&path, &tick, 1.0);
            mark += TICK_SPACING;
        }
        canvas.set_global_alpha(1.0);

        let center = self.marker_center(size, lane, position);
        let progress = center.x - min.x;
        if progress > 1.0 {
            let trail = Paint::linear(
                min,
                DVec2::new(center.x, min.y),
                marker.with_alpha(0.0),
                marker.with_alpha(0.5),
            );
            canvas.fill_path(
                &Path::rounded_rect(min, DVec2::new(progress, extent.y), radius.min(progress * 0.5)),
                &trail,
            );
        }

        canvas.set_shadow(Some(Shadow {
            color: Color::BLACK.with_alpha(0.3),
            blur: 3.0,
            offset: DVec2::new(1.0, 2.0),
        }));
        canvas.fill_path(&plane_glyph(center, 0.0, MARKER_SIZE), &marker.into());
        canvas.set_shadow(None);
    }
}

impl Renderer for LinearTrackRenderer {
    fn name(&self) -> &'static str {
        "track"
    }

    fn preferred_size(&self) -> (u32, u32) {
        TRACK_SIZE
    }

    fn render(&self, frame: &RenderFrame<'_>, canvas: &mut dyn Canvas) {
        canvas.set_global_alpha(1.0);
        canvas.set_shadow(None);
        canvas.clear(BACKGROUND);
        self.draw_lane(canvas, Lane::Equator, frame.state.equator_track_position);
        self.draw_lane(canvas, Lane::Latitude, frame.state.latitude_track_position);
    }
}
