//! The drawing capabilities renderers are written against.

use glam::DVec2;

use crate::color::Color;
use crate::paint::Paint;
use crate::path::Path;

/// Drop shadow applied to shapes drawn while it is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Color,
    /// Blur radius in pixels.
    pub blur: f64,
    pub offset: DVec2,
}

impl Shadow {
    /// A centered glow.
    pub fn glow(color: Color, blur: f64) -> Self {
        Self {
            color,
            blur,
            offset: DVec2::ZERO,
        }
    }
}

/// A fixed-size 2D drawing surface.
///
/// Global alpha and shadow are state: they apply to every fill and stroke
/// until changed. `clear` ignores both.
pub trait Canvas {
    /// Surface size in pixels.
    fn size(&self) -> (u32, u32);

    /// Replaces every pixel with `color`.
    fn clear(&mut self, color: Color);

    /// Fills the area enclosed by `path` (nonzero winding).
    fn fill_path(&mut self, path: &Path, paint: &Paint);

    /// Strokes the outline of `path` with a line `width` pixels wide.
    fn stroke_path(&mut self, path: &Path, paint: &Paint, width: f64);

    /// Opacity multiplier in `[0, 1]` for subsequent drawing.
    fn set_global_alpha(&mut self, alpha: f64);

    fn global_alpha(&self) -> f64;

    /// Sets or removes the drop shadow for subsequent drawing.
    fn set_shadow(&mut self, shadow: Option<Shadow>);

    fn fill_circle(&mut self, center: DVec2, radius: f64, paint: &Paint) {
        if radius > 0.0 {
            self.fill_path(&Path::circle(center, radius), paint);
        }
    }

    fn stroke_circle(&mut self, center: DVec2, radius: f64, paint: &Paint, width: f64) {
        if radius > 0.0 {
            self.stroke_path(&Path::circle(center, radius), paint, width);
        }
    }

    /// Fills a pie wedge between two angles.
    fn fill_arc(&mut self, center: DVec2, radius: f64, start: f64, end: f64, paint: &Paint) {
        if radius > 0.0 {
            self.fill_path(&Path::sector(center, radius, start, end), paint);
        }
    }
}
