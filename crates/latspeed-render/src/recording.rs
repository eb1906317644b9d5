//! A canvas that records draw calls instead of rasterizing them.
//!
//! Lets renderers be checked structurally: which shapes were drawn, where,
//! and with what opacity.

use glam::DVec2;

use crate::canvas::{Canvas, Shadow};
use crate::color::Color;
use crate::paint::Paint;
use crate::path::Path;

/// One recorded draw call, with the global alpha and shadow active at the time.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillPath {
        path: Path,
        paint: Paint,
        alpha: f64,
        shadow: Option<Shadow>,
    },
    StrokePath {
        path: Path,
        paint: Paint,
        width: f64,
        alpha: f64,
        shadow: Option<Shadow>,
    },
    FillCircle {
        center: DVec2,
        radius: f64,
        paint: Paint,
        alpha: f64,
        shadow: Option<Shadow>,
    },
    StrokeCircle {
        center: DVec2,
        radius: f64,
        paint: Paint,
        width: f64,
        alpha: f64,
        shadow: Option<Shadow>,
    },
}

/// Canvas that appends every call to [`commands`](Self::commands).
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    width: u32,
    height: u32,
    global_alpha: f64,
    shadow: Option<Shadow>,
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            global_alpha: 1.0,
            shadow: None,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drops recorded commands, keeping alpha and shadow state.
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// Radii of all stroked circles, in draw order.
    pub fn stroked_circle_radii(&self) -> Vec<f64> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::StrokeCircle { radius, .. } => Some(*radius),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        self.commands.push(DrawCommand::FillPath {
            path: path.clone(),
            paint: paint.clone(),
            alpha: self.global_alpha,
            shadow: self.shadow,
        });
    }

    fn stroke_path(&mut self, path: &Path, paint: &Paint, width: f64) {
        self.commands.push(DrawCommand::StrokePath {
            path: path.clone(),
            paint: paint.clone(),
            width,
            alpha: self.global_alpha,
            shadow: self.shadow,
        });
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.global_alpha = alpha.clamp(0.0, 1.0);
    }

    fn global_alpha(&self) -> f64 {
        self.global_alpha
    }

    fn set_shadow(&mut self, shadow: Option<Shadow>) {
        self.shadow = shadow;
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, paint: &Paint) {
        if radius > 0.0 {
            self.commands.push(DrawCommand::FillCircle {
                center,
                radius,
                paint: paint.clone(),
                alpha: self.global_alpha,
                shadow: self.shadow,
            });
        }
    }

    fn stroke_circle(&mut self, center: DVec2, radius: f64, paint: &Paint, width: f64) {
        if radius > 0.0 {
            self.commands.push(DrawCommand::StrokeCircle {
                center,
                radius,
                paint: paint.clone(),
                width,
                alpha: self.global_alpha,
                shadow: self.shadow,
            });
        }
    }
}
