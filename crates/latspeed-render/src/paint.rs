//! Fill styles: solid colors and linear/radial gradients.

use glam::DVec2;
use tiny_skia::{self as sk, Shader, SpreadMode, Transform};

use crate::color::Color;
use crate::path::to_point;

/// A color at a position along a gradient, `offset` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Color,
}

impl GradientStop {
    pub const fn new(offset: f64, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Gradient along the line from `start` to `end`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: DVec2,
    pub end: DVec2,
    /// Stops sorted by offset.
    pub stops: Vec<GradientStop>,
}

/// Gradient radiating from `center` out to `radius`.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: DVec2,
    pub radius: f64,
    /// Stops sorted by offset.
    pub stops: Vec<GradientStop>,
}

/// How a filled or stroked shape is colored.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    Linear(LinearGradient),
    Radial(RadialGradient),
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Self::Solid(color)
    }
}

impl Paint {
    /// Two-stop linear gradient.
    pub fn linear(start: DVec2, end: DVec2, from: Color, to: Color) -> Self {
        Self::Linear(LinearGradient {
            start,
            end,
            stops: vec![GradientStop::new(0.0, from), GradientStop::new(1.0, to)],
        })
    }

    /// Radial gradient with arbitrary stops.
    pub fn radial(center: DVec2, radius: f64, stops: Vec<GradientStop>) -> Self {
        Self::Radial(RadialGradient {
            center,
            radius,
            stops,
        })
    }

    /// The tiny-skia shader for this paint, or `None` for a gradient that
    /// cannot be drawn (no stops, zero radius).
    pub(crate) fn to_shader(&self) -> Option<Shader<'static>> {
        match self {
            Self::Solid(color) => Some(Shader::SolidColor((*color).into())),
            Self::Linear(g) => sk::LinearGradient::new(
                to_point(g.start),
                to_point(g.end),
                skia_stops(&g.stops),
                SpreadMode::Pad,
                Transform::identity(),
            ),
            Self::Radial(g) => sk::RadialGradient::new(
                to_point(g.center),
                to_point(g.center),
                g.radius as f32,
                skia_stops(&g.stops),
                SpreadMode::Pad,
                Transform::identity(),
            ),
        }
    }
}

fn skia_stops(stops: &[GradientStop]) -> Vec<sk::GradientStop> {
    stops
        .iter()
        .map(|s| sk::GradientStop::new(s.offset as f32, s.color.into()))
        .collect()
}
