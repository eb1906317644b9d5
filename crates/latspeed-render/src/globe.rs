//! Globe view: the Earth seen from above a pole.
//!
//! In this projection a circle of latitude is a ring whose radius is the
//! sphere radius times `cos(latitude)`. Both markers sweep the same angle per
//! tick; the latitude marker covers less ground because its ring is smaller,
//! which is exactly why its angular speed per mile is higher.

use std::f64::consts::{FRAC_PI_2, TAU};

use glam::DVec2;
use tracing::trace;

use crate::canvas::{Canvas, Shadow};
use crate::color::Color;
use crate::frame::{RenderFrame, Renderer};
use crate::glyph::plane_glyph;
use crate::paint::{GradientStop, Paint};
use crate::path::Path;

/// Reference canvas size of the globe view.
pub const GLOBE_SIZE: (u32, u32) = (400, 300);

/// Rings smaller than this (in pixels) are not drawn.
pub const MIN_RING_RADIUS: f64 = 0.5;

const BACKGROUND: Color = Color::rgb(15, 23, 42);
const SPHERE_GLOW: Color = Color::rgba(59, 130, 246, 140);
const GRID: Color = Color::rgb(226, 232, 240);
const GRID_ALPHA: f64 = 0.35;
const EQUATOR_COLOR: Color = Color::rgb(251, 191, 36);
const LATITUDE_COLOR: Color = Color::rgb(74, 222, 128);
const HIGHLIGHT_WIDTH: f64 = 2.5;
const TRAIL_WIDTH: f64 = 2.0;
const MARKER_SIZE: f64 = 18.0;

/// Where the sphere sits on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobeLayout {
    pub center: DVec2,
    pub radius: f64,
}

/// Radius of the ring drawn for a latitude, never negative.
pub fn latitude_ring_radius(sphere_radius: f64, lat_rad: f64) -> f64 {
    (sphere_radius * lat_rad.cos()).max(0.0)
}

/// Renders the rotating globe.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobeRenderer {
    /// Number of meridians in the longitude grid.
    pub meridians: usize,
    /// Number of background latitude rings between equator and pole.
    pub latitude_rings: usize,
    /// Sphere radius as a fraction of half the shorter canvas side.
    pub radius_fraction: f64,
}

impl Default for GlobeRenderer {
    fn default() -> Self {
        Self {
            meridians: 12,
            latitude_rings: 5,
            radius_fraction: 0.8,
        }
    }
}

impl GlobeRenderer {
    pub fn new(meridians: usize, latitude_rings: usize, radius_fraction: f64) -> Self {
        Self {
            meridians,
            latitude_rings,
            radius_fraction: radius_fraction.clamp(0.05, 1.0),
        }
    }

    /// Sphere placement for a canvas of the given size.
    pub fn layout(&self, (width, height): (u32, u32)) -> GlobeLayout {
        let center = DVec2::new(width as f64 * 0.5, height as f64 * 0.5);
        let radius = 0.5 * width.min(height) as f64 * self.radius_fraction;
        GlobeLayout { center, radius }
    }

    /// Latitudes of the background rings in radians, equator side first.
    pub fn grid_latitudes(&self) -> Vec<f64> {
        let n = self.latitude_rings;
        (1..=n)
            .map(|i| FRAC_PI_2 * i as f64 / (n + 1) as f64)
            .collect()
    }

    /// Positions of the equator and latitude markers for `frame`.
    pub fn marker_positions(&self, layout: &GlobeLayout, frame: &RenderFrame<'_>) -> [DVec2; 2] {
        let direction = DVec2::from_angle(frame.state.rotation_angle);
        let lat_radius = latitude_ring_radius(layout.radius, frame.result.latitude_rad_abs());
        [
            layout.center + direction * layout.radius,
            layout.center + direction * lat_radius,
        ]
    }

    fn draw_sphere(&self, canvas: &mut dyn Canvas, layout: &GlobeLayout) {
        let GlobeLayout { center, radius } = *layout;
        let paint = Paint::radial(
            center - DVec2::splat(radius * 0.35),
            radius * 1.45,
            vec![
                GradientStop::new(0.0, Color::rgb(147, 197, 253)),
                GradientStop::new(0.45, Color::rgb(37, 99, 235)),
                GradientStop::new(1.0, Color::rgb(23, 37, 84)),
            ],
        );
        canvas.set_shadow(Some(Shadow::glow(SPHERE_GLOW, radius * 0.12)));
        canvas.fill_circle(center, radius, &paint);
        canvas.set_shadow(None);
    }

    fn draw_grid(&self, canvas: &mut dyn Canvas, layout: &GlobeLayout, rotation: f64) {
        let grid: Paint = GRID.into();
        for lat in self.grid_latitudes() {
            // Fade rings out as they shrink towards the pole.
            canvas.set_global_alpha(GRID_ALPHA * lat.cos());
            canvas.stroke_circle(layout.center, latitude_ring_radius(layout.radius, lat), &grid, 1.0);
        }

        canvas.set_global_alpha(GRID_ALPHA);
        for i in 0..self.meridians {
            let angle = rotation + TAU * i as f64 / self.meridians as f64;
            let rim = layout.center + DVec2::from_angle(angle) * layout.radius;
            canvas.stroke_path(&Path::line(layout.center, rim), &grid, 1.0);
        }
        canvas.set_global_alpha(1.0);
    }

    fn draw_ring(canvas: &mut dyn Canvas, center: DVec2, radius: f64, color: Color) {
        canvas.set_shadow(Some(Shadow::glow(color.with_alpha(0.6), 4.0)));
        canvas.stroke_circle(center, radius, &color.into(), HIGHLIGHT_WIDTH);
        canvas.set_shadow(None);
    }

    fn draw_marker(
        canvas: &mut dyn Canvas,
        layout: &GlobeLayout,
        position: DVec2,
        rotation: f64,
        color: Color,
    ) {
        if position.distance(layout.center) >= MIN_RING_RADIUS {
            let trail = Paint::linear(
                position,
                layout.center,
                color.with_alpha(0.8),
                color.with_alpha(0.0),
            );
            canvas.stroke_path(&Path::line(position, layout.center), &trail, TRAIL_WIDTH);
        }

        let glyph = plane_glyph(position, rotation + FRAC_PI_2, MARKER_SIZE);
        canvas.set_shadow(Some(Shadow::glow(color.with_alpha(0.8), 3.0)));
        canvas.fill_path(&glyph, &color.into());
        canvas.set_shadow(None);
        canvas.stroke_path(&glyph, &Color::WHITE.into(), 1.0);
    }
}

impl Renderer for GlobeRenderer {
    fn name(&self) -> &'static str {
        "globe"
    }

    fn preferred_size(&self) -> (u32, u32) {
        GLOBE_SIZE
    }

    fn render(&self, frame: &RenderFrame<'_>, canvas: &mut dyn Canvas) {
        let layout = self.layout(canvas.size());
        let rotation = frame.state.rotation_angle;

        canvas.set_global_alpha(1.0);
        canvas.set_shadow(None);
        canvas.clear(BACKGROUND);

        self.draw_sphere(canvas, &layout);
        self.draw_grid(canvas, &layout, rotation);

        Self::draw_ring(canvas, layout.center, layout.radius, EQUATOR_COLOR);
        let lat_radius = latitude_ring_radius(layout.radius, frame.result.latitude_rad_abs());
        if lat_radius >= MIN_RING_RADIUS {
            Self::draw_ring(canvas, layout.center, lat_radius, LATITUDE_COLOR);
        } else {
            trace!(lat_radius, "latitude ring too small to draw");
        }

        let [equator, latitude] = self.marker_positions(&layout, frame);
        Self::draw_marker(canvas, &layout, equator, rotation, EQUATOR_COLOR);
        Self::draw_marker(canvas, &layout, latitude, rotation, LATITUDE_COLOR);
    }
}
