//! Shapes the renderers draw, stored as tiny-skia paths.

use std::f64::consts::{FRAC_PI_2, PI};

use glam::DVec2;
use tiny_skia::{PathBuilder, PathSegment, Point};

pub(crate) fn to_point(p: DVec2) -> Point {
    Point::from_xy(p.x as f32, p.y as f32)
}

fn from_point(p: Point) -> DVec2 {
    DVec2::new(p.x as f64, p.y as f64)
}

/// Appends a circular arc from angle `start` to `end` (radians, clockwise on
/// screen from the +x axis) as cubic Béziers of at most a quarter turn.
fn arc_to(pb: &mut PathBuilder, center: DVec2, radius: f64, start: f64, end: f64) {
    let sweep = end - start;
    if !sweep.is_finite() || sweep == 0.0 {
        return;
    }
    let pieces = (sweep.abs() / FRAC_PI_2).ceil().max(1.0) as usize;
    let step = sweep / pieces as f64;
    let k = 4.0 / 3.0 * (step / 4.0).tan();
    for i in 0..pieces {
        let a = DVec2::from_angle(start + step * i as f64);
        let b = DVec2::from_angle(start + step * (i + 1) as f64);
        let c1 = center + radius * (a + k * a.perp());
        let c2 = center + radius * (b - k * b.perp());
        let to = center + radius * b;
        pb.cubic_to(
            c1.x as f32, c1.y as f32, c2.x as f32, c2.y as f32, to.x as f32, to.y as f32,
        );
    }
}

/// An outline to fill or stroke. Degenerate input yields an empty path,
/// which draws nothing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    inner: Option<tiny_skia::Path>,
}

impl Path {
    fn build(f: impl FnOnce(&mut PathBuilder)) -> Self {
        let mut pb = PathBuilder::new();
        f(&mut pb);
        Self { inner: pb.finish() }
    }

    /// A closed circle.
    pub fn circle(center: DVec2, radius: f64) -> Self {
        Self {
            inner: PathBuilder::from_circle(center.x as f32, center.y as f32, radius as f32),
        }
    }

    /// A pie wedge from `start` to `end`.
    pub fn sector(center: DVec2, radius: f64, start: f64, end: f64) -> Self {
        Self::build(|pb| {
            let first = center + radius * DVec2::from_angle(start);
            pb.move_to(center.x as f32, center.y as f32);
            pb.line_to(first.x as f32, first.y as f32);
            arc_to(pb, center, radius, start, end);
            pb.close();
        })
    }

    /// A single open segment.
    pub fn line(from: DVec2, to: DVec2) -> Self {
        Self::build(|pb| {
            pb.move_to(from.x as f32, from.y as f32);
            pb.line_to(to.x as f32, to.y as f32);
        })
    }

    /// A closed polygon through `points`.
    pub fn polygon(points: impl IntoIterator<Item = DVec2>) -> Self {
        Self::build(|pb| {
            for (i, p) in points.into_iter().enumerate() {
                if i == 0 {
                    pb.move_to(p.x as f32, p.y as f32);
                } else {
                    pb.line_to(p.x as f32, p.y as f32);
                }
            }
            pb.close();
        })
    }

    /// Axis-aligned rectangle with rounded corners.
    pub fn rounded_rect(min: DVec2, size: DVec2, radius: f64) -> Self {
        let r = radius.min(0.5 * size.x.min(size.y)).max(0.0);
        let max = min + size;
        Self::build(|pb| {
            pb.move_to((min.x + r) as f32, min.y as f32);
            pb.line_to((max.x - r) as f32, min.y as f32);
            arc_to(pb, DVec2::new(max.x - r, min.y + r), r, -FRAC_PI_2, 0.0);
            pb.line_to(max.x as f32, (max.y - r) as f32);
            arc_to(pb, DVec2::new(max.x - r, max.y - r), r, 0.0, FRAC_PI_2);
            pb.line_to((min.x + r) as f32, max.y as f32);
            arc_to(pb, DVec2::new(min.x + r, max.y - r), r, FRAC_PI_2, PI);
            pb.line_to(min.x as f32, (min.y + r) as f32);
            arc_to(pb, DVec2::new(min.x + r, min.y + r), r, PI, PI + FRAC_PI_2);
            pb.close();
        })
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_none()
    }

    /// Whether the outline ends with a close.
    pub fn is_closed(&self) -> bool {
        self.inner
            .as_ref()
            .is_some_and(|p| p.segments().any(|s| s == PathSegment::Close))
    }

    /// Anchor and control points in drawing order.
    pub fn points(&self) -> Vec<DVec2> {
        self.inner
            .as_ref()
            .map(|p| p.points().iter().copied().map(from_point).collect())
            .unwrap_or_default()
    }

    /// Bounding box as `(min, max)`, or `None` for an empty path.
    pub fn bounds(&self) -> Option<(DVec2, DVec2)> {
        let b = self.inner.as_ref()?.bounds();
        Some((
            DVec2::new(b.left() as f64, b.top() as f64),
            DVec2::new(b.right() as f64, b.bottom() as f64),
        ))
    }

    pub(crate) fn as_skia(&self) -> Option<&tiny_skia::Path> {
        self.inner.as_ref()
    }
}
