//! The aircraft marker glyph.

use glam::DVec2;

use crate::path::Path;

/// Upper half of the silhouette, nose at `+x`, overall length 2.
const OUTLINE: [(f64, f64); 10] = [
    (1.00, 0.00),
    (0.70, 0.10),
    (0.20, 0.12),
    (-0.10, 0.80),
    (-0.30, 0.80),
    (-0.15, 0.12),
    (-0.65, 0.10),
    (-0.85, 0.40),
    (-1.00, 0.40),
    (-0.90, 0.00),
];

/// Closed aircraft outline of length `size` centered on `center`, nose
/// pointing along `heading` (radians, clockwise on screen from `+x`).
pub fn plane_glyph(center: DVec2, heading: f64, size: f64) -> Path {
    let scale = size * 0.5;
    let rotation = DVec2::from_angle(heading);
    let upper = OUTLINE.iter().map(|&(x, y)| DVec2::new(x, y));
    // Mirror the interior points; the nose and tail already sit on the axis.
    let lower = OUTLINE[1..OUTLINE.len() - 1]
        .iter()
        .rev()
        .map(|&(x, y)| DVec2::new(x, -y));
    Path::polygon(
        upper
            .chain(lower)
            .map(|p| center + rotation.rotate(p * scale)),
    )
}
