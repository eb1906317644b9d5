//! [`Canvas`] implementation on a tiny-skia pixmap.
//!
//! Strokes are turned into outlines and filled, so fills and strokes share
//! one shadow path. A shadow is the shape's coverage mask, blurred with
//! `image::imageops::blur`, tinted and composited under the shape.

use std::collections::HashSet;

use image::{GrayImage, ImageResult, RgbaImage};
use tiny_skia::{FillRule, IntSize, Mask, Pixmap, PixmapPaint, Stroke, Transform};

use crate::canvas::{Canvas, Shadow};
use crate::color::Color;
use crate::paint::Paint;
use crate::path::Path;

/// Gaussian blur of a coverage mask. `blur` follows the canvas shadow-blur
/// convention, which is twice the standard deviation.
fn blur_mask(mask: &Mask, blur: f64) -> Option<Mask> {
    let coverage = GrayImage::from_raw(mask.width(), mask.height(), mask.data().to_vec())?;
    let blurred = image::imageops::blur(&coverage, (blur * 0.5) as f32);
    Mask::from_vec(blurred.into_raw(), IntSize::from_wh(mask.width(), mask.height())?)
}

/// An in-memory raster surface.
pub struct RasterCanvas {
    pixmap: Pixmap,
    global_alpha: f64,
    shadow: Option<Shadow>,
}

impl RasterCanvas {
    /// Creates a fully transparent canvas. Returns `None` when a side is
    /// zero or the pixel buffer would not fit in memory.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self {
            pixmap: Pixmap::new(width, height)?,
            global_alpha: 1.0,
            shadow: None,
        })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Color of one pixel, transparent outside the canvas.
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        self.pixmap
            .pixel(x, y)
            .map(|p| p.demultiply().into())
            .unwrap_or(Color::TRANSPARENT)
    }

    /// Count the number of unique colors (ignoring alpha) in the image.
    pub fn unique_color_count(&self) -> usize {
        let mut colors = HashSet::new();
        for p in self.pixmap.pixels() {
            let c = p.demultiply();
            colors.insert((c.red(), c.green(), c.blue()));
        }
        colors.len()
    }

    /// Non-premultiplied copy of the pixels.
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.pixmap.width(), self.pixmap.height(), |x, y| {
            let c = self.get_pixel(x, y);
            image::Rgba([c.r, c.g, c.b, c.a])
        })
    }

    /// Writes the canvas as a PNG file.
    pub fn save_png(&self, path: impl AsRef<std::path::Path>) -> ImageResult<()> {
        self.to_image().save_with_format(path, image::ImageFormat::Png)
    }

    fn active_shadow(&self) -> Option<Shadow> {
        self.shadow.filter(|s| s.color.a > 0)
    }

    /// Fills `area` with `paint`, shadow first.
    fn draw(&mut self, area: &tiny_skia::Path, paint: &Paint) {
        let Some(mut shader) = paint.to_shader() else {
            return;
        };
        if let Some(shadow) = self.active_shadow() {
            self.draw_shadow(area, shadow);
        }
        shader.apply_opacity(self.global_alpha as f32);
        let paint = tiny_skia::Paint {
            shader,
            anti_alias: true,
            ..Default::default()
        };
        self.pixmap
            .fill_path(area, &paint, FillRule::Winding, Transform::identity(), None);
    }

    fn draw_shadow(&mut self, area: &tiny_skia::Path, shadow: Shadow) {
        // A Gaussian with sigma = blur / 2 is negligible past 1.5 blur radii.
        let spread = (shadow.blur.max(0.0) * 1.5).ceil() + 1.0;
        let b = area.bounds();
        let x0 = (b.left() as f64 + shadow.offset.x - spread).floor().max(0.0);
        let y0 = (b.top() as f64 + shadow.offset.y - spread).floor().max(0.0);
        let x1 = (b.right() as f64 + shadow.offset.x + spread)
            .ceil()
            .min(self.pixmap.width() as f64);
        let y1 = (b.bottom() as f64 + shadow.offset.y + spread)
            .ceil()
            .min(self.pixmap.height() as f64);
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        let (w, h) = ((x1 - x0) as u32, (y1 - y0) as u32);
        let (Some(mut mask), Some(mut layer)) = (Mask::new(w, h), Pixmap::new(w, h)) else {
            return;
        };

        let to_layer =
            Transform::from_translate((shadow.offset.x - x0) as f32, (shadow.offset.y - y0) as f32);
        mask.fill_path(area, FillRule::Winding, true, to_layer);
        if shadow.blur > 0.0
            && let Some(blurred) = blur_mask(&mask, shadow.blur)
        {
            mask = blurred;
        }
        layer.fill(shadow.color.into());
        layer.apply_mask(&mask);

        let paint = PixmapPaint {
            opacity: self.global_alpha as f32,
            ..Default::default()
        };
        self.pixmap.draw_pixmap(
            x0 as i32,
            y0 as i32,
            layer.as_ref(),
            &paint,
            Transform::identity(),
            None,
        );
    }
}

impl Canvas for RasterCanvas {
    fn size(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    fn clear(&mut self, color: Color) {
        self.pixmap.fill(color.into());
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        if let Some(area) = path.as_skia() {
            self.draw(area, paint);
        }
    }

    fn stroke_path(&mut self, path: &Path, paint: &Paint, width: f64) {
        if width <= 0.0 {
            return;
        }
        let stroke = Stroke {
            width: width as f32,
            ..Default::default()
        };
        if let Some(outline) = path.as_skia().and_then(|p| p.stroke(&stroke, 1.0)) {
            self.draw(&outline, paint);
        }
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.global_alpha = if alpha.is_finite() {
            alpha.clamp(0.0, 1.0)
        } else {
            1.0
        };
    }

    fn global_alpha(&self) -> f64 {
        self.global_alpha
    }

    fn set_shadow(&mut self, shadow: Option<Shadow>) {
        self.shadow = shadow;
    }
}
