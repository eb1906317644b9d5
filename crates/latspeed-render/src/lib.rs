//! Drawing the latitude speed animations.
//!
//! Renderers draw through the [`Canvas`] trait. [`RasterCanvas`] draws
//! into a tiny-skia pixmap that can be written as PNG; [`RecordingCanvas`] keeps
//! the draw calls for inspection. A [`Visualization`] binds one renderer and
//! one canvas to a tick source.

mod canvas;
mod color;
mod frame;
mod globe;
mod glyph;
mod paint;
mod path;
mod raster;
mod recording;
mod track;
mod visualization;

pub use canvas::{Canvas, Shadow};
pub use color::Color;
pub use frame::{RenderFrame, Renderer};
pub use globe::{GLOBE_SIZE, GlobeLayout, GlobeRenderer, MIN_RING_RADIUS, latitude_ring_radius};
pub use glyph::plane_glyph;
pub use paint::{GradientStop, LinearGradient, Paint, RadialGradient};
pub use path::Path;
pub use raster::RasterCanvas;
pub use recording::{DrawCommand, RecordingCanvas};
pub use track::{Lane, LinearTrackRenderer, TRACK_SIZE};
pub use visualization::Visualization;
