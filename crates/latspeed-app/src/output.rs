//! Writing rendered frames to disk as PNG.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use latspeed_render::{RasterCanvas, RenderFrame};
use tracing::{debug, error};

/// Errors raised while writing frames.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write frame {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("cannot allocate a {width}x{height} {view} canvas")]
    CanvasSize {
        view: &'static str,
        width: u32,
        height: u32,
    },
}

/// File name of the frame rendered on `tick`, e.g. `globe_00030.png`.
pub fn frame_file_name(prefix: &str, tick: u64) -> String {
    format!("{prefix}_{tick:05}.png")
}

#[derive(Default)]
struct SinkState {
    written: Vec<PathBuf>,
    error: Option<OutputError>,
}

/// Collects every `every`-th frame of one visualization into a directory.
///
/// The presenter handed to the visualization cannot return errors, so the
/// first failure is stored and all later frames are skipped.
#[derive(Clone)]
pub struct FrameSink {
    directory: PathBuf,
    prefix: &'static str,
    every: u64,
    state: Rc<RefCell<SinkState>>,
}

impl FrameSink {
    /// Creates `directory` if needed.
    pub fn new(directory: &Path, prefix: &'static str, every: u64) -> Result<Self, OutputError> {
        std::fs::create_dir_all(directory).map_err(|source| OutputError::CreateDir {
            path: directory.to_path_buf(),
            source,
        })?;
        Ok(Self {
            directory: directory.to_path_buf(),
            prefix,
            every: every.max(1),
            state: Rc::default(),
        })
    }

    /// Whether the frame of `tick` is written.
    pub fn wants(&self, tick: u64) -> bool {
        tick % self.every == 0
    }

    /// Callback for [`Visualization::mount`](latspeed_render::Visualization::mount).
    pub fn presenter(&self) -> impl FnMut(&RenderFrame<'_>, &RasterCanvas) + 'static {
        let sink = self.clone();
        move |frame: &RenderFrame<'_>, canvas: &RasterCanvas| sink.present(frame.tick, canvas)
    }

    fn present(&self, tick: u64, canvas: &RasterCanvas) {
        if !self.wants(tick) || self.failed() {
            return;
        }
        let path = self.directory.join(frame_file_name(self.prefix, tick));
        let mut state = self.state.borrow_mut();
        match canvas.save_png(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "frame written");
                state.written.push(path);
            }
            Err(source) => {
                error!(path = %path.display(), %source, "frame write failed");
                state.error = Some(OutputError::Encode { path, source });
            }
        }
    }

    /// Returns `true` once a write has failed.
    pub fn failed(&self) -> bool {
        self.state.borrow().error.is_some()
    }

    /// Number of frames written so far.
    pub fn written_count(&self) -> usize {
        self.state.borrow().written.len()
    }

    /// Paths written, or the first error.
    pub fn finish(self) -> Result<Vec<PathBuf>, OutputError> {
        let state = self.state.take();
        match state.error {
            Some(err) => Err(err),
            None => Ok(state.written),
        }
    }
}
