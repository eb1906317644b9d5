//! Driving both visualizations and collecting their frames.

use std::path::PathBuf;

use latspeed_clock::{ClockSettings, PacedTicks};
use latspeed_config::Config;
use latspeed_model::SpeedResult;
use latspeed_render::{GlobeRenderer, LinearTrackRenderer, RasterCanvas, Visualization};
use tracing::{info, warn};

use crate::output::{FrameSink, OutputError};

/// What a frame run produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub ticks: u64,
    pub globe_frames: Vec<PathBuf>,
    pub track_frames: Vec<PathBuf>,
}

fn canvas(view: &'static str, width: u32, height: u32) -> Result<RasterCanvas, OutputError> {
    RasterCanvas::new(width, height).ok_or(OutputError::CanvasSize {
        view,
        width,
        height,
    })
}

/// Timing settings for the clocks, taken from the config.
pub fn clock_settings(config: &Config) -> ClockSettings {
    ClockSettings {
        tick_rate_hz: config.animation.tick_rate_hz,
        equator_period_secs: config.animation.equator_period_secs,
        rotation_period_secs: config.animation.rotation_period_secs,
    }
}

/// Mounts the globe and track views for `result`, runs
/// `config.output.frames` ticks and writes every `config.output.every`-th
/// frame of each view as PNG.
///
/// Both views are disposed before returning, also when a write failed.
pub fn render_frames(result: &SpeedResult, config: &Config) -> Result<RunSummary, OutputError> {
    let out = &config.output;
    let globe_sink = FrameSink::new(&out.directory, "globe", out.every)?;
    let track_sink = FrameSink::new(&out.directory, "track", out.every)?;

    let globe_canvas = canvas("globe", config.globe.width, config.globe.height)?;
    let track_canvas = canvas("track", config.track.width, config.track.height)?;

    let settings = clock_settings(config);
    let mut ticks = PacedTicks::new(settings.tick_rate_hz, out.realtime);

    let g = &config.globe;
    let globe = Visualization::mount(
        &mut ticks,
        *result,
        &settings,
        GlobeRenderer::new(g.meridians, g.latitude_rings, g.radius_fraction),
        globe_canvas,
        globe_sink.presenter(),
    );
    let t = &config.track;
    let track = Visualization::mount(
        &mut ticks,
        *result,
        &settings,
        LinearTrackRenderer::new(t.padding),
        track_canvas,
        track_sink.presenter(),
    );

    info!(
        frames = out.frames,
        every = out.every,
        realtime = out.realtime,
        dir = %out.directory.display(),
        "rendering"
    );
    for _ in 0..out.frames {
        ticks.tick();
        if globe_sink.failed() || track_sink.failed() {
            warn!(tick = ticks.frame_count(), "stopping after write failure");
            break;
        }
    }

    globe.dispose(&mut ticks);
    track.dispose(&mut ticks);

    let summary = RunSummary {
        ticks: ticks.frame_count(),
        globe_frames: globe_sink.finish()?,
        track_frames: track_sink.finish()?,
    };
    info!(
        ticks = summary.ticks,
        written = summary.globe_frames.len() + summary.track_frames.len(),
        "rendering finished"
    );
    Ok(summary)
}
