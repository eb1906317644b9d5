//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Animate how fast an aircraft sweeps across longitude at a given latitude.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "latspeed", about = "Angular speed of flight along a circle of latitude")]
pub struct CliArgs {
    /// Latitude in degrees, -90 to 90 (south is negative).
    #[arg(long, allow_negative_numbers = true)]
    pub latitude: Option<f64>,

    /// Number of ticks to run.
    #[arg(long)]
    pub frames: Option<u64>,

    /// Write every n-th frame as PNG.
    #[arg(long)]
    pub every: Option<u64>,

    /// Pace ticks against the wall clock instead of running flat out.
    #[arg(long)]
    pub realtime: bool,

    /// Directory for rendered frames.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Tick rate in Hz.
    #[arg(long)]
    pub tick_rate: Option<f64>,

    /// Print the result as JSON instead of the text report.
    #[arg(long)]
    pub json: bool,

    /// Only print the result; render no frames.
    #[arg(long)]
    pub no_render: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(frames) = args.frames {
            self.output.frames = frames;
        }
        if let Some(every) = args.every {
            self.output.every = every;
        }
        if args.realtime {
            self.output.realtime = true;
        }
        if let Some(ref dir) = args.output {
            self.output.directory = dir.clone();
        }
        if let Some(rate) = args.tick_rate {
            self.animation.tick_rate_hz = rate;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
