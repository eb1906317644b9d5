//! Configuration for the latitude speed visualizer.
//!
//! Settings persist to disk as a RON file and can be overridden from the
//! command line. Every section is `#[serde(default)]`, so files written by
//! older or newer versions still load.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    AnimationConfig, CONFIG_FILE_NAME, Config, DebugConfig, GlobeConfig, OutputConfig, TrackConfig,
    default_output_dir,
};
pub use error::ConfigError;
