//! Configuration sections with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the persisted configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Tick cadence and animation periods.
    pub animation: AnimationConfig,
    /// Globe view.
    pub globe: GlobeConfig,
    /// Linear track view.
    pub track: TrackConfig,
    /// Frame output.
    pub output: OutputConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Animation timing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    /// Ticks per second the animation is designed for.
    pub tick_rate_hz: f64,
    /// Seconds the equator marker takes to cross its track once.
    pub equator_period_secs: f64,
    /// Seconds per full globe revolution.
    pub rotation_period_secs: f64,
}

/// Globe view settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GlobeConfig {
    pub width: u32,
    pub height: u32,
    /// Number of meridian lines.
    pub meridians: usize,
    /// Number of background latitude rings.
    pub latitude_rings: usize,
    /// Sphere radius relative to half the shorter canvas side.
    pub radius_fraction: f64,
}

/// Track view settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrackConfig {
    pub width: u32,
    pub height: u32,
    /// Horizontal lane margin in pixels.
    pub padding: f64,
}

/// Where and how often frames are written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Total ticks to run.
    pub frames: u64,
    /// Write every n-th frame.
    pub every: u64,
    /// Sleep between ticks to match the tick rate.
    pub realtime: bool,
    /// Directory the PNG frames are written to.
    pub directory: PathBuf,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 60.0,
            equator_period_secs: 5.0,
            rotation_period_secs: 10.0,
        }
    }
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 300,
            meridians: 12,
            latitude_rings: 5,
            radius_fraction: 0.8,
        }
    }
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 140,
            padding: 24.0,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            frames: 300,
            every: 30,
            realtime: false,
            directory: default_output_dir(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// `latspeed/` under the user's picture directory, or `frames` relative to
/// the working directory when the platform has none.
pub fn default_output_dir() -> PathBuf {
    dirs::picture_dir()
        .map(|d| d.join("latspeed"))
        .unwrap_or_else(|| PathBuf::from("frames"))
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::WriteError {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::WriteError {
            path: config_path.clone(),
            source,
        })?;
        Ok(())
    }

    /// Rejects values the animation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let a = &self.animation;
        positive("animation.tick_rate_hz", a.tick_rate_hz)?;
        positive("animation.equator_period_secs", a.equator_period_secs)?;
        positive("animation.rotation_period_secs", a.rotation_period_secs)?;
        positive("globe.radius_fraction", self.globe.radius_fraction)?;
        if self.globe.width == 0 || self.globe.height == 0 {
            return Err(invalid("globe", "canvas size must be non-zero"));
        }
        if self.track.width == 0 || self.track.height == 0 {
            return Err(invalid("track", "canvas size must be non-zero"));
        }
        if self.output.every == 0 {
            return Err(invalid("output.every", "frame stride must be at least 1"));
        }
        Ok(())
    }

    fn read(config_path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(config_path).map_err(|source| ConfigError::ReadError {
                path: config_path.to_path_buf(),
                source,
            })?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be a positive number, got {value}")))
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(2))
                .unwrap();
        assert!(ron_str.contains("tick_rate_hz: 60.0"));
        assert!(ron_str.contains("meridians: 12"));
        assert!(ron_str.contains("log_level: \"info\""));
    }

    #[test]
    fn test_defaults_are_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(animation: (tick_rate_hz: 30.0), debug: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.animation.tick_rate_hz, 30.0);
        assert_eq!(config.animation.equator_period_secs, 5.0);
        assert_eq!(config.globe, GlobeConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.globe.meridians = 24;
        config.output.every = 5;
        config.output.directory = dir.path().join("frames");

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join("nested");
        let config = Config::load_or_create(&config_dir).unwrap();
        assert_eq!(config, Config::default());
        assert!(config_dir.join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_invalid_ron_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{{not valid}}").unwrap();
        let err = Config::load_or_create(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)), "got {err:?}");
    }

    #[test]
    fn test_validate_rejects_degenerate_timing() {
        let mut config = Config::default();
        config.animation.tick_rate_hz = 0.0;
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { field: "animation.tick_rate_hz", .. }),
            "got {err:?}"
        );

        let mut config = Config::default();
        config.output.every = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.animation.rotation_period_secs = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_ron_comments_accepted() {
        let ron_str = "// latspeed settings\n(\n  // nothing overridden\n)";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config, Config::default());
    }
}
