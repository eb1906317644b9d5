//! Command-line front end: computes the angular speed for one latitude,
//! prints the report and renders both animations to PNG frames.

mod error;
pub mod output;
pub mod platform;
pub mod report;
pub mod run;

pub use error::AppError;

use std::path::{Path, PathBuf};

use latspeed_config::{CONFIG_FILE_NAME, CliArgs, Config};
use latspeed_model::{PerceivedSpeedEstimate, compute};
use tracing::{debug, info};

use crate::platform::PlatformDirs;
use crate::report::{JsonReport, Report, track_caption};

/// Directories and config the app starts with.
#[derive(Debug)]
pub struct Startup {
    pub dirs: PlatformDirs,
    pub config: Config,
    /// Whether the config file was written with defaults on this start.
    pub created_config: bool,
}

impl Startup {
    pub fn config_file(&self) -> PathBuf {
        self.dirs.config_dir.join(CONFIG_FILE_NAME)
    }

    /// Reports where the config came from and where the log goes. Called
    /// once the subscriber is installed, since loading the config precedes it.
    pub fn log_paths(&self, log_file: Option<&Path>) {
        let config_file = self.config_file();
        if self.created_config {
            info!(path = %config_file.display(), "created default config");
        } else {
            info!(path = %config_file.display(), "loaded config");
        }
        match log_file {
            Some(path) => info!(path = %path.display(), "writing JSON log"),
            None => debug!("no log file"),
        }
    }
}

/// Loads the config from `dirs` and applies CLI overrides.
pub fn load_config_from(dirs: PlatformDirs, args: &CliArgs) -> Result<Startup, AppError> {
    dirs.create_dirs()?;
    let created_config = !dirs.config_dir.join(CONFIG_FILE_NAME).exists();
    let mut config = Config::load_or_create(&dirs.config_dir)?;
    config.apply_cli_overrides(args);
    config.validate()?;
    Ok(Startup {
        dirs,
        config,
        created_config,
    })
}

/// Resolves the platform directories, then loads the config.
pub fn load_config(args: &CliArgs) -> Result<Startup, AppError> {
    let dirs = PlatformDirs::resolve()?.with_config_dir(args.config.as_deref());
    load_config_from(dirs, args)
}

/// Runs the application with an already loaded config.
pub fn run(args: &CliArgs, config: &Config) -> Result<(), AppError> {
    let latitude = args.latitude.ok_or(AppError::MissingLatitude)?;
    let result = compute(latitude)?;
    let perceived = PerceivedSpeedEstimate::estimate(latitude)?;
    info!(%result, "speed computed");

    if args.json {
        println!("{}", JsonReport::new(&result, Some(&perceived)).to_json()?);
    } else {
        print!(
            "{}",
            Report {
                result: &result,
                perceived: Some(&perceived),
            }
        );
    }

    if args.no_render {
        return Ok(());
    }

    let summary = run::render_frames(&result, config)?;
    if !args.json {
        println!();
        println!("{}", track_caption(&result));
        println!(
            "Wrote {} globe and {} track frames to {}",
            summary.globe_frames.len(),
            summary.track_frames.len(),
            config.output.directory.display()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use latspeed_model::SpeedError;

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn captured_logs(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        captured.text()
    }

    #[test]
    fn test_load_config_creates_then_loads() {
        let dir = tempfile::tempdir().unwrap();
        let dirs = PlatformDirs::resolve_with_root(dir.path());
        let args = CliArgs {
            frames: Some(12),
            ..Default::default()
        };

        let first = load_config_from(dirs.clone(), &args).unwrap();
        assert!(first.created_config);
        assert!(first.config_file().is_file());
        assert_eq!(first.config.output.frames, 12);

        let second = load_config_from(dirs, &CliArgs::default()).unwrap();
        assert!(!second.created_config);
        assert_eq!(second.config.output.frames, Config::default().output.frames);
    }

    #[test]
    fn test_startup_paths_are_logged() {
        let dir = tempfile::tempdir().unwrap();
        let startup =
            load_config_from(PlatformDirs::resolve_with_root(dir.path()), &CliArgs::default())
                .unwrap();
        let log_file = startup.dirs.log_dir.join("latspeed.log");

        let text = captured_logs(|| startup.log_paths(Some(&log_file)));
        assert!(text.contains("created default config"), "{text}");
        assert!(text.contains(&startup.config_file().display().to_string()), "{text}");
        assert!(text.contains("writing JSON log"), "{text}");
        assert!(text.contains(&log_file.display().to_string()), "{text}");

        let text = captured_logs(|| startup.log_paths(None));
        assert!(text.contains("no log file"), "{text}");
    }

    fn args(latitude: Option<f64>) -> CliArgs {
        CliArgs {
            latitude,
            no_render: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_latitude() {
        let err = run(&args(None), &Config::default()).unwrap_err();
        assert!(matches!(err, AppError::MissingLatitude));
    }

    #[test]
    fn test_pole_is_reported() {
        let err = run(&args(Some(-90.0)), &Config::default()).unwrap_err();
        assert!(
            matches!(err, AppError::Speed(SpeedError::DivisionSingularity { .. })),
            "got {err:?}"
        );
    }

    #[test]
    fn test_out_of_range_is_reported() {
        let err = run(&args(Some(91.0)), &Config::default()).unwrap_err();
        assert!(matches!(err, AppError::Speed(SpeedError::Domain { .. })));
    }

    #[test]
    fn test_report_only_run() {
        run(&args(Some(51.5)), &Config::default()).unwrap();
    }

    #[test]
    fn test_full_run_writes_frames() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.output.directory = dir.path().to_path_buf();
        config.output.frames = 4;
        config.output.every = 2;
        config.globe.width = 40;
        config.globe.height = 30;
        config.track.width = 40;
        config.track.height = 14;
        config.track.padding = 4.0;
        let args = CliArgs {
            latitude: Some(30.0),
            ..Default::default()
        };
        run(&args, &config).unwrap();
        assert!(dir.path().join("globe_00004.png").is_file());
        assert!(dir.path().join("track_00002.png").is_file());
    }
}
