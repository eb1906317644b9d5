use latspeed_config::ConfigError;
use latspeed_model::SpeedError;

use crate::output::OutputError;
use crate::platform::PlatformError;

/// Anything that stops the application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("no latitude given, pass --latitude <degrees>")]
    MissingLatitude,

    #[error(transparent)]
    Speed(#[from] SpeedError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error("failed to encode JSON report: {0}")]
    Json(#[from] serde_json::Error),
}
