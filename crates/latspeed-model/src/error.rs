//! Errors produced by the angular speed model.

/// Reasons a latitude cannot be turned into a [`SpeedResult`](crate::SpeedResult).
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum SpeedError {
    /// The latitude is not finite or lies outside `[-90, 90]` degrees.
    #[error("latitude {latitude_deg} is outside [-90, 90] degrees")]
    Domain {
        /// The rejected input.
        latitude_deg: f64,
    },

    /// The latitude sits on a pole, where a degree of longitude has zero
    /// length and the angular speed is undefined.
    #[error("angular speed is undefined at latitude {latitude_deg} (a degree of longitude has zero length)")]
    DivisionSingularity {
        /// The polar latitude, `90` or `-90`.
        latitude_deg: f64,
    },
}
