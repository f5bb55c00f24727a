//! Error types for curvature estimation.

use std::fmt;

use crate::interpolate::InterpolateError;

/// Result type for curvature operations.
pub type CurvatureResult<T> = Result<T, CurvatureError>;

/// Errors that can occur during curvature estimation.
///
/// All structural errors are raised before any fitting starts. Numeric
/// singularities (cusps, stationary points) are never errors; they surface
/// as non-finite values in the result instead.
#[derive(Debug, Clone)]
pub enum CurvatureError {
    /// Too few points for the spline degree used by the fit.
    InsufficientData { required: usize, actual: usize },

    /// The x and y coordinate sequences have different lengths.
    DimensionMismatch { x_len: usize, y_len: usize },

    /// Non-positive error tolerance, or a malformed weight vector.
    InvalidWeight { message: String },

    /// Error propagated from the underlying spline fit.
    Spline(InterpolateError),
}

impl fmt::Display for CurvatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientData { required, actual } => {
                write!(
                    f,
                    "Insufficient data for curvature estimation: need at least {} points, got {}",
                    required, actual
                )
            }
            Self::DimensionMismatch { x_len, y_len } => {
                write!(
                    f,
                    "Coordinate sequences must have equal lengths: x has {}, y has {}",
                    x_len, y_len
                )
            }
            Self::InvalidWeight { message } => {
                write!(f, "Invalid weight: {}", message)
            }
            Self::Spline(err) => {
                write!(f, "Spline fit failed: {}", err)
            }
        }
    }
}

impl std::error::Error for CurvatureError {}

impl From<InterpolateError> for CurvatureError {
    fn from(err: InterpolateError) -> Self {
        Self::Spline(err)
    }
}
