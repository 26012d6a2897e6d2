//! Errors surfaced at parse/validation boundaries.
//!
//! Per-frame math never produces these; see the crate docs.

use thiserror::Error;

/// Errors produced while loading or validating carousel geometry and config.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CarouselError {
    #[error("unknown axis '{0}' (expected 'x' or 'y')")]
    UnknownAxis(String),
    #[error("slide_sizes has {slide_sizes} entries but slide_count is {slide_count}")]
    SlideSizeMismatch {
        slide_count: usize,
        slide_sizes: usize,
    },
    #[error("non-finite value in measured geometry field '{field}'")]
    NonFiniteGeometry { field: &'static str },
    #[error("transition duration must be finite and non-negative, got {0}")]
    InvalidDuration(f64),
    #[error("transition easing must not be empty")]
    EmptyEasing,
    #[error("json parse error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for CarouselError {
    fn from(err: serde_json::Error) -> Self {
        CarouselError::Json(err.to_string())
    }
}
