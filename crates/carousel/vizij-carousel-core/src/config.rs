//! Session configuration for [`Carousel`](crate::carousel::Carousel).

use serde::{Deserialize, Serialize};

use crate::error::CarouselError;

/// Motion settings applied when the track settles onto a snap point.
/// Every field has a default so hosts can pass partial JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Settle transition length in milliseconds.
    pub duration_ms: f64,
    /// Easing curve, passed to the renderer verbatim.
    pub easing: String,
    /// Minimum absolute drag distance (px) before a release counts as a drag
    /// rather than a tap. Shorter drags snap back to the current index.
    pub drag_threshold_px: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            duration_ms: 300.0,
            easing: "ease-out".to_string(),
            drag_threshold_px: 0.0,
        }
    }
}

impl CarouselConfig {
    pub fn from_json(s: &str) -> Result<Self, CarouselError> {
        let cfg: CarouselConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Host-side guard for the values `compute_transition` passes through
    /// unchecked.
    pub fn validate(&self) -> Result<(), CarouselError> {
        if !self.duration_ms.is_finite() || self.duration_ms < 0.0 {
            return Err(CarouselError::InvalidDuration(self.duration_ms));
        }
        if self.easing.trim().is_empty() {
            return Err(CarouselError::EmptyEasing);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = CarouselConfig::from_json(r#"{"duration_ms": 450}"#).expect("config");
        assert_eq!(cfg.duration_ms, 450.0);
        assert_eq!(cfg.easing, "ease-out");
        assert_eq!(cfg.drag_threshold_px, 0.0);
    }

    #[test]
    fn rejects_negative_duration() {
        let err = CarouselConfig::from_json(r#"{"duration_ms": -5}"#).unwrap_err();
        assert_eq!(err, CarouselError::InvalidDuration(-5.0));
    }

    #[test]
    fn rejects_blank_easing() {
        let cfg = CarouselConfig {
            easing: "  ".into(),
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(CarouselError::EmptyEasing));
    }
}
