//! Track geometry as measured by the host.
//!
//! A [`SnapModel`] is an immutable value: adapters build it from layout
//! measurements and the core only ever reads it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CarouselError;
use crate::looping::normalize_loop;

/// The single dimension along which the track translates.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    X,
    Y,
}

impl Axis {
    pub fn as_str(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Axis {
    type Err = CarouselError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            other => Err(CarouselError::UnknownAxis(other.to_string())),
        }
    }
}

/// Geometry of a slide track.
///
/// `snap_points` holds one offset (pixels along `axis`) per reachable resting
/// position. They are usually monotonic but neither sorting nor uniqueness is
/// required. `slide_sizes` has one extent per slide. Only `snap_points` is
/// consumed by the snap resolver today; the remaining fields are carried for
/// size-aware consumers and for loop normalization.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapModel {
    #[serde(default)]
    pub axis: Axis,
    #[serde(default)]
    pub slide_count: usize,
    #[serde(default)]
    pub snap_points: Vec<f64>,
    #[serde(default)]
    pub slide_sizes: Vec<f64>,
    #[serde(default)]
    pub viewport_size: f64,
    /// Whether the track wraps.
    #[serde(rename = "loop", default)]
    pub looped: bool,
}

impl SnapModel {
    /// Parse a host-measured model from JSON (camelCase keys).
    pub fn from_json(s: &str) -> Result<Self, CarouselError> {
        let model: SnapModel = serde_json::from_str(s)?;
        Ok(model)
    }

    /// Check the structural contract: one size per slide and finite geometry.
    pub fn validate(&self) -> Result<(), CarouselError> {
        if self.slide_sizes.len() != self.slide_count {
            return Err(CarouselError::SlideSizeMismatch {
                slide_count: self.slide_count,
                slide_sizes: self.slide_sizes.len(),
            });
        }
        if !self.viewport_size.is_finite() {
            return Err(CarouselError::NonFiniteGeometry {
                field: "viewportSize",
            });
        }
        if self.snap_points.iter().any(|p| !p.is_finite()) {
            return Err(CarouselError::NonFiniteGeometry {
                field: "snapPoints",
            });
        }
        if self.slide_sizes.iter().any(|s| !s.is_finite()) {
            return Err(CarouselError::NonFiniteGeometry {
                field: "slideSizes",
            });
        }
        Ok(())
    }

    /// Circumference of a looping track: the summed extent of every slide.
    /// Zero for an empty track, which makes loop normalization an identity.
    ///
    /// A looping session does not fold offsets into `[-band/2, band/2)`
    /// around zero. It folds them into the band centered on
    /// [`loop_pivot`](Self::loop_pivot), i.e.
    /// `[pivot - band/2, pivot + band/2)`. That is the frame the snap points
    /// live in, so a folded offset can be compared with them directly. A
    /// folded offset is the same position on the loop as the unfolded one,
    /// shifted by a whole number of bands.
    pub fn loop_band(&self) -> f64 {
        self.slide_sizes.iter().sum()
    }

    /// Midpoint of the snap point span; center of the loop frame described
    /// on [`loop_band`](Self::loop_band). `0.0` without snap points.
    pub fn loop_pivot(&self) -> f64 {
        let mut points = self.snap_points.iter().copied();
        let Some(first) = points.next() else {
            return 0.0;
        };
        let (lo, hi) = points.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        (lo + hi) / 2.0
    }

    /// Fold `offset` into the loop frame around [`loop_pivot`](Self::loop_pivot).
    /// Identity for non-looping tracks and for a zero band.
    pub fn fold_offset(&self, offset: f64) -> f64 {
        if !self.looped {
            return offset;
        }
        let pivot = self.loop_pivot();
        normalize_loop(offset - pivot, self.loop_band()) + pivot
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slide_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_parses_known_names_only() {
        assert_eq!("x".parse::<Axis>(), Ok(Axis::X));
        assert_eq!("y".parse::<Axis>(), Ok(Axis::Y));
        assert_eq!(
            "z".parse::<Axis>(),
            Err(CarouselError::UnknownAxis("z".into()))
        );
    }

    #[test]
    fn loads_camel_case_json() {
        let model = SnapModel::from_json(
            r#"{"axis":"y","slideCount":2,"snapPoints":[0,-300],
                "slideSizes":[300,300],"viewportSize":300,"loop":true}"#,
        )
        .expect("model json");
        assert_eq!(model.axis, Axis::Y);
        assert_eq!(model.snap_points, vec![0.0, -300.0]);
        assert!(model.looped);
        assert_eq!(model.loop_band(), 600.0);
        assert!(model.validate().is_ok());
    }

    #[test]
    fn validate_rejects_mismatched_sizes() {
        let model = SnapModel {
            slide_count: 3,
            slide_sizes: vec![100.0, 100.0],
            ..Default::default()
        };
        assert_eq!(
            model.validate(),
            Err(CarouselError::SlideSizeMismatch {
                slide_count: 3,
                slide_sizes: 2
            })
        );
    }

    #[test]
    fn fold_offset_uses_snap_aligned_frame() {
        let model = SnapModel {
            slide_count: 4,
            snap_points: vec![0.0, -100.0, -200.0, -300.0],
            slide_sizes: vec![100.0; 4],
            looped: true,
            ..Default::default()
        };
        assert_eq!(model.loop_pivot(), -150.0);
        // Frame is [-350, 50): every snap point folds onto itself.
        for &p in &model.snap_points {
            assert_eq!(model.fold_offset(p), p);
        }
        assert_eq!(model.fold_offset(100.0), -300.0);
        assert_eq!(model.fold_offset(-360.0), 40.0);

        let straight = SnapModel {
            looped: false,
            ..model
        };
        assert_eq!(straight.fold_offset(100.0), 100.0);
    }

    #[test]
    fn validate_rejects_non_finite_snap_points() {
        let model = SnapModel {
            snap_points: vec![0.0, f64::NAN],
            ..Default::default()
        };
        assert_eq!(
            model.validate(),
            Err(CarouselError::NonFiniteGeometry {
                field: "snapPoints"
            })
        );
    }
}
