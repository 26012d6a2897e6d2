//! Carousel session: composes the per-frame functions into one interaction
//! pipeline.
//!
//! Flow per interaction:
//! - `begin_drag` records the anchor offset.
//! - `drag_by` accumulates pointer deltas and anchor-locks the raw offset.
//!   Drag frames are never folded, so the transform follows the pointer
//!   continuously. No transition while dragging.
//! - `end_drag` resolves the nearest snap point, commits it and returns a
//!   frame with the settle transition.
//! - `settle` runs after the transition ends (see
//!   [`TransitionObserver`](crate::observer::TransitionObserver)) and folds
//!   a looping track back into its snap frame without animation.
//!
//! Looping tracks compare offsets with snap points in the frame described on
//! [`SnapModel::loop_band`]: the release position is folded around
//! [`SnapModel::loop_pivot`] before resolving, and the committed target is the
//! copy of the snap point nearest to the current offset, so the settle
//! animation always takes the short way round.
//!
//! Pointer capture itself is the host's job; this type only sees numbers.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::anchor::compute_anchor_lock;
use crate::config::CarouselConfig;
use crate::error::CarouselError;
use crate::looping::normalize_loop;
use crate::model::SnapModel;
use crate::snap::resolve_snap_target;
use crate::style::{compute_transform, compute_transition};

/// Style strings to apply to the track element for one frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackStyle {
    pub transform: String,
    /// `None` means "no transition" (apply the transform immediately).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<String>,
}

#[derive(Clone, Copy, Debug)]
struct Drag {
    origin: f64,
    travelled: f64,
}

#[derive(Debug)]
pub struct Carousel {
    model: SnapModel,
    cfg: CarouselConfig,
    offset: f64,
    index: usize,
    drag: Option<Drag>,
}

impl Carousel {
    /// Start a session resting on the first snap point.
    pub fn new(model: SnapModel, cfg: CarouselConfig) -> Result<Self, CarouselError> {
        model.validate()?;
        cfg.validate()?;
        let offset = compute_anchor_lock(0.0, model.snap_points.first().copied().unwrap_or(0.0));
        Ok(Self {
            model,
            cfg,
            offset,
            index: 0,
            drag: None,
        })
    }

    pub fn model(&self) -> &SnapModel {
        &self.model
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.cfg
    }

    /// Committed track offset in pixels; always finite.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Index of the snap point the track rests on (or is settling toward).
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn begin_drag(&mut self) {
        self.drag = Some(Drag {
            origin: self.offset,
            travelled: 0.0,
        });
    }

    /// Move the track by a pointer delta. Starts a drag if none is active.
    pub fn drag_by(&mut self, delta: f64) -> TrackStyle {
        let origin = self.offset;
        let drag = self.drag.get_or_insert(Drag {
            origin,
            travelled: 0.0,
        });
        drag.travelled = compute_anchor_lock(drag.travelled, drag.travelled + delta);
        let raw = drag.origin + drag.travelled;
        self.offset = compute_anchor_lock(self.offset, raw);
        self.frame(None)
    }

    /// Release the track onto its nearest snap point.
    pub fn end_drag(&mut self) -> TrackStyle {
        let travelled = self.drag.take().map_or(0.0, |d| d.travelled);
        let index = if travelled.abs() < self.cfg.drag_threshold_px {
            self.index
        } else {
            let position = self.model.fold_offset(self.offset);
            resolve_snap_target(position, &self.model.snap_points)
        };
        self.commit(index)
    }

    /// Animate to a specific snap index. Out-of-range indices wrap on looping
    /// tracks and clamp otherwise.
    pub fn go_to(&mut self, index: usize) -> TrackStyle {
        self.drag = None;
        let len = self.model.snap_points.len();
        let index = match len {
            0 => 0,
            _ if self.model.looped => index % len,
            _ => index.min(len - 1),
        };
        self.commit(index)
    }

    pub fn next(&mut self) -> TrackStyle {
        self.go_to(self.index.saturating_add(1))
    }

    pub fn prev(&mut self) -> TrackStyle {
        let len = self.model.snap_points.len();
        let index = match self.index.checked_sub(1) {
            Some(i) => i,
            None if self.model.looped && len > 0 => len - 1,
            None => 0,
        };
        self.go_to(index)
    }

    /// Post-transition correction for looping tracks. Returns a
    /// transition-free frame only when the offset actually moved.
    ///
    /// The new offset lies in the snap-aligned frame around
    /// [`SnapModel::loop_pivot`] and differs from the old one by whole loop
    /// bands: same position on the loop, different transform. After a
    /// settled snap it equals the snap point itself.
    pub fn settle(&mut self) -> Option<TrackStyle> {
        if !self.model.looped || self.drag.is_some() {
            return None;
        }
        let folded = self.model.fold_offset(self.offset);
        if folded == self.offset {
            return None;
        }
        debug!("carousel: settle re-normalized {} -> {folded}", self.offset);
        self.offset = folded;
        Some(self.frame(None))
    }

    /// Current transform with no transition, e.g. for the first paint.
    pub fn style(&self) -> TrackStyle {
        self.frame(None)
    }

    fn commit(&mut self, index: usize) -> TrackStyle {
        let point = self.model.snap_points.get(index).copied().unwrap_or(0.0);
        let target = if self.model.looped {
            // Nearest copy of the snap point on the loop.
            self.offset + normalize_loop(point - self.offset, self.model.loop_band())
        } else {
            point
        };
        self.offset = compute_anchor_lock(self.offset, target);
        self.index = index;
        debug!("carousel: commit index {index} at offset {}", self.offset);
        let transition = compute_transition(self.cfg.duration_ms, &self.cfg.easing);
        self.frame(Some(transition))
    }

    fn frame(&self, transition: Option<String>) -> TrackStyle {
        TrackStyle {
            transform: compute_transform(self.offset, self.model.axis),
            transition,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Axis;

    fn model(looped: bool) -> SnapModel {
        SnapModel {
            axis: Axis::X,
            slide_count: 4,
            snap_points: vec![0.0, -100.0, -200.0, -300.0],
            slide_sizes: vec![100.0; 4],
            viewport_size: 100.0,
            looped,
        }
    }

    #[test]
    fn drag_then_release_snaps_to_nearest() {
        let mut c = Carousel::new(model(false), CarouselConfig::default()).unwrap();
        c.begin_drag();
        let frame = c.drag_by(-80.0);
        assert_eq!(frame.transform, "translate3d(-80px, 0, 0)");
        assert_eq!(frame.transition, None);
        let frame = c.end_drag();
        assert_eq!(c.index(), 1);
        assert_eq!(frame.transform, "translate3d(-100px, 0, 0)");
        assert_eq!(frame.transition.as_deref(), Some("transform 300ms ease-out"));
    }

    #[test]
    fn nan_delta_is_ignored() {
        let mut c = Carousel::new(model(false), CarouselConfig::default()).unwrap();
        c.drag_by(-30.0);
        c.drag_by(f64::NAN);
        assert_eq!(c.offset(), -30.0);
    }

    #[test]
    fn short_drag_stays_on_current_index() {
        let cfg = CarouselConfig {
            drag_threshold_px: 10.0,
            ..Default::default()
        };
        let mut c = Carousel::new(model(false), cfg).unwrap();
        c.go_to(2);
        c.drag_by(6.0);
        c.end_drag();
        assert_eq!(c.index(), 2);
        assert_eq!(c.offset(), -200.0);
    }

    #[test]
    fn go_to_clamps_or_wraps() {
        let mut c = Carousel::new(model(false), CarouselConfig::default()).unwrap();
        c.go_to(9);
        assert_eq!(c.index(), 3);
        let mut c = Carousel::new(model(true), CarouselConfig::default()).unwrap();
        c.go_to(9);
        assert_eq!(c.index(), 1);
        c.go_to(0);
        c.prev();
        assert_eq!(c.index(), 3);
    }

    #[test]
    fn settle_folds_loop_offset() {
        let mut c = Carousel::new(model(true), CarouselConfig::default()).unwrap();
        c.go_to(3);
        // Slide 3 is one step backwards around the loop.
        assert_eq!(c.offset(), 100.0);
        let frame = c.settle().expect("offset outside snap frame");
        assert_eq!(c.offset(), -300.0);
        assert_eq!(frame.transform, "translate3d(-300px, 0, 0)");
        assert_eq!(frame.transition, None);
        assert_eq!(c.settle(), None);
    }

    #[test]
    fn release_without_movement_after_settle_keeps_index() {
        let mut c = Carousel::new(model(true), CarouselConfig::default()).unwrap();
        c.go_to(3);
        c.settle();
        c.begin_drag();
        let frame = c.end_drag();
        assert_eq!(c.index(), 3);
        assert_eq!(c.offset(), -300.0);
        assert_eq!(frame.transform, "translate3d(-300px, 0, 0)");
    }

    #[test]
    fn small_drag_past_edge_keeps_nearest_slide() {
        let mut c = Carousel::new(model(true), CarouselConfig::default()).unwrap();
        c.go_to(2);
        assert_eq!(c.offset(), -200.0);
        c.begin_drag();
        let frame = c.drag_by(-10.0);
        assert_eq!(frame.transform, "translate3d(-210px, 0, 0)");
        c.end_drag();
        assert_eq!(c.index(), 2);
        assert_eq!(c.offset(), -200.0);

        let mut c = Carousel::new(model(true), CarouselConfig::default()).unwrap();
        c.drag_by(15.0);
        c.end_drag();
        assert_eq!(c.index(), 0);
        assert_eq!(c.offset(), 0.0);
    }

    #[test]
    fn drag_across_loop_seam_stays_continuous() {
        let mut c = Carousel::new(model(true), CarouselConfig::default()).unwrap();
        c.begin_drag();
        assert_eq!(c.drag_by(40.0).transform, "translate3d(40px, 0, 0)");
        assert_eq!(c.drag_by(20.0).transform, "translate3d(60px, 0, 0)");
        c.end_drag();
        // Past the first slide the last one is nearest on the loop.
        assert_eq!(c.index(), 3);
        assert_eq!(c.offset(), 100.0);
        c.settle();
        assert_eq!(c.offset(), -300.0);
    }

    #[test]
    fn next_from_last_wraps_forward() {
        let mut c = Carousel::new(model(true), CarouselConfig::default()).unwrap();
        c.go_to(3);
        c.settle();
        let frame = c.next();
        assert_eq!(c.index(), 0);
        assert_eq!(frame.transform, "translate3d(-400px, 0, 0)");
        c.settle();
        assert_eq!(c.offset(), 0.0);
    }

    #[test]
    fn empty_track_rests_at_zero() {
        let empty = SnapModel::default();
        let mut c = Carousel::new(empty, CarouselConfig::default()).unwrap();
        let frame = c.end_drag();
        assert_eq!(c.index(), 0);
        assert_eq!(frame.transform, "translate3d(0px, 0, 0)");
    }
}
