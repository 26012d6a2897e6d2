//! Anchor lock: the guarded seam where a newly computed offset is committed.
//!
//! Everything downstream (loop folding, transform strings, the renderer)
//! only ever sees finite numbers once a value has passed through here.

/// Commit `target` if it is finite; otherwise keep `current`.
///
/// A non-finite `current` is first replaced by `0.0`, so the result is always
/// finite.
#[inline]
pub fn compute_anchor_lock(current: f64, target: f64) -> f64 {
    let current = if current.is_finite() {
        current
    } else {
        log::trace!("anchor lock: non-finite current {current} reset to 0");
        0.0
    };
    if target.is_finite() {
        target
    } else {
        log::trace!("anchor lock: rejected non-finite target {target}, holding {current}");
        current
    }
}
