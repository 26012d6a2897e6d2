//! Loop-offset normalization for wrapping tracks.
//!
//! A looping track treats its offset as a position on a circle whose
//! circumference is the loop band. Offsets are folded back into the centered
//! interval `[-band/2, band/2)` so long drags across many wraps never drift.

/// Fold `offset` into `[-snap_spacing/2, snap_spacing/2)`.
///
/// - `snap_spacing == 0` returns `offset` unchanged (no band to wrap into).
/// - Otherwise uses floored modulo, then re-centers around zero.
///
/// NaN/Infinity are not sanitized here; pass offsets through
/// [`compute_anchor_lock`](crate::anchor::compute_anchor_lock) first.
#[inline]
pub fn normalize_loop(offset: f64, snap_spacing: f64) -> f64 {
    if snap_spacing == 0.0 {
        return offset;
    }
    let band = snap_spacing;
    let wrapped = ((offset % band) + band) % band;
    if wrapped >= band / 2.0 {
        let centered = wrapped - band;
        log::trace!("normalize_loop: {offset} wrapped to {centered} (band {band})");
        centered
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_into_centered_band() {
        assert_eq!(normalize_loop(150.0, 100.0), -50.0);
        assert_eq!(normalize_loop(-160.0, 100.0), 40.0);
        assert_eq!(normalize_loop(49.0, 100.0), 49.0);
        assert_eq!(normalize_loop(-50.0, 100.0), -50.0);
    }

    #[test]
    fn zero_spacing_is_identity() {
        assert_eq!(normalize_loop(10.0, 0.0), 10.0);
        assert_eq!(normalize_loop(-1234.5, 0.0), -1234.5);
    }

    #[test]
    fn many_wraps_stay_in_band() {
        let out = normalize_loop(100_025.0, 100.0);
        assert_eq!(out, 25.0);
        let out = normalize_loop(-100_075.0, 100.0);
        assert_eq!(out, 25.0);
    }
}
