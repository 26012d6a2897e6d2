//! Transform/transition expression encoders.
//!
//! The renderer applies these strings verbatim as style values, so their
//! textual shape is exact:
//! - `translate3d(<n>px, 0, 0)` / `translate3d(0, <n>px, 0)`
//! - `transform <n>ms <easing>`
//!
//! Numbers are printed the way the rendering layer's own number-to-string
//! conversion would print them (see [`format_number`]).

use crate::model::Axis;

/// CSS-style transform expression translating the track along `axis`.
///
/// No rounding or sanitization: pass an offset that already went through
/// [`compute_anchor_lock`](crate::anchor::compute_anchor_lock).
pub fn compute_transform(offset_px: f64, axis: Axis) -> String {
    let n = format_number(offset_px);
    match axis {
        Axis::X => format!("translate3d({n}px, 0, 0)"),
        Axis::Y => format!("translate3d(0, {n}px, 0)"),
    }
}

/// Transition expression animating the `transform` property.
///
/// `easing` is passed through untouched and `duration_ms` is not range
/// checked; a negative duration yields an expression the renderer will
/// ignore. Hosts that need a guard validate through
/// [`CarouselConfig::validate`](crate::config::CarouselConfig::validate).
pub fn compute_transition(duration_ms: f64, easing: &str) -> String {
    format!("transform {}ms {easing}", format_number(duration_ms))
}

/// Shortest round-trip text for `value`, matching ECMAScript `Number#toString`:
/// integral values have no fractional part, `-0` prints as `0`, non-finite
/// values print as `NaN`/`Infinity`/`-Infinity`, and magnitudes outside
/// `[1e-6, 1e21)` use exponent form with an explicit sign (`1e+21`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{value}");
    }
    let text = format!("{value:e}");
    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => text,
    }
}
