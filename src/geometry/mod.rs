//! Pure chart geometry
//!
//! Same numeric input, same output. Nothing here allocates state, logs or
//! fails: degenerate input (empty datasets, zero radius, zero width) produces
//! empty or placeholder geometry, never NaN or an invalid path string.

pub mod bar;
pub mod pie;
pub mod ticks;

pub use bar::{
    axis_max, bar_geometry, BarGeometry, BarLayout, BarMode, BarRect, HitArea,
    GROUP_PADDING_RATIO,
};
pub use pie::{pie_geometry, DoughnutHole, PieGeometry, PieLayout, PieSlice, FULL_CIRCLE_SWEEP};
pub use ticks::axis_ticks;

/// Clamp a value to a finite, non-negative number
pub(crate) fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Denominator guard: a zero or non-finite denominator becomes 1
pub(crate) fn safe_denominator(value: f64) -> f64 {
    if value.is_finite() && value != 0.0 {
        value
    } else {
        1.0
    }
}

/// Fixed three-decimal formatting for path coordinates
pub(crate) fn fmt_coord(value: f64) -> String {
    let formatted = format!("{value:.3}");
    if formatted == "-0.000" {
        "0.000".to_string()
    } else {
        formatted
    }
}
