//! Utility functions for visualization: number formatting and colors.

use plotters::style::RGBColor;

use super::types::Rgb8;

/// Format a number the way a JavaScript template literal would print it:
/// no trailing `.0` on integers, `NaN`, `Infinity`.
pub fn js_number(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if v == 0.0 {
        // also folds -0
        "0".to_string()
    } else {
        format!("{v}")
    }
}

/// Fixed-point formatting with `digits` decimals, ties rounded away from zero.
/// Negative zero prints unsigned; a negative value that rounds to zero keeps its sign.
pub fn to_fixed(v: f64, digits: usize) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return js_number(v);
    }
    if v == 0.0 {
        return format!("{:.digits$}", 0.0);
    }
    let scale = 10f64.powi(digits as i32);
    let rounded = (v.abs() * scale).round() / scale * v.signum();
    format!("{rounded:.digits$}")
}

/// Text of a value label on a bar, e.g. `78.9%`.
pub fn value_label(v: f64) -> String {
    format!("{}%", js_number(v))
}

/// Text of a divergence label: one decimal, `+` only when strictly positive.
pub fn format_divergence(d: f64) -> String {
    let sign = if d > 0.0 { "+" } else { "" };
    format!("{sign}{}%", to_fixed(d, 1))
}

#[inline]
pub fn rgb_color(c: Rgb8) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}
