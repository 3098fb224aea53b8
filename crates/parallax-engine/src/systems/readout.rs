//! Distance readout formatting.

use crate::core::scale::ScaleFactor;

/// Real-world distance covered by `offset_x` pixels of scroll, rounded to a
/// whole unit. Negative or non-finite offsets read as zero.
pub fn distance_units(offset_x: f64, scale: ScaleFactor) -> u64 {
    let units = scale.to_units(offset_x);
    if !units.is_finite() || units <= 0.0 {
        return 0;
    }
    // Saturating cast; readouts beyond u64 are not meaningful anyway.
    units.round() as u64
}

/// Group digits in threes from the right with commas: `1234567` → `"1,234,567"`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Formatted distance for a scroll offset, e.g. `"36,000,000"`.
pub fn distance_readout(offset_x: f64, scale: ScaleFactor) -> String {
    group_thousands(distance_units(offset_x, scale))
}

/// Full readout line shown in the HUD.
pub fn readout_line(origin_name: &str, readout: &str, unit: &str) -> String {
    format!("Distance from {origin_name}: {readout} {unit}")
}
