use std::ops::RangeInclusive;

const KELVIN_OFFSET: f64 = 273.15;

/// Readings outside this range (°C) are treated as bogus provider data.
pub const PLAUSIBLE_CELSIUS: RangeInclusive<i64> = -150..=150;

/// Whole degrees Celsius, or `None` for non-finite or implausible readings.
///
/// Rounds half away from zero, applied to the `f64` difference rather than the
/// decimal one: `273.65 K` gives exactly `0.5` and rounds to `1`, while
/// `250.65 K` gives `-22.49999999999997` and rounds to `-22`.
pub fn kelvin_to_celsius(kelvin: f64) -> Option<i64> {
    if !kelvin.is_finite() {
        return None;
    }
    let rounded = (kelvin - KELVIN_OFFSET).round();
    if rounded < *PLAUSIBLE_CELSIUS.start() as f64 || rounded > *PLAUSIBLE_CELSIUS.end() as f64 {
        return None;
    }
    Some(rounded as i64)
}

/// Text the watch displays, e.g. `22°C`.
pub fn format_celsius(celsius: i64) -> String {
    format!("{celsius}\u{B0}C")
}
