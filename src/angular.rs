/// Round to a fixed number of decimals, so that a value stored in a result
/// object formats identically no matter how many times it is re-rendered.
pub fn to_fixed(value: f64, decimals: u32) -> f64 {
    let power = 10_f64.powi(decimals as i32);
    (value * power).round() / power
}

/// Narrow a value to at most `digits` integer digits, rounding ties to even
/// on each decimal right-shift. Used when an MGRS sub-square value is
/// rendered at a coarser precision than it carries.
pub fn truncate_digits(value: f64, digits: u32) -> f64 {
    let top = 10_f64.powi(digits as i32) - 1.0;
    let mut value = value;
    while value > top {
        value = (value / 10.0).round_ties_even();
    }
    value
}

/// Normalize an arbitrary bearing to [0°, 360°)
pub fn normalize_bearing(degrees: f64) -> f64 {
    let bearing = degrees % 360.0;
    if bearing < 0.0 {
        return bearing + 360.0;
    }
    bearing
}

// ----- T E S T S ---------------------------------------------------------------------
