//! Human-friendly rendering of picosecond counts.

const UNITS: &[(i64, &str)] = &[
    (1_000_000_000_000, "s"),
    (1_000_000_000, "ms"),
    (1_000_000, "us"),
    (1_000, "ns"),
];

/// Render a duration in the largest unit keeping three significant digits.
pub fn dur_ps(ps: i64) -> String {
    let magnitude = ps.unsigned_abs();
    for &(scale, unit) in UNITS {
        if magnitude >= scale as u64 {
            return format!("{:.3} {}", ps as f64 / scale as f64, unit);
        }
    }
    format!("{ps} ps")
}
