//! Numeric conversions at the configuration boundary.
//!
//! Counts and percentages arrive as signed integers from the CLI and TOML and
//! are checked here before the generator sees them.

use crate::errors::UnitBenchError;

#[inline]
#[must_use]
pub fn i64_to_usize(v: i64) -> Option<usize> {
    usize::try_from(v).ok()
}

/// Convert a non-negative count, naming the knob in the error.
///
/// # Errors
/// `InvalidConfiguration` when `v` is negative or does not fit in `usize`.
pub fn count_from_i64(knob: &str, v: i64) -> Result<usize, UnitBenchError> {
    i64_to_usize(v).ok_or_else(|| UnitBenchError::invalid(format!("{knob} must be >= 0, got {v}")))
}

/// Convert a whole percentage in `0..=100` into a `0.0..=1.0` fraction.
///
/// # Errors
/// `InvalidConfiguration` when `pct` is outside `0..=100`.
pub fn percent_to_fraction(knob: &str, pct: i64) -> Result<f64, UnitBenchError> {
    if !(0..=100).contains(&pct) {
        return Err(UnitBenchError::invalid(format!("{knob} must be within 0..=100, got {pct}")));
    }
    Ok(pct as f64 / 100.0)
}

/// Integer mean truncated toward zero. Returns 0 for an empty sample.
#[inline]
#[must_use]
pub fn truncated_mean(sum: u64, n: u32) -> u64 {
    if n == 0 { 0 } else { sum / u64::from(n) }
}
