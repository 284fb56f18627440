//! Unit assignment and per-group unit selection.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::errors::UnitBenchError;
use crate::types::UnitLabel;

/// Assign `count` labels from `pool` round-robin, starting at index 0.
///
/// # Errors
/// Returns `InvalidConfiguration` when `count > 0` and `pool` is empty.
pub fn assign_units(count: usize, pool: &[UnitLabel]) -> Result<Vec<UnitLabel>, UnitBenchError> {
    if count == 0 {
        return Ok(Vec::new());
    }
    if pool.is_empty() {
        return Err(UnitBenchError::invalid(format!(
            "unit pool is empty but {count} unit annotations were requested"
        )));
    }
    Ok(pool.iter().cycle().take(count).cloned().collect())
}

/// Chooses the single unit shared by an addition or comparison group.
pub trait UnitPicker {
    /// # Errors
    /// Returns `InvalidConfiguration` when no unit can be chosen from `pool`.
    fn pick(&mut self, pool: &[UnitLabel]) -> Result<UnitLabel, UnitBenchError>;
}

/// Uniform random choice from the pool.
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    #[must_use]
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_os_rng() }
    }

    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl UnitPicker for RandomPicker {
    fn pick(&mut self, pool: &[UnitLabel]) -> Result<UnitLabel, UnitBenchError> {
        pool.choose(&mut self.rng)
            .cloned()
            .ok_or_else(|| UnitBenchError::invalid("cannot pick a unit from an empty pool"))
    }
}

/// Always returns the same caller-supplied unit, whatever the pool.
#[derive(Debug, Clone)]
pub struct FixedPicker(pub UnitLabel);

impl UnitPicker for FixedPicker {
    fn pick(&mut self, _pool: &[UnitLabel]) -> Result<UnitLabel, UnitBenchError> {
        Ok(self.0.clone())
    }
}
