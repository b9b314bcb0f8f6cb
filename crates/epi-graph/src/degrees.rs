//! Per-node degree targets with a tunable heavy tail.
//!
//! If `U ~ Uniform(0, 1]` then `X = U^(-gamma) - 1` is power-law distributed
//! with a tail that gets heavier as `gamma` grows.  The sample is stretched
//! linearly so its mean maps to `mean_degree - min_degree`, shifted by
//! `min_degree`, and rounded stochastically: up with probability equal to the
//! fractional part, so the expected degree equals the fractional target.
//!
//! `gamma = 0` makes every `X` equal, giving a near-regular graph whose only
//! spread comes from the rounding.

use epi_core::SimRng;

/// Keeps the sample mean strictly positive when `gamma = 0`.
const VALUE_FLOOR: f64 = 1e-10;

/// Draw `n` integer degree targets with sample mean ≈ `mean_degree`.
///
/// Callers validate `min_degree <= mean_degree` and `gamma >= 0`.
pub fn power_law_degrees(
    n:           usize,
    min_degree:  u32,
    mean_degree: f64,
    gamma:       f64,
    rng:         &mut SimRng,
) -> Vec<u32> {
    if n == 0 {
        return Vec::new();
    }

    // 1 - U keeps the base in (0, 1] so the power never blows up.
    let values: Vec<f64> = (0..n)
        .map(|_| (1.0 - rng.uniform()).powf(-gamma) - 1.0 + VALUE_FLOOR)
        .collect();
    let value_mean = values.iter().sum::<f64>() / n as f64;

    let min = min_degree as f64;
    values
        .iter()
        .map(|&x| stochastic_round(min + x / value_mean * (mean_degree - min), rng))
        .collect()
}

/// Floor `x`, then add one with probability equal to the fractional part.
#[inline]
pub(crate) fn stochastic_round(x: f64, rng: &mut SimRng) -> u32 {
    let floor = x.floor();
    let round_up = rng.uniform() < x - floor;
    floor as u32 + round_up as u32
}
