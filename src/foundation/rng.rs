//! Explicit randomness.
//!
//! Nothing in respin reaches for a process-wide generator: every operation that
//! draws random parameters takes `&mut impl Rng`. ChaCha20 is used for seeded
//! runs because its stream is stable across platforms and `rand` releases.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Generator type handed out by [`seeded_rng`] and [`entropy_rng`].
pub type VariationRng = ChaCha20Rng;

/// Deterministic generator for reproducible batches and tests.
pub fn seeded_rng(seed: u64) -> VariationRng {
    ChaCha20Rng::seed_from_u64(seed)
}

/// Generator seeded from the operating system.
pub fn entropy_rng() -> VariationRng {
    ChaCha20Rng::from_os_rng()
}

/// One sample from `N(0, sigma^2)` via the Box-Muller transform.
pub fn gaussian<R: Rng + ?Sized>(rng: &mut R, sigma: f64) -> f64 {
    if sigma <= 0.0 {
        return 0.0;
    }
    // u1 in (0, 1] keeps ln() finite.
    let u1 = 1.0 - rng.random::<f64>();
    let u2 = rng.random::<f64>();
    let mag = (-2.0 * u1.ln()).sqrt();
    sigma * mag * (std::f64::consts::TAU * u2).cos()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/rng.rs"]
mod tests;
