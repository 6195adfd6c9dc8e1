//! Sampling helpers shared by cell spawning and recycling.

use glyphfall_core::SecondsRange;
use rand::Rng;
use rand::seq::IndexedRandom;

/// Pick a symbol uniformly from `chars`. An empty set yields a blank.
pub(crate) fn symbol<R: Rng>(chars: &[char], rng: &mut R) -> char {
    chars.choose(rng).copied().unwrap_or(' ')
}

/// Sample uniformly from the inclusive range.
pub(crate) fn seconds<R: Rng>(range: SecondsRange, rng: &mut R) -> f64 {
    if range.min >= range.max {
        return range.min;
    }
    rng.random_range(range.min..=range.max)
}

/// Sample uniformly from `[0, 1)`.
pub(crate) fn unit<R: Rng>(rng: &mut R) -> f64 {
    rng.random::<f64>()
}
