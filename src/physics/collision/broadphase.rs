//! Broad phase collision detection algorithms
//! are responsible for detecting pairs of possibly intersecting objects
//! for further, more accurate narrow phase inspection.

use itertools::Itertools;

/// A broad phase algorithm.
pub trait BroadPhase {
    /// Returns pairs `[i, j]` of potentially intersecting slots, with `i < j`,
    /// out of `count` objects occupying slots `0..count`.
    fn pairs(count: u32) -> impl Iterator<Item = [u32; 2]>;
}

/// The simplest possible broad phase algorithm,
/// which pairs every object with every other object.
/// Very inefficient, but can work for small systems.
///
/// Pairs are produced in lexicographic order, so that the result of a physics step
/// doesn't depend on anything but the order objects were created in.
pub struct BruteForce;

impl BroadPhase for BruteForce {
    fn pairs(count: u32) -> impl Iterator<Item = [u32; 2]> {
        (0..count).tuple_combinations().map(|(i, j)| [i, j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brute_force_pairs() {
        itertools::assert_equal(
            BruteForce::pairs(4),
            [[0, 1], [0, 2], [0, 3], [1, 2], [1, 3], [2, 3]],
        );
        assert_eq!(BruteForce::pairs(1).count(), 0);
        assert_eq!(BruteForce::pairs(0).count(), 0);
        assert_eq!(BruteForce::pairs(10).count(), 45);
    }
}
