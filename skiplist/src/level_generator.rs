use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// /////////////////////////////////////////////////////////////////////////////////////////////////
// Level Generator
// /////////////////////////////////////////////////////////////////////////////////////////////////

/// Upon the insertion of a new node in the list, the node is replicated to high levels with a
/// certain probability as determined by a `LevelGenerator`.
///
/// The `total()` reflects the total number of levels, and `random()` should produce an integer in
/// the range `[0, total)` with the desired probability distribution.  The skiplist adds one to
/// obtain the node height and may clip it further (a node never rises more than one level above
/// the levels already in use).
///
/// The most commonly used probability distribution is a geometrical distribution, whereby the
/// chance that a node occupies level `n` is `p` times as likely as occupying level `n-1`.
/// Typically, `p` is equal to 1/2, though over values can be used which will trade speed against
/// memory.
///
/// Custom generators are mostly useful in tests, where a fixed sequence of levels makes the
/// structure of the list predictable.
pub trait LevelGenerator {
    fn random(&mut self) -> usize;
    fn total(&self) -> usize;
}

/// A level generator which will produce geometrically distributed numbers by flipping a biased
/// coin until it fails.
pub struct GeometricalLevelGenerator {
    total: usize,
    p: f64,
    rng: StdRng,
}

impl GeometricalLevelGenerator {
    /// Create a new GeometricalLevelGenerator with `total` number of levels, and `p` as the
    /// probability that a given node is present in the next level.  The generator is seeded from
    /// the operating system.
    ///
    /// # Panics
    ///
    /// `p` must be between 0 and 1 and will panic otherwise.  Similarly, `total` must be at
    /// greater or equal to 1.
    pub fn new(total: usize, p: f64) -> Self {
        Self::with_rng(total, p, StdRng::from_entropy())
    }

    /// Same as `new`, but the coin flips are reproducible for a given `seed`.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::{GeometricalLevelGenerator, LevelGenerator};
    ///
    /// let mut a = GeometricalLevelGenerator::seeded(16, 0.5, 7);
    /// let mut b = GeometricalLevelGenerator::seeded(16, 0.5, 7);
    /// for _ in 0..100 {
    ///     assert_eq!(a.random(), b.random());
    /// }
    /// ```
    pub fn seeded(total: usize, p: f64, seed: u64) -> Self {
        Self::with_rng(total, p, StdRng::seed_from_u64(seed))
    }

    fn with_rng(total: usize, p: f64, rng: StdRng) -> Self {
        if total == 0 {
            panic!("total must be non-zero.");
        }
        if p <= 0.0 || p >= 1.0 {
            panic!("p must be in (0, 1).");
        }
        GeometricalLevelGenerator { total, p, rng }
    }
}

impl LevelGenerator for GeometricalLevelGenerator {
    fn random(&mut self) -> usize {
        let mut h = 0;
        while h + 1 < self.total && self.rng.gen_bool(self.p) {
            h += 1;
        }
        h
    }

    fn total(&self) -> usize {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::{GeometricalLevelGenerator, LevelGenerator};

    #[test]
    #[should_panic]
    fn invalid_total() {
        GeometricalLevelGenerator::new(0, 0.5);
    }

    #[test]
    #[should_panic]
    fn invalid_p_0() {
        GeometricalLevelGenerator::new(1, 0.0);
    }

    #[test]
    #[should_panic]
    fn invalid_p_1() {
        GeometricalLevelGenerator::new(1, 1.0);
    }

    #[test]
    fn new() {
        let mut lg = GeometricalLevelGenerator::new(10, 0.5);
        assert_eq!(lg.total(), 10);
        for _ in 0..100 {
            let l = lg.random();
            assert!(l < 10);
        }
    }

    #[test]
    fn roughly_geometric() {
        let mut lg = GeometricalLevelGenerator::seeded(32, 0.5, 42);
        let samples = 100_000;
        let mut counts = [0usize; 32];
        for _ in 0..samples {
            counts[lg.random()] += 1;
        }
        // Half of the nodes stay on the base level, a quarter reach the second one.
        assert!(counts[0] > samples * 45 / 100 && counts[0] < samples * 55 / 100);
        assert!(counts[1] > samples * 20 / 100 && counts[1] < samples * 30 / 100);
    }
}
