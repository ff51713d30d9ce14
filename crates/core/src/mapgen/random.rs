//! Uniform integer source used by the layout generator.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

pub trait RandomSource {
    /// Uniform value in `0..bound`. `bound` must be non-zero.
    fn below(&mut self, bound: usize) -> usize;
}

impl RandomSource for ChaCha8Rng {
    fn below(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0);
        let bound = bound as u64;
        // Largest value whose residues are evenly spread over `0..bound`.
        let limit = u64::MAX - (u64::MAX % bound + 1) % bound;
        loop {
            let value = self.next_u64();
            if value <= limit {
                return (value % bound) as usize;
            }
        }
    }
}
