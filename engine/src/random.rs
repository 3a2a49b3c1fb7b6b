// ═══════════════════════════════════════════════════════════════════════
// Randomness — injected so rounds can be replayed or scripted in tests
// ═══════════════════════════════════════════════════════════════════════

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The only source of non-determinism the engine consumes.
pub trait Randomness {
    /// Permute `order` uniformly at random.
    fn shuffle(&mut self, order: &mut [usize]);

    /// Uniform index in `0..len`. `len` is never zero.
    fn index(&mut self, len: usize) -> usize;
}

/// Adapts any `rand` generator.
#[derive(Debug, Clone)]
pub struct RandSource<R>(pub R);

impl RandSource<ChaCha8Rng> {
    /// Fresh, unseeded source: every game is dealt differently.
    pub fn from_entropy() -> Self {
        RandSource(ChaCha8Rng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        RandSource(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Randomness for RandSource<R> {
    fn shuffle(&mut self, order: &mut [usize]) {
        order.shuffle(&mut self.0);
    }

    fn index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

impl<T: Randomness + ?Sized> Randomness for &mut T {
    fn shuffle(&mut self, order: &mut [usize]) {
        (**self).shuffle(order)
    }

    fn index(&mut self, len: usize) -> usize {
        (**self).index(len)
    }
}
