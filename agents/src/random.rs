// ═══════════════════════════════════════════════════════════════════════
// Random Voter — accuses a uniformly random candidate it hasn't cleared.
// Models a table with no read on anyone; baseline for simulations.
// ═══════════════════════════════════════════════════════════════════════

use crate::agent::{fresh_candidates, Voter};
use imposter_engine::visibility::{Verdict, VotingView};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeSet;

pub struct RandomVoter {
    rng: ChaCha8Rng,
    cleared: BTreeSet<usize>,
}

impl RandomVoter {
    pub fn new(seed: u64) -> Self {
        RandomVoter {
            rng: ChaCha8Rng::seed_from_u64(seed),
            cleared: BTreeSet::new(),
        }
    }
}

impl Voter for RandomVoter {
    fn name(&self) -> &str { "Random" }

    fn choose(&mut self, view: &VotingView) -> Option<usize> {
        fresh_candidates(view, &self.cleared).choose(&mut self.rng).copied()
    }

    fn observe(&mut self, verdict: &Verdict) {
        if !verdict.correct {
            self.cleared.insert(verdict.accused);
        }
    }
}
