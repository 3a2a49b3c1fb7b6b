// ═══════════════════════════════════════════════════════════════════════
// Sequential Voter — accuses open candidates in roster order.
// Deterministic; the worst case is every crew member cleared first.
// ═══════════════════════════════════════════════════════════════════════

use crate::agent::{fresh_candidates, Voter};
use imposter_engine::visibility::{Verdict, VotingView};
use std::collections::BTreeSet;

#[derive(Debug, Default)]
pub struct SequentialVoter {
    cleared: BTreeSet<usize>,
}

impl Voter for SequentialVoter {
    fn name(&self) -> &str { "Sequential" }

    fn choose(&mut self, view: &VotingView) -> Option<usize> {
        fresh_candidates(view, &self.cleared).first().copied()
    }

    fn observe(&mut self, verdict: &Verdict) {
        if !verdict.correct {
            self.cleared.insert(verdict.accused);
        }
    }
}
