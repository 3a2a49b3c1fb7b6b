// ═══════════════════════════════════════════════════════════════════════
// Voter Trait — interface for automated tables
//
// KEY DESIGN PRINCIPLE:
//   Voters receive a `VotingView` (not raw GameState), which only
//   contains what the table can see on the shared screen: who has been
//   confirmed, who was just cleared, how many imposters remain.
//
//   A voter never gets to see the unfound imposters or the secret word.
// ═══════════════════════════════════════════════════════════════════════

use crate::random::RandomVoter;
use crate::sequential::SequentialVoter;
use imposter_engine::visibility::{Verdict, VotingView};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Decides whom the table accuses next.
pub trait Voter: Send {
    /// Human-readable name for this voter (e.g., "Random").
    fn name(&self) -> &str;

    /// Roster index to accuse. `None` if no candidate can be voted for.
    fn choose(&mut self, view: &VotingView) -> Option<usize>;

    /// Called with the verdict on every accusation that didn't end the round.
    fn observe(&mut self, _verdict: &Verdict) {}
}

/// Votable candidates the table hasn't already seen cleared this round.
pub fn fresh_candidates(view: &VotingView, cleared: &BTreeSet<usize>) -> Vec<usize> {
    view.candidates
        .iter()
        .filter(|c| c.can_vote && !cleared.contains(&c.index))
        .map(|c| c.index)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoterKind {
    Random,
    Sequential,
}

impl std::fmt::Display for VoterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoterKind::Random => write!(f, "random"),
            VoterKind::Sequential => write!(f, "sequential"),
        }
    }
}

impl FromStr for VoterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(VoterKind::Random),
            "sequential" => Ok(VoterKind::Sequential),
            other => Err(format!("unknown voter {:?} (expected random or sequential)", other)),
        }
    }
}

pub fn make_voter(kind: VoterKind, seed: u64) -> Box<dyn Voter> {
    match kind {
        VoterKind::Random => Box::new(RandomVoter::new(seed)),
        VoterKind::Sequential => Box::new(SequentialVoter::default()),
    }
}
