// ═══════════════════════════════════════════════════════════════════════
// Round Runner — plays one complete headless round with a voter
// ═══════════════════════════════════════════════════════════════════════

use imposter_agents::Voter;
use imposter_engine::engine;
use imposter_engine::visibility::voting_view;
use imposter_engine::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Table setup shared by every simulated round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    pub players: usize,
    pub imposters: usize,
    pub category: Category,
    pub words: WordBank,
    /// Safety limit to prevent runaway voting loops.
    pub max_votes: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            players: 6,
            imposters: 1,
            category: Category::default(),
            words: WordBank::default(),
            max_votes: 100,
        }
    }
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("round refused: {0}")]
    Guard(#[from] GuardViolation),

    #[error("{requested} imposters requested but {players} players allow at most {allowed}")]
    ImposterCount { requested: usize, allowed: usize, players: usize },

    #[error("voter {voter} had no candidate to accuse")]
    NoCandidate { voter: String },

    #[error("round exceeded {0} votes without finding every imposter")]
    TooManyVotes(u32),
}

/// Result of a completed round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundReport {
    pub seed: u64,
    pub secret_word: String,
    pub imposters: Vec<usize>,
    pub votes_cast: u32,
    pub wrong_votes: u32,
}

/// Set up a table, deal a round from `seed` and vote until every imposter
/// is found.
pub fn run_round(config: &SimConfig, voter: &mut dyn Voter, seed: u64) -> Result<RoundReport, SimulationError> {
    let mut state = GameState::with_words(config.words.clone());
    for i in 0..config.players {
        engine::add_player(&mut state, &format!("Player {}", i + 1))?;
    }
    engine::set_category(&mut state, config.category)?;
    let allowed = engine::set_imposter_count(&mut state, config.imposters)?;
    if allowed != config.imposters {
        return Err(SimulationError::ImposterCount {
            requested: config.imposters,
            allowed,
            players: config.players,
        });
    }

    engine::start_game(&mut state, &mut RandSource::seeded(seed))?;
    while state.phase_kind() == PhaseKind::Reveal {
        engine::toggle_role_visibility(&mut state)?;
        engine::advance_reveal(&mut state)?;
    }
    engine::start_voting(&mut state)?;

    let mut wrong_votes = 0;
    loop {
        let Some(view) = voting_view(&state) else { break };
        if view.votes_cast >= config.max_votes {
            return Err(SimulationError::TooManyVotes(config.max_votes));
        }
        let target = voter.choose(&view).ok_or_else(|| SimulationError::NoCandidate {
            voter: voter.name().to_string(),
        })?;
        let outcome = engine::vote_player(&mut state, target)?;
        if !outcome.correct {
            wrong_votes += 1;
        }
        if outcome.round_over {
            break;
        }
        if let Some(verdict) = voting_view(&state).and_then(|v| v.pending) {
            voter.observe(&verdict);
        }
        engine::next_vote(&mut state)?;
    }

    let round = state.round().cloned().ok_or(GuardViolation::InvalidPhase {
        intent: "report",
        phase: state.phase_kind(),
    })?;
    let votes_cast = state.phase.votes().map_or(0, |v| v.votes_cast);
    debug!(seed, votes_cast, wrong_votes, "round finished");

    Ok(RoundReport {
        seed,
        secret_word: round.secret_word,
        imposters: round.imposters,
        votes_cast,
        wrong_votes,
    })
}
