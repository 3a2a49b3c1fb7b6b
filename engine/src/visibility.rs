// ═══════════════════════════════════════════════════════════════════════
// Visibility / derived view data
//
// The table shares one screen, so what it shows depends on the phase:
//   SETUP      — roster, imposter count, category, why start is blocked
//   REVEAL     — the current viewer's name; their role only once they
//                choose to show it (the secret word never appears for an
//                imposter)
//   DISCUSSION — category only
//   VOTING     — who is confirmed, who was just accused and whether that
//                was right; never the unfound imposters
//   RESULT     — everything: imposters and the secret word
//
// Views are recomputed from GameState on demand and never stored.
// Automated voters receive a VotingView, never the raw GameState.
// ═══════════════════════════════════════════════════════════════════════

use crate::engine::{check, Intent};
use crate::types::*;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TableView {
    pub phase: PhaseKind,
    pub category: Category,
    pub category_label: &'static str,
    pub players: Vec<String>,
    pub screen: Screen,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "screen", rename_all = "lowercase")]
pub enum Screen {
    Setup(SetupView),
    Reveal(RevealView),
    Discussion,
    Voting(VotingView),
    Result(ResultView),
}

#[derive(Debug, Clone, Serialize)]
pub struct SetupView {
    pub imposter_count: usize,
    pub max_imposters: usize,
    pub can_add_player: bool,
    /// Why the round can't start yet, if it can't.
    pub start_blocker: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Role {
    Imposter,
    Crew { secret_word: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct RevealView {
    pub viewer: usize,
    pub viewer_name: String,
    pub is_last: bool,
    /// `None` while the role is hidden.
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateStatus {
    Open,
    /// Accused in the pending vote, and not an imposter.
    Cleared,
    /// A found imposter.
    Confirmed,
}

#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    pub index: usize,
    pub name: String,
    pub status: CandidateStatus,
    pub can_vote: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Verdict {
    pub accused: usize,
    pub name: String,
    pub correct: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct VotingView {
    pub candidates: Vec<Candidate>,
    pub pending: Option<Verdict>,
    pub found: usize,
    pub total: usize,
    pub votes_cast: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultView {
    /// In draw order.
    pub imposters: Vec<String>,
    pub secret_word: String,
    pub votes_cast: u32,
}

/// Build the shared-screen view for the current phase.
pub fn table_view(state: &GameState) -> TableView {
    let category = state.round().map_or(state.config.category, |r| r.category);
    let screen = match &state.phase {
        Phase::Setup => Screen::Setup(setup_view(state)),
        Phase::Reveal { round, progress } => Screen::Reveal(RevealView {
            viewer: progress.index,
            viewer_name: name_of(state, progress.index),
            is_last: progress.index + 1 >= state.roster.len(),
            role: progress.role_visible.then(|| role_of(round, progress.index)),
        }),
        Phase::Discussion { .. } => Screen::Discussion,
        Phase::Voting { round, votes } => Screen::Voting(build_voting_view(state, round, votes)),
        Phase::Result { round, votes } => Screen::Result(ResultView {
            imposters: round.imposters.iter().map(|&i| name_of(state, i)).collect(),
            secret_word: round.secret_word.clone(),
            votes_cast: votes.votes_cast,
        }),
    };
    TableView {
        phase: state.phase_kind(),
        category,
        category_label: category.label(),
        players: state.roster.iter().map(|p| p.name.clone()).collect(),
        screen,
    }
}

fn setup_view(state: &GameState) -> SetupView {
    SetupView {
        imposter_count: state.config.imposter_count,
        max_imposters: max_imposters(state.roster.len()),
        can_add_player: state.roster.len() < MAX_PLAYERS,
        start_blocker: check(state, &Intent::StartGame).err().map(|e| e.to_string()),
    }
}

fn role_of(round: &RoundAssignment, player: usize) -> Role {
    if round.is_imposter(player) {
        Role::Imposter
    } else {
        Role::Crew { secret_word: round.secret_word.clone() }
    }
}

fn name_of(state: &GameState, index: usize) -> String {
    state.player_name(index).unwrap_or_default().to_string()
}

fn build_voting_view(state: &GameState, round: &RoundAssignment, votes: &VoteState) -> VotingView {
    let candidates = (0..state.roster.len())
        .map(|index| {
            let status = if votes.revealed.contains(&index) {
                CandidateStatus::Confirmed
            } else if votes.accused == Some(index) {
                CandidateStatus::Cleared
            } else {
                CandidateStatus::Open
            };
            Candidate {
                index,
                name: name_of(state, index),
                status,
                can_vote: check(state, &Intent::Vote(index)).is_ok(),
            }
        })
        .collect();
    VotingView {
        candidates,
        pending: votes.accused.map(|accused| Verdict {
            accused,
            name: name_of(state, accused),
            correct: round.is_imposter(accused),
        }),
        found: votes.revealed.len(),
        total: round.imposters.len(),
        votes_cast: votes.votes_cast,
    }
}

// ── Single derived values ──────────────────────────────────────────────

/// Voting screen, if the table is voting.
pub fn voting_view(state: &GameState) -> Option<VotingView> {
    match &state.phase {
        Phase::Voting { round, votes } => Some(build_voting_view(state, round, votes)),
        _ => None,
    }
}

/// Label of the category in play (or selected, during setup).
pub fn category_label(state: &GameState) -> &'static str {
    state.round().map_or(state.config.category, |r| r.category).label()
}

/// Whether the player currently looking at their role is an imposter.
pub fn current_viewer_is_imposter(state: &GameState) -> Option<bool> {
    match &state.phase {
        Phase::Reveal { round, progress } => Some(round.is_imposter(progress.index)),
        _ => None,
    }
}

/// Whether the pending accusation hit an imposter.
pub fn pending_vote_correct(state: &GameState) -> Option<bool> {
    match &state.phase {
        Phase::Voting { round, votes } => votes.accused.map(|a| round.is_imposter(a)),
        _ => None,
    }
}
