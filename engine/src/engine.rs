// ═══════════════════════════════════════════════════════════════════════
// Game Engine — intent handlers and phase transitions
//
// Architecture:
//   The engine is a pure state machine. It never does I/O and never
//   reaches for a global RNG. A presentation layer turns user input into
//   an `Intent`, asks `check()` whether it is legal (to grey out controls)
//   and feeds it to `apply_intent()`.
//
// Flow:
//   setup → reveal → discussion → voting → result → setup
//   voting loops vote → next_vote → vote … until every imposter is found.
//
// Every guard runs before any mutation: a rejected intent leaves the
// state untouched and reports why.
// ═══════════════════════════════════════════════════════════════════════

use crate::error::GuardViolation;
use crate::random::Randomness;
use crate::setup::deal_round;
use crate::types::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Everything a player (or the table) can ask the game to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    AddPlayer(String),
    RemovePlayer(usize),
    SetImposterCount(usize),
    SetCategory(Category),
    StartGame,
    ToggleRoleVisibility,
    AdvanceReveal,
    StartVoting,
    /// Accuse the player at this roster index.
    Vote(usize),
    NextVote,
    ResetToSetup,
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::AddPlayer(_) => "add player",
            Intent::RemovePlayer(_) => "remove player",
            Intent::SetImposterCount(_) => "set imposter count",
            Intent::SetCategory(_) => "set category",
            Intent::StartGame => "start game",
            Intent::ToggleRoleVisibility => "toggle role",
            Intent::AdvanceReveal => "next player",
            Intent::StartVoting => "start voting",
            Intent::Vote(_) => "vote",
            Intent::NextVote => "next vote",
            Intent::ResetToSetup => "new game",
        }
    }
}

/// Result of a single accusation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteOutcome {
    pub accused: usize,
    pub correct: bool,
    /// The last imposter was just found; the phase is now `Result`.
    pub round_over: bool,
}

/// What an applied intent changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    PlayerAdded { index: usize },
    PlayerRemoved { name: String, imposter_count: usize },
    ImposterCountSet(usize),
    CategorySet(Category),
    RoundStarted,
    RoleVisible(bool),
    NextViewer(usize),
    DiscussionOpened,
    VotingOpened,
    Voted(VoteOutcome),
    VoteAcknowledged,
    BackToSetup,
}

// ── Guards ─────────────────────────────────────────────────────────────

/// Would `intent` be accepted right now? Never mutates.
pub fn check(state: &GameState, intent: &Intent) -> Result<(), GuardViolation> {
    match intent {
        Intent::AddPlayer(name) => guard_add_player(state, name),
        Intent::RemovePlayer(index) => guard_remove_player(state, *index),
        Intent::SetImposterCount(n) => guard_set_imposter_count(state, *n).map(|_| ()),
        Intent::SetCategory(_) => require_phase(state, PhaseKind::Setup, intent.name()),
        Intent::StartGame => guard_start_game(state),
        Intent::ToggleRoleVisibility | Intent::AdvanceReveal => {
            require_phase(state, PhaseKind::Reveal, intent.name())
        }
        Intent::StartVoting => require_phase(state, PhaseKind::Discussion, intent.name()),
        Intent::Vote(target) => guard_vote(state, *target),
        Intent::NextVote => guard_next_vote(state),
        Intent::ResetToSetup => require_phase(state, PhaseKind::Result, intent.name()),
    }
}

fn wrong_phase(state: &GameState, intent: &'static str) -> GuardViolation {
    GuardViolation::InvalidPhase { intent, phase: state.phase_kind() }
}

fn require_phase(state: &GameState, want: PhaseKind, intent: &'static str) -> Result<(), GuardViolation> {
    if state.phase_kind() == want {
        Ok(())
    } else {
        Err(wrong_phase(state, intent))
    }
}

fn guard_add_player(state: &GameState, name: &str) -> Result<(), GuardViolation> {
    require_phase(state, PhaseKind::Setup, "add player")?;
    if name.trim().is_empty() {
        return Err(GuardViolation::EmptyName);
    }
    if state.roster.len() >= MAX_PLAYERS {
        return Err(GuardViolation::RosterBoundsViolation {
            len: state.roster.len() + 1,
            min: 0,
            max: MAX_PLAYERS,
        });
    }
    Ok(())
}

fn guard_remove_player(state: &GameState, index: usize) -> Result<(), GuardViolation> {
    require_phase(state, PhaseKind::Setup, "remove player")?;
    player_exists(state, index)
}

fn player_exists(state: &GameState, index: usize) -> Result<(), GuardViolation> {
    if index < state.roster.len() {
        Ok(())
    } else {
        Err(GuardViolation::NoSuchPlayer { index, len: state.roster.len() })
    }
}

/// Returns the clamped count that would be stored.
fn guard_set_imposter_count(state: &GameState, n: usize) -> Result<usize, GuardViolation> {
    require_phase(state, PhaseKind::Setup, "set imposter count")?;
    let max = max_imposters(state.roster.len());
    if max < 1 {
        return Err(GuardViolation::ImposterCountViolation {
            count: n,
            roster_len: state.roster.len(),
        });
    }
    Ok(n.clamp(1, max))
}

fn guard_start_game(state: &GameState) -> Result<(), GuardViolation> {
    require_phase(state, PhaseKind::Setup, "start game")?;
    let n = state.roster.len();
    if n < MIN_PLAYERS {
        return Err(GuardViolation::RosterBoundsViolation {
            len: n,
            min: MIN_PLAYERS,
            max: MAX_PLAYERS,
        });
    }
    // At least two players must hold the word.
    let k = state.config.imposter_count;
    if k == 0 || k > max_imposters(n) || k >= n - 1 {
        return Err(GuardViolation::ImposterCountViolation { count: k, roster_len: n });
    }
    Ok(())
}

fn guard_vote(state: &GameState, target: usize) -> Result<(), GuardViolation> {
    let Phase::Voting { votes, .. } = &state.phase else {
        return Err(wrong_phase(state, "vote"));
    };
    if votes.accused.is_some() {
        return Err(GuardViolation::DuplicateVotePending);
    }
    player_exists(state, target)?;
    if votes.revealed.contains(&target) {
        return Err(GuardViolation::AlreadyIdentified {
            name: state.roster[target].name.clone(),
        });
    }
    Ok(())
}

fn guard_next_vote(state: &GameState) -> Result<(), GuardViolation> {
    match &state.phase {
        Phase::Voting { votes, .. } if votes.accused.is_some() => Ok(()),
        Phase::Voting { .. } => Err(GuardViolation::NoVotePending),
        _ => Err(wrong_phase(state, "next vote")),
    }
}

// ── Intent handlers ────────────────────────────────────────────────────

/// Apply any intent. The randomness source is only consumed by `StartGame`.
pub fn apply_intent(
    state: &mut GameState,
    intent: Intent,
    rng: &mut impl Randomness,
) -> Result<Outcome, GuardViolation> {
    let name = intent.name();
    let result = match intent {
        Intent::AddPlayer(player) => add_player(state, &player).map(|index| Outcome::PlayerAdded { index }),
        Intent::RemovePlayer(index) => remove_player(state, index).map(|removed| Outcome::PlayerRemoved {
            name: removed.name,
            imposter_count: state.config.imposter_count,
        }),
        Intent::SetImposterCount(n) => set_imposter_count(state, n).map(Outcome::ImposterCountSet),
        Intent::SetCategory(category) => set_category(state, category).map(|_| Outcome::CategorySet(category)),
        Intent::StartGame => start_game(state, rng).map(|_| Outcome::RoundStarted),
        Intent::ToggleRoleVisibility => toggle_role_visibility(state).map(Outcome::RoleVisible),
        Intent::AdvanceReveal => advance_reveal(state).map(|next| match next {
            Some(index) => Outcome::NextViewer(index),
            None => Outcome::DiscussionOpened,
        }),
        Intent::StartVoting => start_voting(state).map(|_| Outcome::VotingOpened),
        Intent::Vote(target) => vote_player(state, target).map(Outcome::Voted),
        Intent::NextVote => next_vote(state).map(|_| Outcome::VoteAcknowledged),
        Intent::ResetToSetup => reset_to_setup(state).map(|_| Outcome::BackToSetup),
    };
    if let Err(reason) = &result {
        trace!(intent = name, %reason, "intent rejected");
    }
    result
}

/// Append a trimmed name. Returns its roster index.
pub fn add_player(state: &mut GameState, name: &str) -> Result<usize, GuardViolation> {
    guard_add_player(state, name)?;
    state.roster.push(Player { name: name.trim().to_string() });
    let index = state.roster.len() - 1;
    debug!(index, roster_len = state.roster.len(), "player added");
    Ok(index)
}

/// Remove the seat at `index`, shrinking the imposter count to fit.
pub fn remove_player(state: &mut GameState, index: usize) -> Result<Player, GuardViolation> {
    guard_remove_player(state, index)?;
    let removed = state.roster.remove(index);
    let bound = max_imposters(state.roster.len());
    state.config.imposter_count = state.config.imposter_count.min(bound);
    debug!(
        index,
        roster_len = state.roster.len(),
        imposter_count = state.config.imposter_count,
        "player removed"
    );
    Ok(removed)
}

/// Clamp into `1..=roster/2` and store. Returns the stored value.
pub fn set_imposter_count(state: &mut GameState, n: usize) -> Result<usize, GuardViolation> {
    let count = guard_set_imposter_count(state, n)?;
    state.config.imposter_count = count;
    Ok(count)
}

pub fn set_category(state: &mut GameState, category: Category) -> Result<(), GuardViolation> {
    require_phase(state, PhaseKind::Setup, "set category")?;
    state.config.category = category;
    Ok(())
}

/// Deal a fresh round and move to the reveal phase.
pub fn start_game(state: &mut GameState, rng: &mut impl Randomness) -> Result<(), GuardViolation> {
    guard_start_game(state)?;
    let round = deal_round(state.roster.len(), &state.config, &state.words, rng);
    debug!(
        category = state.config.category.value(),
        imposters = round.imposters.len(),
        players = state.roster.len(),
        "round dealt"
    );
    state.phase = Phase::Reveal {
        round,
        progress: RevealProgress::default(),
    };
    Ok(())
}

/// Show or hide the current viewer's role. Returns the new visibility.
pub fn toggle_role_visibility(state: &mut GameState) -> Result<bool, GuardViolation> {
    match &mut state.phase {
        Phase::Reveal { progress, .. } => {
            progress.role_visible = !progress.role_visible;
            Ok(progress.role_visible)
        }
        _ => Err(wrong_phase(state, "toggle role")),
    }
}

/// Hide the role and hand over to the next viewer. Returns the next
/// viewer's index, or `None` once everyone has looked and discussion opens.
pub fn advance_reveal(state: &mut GameState) -> Result<Option<usize>, GuardViolation> {
    let roster_len = state.roster.len();
    let Phase::Reveal { progress, .. } = &mut state.phase else {
        return Err(wrong_phase(state, "next player"));
    };
    progress.role_visible = false;
    if progress.index + 1 < roster_len {
        progress.index += 1;
        return Ok(Some(progress.index));
    }

    state.phase = match std::mem::take(&mut state.phase) {
        Phase::Reveal { round, .. } => Phase::Discussion { round },
        other => other,
    };
    debug!("all roles seen, discussion open");
    Ok(None)
}

pub fn start_voting(state: &mut GameState) -> Result<(), GuardViolation> {
    require_phase(state, PhaseKind::Discussion, "start voting")?;
    state.phase = match std::mem::take(&mut state.phase) {
        Phase::Discussion { round } => Phase::Voting {
            round,
            votes: VoteState::default(),
        },
        other => other,
    };
    debug!("voting open");
    Ok(())
}

/// Accuse `target`. A correct accusation joins the revealed set, and when
/// that set reaches the full imposter count the round ends in the same step.
pub fn vote_player(state: &mut GameState, target: usize) -> Result<VoteOutcome, GuardViolation> {
    guard_vote(state, target)?;
    let outcome = match &mut state.phase {
        Phase::Voting { round, votes } => {
            votes.accused = Some(target);
            votes.votes_cast += 1;
            let correct = round.is_imposter(target);
            if correct {
                votes.revealed.insert(target);
            }
            VoteOutcome {
                accused: target,
                correct,
                round_over: votes.revealed.len() == round.imposters.len(),
            }
        }
        _ => return Err(wrong_phase(state, "vote")),
    };
    debug!(target, correct = outcome.correct, "vote cast");

    if outcome.round_over {
        state.phase = match std::mem::take(&mut state.phase) {
            Phase::Voting { round, votes } => Phase::Result { round, votes },
            other => other,
        };
        debug!("every imposter found, round over");
    }
    Ok(outcome)
}

/// Acknowledge the pending accusation so the next one can be cast.
pub fn next_vote(state: &mut GameState) -> Result<(), GuardViolation> {
    guard_next_vote(state)?;
    if let Phase::Voting { votes, .. } = &mut state.phase {
        votes.accused = None;
    }
    Ok(())
}

/// Drop the finished round. Roster and config carry over.
pub fn reset_to_setup(state: &mut GameState) -> Result<(), GuardViolation> {
    require_phase(state, PhaseKind::Result, "new game")?;
    state.phase = Phase::Setup;
    debug!(players = state.roster.len(), "back to setup");
    Ok(())
}
