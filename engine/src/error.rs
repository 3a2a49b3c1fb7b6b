// ═══════════════════════════════════════════════════════════════════════
// Errors — why an intent was refused, and why a word bank failed to load
// ═══════════════════════════════════════════════════════════════════════

use crate::types::{Category, PhaseKind};
use thiserror::Error;

/// An intent was refused. State is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuardViolation {
    #[error("{intent} is not allowed during the {phase} phase")]
    InvalidPhase { intent: &'static str, phase: PhaseKind },

    #[error("a roster of {len} players is outside the allowed {min}..={max}")]
    RosterBoundsViolation { len: usize, min: usize, max: usize },

    #[error("imposter count {count} is not valid for {roster_len} players")]
    ImposterCountViolation { count: usize, roster_len: usize },

    #[error("a vote is waiting to be acknowledged")]
    DuplicateVotePending,

    #[error("there is no vote to acknowledge")]
    NoVotePending,

    #[error("player name is empty")]
    EmptyName,

    #[error("no player at position {index} (roster has {len})")]
    NoSuchPlayer { index: usize, len: usize },

    #[error("{name} has already been identified as an imposter")]
    AlreadyIdentified { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category {0:?}")]
pub struct ParseCategoryError(pub String);

#[derive(Debug, Error)]
pub enum WordBankError {
    #[error("category {0} has no words")]
    EmptyCategory(Category),

    #[error("category {0} contains a blank word")]
    BlankWord(Category),

    #[error(transparent)]
    UnknownCategory(#[from] ParseCategoryError),

    #[error("malformed word list: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not read word list: {0}")]
    Io(#[from] std::io::Error),
}
