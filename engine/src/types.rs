// ═══════════════════════════════════════════════════════════════════════
// Core types — roster, configuration, round assignment and phases
// ═══════════════════════════════════════════════════════════════════════

use crate::error::ParseCategoryError;
use crate::words::WordBank;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

// ── Table limits ───────────────────────────────────────────────────────

/// Most players a roster can hold.
pub const MAX_PLAYERS: usize = 12;

/// Fewest players a round can start with.
pub const MIN_PLAYERS: usize = 3;

/// Upper bound on imposters for a roster of `roster_len` players.
pub fn max_imposters(roster_len: usize) -> usize {
    roster_len / 2
}

// ── Category ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Object,
    Person,
    Videogame,
    Movie,
    Animal,
    Food,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Object,
        Category::Person,
        Category::Videogame,
        Category::Movie,
        Category::Animal,
        Category::Food,
    ];

    /// Machine value, as used in word-bank files and on the command line.
    pub fn value(self) -> &'static str {
        match self {
            Category::Object => "object",
            Category::Person => "person",
            Category::Videogame => "videogame",
            Category::Movie => "movie",
            Category::Animal => "animal",
            Category::Food => "food",
        }
    }

    /// Display label shown to the table.
    pub fn label(self) -> &'static str {
        match self {
            Category::Object => "Object",
            Category::Person => "Famous Person",
            Category::Videogame => "Video Game",
            Category::Movie => "Movie",
            Category::Animal => "Animal",
            Category::Food => "Food",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::ALL[0]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.value().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

// ── Player ─────────────────────────────────────────────────────────────

/// A seat at the table. Identity is the roster position, not the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
}

// ── Configuration ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub category: Category,
    pub imposter_count: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            category: Category::default(),
            imposter_count: 1,
        }
    }
}

// ── Round data ─────────────────────────────────────────────────────────

/// Hidden roles dealt at game start. Lives until the next reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundAssignment {
    pub category: Category,
    pub secret_word: String,
    /// Roster indices, in the order they were drawn.
    pub imposters: Vec<usize>,
}

impl RoundAssignment {
    pub fn is_imposter(&self, player: usize) -> bool {
        self.imposters.contains(&player)
    }
}

/// Whose turn it is to look at their role, and whether it's on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealProgress {
    pub index: usize,
    pub role_visible: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteState {
    /// Accusation waiting to be acknowledged.
    pub accused: Option<usize>,
    /// Imposters found so far. Always a subset of the round's imposters.
    pub revealed: BTreeSet<usize>,
    pub votes_cast: u32,
}

// ── Phase ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Setup,
    Reveal { round: RoundAssignment, progress: RevealProgress },
    Discussion { round: RoundAssignment },
    Voting { round: RoundAssignment, votes: VoteState },
    Result { round: RoundAssignment, votes: VoteState },
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Setup
    }
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::Setup => PhaseKind::Setup,
            Phase::Reveal { .. } => PhaseKind::Reveal,
            Phase::Discussion { .. } => PhaseKind::Discussion,
            Phase::Voting { .. } => PhaseKind::Voting,
            Phase::Result { .. } => PhaseKind::Result,
        }
    }

    /// The current round's assignment, if one has been dealt.
    pub fn round(&self) -> Option<&RoundAssignment> {
        match self {
            Phase::Setup => None,
            Phase::Reveal { round, .. }
            | Phase::Discussion { round }
            | Phase::Voting { round, .. }
            | Phase::Result { round, .. } => Some(round),
        }
    }

    pub fn votes(&self) -> Option<&VoteState> {
        match self {
            Phase::Voting { votes, .. } | Phase::Result { votes, .. } => Some(votes),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseKind {
    Setup,
    Reveal,
    Discussion,
    Voting,
    Result,
}

impl std::fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhaseKind::Setup => write!(f, "setup"),
            PhaseKind::Reveal => write!(f, "reveal"),
            PhaseKind::Discussion => write!(f, "discussion"),
            PhaseKind::Voting => write!(f, "voting"),
            PhaseKind::Result => write!(f, "result"),
        }
    }
}

// ── Game State ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameState {
    pub roster: Vec<Player>,
    pub config: GameConfig,
    pub words: WordBank,
    pub phase: Phase,
}

impl GameState {
    /// Fresh session: setup phase, empty roster, default words.
    pub fn new() -> Self {
        GameState::default()
    }

    pub fn with_words(words: WordBank) -> Self {
        GameState { words, ..GameState::default() }
    }

    pub fn player_name(&self, index: usize) -> Option<&str> {
        self.roster.get(index).map(|p| p.name.as_str())
    }

    pub fn phase_kind(&self) -> PhaseKind {
        self.phase.kind()
    }

    pub fn round(&self) -> Option<&RoundAssignment> {
        self.phase.round()
    }
}
