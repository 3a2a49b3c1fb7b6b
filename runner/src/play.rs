// ═══════════════════════════════════════════════════════════════════════
// Terminal table — line commands in, rendered view out
//
// Seats are numbered from 1 on screen and from 0 in the engine.
// ═══════════════════════════════════════════════════════════════════════

use imposter_engine::visibility::*;
use imposter_engine::{Category, Intent, PhaseKind};
use std::fmt;

pub const HELP: &str = "\
setup:      add <name> | remove <seat> | imposters <n> | category <name> | start
reveal:     show | next
discussion: voting
voting:     vote <seat> | next
result:     new
any time:   view | json | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Apply(Intent),
    View,
    Json,
    Help,
    Quit,
}

/// Turn one input line into a command for the current phase.
pub fn parse_command(line: &str, phase: PhaseKind) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match (word.to_ascii_lowercase().as_str(), phase) {
        ("help" | "?", _) => Command::Help,
        ("quit" | "exit", _) => Command::Quit,
        ("view" | "", _) => Command::View,
        ("json", _) => Command::Json,
        ("add", _) => Command::Apply(Intent::AddPlayer(rest.to_string())),
        ("remove", _) => Command::Apply(Intent::RemovePlayer(seat(rest)?)),
        ("imposters", _) => Command::Apply(Intent::SetImposterCount(number(rest)?)),
        ("category", _) => Command::Apply(Intent::SetCategory(
            rest.parse::<Category>().map_err(|e| e.to_string())?,
        )),
        ("start", _) => Command::Apply(Intent::StartGame),
        ("show" | "hide", _) => Command::Apply(Intent::ToggleRoleVisibility),
        ("next", PhaseKind::Voting) => Command::Apply(Intent::NextVote),
        ("next", _) => Command::Apply(Intent::AdvanceReveal),
        ("voting", _) => Command::Apply(Intent::StartVoting),
        ("vote", _) => Command::Apply(Intent::Vote(seat(rest)?)),
        ("new", _) => Command::Apply(Intent::ResetToSetup),
        (other, _) => return Err(format!("unknown command {:?}, try help", other)),
    };
    Ok(command)
}

fn number(arg: &str) -> Result<usize, String> {
    arg.parse::<usize>().map_err(|_| format!("expected a number, got {:?}", arg))
}

/// 1-based seat on screen → roster index.
fn seat(arg: &str) -> Result<usize, String> {
    match number(arg)? {
        0 => Err("seats are numbered from 1".to_string()),
        n => Ok(n - 1),
    }
}

// ── Rendering ──────────────────────────────────────────────────────────

pub fn render(view: &TableView) -> String {
    Screenful(view).to_string()
}

/// One screen of text for the current table view.
struct Screenful<'a>(&'a TableView);

impl fmt::Display for Screenful<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;
        writeln!(f, "── {} ── category: {}", view.phase, view.category_label)?;
        match &view.screen {
            Screen::Setup(setup) => write_setup(f, &view.players, setup),
            Screen::Reveal(reveal) => write_reveal(f, reveal),
            Screen::Discussion => {
                writeln!(f, "Time to discuss! Try to figure out who the imposters are.")?;
                writeln!(f, "type voting when ready")
            }
            Screen::Voting(voting) => write_voting(f, voting),
            Screen::Result(result) => {
                writeln!(f, "Game over!")?;
                writeln!(f, "The imposters were: {}", result.imposters.join(", "))?;
                writeln!(f, "The secret word was: {}", result.secret_word)?;
                writeln!(f, "Votes cast: {}", result.votes_cast)?;
                writeln!(f, "type new for another round")
            }
        }
    }
}

fn write_setup(f: &mut fmt::Formatter<'_>, players: &[String], setup: &SetupView) -> fmt::Result {
    for (i, name) in players.iter().enumerate() {
        writeln!(f, "  {:>2}. {}", i + 1, name)?;
    }
    writeln!(f, "imposters: {} (max {})", setup.imposter_count, setup.max_imposters)?;
    if !setup.can_add_player {
        writeln!(f, "table is full")?;
    }
    match &setup.start_blocker {
        Some(reason) => writeln!(f, "cannot start: {}", reason),
        None => writeln!(f, "ready: type start"),
    }
}

fn write_reveal(f: &mut fmt::Formatter<'_>, reveal: &RevealView) -> fmt::Result {
    writeln!(f, "{}, it's your turn. Nobody else look.", reveal.viewer_name)?;
    match &reveal.role {
        None => writeln!(f, "type show to reveal your role")?,
        Some(Role::Imposter) => writeln!(f, "You are an imposter!")?,
        Some(Role::Crew { secret_word }) => writeln!(f, "The secret word is: {}", secret_word)?,
    }
    let next = if reveal.is_last { "start discussion" } else { "next player" };
    writeln!(f, "type next to hide and go to {}", next)
}

fn write_voting(f: &mut fmt::Formatter<'_>, voting: &VotingView) -> fmt::Result {
    writeln!(f, "imposters found: {}/{}", voting.found, voting.total)?;
    for c in &voting.candidates {
        let mark = match c.status {
            CandidateStatus::Confirmed => "imposter",
            CandidateStatus::Cleared => "innocent",
            CandidateStatus::Open if c.can_vote => "",
            CandidateStatus::Open => "-",
        };
        writeln!(f, "  {:>2}. {:<16} {}", c.index + 1, c.name, mark)?;
    }
    match &voting.pending {
        Some(v) if v.correct => writeln!(f, "Correct! {} is an imposter! type next", v.name),
        Some(v) => writeln!(f, "Wrong! {} is not an imposter. type next", v.name),
        None => writeln!(f, "type vote <seat>"),
    }
}
