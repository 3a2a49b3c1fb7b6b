// ═══════════════════════════════════════════════════════════════════════
// Runner — CLI entry point for playing and simulating rounds
// ═══════════════════════════════════════════════════════════════════════

mod play;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use imposter_agents::VoterKind;
use imposter_engine::visibility::table_view;
use imposter_engine::{apply_intent, Category, GameState, Intent, RandSource, WordBank};
use imposter_simulation::{run_batch, SimConfig};
use play::{parse_command, render, Command, HELP};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "imposters", about = "Find the Imposters - pass-and-play party game")]
struct Cli {
    /// Log engine transitions to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON file overriding word lists, e.g. {"animal": ["Cat", "Dog"]}
    #[arg(short, long, global = true)]
    words: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play at this terminal, passing it round the table
    Play {
        /// Fixed seed for reproducible deals; fresh randomness if absent
        #[arg(short, long)]
        seed: Option<u64>,
        /// Comma-separated names to seat before the first prompt
        #[arg(short, long, value_delimiter = ',')]
        players: Vec<String>,
    },
    /// Simulate many rounds with automated voters
    Simulate {
        #[arg(short, long, default_value_t = 1000)]
        rounds: u32,
        #[arg(short, long, default_value_t = 6)]
        players: usize,
        #[arg(short, long, default_value_t = 1)]
        imposters: usize,
        #[arg(short, long, default_value = "object")]
        category: Category,
        /// Voter: "random" or "sequential"
        #[arg(long, default_value = "random")]
        voter: VoterKind,
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// List categories and their words
    Words,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let words = load_words(cli.words.as_deref())?;
    match cli.command {
        Commands::Play { seed, players } => cmd_play(words, seed, &players),
        Commands::Simulate { rounds, players, imposters, category, voter, seed, json } => {
            let config = SimConfig { players, imposters, category, words, ..SimConfig::default() };
            cmd_simulate(&config, rounds, voter, seed, json)
        }
        Commands::Words => {
            cmd_words(&words);
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn load_words(path: Option<&Path>) -> Result<WordBank> {
    match path {
        Some(p) => WordBank::load(p).with_context(|| format!("loading word lists from {}", p.display())),
        None => Ok(WordBank::default()),
    }
}

fn cmd_play(words: WordBank, seed: Option<u64>, players: &[String]) -> Result<()> {
    let mut rng = match seed {
        Some(s) => RandSource::seeded(s),
        None => RandSource::from_entropy(),
    };
    let mut state = GameState::with_words(words);
    for name in players {
        if let Err(e) = apply_intent(&mut state, Intent::AddPlayer(name.clone()), &mut rng) {
            eprintln!("skipping {:?}: {}", name, e);
        }
    }

    println!("=== Who are the Imposters? ===\n");
    println!("{}\n", HELP);
    print!("{}", render(&table_view(&state)));

    let stdin = io::stdin();
    let mut out = io::stdout();
    loop {
        print!("> ");
        out.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match parse_command(&line, state.phase_kind()) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => println!("{}", HELP),
            Ok(Command::View) => print!("{}", render(&table_view(&state))),
            Ok(Command::Json) => println!("{}", serde_json::to_string_pretty(&table_view(&state))?),
            Ok(Command::Apply(intent)) => match apply_intent(&mut state, intent, &mut rng) {
                Ok(outcome) => {
                    debug!(?outcome, "applied");
                    print!("{}", render(&table_view(&state)));
                }
                Err(reason) => println!("not now: {}", reason),
            },
            Err(msg) => println!("{}", msg),
        }
    }
    Ok(())
}

fn cmd_simulate(config: &SimConfig, rounds: u32, voter: VoterKind, seed: u64, json: bool) -> Result<()> {
    let summary = run_batch(config, rounds, voter, seed);
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "=== Simulation: {} rounds, {} players, {} imposters, voter={} ===\n",
        rounds, config.players, config.imposters, voter
    );
    let played = summary.rounds - summary.failed;
    println!("  Played:       {:>6}  ({} failed)", played, summary.failed);
    println!("  Mean votes:   {:>9.2}", summary.mean_votes);
    println!("  Max votes:    {:>6}", summary.max_votes);
    let wrong_pct = if summary.total_votes > 0 {
        summary.wrong_votes as f64 / summary.total_votes as f64 * 100.0
    } else {
        0.0
    };
    println!("  Wrong votes:  {:>6}  ({:.1}%)", summary.wrong_votes, wrong_pct);
    println!("\n  Votes needed:");
    for (votes, count) in &summary.votes_histogram {
        let pct = *count as f64 / played.max(1) as f64 * 100.0;
        println!("    {:>3}: {:>6} ({:.1}%)", votes, count, pct);
    }
    Ok(())
}

fn cmd_words(words: &WordBank) {
    for category in Category::ALL {
        println!("{:<10} {:<14} {}", category.value(), category.label(), words.words(category).join(", "));
    }
}
