// ═══════════════════════════════════════════════════════════════════════
// Batch — many independent rounds in parallel, folded into statistics
// ═══════════════════════════════════════════════════════════════════════

use crate::runner::{run_round, RoundReport, SimConfig};
use imposter_agents::{make_voter, VoterKind};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub voter: String,
    pub rounds: u32,
    pub failed: u32,
    pub total_votes: u64,
    pub wrong_votes: u64,
    pub mean_votes: f64,
    pub max_votes: u32,
    /// votes needed → number of rounds
    pub votes_histogram: BTreeMap<u32, u32>,
    /// secret word → times dealt
    pub words_dealt: BTreeMap<String, u32>,
}

/// Seed for round `index` of a batch started from `base_seed`.
pub fn round_seed(base_seed: u64, index: u32) -> u64 {
    base_seed.wrapping_add(index as u64 * 1000)
}

/// Seed for the voter of a round dealt from `round_seed`. Dealer and voter
/// must draw from different ChaCha streams, otherwise the voter's first pick
/// mirrors the dealer's first shuffle swap.
pub fn voter_seed(round_seed: u64) -> u64 {
    round_seed ^ 0x9E37_79B9_7F4A_7C15
}

/// Play `rounds` rounds in parallel. Each round gets its own voter and
/// seed, so the summary is the same for a given `base_seed` regardless of
/// thread scheduling.
pub fn run_batch(config: &SimConfig, rounds: u32, kind: VoterKind, base_seed: u64) -> BatchSummary {
    info!(rounds, players = config.players, imposters = config.imposters, voter = %kind, "batch started");

    let results: Vec<_> = (0..rounds)
        .into_par_iter()
        .map(|i| {
            let seed = round_seed(base_seed, i);
            let mut voter = make_voter(kind, voter_seed(seed));
            run_round(config, &mut *voter, seed)
        })
        .collect();

    let mut summary = BatchSummary {
        voter: kind.to_string(),
        rounds,
        ..BatchSummary::default()
    };
    for result in results {
        match result {
            Ok(report) => record(&mut summary, report),
            Err(e) => {
                summary.failed += 1;
                warn!(error = %e, "simulated round failed");
            }
        }
    }
    let played = summary.rounds - summary.failed;
    if played > 0 {
        summary.mean_votes = summary.total_votes as f64 / played as f64;
    }

    info!(played, failed = summary.failed, mean_votes = summary.mean_votes, "batch finished");
    summary
}

fn record(summary: &mut BatchSummary, report: RoundReport) {
    summary.total_votes += report.votes_cast as u64;
    summary.wrong_votes += report.wrong_votes as u64;
    summary.max_votes = summary.max_votes.max(report.votes_cast);
    *summary.votes_histogram.entry(report.votes_cast).or_insert(0) += 1;
    *summary.words_dealt.entry(report.secret_word).or_insert(0) += 1;
}
