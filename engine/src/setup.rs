// ═══════════════════════════════════════════════════════════════════════
// Round setup — deals imposters and the secret word for a new round
// ═══════════════════════════════════════════════════════════════════════

use crate::random::Randomness;
use crate::types::*;
use crate::words::WordBank;

/// Shuffle the seats, take the first `config.imposter_count` as imposters
/// and draw one word from the configured category.
///
/// Callers guarantee `imposter_count <= roster_len` and that the category
/// has at least one word (`WordBank` never holds an empty list).
pub fn deal_round(
    roster_len: usize,
    config: &GameConfig,
    words: &WordBank,
    rng: &mut impl Randomness,
) -> RoundAssignment {
    let mut seats: Vec<usize> = (0..roster_len).collect();
    rng.shuffle(&mut seats);
    seats.truncate(config.imposter_count);

    let list = words.words(config.category);
    let secret_word = list[rng.index(list.len())].clone();

    RoundAssignment {
        category: config.category,
        secret_word,
        imposters: seats,
    }
}
