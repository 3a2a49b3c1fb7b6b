pub mod types;
pub mod error;
pub mod words;
pub mod random;
pub mod setup;
pub mod engine;
pub mod visibility;

mod tests;

pub use types::*;
pub use error::{GuardViolation, ParseCategoryError, WordBankError};
pub use words::WordBank;
pub use random::{RandSource, Randomness};
pub use engine::{apply_intent, check, Intent, Outcome, VoteOutcome};
