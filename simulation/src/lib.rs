pub mod runner;
pub mod batch;

pub use runner::{run_round, RoundReport, SimConfig, SimulationError};
pub use batch::{round_seed, run_batch, voter_seed, BatchSummary};
