pub mod agent;
pub mod random;
pub mod sequential;

pub use agent::{make_voter, Voter, VoterKind};
pub use random::RandomVoter;
pub use sequential::SequentialVoter;
