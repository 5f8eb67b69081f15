pub mod propose_resolution;
pub mod stake_resolution;
pub mod withdraw_stake;
pub mod legislator_vote;
pub mod tally_resolution;
pub mod abandon_resolution;
pub mod finalize_resolution;

pub use propose_resolution::*;
pub use stake_resolution::*;
pub use withdraw_stake::*;
pub use legislator_vote::*;
pub use tally_resolution::*;
pub use abandon_resolution::*;
pub use finalize_resolution::*;
