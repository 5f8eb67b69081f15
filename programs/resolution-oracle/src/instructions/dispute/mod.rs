pub mod dispute_resolution;
pub mod back_dispute;
pub mod legislator_vote_dispute;
pub mod settle_dispute;
pub mod withdraw_dispute;

pub use dispute_resolution::*;
pub use back_dispute::*;
pub use legislator_vote_dispute::*;
pub use settle_dispute::*;
pub use withdraw_dispute::*;
