pub mod claim_resolution_reward;
pub mod claim_dispute_reward;

pub use claim_resolution_reward::*;
pub use claim_dispute_reward::*;
