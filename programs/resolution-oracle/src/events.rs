use anchor_lang::prelude::*;
use crate::state::{DisputeStatus, OracleKind, OracleParams, ResolutionStatus, Side, TallyBasis};

#[event]
pub struct ConfigInitialized {
    pub admin: Pubkey,
    pub stake_mint: Pubkey,
    pub treasury: Pubkey,
}

#[event]
pub struct ParamsUpdated {
    pub admin: Pubkey,
    pub params: OracleParams,
}

#[event]
pub struct CapabilityChanged {
    pub principal: Pubkey,
    pub capabilities: u8,
    pub granted: bool,
}

#[event]
pub struct PauseToggled {
    pub authority: Pubkey,
    pub paused: bool,
}

#[event]
pub struct MarketRegistered {
    pub market_id: u64,
    pub registrar: Pubkey,
    pub outcome_count: u8,
}

#[event]
pub struct LegislatorUpdated {
    pub authority: Pubkey,
    pub weight: u64,
    pub active: bool,
}

#[event]
pub struct OracleSourceAdded {
    pub feed: Pubkey,
    pub kind: OracleKind,
    pub reliability_bps: u16,
}

#[event]
pub struct OracleSourceUpdated {
    pub feed: Pubkey,
    pub last_update: i64,
    pub active: bool,
}

#[event]
pub struct ResolutionProposed {
    pub market_id: u64,
    pub round: u32,
    pub proposer: Pubkey,
    pub outcome: u8,
    pub stake: u64,
    pub evidence_hash: [u8; 32],
    pub timestamp: i64,
}

#[event]
pub struct ResolutionSupported {
    pub market_id: u64,
    pub round: u32,
    pub staker: Pubkey,
    pub amount: u64,
    pub support_total: u64,
}

#[event]
pub struct ResolutionOpposed {
    pub market_id: u64,
    pub round: u32,
    pub staker: Pubkey,
    pub amount: u64,
    pub opposition_total: u64,
}

#[event]
pub struct StakeWithdrawn {
    pub pool: Pubkey,
    pub staker: Pubkey,
    pub side: Side,
    pub amount: u64,
}

#[event]
pub struct LegislatorVoted {
    pub pool: Pubkey,
    pub legislator: Pubkey,
    pub side: Side,
    pub weight: u64,
}

#[event]
pub struct ResolutionTallied {
    pub market_id: u64,
    pub round: u32,
    pub status: ResolutionStatus,
    pub basis: TallyBasis,
    pub support_stake: u64,
    pub opposition_stake: u64,
}

#[event]
pub struct ResolutionAbandoned {
    pub market_id: u64,
    pub round: u32,
    pub timestamp: i64,
}

#[event]
pub struct ResolutionDisputed {
    pub market_id: u64,
    pub round: u32,
    pub dispute_id: u32,
    pub challenger: Pubkey,
    pub alternative_outcome: u8,
    pub bond: u64,
    pub escalation_ends_at: i64,
}

#[event]
pub struct DisputeBacked {
    pub dispute: Pubkey,
    pub staker: Pubkey,
    pub side: Side,
    pub amount: u64,
}

#[event]
pub struct DisputeSettled {
    pub market_id: u64,
    pub round: u32,
    pub dispute_id: u32,
    pub status: DisputeStatus,
    pub winner: Side,
    pub current_outcome: Option<u8>,
    pub slashed: u64,
    pub carried: u64,
}

#[event]
pub struct DisputeWithdrawn {
    pub market_id: u64,
    pub round: u32,
    pub dispute_id: u32,
    pub penalty: u64,
}

#[event]
pub struct ResolutionFinalized {
    pub market_id: u64,
    pub round: u32,
    pub outcome: Option<u8>,
    pub winner: Side,
    pub slashed: u64,
    pub fee: u64,
    pub rewards: u64,
    /// Net slash passed to the last upheld dispute's backers
    pub dispute_rewards: u64,
}

#[event]
pub struct MarketResolved {
    pub market_id: u64,
    pub outcome: u8,
    pub resolved_at: i64,
}

#[event]
pub struct RewardClaimed {
    pub pool: Pubkey,
    pub staker: Pubkey,
    pub principal: u64,
    pub reward: u64,
}

#[event]
pub struct TreasuryWithdrawn {
    pub admin: Pubkey,
    pub amount: u64,
    pub remaining: u64,
}
