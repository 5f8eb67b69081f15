use anchor_lang::prelude::*;

pub mod clock;
pub mod constants;
pub mod state;
pub mod instructions;
pub mod errors;
pub mod events;
pub mod utils;

#[cfg(test)]
mod tests;

use instructions::*;
use state::{OracleKind, OracleParams, Side};

declare_id!("4v1ViPW8tHHkYzLpEzLvArQHgBMSF4AHjrp7GThATv7G");

#[program]
pub mod resolution_oracle {
    use super::*;

    // Admin

    pub fn init_config(ctx: Context<InitConfig>, params: OracleParams) -> Result<()> {
        instructions::admin::init_config::process_init_config(ctx, params)
    }

    pub fn update_params(ctx: Context<UpdateParams>, params: OracleParams) -> Result<()> {
        instructions::admin::update_params::process_update_params(ctx, params)
    }

    pub fn update_treasury(ctx: Context<UpdateTreasury>) -> Result<()> {
        instructions::admin::update_params::process_update_treasury(ctx)
    }

    pub fn grant_capability(ctx: Context<GrantCapability>, principal: Pubkey, capabilities: u8) -> Result<()> {
        instructions::admin::roles::process_grant_capability(ctx, principal, capabilities)
    }

    pub fn revoke_capability(ctx: Context<RevokeCapability>, principal: Pubkey, capabilities: u8) -> Result<()> {
        instructions::admin::roles::process_revoke_capability(ctx, principal, capabilities)
    }

    pub fn emergency_pause(ctx: Context<EmergencyToggle>) -> Result<()> {
        instructions::admin::pause::emergency_pause(ctx)
    }

    pub fn emergency_unpause(ctx: Context<EmergencyToggle>) -> Result<()> {
        instructions::admin::pause::emergency_unpause(ctx)
    }

    pub fn register_market(ctx: Context<RegisterMarket>, market_id: u64, outcome_count: u8) -> Result<()> {
        instructions::admin::register_market::process_register_market(ctx, market_id, outcome_count)
    }

    pub fn set_legislator(ctx: Context<SetLegislator>, authority: Pubkey, weight: u64, active: bool) -> Result<()> {
        instructions::admin::set_legislator::process_set_legislator(ctx, authority, weight, active)
    }

    pub fn add_oracle_source(ctx: Context<AddOracleSource>, feed: Pubkey, kind: OracleKind, reliability_bps: u16) -> Result<()> {
        instructions::admin::oracle_source::process_add_oracle_source(ctx, feed, kind, reliability_bps)
    }

    pub fn set_oracle_source_active(ctx: Context<SetOracleSourceActive>, active: bool) -> Result<()> {
        instructions::admin::oracle_source::process_set_oracle_source_active(ctx, active)
    }

    pub fn refresh_oracle_source(ctx: Context<RefreshOracleSource>) -> Result<()> {
        instructions::admin::oracle_source::process_refresh_oracle_source(ctx)
    }

    pub fn withdraw_treasury(ctx: Context<WithdrawTreasury>, amount: u64) -> Result<()> {
        instructions::admin::withdraw_treasury::process_withdraw_treasury(ctx, amount)
    }

    // Resolution lifecycle

    pub fn propose_resolution(
        ctx: Context<ProposeResolution>,
        market_id: u64,
        outcome: u8,
        evidence_uri: String,
        evidence_hash: [u8; 32],
        stake: u64,
    ) -> Result<()> {
        instructions::resolution::propose_resolution::process_propose_resolution(
            ctx,
            market_id,
            outcome,
            evidence_uri,
            evidence_hash,
            stake,
        )
    }

    pub fn support_resolution(ctx: Context<SupportResolution>, market_id: u64, round: u32, amount: u64) -> Result<()> {
        instructions::resolution::stake_resolution::process_support_resolution(ctx, market_id, round, amount)
    }

    pub fn oppose_resolution(ctx: Context<OpposeResolution>, market_id: u64, round: u32, amount: u64) -> Result<()> {
        instructions::resolution::stake_resolution::process_oppose_resolution(ctx, market_id, round, amount)
    }

    pub fn withdraw_stake(ctx: Context<WithdrawStake>, market_id: u64, round: u32, side: Side) -> Result<()> {
        instructions::resolution::withdraw_stake::process_withdraw_stake(ctx, market_id, round, side)
    }

    pub fn legislator_vote(ctx: Context<LegislatorVote>, market_id: u64, round: u32, support: bool) -> Result<()> {
        instructions::resolution::legislator_vote::process_legislator_vote(ctx, market_id, round, support)
    }

    pub fn tally_resolution(ctx: Context<TallyResolution>, market_id: u64, round: u32) -> Result<()> {
        instructions::resolution::tally_resolution::process_tally_resolution(ctx, market_id, round)
    }

    pub fn abandon_resolution(ctx: Context<AbandonResolution>, market_id: u64, round: u32) -> Result<()> {
        instructions::resolution::abandon_resolution::process_abandon_resolution(ctx, market_id, round)
    }

    pub fn finalize_resolution(ctx: Context<FinalizeResolution>, market_id: u64, round: u32) -> Result<()> {
        instructions::resolution::finalize_resolution::process_finalize_resolution(ctx, market_id, round)
    }

    // Disputes

    pub fn dispute_resolution(
        ctx: Context<DisputeResolution>,
        market_id: u64,
        round: u32,
        alternative_outcome: u8,
        evidence_uri: String,
        evidence_hash: [u8; 32],
        stake: u64,
    ) -> Result<()> {
        instructions::dispute::dispute_resolution::process_dispute_resolution(
            ctx,
            market_id,
            round,
            alternative_outcome,
            evidence_uri,
            evidence_hash,
            stake,
        )
    }

    pub fn back_dispute(
        ctx: Context<BackDispute>,
        market_id: u64,
        round: u32,
        dispute_id: u32,
        side: Side,
        amount: u64,
    ) -> Result<()> {
        instructions::dispute::back_dispute::process_back_dispute(ctx, market_id, round, dispute_id, side, amount)
    }

    pub fn legislator_vote_dispute(
        ctx: Context<LegislatorVoteDispute>,
        market_id: u64,
        round: u32,
        dispute_id: u32,
        support: bool,
    ) -> Result<()> {
        instructions::dispute::legislator_vote_dispute::process_legislator_vote_dispute(
            ctx, market_id, round, dispute_id, support,
        )
    }

    pub fn settle_dispute(ctx: Context<SettleDispute>, market_id: u64, round: u32, dispute_id: u32) -> Result<()> {
        instructions::dispute::settle_dispute::process_settle_dispute(ctx, market_id, round, dispute_id)
    }

    pub fn withdraw_dispute(ctx: Context<WithdrawDispute>, market_id: u64, round: u32, dispute_id: u32) -> Result<()> {
        instructions::dispute::withdraw_dispute::process_withdraw_dispute(ctx, market_id, round, dispute_id)
    }

    // Claims

    pub fn claim_resolution_reward(ctx: Context<ClaimResolutionReward>, _market_id: u64, _round: u32) -> Result<()> {
        instructions::claims::claim_resolution_reward::process_claim_resolution_reward(ctx)
    }

    pub fn claim_opposition_reward(ctx: Context<ClaimResolutionReward>, _market_id: u64, _round: u32) -> Result<()> {
        instructions::claims::claim_resolution_reward::process_claim_opposition_reward(ctx)
    }

    pub fn claim_dispute_reward(
        ctx: Context<ClaimDisputeReward>,
        _market_id: u64,
        _round: u32,
        _dispute_id: u32,
    ) -> Result<()> {
        instructions::claims::claim_dispute_reward::process_claim_dispute_reward(ctx)
    }
}
