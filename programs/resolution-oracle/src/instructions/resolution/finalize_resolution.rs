use anchor_lang::prelude::*;
use crate::clock::{SysvarClock, TimeSource};
use crate::constants::{CONFIG_SEED, MARKET_SEED, RESOLUTION_SEED};
use crate::state::{lifecycle, Dispute, MarketRecord, OracleConfig, Resolution};
use crate::events::{MarketResolved, ResolutionFinalized};

#[derive(Accounts)]
#[instruction(market_id: u64, round: u32)]
pub struct FinalizeResolution<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Box<Account<'info, OracleConfig>>,

    #[account(
        mut,
        seeds = [MARKET_SEED, market_id.to_le_bytes().as_ref()],
        bump = market.bump,
    )]
    pub market: Account<'info, MarketRecord>,

    #[account(
        mut,
        seeds = [RESOLUTION_SEED, market_id.to_le_bytes().as_ref(), round.to_le_bytes().as_ref()],
        bump = resolution.bump,
    )]
    pub resolution: Box<Account<'info, Resolution>>,

    /// Last upheld dispute; required when the resolution's winning side is
    /// empty and its net slash passes to the dispute's backers
    #[account(mut)]
    pub upheld_dispute: Option<Account<'info, Dispute>>,
}

/// Single entry into FINALIZED. Fixes the reward rate and, when the verdict
/// names an outcome, resolves the market.
pub fn process_finalize_resolution(ctx: Context<FinalizeResolution>, market_id: u64, round: u32) -> Result<()> {
    let now = SysvarClock.now()?;
    let resolution_key = ctx.accounts.resolution.key();
    let resolution = &mut ctx.accounts.resolution;

    resolution.lock()?;
    let finalization = lifecycle::finalize_resolution(
        &mut ctx.accounts.config,
        &mut ctx.accounts.market,
        resolution,
        resolution_key,
        ctx.accounts.upheld_dispute.as_deref_mut(),
        now,
    )?;
    resolution.unlock();

    if let Some(outcome) = finalization.outcome {
        emit!(MarketResolved {
            market_id,
            outcome,
            resolved_at: now,
        });
    }
    let settlement = finalization.settlement;
    msg!(
        "Resolution {} round {} finalized: slashed {}, fee {}, rewards {}, to dispute {}",
        market_id,
        round,
        settlement.slashed,
        settlement.fee,
        settlement.reserved,
        finalization.routed_to_dispute
    );
    emit!(ResolutionFinalized {
        market_id,
        round,
        outcome: finalization.outcome,
        winner: finalization.winner,
        slashed: settlement.slashed,
        fee: settlement.fee,
        rewards: settlement.reserved,
        dispute_rewards: finalization.routed_to_dispute,
    });

    Ok(())
}
