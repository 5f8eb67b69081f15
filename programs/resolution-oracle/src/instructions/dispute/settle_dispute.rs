use anchor_lang::prelude::*;
use crate::clock::{SysvarClock, TimeSource};
use crate::constants::{CONFIG_SEED, DISPUTE_SEED, RESOLUTION_SEED};
use crate::state::{lifecycle, Dispute, DisputeStatus, OracleConfig, Resolution, Side};
use crate::events::DisputeSettled;

#[derive(Accounts)]
#[instruction(market_id: u64, round: u32, dispute_id: u32)]
pub struct SettleDispute<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Box<Account<'info, OracleConfig>>,

    #[account(
        mut,
        seeds = [RESOLUTION_SEED, market_id.to_le_bytes().as_ref(), round.to_le_bytes().as_ref()],
        bump = resolution.bump,
    )]
    pub resolution: Box<Account<'info, Resolution>>,

    #[account(
        mut,
        seeds = [DISPUTE_SEED, resolution.key().as_ref(), dispute_id.to_le_bytes().as_ref()],
        bump = dispute.bump,
    )]
    pub dispute: Box<Account<'info, Dispute>>,
}

/// Permissionless once escalation has run its course.
pub fn process_settle_dispute(
    ctx: Context<SettleDispute>,
    market_id: u64,
    round: u32,
    dispute_id: u32,
) -> Result<()> {
    let now = SysvarClock.now()?;
    let resolution = &mut ctx.accounts.resolution;

    resolution.lock()?;
    let result = lifecycle::settle_dispute(&mut ctx.accounts.config, resolution, &mut ctx.accounts.dispute, now)?;
    resolution.unlock();

    let winner = match result.status {
        DisputeStatus::Upheld => Side::Support,
        _ => Side::Oppose,
    };

    msg!("Dispute {} on market {} settled: {:?}", dispute_id, market_id, result.status);
    emit!(DisputeSettled {
        market_id,
        round,
        dispute_id,
        status: result.status,
        winner,
        current_outcome: resolution.current_outcome,
        slashed: result.settlement.slashed,
        carried: result.settlement.carried_out,
    });

    Ok(())
}
