use anchor_lang::prelude::*;
use crate::clock::{SysvarClock, TimeSource};
use crate::constants::{CONFIG_SEED, DISPUTE_SEED, RESOLUTION_SEED};
use crate::state::{lifecycle, Dispute, OracleConfig, Resolution};
use crate::events::DisputeWithdrawn;

#[derive(Accounts)]
#[instruction(market_id: u64, round: u32, dispute_id: u32)]
pub struct WithdrawDispute<'info> {
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

    pub challenger: Signer<'info>,
}

/// Challenger cancels during escalation. The penalty stays in the vault as
/// protocol fee; every stake is refunded through `claim_dispute_reward`.
pub fn process_withdraw_dispute(
    ctx: Context<WithdrawDispute>,
    market_id: u64,
    round: u32,
    dispute_id: u32,
) -> Result<()> {
    let now = SysvarClock.now()?;
    let challenger = ctx.accounts.challenger.key();
    let resolution = &mut ctx.accounts.resolution;

    resolution.lock()?;
    let penalty = lifecycle::withdraw_dispute(
        &mut ctx.accounts.config,
        resolution,
        &mut ctx.accounts.dispute,
        &challenger,
        now,
    )?;
    resolution.unlock();

    emit!(DisputeWithdrawn {
        market_id,
        round,
        dispute_id,
        penalty,
    });

    Ok(())
}
