use anchor_lang::prelude::*;
use crate::clock::{SysvarClock, TimeSource};
use crate::constants::{CONFIG_SEED, RESOLUTION_SEED};
use crate::state::{lifecycle, OracleConfig, Resolution};
use crate::events::ResolutionTallied;

#[derive(Accounts)]
#[instruction(market_id: u64, round: u32)]
pub struct TallyResolution<'info> {
    #[account(
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
}

/// Permissionless keeper entry. A quorum miss leaves the resolution pending.
pub fn process_tally_resolution(ctx: Context<TallyResolution>, market_id: u64, round: u32) -> Result<()> {
    let now = SysvarClock.now()?;
    let resolution = &mut ctx.accounts.resolution;
    let verdict = lifecycle::tally_resolution(&ctx.accounts.config, resolution, now)?;

    msg!("Resolution {} round {} tallied: {:?}", market_id, round, resolution.status);
    emit!(ResolutionTallied {
        market_id,
        round,
        status: resolution.status,
        basis: verdict.basis,
        support_stake: resolution.support_stake,
        opposition_stake: resolution.opposition_stake,
    });

    Ok(())
}
