use anchor_lang::prelude::*;
use crate::clock::{SysvarClock, TimeSource};
use crate::constants::{CONFIG_SEED, MARKET_SEED, RESOLUTION_SEED};
use crate::state::{lifecycle, MarketRecord, OracleConfig, Resolution};
use crate::events::ResolutionAbandoned;

#[derive(Accounts)]
#[instruction(market_id: u64, round: u32)]
pub struct AbandonResolution<'info> {
    #[account(
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
}

/// Retire a resolution whose tally cannot reach a verdict. Stakes become
/// withdrawable and the market may be proposed again.
pub fn process_abandon_resolution(ctx: Context<AbandonResolution>, market_id: u64, round: u32) -> Result<()> {
    let now = SysvarClock.now()?;
    lifecycle::abandon_resolution(
        &ctx.accounts.config,
        &mut ctx.accounts.market,
        &mut ctx.accounts.resolution,
        now,
    )?;

    emit!(ResolutionAbandoned {
        market_id,
        round,
        timestamp: now,
    });

    Ok(())
}
