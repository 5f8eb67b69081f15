use anchor_lang::prelude::*;
use crate::constants::{CONFIG_SEED, MARKET_SEED, ROLE_SEED};
use crate::state::{capability, MarketRecord, OracleConfig, RoleGrant};
use crate::events::MarketRegistered;

#[derive(Accounts)]
#[instruction(market_id: u64)]
pub struct RegisterMarket<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, OracleConfig>,

    #[account(
        seeds = [ROLE_SEED, registrar.key().as_ref()],
        bump = role.bump,
    )]
    pub role: Account<'info, RoleGrant>,

    #[account(
        init,
        seeds = [MARKET_SEED, market_id.to_le_bytes().as_ref()],
        bump,
        payer = registrar,
        space = MarketRecord::LEN
    )]
    pub market: Account<'info, MarketRecord>,

    #[account(mut)]
    pub registrar: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn process_register_market(ctx: Context<RegisterMarket>, market_id: u64, outcome_count: u8) -> Result<()> {
    let registrar = ctx.accounts.registrar.key();
    ctx.accounts.role.require(&registrar, capability::MARKET_REGISTRAR)?;
    ctx.accounts.config.require_active()?;

    ctx.accounts
        .market
        .register(market_id, registrar, outcome_count, ctx.bumps.market)?;

    emit!(MarketRegistered {
        market_id,
        registrar,
        outcome_count,
    });

    Ok(())
}
