use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::clock::{SysvarClock, TimeSource};
use crate::constants::{CONFIG_SEED, RESOLUTION_SEED, STAKE_SEED, VAULT_SEED};
use crate::state::{lifecycle, OracleConfig, Resolution, Side, StakeRecord};
use crate::events::StakeWithdrawn;
use crate::utils::transfer::pay_from_vault;

#[derive(Accounts)]
#[instruction(market_id: u64, round: u32, side: Side)]
pub struct WithdrawStake<'info> {
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

    #[account(
        mut,
        seeds = [STAKE_SEED, resolution.key().as_ref(), staker.key().as_ref(), side.seed()],
        bump = stake_record.bump,
    )]
    pub stake_record: Account<'info, StakeRecord>,

    #[account(
        mut,
        seeds = [VAULT_SEED],
        bump = config.vault_bump,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        token::mint = config.stake_mint,
        token::authority = staker,
    )]
    pub staker_token: Account<'info, TokenAccount>,

    pub staker: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

/// Pull a stake back out while voting is open, or after the resolution was abandoned.
pub fn process_withdraw_stake(ctx: Context<WithdrawStake>, _market_id: u64, _round: u32, side: Side) -> Result<()> {
    let now = SysvarClock.now()?;
    let staker = ctx.accounts.staker.key();
    let pool = ctx.accounts.resolution.key();

    ctx.accounts.resolution.lock()?;
    let amount = lifecycle::withdraw_stake(
        &ctx.accounts.config,
        &mut ctx.accounts.resolution,
        &mut ctx.accounts.stake_record,
        now,
    )?;

    pay_from_vault(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.vault.to_account_info(),
        ctx.accounts.staker_token.to_account_info(),
        ctx.accounts.config.to_account_info(),
        ctx.accounts.config.bump,
        amount,
    )?;
    ctx.accounts.resolution.unlock();

    emit!(StakeWithdrawn {
        pool,
        staker,
        side,
        amount,
    });

    Ok(())
}
