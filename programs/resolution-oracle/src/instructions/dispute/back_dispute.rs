use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::clock::{SysvarClock, TimeSource};
use crate::constants::{CONFIG_SEED, DISPUTE_SEED, RESOLUTION_SEED, STAKE_SEED, VAULT_SEED};
use crate::state::{lifecycle, Deposit, Dispute, OracleConfig, Resolution, Side, StakeRecord};
use crate::events::DisputeBacked;
use crate::utils::accounts::load_optional;
use crate::utils::transfer::deposit_to_vault;

#[derive(Accounts)]
#[instruction(market_id: u64, round: u32, dispute_id: u32, side: Side)]
pub struct BackDispute<'info> {
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
        seeds = [DISPUTE_SEED, resolution.key().as_ref(), dispute_id.to_le_bytes().as_ref()],
        bump = dispute.bump,
    )]
    pub dispute: Box<Account<'info, Dispute>>,

    #[account(
        init_if_needed,
        seeds = [STAKE_SEED, dispute.key().as_ref(), staker.key().as_ref(), side.seed()],
        bump,
        payer = staker,
        space = StakeRecord::LEN
    )]
    pub stake_record: Account<'info, StakeRecord>,

    /// CHECK: the caller's record on the other side, which may not exist yet; read-only
    #[account(
        seeds = [STAKE_SEED, dispute.key().as_ref(), staker.key().as_ref(), side.opposite().seed()],
        bump,
    )]
    pub opposite_record: UncheckedAccount<'info>,

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

    #[account(mut)]
    pub staker: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

/// Stake for (`Support`) or against (`Oppose`) an active dispute.
pub fn process_back_dispute(
    ctx: Context<BackDispute>,
    _market_id: u64,
    _round: u32,
    _dispute_id: u32,
    side: Side,
    amount: u64,
) -> Result<()> {
    let now = SysvarClock.now()?;
    let staker = ctx.accounts.staker.key();
    let pool = ctx.accounts.dispute.key();

    let opposite = load_optional::<StakeRecord>(&ctx.accounts.opposite_record.to_account_info())?;

    ctx.accounts.resolution.lock()?;
    lifecycle::back_dispute(
        &ctx.accounts.config,
        &mut ctx.accounts.dispute,
        &mut ctx.accounts.stake_record,
        opposite.as_ref(),
        Deposit {
            pool,
            staker,
            side,
            amount,
            bump: ctx.bumps.stake_record,
        },
        now,
    )?;

    deposit_to_vault(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.staker_token.to_account_info(),
        ctx.accounts.vault.to_account_info(),
        ctx.accounts.staker.to_account_info(),
        amount,
    )?;
    ctx.accounts.resolution.unlock();

    emit!(DisputeBacked {
        dispute: pool,
        staker,
        side,
        amount,
    });

    Ok(())
}
