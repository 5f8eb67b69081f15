use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::clock::{SysvarClock, TimeSource};
use crate::constants::{CONFIG_SEED, RESOLUTION_SEED, STAKE_SEED, VAULT_SEED};
use crate::state::{lifecycle, Deposit, OracleConfig, Resolution, Side, StakeRecord};
use crate::events::{ResolutionOpposed, ResolutionSupported};
use crate::utils::accounts::load_optional;
use crate::utils::transfer::deposit_to_vault;

#[derive(Accounts)]
#[instruction(market_id: u64, round: u32)]
pub struct SupportResolution<'info> {
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
        init_if_needed,
        seeds = [STAKE_SEED, resolution.key().as_ref(), staker.key().as_ref(), Side::Support.seed()],
        bump,
        payer = staker,
        space = StakeRecord::LEN
    )]
    pub stake_record: Account<'info, StakeRecord>,

    /// CHECK: the caller's opposition record, which may not exist yet; read-only
    #[account(
        seeds = [STAKE_SEED, resolution.key().as_ref(), staker.key().as_ref(), Side::Oppose.seed()],
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

#[derive(Accounts)]
#[instruction(market_id: u64, round: u32)]
pub struct OpposeResolution<'info> {
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
        init_if_needed,
        seeds = [STAKE_SEED, resolution.key().as_ref(), staker.key().as_ref(), Side::Oppose.seed()],
        bump,
        payer = staker,
        space = StakeRecord::LEN
    )]
    pub stake_record: Account<'info, StakeRecord>,

    /// CHECK: the caller's support record, which may not exist yet; read-only
    #[account(
        seeds = [STAKE_SEED, resolution.key().as_ref(), staker.key().as_ref(), Side::Support.seed()],
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

pub fn process_support_resolution(
    ctx: Context<SupportResolution>,
    market_id: u64,
    round: u32,
    amount: u64,
) -> Result<()> {
    let now = SysvarClock.now()?;
    let staker = ctx.accounts.staker.key();
    let pool = ctx.accounts.resolution.key();
    let opposite = load_optional::<StakeRecord>(&ctx.accounts.opposite_record.to_account_info())?;

    ctx.accounts.resolution.lock()?;
    let support_total = lifecycle::stake_resolution(
        &ctx.accounts.config,
        &mut ctx.accounts.resolution,
        &mut ctx.accounts.stake_record,
        opposite.as_ref(),
        Deposit {
            pool,
            staker,
            side: Side::Support,
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

    emit!(ResolutionSupported {
        market_id,
        round,
        staker,
        amount,
        support_total,
    });

    Ok(())
}

pub fn process_oppose_resolution(
    ctx: Context<OpposeResolution>,
    market_id: u64,
    round: u32,
    amount: u64,
) -> Result<()> {
    let now = SysvarClock.now()?;
    let staker = ctx.accounts.staker.key();
    let pool = ctx.accounts.resolution.key();
    let opposite = load_optional::<StakeRecord>(&ctx.accounts.opposite_record.to_account_info())?;

    ctx.accounts.resolution.lock()?;
    let opposition_total = lifecycle::stake_resolution(
        &ctx.accounts.config,
        &mut ctx.accounts.resolution,
        &mut ctx.accounts.stake_record,
        opposite.as_ref(),
        Deposit {
            pool,
            staker,
            side: Side::Oppose,
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

    emit!(ResolutionOpposed {
        market_id,
        round,
        staker,
        amount,
        opposition_total,
    });

    Ok(())
}
