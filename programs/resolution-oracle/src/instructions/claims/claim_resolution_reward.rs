use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::constants::{CONFIG_SEED, RESOLUTION_SEED, STAKE_SEED, VAULT_SEED};
use crate::state::{lifecycle, OracleConfig, Resolution, Side, StakeRecord};
use crate::events::RewardClaimed;
use crate::errors::OracleError;
use crate::utils::math;
use crate::utils::transfer::pay_from_vault;

/// Shared by `claim_resolution_reward` (support side) and
/// `claim_opposition_reward` (oppose side).
#[derive(Accounts)]
#[instruction(market_id: u64, round: u32)]
pub struct ClaimResolutionReward<'info> {
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
        seeds = [STAKE_SEED, resolution.key().as_ref(), staker.key().as_ref(), stake_record.side.seed()],
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

pub fn process_claim_resolution_reward(ctx: Context<ClaimResolutionReward>) -> Result<()> {
    claim(ctx, Side::Support)
}

pub fn process_claim_opposition_reward(ctx: Context<ClaimResolutionReward>) -> Result<()> {
    claim(ctx, Side::Oppose)
}

fn claim(ctx: Context<ClaimResolutionReward>, side: Side) -> Result<()> {
    let staker = ctx.accounts.staker.key();
    let pool = ctx.accounts.resolution.key();

    // 1. Guards and effects
    ctx.accounts.resolution.lock()?;
    let (principal, reward) = lifecycle::claim_resolution_reward(
        &mut ctx.accounts.config,
        &mut ctx.accounts.resolution,
        &mut ctx.accounts.stake_record,
        side,
    )?;
    let payout = math::add(principal, reward)?;
    require!(ctx.accounts.vault.amount >= payout, OracleError::InsufficientVault);

    // 2. Interactions
    pay_from_vault(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.vault.to_account_info(),
        ctx.accounts.staker_token.to_account_info(),
        ctx.accounts.config.to_account_info(),
        ctx.accounts.config.bump,
        payout,
    )?;
    ctx.accounts.resolution.unlock();

    emit!(RewardClaimed {
        pool,
        staker,
        principal,
        reward,
    });

    Ok(())
}
