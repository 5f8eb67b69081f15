use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::constants::{CONFIG_SEED, DISPUTE_SEED, RESOLUTION_SEED, STAKE_SEED, VAULT_SEED};
use crate::state::{lifecycle, Dispute, OracleConfig, Resolution, StakeRecord};
use crate::events::RewardClaimed;
use crate::errors::OracleError;
use crate::utils::math;
use crate::utils::transfer::pay_from_vault;

#[derive(Accounts)]
#[instruction(market_id: u64, round: u32, dispute_id: u32)]
pub struct ClaimDisputeReward<'info> {
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

    #[account(
        mut,
        seeds = [STAKE_SEED, dispute.key().as_ref(), staker.key().as_ref(), stake_record.side.seed()],
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

/// Once the resolution is final, stakes on a settled dispute are repaid: the
/// winning side with its reward, defenders of an overturned dispute at face
/// value. On a withdrawn dispute every stake is refunded at once, less the
/// challenger's penalty.
pub fn process_claim_dispute_reward(ctx: Context<ClaimDisputeReward>) -> Result<()> {
    let staker = ctx.accounts.staker.key();
    let pool = ctx.accounts.dispute.key();

    ctx.accounts.resolution.lock()?;
    let (principal, reward) = lifecycle::claim_dispute_reward(
        &mut ctx.accounts.config,
        &ctx.accounts.resolution,
        &mut ctx.accounts.dispute,
        &mut ctx.accounts.stake_record,
    )?;
    let payout = math::add(principal, reward)?;
    require!(ctx.accounts.vault.amount >= payout, OracleError::InsufficientVault);

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
