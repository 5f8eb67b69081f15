use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::clock::{SysvarClock, TimeSource};
use crate::constants::{CONFIG_SEED, DISPUTE_SEED, MARKET_SEED, RESOLUTION_SEED, STAKE_SEED, VAULT_SEED};
use crate::state::lifecycle::{self, DisputeRequest};
use crate::state::{Dispute, MarketRecord, OracleConfig, Resolution, Side, StakeRecord};
use crate::events::ResolutionDisputed;
use crate::utils::transfer::deposit_to_vault;

#[derive(Accounts)]
#[instruction(market_id: u64, round: u32)]
pub struct DisputeResolution<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Box<Account<'info, OracleConfig>>,

    #[account(
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

    #[account(
        init,
        seeds = [DISPUTE_SEED, resolution.key().as_ref(), resolution.dispute_count.to_le_bytes().as_ref()],
        bump,
        payer = challenger,
        space = Dispute::LEN
    )]
    pub dispute: Box<Account<'info, Dispute>>,

    /// The bond is the challenger's backing stake
    #[account(
        init,
        seeds = [STAKE_SEED, dispute.key().as_ref(), challenger.key().as_ref(), Side::Support.seed()],
        bump,
        payer = challenger,
        space = StakeRecord::LEN
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
        token::authority = challenger,
    )]
    pub challenger_token: Account<'info, TokenAccount>,

    #[account(mut)]
    pub challenger: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[allow(clippy::too_many_arguments)]
pub fn process_dispute_resolution(
    ctx: Context<DisputeResolution>,
    market_id: u64,
    round: u32,
    alternative_outcome: u8,
    evidence_uri: String,
    evidence_hash: [u8; 32],
    stake: u64,
) -> Result<()> {
    let now = SysvarClock.now()?;
    let challenger = ctx.accounts.challenger.key();
    let resolution_key = ctx.accounts.resolution.key();
    let dispute_key = ctx.accounts.dispute.key();

    // 1. Guards and effects
    ctx.accounts.resolution.lock()?;
    let dispute_id = lifecycle::dispute_resolution(
        &mut ctx.accounts.config,
        &ctx.accounts.market,
        &mut ctx.accounts.resolution,
        resolution_key,
        &mut ctx.accounts.dispute,
        dispute_key,
        &mut ctx.accounts.stake_record,
        DisputeRequest {
            challenger,
            alternative_outcome,
            bond: stake,
            evidence_uri,
            evidence_hash,
        },
        now,
        ctx.bumps.dispute,
        ctx.bumps.stake_record,
    )?;

    // 2. Interactions
    deposit_to_vault(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.challenger_token.to_account_info(),
        ctx.accounts.vault.to_account_info(),
        ctx.accounts.challenger.to_account_info(),
        stake,
    )?;
    ctx.accounts.resolution.unlock();

    msg!("Dispute {} opened on market {} round {}", dispute_id, market_id, round);
    emit!(ResolutionDisputed {
        market_id,
        round,
        dispute_id,
        challenger,
        alternative_outcome,
        bond: stake,
        escalation_ends_at: ctx.accounts.resolution.escalation_ends_at,
    });

    Ok(())
}
