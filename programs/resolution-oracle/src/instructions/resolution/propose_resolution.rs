use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::clock::{SysvarClock, TimeSource};
use crate::constants::{CONFIG_SEED, MARKET_SEED, RESOLUTION_SEED, STAKE_SEED, VAULT_SEED};
use crate::state::{lifecycle, MarketRecord, OracleConfig, Proposal, Resolution, Side, StakeRecord};
use crate::events::ResolutionProposed;
use crate::utils::transfer::deposit_to_vault;

#[derive(Accounts)]
#[instruction(market_id: u64)]
pub struct ProposeResolution<'info> {
    #[account(
        mut,
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

    /// Next round for this market
    #[account(
        init,
        seeds = [RESOLUTION_SEED, market_id.to_le_bytes().as_ref(), market.rounds.to_le_bytes().as_ref()],
        bump,
        payer = proposer,
        space = Resolution::LEN
    )]
    pub resolution: Box<Account<'info, Resolution>>,

    #[account(
        init,
        seeds = [STAKE_SEED, resolution.key().as_ref(), proposer.key().as_ref(), Side::Support.seed()],
        bump,
        payer = proposer,
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
        token::authority = proposer,
    )]
    pub proposer_token: Account<'info, TokenAccount>,

    #[account(mut)]
    pub proposer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn process_propose_resolution(
    ctx: Context<ProposeResolution>,
    market_id: u64,
    outcome: u8,
    evidence_uri: String,
    evidence_hash: [u8; 32],
    stake: u64,
) -> Result<()> {
    let now = SysvarClock.now()?;
    let proposer = ctx.accounts.proposer.key();
    let pool = ctx.accounts.resolution.key();

    // 1. Guards and effects
    let round = lifecycle::propose_resolution(
        &mut ctx.accounts.config,
        &mut ctx.accounts.market,
        &mut ctx.accounts.resolution,
        pool,
        &mut ctx.accounts.stake_record,
        Proposal {
            proposer,
            outcome,
            evidence_uri,
            evidence_hash,
            stake,
        },
        now,
        ctx.bumps.resolution,
        ctx.bumps.stake_record,
    )?;
    ctx.accounts.resolution.lock()?;

    // 2. Interactions
    deposit_to_vault(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.proposer_token.to_account_info(),
        ctx.accounts.vault.to_account_info(),
        ctx.accounts.proposer.to_account_info(),
        stake,
    )?;
    ctx.accounts.resolution.unlock();

    msg!("Resolution proposed for market {} round {}", market_id, round);
    emit!(ResolutionProposed {
        market_id,
        round,
        proposer,
        outcome,
        stake,
        evidence_hash,
        timestamp: now,
    });

    Ok(())
}
