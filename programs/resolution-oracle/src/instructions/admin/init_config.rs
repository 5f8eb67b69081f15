use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::constants::{CONFIG_SEED, ROLE_SEED, VAULT_SEED};
use crate::state::{capability, OracleConfig, OracleParams, RoleGrant};
use crate::events::ConfigInitialized;
use crate::errors::OracleError;

#[derive(Accounts)]
pub struct InitConfig<'info> {
    #[account(
        init,
        seeds = [CONFIG_SEED],
        bump,
        payer = admin,
        space = OracleConfig::LEN
    )]
    pub config: Account<'info, OracleConfig>,

    /// Holds every stake; the config PDA is its authority
    #[account(
        init,
        seeds = [VAULT_SEED],
        bump,
        payer = admin,
        token::mint = stake_mint,
        token::authority = config,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        init,
        seeds = [ROLE_SEED, admin.key().as_ref()],
        bump,
        payer = admin,
        space = RoleGrant::LEN
    )]
    pub admin_role: Account<'info, RoleGrant>,

    pub stake_mint: Account<'info, Mint>,

    #[account(
        constraint = treasury.mint == stake_mint.key() @ OracleError::InvalidMint,
    )]
    pub treasury: Account<'info, TokenAccount>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn process_init_config(ctx: Context<InitConfig>, params: OracleParams) -> Result<()> {
    params.validate()?;

    let admin = ctx.accounts.admin.key();
    let config = &mut ctx.accounts.config;
    config.admin = admin;
    config.stake_mint = ctx.accounts.stake_mint.key();
    config.vault = ctx.accounts.vault.key();
    config.treasury = ctx.accounts.treasury.key();
    config.paused = false;
    config.params = params;
    config.bump = ctx.bumps.config;
    config.vault_bump = ctx.bumps.vault;

    // The deployer starts with every capability and hands them out with grant_capability.
    ctx.accounts
        .admin_role
        .grant(admin, capability::ALL, ctx.bumps.admin_role)?;

    emit!(ConfigInitialized {
        admin,
        stake_mint: config.stake_mint,
        treasury: config.treasury,
    });

    Ok(())
}
