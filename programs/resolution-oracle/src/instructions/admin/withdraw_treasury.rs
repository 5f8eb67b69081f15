use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::constants::{CONFIG_SEED, ROLE_SEED, VAULT_SEED};
use crate::state::{capability, OracleConfig, RoleGrant};
use crate::events::TreasuryWithdrawn;
use crate::errors::OracleError;
use crate::utils::transfer::pay_from_vault;

#[derive(Accounts)]
pub struct WithdrawTreasury<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, OracleConfig>,

    #[account(
        seeds = [ROLE_SEED, admin.key().as_ref()],
        bump = role.bump,
    )]
    pub role: Account<'info, RoleGrant>,

    #[account(
        mut,
        seeds = [VAULT_SEED],
        bump = config.vault_bump,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = treasury.key() == config.treasury @ OracleError::Unauthorized,
    )]
    pub treasury: Account<'info, TokenAccount>,

    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

/// Sweep accumulated protocol fees out of the vault.
pub fn process_withdraw_treasury(ctx: Context<WithdrawTreasury>, amount: u64) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    ctx.accounts.role.require(&admin, capability::ADMIN)?;
    ctx.accounts.config.require_active()?;
    require!(amount > 0, OracleError::NothingToClaim);
    require!(ctx.accounts.vault.amount >= amount, OracleError::InsufficientVault);

    ctx.accounts.config.debit_treasury(amount)?;

    pay_from_vault(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.vault.to_account_info(),
        ctx.accounts.treasury.to_account_info(),
        ctx.accounts.config.to_account_info(),
        ctx.accounts.config.bump,
        amount,
    )?;

    emit!(TreasuryWithdrawn {
        admin,
        amount,
        remaining: ctx.accounts.config.resolution_treasury,
    });

    Ok(())
}
