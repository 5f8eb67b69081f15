use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;
use crate::constants::{CONFIG_SEED, ROLE_SEED};
use crate::state::{capability, OracleConfig, OracleParams, RoleGrant};
use crate::events::ParamsUpdated;
use crate::errors::OracleError;

#[derive(Accounts)]
pub struct UpdateParams<'info> {
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

    pub admin: Signer<'info>,
}

/// Replace the whole parameter block. Running resolutions pick the new
/// periods up on their next phase check.
pub fn process_update_params(ctx: Context<UpdateParams>, params: OracleParams) -> Result<()> {
    ctx.accounts.role.require(&ctx.accounts.admin.key(), capability::ADMIN)?;
    let config = &mut ctx.accounts.config;
    config.require_active()?;
    params.validate()?;
    config.params = params;

    emit!(ParamsUpdated {
        admin: ctx.accounts.admin.key(),
        params,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct UpdateTreasury<'info> {
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

    pub admin: Signer<'info>,

    #[account(
        constraint = new_treasury.mint == config.stake_mint @ OracleError::InvalidMint,
    )]
    pub new_treasury: Account<'info, TokenAccount>,
}

pub fn process_update_treasury(ctx: Context<UpdateTreasury>) -> Result<()> {
    ctx.accounts.role.require(&ctx.accounts.admin.key(), capability::ADMIN)?;
    ctx.accounts.config.require_active()?;
    ctx.accounts.config.treasury = ctx.accounts.new_treasury.key();
    msg!("Treasury updated to {}", ctx.accounts.new_treasury.key());
    Ok(())
}
