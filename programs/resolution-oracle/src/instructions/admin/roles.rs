use anchor_lang::prelude::*;
use crate::constants::{CONFIG_SEED, ROLE_SEED};
use crate::state::{capability, OracleConfig, RoleGrant};
use crate::events::CapabilityChanged;
use crate::errors::OracleError;

#[derive(Accounts)]
#[instruction(principal: Pubkey)]
pub struct GrantCapability<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, OracleConfig>,

    #[account(
        seeds = [ROLE_SEED, admin.key().as_ref()],
        bump = admin_role.bump,
    )]
    pub admin_role: Account<'info, RoleGrant>,

    #[account(
        init_if_needed,
        seeds = [ROLE_SEED, principal.as_ref()],
        bump,
        payer = admin,
        space = RoleGrant::LEN
    )]
    pub target_role: Account<'info, RoleGrant>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn process_grant_capability(ctx: Context<GrantCapability>, principal: Pubkey, capabilities: u8) -> Result<()> {
    ctx.accounts.admin_role.require(&ctx.accounts.admin.key(), capability::ADMIN)?;
    ctx.accounts.config.require_active()?;

    let target = &mut ctx.accounts.target_role;
    target.grant(principal, capabilities, ctx.bumps.target_role)?;

    emit!(CapabilityChanged {
        principal,
        capabilities: target.capabilities,
        granted: true,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(principal: Pubkey)]
pub struct RevokeCapability<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, OracleConfig>,

    #[account(
        seeds = [ROLE_SEED, admin.key().as_ref()],
        bump = admin_role.bump,
    )]
    pub admin_role: Account<'info, RoleGrant>,

    #[account(
        mut,
        seeds = [ROLE_SEED, principal.as_ref()],
        bump = target_role.bump,
    )]
    pub target_role: Account<'info, RoleGrant>,

    pub admin: Signer<'info>,
}

pub fn process_revoke_capability(ctx: Context<RevokeCapability>, principal: Pubkey, capabilities: u8) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    ctx.accounts.admin_role.require(&admin, capability::ADMIN)?;
    ctx.accounts.config.require_active()?;
    // An admin cannot lock the program out by dropping its own ADMIN bit.
    require!(
        !(principal == admin && capabilities & capability::ADMIN != 0),
        OracleError::Unauthorized
    );

    let target = &mut ctx.accounts.target_role;
    target.revoke(capabilities);

    emit!(CapabilityChanged {
        principal,
        capabilities: target.capabilities,
        granted: false,
    });

    Ok(())
}
