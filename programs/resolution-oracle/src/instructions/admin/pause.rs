use anchor_lang::prelude::*;
use crate::constants::{CONFIG_SEED, ROLE_SEED};
use crate::state::{capability, OracleConfig, RoleGrant};
use crate::events::PauseToggled;

#[derive(Accounts)]
pub struct EmergencyToggle<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, OracleConfig>,

    #[account(
        seeds = [ROLE_SEED, authority.key().as_ref()],
        bump = role.bump,
    )]
    pub role: Account<'info, RoleGrant>,

    pub authority: Signer<'info>,
}

pub fn emergency_pause(ctx: Context<EmergencyToggle>) -> Result<()> {
    set_paused(ctx, true)
}

pub fn emergency_unpause(ctx: Context<EmergencyToggle>) -> Result<()> {
    set_paused(ctx, false)
}

fn set_paused(ctx: Context<EmergencyToggle>, paused: bool) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    ctx.accounts.role.require(&authority, capability::EMERGENCY)?;
    ctx.accounts.config.paused = paused;

    msg!("Oracle paused: {}", paused);
    emit!(PauseToggled { authority, paused });
    Ok(())
}
