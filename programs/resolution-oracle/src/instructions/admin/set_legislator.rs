use anchor_lang::prelude::*;
use crate::clock::{SysvarClock, TimeSource};
use crate::constants::{CONFIG_SEED, LEGISLATOR_SEED, ROLE_SEED};
use crate::state::{capability, LegislatorSeat, OracleConfig, RoleGrant};
use crate::events::LegislatorUpdated;

#[derive(Accounts)]
#[instruction(authority: Pubkey)]
pub struct SetLegislator<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, OracleConfig>,

    #[account(
        seeds = [ROLE_SEED, election.key().as_ref()],
        bump = role.bump,
    )]
    pub role: Account<'info, RoleGrant>,

    #[account(
        init_if_needed,
        seeds = [LEGISLATOR_SEED, authority.as_ref()],
        bump,
        payer = election,
        space = LegislatorSeat::LEN
    )]
    pub seat: Account<'info, LegislatorSeat>,

    /// Election component acting under the ELECTION capability
    #[account(mut)]
    pub election: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn process_set_legislator(ctx: Context<SetLegislator>, authority: Pubkey, weight: u64, active: bool) -> Result<()> {
    ctx.accounts.role.require(&ctx.accounts.election.key(), capability::ELECTION)?;
    ctx.accounts.config.require_active()?;

    let seat = &mut ctx.accounts.seat;
    seat.authority = authority;
    seat.weight = weight;
    seat.active = active;
    seat.updated_at = SysvarClock.now()?;
    seat.bump = ctx.bumps.seat;

    emit!(LegislatorUpdated {
        authority,
        weight,
        active,
    });

    Ok(())
}
