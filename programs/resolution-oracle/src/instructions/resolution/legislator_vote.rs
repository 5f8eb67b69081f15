use anchor_lang::prelude::*;
use crate::clock::{SysvarClock, TimeSource};
use crate::constants::{BALLOT_SEED, CONFIG_SEED, LEGISLATOR_SEED, RESOLUTION_SEED};
use crate::state::{lifecycle, LegislatorBallot, LegislatorSeat, OracleConfig, Resolution, Side, Vote};
use crate::events::LegislatorVoted;
use crate::utils::accounts::load_optional;

#[derive(Accounts)]
#[instruction(market_id: u64, round: u32)]
pub struct LegislatorVote<'info> {
    #[account(
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

    /// CHECK: the caller's seat, absent for anyone never elected; read-only
    #[account(
        seeds = [LEGISLATOR_SEED, legislator.key().as_ref()],
        bump,
    )]
    pub seat: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        seeds = [BALLOT_SEED, resolution.key().as_ref(), legislator.key().as_ref()],
        bump,
        payer = legislator,
        space = LegislatorBallot::LEN
    )]
    pub ballot: Account<'info, LegislatorBallot>,

    #[account(mut)]
    pub legislator: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn process_legislator_vote(ctx: Context<LegislatorVote>, _market_id: u64, _round: u32, support: bool) -> Result<()> {
    let now = SysvarClock.now()?;
    let legislator = ctx.accounts.legislator.key();
    let pool = ctx.accounts.resolution.key();
    let side = Side::from_vote(support);

    let seat = load_optional::<LegislatorSeat>(&ctx.accounts.seat.to_account_info())?;
    let weight = lifecycle::legislator_vote(
        &ctx.accounts.config,
        &mut ctx.accounts.resolution,
        seat.as_ref(),
        &mut ctx.accounts.ballot,
        Vote {
            pool,
            legislator,
            side,
            bump: ctx.bumps.ballot,
        },
        now,
    )?;

    emit!(LegislatorVoted {
        pool,
        legislator,
        side,
        weight,
    });

    Ok(())
}
