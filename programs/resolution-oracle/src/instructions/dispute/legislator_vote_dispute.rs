use anchor_lang::prelude::*;
use crate::clock::{SysvarClock, TimeSource};
use crate::constants::{BALLOT_SEED, CONFIG_SEED, DISPUTE_SEED, LEGISLATOR_SEED, RESOLUTION_SEED};
use crate::state::{lifecycle, Dispute, LegislatorBallot, LegislatorSeat, OracleConfig, Resolution, Side, Vote};
use crate::events::LegislatorVoted;
use crate::utils::accounts::load_optional;

#[derive(Accounts)]
#[instruction(market_id: u64, round: u32, dispute_id: u32)]
pub struct LegislatorVoteDispute<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Box<Account<'info, OracleConfig>>,

    #[account(
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

    /// CHECK: the caller's seat, absent for anyone never elected; read-only
    #[account(
        seeds = [LEGISLATOR_SEED, legislator.key().as_ref()],
        bump,
    )]
    pub seat: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        seeds = [BALLOT_SEED, dispute.key().as_ref(), legislator.key().as_ref()],
        bump,
        payer = legislator,
        space = LegislatorBallot::LEN
    )]
    pub ballot: Account<'info, LegislatorBallot>,

    #[account(mut)]
    pub legislator: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// `support` backs the challenger.
pub fn process_legislator_vote_dispute(
    ctx: Context<LegislatorVoteDispute>,
    _market_id: u64,
    _round: u32,
    _dispute_id: u32,
    support: bool,
) -> Result<()> {
    let now = SysvarClock.now()?;
    let legislator = ctx.accounts.legislator.key();
    let pool = ctx.accounts.dispute.key();
    let side = Side::from_vote(support);

    let seat = load_optional::<LegislatorSeat>(&ctx.accounts.seat.to_account_info())?;
    let weight = lifecycle::legislator_vote_dispute(
        &ctx.accounts.config,
        &mut ctx.accounts.dispute,
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
