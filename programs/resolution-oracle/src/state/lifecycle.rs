//! Guard and effect sequence of every staking instruction.
//!
//! Handlers load accounts, take the resolution lock, call one function here
//! and then move tokens. Nothing in this module touches the vault, so each
//! function is the whole state change of its instruction.

use anchor_lang::prelude::*;
use crate::errors::{OracleError, OracleResult};
use crate::state::config::{OracleConfig, Settlement};
use crate::state::dispute::{Challenge, Dispute, DisputeSettlement, DisputeStatus};
use crate::state::legislator::{LegislatorBallot, LegislatorSeat, Vote};
use crate::state::market::MarketRecord;
use crate::state::resolution::{Proposal, Resolution};
use crate::state::stake::{ensure_no_conflict, Deposit, Side, StakeRecord};
use crate::state::tally::Verdict;

/// Inputs for a new dispute, as supplied by the challenger.
pub struct DisputeRequest {
    pub challenger: Pubkey,
    pub alternative_outcome: u8,
    pub bond: u64,
    pub evidence_uri: String,
    pub evidence_hash: [u8; 32],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Finalization {
    pub winner: Side,
    pub outcome: Option<u8>,
    pub settlement: Settlement,
    /// Net slash folded into the last upheld dispute's reward pool
    pub routed_to_dispute: u64,
}

fn bump_counter(counter: &mut u64) -> OracleResult<()> {
    *counter = counter.checked_add(1).ok_or(OracleError::MathOverflow)?;
    Ok(())
}

/// Open the market's next round with the proposer's stake. Returns the round.
#[allow(clippy::too_many_arguments)]
pub fn propose_resolution(
    config: &mut OracleConfig,
    market: &mut MarketRecord,
    resolution: &mut Resolution,
    pool: Pubkey,
    record: &mut StakeRecord,
    proposal: Proposal,
    now: i64,
    resolution_bump: u8,
    record_bump: u8,
) -> OracleResult<u32> {
    config.require_active()?;
    market.validate_outcome(proposal.outcome)?;
    let round = market.begin_round()?;
    let proposer = proposal.proposer;
    let stake = proposal.stake;
    resolution.open(&config.params, market.market_id, round, proposal, now, resolution_bump)?;
    record.deposit(pool, proposer, Side::Support, stake, now, record_bump)?;
    bump_counter(&mut config.total_resolutions)?;
    Ok(round)
}

/// Returns the new total of the side staked on.
pub fn stake_resolution(
    config: &OracleConfig,
    resolution: &mut Resolution,
    record: &mut StakeRecord,
    opposite: Option<&StakeRecord>,
    deposit: Deposit,
    now: i64,
) -> OracleResult<u64> {
    config.require_active()?;
    ensure_no_conflict(opposite)?;
    resolution.add_stake(&config.params, deposit.side, deposit.amount, now)?;
    record.deposit(deposit.pool, deposit.staker, deposit.side, deposit.amount, now, deposit.bump)?;
    Ok(match deposit.side {
        Side::Support => resolution.support_stake,
        Side::Oppose => resolution.opposition_stake,
    })
}

/// Returns the principal to pay back.
pub fn withdraw_stake(
    config: &OracleConfig,
    resolution: &mut Resolution,
    record: &mut StakeRecord,
    now: i64,
) -> OracleResult<u64> {
    config.require_active()?;
    if !record.is_live() {
        return Err(OracleError::NothingToClaim);
    }
    resolution.remove_stake(&config.params, record.side, record.amount, &record.staker, now)?;
    record.close_out()
}

/// Returns the weight counted.
pub fn legislator_vote(
    config: &OracleConfig,
    resolution: &mut Resolution,
    seat: Option<&LegislatorSeat>,
    ballot: &mut LegislatorBallot,
    vote: Vote,
    now: i64,
) -> OracleResult<u64> {
    config.require_active()?;
    let weight = LegislatorSeat::weight_of(seat, &vote.legislator)?;
    ballot.cast(vote.pool, vote.legislator, vote.side, weight, vote.bump)?;
    resolution.record_legislator_vote(&config.params, vote.side, weight, now)?;
    Ok(weight)
}

pub fn tally_resolution(config: &OracleConfig, resolution: &mut Resolution, now: i64) -> OracleResult<Verdict> {
    config.require_active()?;
    resolution.tally(&config.params, now)
}

pub fn abandon_resolution(
    config: &OracleConfig,
    market: &mut MarketRecord,
    resolution: &mut Resolution,
    now: i64,
) -> OracleResult<()> {
    config.require_active()?;
    resolution.abandon(&config.params, now)?;
    market.end_round(resolution.round)
}

/// Settle the resolution pool and report the outcome. A net slash the
/// resolution's winners cannot take goes to the last upheld dispute, which
/// must be passed as `upheld`.
pub fn finalize_resolution(
    config: &mut OracleConfig,
    market: &mut MarketRecord,
    resolution: &mut Resolution,
    resolution_key: Pubkey,
    upheld: Option<&mut Dispute>,
    now: i64,
) -> OracleResult<Finalization> {
    config.require_active()?;
    let params = config.params;
    let (winner, settlement) = resolution.finalize(&params, now)?;
    config.record_settlement(&settlement)?;

    let mut routed_to_dispute = 0;
    if settlement.carried_out > 0 {
        let dispute = match upheld {
            Some(dispute)
                if dispute.resolution == resolution_key
                    && resolution.last_upheld == Some(dispute.dispute_id) =>
            {
                dispute
            }
            _ => return Err(OracleError::WrongDispute),
        };
        let bonus = dispute.rewards.add_bonus(settlement.carried_out)?;
        config.record_settlement(&bonus)?;
        routed_to_dispute = bonus.reserved;
    }

    match resolution.current_outcome {
        Some(outcome) => {
            market.report(resolution.round, outcome, now)?;
            bump_counter(&mut config.successful_resolutions)?;
        }
        // Rejected: the market stays open for a new proposal.
        None => market.end_round(resolution.round)?,
    }
    Ok(Finalization {
        winner,
        outcome: resolution.current_outcome,
        settlement,
        routed_to_dispute,
    })
}

/// Challenge the current verdict with the challenger's bond. Returns the dispute id.
#[allow(clippy::too_many_arguments)]
pub fn dispute_resolution(
    config: &mut OracleConfig,
    market: &MarketRecord,
    resolution: &mut Resolution,
    resolution_key: Pubkey,
    dispute: &mut Dispute,
    dispute_key: Pubkey,
    record: &mut StakeRecord,
    request: DisputeRequest,
    now: i64,
    dispute_bump: u8,
    record_bump: u8,
) -> OracleResult<u32> {
    config.require_active()?;
    market.validate_outcome(request.alternative_outcome)?;
    let params = config.params;
    let dispute_id = resolution.open_dispute(&params, request.alternative_outcome, request.bond, now)?;
    dispute.open(
        Challenge {
            resolution: resolution_key,
            market_id: resolution.market_id,
            dispute_id,
            challenger: request.challenger,
            challenged_outcome: resolution.current_outcome,
            alternative_outcome: request.alternative_outcome,
            bond: request.bond,
            evidence_uri: request.evidence_uri,
            evidence_hash: request.evidence_hash,
        },
        resolution.escalation_ends_at,
        now,
        dispute_bump,
    )?;
    record.deposit(dispute_key, request.challenger, Side::Support, request.bond, now, record_bump)?;
    bump_counter(&mut config.total_disputes)?;
    Ok(dispute_id)
}

pub fn back_dispute(
    config: &OracleConfig,
    dispute: &mut Dispute,
    record: &mut StakeRecord,
    opposite: Option<&StakeRecord>,
    deposit: Deposit,
    now: i64,
) -> OracleResult<()> {
    config.require_active()?;
    ensure_no_conflict(opposite)?;
    dispute.add_stake(deposit.side, deposit.amount, now)?;
    record.deposit(deposit.pool, deposit.staker, deposit.side, deposit.amount, now, deposit.bump)
}

pub fn legislator_vote_dispute(
    config: &OracleConfig,
    dispute: &mut Dispute,
    seat: Option<&LegislatorSeat>,
    ballot: &mut LegislatorBallot,
    vote: Vote,
    now: i64,
) -> OracleResult<u64> {
    config.require_active()?;
    let weight = LegislatorSeat::weight_of(seat, &vote.legislator)?;
    ballot.cast(vote.pool, vote.legislator, vote.side, weight, vote.bump)?;
    dispute.record_legislator_vote(vote.side, weight, now)?;
    Ok(weight)
}

pub fn settle_dispute(
    config: &mut OracleConfig,
    resolution: &mut Resolution,
    dispute: &mut Dispute,
    now: i64,
) -> OracleResult<DisputeSettlement> {
    config.require_active()?;
    let params = config.params;
    let result = dispute.settle(&params, now)?;
    resolution.apply_dispute(dispute, now)?;
    resolution.add_carry(result.settlement.carried_out)?;
    config.record_settlement(&result.settlement)?;
    if result.status == DisputeStatus::Upheld {
        bump_counter(&mut config.overturned_resolutions)?;
    }
    Ok(result)
}

/// Returns the penalty kept as protocol fee.
pub fn withdraw_dispute(
    config: &mut OracleConfig,
    resolution: &mut Resolution,
    dispute: &mut Dispute,
    caller: &Pubkey,
    now: i64,
) -> OracleResult<u64> {
    config.require_active()?;
    let params = config.params;
    let penalty = dispute.withdraw(&params, caller, now)?;
    resolution.apply_dispute(dispute, now)?;
    config.record_settlement(&Settlement {
        slashed: penalty,
        fee: penalty,
        ..Settlement::default()
    })?;
    Ok(penalty)
}

/// Returns `(principal, reward)` owed on a resolution stake.
pub fn claim_resolution_reward(
    config: &mut OracleConfig,
    resolution: &mut Resolution,
    record: &mut StakeRecord,
    side: Side,
) -> OracleResult<(u64, u64)> {
    config.require_active()?;
    if record.side != side || !record.is_live() {
        return Err(OracleError::NothingToClaim);
    }
    let principal = record.amount;
    let reward = resolution.claim(side, principal)?;
    record.close_out()?;
    config.record_claim(reward)?;
    Ok((principal, reward))
}

/// Returns `(principal, reward)` owed on a dispute stake. Settled disputes
/// pay out once their resolution is final; withdrawn ones refund at once.
pub fn claim_dispute_reward(
    config: &mut OracleConfig,
    resolution: &Resolution,
    dispute: &mut Dispute,
    record: &mut StakeRecord,
) -> OracleResult<(u64, u64)> {
    config.require_active()?;
    if !record.is_live() {
        return Err(OracleError::NothingToClaim);
    }
    if dispute.status != DisputeStatus::Withdrawn && !resolution.finalized {
        return Err(OracleError::NotFinalized);
    }
    let (principal, reward) = dispute.claim(record.side, &record.staker, record.amount)?;
    record.close_out()?;
    config.record_claim(reward)?;
    Ok((principal, reward))
}
