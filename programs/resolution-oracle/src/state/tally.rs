//! Vote aggregation: turns stake totals and legislator ballots into a verdict.
//!
//! Legislators override stakers once their turnout reaches `legislator_quorum`;
//! otherwise the stake majority decides if it clears both the absolute
//! `min_quorum_stake` floor and the `stake_quorum` share. Exact ties never
//! produce a winner.

use anchor_lang::prelude::*;
use crate::constants::PRECISION;
use crate::errors::{OracleError, OracleResult};
use crate::state::config::OracleParams;
use crate::state::stake::Side;

/// Snapshot of everything a pool has accumulated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Ballot {
    pub support_stake: u64,
    pub opposition_stake: u64,
    pub legislator_support: u32,
    pub legislator_opposition: u32,
    pub legislator_support_weight: u64,
    pub legislator_opposition_weight: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum TallyBasis {
    Legislators,
    Stake,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Verdict {
    pub winner: Side,
    pub basis: TallyBasis,
}

pub fn tally(ballot: &Ballot, params: &OracleParams) -> OracleResult<Verdict> {
    if let Some(winner) = legislator_majority(ballot, params.legislator_quorum) {
        return Ok(Verdict { winner, basis: TallyBasis::Legislators });
    }
    if let Some(winner) = stake_majority(ballot, params)? {
        return Ok(Verdict { winner, basis: TallyBasis::Stake });
    }
    Err(OracleError::QuorumNotReached)
}

fn legislator_majority(ballot: &Ballot, quorum: u32) -> Option<Side> {
    let turnout = ballot.legislator_support.saturating_add(ballot.legislator_opposition);
    if turnout < quorum {
        return None;
    }
    pick(ballot.legislator_support_weight, ballot.legislator_opposition_weight)
}

fn stake_majority(ballot: &Ballot, params: &OracleParams) -> OracleResult<Option<Side>> {
    let total = ballot
        .support_stake
        .checked_add(ballot.opposition_stake)
        .ok_or(OracleError::MathOverflow)?;
    if total == 0 || total < params.min_quorum_stake {
        return Ok(None);
    }
    let Some(winner) = pick(ballot.support_stake, ballot.opposition_stake) else {
        return Ok(None);
    };
    let leading = ballot.support_stake.max(ballot.opposition_stake) as u128;
    let have = leading.checked_mul(PRECISION).ok_or(OracleError::MathOverflow)?;
    let need = params
        .stake_quorum
        .checked_mul(total as u128)
        .ok_or(OracleError::MathOverflow)?;
    Ok((have >= need).then_some(winner))
}

fn pick(support: u64, opposition: u64) -> Option<Side> {
    match support.cmp(&opposition) {
        std::cmp::Ordering::Greater => Some(Side::Support),
        std::cmp::Ordering::Less => Some(Side::Oppose),
        std::cmp::Ordering::Equal => None,
    }
}
