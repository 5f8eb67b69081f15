use anchor_lang::prelude::*;
use crate::errors::{OracleError, OracleResult};
use crate::state::stake::Side;

/// Written by the election component; the oracle only reads `active` and `weight`.
#[account]
#[derive(Default)]
pub struct LegislatorSeat {
    pub authority: Pubkey,
    pub weight: u64,
    pub active: bool,
    pub updated_at: i64,
    pub bump: u8,
}

impl LegislatorSeat {
    pub const LEN: usize = 8 + 32 + 8 + 1 + 8 + 1;

    /// Weight `legislator` votes with. A missing seat, or one held by
    /// someone else, is not a legislator.
    pub fn weight_of(seat: Option<&LegislatorSeat>, legislator: &Pubkey) -> OracleResult<u64> {
        match seat {
            Some(seat) if seat.authority == *legislator => seat.vote_weight(),
            _ => Err(OracleError::NotLegislator),
        }
    }

    pub fn vote_weight(&self) -> OracleResult<u64> {
        if !self.active || self.weight == 0 {
            return Err(OracleError::NotLegislator);
        }
        Ok(self.weight)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Vote {
    pub pool: Pubkey,
    pub legislator: Pubkey,
    pub side: Side,
    pub bump: u8,
}

/// One legislator's vote on one pool (resolution or dispute).
#[account]
#[derive(Default)]
pub struct LegislatorBallot {
    pub pool: Pubkey,
    pub legislator: Pubkey,
    pub has_voted: bool,
    pub choice: Side,
    pub weight: u64,
    pub bump: u8,
}

impl LegislatorBallot {
    pub const LEN: usize = 8 + 32 + 32 + 1 + 1 + 8 + 1;

    pub fn cast(&mut self, pool: Pubkey, legislator: Pubkey, choice: Side, weight: u64, bump: u8) -> OracleResult<()> {
        if self.has_voted {
            return Err(OracleError::AlreadyVoted);
        }
        *self = LegislatorBallot {
            pool,
            legislator,
            has_voted: true,
            choice,
            weight,
            bump,
        };
        Ok(())
    }
}
