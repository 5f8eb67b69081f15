use anchor_lang::prelude::*;
use crate::constants::MAX_OUTCOMES;
use crate::errors::{OracleError, OracleResult};

/// The oracle's view of a market contract: how many outcomes it has and
/// whether it has been resolved. Written once on registration and once on
/// resolution.
#[account]
#[derive(Default)]
pub struct MarketRecord {
    pub market_id: u64,
    pub registrar: Pubkey,
    pub outcome_count: u8,
    pub resolved: bool,
    pub final_outcome: Option<u8>,
    pub resolved_at: Option<i64>,
    /// Resolution rounds opened so far; the next round index
    pub rounds: u32,
    pub active_round: Option<u32>,
    pub bump: u8,
}

impl MarketRecord {
    // 8 (discriminator)
    // 8 (market_id) + 32 (registrar)
    // 1 (outcome_count) + 1 (resolved)
    // 1+1 (final_outcome option) + 1+8 (resolved_at option)
    // 4 (rounds) + 1+4 (active_round option)
    // 1 (bump)
    pub const LEN: usize = 8 + 8 + 32 + 1 + 1 + 2 + 9 + 4 + 5 + 1;

    pub fn register(&mut self, market_id: u64, registrar: Pubkey, outcome_count: u8, bump: u8) -> OracleResult<()> {
        if outcome_count < 2 || outcome_count > MAX_OUTCOMES {
            return Err(OracleError::InvalidOutcome);
        }
        *self = MarketRecord {
            market_id,
            registrar,
            outcome_count,
            bump,
            ..MarketRecord::default()
        };
        Ok(())
    }

    pub fn validate_outcome(&self, outcome: u8) -> OracleResult<()> {
        if outcome >= self.outcome_count {
            return Err(OracleError::InvalidOutcome);
        }
        Ok(())
    }

    /// Reserve the next round for a new proposal.
    pub fn begin_round(&mut self) -> OracleResult<u32> {
        if self.resolved {
            return Err(OracleError::MarketAlreadyResolved);
        }
        if self.active_round.is_some() {
            return Err(OracleError::ResolutionActive);
        }
        let round = self.rounds;
        self.rounds = self.rounds.checked_add(1).ok_or(OracleError::MathOverflow)?;
        self.active_round = Some(round);
        Ok(round)
    }

    /// Release the active slot (finalized without an outcome, or abandoned).
    pub fn end_round(&mut self, round: u32) -> OracleResult<()> {
        if self.active_round != Some(round) {
            return Err(OracleError::InvalidTransition);
        }
        self.active_round = None;
        Ok(())
    }

    /// Record the final outcome. Happens at most once per market.
    pub fn report(&mut self, round: u32, outcome: u8, now: i64) -> OracleResult<()> {
        if self.resolved {
            return Err(OracleError::MarketAlreadyResolved);
        }
        self.validate_outcome(outcome)?;
        self.end_round(round)?;
        self.resolved = true;
        self.final_outcome = Some(outcome);
        self.resolved_at = Some(now);
        Ok(())
    }
}
