use anchor_lang::prelude::*;
use crate::constants::{MAX_FEED_STALENESS_SECONDS, MAX_RELIABILITY_BPS};
use crate::errors::{OracleError, OracleResult};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default, InitSpace)]
pub enum OracleKind {
    #[default]
    Pyth,
    Switchboard,
    Manual,
}

/// A registered external data feed. Tracked for liveness only; it does not
/// weigh into any tally.
#[account]
#[derive(Default)]
pub struct OracleSource {
    pub kind: OracleKind,
    pub feed: Pubkey,
    pub last_update: i64,
    pub reliability_bps: u16,
    pub active: bool,
    pub bump: u8,
}

impl OracleSource {
    pub const LEN: usize = 8 + 1 + 32 + 8 + 2 + 1 + 1;

    pub fn register(&mut self, kind: OracleKind, feed: Pubkey, reliability_bps: u16, now: i64, bump: u8) -> OracleResult<()> {
        if reliability_bps > MAX_RELIABILITY_BPS {
            return Err(OracleError::InvalidReliability);
        }
        *self = OracleSource {
            kind,
            feed,
            last_update: now,
            reliability_bps,
            active: true,
            bump,
        };
        Ok(())
    }

    /// Accept a feed publish time no older than `MAX_FEED_STALENESS_SECONDS`.
    pub fn refresh(&mut self, publish_time: i64, now: i64) -> OracleResult<()> {
        if !self.active {
            return Err(OracleError::WrongPhase);
        }
        if now.saturating_sub(publish_time) > MAX_FEED_STALENESS_SECONDS {
            return Err(OracleError::OracleStale);
        }
        self.last_update = self.last_update.max(publish_time);
        Ok(())
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}
