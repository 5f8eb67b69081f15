use anchor_lang::prelude::*;
use crate::errors::{OracleError, OracleResult};

/// Which side of a pool a stake backs. For disputes, `Support` backs the
/// challenger and `Oppose` defends the current verdict.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default, InitSpace)]
pub enum Side {
    #[default]
    Support,
    Oppose,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Support => Side::Oppose,
            Side::Oppose => Side::Support,
        }
    }

    /// PDA seed component for stake records on this side.
    pub fn seed(&self) -> &'static [u8] {
        match self {
            Side::Support => &[0],
            Side::Oppose => &[1],
        }
    }

    pub fn from_vote(support: bool) -> Self {
        if support {
            Side::Support
        } else {
            Side::Oppose
        }
    }
}

/// A stake about to be booked on a pool.
#[derive(Clone, Copy, Debug)]
pub struct Deposit {
    pub pool: Pubkey,
    pub staker: Pubkey,
    pub side: Side,
    pub amount: u64,
    pub bump: u8,
}

/// One account's stake on one side of a resolution or dispute.
/// Never closed: `withdrawn` flips once on claim or withdrawal.
#[account]
#[derive(Default)]
pub struct StakeRecord {
    pub pool: Pubkey,
    pub staker: Pubkey,
    pub side: Side,
    pub amount: u64,
    pub staked_at: i64,
    pub withdrawn: bool,
    pub bump: u8,
}

impl StakeRecord {
    // 8 (discriminator)
    // 32 (pool) + 32 (staker)
    // 1 (side) + 8 (amount) + 8 (staked_at)
    // 1 (withdrawn) + 1 (bump)
    pub const LEN: usize = 8 + 32 + 32 + 1 + 8 + 8 + 1 + 1;

    pub fn is_live(&self) -> bool {
        self.amount > 0 && !self.withdrawn
    }

    /// Create or top up the record. A withdrawn record cannot be reused.
    pub fn deposit(
        &mut self,
        pool: Pubkey,
        staker: Pubkey,
        side: Side,
        amount: u64,
        now: i64,
        bump: u8,
    ) -> OracleResult<()> {
        if self.withdrawn {
            return Err(OracleError::StakeAlreadyWithdrawn);
        }
        if self.amount == 0 {
            self.pool = pool;
            self.staker = staker;
            self.side = side;
            self.bump = bump;
        }
        self.amount = self.amount.checked_add(amount).ok_or(OracleError::MathOverflow)?;
        self.staked_at = now;
        Ok(())
    }

    /// Flip `withdrawn` and hand back the principal.
    pub fn close_out(&mut self) -> OracleResult<u64> {
        if !self.is_live() {
            return Err(OracleError::NothingToClaim);
        }
        self.withdrawn = true;
        Ok(self.amount)
    }
}

/// An account may only back one side of a pool at a time.
pub fn ensure_no_conflict(opposite: Option<&StakeRecord>) -> OracleResult<()> {
    match opposite {
        Some(record) if record.is_live() => Err(OracleError::ConflictingStake),
        _ => Ok(()),
    }
}
