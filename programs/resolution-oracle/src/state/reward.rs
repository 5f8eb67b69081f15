//! Pull-based reward ledger.
//!
//! A pool is settled once: the losing side is slashed, the protocol fee is
//! taken off the top and the remainder becomes a fixed per-unit `rate`.
//! Claims are O(1) and the last outstanding winner sweeps the rounding dust,
//! so the rewards paid plus the fee always add up to what was slashed.

use anchor_lang::prelude::*;
use crate::constants::PRECISION;
use crate::errors::{OracleError, OracleResult};
use crate::state::config::Settlement;
use crate::state::stake::Side;
use crate::utils::math;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default, InitSpace)]
pub enum PoolState {
    #[default]
    Open,
    Settled,
    /// Every stake is returned at face value (withdrawn dispute)
    Refunding,
}

/// Where a pool's net slash goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Routing {
    /// Winners split it; with no winning stake it becomes protocol fee
    WinnersOrTreasury,
    /// Winners split it; with no winning stake it is carried out
    WinnersOrCarry,
    /// Always carried out to the parent resolution; winners recover principal only
    CarryOut,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default, InitSpace)]
pub struct RewardPool {
    pub state: PoolState,
    pub winner: Side,
    pub winning_stake: u64,
    pub slashed: u64,
    pub fee: u64,
    /// Reward per unit of winning stake, scaled by PRECISION
    pub rate: u128,
    pub reward_total: u64,
    pub reward_remaining: u64,
    pub winning_outstanding: u64,
}

impl RewardPool {
    pub fn settle(
        &mut self,
        winner: Side,
        winning_stake: u64,
        losing_stake: u64,
        carried_in: u64,
        fee_bps: u16,
        routing: Routing,
    ) -> OracleResult<Settlement> {
        if self.state != PoolState::Open {
            return Err(OracleError::InvalidTransition);
        }
        let fee = math::bps_of(losing_stake, fee_bps)?;
        let net = math::add(math::sub(losing_stake, fee)?, carried_in)?;

        let mut settlement = Settlement {
            slashed: losing_stake,
            fee,
            reserved: 0,
            carried_in,
            carried_out: 0,
        };
        match routing {
            Routing::CarryOut => settlement.carried_out = net,
            Routing::WinnersOrTreasury if winning_stake == 0 => settlement.fee = math::add(fee, net)?,
            Routing::WinnersOrCarry if winning_stake == 0 => settlement.carried_out = net,
            _ => settlement.reserved = net,
        }
        self.rate = if settlement.reserved == 0 {
            0
        } else {
            math::mul_div(settlement.reserved as u128, PRECISION, winning_stake as u128)?
        };

        self.state = PoolState::Settled;
        self.winner = winner;
        self.winning_stake = winning_stake;
        self.slashed = losing_stake;
        self.fee = settlement.fee;
        self.reward_total = settlement.reserved;
        self.reward_remaining = settlement.reserved;
        self.winning_outstanding = winning_stake;
        Ok(settlement)
    }

    /// Fold value carried in after settlement into the reward, before any
    /// winner has claimed. Used when a resolution's net slash has no
    /// resolution-side winner and passes to its last upheld dispute.
    pub fn add_bonus(&mut self, amount: u64) -> OracleResult<Settlement> {
        if self.state != PoolState::Settled
            || self.winning_stake == 0
            || self.winning_outstanding != self.winning_stake
        {
            return Err(OracleError::InvalidTransition);
        }
        self.reward_total = math::add(self.reward_total, amount)?;
        self.reward_remaining = math::add(self.reward_remaining, amount)?;
        self.rate = math::mul_div(self.reward_total as u128, PRECISION, self.winning_stake as u128)?;
        Ok(Settlement {
            reserved: amount,
            carried_in: amount,
            ..Settlement::default()
        })
    }

    pub fn refund(&mut self) -> OracleResult<()> {
        if self.state != PoolState::Open {
            return Err(OracleError::InvalidTransition);
        }
        self.state = PoolState::Refunding;
        Ok(())
    }

    /// Reward owed on `principal` staked on `side`. The caller returns the
    /// principal alongside it and marks the record withdrawn.
    pub fn claim(&mut self, side: Side, principal: u64) -> OracleResult<u64> {
        match self.state {
            PoolState::Open => Err(OracleError::NotFinalized),
            PoolState::Refunding => Ok(0),
            PoolState::Settled => {
                if side != self.winner || principal == 0 {
                    return Err(OracleError::NothingToClaim);
                }
                let reward = if principal >= self.winning_outstanding {
                    self.reward_remaining
                } else {
                    let owed = math::mul_div(principal as u128, self.rate, PRECISION)?;
                    math::to_u64(owed)?.min(self.reward_remaining)
                };
                self.winning_outstanding = math::sub(self.winning_outstanding, principal)?;
                self.reward_remaining = math::sub(self.reward_remaining, reward)?;
                Ok(reward)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_comes_off_the_top_and_rate_is_fixed() {
        let mut pool = RewardPool::default();
        let settlement = pool
            .settle(Side::Support, 400, 200, 0, 500, Routing::WinnersOrTreasury)
            .unwrap();
        assert_eq!(settlement.slashed, 200);
        assert_eq!(settlement.fee, 10);
        assert_eq!(settlement.reserved, 190);
        assert_eq!(pool.rate, 190 * PRECISION / 400);
    }

    #[test]
    fn claims_sum_exactly_to_the_reserved_pool() {
        let mut pool = RewardPool::default();
        // 100 / 3 does not divide evenly
        let settlement = pool
            .settle(Side::Oppose, 300, 100, 0, 0, Routing::WinnersOrTreasury)
            .unwrap();
        let paid: u64 = [100, 100, 100]
            .iter()
            .map(|stake| pool.claim(Side::Oppose, *stake).unwrap())
            .sum();
        assert_eq!(paid, settlement.reserved);
        assert_eq!(pool.reward_remaining, 0);
        assert_eq!(pool.winning_outstanding, 0);
    }

    #[test]
    fn losing_side_and_open_pool_cannot_claim() {
        let mut pool = RewardPool::default();
        assert!(matches!(pool.claim(Side::Support, 10), Err(OracleError::NotFinalized)));
        pool.settle(Side::Support, 10, 10, 0, 0, Routing::WinnersOrTreasury).unwrap();
        assert!(matches!(pool.claim(Side::Oppose, 10), Err(OracleError::NothingToClaim)));
    }

    #[test]
    fn orphaned_slash_goes_to_treasury_or_carries() {
        let mut pool = RewardPool::default();
        let settlement = pool
            .settle(Side::Oppose, 0, 1_000, 0, 500, Routing::WinnersOrTreasury)
            .unwrap();
        assert_eq!(settlement.fee, 1_000);
        assert_eq!(settlement.reserved, 0);

        let mut pool = RewardPool::default();
        let settlement = pool
            .settle(Side::Oppose, 0, 1_000, 0, 500, Routing::WinnersOrCarry)
            .unwrap();
        assert_eq!(settlement.fee, 50);
        assert_eq!(settlement.carried_out, 950);
    }

    #[test]
    fn carried_value_joins_the_winning_pool() {
        let mut pool = RewardPool::default();
        let settlement = pool
            .settle(Side::Support, 500, 0, 950, 500, Routing::WinnersOrTreasury)
            .unwrap();
        assert_eq!(settlement.reserved, 950);
        assert_eq!(pool.claim(Side::Support, 500).unwrap(), 950);
    }

    #[test]
    fn carry_out_leaves_winners_their_principal() {
        let mut pool = RewardPool::default();
        let settlement = pool
            .settle(Side::Oppose, 1_200, 600, 0, 500, Routing::CarryOut)
            .unwrap();
        assert_eq!(settlement.fee, 30);
        assert_eq!(settlement.reserved, 0);
        assert_eq!(settlement.carried_out, 570);
        assert_eq!(pool.claim(Side::Oppose, 1_200).unwrap(), 0);
        assert!(matches!(pool.claim(Side::Support, 600), Err(OracleError::NothingToClaim)));
    }

    #[test]
    fn bonus_joins_an_unclaimed_pool_only() {
        let mut pool = RewardPool::default();
        pool.settle(Side::Support, 600, 0, 0, 500, Routing::WinnersOrTreasury).unwrap();
        let folded = pool.add_bonus(285).unwrap();
        assert_eq!((folded.reserved, folded.carried_in), (285, 285));
        assert_eq!(pool.rate, 285 * PRECISION / 600);
        assert_eq!(pool.claim(Side::Support, 200).unwrap(), 95);
        assert!(matches!(pool.add_bonus(1), Err(OracleError::InvalidTransition)));
        assert_eq!(pool.claim(Side::Support, 400).unwrap(), 190);
    }

    #[test]
    fn settle_is_one_shot_and_refund_pays_principal_only() {
        let mut pool = RewardPool::default();
        pool.refund().unwrap();
        assert_eq!(pool.claim(Side::Oppose, 10).unwrap(), 0);
        assert!(pool.settle(Side::Support, 1, 1, 0, 0, Routing::WinnersOrTreasury).is_err());
    }

    #[test]
    fn zero_reward_claim_still_succeeds() {
        let mut pool = RewardPool::default();
        pool.settle(Side::Support, 400, 0, 0, 500, Routing::WinnersOrTreasury).unwrap();
        assert_eq!(pool.claim(Side::Support, 100).unwrap(), 0);
    }
}
