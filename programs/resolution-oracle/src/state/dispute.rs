use anchor_lang::prelude::*;
use crate::constants::MAX_EVIDENCE_URI_LEN;
use crate::errors::{OracleError, OracleResult};
use crate::state::config::{OracleParams, Settlement};
use crate::state::reward::{RewardPool, Routing};
use crate::state::stake::Side;
use crate::state::tally::{self, Ballot};
use crate::utils::math;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default, InitSpace)]
pub enum DisputeStatus {
    #[default]
    Active,
    /// Challenger won; the alternative outcome replaces the current one
    Upheld,
    /// Challenger lost; the bond is slashed
    Overturned,
    /// Challenger cancelled during escalation
    Withdrawn,
}

impl DisputeStatus {
    pub fn transition(self, next: DisputeStatus) -> OracleResult<Self> {
        match (self, next) {
            (DisputeStatus::Active, DisputeStatus::Upheld)
            | (DisputeStatus::Active, DisputeStatus::Overturned)
            | (DisputeStatus::Active, DisputeStatus::Withdrawn) => Ok(next),
            _ => Err(OracleError::InvalidTransition),
        }
    }
}

/// Inputs for a new challenge.
pub struct Challenge {
    pub resolution: Pubkey,
    pub market_id: u64,
    pub dispute_id: u32,
    pub challenger: Pubkey,
    pub challenged_outcome: Option<u8>,
    pub alternative_outcome: u8,
    pub bond: u64,
    pub evidence_uri: String,
    pub evidence_hash: [u8; 32],
}

/// What settling a dispute produced, for the handler to fold into the config.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisputeSettlement {
    pub status: DisputeStatus,
    pub settlement: Settlement,
}

#[account]
#[derive(Default)]
pub struct Dispute {
    pub resolution: Pubkey,
    pub market_id: u64,
    pub dispute_id: u32,
    pub challenger: Pubkey,
    pub challenged_outcome: Option<u8>,
    pub alternative_outcome: u8,
    pub challenge_stake: u64,
    pub created_at: i64,
    pub escalation_ends_at: i64,
    pub resolved_at: Option<i64>,
    /// Backers, challenger bond included
    pub support_stake: u64,
    /// Defenders of the current verdict
    pub opposition_stake: u64,
    pub legislator_support: u32,
    pub legislator_opposition: u32,
    pub legislator_support_weight: u64,
    pub legislator_opposition_weight: u64,
    pub status: DisputeStatus,
    pub evidence_uri: String,
    pub evidence_hash: [u8; 32],
    pub withdrawal_penalty: u64,
    pub rewards: RewardPool,
    pub bump: u8,
}

impl Dispute {
    // 8 (discriminator)
    // 32 (resolution) + 8 (market_id) + 4 (dispute_id) + 32 (challenger)
    // 2 (challenged_outcome option) + 1 (alternative_outcome)
    // 8 (challenge_stake) + 8 (created_at) + 8 (escalation_ends_at) + 9 (resolved_at option)
    // 8 * 2 (stake totals) + 4 * 2 (legislator counts) + 8 * 2 (legislator weights)
    // 1 (status) + 4 + 200 (evidence_uri) + 32 (evidence_hash)
    // 8 (withdrawal_penalty) + rewards + 1 (bump)
    pub const LEN: usize = 8 + 32 + 8 + 4 + 32 + 2 + 1 + 8 + 8 + 8 + 9 + 8 * 2 + 4 * 2 + 8 * 2
        + 1 + (4 + MAX_EVIDENCE_URI_LEN) + 32 + 8 + RewardPool::INIT_SPACE + 1;

    pub fn open(&mut self, challenge: Challenge, escalation_ends_at: i64, now: i64, bump: u8) -> OracleResult<()> {
        if challenge.evidence_uri.len() > MAX_EVIDENCE_URI_LEN {
            return Err(OracleError::EvidenceTooLong);
        }
        *self = Dispute {
            resolution: challenge.resolution,
            market_id: challenge.market_id,
            dispute_id: challenge.dispute_id,
            challenger: challenge.challenger,
            challenged_outcome: challenge.challenged_outcome,
            alternative_outcome: challenge.alternative_outcome,
            challenge_stake: challenge.bond,
            created_at: now,
            escalation_ends_at,
            support_stake: challenge.bond,
            evidence_uri: challenge.evidence_uri,
            evidence_hash: challenge.evidence_hash,
            bump,
            ..Dispute::default()
        };
        Ok(())
    }

    fn require_escalating(&self, now: i64) -> OracleResult<()> {
        if self.status != DisputeStatus::Active {
            return Err(OracleError::WrongPhase);
        }
        if now >= self.escalation_ends_at {
            return Err(OracleError::WindowClosed);
        }
        Ok(())
    }

    pub fn add_stake(&mut self, side: Side, amount: u64, now: i64) -> OracleResult<()> {
        self.require_escalating(now)?;
        if amount == 0 {
            return Err(OracleError::StakeBelowMinimum);
        }
        match side {
            Side::Support => self.support_stake = math::add(self.support_stake, amount)?,
            Side::Oppose => self.opposition_stake = math::add(self.opposition_stake, amount)?,
        }
        Ok(())
    }

    pub fn record_legislator_vote(&mut self, side: Side, weight: u64, now: i64) -> OracleResult<()> {
        self.require_escalating(now)?;
        match side {
            Side::Support => {
                self.legislator_support = self.legislator_support.checked_add(1).ok_or(OracleError::MathOverflow)?;
                self.legislator_support_weight = math::add(self.legislator_support_weight, weight)?;
            }
            Side::Oppose => {
                self.legislator_opposition = self.legislator_opposition.checked_add(1).ok_or(OracleError::MathOverflow)?;
                self.legislator_opposition_weight = math::add(self.legislator_opposition_weight, weight)?;
            }
        }
        Ok(())
    }

    pub fn ballot(&self) -> Ballot {
        Ballot {
            support_stake: self.support_stake,
            opposition_stake: self.opposition_stake,
            legislator_support: self.legislator_support,
            legislator_opposition: self.legislator_opposition,
            legislator_support_weight: self.legislator_support_weight,
            legislator_opposition_weight: self.legislator_opposition_weight,
        }
    }

    /// Adjudicate after escalation. No verdict keeps the status quo.
    pub fn settle(&mut self, params: &OracleParams, now: i64) -> OracleResult<DisputeSettlement> {
        if self.status != DisputeStatus::Active {
            return Err(OracleError::WrongPhase);
        }
        if now < self.escalation_ends_at {
            return Err(OracleError::PeriodNotElapsed);
        }
        let status = match tally::tally(&self.ballot(), params) {
            Ok(verdict) if verdict.winner == Side::Support => DisputeStatus::Upheld,
            Ok(_) | Err(OracleError::QuorumNotReached) => DisputeStatus::Overturned,
            Err(other) => return Err(other),
        };
        self.status = self.status.transition(status)?;
        self.resolved_at = Some(now);

        // A failed challenge's net slash always goes to the resolution's
        // supporters; defenders recover their principal.
        let (winner, winning, losing, routing) = match status {
            DisputeStatus::Upheld => (
                Side::Support,
                self.support_stake,
                self.opposition_stake,
                Routing::WinnersOrTreasury,
            ),
            _ => (Side::Oppose, self.opposition_stake, self.support_stake, Routing::CarryOut),
        };
        let settlement = self.rewards.settle(winner, winning, losing, 0, params.protocol_fee_bps, routing)?;
        Ok(DisputeSettlement { status, settlement })
    }

    /// Challenger cancels; backers and defenders get their stake back,
    /// the challenger forfeits the penalty. Returns the penalty.
    pub fn withdraw(&mut self, params: &OracleParams, caller: &Pubkey, now: i64) -> OracleResult<u64> {
        if *caller != self.challenger {
            return Err(OracleError::NotChallenger);
        }
        self.require_escalating(now)?;
        let penalty = math::bps_of(self.challenge_stake, params.withdrawal_penalty_bps)?;
        self.status = self.status.transition(DisputeStatus::Withdrawn)?;
        self.resolved_at = Some(now);
        self.withdrawal_penalty = penalty;
        self.rewards.refund()?;
        Ok(penalty)
    }

    /// Amount returned on a stake from a withdrawn dispute.
    pub fn refund_due(&self, staker: &Pubkey, principal: u64) -> OracleResult<u64> {
        if *staker == self.challenger {
            return math::sub(principal, self.withdrawal_penalty);
        }
        Ok(principal)
    }

    /// Returns `(principal returned, reward)` for a stake on this dispute.
    pub fn claim(&mut self, side: Side, staker: &Pubkey, principal: u64) -> OracleResult<(u64, u64)> {
        let reward = self.rewards.claim(side, principal)?;
        if self.status == DisputeStatus::Withdrawn {
            return Ok((self.refund_due(staker, principal)?, 0));
        }
        Ok((principal, reward))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ESCALATION_END: i64 = 1_000;

    fn opened(bond: u64) -> Dispute {
        let mut dispute = Dispute::default();
        dispute
            .open(
                Challenge {
                    resolution: Pubkey::new_unique(),
                    market_id: 3,
                    dispute_id: 0,
                    challenger: Pubkey::new_unique(),
                    challenged_outcome: Some(1),
                    alternative_outcome: 0,
                    bond,
                    evidence_uri: String::new(),
                    evidence_hash: [0; 32],
                },
                ESCALATION_END,
                0,
                254,
            )
            .unwrap();
        dispute
    }

    #[test]
    fn status_only_leaves_active_once() {
        assert!(DisputeStatus::Active.transition(DisputeStatus::Upheld).is_ok());
        assert!(DisputeStatus::Upheld.transition(DisputeStatus::Overturned).is_err());
        assert!(DisputeStatus::Active.transition(DisputeStatus::Active).is_err());
    }

    #[test]
    fn unopposed_challenge_is_upheld() {
        let params = OracleParams::default();
        let mut dispute = opened(params.min_stake_for_dispute);
        assert!(matches!(dispute.settle(&params, ESCALATION_END - 1), Err(OracleError::PeriodNotElapsed)));

        let result = dispute.settle(&params, ESCALATION_END).unwrap();
        assert_eq!(result.status, DisputeStatus::Upheld);
        assert_eq!(result.settlement.slashed, 0);
        assert_eq!(dispute.rewards.winning_stake, params.min_stake_for_dispute);
        assert!(matches!(dispute.settle(&params, ESCALATION_END), Err(OracleError::WrongPhase)));
    }

    #[test]
    fn defended_challenge_carries_the_bond_to_supporters() {
        let params = OracleParams::default();
        let bond = params.min_stake_for_dispute;
        let mut dispute = opened(bond);
        let defender = Pubkey::new_unique();
        dispute.add_stake(Side::Oppose, bond * 4, 10).unwrap();

        let result = dispute.settle(&params, ESCALATION_END).unwrap();
        assert_eq!(result.status, DisputeStatus::Overturned);
        let fee = bond * params.protocol_fee_bps as u64 / 10_000;
        assert_eq!(result.settlement.fee, fee);
        assert_eq!(result.settlement.reserved, 0);
        assert_eq!(result.settlement.carried_out, bond - fee);

        let (principal, reward) = dispute.claim(Side::Oppose, &defender, bond * 4).unwrap();
        assert_eq!(principal, bond * 4);
        assert_eq!(reward, 0);
        let challenger = dispute.challenger;
        assert!(matches!(
            dispute.claim(Side::Support, &challenger, bond),
            Err(OracleError::NothingToClaim)
        ));
    }

    #[test]
    fn quorum_miss_keeps_status_quo_and_carries_the_bond() {
        let params = OracleParams { min_quorum_stake: u64::MAX, ..OracleParams::default() };
        let mut dispute = opened(params.min_stake_for_dispute);
        let result = dispute.settle(&params, ESCALATION_END).unwrap();
        assert_eq!(result.status, DisputeStatus::Overturned);
        assert_eq!(
            result.settlement.carried_out + result.settlement.fee,
            params.min_stake_for_dispute
        );
    }

    #[test]
    fn legislators_can_uphold_against_stake() {
        let params = OracleParams { legislator_quorum: 2, ..OracleParams::default() };
        let mut dispute = opened(params.min_stake_for_dispute);
        dispute.add_stake(Side::Oppose, params.min_stake_for_dispute * 10, 1).unwrap();
        dispute.record_legislator_vote(Side::Support, 1, 2).unwrap();
        dispute.record_legislator_vote(Side::Support, 1, 3).unwrap();
        assert_eq!(dispute.settle(&params, ESCALATION_END).unwrap().status, DisputeStatus::Upheld);
    }

    #[test]
    fn withdrawal_forfeits_penalty_and_refunds_others() {
        let params = OracleParams::default();
        let bond = params.min_stake_for_dispute;
        let mut dispute = opened(bond);
        let backer = Pubkey::new_unique();
        dispute.add_stake(Side::Support, 70, 5).unwrap();

        assert!(matches!(dispute.withdraw(&params, &backer, 6), Err(OracleError::NotChallenger)));
        let challenger = dispute.challenger;
        let penalty = dispute.withdraw(&params, &challenger, 6).unwrap();
        assert_eq!(penalty, bond / 10);
        assert_eq!(dispute.status, DisputeStatus::Withdrawn);

        assert_eq!(dispute.claim(Side::Support, &challenger, bond).unwrap(), (bond - penalty, 0));
        assert_eq!(dispute.claim(Side::Support, &backer, 70).unwrap(), (70, 0));
        assert!(matches!(dispute.add_stake(Side::Oppose, 1, 7), Err(OracleError::WrongPhase)));
    }
}
