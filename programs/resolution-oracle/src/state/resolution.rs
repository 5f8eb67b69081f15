use anchor_lang::prelude::*;
use crate::clock::{Phase, PhaseClock};
use crate::constants::MAX_EVIDENCE_URI_LEN;
use crate::errors::{OracleError, OracleResult};
use crate::state::config::{OracleParams, Settlement};
use crate::state::dispute::{Dispute, DisputeStatus};
use crate::state::reward::{RewardPool, Routing};
use crate::state::stake::Side;
use crate::state::tally::{self, Ballot, Verdict};
use crate::utils::math;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default, InitSpace)]
pub enum ResolutionStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Disputed,
    /// Last dispute succeeded; the outcome was replaced
    Upheld,
    /// Last dispute failed; the outcome stands
    Overturned,
    Finalized,
    Abandoned,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolutionEvent {
    Tallied(Side),
    Abandon,
    DisputeOpened,
    DisputeUpheld,
    DisputeOverturned,
    DisputeWithdrawn { restore: ResolutionStatus },
    Finalize,
}

impl ResolutionStatus {
    /// Tallied and not currently under dispute.
    pub fn is_verdict(self) -> bool {
        matches!(
            self,
            ResolutionStatus::Approved
                | ResolutionStatus::Rejected
                | ResolutionStatus::Upheld
                | ResolutionStatus::Overturned
        )
    }

    pub fn transition(self, event: ResolutionEvent) -> OracleResult<Self> {
        use ResolutionEvent as E;
        use ResolutionStatus as S;
        match (self, event) {
            (S::Pending, E::Tallied(Side::Support)) => Ok(S::Approved),
            (S::Pending, E::Tallied(Side::Oppose)) => Ok(S::Rejected),
            (S::Pending, E::Abandon) => Ok(S::Abandoned),
            (s, E::DisputeOpened) if s.is_verdict() => Ok(S::Disputed),
            (S::Disputed, E::DisputeUpheld) => Ok(S::Upheld),
            (S::Disputed, E::DisputeOverturned) => Ok(S::Overturned),
            (S::Disputed, E::DisputeWithdrawn { restore }) if restore.is_verdict() => Ok(restore),
            (s, E::Finalize) if s.is_verdict() => Ok(S::Finalized),
            (S::Finalized, _) => Err(OracleError::AlreadyFinalized),
            _ => Err(OracleError::InvalidTransition),
        }
    }
}

/// Inputs for a new proposal.
pub struct Proposal {
    pub proposer: Pubkey,
    pub outcome: u8,
    pub evidence_uri: String,
    pub evidence_hash: [u8; 32],
    pub stake: u64,
}

#[account]
#[derive(Default)]
pub struct Resolution {
    pub market_id: u64,
    pub round: u32,
    pub proposer: Pubkey,
    pub proposed_outcome: u8,
    /// Outcome the market would resolve to if finalized now; `None` after a rejection
    pub current_outcome: Option<u8>,
    pub status: ResolutionStatus,
    pub pre_dispute_status: ResolutionStatus,
    pub proposed_at: i64,
    /// Start of the current dispute window
    pub verdict_at: i64,
    pub escalation_ends_at: i64,
    pub finalized_at: i64,
    pub support_stake: u64,
    pub opposition_stake: u64,
    pub legislator_support: u32,
    pub legislator_opposition: u32,
    pub legislator_support_weight: u64,
    pub legislator_opposition_weight: u64,
    pub finalized: bool,
    pub disputed: bool,
    pub dispute_count: u32,
    /// Net dispute slashes with no dispute-side winner, paid to this pool's winners
    pub carried_rewards: u64,
    /// Id of the most recent upheld dispute, whose backers take a net slash
    /// the resolution's winners cannot
    pub last_upheld: Option<u32>,
    pub evidence_uri: String,
    pub evidence_hash: [u8; 32],
    pub rewards: RewardPool,
    pub locked: bool,
    pub bump: u8,
}

impl Resolution {
    // 8 (discriminator)
    // 8 (market_id) + 4 (round) + 32 (proposer)
    // 1 (proposed_outcome) + 2 (current_outcome option)
    // 1 (status) + 1 (pre_dispute_status)
    // 8 * 4 (timestamps)
    // 8 * 2 (stake totals) + 4 * 2 (legislator counts) + 8 * 2 (legislator weights)
    // 1 (finalized) + 1 (disputed) + 4 (dispute_count) + 8 (carried_rewards)
    // 5 (last_upheld option)
    // 4 + 200 (evidence_uri) + 32 (evidence_hash)
    // rewards
    // 1 (locked) + 1 (bump)
    pub const LEN: usize = 8 + 8 + 4 + 32 + 1 + 2 + 1 + 1 + 8 * 4 + 8 * 2 + 4 * 2 + 8 * 2
        + 1 + 1 + 4 + 8 + 5 + (4 + MAX_EVIDENCE_URI_LEN) + 32 + RewardPool::INIT_SPACE + 1 + 1;

    pub fn open(
        &mut self,
        params: &OracleParams,
        market_id: u64,
        round: u32,
        proposal: Proposal,
        now: i64,
        bump: u8,
    ) -> OracleResult<()> {
        if proposal.stake < params.min_stake_for_resolution {
            return Err(OracleError::StakeBelowMinimum);
        }
        if proposal.evidence_uri.len() > MAX_EVIDENCE_URI_LEN {
            return Err(OracleError::EvidenceTooLong);
        }
        *self = Resolution {
            market_id,
            round,
            proposer: proposal.proposer,
            proposed_outcome: proposal.outcome,
            proposed_at: now,
            support_stake: proposal.stake,
            evidence_uri: proposal.evidence_uri,
            evidence_hash: proposal.evidence_hash,
            bump,
            ..Resolution::default()
        };
        Ok(())
    }

    pub fn lock(&mut self) -> OracleResult<()> {
        if self.locked {
            return Err(OracleError::Reentrancy);
        }
        self.locked = true;
        Ok(())
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    pub fn add_stake(&mut self, params: &OracleParams, side: Side, amount: u64, now: i64) -> OracleResult<()> {
        PhaseClock::new(params).require(self, now, Phase::Voting)?;
        if amount == 0 {
            return Err(OracleError::StakeBelowMinimum);
        }
        let total = self.side_total_mut(side);
        *total = math::add(*total, amount)?;
        Ok(())
    }

    /// Voluntary withdrawal: only while voting is open, or after abandonment.
    pub fn remove_stake(
        &mut self,
        params: &OracleParams,
        side: Side,
        amount: u64,
        staker: &Pubkey,
        now: i64,
    ) -> OracleResult<()> {
        if self.status != ResolutionStatus::Abandoned {
            PhaseClock::new(params).require(self, now, Phase::Voting)?;
            if *staker == self.proposer && side == Side::Support {
                return Err(OracleError::ProposerStakeLocked);
            }
        }
        let total = self.side_total_mut(side);
        *total = math::sub(*total, amount)?;
        Ok(())
    }

    pub fn record_legislator_vote(
        &mut self,
        params: &OracleParams,
        side: Side,
        weight: u64,
        now: i64,
    ) -> OracleResult<()> {
        PhaseClock::new(params).require(self, now, Phase::Voting)?;
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

    pub fn tally(&mut self, params: &OracleParams, now: i64) -> OracleResult<Verdict> {
        let clock = PhaseClock::new(params);
        clock.require(self, now, Phase::Tallyable)?;
        let verdict = tally::tally(&self.ballot(), params)?;
        self.status = self.status.transition(ResolutionEvent::Tallied(verdict.winner))?;
        self.current_outcome = match verdict.winner {
            Side::Support => Some(self.proposed_outcome),
            Side::Oppose => None,
        };
        // Pinned to the end of voting so the dispute window does not depend on keeper latency.
        self.verdict_at = clock.voting_ends_at(self.proposed_at);
        Ok(verdict)
    }

    /// Tally if still pending; no-op once a verdict exists.
    pub fn ensure_tallied(&mut self, params: &OracleParams, now: i64) -> OracleResult<Option<Verdict>> {
        if self.status != ResolutionStatus::Pending {
            return Ok(None);
        }
        self.tally(params, now).map(Some)
    }

    pub fn abandon(&mut self, params: &OracleParams, now: i64) -> OracleResult<()> {
        PhaseClock::new(params).require(self, now, Phase::Tallyable)?;
        match tally::tally(&self.ballot(), params) {
            Ok(_) => Err(OracleError::WrongPhase),
            Err(OracleError::QuorumNotReached) => {
                self.status = self.status.transition(ResolutionEvent::Abandon)?;
                Ok(())
            }
            Err(other) => Err(other),
        }
    }

    /// Validate a challenge and move to `Disputed`. Returns the new dispute id.
    pub fn open_dispute(
        &mut self,
        params: &OracleParams,
        alternative_outcome: u8,
        bond: u64,
        now: i64,
    ) -> OracleResult<u32> {
        let clock = PhaseClock::new(params);
        self.ensure_tallied(params, now)?;
        clock.require(self, now, Phase::DisputeWindow)?;
        if self.dispute_count >= params.max_disputes {
            return Err(OracleError::TooManyDisputes);
        }
        if self.current_outcome == Some(alternative_outcome) {
            return Err(OracleError::InvalidOutcome);
        }
        if bond < params.required_bond(self.support_stake)? {
            return Err(OracleError::BondTooSmall);
        }

        self.pre_dispute_status = self.status;
        self.status = self.status.transition(ResolutionEvent::DisputeOpened)?;
        self.disputed = true;
        self.escalation_ends_at = clock.escalation_ends_at(now);
        let dispute_id = self.dispute_count;
        self.dispute_count += 1;
        Ok(dispute_id)
    }

    /// Fold a terminal dispute back into the resolution and restart the dispute window.
    pub fn apply_dispute(&mut self, dispute: &Dispute, now: i64) -> OracleResult<()> {
        let event = match dispute.status {
            DisputeStatus::Upheld => ResolutionEvent::DisputeUpheld,
            DisputeStatus::Overturned => ResolutionEvent::DisputeOverturned,
            DisputeStatus::Withdrawn => ResolutionEvent::DisputeWithdrawn { restore: self.pre_dispute_status },
            DisputeStatus::Active => return Err(OracleError::InvalidTransition),
        };
        self.status = self.status.transition(event)?;
        if dispute.status == DisputeStatus::Upheld {
            self.current_outcome = Some(dispute.alternative_outcome);
            self.last_upheld = Some(dispute.dispute_id);
        }
        self.verdict_at = now;
        self.escalation_ends_at = 0;
        Ok(())
    }

    pub fn add_carry(&mut self, amount: u64) -> OracleResult<()> {
        self.carried_rewards = math::add(self.carried_rewards, amount)?;
        Ok(())
    }

    /// Supporters win only if the market would resolve to what they backed.
    pub fn winner(&self) -> Side {
        if self.current_outcome == Some(self.proposed_outcome) {
            Side::Support
        } else {
            Side::Oppose
        }
    }

    pub fn finalize(&mut self, params: &OracleParams, now: i64) -> OracleResult<(Side, Settlement)> {
        if self.finalized {
            return Err(OracleError::AlreadyFinalized);
        }
        self.ensure_tallied(params, now)?;
        PhaseClock::new(params).require(self, now, Phase::Finalizable)?;
        self.status = self.status.transition(ResolutionEvent::Finalize)?;
        self.finalized = true;
        self.finalized_at = now;

        let winner = self.winner();
        let (winning, losing) = match winner {
            Side::Support => (self.support_stake, self.opposition_stake),
            Side::Oppose => (self.opposition_stake, self.support_stake),
        };
        let routing = if self.last_upheld.is_some() {
            Routing::WinnersOrCarry
        } else {
            Routing::WinnersOrTreasury
        };
        let settlement = self.rewards.settle(
            winner,
            winning,
            losing,
            self.carried_rewards,
            params.protocol_fee_bps,
            routing,
        )?;
        self.carried_rewards = 0;
        Ok((winner, settlement))
    }

    /// Reward owed on a resolution stake; the caller repays the principal too.
    pub fn claim(&mut self, side: Side, principal: u64) -> OracleResult<u64> {
        if !self.finalized {
            let tallied = self.status.is_verdict() || self.status == ResolutionStatus::Disputed;
            if tallied && self.winner() != side {
                return Err(OracleError::NothingToClaim);
            }
            return Err(OracleError::NotFinalized);
        }
        let reward = self.rewards.claim(side, principal)?;
        let total = self.side_total_mut(side);
        *total = math::sub(*total, principal)?;
        Ok(reward)
    }

    fn side_total_mut(&mut self, side: Side) -> &mut u64 {
        match side {
            Side::Support => &mut self.support_stake,
            Side::Oppose => &mut self.opposition_stake,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proposal(stake: u64) -> Proposal {
        Proposal {
            proposer: Pubkey::new_unique(),
            outcome: 1,
            evidence_uri: "ipfs://evidence".to_string(),
            evidence_hash: [9; 32],
            stake,
        }
    }

    fn opened(params: &OracleParams, stake: u64) -> Resolution {
        let mut resolution = Resolution::default();
        resolution.open(params, 7, 0, proposal(stake), 0, 255).unwrap();
        resolution
    }

    #[test]
    fn transition_table_rejects_unmodelled_moves() {
        use ResolutionEvent as E;
        use ResolutionStatus as S;
        assert_eq!(S::Pending.transition(E::Tallied(Side::Oppose)).unwrap(), S::Rejected);
        assert_eq!(S::Upheld.transition(E::DisputeOpened).unwrap(), S::Disputed);
        assert_eq!(
            S::Disputed.transition(E::DisputeWithdrawn { restore: S::Approved }).unwrap(),
            S::Approved
        );
        assert!(matches!(S::Pending.transition(E::Finalize), Err(OracleError::InvalidTransition)));
        assert!(matches!(S::Disputed.transition(E::Finalize), Err(OracleError::InvalidTransition)));
        assert!(matches!(S::Finalized.transition(E::Finalize), Err(OracleError::AlreadyFinalized)));
        assert!(matches!(S::Abandoned.transition(E::DisputeOpened), Err(OracleError::InvalidTransition)));
        assert!(S::Disputed
            .transition(E::DisputeWithdrawn { restore: S::Pending })
            .is_err());
    }

    #[test]
    fn open_enforces_minimum_stake_and_evidence_length() {
        let params = OracleParams::default();
        let mut resolution = Resolution::default();
        assert!(matches!(
            resolution.open(&params, 7, 0, proposal(params.min_stake_for_resolution - 1), 0, 255),
            Err(OracleError::StakeBelowMinimum)
        ));

        let mut long = proposal(params.min_stake_for_resolution);
        long.evidence_uri = "x".repeat(MAX_EVIDENCE_URI_LEN + 1);
        assert!(matches!(resolution.open(&params, 7, 0, long, 0, 255), Err(OracleError::EvidenceTooLong)));

        let resolution = opened(&params, params.min_stake_for_resolution);
        assert_eq!(resolution.support_stake, params.min_stake_for_resolution);
        assert_eq!(resolution.status, ResolutionStatus::Pending);
    }

    #[test]
    fn stakes_only_move_while_voting() {
        let params = OracleParams::default();
        let mut resolution = opened(&params, params.min_stake_for_resolution);
        let staker = Pubkey::new_unique();

        resolution.add_stake(&params, Side::Oppose, 50, 1).unwrap();
        resolution.remove_stake(&params, Side::Oppose, 50, &staker, 2).unwrap();
        assert_eq!(resolution.opposition_stake, 0);

        let late = params.resolution_period;
        assert!(matches!(
            resolution.add_stake(&params, Side::Support, 10, late),
            Err(OracleError::WindowClosed)
        ));
    }

    #[test]
    fn proposer_stake_is_locked_until_abandoned() {
        let params = OracleParams::default();
        let mut resolution = opened(&params, params.min_stake_for_resolution);
        let proposer = resolution.proposer;
        assert!(matches!(
            resolution.remove_stake(&params, Side::Support, 1, &proposer, 1),
            Err(OracleError::ProposerStakeLocked)
        ));

        resolution.abandon(&params, params.resolution_period).unwrap();
        assert_eq!(resolution.status, ResolutionStatus::Abandoned);
        let stake = resolution.support_stake;
        resolution
            .remove_stake(&params, Side::Support, stake, &proposer, params.resolution_period + 1)
            .unwrap();
        assert_eq!(resolution.support_stake, 0);
    }

    #[test]
    fn abandon_refuses_a_tallyable_resolution() {
        let params = OracleParams::default();
        let mut resolution = opened(&params, params.min_quorum_stake);
        assert!(matches!(
            resolution.abandon(&params, params.resolution_period),
            Err(OracleError::WrongPhase)
        ));
    }

    #[test]
    fn withdrawals_close_with_voting() {
        let params = OracleParams::default();
        let mut resolution = opened(&params, params.min_stake_for_resolution);
        let staker = Pubkey::new_unique();
        resolution.add_stake(&params, Side::Oppose, 40, 1).unwrap();
        assert!(matches!(
            resolution.remove_stake(&params, Side::Oppose, 40, &staker, params.resolution_period),
            Err(OracleError::WindowClosed)
        ));
    }

    #[test]
    fn reentrant_lock_is_rejected() {
        let mut resolution = Resolution::default();
        resolution.lock().unwrap();
        assert!(matches!(resolution.lock(), Err(OracleError::Reentrancy)));
        resolution.unlock();
        assert!(resolution.lock().is_ok());
    }

    #[test]
    fn dispute_window_and_bond_are_enforced() {
        let params = OracleParams::default();
        let mut resolution = opened(&params, params.min_quorum_stake);
        let tallied_at = params.resolution_period;
        let bond = params.required_bond(resolution.support_stake).unwrap();

        assert!(matches!(
            resolution.open_dispute(&params, 0, bond - 1, tallied_at),
            Err(OracleError::BondTooSmall)
        ));
        assert!(matches!(
            resolution.open_dispute(&params, 1, bond, tallied_at),
            Err(OracleError::InvalidOutcome)
        ));
        let closed = tallied_at + params.dispute_period;
        assert!(matches!(
            resolution.clone().open_dispute(&params, 0, bond, closed),
            Err(OracleError::WindowClosed)
        ));

        assert_eq!(resolution.open_dispute(&params, 0, bond, tallied_at).unwrap(), 0);
        assert_eq!(resolution.status, ResolutionStatus::Disputed);
        assert!(resolution.disputed);
        assert!(matches!(
            resolution.finalize(&params, closed),
            Err(OracleError::PeriodNotElapsed)
        ));
    }

    #[test]
    fn upheld_dispute_flips_the_winner() {
        let params = OracleParams::default();
        let mut resolution = opened(&params, params.min_quorum_stake);
        let tallied_at = params.resolution_period;
        let bond = params.required_bond(resolution.support_stake).unwrap();
        resolution.open_dispute(&params, 0, bond, tallied_at).unwrap();

        let settled_at = tallied_at + params.escalation_period;
        let dispute = Dispute {
            dispute_id: 0,
            alternative_outcome: 0,
            status: DisputeStatus::Upheld,
            ..Dispute::default()
        };
        resolution.apply_dispute(&dispute, settled_at).unwrap();
        assert_eq!(resolution.status, ResolutionStatus::Upheld);
        assert_eq!(resolution.current_outcome, Some(0));
        assert_eq!(resolution.last_upheld, Some(0));
        assert_eq!(resolution.winner(), Side::Oppose);

        let (winner, settlement) = resolution
            .finalize(&params, settled_at + params.dispute_period)
            .unwrap();
        assert_eq!(winner, Side::Oppose);
        // nobody staked against the proposal, so the net slash passes to the dispute
        let fee = params.min_quorum_stake * params.protocol_fee_bps as u64 / 10_000;
        assert_eq!(settlement.slashed, params.min_quorum_stake);
        assert_eq!(settlement.fee, fee);
        assert_eq!(settlement.carried_out, params.min_quorum_stake - fee);
        assert!(matches!(
            resolution.claim(Side::Support, params.min_quorum_stake),
            Err(OracleError::NothingToClaim)
        ));
    }
}
