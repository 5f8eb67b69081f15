//! End-to-end scenarios driven through the same lifecycle functions the
//! instruction handlers call, against an injected clock. Only the token
//! transfers are left out.

use anchor_lang::prelude::*;
use crate::clock::{Phase, PhaseClock, TimeSource};
use crate::errors::{ErrorClass, OracleError, OracleResult};
use crate::state::lifecycle::{self, DisputeRequest, Finalization};
use crate::state::*;

const UNIT: u64 = 1_000_000;
const T0: i64 = 1_700_000_000;

struct FixedClock(i64);

impl TimeSource for FixedClock {
    fn now(&self) -> Result<i64> {
        Ok(self.0)
    }
}

#[derive(Clone)]
struct Staker {
    key: Pubkey,
    record: StakeRecord,
}

struct Escalation {
    dispute: Dispute,
    challenger: Staker,
}

#[derive(Clone)]
struct Harness {
    config: OracleConfig,
    market: MarketRecord,
    resolution: Resolution,
    pool: Pubkey,
    stakers: Vec<Staker>,
}

impl Harness {
    fn new(outcome_count: u8) -> Self {
        let config = OracleConfig {
            params: OracleParams::default(),
            ..OracleConfig::default()
        };
        let mut market = MarketRecord::default();
        market.register(11, Pubkey::new_unique(), outcome_count, 255).unwrap();
        Self {
            config,
            market,
            resolution: Resolution::default(),
            pool: Pubkey::new_unique(),
            stakers: Vec::new(),
        }
    }

    fn params(&self) -> OracleParams {
        self.config.params
    }

    fn voting_ends(&self) -> i64 {
        PhaseClock::new(&self.config.params).voting_ends_at(self.resolution.proposed_at)
    }

    fn propose(&mut self, outcome: u8, stake: u64, now: i64) -> OracleResult<usize> {
        let proposer = Pubkey::new_unique();
        let mut record = StakeRecord::default();
        lifecycle::propose_resolution(
            &mut self.config,
            &mut self.market,
            &mut self.resolution,
            self.pool,
            &mut record,
            Proposal {
                proposer,
                outcome,
                evidence_uri: "ipfs://bafy".to_string(),
                evidence_hash: [1; 32],
                stake,
            },
            now,
            254,
            253,
        )?;
        self.stakers.push(Staker { key: proposer, record });
        Ok(self.stakers.len() - 1)
    }

    /// Stake from a fresh account.
    fn stake(&mut self, side: Side, amount: u64, now: i64) -> OracleResult<usize> {
        let key = Pubkey::new_unique();
        let mut record = StakeRecord::default();
        lifecycle::stake_resolution(
            &self.config,
            &mut self.resolution,
            &mut record,
            None,
            Deposit { pool: self.pool, staker: key, side, amount, bump: 252 },
            now,
        )?;
        self.stakers.push(Staker { key, record });
        Ok(self.stakers.len() - 1)
    }

    fn withdraw(&mut self, index: usize, now: i64) -> OracleResult<u64> {
        lifecycle::withdraw_stake(&self.config, &mut self.resolution, &mut self.stakers[index].record, now)
    }

    fn vote(&mut self, seat: Option<&LegislatorSeat>, legislator: Pubkey, side: Side, now: i64) -> OracleResult<u64> {
        let mut ballot = LegislatorBallot::default();
        lifecycle::legislator_vote(
            &self.config,
            &mut self.resolution,
            seat,
            &mut ballot,
            Vote { pool: self.pool, legislator, side, bump: 255 },
            now,
        )
    }

    fn finalize(&mut self, now: i64) -> OracleResult<Finalization> {
        self.finalize_with(None, now)
    }

    fn finalize_with(&mut self, upheld: Option<&mut Dispute>, now: i64) -> OracleResult<Finalization> {
        lifecycle::finalize_resolution(
            &mut self.config,
            &mut self.market,
            &mut self.resolution,
            self.pool,
            upheld,
            now,
        )
    }

    /// Returns the reward; the principal goes back with it.
    fn claim(&mut self, index: usize) -> OracleResult<u64> {
        let record = &mut self.stakers[index].record;
        let side = record.side;
        lifecycle::claim_resolution_reward(&mut self.config, &mut self.resolution, record, side)
            .map(|(_, reward)| reward)
    }

    fn dispute(&mut self, alternative: u8, bond: u64, now: i64) -> OracleResult<Escalation> {
        let challenger = Pubkey::new_unique();
        let dispute_key = Pubkey::new_unique();
        let mut dispute = Dispute::default();
        let mut record = StakeRecord::default();
        lifecycle::dispute_resolution(
            &mut self.config,
            &self.market,
            &mut self.resolution,
            self.pool,
            &mut dispute,
            dispute_key,
            &mut record,
            DisputeRequest {
                challenger,
                alternative_outcome: alternative,
                bond,
                evidence_uri: String::new(),
                evidence_hash: [2; 32],
            },
            now,
            251,
            250,
        )?;
        Ok(Escalation { dispute, challenger: Staker { key: challenger, record } })
    }

    fn back(&mut self, dispute: &mut Dispute, side: Side, amount: u64, now: i64) -> OracleResult<Staker> {
        let key = Pubkey::new_unique();
        let mut record = StakeRecord::default();
        lifecycle::back_dispute(
            &self.config,
            dispute,
            &mut record,
            None,
            Deposit { pool: Pubkey::new_unique(), staker: key, side, amount, bump: 249 },
            now,
        )?;
        Ok(Staker { key, record })
    }

    fn settle(&mut self, dispute: &mut Dispute, now: i64) -> OracleResult<DisputeStatus> {
        lifecycle::settle_dispute(&mut self.config, &mut self.resolution, dispute, now).map(|result| result.status)
    }

    fn withdraw_dispute(&mut self, dispute: &mut Dispute, caller: &Pubkey, now: i64) -> OracleResult<u64> {
        lifecycle::withdraw_dispute(&mut self.config, &mut self.resolution, dispute, caller, now)
    }

    fn claim_dispute(&mut self, dispute: &mut Dispute, record: &mut StakeRecord) -> OracleResult<(u64, u64)> {
        lifecycle::claim_dispute_reward(&mut self.config, &self.resolution, dispute, record)
    }
}

fn seat_for(legislator: Pubkey) -> LegislatorSeat {
    LegislatorSeat { authority: legislator, weight: 1, active: true, ..LegislatorSeat::default() }
}

#[test]
fn unmet_quorum_blocks_finalization_until_abandoned() {
    let mut h = Harness::new(2);
    let params = h.params();
    let proposer = h.propose(1, params.min_stake_for_resolution, T0).unwrap();
    let clock = FixedClock(T0 + params.resolution_period + params.dispute_period);

    let err = h.finalize(clock.now().unwrap()).unwrap_err();
    assert!(matches!(err, OracleError::QuorumNotReached));
    assert_eq!(err.class(), ErrorClass::State);
    assert!(!h.resolution.finalized);
    assert!(!h.market.resolved);
    assert_eq!(h.resolution.status, ResolutionStatus::Pending);

    // Stuck: retire it, refund the proposer, open a new round.
    let now = h.voting_ends();
    lifecycle::abandon_resolution(&h.config, &mut h.market, &mut h.resolution, now).unwrap();
    assert_eq!(h.withdraw(proposer, now).unwrap(), params.min_stake_for_resolution);
    assert_eq!(h.resolution.support_stake, 0);
    assert_eq!(h.market.begin_round().unwrap(), 1);
}

#[test]
fn clean_approval_pays_back_principal() {
    let mut h = Harness::new(2);
    let stake = 100 * UNIT;
    h.propose(1, stake, T0).unwrap();
    for offset in 1..=3 {
        h.stake(Side::Support, stake, T0 + offset * 10).unwrap();
    }

    let params = h.params();
    let finalize_at = T0 + params.resolution_period + params.dispute_period;
    assert!(matches!(h.finalize(finalize_at - 1), Err(OracleError::PeriodNotElapsed)));

    let finalization = h.finalize(finalize_at).unwrap();
    assert_eq!(finalization.winner, Side::Support);
    assert_eq!(finalization.settlement.slashed, 0);
    assert!(h.resolution.finalized);
    assert_eq!(h.resolution.status, ResolutionStatus::Finalized);
    assert_eq!(h.market.final_outcome, Some(1));
    assert_eq!(h.config.successful_resolutions, 1);

    for index in 0..4 {
        assert_eq!(h.claim(index).unwrap(), 0);
        assert!(h.stakers[index].record.withdrawn);
    }
    assert!(matches!(h.claim(0), Err(OracleError::NothingToClaim)));
    assert!(h.config.is_conserved());
}

#[test]
fn finalize_happens_exactly_once() {
    let mut h = Harness::new(2);
    h.propose(0, 300 * UNIT, T0).unwrap();
    let params = h.params();
    let at = T0 + params.resolution_period + params.dispute_period;
    h.finalize(at).unwrap();
    assert!(matches!(h.finalize(at + 1), Err(OracleError::AlreadyFinalized)));
    assert!(matches!(h.market.begin_round(), Err(OracleError::MarketAlreadyResolved)));
}

#[test]
fn losing_side_funds_the_winners() {
    let mut h = Harness::new(2);
    h.propose(1, 100 * UNIT, T0).unwrap();
    let a = h.stake(Side::Oppose, 300 * UNIT, T0 + 1).unwrap();
    let b = h.stake(Side::Oppose, 100 * UNIT, T0 + 2).unwrap();

    let params = h.params();
    let finalization = h
        .finalize(T0 + params.resolution_period + params.dispute_period)
        .unwrap();
    let settlement = finalization.settlement;
    assert_eq!(finalization.winner, Side::Oppose);
    // rejected: the market stays unresolved and can be proposed again
    assert!(!h.market.resolved);
    assert_eq!(h.market.active_round, None);
    assert_eq!(settlement.fee, 5 * UNIT);
    assert_eq!(settlement.reserved, 95 * UNIT);

    assert!(matches!(h.claim(0), Err(OracleError::NothingToClaim)));
    let reward_a = h.claim(a).unwrap();
    let reward_b = h.claim(b).unwrap();
    assert_eq!(reward_a + reward_b, settlement.reserved);
    assert_eq!(h.config.total_rewards_claimed, h.config.total_rewards_reserved);
    assert!(h.config.is_conserved());
}

#[test]
fn stakes_cannot_leave_once_voting_ends() {
    let mut h = Harness::new(2);
    h.propose(1, 100 * UNIT, T0).unwrap();
    let early = h.stake(Side::Oppose, 50 * UNIT, T0 + 1).unwrap();
    let late = h.stake(Side::Oppose, 250 * UNIT, T0 + 2).unwrap();

    let ends = h.voting_ends();
    assert_eq!(h.withdraw(early, ends - 1).unwrap(), 50 * UNIT);
    assert!(matches!(h.withdraw(late, ends), Err(OracleError::WindowClosed)));
    assert!(h.stakers[late].record.is_live());
    assert_eq!(h.resolution.opposition_stake, 250 * UNIT);
    assert_eq!(
        PhaseClock::new(&h.params()).phase(&h.resolution, ends),
        Phase::Tallyable
    );
}

#[test]
fn upheld_dispute_pays_the_stranded_slash_to_its_backers() {
    let mut h = Harness::new(3);
    let stake = 100 * UNIT;
    let proposer = h.propose(1, stake, T0).unwrap();
    h.stake(Side::Support, stake, T0 + 1).unwrap();
    h.stake(Side::Support, stake, T0 + 2).unwrap();

    let params = h.params();
    let dispute_at = T0 + params.resolution_period + 60;
    let bond = params.required_bond(h.resolution.support_stake).unwrap();
    assert_eq!(bond, 600 * UNIT);
    let mut escalation = h.dispute(2, bond, dispute_at).unwrap();
    assert_eq!(h.resolution.status, ResolutionStatus::Disputed);
    assert_eq!(
        PhaseClock::new(&params).phase(&h.resolution, dispute_at + 1),
        Phase::Escalation
    );

    let settle_at = h.resolution.escalation_ends_at;
    assert!(matches!(h.finalize(settle_at), Err(OracleError::PeriodNotElapsed)));
    assert_eq!(h.settle(&mut escalation.dispute, settle_at).unwrap(), DisputeStatus::Upheld);
    assert_eq!(h.resolution.current_outcome, Some(2));
    assert_eq!(h.resolution.last_upheld, Some(0));
    assert_eq!(h.config.overturned_resolutions, 1);
    assert!(matches!(
        h.claim_dispute(&mut escalation.dispute, &mut escalation.challenger.record),
        Err(OracleError::NotFinalized)
    ));

    // Nobody opposed the proposal, so its slash has no resolution-side winner.
    let finalize_at = settle_at + params.dispute_period;
    let mut without = h.clone();
    assert!(matches!(without.finalize(finalize_at), Err(OracleError::WrongDispute)));
    let mut foreign = Dispute { dispute_id: 0, ..escalation.dispute.clone() };
    foreign.resolution = Pubkey::new_unique();
    let mut mismatched = h.clone();
    assert!(matches!(
        mismatched.finalize_with(Some(&mut foreign), finalize_at),
        Err(OracleError::WrongDispute)
    ));

    let finalization = h.finalize_with(Some(&mut escalation.dispute), finalize_at).unwrap();
    let slashed = 3 * stake;
    let fee = slashed * params.protocol_fee_bps as u64 / 10_000;
    assert_eq!(finalization.winner, Side::Oppose);
    assert_eq!(finalization.settlement.slashed, slashed);
    assert_eq!(finalization.settlement.fee, fee);
    assert_eq!(finalization.routed_to_dispute, slashed - fee);
    assert_eq!(h.config.resolution_treasury, fee);
    assert_eq!(h.market.final_outcome, Some(2));
    assert!(h.config.is_conserved());

    assert!(matches!(h.claim(proposer), Err(OracleError::NothingToClaim)));
    let (principal, reward) = h
        .claim_dispute(&mut escalation.dispute, &mut escalation.challenger.record)
        .unwrap();
    assert_eq!(principal, bond);
    assert!(reward > 0);
    assert_eq!(reward, slashed - fee);
    assert_eq!(h.config.total_rewards_claimed, h.config.total_rewards_reserved);
    assert!(h.config.is_conserved());
}

#[test]
fn failed_unopposed_challenge_rewards_the_resolution_winners() {
    let mut h = Harness::new(2);
    let stake = 100 * UNIT;
    let supporters = [
        h.propose(1, stake, T0).unwrap(),
        h.stake(Side::Support, stake, T0 + 1).unwrap(),
        h.stake(Side::Support, stake, T0 + 2).unwrap(),
    ];

    let params = h.params();
    let dispute_at = h.voting_ends() + 5;
    let bond = params.required_bond(h.resolution.support_stake).unwrap();
    let mut escalation = h.dispute(0, bond, dispute_at).unwrap();

    // Legislators reject the challenge; nobody staked to defend.
    for offset in 0..params.legislator_quorum {
        let legislator = Pubkey::new_unique();
        let mut ballot = LegislatorBallot::default();
        lifecycle::legislator_vote_dispute(
            &h.config,
            &mut escalation.dispute,
            Some(&seat_for(legislator)),
            &mut ballot,
            Vote { pool: Pubkey::new_unique(), legislator, side: Side::Oppose, bump: 255 },
            dispute_at + 1 + offset as i64,
        )
        .unwrap();
        assert!(ballot.has_voted);
    }

    let settle_at = h.resolution.escalation_ends_at;
    assert_eq!(h.settle(&mut escalation.dispute, settle_at).unwrap(), DisputeStatus::Overturned);
    let fee = bond / 20;
    assert_eq!(h.resolution.carried_rewards, bond - fee);
    assert_eq!(h.config.total_rewards_carried, bond - fee);
    assert!(h.config.is_conserved());

    let finalization = h.finalize(settle_at + params.dispute_period).unwrap();
    assert_eq!(finalization.winner, Side::Support);
    assert_eq!(finalization.settlement.carried_in, bond - fee);
    assert_eq!(h.config.total_rewards_carried, 0);

    let paid: u64 = supporters.iter().map(|index| h.claim(*index).unwrap()).sum();
    assert_eq!(paid, bond - fee);
    assert!(matches!(
        h.claim_dispute(&mut escalation.dispute, &mut escalation.challenger.record),
        Err(OracleError::NothingToClaim)
    ));
    assert!(h.config.is_conserved());
    assert_eq!(h.config.total_rewards_claimed, h.config.total_rewards_reserved);
}

#[test]
fn defended_dispute_pays_the_bond_to_the_supporters() {
    let mut h = Harness::new(2);
    let stake = 100 * UNIT;
    let supporters = [
        h.propose(1, stake, T0).unwrap(),
        h.stake(Side::Support, stake, T0 + 1).unwrap(),
        h.stake(Side::Support, stake, T0 + 2).unwrap(),
    ];
    let params = h.params();
    let dispute_at = h.voting_ends();
    let bond = params.required_bond(h.resolution.support_stake).unwrap();
    assert_eq!(bond, 600 * UNIT);
    let mut escalation = h.dispute(0, bond, dispute_at).unwrap();

    let defense = bond * 2;
    let mut defender = h.back(&mut escalation.dispute, Side::Oppose, defense, dispute_at + 1).unwrap();

    let settle_at = h.resolution.escalation_ends_at;
    assert!(matches!(
        h.settle(&mut escalation.dispute, settle_at - 1),
        Err(OracleError::PeriodNotElapsed)
    ));
    assert_eq!(h.settle(&mut escalation.dispute, settle_at).unwrap(), DisputeStatus::Overturned);
    assert_eq!(h.resolution.status, ResolutionStatus::Overturned);
    assert_eq!(h.resolution.current_outcome, Some(1));
    let net = bond - bond / 20;
    assert_eq!(h.resolution.carried_rewards, net);
    assert!(matches!(
        h.claim_dispute(&mut escalation.dispute, &mut defender.record),
        Err(OracleError::NotFinalized)
    ));

    h.finalize(settle_at + params.dispute_period).unwrap();
    for index in supporters {
        assert_eq!(h.claim(index).unwrap(), net / 3);
    }
    assert_eq!(net / 3, 190 * UNIT);

    let (principal, reward) = h.claim_dispute(&mut escalation.dispute, &mut defender.record).unwrap();
    assert_eq!((principal, reward), (defense, 0));
    assert!(matches!(
        h.claim_dispute(&mut escalation.dispute, &mut escalation.challenger.record),
        Err(OracleError::NothingToClaim)
    ));
    assert_eq!(h.config.total_rewards_claimed, h.config.total_rewards_reserved);
    assert!(h.config.is_conserved());
}

#[test]
fn dispute_bond_must_cover_the_multiple() {
    let mut h = Harness::new(2);
    h.propose(1, 400 * UNIT, T0).unwrap();
    let params = h.params();
    let at = h.voting_ends();
    let required = params.required_bond(h.resolution.support_stake).unwrap();
    assert_eq!(required, 800 * UNIT);

    let err = h.dispute(0, required - 1, at).map(|_| ()).unwrap_err();
    assert!(matches!(err, OracleError::BondTooSmall));
    assert_eq!(err.class(), ErrorClass::Economic);
    assert!(matches!(h.dispute(1, required, at), Err(OracleError::InvalidOutcome)));
    assert!(matches!(h.dispute(5, required, at), Err(OracleError::InvalidOutcome)));
    assert!(h.dispute(0, required, at).is_ok());
}

#[test]
fn bond_follows_support_even_when_outstaked() {
    let mut h = Harness::new(2);
    h.propose(1, 400 * UNIT, T0).unwrap();
    h.stake(Side::Oppose, 1_000 * UNIT, T0 + 1).unwrap();
    let params = h.params();
    for offset in 0..params.legislator_quorum {
        let legislator = Pubkey::new_unique();
        h.vote(Some(&seat_for(legislator)), legislator, Side::Support, T0 + 2 + offset as i64)
            .unwrap();
    }

    let at = h.voting_ends();
    let required = params.required_bond(h.resolution.support_stake).unwrap();
    assert_eq!(required, 800 * UNIT);
    assert!(h.dispute(0, required, at).is_ok());
    assert_eq!(h.resolution.pre_dispute_status, ResolutionStatus::Approved);
}

#[test]
fn withdrawn_disputes_restore_the_verdict_and_count_toward_the_cap() {
    let mut h = Harness::new(2);
    h.propose(1, 300 * UNIT, T0).unwrap();
    let params = h.params();
    let mut now = h.voting_ends();
    let bond = params.required_bond(h.resolution.support_stake).unwrap();

    for _ in 0..params.max_disputes {
        let mut escalation = h.dispute(0, bond, now).unwrap();
        let stranger = Pubkey::new_unique();
        assert!(matches!(
            h.withdraw_dispute(&mut escalation.dispute, &stranger, now + 1),
            Err(OracleError::NotChallenger)
        ));
        let penalty = h
            .withdraw_dispute(&mut escalation.dispute, &escalation.challenger.key, now + 1)
            .unwrap();
        assert_eq!(penalty, bond / 10);
        assert_eq!(h.resolution.status, ResolutionStatus::Approved);
        assert_eq!(
            h.claim_dispute(&mut escalation.dispute, &mut escalation.challenger.record).unwrap(),
            (bond - penalty, 0)
        );
        now += 2;
    }
    assert!(matches!(h.dispute(0, bond, now), Err(OracleError::TooManyDisputes)));
    assert_eq!(h.config.resolution_treasury, 3 * (bond / 10));
    assert!(h.config.is_conserved());

    // The window restarts from the last withdrawal.
    assert!(matches!(h.finalize(now), Err(OracleError::PeriodNotElapsed)));
    assert!(h.finalize(now - 1 + params.dispute_period).is_ok());
}

#[test]
fn legislator_vote_counts_once() {
    let mut h = Harness::new(2);
    h.propose(1, 100 * UNIT, T0).unwrap();
    let legislator = Pubkey::new_unique();
    let seat = LegislatorSeat { weight: 4, ..seat_for(legislator) };
    let mut ballot = LegislatorBallot::default();
    let vote = Vote { pool: h.pool, legislator, side: Side::Support, bump: 255 };

    let weight = lifecycle::legislator_vote(&h.config, &mut h.resolution, Some(&seat), &mut ballot, vote, T0 + 1)
        .unwrap();
    assert_eq!(weight, 4);

    let err = lifecycle::legislator_vote(&h.config, &mut h.resolution, Some(&seat), &mut ballot, vote, T0 + 2)
        .unwrap_err();
    assert!(matches!(err, OracleError::AlreadyVoted));
    assert_eq!(h.resolution.legislator_support, 1);
    assert_eq!(h.resolution.legislator_support_weight, 4);

    let retired = LegislatorSeat { active: false, ..seat };
    assert!(matches!(
        h.vote(Some(&retired), legislator, Side::Support, T0 + 3),
        Err(OracleError::NotLegislator)
    ));
}

#[test]
fn unelected_caller_cannot_vote() {
    let mut h = Harness::new(2);
    h.propose(1, 100 * UNIT, T0).unwrap();
    let caller = Pubkey::new_unique();

    let err = h.vote(None, caller, Side::Oppose, T0 + 1).unwrap_err();
    assert!(matches!(err, OracleError::NotLegislator));
    assert_eq!(err.class(), ErrorClass::Authorization);

    let borrowed = seat_for(Pubkey::new_unique());
    assert!(matches!(
        h.vote(Some(&borrowed), caller, Side::Oppose, T0 + 1),
        Err(OracleError::NotLegislator)
    ));
    assert_eq!(h.resolution.legislator_opposition, 0);
}

#[test]
fn one_side_per_staker_per_pool() {
    let mut h = Harness::new(2);
    let proposer = h.propose(1, 100 * UNIT, T0).unwrap();
    let Staker { key, record: support } = h.stakers[proposer].clone();
    let mut opposition = StakeRecord::default();
    let err = lifecycle::stake_resolution(
        &h.config,
        &mut h.resolution,
        &mut opposition,
        Some(&support),
        Deposit { pool: h.pool, staker: key, side: Side::Oppose, amount: UNIT, bump: 252 },
        T0 + 1,
    )
    .unwrap_err();
    assert!(matches!(err, OracleError::ConflictingStake));
    assert_eq!(h.resolution.opposition_stake, 0);
}

#[test]
fn second_proposal_waits_for_the_active_round() {
    let mut h = Harness::new(2);
    h.propose(1, 100 * UNIT, T0).unwrap();
    assert!(matches!(h.propose(0, 100 * UNIT, T0 + 1), Err(OracleError::ResolutionActive)));
    assert!(matches!(h.propose(9, 100 * UNIT, T0 + 1), Err(OracleError::InvalidOutcome)));
}

#[test]
fn pause_freezes_every_mutation() {
    let mut h = Harness::new(2);
    h.propose(1, 300 * UNIT, T0).unwrap();
    h.config.paused = true;

    let err = h.stake(Side::Oppose, UNIT, T0 + 1).unwrap_err();
    assert!(matches!(err, OracleError::Paused));
    assert!(err.is_transient());
    let params = h.params();
    assert!(matches!(
        h.finalize(T0 + params.resolution_period + params.dispute_period),
        Err(OracleError::Paused)
    ));

    h.config.paused = false;
    assert!(h.stake(Side::Oppose, UNIT, T0 + 1).is_ok());
}
