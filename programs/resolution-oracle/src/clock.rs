//! Phase derivation from stored timestamps.
//!
//! Nothing here waits: every handler reads `now` from a [`TimeSource`] and
//! compares it against the timestamps recorded on the resolution.

use anchor_lang::prelude::*;
use crate::errors::OracleError;
use crate::state::config::OracleParams;
use crate::state::resolution::{Resolution, ResolutionStatus};

pub trait TimeSource {
    fn now(&self) -> Result<i64>;
}

/// Reads `unix_timestamp` from the Clock sysvar.
pub struct SysvarClock;

impl TimeSource for SysvarClock {
    fn now(&self) -> Result<i64> {
        Ok(Clock::get()?.unix_timestamp)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Stakes and legislator ballots accepted
    Voting,
    /// Resolution period over, waiting for a tally
    Tallyable,
    /// Tallied; challenges accepted
    DisputeWindow,
    /// A dispute is collecting stake and ballots
    Escalation,
    /// Escalation over, dispute can be settled
    EscalationElapsed,
    Finalizable,
    Finalized,
    Abandoned,
}

pub struct PhaseClock<'a> {
    params: &'a OracleParams,
}

impl<'a> PhaseClock<'a> {
    pub fn new(params: &'a OracleParams) -> Self {
        Self { params }
    }

    pub fn voting_ends_at(&self, proposed_at: i64) -> i64 {
        proposed_at.saturating_add(self.params.resolution_period)
    }

    pub fn dispute_window_ends_at(&self, verdict_at: i64) -> i64 {
        verdict_at.saturating_add(self.params.dispute_period)
    }

    pub fn escalation_ends_at(&self, disputed_at: i64) -> i64 {
        disputed_at.saturating_add(self.params.escalation_period)
    }

    pub fn phase(&self, resolution: &Resolution, now: i64) -> Phase {
        match resolution.status {
            ResolutionStatus::Pending => {
                if now < self.voting_ends_at(resolution.proposed_at) {
                    Phase::Voting
                } else {
                    Phase::Tallyable
                }
            }
            ResolutionStatus::Approved
            | ResolutionStatus::Rejected
            | ResolutionStatus::Upheld
            | ResolutionStatus::Overturned => {
                if now < self.dispute_window_ends_at(resolution.verdict_at) {
                    Phase::DisputeWindow
                } else {
                    Phase::Finalizable
                }
            }
            ResolutionStatus::Disputed => {
                if now < resolution.escalation_ends_at {
                    Phase::Escalation
                } else {
                    Phase::EscalationElapsed
                }
            }
            ResolutionStatus::Finalized => Phase::Finalized,
            ResolutionStatus::Abandoned => Phase::Abandoned,
        }
    }

    pub fn require(&self, resolution: &Resolution, now: i64, expected: Phase) -> std::result::Result<(), OracleError> {
        let actual = self.phase(resolution, now);
        if actual == expected {
            return Ok(());
        }
        Err(mismatch(expected, actual))
    }
}

/// Distinguish "too early" from "too late" so keepers know whether to retry.
fn mismatch(expected: Phase, actual: Phase) -> OracleError {
    use Phase::*;
    match (expected, actual) {
        (_, Finalized) => OracleError::AlreadyFinalized,
        (Voting, Tallyable) | (DisputeWindow, Finalizable) | (Escalation, EscalationElapsed) => {
            OracleError::WindowClosed
        }
        (Tallyable, Voting)
        | (Finalizable, Voting)
        | (Finalizable, Tallyable)
        | (Finalizable, DisputeWindow)
        | (Finalizable, Escalation)
        | (Finalizable, EscalationElapsed)
        | (EscalationElapsed, Escalation) => OracleError::PeriodNotElapsed,
        _ => OracleError::WrongPhase,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedClock(i64);

    impl TimeSource for FixedClock {
        fn now(&self) -> Result<i64> {
            Ok(self.0)
        }
    }

    fn pending_at(proposed_at: i64) -> Resolution {
        Resolution { proposed_at, ..Resolution::default() }
    }

    #[test]
    fn pending_phases_follow_the_resolution_period() {
        let params = OracleParams::default();
        let clock = PhaseClock::new(&params);
        let resolution = pending_at(1_000);
        let end = 1_000 + params.resolution_period;

        let early = FixedClock(end - 1).now().unwrap();
        assert_eq!(clock.phase(&resolution, early), Phase::Voting);
        assert_eq!(clock.phase(&resolution, end), Phase::Tallyable);
    }

    #[test]
    fn verdict_phases_follow_the_dispute_window() {
        let params = OracleParams::default();
        let clock = PhaseClock::new(&params);
        let resolution = Resolution {
            status: ResolutionStatus::Approved,
            verdict_at: 5_000,
            ..Resolution::default()
        };
        let end = 5_000 + params.dispute_period;
        assert_eq!(clock.phase(&resolution, end - 1), Phase::DisputeWindow);
        assert_eq!(clock.phase(&resolution, end), Phase::Finalizable);
    }

    #[test]
    fn require_reports_timing_errors() {
        let params = OracleParams::default();
        let clock = PhaseClock::new(&params);
        let resolution = pending_at(0);

        assert!(matches!(
            clock.require(&resolution, 0, Phase::Finalizable),
            Err(OracleError::PeriodNotElapsed)
        ));
        assert!(matches!(
            clock.require(&resolution, params.resolution_period, Phase::Voting),
            Err(OracleError::WindowClosed)
        ));

        let finalized = Resolution { status: ResolutionStatus::Finalized, ..Resolution::default() };
        assert!(matches!(
            clock.require(&finalized, 0, Phase::Finalizable),
            Err(OracleError::AlreadyFinalized)
        ));
    }
}
