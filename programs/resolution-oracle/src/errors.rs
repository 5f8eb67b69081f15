use anchor_lang::prelude::*;

pub type OracleResult<T> = std::result::Result<T, OracleError>;

#[error_code]
pub enum OracleError {
    // Validation
    #[msg("Market already resolved")]
    MarketAlreadyResolved,
    #[msg("Outcome is out of range for this market")]
    InvalidOutcome,
    #[msg("Stake below minimum")]
    StakeBelowMinimum,
    #[msg("Evidence URI too long (max 200)")]
    EvidenceTooLong,
    #[msg("Invalid oracle parameters")]
    InvalidParams,
    #[msg("Fee exceeds maximum (10%)")]
    FeeExceedsMax,
    #[msg("Reliability score exceeds 10000 bps")]
    InvalidReliability,
    #[msg("Invalid mint account")]
    InvalidMint,
    #[msg("Pyth feed account does not match oracle source")]
    InvalidPythFeed,
    #[msg("Oracle price is stale")]
    OracleStale,
    #[msg("Dispute account is not this resolution's last upheld dispute")]
    WrongDispute,

    // State
    #[msg("Oracle is paused")]
    Paused,
    #[msg("A resolution is already active for this market")]
    ResolutionActive,
    #[msg("Action not allowed in the current phase")]
    WrongPhase,
    #[msg("Period has not elapsed yet")]
    PeriodNotElapsed,
    #[msg("Window for this action has closed")]
    WindowClosed,
    #[msg("Status transition not permitted")]
    InvalidTransition,
    #[msg("Resolution already finalized")]
    AlreadyFinalized,
    #[msg("Neither stake nor legislator quorum reached")]
    QuorumNotReached,
    #[msg("Legislator already voted on this pool")]
    AlreadyVoted,
    #[msg("Maximum disputes reached for this resolution")]
    TooManyDisputes,
    #[msg("Resolution is not finalized")]
    NotFinalized,

    // Authorization
    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("Caller is not an active legislator")]
    NotLegislator,
    #[msg("Only the challenger may withdraw a dispute")]
    NotChallenger,
    #[msg("Proposer stake is locked until the resolution is abandoned")]
    ProposerStakeLocked,

    // Economic
    #[msg("Dispute bond below required multiple")]
    BondTooSmall,
    #[msg("Nothing to claim")]
    NothingToClaim,
    #[msg("Stake already held on the opposite side")]
    ConflictingStake,
    #[msg("Stake record already withdrawn")]
    StakeAlreadyWithdrawn,
    #[msg("Vault balance insufficient")]
    InsufficientVault,
    #[msg("Arithmetic overflow")]
    MathOverflow,

    // Reentrancy
    #[msg("Nested mutation of the same resolution")]
    Reentrancy,
}

/// Coarse classification so keepers can tell retryable failures apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    Validation,
    State,
    Authorization,
    Economic,
    Reentrancy,
}

impl OracleError {
    pub fn class(&self) -> ErrorClass {
        use OracleError::*;
        match self {
            MarketAlreadyResolved | InvalidOutcome | StakeBelowMinimum | EvidenceTooLong
            | InvalidParams | FeeExceedsMax | InvalidReliability | InvalidMint
            | InvalidPythFeed | OracleStale | WrongDispute => ErrorClass::Validation,
            Paused | ResolutionActive | WrongPhase | PeriodNotElapsed | WindowClosed
            | InvalidTransition | AlreadyFinalized | QuorumNotReached | AlreadyVoted
            | TooManyDisputes | NotFinalized => ErrorClass::State,
            Unauthorized | NotLegislator | NotChallenger | ProposerStakeLocked => {
                ErrorClass::Authorization
            }
            BondTooSmall | NothingToClaim | ConflictingStake | StakeAlreadyWithdrawn
            | InsufficientVault | MathOverflow => ErrorClass::Economic,
            Reentrancy => ErrorClass::Reentrancy,
        }
    }

    /// Failures that may succeed if the same call is retried later.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            OracleError::Paused
                | OracleError::PeriodNotElapsed
                | OracleError::QuorumNotReached
                | OracleError::Reentrancy
        )
    }
}
