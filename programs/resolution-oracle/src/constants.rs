/// Seed for the singleton config PDA
pub const CONFIG_SEED: &[u8] = b"oracle_config";

/// Seed for the stake vault token account (authority = config PDA)
pub const VAULT_SEED: &[u8] = b"vault";

pub const ROLE_SEED: &[u8] = b"role";
pub const MARKET_SEED: &[u8] = b"market";
pub const RESOLUTION_SEED: &[u8] = b"resolution";
pub const DISPUTE_SEED: &[u8] = b"dispute";
pub const STAKE_SEED: &[u8] = b"stake";
pub const LEGISLATOR_SEED: &[u8] = b"legislator";
pub const BALLOT_SEED: &[u8] = b"ballot";
pub const ORACLE_SOURCE_SEED: &[u8] = b"oracle_source";

/// Fixed-point scale for quorum fractions and reward rates (1e18)
pub const PRECISION: u128 = 1_000_000_000_000_000_000;

pub const BPS_DENOMINATOR: u64 = 10_000;

/// Protocol fee on slashed stake cannot exceed 10%
pub const MAX_PROTOCOL_FEE_BPS: u16 = 1_000;

/// Max evidence URI length (bytes)
pub const MAX_EVIDENCE_URI_LEN: usize = 200;

/// Max number of outcomes a market may register
pub const MAX_OUTCOMES: u8 = 32;

/// Reliability scores are expressed in basis points
pub const MAX_RELIABILITY_BPS: u16 = 10_000;

/// Pyth updates older than this are not accepted when refreshing a source
pub const MAX_FEED_STALENESS_SECONDS: i64 = 60;

const DAY: i64 = 24 * 60 * 60;

/// Stake token is assumed to carry 6 decimals
const UNIT: u64 = 1_000_000;

pub const DEFAULT_RESOLUTION_PERIOD: i64 = 3 * DAY;
pub const DEFAULT_DISPUTE_PERIOD: i64 = 2 * DAY;
pub const DEFAULT_ESCALATION_PERIOD: i64 = 3 * DAY;
pub const DEFAULT_MIN_STAKE_FOR_RESOLUTION: u64 = 100 * UNIT;
pub const DEFAULT_MIN_STAKE_FOR_DISPUTE: u64 = 500 * UNIT;
pub const DEFAULT_MIN_QUORUM_STAKE: u64 = 300 * UNIT;
/// 60% of the stake placed must sit on the leading side
pub const DEFAULT_STAKE_QUORUM: u128 = PRECISION / 10 * 6;
pub const DEFAULT_LEGISLATOR_QUORUM: u32 = 5;
pub const DEFAULT_DISPUTE_BOND_MULTIPLIER: u64 = 2;
pub const DEFAULT_PROTOCOL_FEE_BPS: u16 = 500;
pub const DEFAULT_WITHDRAWAL_PENALTY_BPS: u16 = 1_000;
pub const DEFAULT_MAX_DISPUTES: u32 = 3;
