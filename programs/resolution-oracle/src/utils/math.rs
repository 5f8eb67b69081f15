use crate::constants::BPS_DENOMINATOR;
use crate::errors::{OracleError, OracleResult};

/// `a * b / denom`, floored, in u128.
pub fn mul_div(a: u128, b: u128, denom: u128) -> OracleResult<u128> {
    if denom == 0 {
        return Err(OracleError::MathOverflow);
    }
    a.checked_mul(b)
        .map(|product| product / denom)
        .ok_or(OracleError::MathOverflow)
}

/// Floor of `amount * bps / 10_000`.
pub fn bps_of(amount: u64, bps: u16) -> OracleResult<u64> {
    let scaled = mul_div(amount as u128, bps as u128, BPS_DENOMINATOR as u128)?;
    to_u64(scaled)
}

pub fn to_u64(value: u128) -> OracleResult<u64> {
    u64::try_from(value).map_err(|_| OracleError::MathOverflow)
}

pub fn add(a: u64, b: u64) -> OracleResult<u64> {
    a.checked_add(b).ok_or(OracleError::MathOverflow)
}

pub fn sub(a: u64, b: u64) -> OracleResult<u64> {
    a.checked_sub(b).ok_or(OracleError::MathOverflow)
}
