use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::{OracleError, OracleResult};
use crate::utils::math;

/// Tunable oracle parameters. Replaced wholesale by `update_params`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub struct OracleParams {
    pub resolution_period: i64,
    pub dispute_period: i64,
    pub escalation_period: i64,
    pub min_stake_for_resolution: u64,
    pub min_stake_for_dispute: u64,
    /// Total stake a pool needs before the stake majority is binding
    pub min_quorum_stake: u64,
    /// Share of total stake the leading side needs, scaled by PRECISION
    pub stake_quorum: u128,
    pub legislator_quorum: u32,
    pub dispute_bond_multiplier: u64,
    pub protocol_fee_bps: u16,
    pub withdrawal_penalty_bps: u16,
    pub max_disputes: u32,
}

impl Default for OracleParams {
    fn default() -> Self {
        Self {
            resolution_period: DEFAULT_RESOLUTION_PERIOD,
            dispute_period: DEFAULT_DISPUTE_PERIOD,
            escalation_period: DEFAULT_ESCALATION_PERIOD,
            min_stake_for_resolution: DEFAULT_MIN_STAKE_FOR_RESOLUTION,
            min_stake_for_dispute: DEFAULT_MIN_STAKE_FOR_DISPUTE,
            min_quorum_stake: DEFAULT_MIN_QUORUM_STAKE,
            stake_quorum: DEFAULT_STAKE_QUORUM,
            legislator_quorum: DEFAULT_LEGISLATOR_QUORUM,
            dispute_bond_multiplier: DEFAULT_DISPUTE_BOND_MULTIPLIER,
            protocol_fee_bps: DEFAULT_PROTOCOL_FEE_BPS,
            withdrawal_penalty_bps: DEFAULT_WITHDRAWAL_PENALTY_BPS,
            max_disputes: DEFAULT_MAX_DISPUTES,
        }
    }
}

impl OracleParams {
    pub fn validate(&self) -> OracleResult<()> {
        if self.resolution_period <= 0 || self.dispute_period <= 0 || self.escalation_period <= 0 {
            return Err(OracleError::InvalidParams);
        }
        if self.min_stake_for_resolution == 0 || self.min_stake_for_dispute == 0 {
            return Err(OracleError::InvalidParams);
        }
        // A bare plurality would let both sides "win" a two-way split.
        if self.stake_quorum <= PRECISION / 2 || self.stake_quorum > PRECISION {
            return Err(OracleError::InvalidParams);
        }
        if self.legislator_quorum == 0 || self.dispute_bond_multiplier == 0 || self.max_disputes == 0 {
            return Err(OracleError::InvalidParams);
        }
        if self.protocol_fee_bps > MAX_PROTOCOL_FEE_BPS {
            return Err(OracleError::FeeExceedsMax);
        }
        if self.withdrawal_penalty_bps as u64 > BPS_DENOMINATOR {
            return Err(OracleError::InvalidParams);
        }
        Ok(())
    }

    /// Bond a challenger must post: `max(min_stake_for_dispute, multiplier * support_stake)`.
    pub fn required_bond(&self, support_stake: u64) -> OracleResult<u64> {
        let scaled = support_stake
            .checked_mul(self.dispute_bond_multiplier)
            .ok_or(OracleError::MathOverflow)?;
        Ok(scaled.max(self.min_stake_for_dispute))
    }
}

/// Value movements produced when a reward pool is fixed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Settlement {
    /// Losing-side stake (or forfeited penalty) taken this settlement
    pub slashed: u64,
    /// Share routed to the protocol treasury
    pub fee: u64,
    /// Share reserved for winning-side claims
    pub reserved: u64,
    /// Previously carried value folded into this pool
    pub carried_in: u64,
    /// Net slash left without a winner, carried to the parent resolution
    pub carried_out: u64,
}

#[account]
#[derive(Default)]
pub struct OracleConfig {
    pub admin: Pubkey,
    pub stake_mint: Pubkey,
    pub vault: Pubkey,
    pub treasury: Pubkey,
    pub paused: bool,
    pub params: OracleParams,
    /// Fees held in the vault and not yet swept to `treasury`
    pub resolution_treasury: u64,
    pub protocol_fee_accumulated: u64,
    pub total_stake_slashed: u64,
    pub total_rewards_reserved: u64,
    pub total_rewards_claimed: u64,
    /// Dispute slashes waiting for their resolution to finalize
    pub total_rewards_carried: u64,
    pub total_resolutions: u64,
    pub total_disputes: u64,
    pub successful_resolutions: u64,
    pub overturned_resolutions: u64,
    pub bump: u8,
    pub vault_bump: u8,
}

impl OracleConfig {
    // 8 (discriminator)
    // 32 * 4 (admin, stake_mint, vault, treasury)
    // 1 (paused) + params
    // 8 * 10 (running totals)
    // 1 (bump) + 1 (vault_bump)
    pub const LEN: usize = 8 + 32 * 4 + 1 + OracleParams::INIT_SPACE + 8 * 10 + 1 + 1;

    pub fn require_active(&self) -> OracleResult<()> {
        if self.paused {
            return Err(OracleError::Paused);
        }
        Ok(())
    }

    pub fn record_settlement(&mut self, settlement: &Settlement) -> OracleResult<()> {
        self.total_stake_slashed = math::add(self.total_stake_slashed, settlement.slashed)?;
        self.protocol_fee_accumulated = math::add(self.protocol_fee_accumulated, settlement.fee)?;
        self.resolution_treasury = math::add(self.resolution_treasury, settlement.fee)?;
        self.total_rewards_reserved = math::add(self.total_rewards_reserved, settlement.reserved)?;
        self.total_rewards_carried = math::sub(
            math::add(self.total_rewards_carried, settlement.carried_out)?,
            settlement.carried_in,
        )?;
        Ok(())
    }

    pub fn record_claim(&mut self, reward: u64) -> OracleResult<()> {
        self.total_rewards_claimed = math::add(self.total_rewards_claimed, reward)?;
        if self.total_rewards_claimed > self.total_rewards_reserved {
            return Err(OracleError::InsufficientVault);
        }
        Ok(())
    }

    pub fn debit_treasury(&mut self, amount: u64) -> OracleResult<()> {
        self.resolution_treasury = self
            .resolution_treasury
            .checked_sub(amount)
            .ok_or(OracleError::InsufficientVault)?;
        Ok(())
    }

    /// Every unit slashed is accounted for as fee, reserved reward or carry.
    pub fn is_conserved(&self) -> bool {
        let accounted = self.protocol_fee_accumulated as u128
            + self.total_rewards_reserved as u128
            + self.total_rewards_carried as u128;
        accounted == self.total_stake_slashed as u128
            && self.total_rewards_claimed <= self.total_rewards_reserved
    }
}
