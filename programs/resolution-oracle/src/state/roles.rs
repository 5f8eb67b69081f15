use anchor_lang::prelude::*;
use crate::errors::{OracleError, OracleResult};

/// Capability bits held by a [`RoleGrant`].
pub mod capability {
    pub const ADMIN: u8 = 1 << 0;
    pub const EMERGENCY: u8 = 1 << 1;
    pub const ELECTION: u8 = 1 << 2;
    pub const ORACLE_ADMIN: u8 = 1 << 3;
    pub const MARKET_REGISTRAR: u8 = 1 << 4;

    pub const ALL: u8 = ADMIN | EMERGENCY | ELECTION | ORACLE_ADMIN | MARKET_REGISTRAR;
}

#[account]
#[derive(Default)]
pub struct RoleGrant {
    pub principal: Pubkey,
    pub capabilities: u8,
    pub bump: u8,
}

impl RoleGrant {
    pub const LEN: usize = 8 + 32 + 1 + 1;

    pub fn has(&self, capability: u8) -> bool {
        capability != 0 && self.capabilities & capability == capability
    }

    pub fn require(&self, principal: &Pubkey, capability: u8) -> OracleResult<()> {
        if self.principal != *principal || !self.has(capability) {
            return Err(OracleError::Unauthorized);
        }
        Ok(())
    }

    pub fn grant(&mut self, principal: Pubkey, capabilities: u8, bump: u8) -> OracleResult<()> {
        if capabilities == 0 || capabilities & !capability::ALL != 0 {
            return Err(OracleError::InvalidParams);
        }
        self.principal = principal;
        self.capabilities |= capabilities;
        self.bump = bump;
        Ok(())
    }

    pub fn revoke(&mut self, capabilities: u8) {
        self.capabilities &= !capabilities;
    }
}
