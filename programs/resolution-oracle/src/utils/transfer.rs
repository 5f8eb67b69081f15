use anchor_lang::prelude::*;
use anchor_spl::token::{self, Transfer};
use crate::constants::CONFIG_SEED;

/// Move `amount` from a staker's token account into the vault.
pub fn deposit_to_vault<'info>(
    token_program: AccountInfo<'info>,
    from: AccountInfo<'info>,
    vault: AccountInfo<'info>,
    authority: AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    token::transfer(
        CpiContext::new(
            token_program,
            Transfer {
                from,
                to: vault,
                authority,
            },
        ),
        amount,
    )
}

/// Pay `amount` out of the vault, signed by the config PDA.
pub fn pay_from_vault<'info>(
    token_program: AccountInfo<'info>,
    vault: AccountInfo<'info>,
    to: AccountInfo<'info>,
    config: AccountInfo<'info>,
    config_bump: u8,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    let seeds = &[CONFIG_SEED, &[config_bump]];
    let signer = &[&seeds[..]];

    token::transfer(
        CpiContext::new_with_signer(
            token_program,
            Transfer {
                from: vault,
                to,
                authority: config,
            },
            signer,
        ),
        amount,
    )
}
