use anchor_lang::prelude::*;
use pyth_solana_receiver_sdk::price_update::PriceUpdateV2;
use crate::clock::{SysvarClock, TimeSource};
use crate::constants::{CONFIG_SEED, ORACLE_SOURCE_SEED, ROLE_SEED};
use crate::state::{capability, OracleConfig, OracleKind, OracleSource, RoleGrant};
use crate::events::{OracleSourceAdded, OracleSourceUpdated};
use crate::errors::OracleError;

#[derive(Accounts)]
#[instruction(feed: Pubkey)]
pub struct AddOracleSource<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, OracleConfig>,

    #[account(
        seeds = [ROLE_SEED, oracle_admin.key().as_ref()],
        bump = role.bump,
    )]
    pub role: Account<'info, RoleGrant>,

    #[account(
        init,
        seeds = [ORACLE_SOURCE_SEED, feed.as_ref()],
        bump,
        payer = oracle_admin,
        space = OracleSource::LEN
    )]
    pub oracle_source: Account<'info, OracleSource>,

    #[account(mut)]
    pub oracle_admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn process_add_oracle_source(
    ctx: Context<AddOracleSource>,
    feed: Pubkey,
    kind: OracleKind,
    reliability_bps: u16,
) -> Result<()> {
    ctx.accounts.role.require(&ctx.accounts.oracle_admin.key(), capability::ORACLE_ADMIN)?;
    ctx.accounts.config.require_active()?;

    let now = SysvarClock.now()?;
    ctx.accounts
        .oracle_source
        .register(kind, feed, reliability_bps, now, ctx.bumps.oracle_source)?;

    emit!(OracleSourceAdded {
        feed,
        kind,
        reliability_bps,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct SetOracleSourceActive<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, OracleConfig>,

    #[account(
        seeds = [ROLE_SEED, oracle_admin.key().as_ref()],
        bump = role.bump,
    )]
    pub role: Account<'info, RoleGrant>,

    #[account(
        mut,
        seeds = [ORACLE_SOURCE_SEED, oracle_source.feed.as_ref()],
        bump = oracle_source.bump,
    )]
    pub oracle_source: Account<'info, OracleSource>,

    pub oracle_admin: Signer<'info>,
}

pub fn process_set_oracle_source_active(ctx: Context<SetOracleSourceActive>, active: bool) -> Result<()> {
    ctx.accounts.role.require(&ctx.accounts.oracle_admin.key(), capability::ORACLE_ADMIN)?;
    ctx.accounts.config.require_active()?;

    let source = &mut ctx.accounts.oracle_source;
    source.set_active(active);

    emit!(OracleSourceUpdated {
        feed: source.feed,
        last_update: source.last_update,
        active,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct RefreshOracleSource<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, OracleConfig>,

    #[account(
        mut,
        seeds = [ORACLE_SOURCE_SEED, oracle_source.feed.as_ref()],
        bump = oracle_source.bump,
    )]
    pub oracle_source: Account<'info, OracleSource>,

    #[account(
        constraint = price_update.key() == oracle_source.feed @ OracleError::InvalidPythFeed,
    )]
    pub price_update: Account<'info, PriceUpdateV2>,
}

/// Permissionless liveness ping for a Pyth-backed source.
pub fn process_refresh_oracle_source(ctx: Context<RefreshOracleSource>) -> Result<()> {
    ctx.accounts.config.require_active()?;
    let source = &mut ctx.accounts.oracle_source;
    require!(source.kind == OracleKind::Pyth, OracleError::InvalidPythFeed);

    let now = SysvarClock.now()?;
    let publish_time = ctx.accounts.price_update.price_message.publish_time;
    source.refresh(publish_time, now)?;

    msg!("Oracle source {} refreshed at {}", source.feed, publish_time);
    emit!(OracleSourceUpdated {
        feed: source.feed,
        last_update: source.last_update,
        active: source.active,
    });

    Ok(())
}
