use anchor_lang::prelude::*;

use crate::{
    errors::ChonkError,
    events::EpochRolled,
    state::{ClaimManager, Config, Epoch},
    RollEpoch,
};

/// Adds a freshly opened epoch to the manager's lifetime totals.
pub fn advance_manager(cm: &mut ClaimManager, epoch_id: u64, configured_budget: u64) -> Result<()> {
    require!(
        epoch_id == cm.current_epoch_id.checked_add(1).ok_or(ChonkError::MathOverflow)?,
        ChonkError::EpochMismatch
    );
    cm.current_epoch_id = epoch_id;
    cm.total_configured = cm
        .total_configured
        .checked_add(configured_budget)
        .ok_or(ChonkError::MathOverflow)?;
    Ok(())
}

/// Only the scheduler rolls. Genesis has no predecessor; every later roll
/// must name the current epoch.
pub fn check_roll(
    cfg: &Config,
    cm: &ClaimManager,
    scheduler: &Pubkey,
    previous: Option<&Epoch>,
) -> Result<()> {
    require_keys_eq!(cfg.epoch_scheduler, *scheduler, ChonkError::Unauthorized);
    match previous {
        None => require!(!cm.has_open_epoch(), ChonkError::EpochMismatch),
        Some(prev) => require!(prev.id == cm.current_epoch_id, ChonkError::EpochMismatch),
    }
    Ok(())
}

pub fn roll_epoch(ctx: Context<RollEpoch>) -> Result<()> {
    let cfg = &ctx.accounts.config;
    let cm = &mut ctx.accounts.claim_manager;
    let previous = ctx.accounts.previous_epoch.as_deref();
    check_roll(cfg, &**cm, &ctx.accounts.scheduler.key(), previous)?;

    let now = Clock::get()?.unix_timestamp;
    let snapshot = ctx.accounts.resource_ledger.total_resource;

    let epoch = &mut ctx.accounts.epoch;
    let remainder = epoch.open(
        previous,
        now,
        cfg.epoch_duration,
        cfg.points_per_period,
        snapshot,
    )?;
    epoch.bump = ctx.bumps.epoch;

    advance_manager(cm, epoch.id, epoch.configured_budget)?;

    emit!(EpochRolled {
        epoch_id: epoch.id,
        start_time: epoch.start_time,
        end_time: epoch.end_time,
        configured_budget: epoch.configured_budget,
        resource_snapshot: epoch.resource_snapshot,
        prior_claimed: epoch.prior_claimed,
        remainder,
    });

    msg!(
        "roll_epoch: id={} budget={} remainder={} snapshot={} end_time={}",
        epoch.id,
        epoch.budget,
        remainder,
        epoch.resource_snapshot,
        epoch.end_time,
    );

    Ok(())
}
