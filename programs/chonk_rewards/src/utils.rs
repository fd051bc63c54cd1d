use anchor_lang::prelude::*;
use solana_sha256_hasher::hashv;

use crate::{
    constants::{BPS_DENOMINATOR, RARITY_TIERS},
    errors::ChonkError,
    state::{Delegate, Epoch, Participant},
};

// -----------------
// Seeds / constants
// -----------------
pub const CONFIG_SEED: &[u8] = b"config_v1";
pub const CLAIM_MANAGER_SEED: &[u8] = b"claim_manager_v1";
pub const RESOURCE_LEDGER_SEED: &[u8] = b"resource_ledger_v1";
pub const EPOCH_SEED: &[u8] = b"epoch_v1";
pub const PARTICIPANT_SEED: &[u8] = b"participant_v1";
pub const DELEGATE_SEED: &[u8] = b"delegate_v1";

pub const MAX_BATCH: usize = 16;
pub const MAX_AUTHORIZED_CALLERS: usize = 16;

// -------------------------
// Epoch history digest
// -------------------------
pub fn epoch_digest(prev_digest: &[u8; 32], epoch: &Epoch) -> [u8; 32] {
    hashv(&[
        b"chonk-rewards:epoch_v1".as_ref(),
        prev_digest.as_ref(),
        epoch.id.to_le_bytes().as_ref(),
        epoch.start_time.to_le_bytes().as_ref(),
        epoch.end_time.to_le_bytes().as_ref(),
        epoch.resource_snapshot.to_le_bytes().as_ref(),
        epoch.configured_budget.to_le_bytes().as_ref(),
        epoch.carried_remainder.to_le_bytes().as_ref(),
        epoch.prior_claimed.to_le_bytes().as_ref(),
    ])
    .to_bytes()
}

// -------------------------
// Proportional math
// -------------------------

/// floor(eligible * budget / snapshot), computed in u128.
pub fn pro_rata_share(eligible: u64, budget: u64, snapshot: u64) -> Result<u64> {
    if eligible == 0 || snapshot == 0 {
        return Ok(0);
    }
    let share = (eligible as u128)
        .checked_mul(budget as u128)
        .ok_or(ChonkError::MathOverflow)?
        .checked_div(snapshot as u128)
        .ok_or(ChonkError::MathOverflow)?;
    u64::try_from(share).map_err(|_| error!(ChonkError::MathOverflow))
}

pub fn referral_bonus(share: u64, referral_bps: u16) -> Result<u64> {
    require!(referral_bps as u64 <= BPS_DENOMINATOR, ChonkError::InvalidBps);
    let bonus = (share as u128)
        .checked_mul(referral_bps as u128)
        .ok_or(ChonkError::MathOverflow)?
        / BPS_DENOMINATOR as u128;
    // bonus <= share, always fits
    Ok(bonus as u64)
}

pub fn tokens_for_points(points: u64, points_per_token: u64) -> Result<u64> {
    require!(points_per_token > 0, ChonkError::SwapRateNotSet);
    let tokens = points / points_per_token;
    require!(tokens > 0, ChonkError::PointAmountTooSmall);
    Ok(tokens)
}

/// Whole tokens to base units for a mint with `decimals`.
pub fn token_base_units(tokens: u64, decimals: u8) -> Result<u64> {
    let scale = 10u64
        .checked_pow(decimals as u32)
        .ok_or(ChonkError::MathOverflow)?;
    Ok(tokens.checked_mul(scale).ok_or(ChonkError::MathOverflow)?)
}

pub fn migration_points(points_per_rarity: &[u64; RARITY_TIERS], rarities: &[u8]) -> Result<u64> {
    require!(rarities.len() <= MAX_BATCH, ChonkError::TooManyEntries);
    rarities.iter().try_fold(0u64, |acc, r| -> Result<u64> {
        let rate = points_per_rarity
            .get(*r as usize)
            .ok_or(ChonkError::InvalidRarity)?;
        Ok(acc.checked_add(*rate).ok_or(ChonkError::MathOverflow)?)
    })
}

// -------------------------
// Claim authorization
// -------------------------

/// The owner may always claim; a sub-account may claim for the main
/// account it is linked to.
pub fn authorize_claimer(
    owner: &Pubkey,
    authority: &Pubkey,
    delegate: Option<&Delegate>,
) -> Result<()> {
    if authority == owner {
        return Ok(());
    }
    let link = delegate.ok_or(ChonkError::Unauthorized)?;
    require_keys_eq!(link.sub_account, *authority, ChonkError::Unauthorized);
    require_keys_eq!(link.main_account, *owner, ChonkError::DelegateMismatch);
    Ok(())
}

// -------------------------
// Shared claim logic
// -------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimOutcome {
    pub eligible_resource: u64,
    pub share: u64,
    pub referral_bonus: u64,
}

/// Settles `participant` against the open `epoch`.
///
/// The epoch and the watermark are updated before any balance is credited,
/// so a nested settlement sees the resource as already paid.
/// A second call with no new resource settles nothing and returns a zero
/// outcome.
pub fn claim_core(
    epoch: &mut Epoch,
    participant: &mut Participant,
    referrer: Option<&mut Participant>,
    referral_bps: u16,
) -> Result<ClaimOutcome> {
    match (participant.referrer, referrer.as_deref()) {
        (Some(expected), Some(acc)) => {
            require_keys_eq!(acc.owner, expected, ChonkError::ReferrerMismatch);
        }
        (None, None) => {}
        _ => return err!(ChonkError::ReferrerMismatch),
    }

    let eligible = participant.eligible_resource(epoch.id);
    let share = pro_rata_share(eligible, epoch.budget, epoch.resource_snapshot)?;
    let bonus = referral_bonus(share, referral_bps)?;

    // effects
    epoch.record_claim(share)?;
    participant.last_settled_resource = participant
        .last_settled_resource
        .checked_add(eligible)
        .ok_or(ChonkError::MathOverflow)?;
    participant.credit(share)?;

    if let Some(acc) = referrer {
        acc.credit(bonus)?;
    }

    Ok(ClaimOutcome {
        eligible_resource: eligible,
        share,
        referral_bonus: if participant.referrer.is_some() { bonus } else { 0 },
    })
}
