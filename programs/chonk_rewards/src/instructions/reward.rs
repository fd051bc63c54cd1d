use anchor_lang::prelude::*;

use crate::{
    errors::ChonkError,
    events::PointsClaimed,
    state::{ClaimManager, Epoch, Participant},
    utils::{authorize_claimer, claim_core, ClaimOutcome},
    ClaimPoints, ForceClaim,
};

/// Runs `claim_core` against the open epoch and rolls the result into the
/// manager's lifetime totals.
pub fn settle(
    cm: &mut ClaimManager,
    epoch: &mut Epoch,
    participant: &mut Participant,
    referrer: Option<&mut Participant>,
    referral_bps: u16,
) -> Result<ClaimOutcome> {
    require!(cm.has_open_epoch(), ChonkError::NoOpenEpoch);
    require!(epoch.id == cm.current_epoch_id, ChonkError::EpochMismatch);

    let outcome = claim_core(epoch, participant, referrer, referral_bps)?;

    cm.total_claimed = cm
        .total_claimed
        .checked_add(outcome.share)
        .ok_or(ChonkError::MathOverflow)?;
    cm.total_referral_paid = cm
        .total_referral_paid
        .checked_add(outcome.referral_bonus)
        .ok_or(ChonkError::MathOverflow)?;

    Ok(outcome)
}

fn emit_claimed(participant: &Participant, epoch_id: u64, outcome: &ClaimOutcome, forced: bool) {
    emit!(PointsClaimed {
        participant: participant.owner,
        referrer: participant.referrer,
        epoch_id,
        amount: outcome.share,
        referral_bonus: outcome.referral_bonus,
        eligible_resource: outcome.eligible_resource,
        forced,
    });

    msg!(
        "claim: participant={} epoch={} amount={} bonus={} forced={}",
        participant.owner,
        epoch_id,
        outcome.share,
        outcome.referral_bonus,
        forced,
    );
}

pub fn claim(mut ctx: Context<ClaimPoints>, owner: Pubkey) -> Result<()> {
    let referral_bps = ctx.accounts.config.referral_bps;
    let accounts = &mut ctx.accounts;

    require_keys_eq!(accounts.participant.owner, owner, ChonkError::Unauthorized);
    authorize_claimer(
        &owner,
        &accounts.authority.key(),
        accounts.delegate.as_deref(),
    )?;

    let outcome = settle(
        &mut accounts.claim_manager,
        &mut accounts.epoch,
        &mut accounts.participant,
        accounts.referrer.as_deref_mut(),
        referral_bps,
    )?;

    emit_claimed(&accounts.participant, accounts.epoch.id, &outcome, false);
    Ok(())
}

/// Settlement forced by an allowlisted program before it changes the
/// participant's point-earning state (e.g. exporting a fed asset).
pub fn force_claim(mut ctx: Context<ForceClaim>, owner: Pubkey) -> Result<()> {
    let cfg = &ctx.accounts.config;
    cfg.require_authorized_caller(&ctx.accounts.caller.key())?;
    let referral_bps = cfg.referral_bps;

    let accounts = &mut ctx.accounts;
    require_keys_eq!(accounts.participant.owner, owner, ChonkError::Unauthorized);

    let outcome = settle(
        &mut accounts.claim_manager,
        &mut accounts.epoch,
        &mut accounts.participant,
        accounts.referrer.as_deref_mut(),
        referral_bps,
    )?;

    emit_claimed(&accounts.participant, accounts.epoch.id, &outcome, true);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Config;

    const DAY: i64 = 86_400;

    fn setup(budget: u64, snapshot: u64) -> (ClaimManager, Epoch) {
        let mut cm = ClaimManager::default();
        let mut epoch = Epoch::default();
        epoch.open(None, 0, DAY, budget, snapshot).expect("genesis");
        cm.current_epoch_id = epoch.id;
        cm.total_configured = budget;
        (cm, epoch)
    }

    fn player(resource: u64) -> Participant {
        let mut p = Participant {
            owner: Pubkey::new_unique(),
            ..Default::default()
        };
        p.record_resource(resource, 0).expect("record");
        p
    }

    #[test]
    fn no_claims_before_first_roll() {
        let mut cm = ClaimManager::default();
        let mut epoch = Epoch::default();
        let mut p = player(10);
        let err = settle(&mut cm, &mut epoch, &mut p, None, 0).unwrap_err();
        assert_eq!(err, anchor_lang::error::Error::from(ChonkError::NoOpenEpoch));
        assert_eq!(p.points_balance, 0);
    }

    #[test]
    fn stale_epoch_is_rejected() {
        let (mut cm, mut epoch) = setup(100, 10);
        cm.current_epoch_id = 2;
        let mut p = player(10);
        let err = settle(&mut cm, &mut epoch, &mut p, None, 0).unwrap_err();
        assert_eq!(err, anchor_lang::error::Error::from(ChonkError::EpochMismatch));
    }

    #[test]
    fn settle_tracks_lifetime_totals() {
        let (mut cm, mut epoch) = setup(1_000, 20);
        let mut referrer = player(0);
        let mut a = player(10);
        a.referrer = Some(referrer.owner);
        let mut b = player(10);

        settle(&mut cm, &mut epoch, &mut a, Some(&mut referrer), 200).expect("a");
        settle(&mut cm, &mut epoch, &mut b, None, 200).expect("b");

        assert_eq!(cm.total_claimed, 1_000);
        assert_eq!(cm.total_referral_paid, 10);
        assert_eq!(referrer.points_balance, 10);
        assert_eq!(a.points_balance, 500);
        assert_eq!(b.points_balance, 500);
        assert_eq!(cm.total_configured, cm.total_claimed + epoch.remainder().unwrap());
    }

    #[test]
    fn force_claim_needs_a_listed_caller() {
        let exporter = Pubkey::new_unique();
        let cfg = Config {
            authorized_callers: vec![exporter],
            ..Default::default()
        };
        cfg.require_authorized_caller(&exporter).expect("exporter");

        // the participant itself cannot force a settlement
        let p = player(10);
        assert_eq!(
            cfg.require_authorized_caller(&p.owner).unwrap_err(),
            anchor_lang::error::Error::from(ChonkError::Unauthorized)
        );
    }

    #[test]
    fn forced_and_voluntary_claims_share_one_watermark() {
        let (mut cm, mut epoch) = setup(300, 30);
        let mut p = player(10);

        // export path settles first
        let forced = settle(&mut cm, &mut epoch, &mut p, None, 0).expect("forced");
        assert_eq!(forced.share, 100);
        // the player's own claim right after finds nothing left
        let own = settle(&mut cm, &mut epoch, &mut p, None, 0).expect("own");
        assert_eq!(own.share, 0);
        assert_eq!(p.points_balance, 100);
        assert_eq!(epoch.claimed, 100);
    }
}
