use anchor_lang::prelude::*;

use crate::{
    errors::ChonkError,
    events::{ParticipantRegistered, ResourceRecorded},
    state::{Config, Participant},
    LinkSubAccount, RecordResource, RegisterParticipant, UnlinkSubAccount,
};

/// A referrer must already be registered (its account supplied) and may not
/// be the registrant.
pub fn check_referrer(
    user: &Pubkey,
    referrer: Option<Pubkey>,
    referrer_account: Option<&Participant>,
) -> Result<()> {
    match (referrer, referrer_account) {
        (None, _) => Ok(()),
        (Some(r), _) if r == *user => err!(ChonkError::InvalidReferrer),
        (Some(r), Some(acc)) => {
            require_keys_eq!(acc.owner, r, ChonkError::ReferrerMismatch);
            Ok(())
        }
        (Some(_), None) => err!(ChonkError::ReferrerMismatch),
    }
}

/// A sub-account must be a distinct, real key.
pub fn check_sub_account(owner: &Pubkey, sub_account: &Pubkey) -> Result<()> {
    require!(
        sub_account != owner && *sub_account != Pubkey::default(),
        ChonkError::DelegateMismatch
    );
    Ok(())
}

pub fn check_record(cfg: &Config, caller: &Pubkey, amount: u64) -> Result<()> {
    cfg.require_authorized_caller(caller)?;
    require!(amount > 0, ChonkError::InvalidAmount);
    Ok(())
}

pub fn register_participant(ctx: Context<RegisterParticipant>, referrer: Option<Pubkey>) -> Result<()> {
    let user = ctx.accounts.user.key();
    check_referrer(
        &user,
        referrer,
        ctx.accounts.referrer_participant.as_deref(),
    )?;

    let p = &mut ctx.accounts.participant;
    p.owner = user;
    p.bump = ctx.bumps.participant;
    p.referrer = referrer;
    p.registered_at = Clock::get()?.unix_timestamp;
    p.points_balance = 0;
    p.last_settled_resource = 0;
    p.resource_total = 0;
    p.resource_epoch = 0;
    p.resource_at_epoch_start = 0;

    emit!(ParticipantRegistered {
        participant: user,
        referrer,
    });
    Ok(())
}

pub fn link_sub_account(ctx: Context<LinkSubAccount>, sub_account: Pubkey) -> Result<()> {
    let owner = ctx.accounts.owner.key();
    check_sub_account(&owner, &sub_account)?;

    let d = &mut ctx.accounts.delegate;
    d.main_account = owner;
    d.sub_account = sub_account;
    d.bump = ctx.bumps.delegate;
    d.created_at = Clock::get()?.unix_timestamp;

    msg!("link_sub_account: main={} sub={}", owner, sub_account);
    Ok(())
}

pub fn unlink_sub_account(ctx: Context<UnlinkSubAccount>, sub_account: Pubkey) -> Result<()> {
    // account constraints already tie the delegate to the signer; close = owner
    msg!(
        "unlink_sub_account: main={} sub={}",
        ctx.accounts.owner.key(),
        sub_account
    );
    Ok(())
}

pub fn record_resource(ctx: Context<RecordResource>, owner: Pubkey, amount: u64) -> Result<()> {
    check_record(&ctx.accounts.config, &ctx.accounts.caller.key(), amount)?;

    let epoch_id = ctx.accounts.claim_manager.current_epoch_id;

    let p = &mut ctx.accounts.participant;
    require_keys_eq!(p.owner, owner, ChonkError::Unauthorized);
    p.record_resource(amount, epoch_id)?;

    let ledger = &mut ctx.accounts.resource_ledger;
    ledger.record(amount)?;

    emit!(ResourceRecorded {
        participant: owner,
        epoch_id,
        amount,
        participant_total: p.resource_total,
        global_total: ledger.total_resource,
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Epoch, ResourceLedger};
    use crate::utils::claim_core;

    fn err_of(code: ChonkError) -> anchor_lang::error::Error {
        anchor_lang::error::Error::from(code)
    }

    #[test]
    fn referrer_rules() {
        let user = Pubkey::new_unique();
        let other = Participant {
            owner: Pubkey::new_unique(),
            ..Default::default()
        };

        check_referrer(&user, None, None).expect("no referrer");
        check_referrer(&user, Some(other.owner), Some(&other)).expect("valid");

        assert_eq!(
            check_referrer(&user, Some(user), None).unwrap_err(),
            err_of(ChonkError::InvalidReferrer)
        );
        assert_eq!(
            check_referrer(&user, Some(other.owner), None).unwrap_err(),
            err_of(ChonkError::ReferrerMismatch)
        );
        assert_eq!(
            check_referrer(&user, Some(Pubkey::new_unique()), Some(&other)).unwrap_err(),
            err_of(ChonkError::ReferrerMismatch)
        );
    }

    #[test]
    fn sub_account_must_differ_from_owner() {
        let owner = Pubkey::new_unique();
        check_sub_account(&owner, &Pubkey::new_unique()).expect("fresh key");
        assert_eq!(
            check_sub_account(&owner, &owner).unwrap_err(),
            err_of(ChonkError::DelegateMismatch)
        );
        assert_eq!(
            check_sub_account(&owner, &Pubkey::default()).unwrap_err(),
            err_of(ChonkError::DelegateMismatch)
        );
    }

    #[test]
    fn resource_comes_only_from_listed_callers() {
        let feeder = Pubkey::new_unique();
        let cfg = Config {
            authorized_callers: vec![feeder],
            ..Default::default()
        };

        check_record(&cfg, &feeder, 3).expect("feeder");
        assert_eq!(
            check_record(&cfg, &Pubkey::new_unique(), 3).unwrap_err(),
            err_of(ChonkError::Unauthorized)
        );
        assert_eq!(
            check_record(&cfg, &feeder, 0).unwrap_err(),
            err_of(ChonkError::InvalidAmount)
        );
    }

    #[test]
    fn ledger_and_participant_totals_agree() {
        let mut ledger = ResourceLedger::default();
        let mut a = Participant::default();
        let mut b = Participant::default();

        for (p, amt) in [(&mut a, 4u64), (&mut b, 6u64)] {
            p.record_resource(amt, 0).expect("record");
            ledger.record(amt).expect("ledger");
        }
        a.record_resource(5, 1).expect("record");
        ledger.record(5).expect("ledger");

        assert_eq!(ledger.total_resource, a.resource_total + b.resource_total);
        // recorded during epoch 1, so not part of epoch 1's denominator
        assert_eq!(a.resource_before_epoch(1), 4);
        assert_eq!(a.resource_before_epoch(2), 9);
    }

    #[test]
    fn resource_fed_mid_epoch_waits_for_next_snapshot() {
        let mut ledger = ResourceLedger::default();
        let mut p = Participant::default();
        p.record_resource(10, 0).expect("record");
        ledger.record(10).expect("ledger");

        let mut e1 = Epoch::default();
        e1.open(None, 0, 100, 1_000, ledger.total_resource).expect("e1");

        // fed after the snapshot was taken
        p.record_resource(10, e1.id).expect("record");
        ledger.record(10).expect("ledger");

        let out = claim_core(&mut e1, &mut p, None, 0).expect("claim");
        assert_eq!(out.eligible_resource, 10);
        assert_eq!(out.share, 1_000);

        let mut e2 = Epoch::default();
        e2.open(Some(&e1), e1.end_time, 100, 1_000, ledger.total_resource)
            .expect("e2");
        let out = claim_core(&mut e2, &mut p, None, 0).expect("claim");
        assert_eq!(out.eligible_resource, 10);
        assert_eq!(out.share, 500);
    }
}
