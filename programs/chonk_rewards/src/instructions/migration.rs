use anchor_lang::prelude::*;

use crate::{
    errors::ChonkError,
    events::PointsMigrated,
    state::{ClaimManager, Config, Participant},
    utils::migration_points,
    MigratePoints, MAX_BATCH,
};

/// Credits points for burned legacy assets. Epoch budgets are untouched;
/// migrated points are tracked separately in `total_migrated`.
pub fn credit_migration(cm: &mut ClaimManager, participant: &mut Participant, points: u64) -> Result<()> {
    participant.credit(points)?;
    cm.total_migrated = cm
        .total_migrated
        .checked_add(points)
        .ok_or(ChonkError::MathOverflow)?;
    Ok(())
}

pub fn unrevealed_points(cfg: &Config, count: u64) -> Result<u64> {
    require!(count <= MAX_BATCH as u64, ChonkError::TooManyEntries);
    Ok(count
        .checked_mul(cfg.points_per_unrevealed)
        .ok_or(ChonkError::MathOverflow)?)
}

fn migrate(mut ctx: Context<MigratePoints>, owner: Pubkey, assets: u64, points: u64, unrevealed: bool) -> Result<()> {
    let caller = ctx.accounts.caller.key();
    ctx.accounts.config.require_authorized_caller(&caller)?;

    let accounts = &mut ctx.accounts;
    require_keys_eq!(accounts.participant.owner, owner, ChonkError::Unauthorized);
    credit_migration(&mut accounts.claim_manager, &mut accounts.participant, points)?;

    emit!(PointsMigrated {
        participant: owner,
        caller,
        assets,
        points,
        unrevealed,
    });
    msg!(
        "migrate: participant={} assets={} points={} unrevealed={}",
        owner,
        assets,
        points,
        unrevealed,
    );
    Ok(())
}

pub fn burn_nfts_for_points(ctx: Context<MigratePoints>, owner: Pubkey, rarities: Vec<u8>) -> Result<()> {
    let points = migration_points(&ctx.accounts.config.points_per_rarity, &rarities)?;
    migrate(ctx, owner, rarities.len() as u64, points, false)
}

pub fn burn_unrevealed_for_points(ctx: Context<MigratePoints>, owner: Pubkey, count: u64) -> Result<()> {
    let points = unrevealed_points(&ctx.accounts.config, count)?;
    migrate(ctx, owner, count, points, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::RARITY_TIERS;

    #[test]
    fn migration_credits_balance_and_manager() {
        let table: [u64; RARITY_TIERS] = [10, 20, 50, 100, 500];
        let mut cm = ClaimManager::default();
        let mut p = Participant::default();

        let points = migration_points(&table, &[0, 0, 3, 4]).expect("table");
        credit_migration(&mut cm, &mut p, points).expect("credit");
        credit_migration(&mut cm, &mut p, 3 * 7).expect("unrevealed");

        assert_eq!(p.points_balance, 620 + 21);
        assert_eq!(cm.total_migrated, 641);
        // migration never mints epoch budget
        assert_eq!(cm.total_configured, 0);
        assert_eq!(cm.total_claimed, 0);
    }

    #[test]
    fn unrevealed_batches_are_capped() {
        let cfg = Config {
            points_per_unrevealed: 7,
            ..Default::default()
        };
        assert_eq!(unrevealed_points(&cfg, 3).unwrap(), 21);
        assert_eq!(unrevealed_points(&cfg, MAX_BATCH as u64).unwrap(), 7 * MAX_BATCH as u64);
        assert_eq!(
            unrevealed_points(&cfg, MAX_BATCH as u64 + 1).unwrap_err(),
            anchor_lang::error::Error::from(ChonkError::TooManyEntries)
        );
    }

    #[test]
    fn migration_needs_a_listed_caller() {
        let bridge = Pubkey::new_unique();
        let cfg = Config {
            authorized_callers: vec![bridge],
            ..Default::default()
        };
        cfg.require_authorized_caller(&bridge).expect("bridge");
        assert_eq!(
            cfg.require_authorized_caller(&Pubkey::new_unique()).unwrap_err(),
            anchor_lang::error::Error::from(ChonkError::Unauthorized)
        );
    }
}
