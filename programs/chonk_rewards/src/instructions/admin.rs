use anchor_lang::prelude::*;

use anchor_spl::token::{self, SetAuthority};
use anchor_spl::token::spl_token::instruction::AuthorityType;

use crate::constants::*;
use crate::errors::ChonkError;
use crate::events::{ConfigField, ConfigUpdated};
use crate::state::Config;
use crate::{
    InitializeClaimManager, InitializeConfig, SetEpochScheduler, SetMigrationRates, SetPause,
    SetRewardMint, UpdateEconomy,
};

/// Economy knobs an admin can retune between epochs.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct EconomyParams {
    pub points_per_period: u64,
    pub epoch_duration: i64,
    pub points_per_token: u64,
    pub swap_enabled: bool,
    pub referral_bps: u16,
}

impl EconomyParams {
    pub fn validate(&self) -> Result<()> {
        require!(self.epoch_duration > 0, ChonkError::InvalidDuration);
        require!(
            self.referral_bps as u64 <= BPS_DENOMINATOR,
            ChonkError::InvalidBps
        );
        Ok(())
    }

    pub fn apply(&self, cfg: &mut Config) {
        cfg.points_per_period = self.points_per_period;
        cfg.epoch_duration = self.epoch_duration;
        cfg.points_per_token = self.points_per_token;
        cfg.swap_enabled = self.swap_enabled;
        cfg.referral_bps = self.referral_bps;
    }
}

fn notify(field: ConfigField, admin: Pubkey) {
    emit!(ConfigUpdated { field, admin });
}

pub fn initialize_config(
    ctx: Context<InitializeConfig>,
    points_per_period: u64,
    epoch_duration: i64,
) -> Result<()> {
    require!(epoch_duration > 0, ChonkError::InvalidDuration);

    let cfg: &mut Account<Config> = &mut ctx.accounts.config;

    cfg.admin = ctx.accounts.admin.key();
    cfg.bump = ctx.bumps.config;

    // the admin schedules epochs until a keeper is assigned
    cfg.epoch_scheduler = cfg.admin;

    cfg.paused = false;
    cfg.swap_enabled = false;

    cfg.points_per_period = points_per_period;
    cfg.epoch_duration = epoch_duration;
    cfg.points_per_token = 0;
    cfg.referral_bps = DEFAULT_REFERRAL_BPS;
    cfg.reward_mint = Pubkey::default();

    cfg.authorized_callers = Vec::new();
    cfg.points_per_rarity = [0; RARITY_TIERS];
    cfg.points_per_unrevealed = 0;

    cfg.version = INITIAL_VERSION;

    msg!(
        "initialize_config: admin={} points_per_period={} epoch_duration={}",
        cfg.admin,
        points_per_period,
        epoch_duration,
    );

    Ok(())
}

pub fn initialize_claim_manager(ctx: Context<InitializeClaimManager>) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), ChonkError::Unauthorized);

    let cm = &mut ctx.accounts.claim_manager;
    cm.bump = ctx.bumps.claim_manager;
    cm.current_epoch_id = GENESIS_EPOCH_ID;
    cm.total_configured = 0;
    cm.total_claimed = 0;
    cm.total_referral_paid = 0;
    cm.total_migrated = 0;
    cm.version = INITIAL_VERSION;

    let ledger = &mut ctx.accounts.resource_ledger;
    ledger.bump = ctx.bumps.resource_ledger;
    ledger.total_resource = 0;

    Ok(())
}

pub fn set_pause(ctx: Context<SetPause>, paused: bool) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), ChonkError::Unauthorized);
    cfg.paused = paused;
    notify(ConfigField::Pause, cfg.admin);
    Ok(())
}

pub fn set_epoch_scheduler(ctx: Context<SetEpochScheduler>, scheduler: Pubkey) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), ChonkError::Unauthorized);
    cfg.epoch_scheduler = scheduler;
    notify(ConfigField::EpochScheduler, cfg.admin);
    Ok(())
}

pub fn update_economy(ctx: Context<UpdateEconomy>, params: EconomyParams) -> Result<()> {
    params.validate()?;

    let cfg = &mut ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), ChonkError::Unauthorized);

    params.apply(cfg);
    notify(ConfigField::Economy, cfg.admin);
    Ok(())
}

pub fn set_migration_rates(
    ctx: Context<SetMigrationRates>,
    points_per_rarity: [u64; RARITY_TIERS],
    points_per_unrevealed: u64,
) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), ChonkError::Unauthorized);

    cfg.points_per_rarity = points_per_rarity;
    cfg.points_per_unrevealed = points_per_unrevealed;
    notify(ConfigField::MigrationRates, cfg.admin);
    Ok(())
}

pub fn set_reward_mint(ctx: Context<SetRewardMint>) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), ChonkError::Unauthorized);

    // ✅ config PDA becomes the mint authority so point swaps can mint
    let cpi_program = ctx.accounts.token_program.to_account_info();
    let cpi_accounts = SetAuthority {
        account_or_mint: ctx.accounts.reward_mint.to_account_info(),
        current_authority: ctx.accounts.admin.to_account_info(),
    };

    token::set_authority(
        CpiContext::new(cpi_program, cpi_accounts),
        AuthorityType::MintTokens,
        Some(cfg.key()),
    )?;

    let mint_key = ctx.accounts.reward_mint.key();
    let cfg = &mut ctx.accounts.config;
    cfg.reward_mint = mint_key;
    notify(ConfigField::RewardMint, cfg.admin);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> EconomyParams {
        EconomyParams {
            points_per_period: 1_000_000,
            epoch_duration: DEFAULT_EPOCH_DURATION_SECS,
            points_per_token: 100,
            swap_enabled: true,
            referral_bps: DEFAULT_REFERRAL_BPS,
        }
    }

    #[test]
    fn economy_params_apply_to_config() {
        let mut cfg = Config::default();
        let p = params();
        p.validate().expect("valid");
        p.apply(&mut cfg);

        assert_eq!(cfg.points_per_period, 1_000_000);
        assert_eq!(cfg.epoch_duration, DEFAULT_EPOCH_DURATION_SECS);
        assert_eq!(cfg.points_per_token, 100);
        assert!(cfg.swap_enabled);
        assert_eq!(cfg.referral_bps, 200);
    }

    #[test]
    fn economy_params_reject_bad_values() {
        let mut p = params();
        p.referral_bps = 10_001;
        assert_eq!(p.validate().unwrap_err(), anchor_lang::error::Error::from(ChonkError::InvalidBps));

        let mut p = params();
        p.epoch_duration = 0;
        assert_eq!(p.validate().unwrap_err(), anchor_lang::error::Error::from(ChonkError::InvalidDuration));
    }
}
