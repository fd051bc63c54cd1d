use anchor_lang::prelude::*;

pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;
pub mod contexts;
pub mod constants;

pub use utils::*;
pub use instructions::*;
pub use state::*;
pub use errors::*;
pub use events::*;
pub use contexts::*;
pub use constants::*;

use solana_security_txt::security_txt;

security_txt! {
    // Required fields
    name: "Chonk Rewards",
    project_url: "https://chonks.gg",
    contacts: "email:security@chonks.gg",
    policy: "https://chonks.gg/security",

    // Optional fields
    preferred_languages: "en"
}

declare_id!("5NCBg1garV3ajS1bfnVTeFgdmPFyMdqZ5tstoRsEBGhU");

#[program]
pub mod chonk_rewards {
    use super::*;
    use crate::instructions::{admin, callers, lifecycle, migration, points, registry, reward};

    // ----------------------------
    // Admin / config
    // ----------------------------
    pub fn initialize_config(
        ctx: Context<InitializeConfig>,
        points_per_period: u64,
        epoch_duration: i64,
    ) -> Result<()> {
        admin::initialize_config(ctx, points_per_period, epoch_duration)
    }

    pub fn initialize_claim_manager(ctx: Context<InitializeClaimManager>) -> Result<()> {
        admin::initialize_claim_manager(ctx)
    }

    pub fn set_pause(ctx: Context<SetPause>, paused: bool) -> Result<()> {
        admin::set_pause(ctx, paused)
    }

    pub fn set_epoch_scheduler(ctx: Context<SetEpochScheduler>, scheduler: Pubkey) -> Result<()> {
        admin::set_epoch_scheduler(ctx, scheduler)
    }

    pub fn update_economy(ctx: Context<UpdateEconomy>, params: EconomyParams) -> Result<()> {
        admin::update_economy(ctx, params)
    }

    pub fn set_reward_mint(ctx: Context<SetRewardMint>) -> Result<()> {
        admin::set_reward_mint(ctx)
    }

    pub fn set_migration_rates(
        ctx: Context<SetMigrationRates>,
        points_per_rarity: [u64; RARITY_TIERS],
        points_per_unrevealed: u64,
    ) -> Result<()> {
        admin::set_migration_rates(ctx, points_per_rarity, points_per_unrevealed)
    }

    // ----------------------------
    // Authorized callers
    // ----------------------------
    pub fn add_authorized_caller(ctx: Context<AddAuthorizedCaller>, caller: Pubkey) -> Result<()> {
        callers::add_authorized_caller(ctx, caller)
    }

    pub fn remove_authorized_caller(ctx: Context<RemoveAuthorizedCaller>, caller: Pubkey) -> Result<()> {
        callers::remove_authorized_caller(ctx, caller)
    }

    // ----------------------------
    // Epochs
    // ----------------------------
    pub fn roll_epoch(ctx: Context<RollEpoch>) -> Result<()> {
        lifecycle::roll_epoch(ctx)
    }

    // ----------------------------
    // Participants / resource
    // ----------------------------
    pub fn register_participant(
        ctx: Context<RegisterParticipant>,
        referrer: Option<Pubkey>,
    ) -> Result<()> {
        registry::register_participant(ctx, referrer)
    }

    pub fn link_sub_account(ctx: Context<LinkSubAccount>, sub_account: Pubkey) -> Result<()> {
        registry::link_sub_account(ctx, sub_account)
    }

    pub fn unlink_sub_account(ctx: Context<UnlinkSubAccount>, sub_account: Pubkey) -> Result<()> {
        registry::unlink_sub_account(ctx, sub_account)
    }

    pub fn record_resource(ctx: Context<RecordResource>, owner: Pubkey, amount: u64) -> Result<()> {
        registry::record_resource(ctx, owner, amount)
    }

    // ----------------------------
    // Claims
    // ----------------------------
    pub fn claim(ctx: Context<ClaimPoints>, owner: Pubkey) -> Result<()> {
        reward::claim(ctx, owner)
    }

    pub fn force_claim(ctx: Context<ForceClaim>, owner: Pubkey) -> Result<()> {
        reward::force_claim(ctx, owner)
    }

    // ----------------------------
    // Points sink
    // ----------------------------
    pub fn spend_points(ctx: Context<SpendPoints>, owner: Pubkey, amount: u64) -> Result<()> {
        points::spend_points(ctx, owner, amount)
    }

    pub fn convert_points_to_tokens(ctx: Context<ConvertPointsToTokens>, amount: u64) -> Result<()> {
        points::convert_points_to_tokens(ctx, amount)
    }

    pub fn burn_nfts_for_points(
        ctx: Context<MigratePoints>,
        owner: Pubkey,
        rarities: Vec<u8>,
    ) -> Result<()> {
        migration::burn_nfts_for_points(ctx, owner, rarities)
    }

    pub fn burn_unrevealed_for_points(
        ctx: Context<MigratePoints>,
        owner: Pubkey,
        count: u64,
    ) -> Result<()> {
        migration::burn_unrevealed_for_points(ctx, owner, count)
    }
}
