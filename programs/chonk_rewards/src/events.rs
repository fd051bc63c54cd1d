use anchor_lang::prelude::*;

/// Remainder and prior claimed are reported separately so indexers can check
/// `budget = configured_budget + remainder` without reading the old epoch.
#[event]
pub struct EpochRolled {
    pub epoch_id: u64,
    pub start_time: i64,
    pub end_time: i64,
    pub configured_budget: u64,
    pub resource_snapshot: u64,
    pub prior_claimed: u64,
    pub remainder: u64,
}

#[event]
pub struct PointsClaimed {
    pub participant: Pubkey,
    pub referrer: Option<Pubkey>,
    pub epoch_id: u64,
    pub amount: u64,
    pub referral_bonus: u64,
    pub eligible_resource: u64,
    pub forced: bool,
}

#[event]
pub struct PointsSpent {
    pub participant: Pubkey,
    pub caller: Pubkey,
    pub amount: u64,
    pub balance: u64,
}

#[event]
pub struct PointsConverted {
    pub participant: Pubkey,
    pub points: u64,
    pub tokens: u64,
}

#[event]
pub struct PointsMigrated {
    pub participant: Pubkey,
    pub caller: Pubkey,
    pub assets: u64,
    pub points: u64,
    pub unrevealed: bool,
}

#[event]
pub struct ResourceRecorded {
    pub participant: Pubkey,
    pub epoch_id: u64,
    pub amount: u64,
    pub participant_total: u64,
    pub global_total: u64,
}

#[event]
pub struct ParticipantRegistered {
    pub participant: Pubkey,
    pub referrer: Option<Pubkey>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigField {
    Pause,
    EpochScheduler,
    Economy,
    RewardMint,
    AuthorizedCallers,
    MigrationRates,
}

/// Change notification for anything that reads `Config`.
#[event]
pub struct ConfigUpdated {
    pub field: ConfigField,
    pub admin: Pubkey,
}
