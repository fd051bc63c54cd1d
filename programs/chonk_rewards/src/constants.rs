// Centralized Protocol Constants

// Epoch Timing
// ============

/// Length of one reward epoch in seconds (one day).
/// `end_time = start_time + epoch_duration`, configurable per deployment.
pub const DEFAULT_EPOCH_DURATION_SECS: i64 = 86_400;

/// Epoch id held by the claim manager before the first roll.
/// No epoch account is ever created for this id.
pub const GENESIS_EPOCH_ID: u64 = 0;

// Economy Defaults
// ================

/// Denominator for every basis-point rate in the program.
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Default referral bonus paid to a referrer on each claim (basis points). 200 = 2%.
pub const DEFAULT_REFERRAL_BPS: u16 = 200;

/// Number of rarity tiers in the legacy-asset migration table.
pub const RARITY_TIERS: usize = 5;

/// Initial version for account structures.
pub const INITIAL_VERSION: u16 = 1;
