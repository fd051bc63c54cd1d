use anchor_lang::prelude::*;

#[error_code]
pub enum ChonkError {
    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("Protocol paused")]
    Paused,
    #[msg("Math overflow")]
    MathOverflow,

    // -----------------
    // Epochs
    // -----------------
    #[msg("Current epoch has not ended yet")]
    InvalidPeriod,
    #[msg("No epoch has been rolled yet")]
    NoOpenEpoch,
    #[msg("Previous epoch account does not match the current epoch")]
    EpochMismatch,
    #[msg("Invalid epoch duration")]
    InvalidDuration,

    // -----------------
    // Claims (invariant guards)
    // -----------------
    #[msg("Claim exceeds the remaining epoch budget")]
    ClaimExceedsBudget,
    #[msg("Epoch claimed more than its budget")]
    BudgetUnderflow,

    // -----------------
    // Participants
    // -----------------
    #[msg("Participant cannot refer itself")]
    InvalidReferrer,
    #[msg("Referrer account does not match the recorded referrer")]
    ReferrerMismatch,
    #[msg("Sub-account is not linked to this participant")]
    DelegateMismatch,

    // -----------------
    // Points
    // -----------------
    #[msg("Not enough points")]
    NotEnoughPoints,
    #[msg("Invalid amount (must be > 0)")]
    InvalidAmount,
    #[msg("Point amount converts to zero tokens")]
    PointAmountTooSmall,
    #[msg("Point swap is disabled")]
    SwapDisabled,
    #[msg("Points per token rate not set")]
    SwapRateNotSet,
    #[msg("Reward mint not set")]
    RewardMintNotSet,
    #[msg("Reward mint does not match config")]
    RewardMintMismatch,
    #[msg("Invalid basis points (must be <= 10000)")]
    InvalidBps,
    #[msg("Unknown rarity tier")]
    InvalidRarity,
    #[msg("Too many entries")]
    TooManyEntries,

    // -----------------
    // Authorized callers
    // -----------------
    #[msg("Authorized caller list is full")]
    CallerListFull,
    #[msg("Caller already exists in allowlist")]
    CallerAlreadyExists,
    #[msg("Caller not found in allowlist")]
    CallerNotFound,
}
