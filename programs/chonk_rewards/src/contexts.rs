// programs/chonk_rewards/src/contexts.rs

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::state::{ClaimManager, Config, Delegate, Epoch, Participant, ResourceLedger};

// ----------------------------
// Admin / ConfigStore
// ----------------------------

#[derive(Accounts)]
pub struct InitializeConfig<'info> {
    #[account(
        init,
        payer = admin,
        space = 8 + Config::INIT_SPACE,
        seeds = [crate::CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, Config>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct InitializeClaimManager<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        init,
        payer = admin,
        space = 8 + ClaimManager::INIT_SPACE,
        seeds = [crate::CLAIM_MANAGER_SEED, config.key().as_ref()],
        bump
    )]
    pub claim_manager: Account<'info, ClaimManager>,

    #[account(
        init,
        payer = admin,
        space = 8 + ResourceLedger::INIT_SPACE,
        seeds = [crate::RESOURCE_LEDGER_SEED, config.key().as_ref()],
        bump
    )]
    pub resource_ledger: Account<'info, ResourceLedger>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct SetPause<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    pub admin: Signer<'info>,
}

#[derive(Accounts)]
pub struct SetEpochScheduler<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    pub admin: Signer<'info>,
}

#[derive(Accounts)]
pub struct UpdateEconomy<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    pub admin: Signer<'info>,
}

#[derive(Accounts)]
pub struct SetMigrationRates<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    pub admin: Signer<'info>,
}

#[derive(Accounts)]
pub struct SetRewardMint<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    /// Reward token mint; its mint authority moves to the config PDA.
    #[account(mut)]
    pub reward_mint: Account<'info, Mint>,

    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

// ----------------------------
// Authorized callers (allowlist)
// ----------------------------

#[derive(Accounts)]
pub struct AddAuthorizedCaller<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    pub admin: Signer<'info>,
}

#[derive(Accounts)]
pub struct RemoveAuthorizedCaller<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    pub admin: Signer<'info>,
}

// ----------------------------
// PeriodLedger
// ----------------------------

#[derive(Accounts)]
pub struct RollEpoch<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::CLAIM_MANAGER_SEED, config.key().as_ref()],
        bump = claim_manager.bump,
    )]
    pub claim_manager: Account<'info, ClaimManager>,

    #[account(
        seeds = [crate::RESOURCE_LEDGER_SEED, config.key().as_ref()],
        bump = resource_ledger.bump,
    )]
    pub resource_ledger: Account<'info, ResourceLedger>,

    /// Absent only for the genesis roll.
    #[account(
        seeds = [crate::EPOCH_SEED, claim_manager.current_epoch_id.to_le_bytes().as_ref()],
        bump = previous_epoch.bump,
    )]
    pub previous_epoch: Option<Account<'info, Epoch>>,

    #[account(
        init,
        payer = scheduler,
        space = 8 + Epoch::INIT_SPACE,
        seeds = [
            crate::EPOCH_SEED,
            claim_manager.current_epoch_id.saturating_add(1).to_le_bytes().as_ref()
        ],
        bump
    )]
    pub epoch: Account<'info, Epoch>,

    #[account(mut)]
    pub scheduler: Signer<'info>,

    pub system_program: Program<'info, System>,
}

// ----------------------------
// Identity / ResourceLedger
// ----------------------------

#[derive(Accounts)]
#[instruction(referrer: Option<Pubkey>)]
pub struct RegisterParticipant<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        init,
        payer = user,
        space = 8 + Participant::INIT_SPACE,
        seeds = [crate::PARTICIPANT_SEED, user.key().as_ref()],
        bump
    )]
    pub participant: Account<'info, Participant>,

    /// Required when `referrer` is set.
    #[account(
        seeds = [crate::PARTICIPANT_SEED, referrer_participant.owner.as_ref()],
        bump = referrer_participant.bump,
    )]
    pub referrer_participant: Option<Account<'info, Participant>>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(sub_account: Pubkey)]
pub struct LinkSubAccount<'info> {
    #[account(
        seeds = [crate::PARTICIPANT_SEED, owner.key().as_ref()],
        bump = participant.bump,
        has_one = owner
    )]
    pub participant: Account<'info, Participant>,

    #[account(
        init,
        payer = owner,
        space = 8 + Delegate::INIT_SPACE,
        seeds = [crate::DELEGATE_SEED, sub_account.as_ref()],
        bump
    )]
    pub delegate: Account<'info, Delegate>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(sub_account: Pubkey)]
pub struct UnlinkSubAccount<'info> {
    #[account(
        mut,
        close = owner,
        seeds = [crate::DELEGATE_SEED, sub_account.as_ref()],
        bump = delegate.bump,
        constraint = delegate.main_account == owner.key() @ crate::errors::ChonkError::DelegateMismatch
    )]
    pub delegate: Account<'info, Delegate>,

    #[account(mut)]
    pub owner: Signer<'info>,
}

#[derive(Accounts)]
#[instruction(owner: Pubkey)]
pub struct RecordResource<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        seeds = [crate::CLAIM_MANAGER_SEED, config.key().as_ref()],
        bump = claim_manager.bump,
    )]
    pub claim_manager: Account<'info, ClaimManager>,

    #[account(
        mut,
        seeds = [crate::RESOURCE_LEDGER_SEED, config.key().as_ref()],
        bump = resource_ledger.bump,
    )]
    pub resource_ledger: Account<'info, ResourceLedger>,

    #[account(
        mut,
        seeds = [crate::PARTICIPANT_SEED, owner.as_ref()],
        bump = participant.bump,
    )]
    pub participant: Account<'info, Participant>,

    /// Feeding / import program or wallet on the allowlist.
    pub caller: Signer<'info>,
}

// ----------------------------
// ClaimEngine
// ----------------------------

#[derive(Accounts)]
#[instruction(owner: Pubkey)]
pub struct ClaimPoints<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::CLAIM_MANAGER_SEED, config.key().as_ref()],
        bump = claim_manager.bump,
    )]
    pub claim_manager: Account<'info, ClaimManager>,

    #[account(
        mut,
        seeds = [crate::EPOCH_SEED, claim_manager.current_epoch_id.to_le_bytes().as_ref()],
        bump = epoch.bump,
    )]
    pub epoch: Account<'info, Epoch>,

    #[account(
        mut,
        seeds = [crate::PARTICIPANT_SEED, owner.as_ref()],
        bump = participant.bump,
    )]
    pub participant: Account<'info, Participant>,

    /// Required iff the participant has a referrer.
    #[account(
        mut,
        seeds = [crate::PARTICIPANT_SEED, referrer.owner.as_ref()],
        bump = referrer.bump,
    )]
    pub referrer: Option<Account<'info, Participant>>,

    /// Present when a sub-account claims for its main account.
    #[account(
        seeds = [crate::DELEGATE_SEED, authority.key().as_ref()],
        bump = delegate.bump,
    )]
    pub delegate: Option<Account<'info, Delegate>>,

    pub authority: Signer<'info>,
}

#[derive(Accounts)]
#[instruction(owner: Pubkey)]
pub struct ForceClaim<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::CLAIM_MANAGER_SEED, config.key().as_ref()],
        bump = claim_manager.bump,
    )]
    pub claim_manager: Account<'info, ClaimManager>,

    #[account(
        mut,
        seeds = [crate::EPOCH_SEED, claim_manager.current_epoch_id.to_le_bytes().as_ref()],
        bump = epoch.bump,
    )]
    pub epoch: Account<'info, Epoch>,

    #[account(
        mut,
        seeds = [crate::PARTICIPANT_SEED, owner.as_ref()],
        bump = participant.bump,
    )]
    pub participant: Account<'info, Participant>,

    #[account(
        mut,
        seeds = [crate::PARTICIPANT_SEED, referrer.owner.as_ref()],
        bump = referrer.bump,
    )]
    pub referrer: Option<Account<'info, Participant>>,

    /// Export program or other allowlisted caller settling before it
    /// changes the participant's holdings.
    pub caller: Signer<'info>,
}

// ----------------------------
// PointsSink
// ----------------------------

#[derive(Accounts)]
#[instruction(owner: Pubkey)]
pub struct SpendPoints<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::PARTICIPANT_SEED, owner.as_ref()],
        bump = participant.bump,
    )]
    pub participant: Account<'info, Participant>,

    pub caller: Signer<'info>,
}

#[derive(Accounts)]
pub struct ConvertPointsToTokens<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::PARTICIPANT_SEED, user.key().as_ref()],
        bump = participant.bump,
    )]
    pub participant: Account<'info, Participant>,

    #[account(mut)]
    pub reward_mint: Account<'info, Mint>,

    #[account(
        mut,
        constraint = user_token_account.mint == reward_mint.key(),
        constraint = user_token_account.owner == user.key()
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    pub user: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

/// Shared by both legacy-asset migration paths.
#[derive(Accounts)]
#[instruction(owner: Pubkey)]
pub struct MigratePoints<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::CLAIM_MANAGER_SEED, config.key().as_ref()],
        bump = claim_manager.bump,
    )]
    pub claim_manager: Account<'info, ClaimManager>,

    #[account(
        mut,
        seeds = [crate::PARTICIPANT_SEED, owner.as_ref()],
        bump = participant.bump,
    )]
    pub participant: Account<'info, Participant>,

    pub caller: Signer<'info>,
}
