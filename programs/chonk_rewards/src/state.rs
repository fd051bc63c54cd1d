use anchor_lang::prelude::*;

use crate::constants::RARITY_TIERS;
use crate::errors::ChonkError;

#[account]
#[derive(InitSpace, Default)]
pub struct Config {
    pub admin: Pubkey,
    pub bump: u8,

    /// The only key allowed to roll epochs.
    pub epoch_scheduler: Pubkey,

    pub paused: bool,
    pub swap_enabled: bool,

    /// Budget added to every new epoch, in points.
    pub points_per_period: u64,
    pub epoch_duration: i64,

    /// Points burned per whole reward token. 0 = swap not configured.
    pub points_per_token: u64,
    pub referral_bps: u16,

    /// SPL mint for point swaps; mint authority is this config PDA.
    /// `Pubkey::default()` until set.
    pub reward_mint: Pubkey,

    /// Program/wallet keys allowed to spend points, force claims,
    /// record resource and credit migrations.
    /// NOTE: fixed max_len to keep account size deterministic.
    #[max_len(16)]
    pub authorized_callers: Vec<Pubkey>,

    /// Points credited per burned legacy NFT, indexed by rarity tier.
    pub points_per_rarity: [u64; RARITY_TIERS],
    pub points_per_unrevealed: u64,

    pub version: u16,
}

impl Config {
    pub fn is_authorized_caller(&self, key: &Pubkey) -> bool {
        self.authorized_callers.contains(key)
    }

    pub fn reward_mint_set(&self) -> bool {
        self.reward_mint != Pubkey::default()
    }
}

#[account]
#[derive(InitSpace, Default)]
pub struct ClaimManager {
    pub bump: u8,

    /// 0 until the first roll; afterwards the id of the open epoch.
    pub current_epoch_id: u64,

    // lifetime totals for off-chain reconciliation
    pub total_configured: u64,
    pub total_claimed: u64,
    pub total_referral_paid: u64,
    pub total_migrated: u64,

    pub version: u16,
}

impl ClaimManager {
    pub fn has_open_epoch(&self) -> bool {
        self.current_epoch_id > crate::constants::GENESIS_EPOCH_ID
    }
}

/// Global chonk counter. Only grows.
#[account]
#[derive(InitSpace, Default)]
pub struct ResourceLedger {
    pub bump: u8,
    pub total_resource: u64,
}

impl ResourceLedger {
    pub fn record(&mut self, amount: u64) -> Result<()> {
        self.total_resource = self
            .total_resource
            .checked_add(amount)
            .ok_or(ChonkError::MathOverflow)?;
        Ok(())
    }
}

/// One reward distribution window. Append-only: only `claimed` changes
/// after creation and the account is never closed.
#[account]
#[derive(InitSpace, Default)]
pub struct Epoch {
    pub id: u64,
    pub bump: u8,

    pub start_time: i64,
    pub end_time: i64,

    /// Global resource total at roll time; denominator for every claim.
    pub resource_snapshot: u64,

    pub configured_budget: u64,
    pub carried_remainder: u64,
    /// configured_budget + carried_remainder
    pub budget: u64,
    pub claimed: u64,

    /// Final `claimed` of the previous epoch.
    pub prior_claimed: u64,

    /// sha256 chain over the previous digest and this epoch's immutable fields.
    pub history_digest: [u8; 32],
}

impl Epoch {
    /// Initializes a freshly created epoch account as the successor of
    /// `previous` (or as the genesis epoch) and returns the carried remainder.
    pub fn open(
        &mut self,
        previous: Option<&Epoch>,
        now: i64,
        duration: i64,
        configured_budget: u64,
        resource_snapshot: u64,
    ) -> Result<u64> {
        require!(duration > 0, ChonkError::InvalidDuration);

        let (id, start_time, remainder, prior_claimed, prev_digest) = match previous {
            None => (1u64, now, 0u64, 0u64, [0u8; 32]),
            Some(prev) => {
                require!(prev.is_rollable(now), ChonkError::InvalidPeriod);
                (
                    prev.id.checked_add(1).ok_or(ChonkError::MathOverflow)?,
                    prev.end_time.checked_add(1).ok_or(ChonkError::MathOverflow)?,
                    prev.remainder()?,
                    prev.claimed,
                    prev.history_digest,
                )
            }
        };

        self.id = id;
        self.start_time = start_time;
        self.end_time = start_time
            .checked_add(duration)
            .ok_or(ChonkError::MathOverflow)?;
        self.resource_snapshot = resource_snapshot;
        self.configured_budget = configured_budget;
        self.carried_remainder = remainder;
        self.budget = configured_budget
            .checked_add(remainder)
            .ok_or(ChonkError::MathOverflow)?;
        self.claimed = 0;
        self.prior_claimed = prior_claimed;
        self.history_digest = crate::utils::epoch_digest(&prev_digest, self);

        Ok(remainder)
    }

    pub fn is_rollable(&self, now: i64) -> bool {
        now >= self.end_time
    }

    /// Unclaimed budget; this is exactly what the next roll carries forward.
    pub fn remainder(&self) -> Result<u64> {
        self.budget
            .checked_sub(self.claimed)
            .ok_or_else(|| error!(ChonkError::BudgetUnderflow))
    }

    pub fn record_claim(&mut self, share: u64) -> Result<()> {
        require!(share <= self.remainder()?, ChonkError::ClaimExceedsBudget);
        self.claimed = self
            .claimed
            .checked_add(share)
            .ok_or(ChonkError::MathOverflow)?;
        Ok(())
    }
}

#[account]
#[derive(InitSpace, Default)]
pub struct Participant {
    pub owner: Pubkey,
    pub bump: u8,
    pub referrer: Option<Pubkey>,
    pub registered_at: i64,

    pub points_balance: u64,

    /// Resource already paid out by some past claim.
    pub last_settled_resource: u64,

    /// All-time chonk contributed by this participant.
    pub resource_total: u64,
    /// Epoch during which resource was last recorded, and the value of
    /// `resource_total` when that epoch's first recording happened.
    pub resource_epoch: u64,
    pub resource_at_epoch_start: u64,
}

impl Participant {
    pub fn record_resource(&mut self, amount: u64, current_epoch_id: u64) -> Result<()> {
        if self.resource_epoch != current_epoch_id {
            self.resource_epoch = current_epoch_id;
            self.resource_at_epoch_start = self.resource_total;
        }
        self.resource_total = self
            .resource_total
            .checked_add(amount)
            .ok_or(ChonkError::MathOverflow)?;
        Ok(())
    }

    /// Resource accrued before `epoch_id` started, i.e. the part of
    /// `resource_total` that is inside that epoch's snapshot.
    pub fn resource_before_epoch(&self, epoch_id: u64) -> u64 {
        if self.resource_epoch >= epoch_id {
            self.resource_at_epoch_start
        } else {
            self.resource_total
        }
    }

    /// Unsettled resource that may be claimed against `epoch_id`.
    pub fn eligible_resource(&self, epoch_id: u64) -> u64 {
        self.resource_before_epoch(epoch_id)
            .saturating_sub(self.last_settled_resource)
    }

    pub fn credit(&mut self, amount: u64) -> Result<()> {
        self.points_balance = self
            .points_balance
            .checked_add(amount)
            .ok_or(ChonkError::MathOverflow)?;
        Ok(())
    }

    pub fn debit(&mut self, amount: u64) -> Result<()> {
        require!(amount <= self.points_balance, ChonkError::NotEnoughPoints);
        self.points_balance -= amount;
        Ok(())
    }
}

/// Links a sub-account key to the main participant it claims for.
#[account]
#[derive(InitSpace)]
pub struct Delegate {
    pub main_account: Pubkey,
    pub sub_account: Pubkey,
    pub bump: u8,
    pub created_at: i64,
}
