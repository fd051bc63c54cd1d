use anchor_lang::prelude::*;
use anchor_spl::token::{self, MintTo};

use crate::{
    errors::ChonkError,
    events::{PointsConverted, PointsSpent},
    state::Config,
    utils::tokens_for_points,
    ConvertPointsToTokens, SpendPoints,
};

/// Checks every swap gate in order and returns the whole tokens `points`
/// buys. Nothing is mutated.
pub fn quote_conversion(cfg: &Config, points: u64, balance: u64) -> Result<u64> {
    require!(!cfg.paused, ChonkError::Paused);
    require!(cfg.swap_enabled, ChonkError::SwapDisabled);
    require!(cfg.points_per_token > 0, ChonkError::SwapRateNotSet);
    require!(cfg.reward_mint_set(), ChonkError::RewardMintNotSet);
    let tokens = tokens_for_points(points, cfg.points_per_token)?;
    require!(points <= balance, ChonkError::NotEnoughPoints);
    Ok(tokens)
}

/// Gate for game contracts spending a participant's points.
pub fn authorize_sink(cfg: &Config, caller: &Pubkey, amount: u64) -> Result<()> {
    cfg.require_authorized_caller(caller)?;
    require!(!cfg.paused, ChonkError::Paused);
    require!(amount > 0, ChonkError::InvalidAmount);
    Ok(())
}

pub fn spend_points(ctx: Context<SpendPoints>, owner: Pubkey, amount: u64) -> Result<()> {
    let caller = ctx.accounts.caller.key();
    authorize_sink(&ctx.accounts.config, &caller, amount)?;

    let p = &mut ctx.accounts.participant;
    require_keys_eq!(p.owner, owner, ChonkError::Unauthorized);
    p.debit(amount)?;

    emit!(PointsSpent {
        participant: owner,
        caller,
        amount,
        balance: p.points_balance,
    });

    msg!(
        "spend_points: participant={} caller={} amount={}",
        owner,
        caller,
        amount,
    );
    Ok(())
}

pub fn convert_points_to_tokens(ctx: Context<ConvertPointsToTokens>, amount: u64) -> Result<()> {
    let cfg = &ctx.accounts.config;
    let tokens = quote_conversion(cfg, amount, ctx.accounts.participant.points_balance)?;
    require_keys_eq!(
        ctx.accounts.reward_mint.key(),
        cfg.reward_mint,
        ChonkError::RewardMintMismatch
    );
    let base_units = crate::utils::token_base_units(tokens, ctx.accounts.reward_mint.decimals)?;

    // debit first; the CPI cannot see a balance that was already spent
    ctx.accounts.participant.debit(amount)?;

    let cfg_seeds: &[&[&[u8]]] = &[&[
        crate::CONFIG_SEED,
        &[cfg.bump],
    ]];

    token::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            MintTo {
                mint: ctx.accounts.reward_mint.to_account_info(),
                to: ctx.accounts.user_token_account.to_account_info(),
                authority: ctx.accounts.config.to_account_info(),
            },
            cfg_seeds,
        ),
        base_units,
    )?;

    let participant = ctx.accounts.user.key();
    emit!(PointsConverted {
        participant,
        points: amount,
        tokens,
    });

    msg!(
        "convert_points_to_tokens: participant={} points={} tokens={}",
        participant,
        amount,
        tokens,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Participant;

    fn err_of(code: ChonkError) -> anchor_lang::error::Error {
        anchor_lang::error::Error::from(code)
    }

    fn live_config() -> Config {
        Config {
            swap_enabled: true,
            points_per_token: 100,
            reward_mint: Pubkey::new_unique(),
            ..Default::default()
        }
    }

    #[test]
    fn conversion_gates_fire_in_order() {
        let mut cfg = live_config();
        cfg.paused = true;
        cfg.swap_enabled = false;
        assert_eq!(quote_conversion(&cfg, 500, 500).unwrap_err(), err_of(ChonkError::Paused));

        cfg.paused = false;
        assert_eq!(quote_conversion(&cfg, 500, 500).unwrap_err(), err_of(ChonkError::SwapDisabled));

        cfg.swap_enabled = true;
        cfg.points_per_token = 0;
        assert_eq!(quote_conversion(&cfg, 500, 500).unwrap_err(), err_of(ChonkError::SwapRateNotSet));

        cfg.points_per_token = 100;
        cfg.reward_mint = Pubkey::default();
        assert_eq!(quote_conversion(&cfg, 500, 500).unwrap_err(), err_of(ChonkError::RewardMintNotSet));
    }

    #[test]
    fn conversion_rounds_down_and_rejects_dust() {
        let cfg = live_config();
        assert_eq!(quote_conversion(&cfg, 99, 1_000).unwrap_err(), err_of(ChonkError::PointAmountTooSmall));
        assert_eq!(quote_conversion(&cfg, 100, 1_000).unwrap(), 1);
        // the full amount is burned even though 50 points buy nothing
        assert_eq!(quote_conversion(&cfg, 250, 1_000).unwrap(), 2);
        assert_eq!(quote_conversion(&cfg, 1_100, 1_000).unwrap_err(), err_of(ChonkError::NotEnoughPoints));
    }

    #[test]
    fn sink_gate_rejects_strangers_pause_and_zero() {
        let game = Pubkey::new_unique();
        let mut cfg = live_config();
        cfg.authorized_callers = vec![game];

        authorize_sink(&cfg, &game, 10).expect("listed caller");
        assert_eq!(
            authorize_sink(&cfg, &Pubkey::new_unique(), 10).unwrap_err(),
            err_of(ChonkError::Unauthorized)
        );
        assert_eq!(authorize_sink(&cfg, &game, 0).unwrap_err(), err_of(ChonkError::InvalidAmount));

        cfg.paused = true;
        assert_eq!(authorize_sink(&cfg, &game, 10).unwrap_err(), err_of(ChonkError::Paused));
    }

    #[test]
    fn spend_never_goes_negative() {
        let mut p = Participant {
            points_balance: 40,
            ..Default::default()
        };
        p.debit(40).expect("spend all");
        assert_eq!(p.points_balance, 0);
        assert_eq!(p.debit(1).unwrap_err(), err_of(ChonkError::NotEnoughPoints));
        assert_eq!(p.points_balance, 0);
    }
}
