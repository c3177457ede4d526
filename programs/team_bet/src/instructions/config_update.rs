use anchor_lang::prelude::*;

use crate::errors::TeamBetErrorCode;
use crate::events::ConfigUpdated;
use crate::state::*;

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    /// Global Config PDA.
    /// Only the `authority` stored in Config is allowed to update it.
    #[account(
        mut,
        seeds = [Config::SEED],
        bump = config.bump,
        has_one = authority @ TeamBetErrorCode::Unauthorized
    )]
    pub config: Box<Account<'info, Config>>,

    /// Read to lock round economics while a round is open.
    #[account(
        seeds = [Round::SEED],
        bump = round.bump
    )]
    pub round: Box<Account<'info, Round>>,

    pub authority: Signer<'info>,
}

/// Partial config patch. `None` leaves a field unchanged.
///
/// Controls (pause flags, authority, fee vault, ban-list switch) can change at
/// any time. Everything else shapes round economics and is rejected with
/// `ConfigLockedActiveRound` while a round is open. The point-rate table is
/// fixed at `initialize`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default)]
pub struct UpdateConfigArgs {
    pub pause_bet: Option<bool>,
    pub pause_withdraw: Option<bool>,
    pub new_authority: Option<Pubkey>,
    pub new_fee_vault: Option<Pubkey>,
    pub ban_list_enabled: Option<bool>,

    pub commission_rate: Option<u8>,
    pub min_bet_lamports: Option<u64>,
    pub round_duration_secs: Option<i64>,
    pub points_unit: Option<u64>,
    pub repeat_bet_policy: Option<RepeatBetPolicy>,
    pub dust_policy: Option<DustPolicy>,
    pub refund_on_tie: Option<bool>,
    pub lottery_winner_count: Option<u8>,
    pub lottery_prize_lamports: Option<u64>,
    pub lottery_min_participants: Option<u16>,
}

impl UpdateConfigArgs {
    /// Both pause flags on, nothing else touched.
    pub fn pause_all() -> Self {
        Self {
            pause_bet: Some(true),
            pause_withdraw: Some(true),
            ..Default::default()
        }
    }

    pub fn touches_economics(&self) -> bool {
        self.commission_rate.is_some()
            || self.min_bet_lamports.is_some()
            || self.round_duration_secs.is_some()
            || self.points_unit.is_some()
            || self.repeat_bet_policy.is_some()
            || self.dust_policy.is_some()
            || self.refund_on_tie.is_some()
            || self.lottery_winner_count.is_some()
            || self.lottery_prize_lamports.is_some()
            || self.lottery_min_participants.is_some()
    }

    /// Applies the patch to a copy of `current`. The caller validates and
    /// stores the result.
    pub fn apply_to(&self, current: &Config) -> Config {
        let mut next = current.clone();

        if let Some(p) = self.pause_bet {
            next.pause_bet = p as u8;
        }
        if let Some(p) = self.pause_withdraw {
            next.pause_withdraw = p as u8;
        }
        if let Some(v) = self.new_authority {
            next.authority = v;
        }
        if let Some(v) = self.new_fee_vault {
            next.fee_vault = v;
        }
        if let Some(v) = self.ban_list_enabled {
            next.ban_list_enabled = v as u8;
        }

        if let Some(v) = self.commission_rate {
            next.commission_rate = v;
        }
        if let Some(v) = self.min_bet_lamports {
            next.min_bet_lamports = v;
        }
        if let Some(v) = self.round_duration_secs {
            next.round_duration_secs = v;
        }
        if let Some(v) = self.points_unit {
            next.points_unit = v;
        }
        if let Some(v) = self.repeat_bet_policy {
            next.repeat_bet_policy = v;
        }
        if let Some(v) = self.dust_policy {
            next.dust_policy = v;
        }
        if let Some(v) = self.refund_on_tie {
            next.refund_on_tie = v as u8;
        }
        if let Some(v) = self.lottery_winner_count {
            next.lottery_winner_count = v;
        }
        if let Some(v) = self.lottery_prize_lamports {
            next.lottery_prize_lamports = v;
        }
        if let Some(v) = self.lottery_min_participants {
            next.lottery_min_participants = v;
        }

        next
    }
}

/// Rejects keys that must never hold authority or receive commission.
fn check_target(target: Pubkey, config_key: Pubkey, program_id: &Pubkey, err: TeamBetErrorCode) -> Result<()> {
    if target == Pubkey::default()
        || target == system_program::ID
        || target == *program_id
        || target == config_key
    {
        return Err(error!(err));
    }
    Ok(())
}

/// Updates one or more global configuration parameters.
///
/// Effective values are computed on a copy, validated together, then stored.
pub fn update_config_handler(ctx: Context<UpdateConfig>, args: UpdateConfigArgs) -> Result<()> {
    let config_key = ctx.accounts.config.key();
    let cfg = &mut ctx.accounts.config;

    if args.touches_economics() {
        require!(
            !ctx.accounts.round.is_open(),
            TeamBetErrorCode::ConfigLockedActiveRound
        );
    }

    // ─────────────────────────────────────────────
    // Authority rotation / fee vault
    // ─────────────────────────────────────────────
    if let Some(new_auth) = args.new_authority {
        check_target(new_auth, config_key, ctx.program_id, TeamBetErrorCode::InvalidAuthorityTarget)?;
    }
    if let Some(new_vault) = args.new_fee_vault {
        check_target(new_vault, config_key, ctx.program_id, TeamBetErrorCode::InvalidFeeVault)?;
    }

    let next = args.apply_to(cfg);
    next.validate()?;

    msg!(
        "config update: pause_bet={} pause_withdraw={} commission={} min_bet={}",
        next.pause_bet,
        next.pause_withdraw,
        next.commission_rate,
        next.min_bet_lamports
    );

    emit!(ConfigUpdated {
        authority: next.authority,
        fee_vault: next.fee_vault,
        pause_bet: next.pause_bet,
        pause_withdraw: next.pause_withdraw,
        commission_rate: next.commission_rate,
        min_bet_lamports: next.min_bet_lamports,
        round_duration_secs: next.round_duration_secs,
    });

    cfg.set_inner(next);
    Ok(())
}
