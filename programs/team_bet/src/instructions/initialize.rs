use anchor_lang::prelude::*;

use crate::constants::DEFAULT_POINT_RATES;
use crate::errors::TeamBetErrorCode;
use crate::events::ConfigInitialized;
use crate::state::*;

/// Initial configuration. An empty `point_rates` selects the default table.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct InitializeArgs {
    pub commission_rate: u8,
    pub min_bet_lamports: u64,
    pub round_duration_secs: i64,
    pub points_unit: u64,
    pub point_rates: Vec<u32>,
    pub repeat_bet_policy: RepeatBetPolicy,
    pub dust_policy: DustPolicy,
    pub ban_list_enabled: bool,
    pub refund_on_tie: bool,
    pub lottery_winner_count: u8,
    pub lottery_prize_lamports: u64,
    pub lottery_min_participants: u16,
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Global config PDA.
    #[account(
        init,
        payer = authority,
        space = 8 + Config::SIZE,
        seeds = [Config::SEED],
        bump
    )]
    pub config: Box<Account<'info, Config>>,

    /// The single round PDA, re-opened by every `start_game`.
    #[account(
        init,
        payer = authority,
        space = 8 + Round::SIZE,
        seeds = [Round::SEED],
        bump
    )]
    pub round: Box<Account<'info, Round>>,

    /// Treasury PDA holding stakes, house bankroll and unclaimed payouts.
    #[account(
        init,
        payer = authority,
        space = 8 + Treasury::SIZE,
        seeds = [Treasury::SEED],
        bump
    )]
    pub treasury: Box<Account<'info, Treasury>>,

    #[account(
        init,
        payer = authority,
        space = 8 + BannedList::SIZE,
        seeds = [BannedList::SEED],
        bump
    )]
    pub banned_list: Box<Account<'info, BannedList>>,

    /// CHECK: Commission destination; only its address is stored.
    pub fee_vault: UncheckedAccount<'info>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_handler(ctx: Context<Initialize>, args: InitializeArgs) -> Result<()> {
    let authority_key = ctx.accounts.authority.key();
    let fee_vault_key = ctx.accounts.fee_vault.key();

    require!(fee_vault_key != Pubkey::default(), TeamBetErrorCode::InvalidFeeVault);
    require!(fee_vault_key != system_program::ID, TeamBetErrorCode::InvalidFeeVault);
    require!(fee_vault_key != *ctx.program_id, TeamBetErrorCode::InvalidFeeVault);

    let clock = Clock::get()?;

    // ────────────────────────────────────────────────
    // Initialize config
    // ────────────────────────────────────────────────
    let cfg = &mut ctx.accounts.config;
    cfg.pause_bet = 0;
    cfg.pause_withdraw = 0;

    cfg.authority = authority_key;
    cfg.fee_vault = fee_vault_key;
    cfg.commission_rate = args.commission_rate;
    cfg.min_bet_lamports = args.min_bet_lamports;
    cfg.round_duration_secs = args.round_duration_secs;
    cfg.points_unit = args.points_unit;

    if args.point_rates.is_empty() {
        cfg.set_point_rates(&DEFAULT_POINT_RATES)?;
    } else {
        cfg.set_point_rates(&args.point_rates)?;
    }

    cfg.repeat_bet_policy = args.repeat_bet_policy;
    cfg.dust_policy = args.dust_policy;
    cfg.ban_list_enabled = args.ban_list_enabled as u8;
    cfg.refund_on_tie = args.refund_on_tie as u8;

    cfg.lottery_winner_count = args.lottery_winner_count;
    cfg.lottery_prize_lamports = args.lottery_prize_lamports;
    cfg.lottery_min_participants = args.lottery_min_participants;

    cfg.started_at = clock.unix_timestamp;
    cfg.bump = ctx.bumps.config;
    cfg._reserved = [0; 16];

    cfg.validate()?;

    // ────────────────────────────────────────────────
    // Initialize round (Idle until the first start_game)
    // ────────────────────────────────────────────────
    ctx.accounts.round.init_new(ctx.bumps.round);

    // ────────────────────────────────────────────────
    // Initialize treasury
    // ────────────────────────────────────────────────
    let treasury = &mut ctx.accounts.treasury;
    treasury.bump = ctx.bumps.treasury;
    treasury.liabilities_lamports = 0;
    treasury.total_in_lamports = 0;
    treasury.total_out_lamports = 0;
    treasury.total_fees_withdrawn = 0;
    treasury.house_deposited = 0;
    treasury.house_withdrawn = 0;
    treasury.total_abandoned_lamports = 0;
    treasury.version = Treasury::VERSION;
    treasury._reserved = [0; 32];

    let banned = &mut ctx.accounts.banned_list;
    banned.entries = Vec::new();
    banned.bump = ctx.bumps.banned_list;

    emit!(ConfigInitialized {
        authority: authority_key,
        fee_vault: fee_vault_key,
        commission_rate: cfg.commission_rate,
        min_bet_lamports: cfg.min_bet_lamports,
        round_duration_secs: cfg.round_duration_secs,
    });

    Ok(())
}
