use anchor_lang::prelude::*;

use crate::state::*;

/// Read-only accounts for the query instructions.
#[derive(Accounts)]
pub struct ViewRound<'info> {
    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Box<Account<'info, Config>>,

    #[account(
        seeds = [Round::SEED],
        bump = round.bump
    )]
    pub round: Box<Account<'info, Round>>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct RoundStatusView {
    pub round_id: u64,
    pub phase: RoundPhase,
    pub mode: GameMode,
    pub started_at: i64,
    pub ends_at: i64,
    pub betting_open: bool,
    pub pot_lamports: u64,
    pub commission_rate: u8,
    pub side_stake: [u64; 2],
    pub side_points: [u64; 2],
    pub total_stake: u64,
    pub participants: u16,
    pub winning_side: Option<Side>,
    pub current_point_rate: u64,
    pub outstanding_lamports: u64,
}

/// Elapsed seconds used for point previews: zero before the first round,
/// otherwise time since the round opened (clamped at zero).
pub fn preview_elapsed(round: &Round, now_ts: i64) -> i64 {
    match round.phase {
        RoundPhase::Idle => 0,
        _ => now_ts.saturating_sub(round.started_at).max(0),
    }
}

impl RoundStatusView {
    pub fn build(round: &Round, cfg: &Config, now_ts: i64) -> Self {
        let ends_at = round.started_at.saturating_add(round.duration_secs);

        Self {
            round_id: round.round_id,
            phase: round.phase,
            mode: round.mode,
            started_at: round.started_at,
            ends_at,
            betting_open: round.is_open() && now_ts <= ends_at,
            pot_lamports: round.pot_lamports,
            commission_rate: round.commission_rate,
            side_stake: round.side_stake,
            side_points: round.side_points,
            total_stake: round.total_stake,
            participants: round.participant_count() as u16,
            winning_side: round.winning_side,
            current_point_rate: cfg.point_schedule().rate(preview_elapsed(round, now_ts)),
            outstanding_lamports: round.outstanding_lamports(),
        }
    }
}

pub fn round_status_handler(ctx: Context<ViewRound>) -> Result<RoundStatusView> {
    let now = Clock::get()?.unix_timestamp;
    Ok(RoundStatusView::build(&ctx.accounts.round, &ctx.accounts.config, now))
}

pub fn participant_bet_handler(ctx: Context<ViewRound>, participant: Pubkey) -> Result<Option<BetRecord>> {
    Ok(ctx.accounts.round.find_bet(&participant).copied())
}

/// Points `amount` would earn on a team side right now.
pub fn preview_points_handler(ctx: Context<ViewRound>, amount: u64) -> Result<u64> {
    let cfg = &ctx.accounts.config;
    let elapsed = preview_elapsed(&ctx.accounts.round, Clock::get()?.unix_timestamp);
    cfg.point_schedule().points_for(amount, cfg.points_unit, elapsed)
}
