use anchor_lang::prelude::*;

use crate::constants::SIDE_NONE;
use crate::errors::TeamBetErrorCode;
use crate::events::BetPlaced;
use crate::state::*;
use crate::utils::transfers::transfer_lamports;

#[derive(Accounts)]
pub struct PlaceBet<'info> {
    #[account(mut)]
    pub player: Signer<'info>,

    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Box<Account<'info, Config>>,

    #[account(
        mut,
        seeds = [Round::SEED],
        bump = round.bump
    )]
    pub round: Box<Account<'info, Round>>,

    #[account(
        mut,
        seeds = [Treasury::SEED],
        bump = treasury.bump
    )]
    pub treasury: Box<Account<'info, Treasury>>,

    #[account(
        seeds = [BannedList::SEED],
        bump = banned_list.bump
    )]
    pub banned_list: Box<Account<'info, BannedList>>,

    pub system_program: Program<'info, System>,
}

pub fn place_bet_handler(ctx: Context<PlaceBet>, side_code: u8, amount: u64) -> Result<()> {
    let config = &ctx.accounts.config;
    let round = &mut ctx.accounts.round;
    let player = &ctx.accounts.player;

    let clock = Clock::get()?;

    // ─────────────────────────────
    // Gates
    // ─────────────────────────────
    require!(!config.is_betting_paused(), TeamBetErrorCode::BettingPaused);
    if config.is_ban_list_enabled() {
        require!(
            !ctx.accounts.banned_list.contains(&player.key()),
            TeamBetErrorCode::Banned
        );
    }

    // ─────────────────────────────
    // Ledger
    // ─────────────────────────────
    let receipt = round.place_bet(
        &config.bet_rules(),
        player.key(),
        side_code,
        amount,
        clock.unix_timestamp,
    )?;

    // ─────────────────────────────
    // Transfer lamports player → treasury
    // ─────────────────────────────
    transfer_lamports(
        &player.to_account_info(),
        &ctx.accounts.treasury.to_account_info(),
        &ctx.accounts.system_program.to_account_info(),
        amount,
    )?;

    let treasury = &mut ctx.accounts.treasury;
    treasury.reserve(amount)?;
    treasury.total_in_lamports = treasury
        .total_in_lamports
        .checked_add(amount)
        .ok_or(TeamBetErrorCode::MathOverflow)?;

    msg!(
        "bet: side={} amount={} rate={} points={}",
        side_code,
        amount,
        receipt.point_rate,
        receipt.points
    );

    emit!(BetPlaced {
        round_id: round.round_id,
        participant: player.key(),
        side: receipt.side.map(|s| s.code()).unwrap_or(SIDE_NONE),
        amount,
        points: receipt.points,
        point_rate: receipt.point_rate,
        total_stake: receipt.total_stake,
        total_points: receipt.total_points,
    });

    Ok(())
}
