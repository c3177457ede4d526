use anchor_lang::prelude::*;

use crate::errors::TeamBetErrorCode;
use crate::events::GameStarted;
use crate::state::*;

#[derive(Accounts)]
pub struct StartGame<'info> {
    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
        has_one = authority @ TeamBetErrorCode::Unauthorized
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

    pub authority: Signer<'info>,
}

/// Opens a new round.
///
/// Unclaimed balances from the previous round are abandoned: their liability
/// is released to the house before the new pot is reserved. A team round
/// needs a non-zero pot; a lottery pot may be zero (entry stakes alone).
pub fn start_game_handler(ctx: Context<StartGame>, mode: GameMode, pot_lamports: u64) -> Result<()> {
    let cfg = &ctx.accounts.config;
    let round = &mut ctx.accounts.round;

    require!(!round.is_open(), TeamBetErrorCode::RoundAlreadyOpen);
    if mode == GameMode::Teams {
        require!(pot_lamports > 0, TeamBetErrorCode::InvalidPotSize);
    }

    let clock = Clock::get()?;
    let treasury_info = ctx.accounts.treasury.to_account_info();
    let rent_min = Rent::get()?.minimum_balance(treasury_info.data_len());
    let treasury = &mut ctx.accounts.treasury;

    // ─────────────────────────────
    // Abandon the previous round's unclaimed balances
    // ─────────────────────────────
    let abandoned = round.outstanding_lamports();
    if abandoned > 0 {
        treasury.release(abandoned)?;
        treasury.total_abandoned_lamports = treasury
            .total_abandoned_lamports
            .checked_add(abandoned)
            .ok_or(TeamBetErrorCode::MathOverflow)?;
        msg!("abandoned {} unclaimed lamports from round {}", abandoned, round.round_id);
    }

    // ─────────────────────────────
    // Reserve the pot from house funds
    // ─────────────────────────────
    require!(
        treasury.free_balance(treasury_info.lamports(), rent_min) >= pot_lamports,
        TeamBetErrorCode::InsufficientTreasuryBalance
    );
    treasury.reserve(pot_lamports)?;

    round.open(
        mode,
        clock.unix_timestamp,
        cfg.round_duration_secs,
        pot_lamports,
        cfg.commission_rate,
    )?;

    let ends_at = round
        .started_at
        .checked_add(round.duration_secs)
        .ok_or(TeamBetErrorCode::MathOverflow)?;

    emit!(GameStarted {
        round_id: round.round_id,
        mode: mode as u8,
        pot_lamports,
        started_at: round.started_at,
        ends_at,
        abandoned_lamports: abandoned,
    });

    Ok(())
}
