use anchor_lang::prelude::*;

use crate::errors::TeamBetErrorCode;
use crate::events::Withdrawn;
use crate::state::*;
use crate::utils::transfers::Payout;

/// Claims the caller's settled or refunded balance from the treasury.
#[derive(Accounts)]
pub struct Withdraw<'info> {
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
}

/// Detaches the participant's balance from the ledger and updates the claim
/// accounting. The record reads zero before any lamports move.
pub(crate) fn take_payout(round: &mut Round, treasury: &mut Treasury, participant: &Pubkey) -> Result<Payout> {
    let record = round
        .find_bet_mut(participant)
        .ok_or(TeamBetErrorCode::NothingToWithdraw)?;
    let payout = Payout::take(record)?;

    round.claimed_lamports = round
        .claimed_lamports
        .checked_add(payout.amount())
        .ok_or(TeamBetErrorCode::MathOverflow)?;
    treasury.release(payout.amount())?;
    treasury.total_out_lamports = treasury
        .total_out_lamports
        .checked_add(payout.amount())
        .ok_or(TeamBetErrorCode::MathOverflow)?;

    Ok(payout)
}

pub fn withdraw_handler(ctx: Context<Withdraw>) -> Result<()> {
    let config = &ctx.accounts.config;
    let player = &ctx.accounts.player;

    require!(!config.is_withdraw_paused(), TeamBetErrorCode::WithdrawPaused);
    if config.is_ban_list_enabled() {
        require!(
            !ctx.accounts.banned_list.contains(&player.key()),
            TeamBetErrorCode::Banned
        );
    }

    let treasury_info = ctx.accounts.treasury.to_account_info();
    let rent_min = Rent::get()?.minimum_balance(treasury_info.data_len());

    let round = &mut ctx.accounts.round;
    let payout = take_payout(round, &mut ctx.accounts.treasury, &player.key())?;
    let amount = payout.pay(&treasury_info, &player.to_account_info(), rent_min)?;

    emit!(Withdrawn {
        round_id: round.round_id,
        participant: player.key(),
        amount,
    });

    Ok(())
}
