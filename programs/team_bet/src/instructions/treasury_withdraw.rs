use anchor_lang::prelude::*;

use crate::errors::TeamBetErrorCode;
use crate::events::HouseFundsWithdrawn;
use crate::state::*;
use crate::utils::transfers::debit_treasury;

/// Withdraws house funds (the treasury's free balance) to the authority.
///
/// Never while a round is open: the live pot and stakes stay reserved until
/// the round closes.
#[derive(Accounts)]
pub struct WithdrawHouseFunds<'info> {
    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
        has_one = authority @ TeamBetErrorCode::Unauthorized
    )]
    pub config: Box<Account<'info, Config>>,

    #[account(
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

    #[account(mut)]
    pub authority: Signer<'info>,
}

pub fn withdraw_house_funds_handler(ctx: Context<WithdrawHouseFunds>, amount: u64) -> Result<()> {
    require!(!ctx.accounts.round.is_open(), TeamBetErrorCode::RoundAlreadyOpen);
    require!(amount > 0, TeamBetErrorCode::NothingToWithdraw);

    let treasury_info = ctx.accounts.treasury.to_account_info();
    let rent_min = Rent::get()?.minimum_balance(treasury_info.data_len());

    let treasury = &mut ctx.accounts.treasury;
    let free_balance = treasury.free_balance(treasury_info.lamports(), rent_min);
    require!(
        amount <= free_balance,
        TeamBetErrorCode::InsufficientTreasuryBalance
    );

    debit_treasury(
        &treasury_info,
        &ctx.accounts.authority.to_account_info(),
        amount,
        rent_min,
    )?;

    treasury.house_withdrawn = treasury
        .house_withdrawn
        .checked_add(amount)
        .ok_or(TeamBetErrorCode::MathOverflow)?;
    treasury.total_out_lamports = treasury
        .total_out_lamports
        .checked_add(amount)
        .ok_or(TeamBetErrorCode::MathOverflow)?;

    emit!(HouseFundsWithdrawn {
        to: ctx.accounts.authority.key(),
        amount,
        free_balance: free_balance - amount,
    });

    Ok(())
}
