use anchor_lang::prelude::*;

use crate::errors::TeamBetErrorCode;
use crate::events::TreasuryFunded;
use crate::state::*;
use crate::utils::transfers::transfer_lamports;

/// House bankroll deposit. Anyone may fund the treasury.
#[derive(Accounts)]
pub struct FundTreasury<'info> {
    #[account(mut)]
    pub funder: Signer<'info>,

    #[account(
        mut,
        seeds = [Treasury::SEED],
        bump = treasury.bump
    )]
    pub treasury: Box<Account<'info, Treasury>>,

    pub system_program: Program<'info, System>,
}

pub fn fund_treasury_handler(ctx: Context<FundTreasury>, amount: u64) -> Result<()> {
    transfer_lamports(
        &ctx.accounts.funder.to_account_info(),
        &ctx.accounts.treasury.to_account_info(),
        &ctx.accounts.system_program.to_account_info(),
        amount,
    )?;

    let treasury = &mut ctx.accounts.treasury;
    treasury.house_deposited = treasury
        .house_deposited
        .checked_add(amount)
        .ok_or(TeamBetErrorCode::MathOverflow)?;
    treasury.total_in_lamports = treasury
        .total_in_lamports
        .checked_add(amount)
        .ok_or(TeamBetErrorCode::MathOverflow)?;

    let info = treasury.to_account_info();
    let rent_min = Rent::get()?.minimum_balance(info.data_len());
    let free_balance = treasury.free_balance(info.lamports(), rent_min);

    emit!(TreasuryFunded {
        funder: ctx.accounts.funder.key(),
        amount,
        free_balance,
    });

    Ok(())
}
