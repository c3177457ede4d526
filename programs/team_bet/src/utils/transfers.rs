use anchor_lang::prelude::*;

use crate::errors::TeamBetErrorCode;
use crate::state::BetRecord;

/// System-program transfer from a signer into a program account.
pub fn transfer_lamports<'info>(
    from: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    require!(amount > 0, TeamBetErrorCode::InvalidBetAmount);

    anchor_lang::system_program::transfer(
        CpiContext::new(
            system_program.clone(),
            anchor_lang::system_program::Transfer {
                from: from.clone(),
                to: to.clone(),
            },
        ),
        amount,
    )
}

/// Treasury balance left after paying `amount`, keeping it rent exempt.
pub fn remaining_after_debit(lamports: u64, amount: u64, rent_exempt_minimum: u64) -> Result<u64> {
    let remaining = lamports
        .checked_sub(amount)
        .ok_or(TeamBetErrorCode::InsufficientTreasuryBalance)?;
    require!(
        remaining >= rent_exempt_minimum,
        TeamBetErrorCode::InsufficientTreasuryBalance
    );
    Ok(remaining)
}

/// Moves lamports out of the program-owned treasury PDA.
///
/// The treasury is owned by this program, so its balance is debited directly
/// instead of through a system-program CPI.
pub fn debit_treasury(
    treasury: &AccountInfo,
    to: &AccountInfo,
    amount: u64,
    rent_exempt_minimum: u64,
) -> Result<()> {
    let remaining = remaining_after_debit(treasury.lamports(), amount, rent_exempt_minimum)?;
    let credited = to
        .lamports()
        .checked_add(amount)
        .ok_or(TeamBetErrorCode::MathOverflow)?;

    **treasury.try_borrow_mut_lamports()? = remaining;
    **to.try_borrow_mut_lamports()? = credited;
    Ok(())
}

/// A participant's withdrawable balance, already detached from the ledger.
///
/// The only way to obtain one is [`Payout::take`], which zeroes the record
/// first, so lamports can never leave the treasury while the ledger still
/// shows them as owed.
#[must_use]
#[derive(Debug, PartialEq, Eq)]
pub struct Payout {
    amount: u64,
}

impl Payout {
    pub fn take(record: &mut BetRecord) -> Result<Self> {
        let amount = record.withdrawable;
        require!(amount > 0, TeamBetErrorCode::NothingToWithdraw);

        record.withdrawable = 0;
        Ok(Self { amount })
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    /// Sends the payout and returns the amount paid.
    pub fn pay(self, treasury: &AccountInfo, to: &AccountInfo, rent_exempt_minimum: u64) -> Result<u64> {
        debit_treasury(treasury, to, self.amount, rent_exempt_minimum)?;
        Ok(self.amount)
    }
}
