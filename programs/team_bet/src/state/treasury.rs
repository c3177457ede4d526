use anchor_lang::prelude::*;

use crate::errors::TeamBetErrorCode;

/// ---------------------------------------------------------------------------
/// Treasury
/// ---------------------------------------------------------------------------
///
/// Program-owned PDA that holds every lamport the game touches: stakes, the
/// house bankroll that funds pots, and settled-but-unclaimed payouts.
///
/// `liabilities_lamports` is what the treasury owes: the live round's stakes
/// and reserved pot while open, or the unclaimed payouts once closed. The
/// rest (above rent) is house money.
#[account]
pub struct Treasury {
    /// PDA bump for deterministic re-derivation.
    pub bump: u8,

    // ─────────────────────────────
    // Accounting / stats
    // ─────────────────────────────

    /// Lamports currently owed to participants or reserved for the pot.
    pub liabilities_lamports: u64,

    /// Total lamports ever received as stakes (monotonic, for audit).
    pub total_in_lamports: u64,

    /// Total lamports ever paid out to participants.
    pub total_out_lamports: u64,

    /// Total commission and house fees sent to the fee vault.
    pub total_fees_withdrawn: u64,

    /// House bankroll deposits and withdrawals.
    pub house_deposited: u64,
    pub house_withdrawn: u64,

    /// Unclaimed payouts released back to the house when a new round opened.
    pub total_abandoned_lamports: u64,

    /// Versioning for future migrations.
    pub version: u8,

    /// Reserved bytes for future use.
    pub _reserved: [u8; 32],
}

impl Treasury {
    pub const SEED: &'static [u8] = b"treasury";
    pub const VERSION: u8 = 1;
    pub const SIZE: usize =
        1  + // bump
            8  + // liabilities_lamports
            8  + // total_in_lamports
            8  + // total_out_lamports
            8  + // total_fees_withdrawn
            8  + // house_deposited
            8  + // house_withdrawn
            8  + // total_abandoned_lamports
            1  + // version
            32;  // reserved

    /// Lamports above rent and liabilities, i.e. the house's own funds.
    pub fn free_balance(&self, lamports: u64, rent_exempt_minimum: u64) -> u64 {
        lamports
            .saturating_sub(rent_exempt_minimum)
            .saturating_sub(self.liabilities_lamports)
    }

    pub fn reserve(&mut self, amount: u64) -> Result<()> {
        self.liabilities_lamports = self
            .liabilities_lamports
            .checked_add(amount)
            .ok_or(TeamBetErrorCode::MathOverflow)?;
        Ok(())
    }

    pub fn release(&mut self, amount: u64) -> Result<()> {
        self.liabilities_lamports = self
            .liabilities_lamports
            .checked_sub(amount)
            .ok_or(TeamBetErrorCode::MathOverflow)?;
        Ok(())
    }

    /// Swaps the open round's reservation (pot + stakes) for what settlement
    /// actually owes participants.
    pub fn rebase_on_close(&mut self, reserved: u64, owed: u64) -> Result<()> {
        self.release(reserved)?;
        self.reserve(owed)
    }
}
