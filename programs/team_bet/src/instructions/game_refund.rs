use anchor_lang::prelude::*;

use crate::errors::TeamBetErrorCode;
use crate::events::GameRefunded;
use crate::state::*;
use crate::utils::settlement::refund_all;

#[derive(Accounts)]
pub struct ForceRefund<'info> {
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

/// Closes the open round as Refunded: every record's withdrawable becomes its
/// stake, no commission, and the pot goes back to the house.
pub(crate) fn refund_round(round: &mut Round, treasury: &mut Treasury, now_ts: i64, tie: bool) -> Result<()> {
    let reserved = round.reserved_lamports()?;
    let refunds = refund_all(&round.snapshot());

    let total = round.close_with_payouts(&refunds, RoundPhase::Refunded, now_ts)?;
    treasury.rebase_on_close(reserved, total)?;

    msg!("refund: round={} participants={} total={}", round.round_id, refunds.len(), total);

    emit!(GameRefunded {
        round_id: round.round_id,
        participants: refunds.len() as u16,
        total_refunded: total,
        tie,
    });

    Ok(())
}

/// Administrative cancellation of the open round, in either mode.
pub fn force_refund_handler(ctx: Context<ForceRefund>) -> Result<()> {
    let round = &mut ctx.accounts.round;
    require!(round.is_open(), TeamBetErrorCode::RoundNotOpen);

    round.assert_invariant()?;

    let now = Clock::get()?.unix_timestamp;
    refund_round(round, &mut ctx.accounts.treasury, now, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{SIDE_A, SIDE_B};
    use crate::test_utils::{code_of, empty_treasury, open_team_round, small_rules, key};

    #[test]
    fn refund_returns_exact_stakes_regardless_of_points() {
        let rules = small_rules(RepeatBetPolicy::Reject);
        let mut round = open_team_round(100, 10);
        round.place_bet(&rules, key(3), SIDE_A, 100, 1_000).unwrap();
        round.place_bet(&rules, key(4), SIDE_B, 200, 1_000 + 7_200).unwrap();

        let mut treasury = empty_treasury();
        treasury.reserve(100 + 300).unwrap();

        refund_round(&mut round, &mut treasury, 9_999, false).unwrap();

        assert_eq!(round.phase, RoundPhase::Refunded);
        assert_eq!(round.find_bet(&key(3)).unwrap().withdrawable, 100);
        assert_eq!(round.find_bet(&key(4)).unwrap().withdrawable, 200);
        assert_eq!(round.commission_lamports, 0);
        // Pot released; only the stakes stay owed.
        assert_eq!(treasury.liabilities_lamports, 300);
    }

    #[test]
    fn refund_requires_an_open_round() {
        let mut round = open_team_round(100, 10);
        let mut treasury = empty_treasury();
        treasury.reserve(100).unwrap();

        refund_round(&mut round, &mut treasury, 2_000, true).unwrap();

        let err = refund_round(&mut round, &mut treasury, 2_001, true).unwrap_err();
        assert_eq!(code_of(err), code_of(error!(TeamBetErrorCode::RoundNotOpen)));
    }
}
