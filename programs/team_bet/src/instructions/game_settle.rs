use anchor_lang::prelude::*;

use crate::errors::TeamBetErrorCode;
use crate::events::{CommissionPaid, GameSettled};
use crate::instructions::game_refund::refund_round;
use crate::state::*;
use crate::utils::settlement::{settle, Settlement, SettlementParams, TeamPayouts};
use crate::utils::transfers::debit_treasury;

#[derive(Accounts)]
pub struct SettleGame<'info> {
    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
        has_one = authority @ TeamBetErrorCode::Unauthorized,
        has_one = fee_vault @ TeamBetErrorCode::InvalidFeeVault
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

    /// CHECK: Commission destination; address pinned by `has_one` on config.
    #[account(mut)]
    pub fee_vault: UncheckedAccount<'info>,

    pub authority: Signer<'info>,
}

/// Writes a decided team settlement into the round and swaps the treasury
/// reservation for what is now owed. Returns the commission to pay out.
pub(crate) fn apply_team_payouts(
    round: &mut Round,
    treasury: &mut Treasury,
    outcome: &TeamPayouts,
    now_ts: i64,
) -> Result<u64> {
    let reserved = round.reserved_lamports()?;

    let total = round.close_with_payouts(&outcome.payouts, RoundPhase::Settled, now_ts)?;
    let spent = total
        .checked_add(outcome.commission)
        .ok_or(TeamBetErrorCode::MathOverflow)?;
    require!(spent <= reserved, TeamBetErrorCode::AssertInvariantFailed);

    round.winning_side = Some(outcome.winning_side);
    round.commission_lamports = outcome.commission;
    round.unswept_dust = outcome.dust;

    treasury.rebase_on_close(reserved, total)?;
    Ok(outcome.commission)
}

/// Normal settlement of a team round.
///
/// A tie either refunds everyone (`refund_on_tie`) or is rejected so that the
/// authority has to call `force_refund` explicitly.
pub fn settle_game_handler(ctx: Context<SettleGame>) -> Result<()> {
    let cfg = &ctx.accounts.config;
    let round = &mut ctx.accounts.round;

    require!(round.is_open(), TeamBetErrorCode::RoundNotOpen);
    require!(round.mode == GameMode::Teams, TeamBetErrorCode::WrongGameMode);

    round.assert_invariant()?;

    let params = SettlementParams {
        pot_lamports: round.pot_lamports,
        commission_rate: round.commission_rate,
        dust_policy: cfg.dust_policy,
    };
    let outcome = settle(&round.snapshot(), &params)?;

    let now = Clock::get()?.unix_timestamp;

    let outcome = match outcome {
        Settlement::Tie(_) => {
            require!(cfg.refunds_on_tie(), TeamBetErrorCode::TieRequiresRefund);
            return refund_round(round, &mut ctx.accounts.treasury, now, true);
        }
        Settlement::Decided(outcome) => outcome,
    };

    let commission = apply_team_payouts(round, &mut ctx.accounts.treasury, &outcome, now)?;

    // ─────────────────────────────
    // Commission goes out immediately
    // ─────────────────────────────
    if commission > 0 {
        let treasury_info = ctx.accounts.treasury.to_account_info();
        let rent_min = Rent::get()?.minimum_balance(treasury_info.data_len());
        debit_treasury(
            &treasury_info,
            &ctx.accounts.fee_vault.to_account_info(),
            commission,
            rent_min,
        )?;

        let treasury = &mut ctx.accounts.treasury;
        treasury.total_fees_withdrawn = treasury
            .total_fees_withdrawn
            .checked_add(commission)
            .ok_or(TeamBetErrorCode::MathOverflow)?;
        treasury.total_out_lamports = treasury
            .total_out_lamports
            .checked_add(commission)
            .ok_or(TeamBetErrorCode::MathOverflow)?;

        emit!(CommissionPaid {
            round_id: round.round_id,
            fee_vault: cfg.fee_vault,
            amount: commission,
        });
    }

    emit!(GameSettled {
        round_id: round.round_id,
        winning_side: outcome.winning_side.code(),
        losers_covered: outcome.losers_covered,
        total_payouts: round.total_payouts,
        commission_lamports: commission,
        unswept_dust: outcome.dust,
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{SIDE_A, SIDE_B};
    use crate::test_utils::{empty_treasury, key, open_team_round, small_rules};

    fn settle_round(round: &Round) -> TeamPayouts {
        let params = SettlementParams {
            pot_lamports: round.pot_lamports,
            commission_rate: round.commission_rate,
            dust_policy: DustPolicy::HouseRetains,
        };
        match settle(&round.snapshot(), &params).unwrap() {
            Settlement::Decided(p) => p,
            Settlement::Tie(_) => panic!("unexpected tie"),
        }
    }

    #[test]
    fn settled_round_owes_payouts_and_pays_commission_from_reservation() {
        let rules = small_rules(RepeatBetPolicy::Reject);
        let mut round = open_team_round(100, 10);
        round.place_bet(&rules, key(3), SIDE_A, 100, 1_000).unwrap();
        round.place_bet(&rules, key(4), SIDE_B, 200, 1_000 + 3_600).unwrap();
        round.place_bet(&rules, key(5), SIDE_B, 150, 1_000 + 3_600).unwrap();

        let mut treasury = empty_treasury();
        treasury.reserve(100 + 450).unwrap();

        let outcome = settle_round(&round);
        let commission = apply_team_payouts(&mut round, &mut treasury, &outcome, 50_000).unwrap();

        // B holds 4*23 + 3*23 = 161 points against A's 2*24 = 48. A's 100
        // cannot cover 110, so A forfeits everything.
        assert_eq!(round.winning_side, Some(Side::B));
        assert_eq!(round.phase, RoundPhase::Settled);
        assert_eq!(commission, 10);
        assert_eq!(round.commission_lamports, 10);
        // 200 + floor(92*100/161) and 150 + floor(69*100/161).
        assert_eq!(round.find_bet(&key(4)).unwrap().withdrawable, 257);
        assert_eq!(round.find_bet(&key(5)).unwrap().withdrawable, 192);
        assert_eq!(round.total_payouts, 449);
        assert_eq!(treasury.liabilities_lamports, round.total_payouts);
        assert!(round.total_payouts + commission <= 100 + 450);
        assert_eq!(round.outstanding_lamports(), round.total_payouts);
    }

    #[test]
    fn concrete_scenario_pays_winner_two_hundred() {
        let rules = small_rules(RepeatBetPolicy::Reject);
        let mut round = open_team_round(100, 10);
        round.place_bet(&rules, key(3), SIDE_A, 100, 1_000).unwrap();
        round.place_bet(&rules, key(4), SIDE_B, 100, 1_000 + 3_600).unwrap();

        let mut treasury = empty_treasury();
        treasury.reserve(200 + 100).unwrap();

        let outcome = settle_round(&round);
        apply_team_payouts(&mut round, &mut treasury, &outcome, 90_000).unwrap();

        assert_eq!(round.find_bet(&key(3)).unwrap().withdrawable, 200);
        assert_eq!(round.find_bet(&key(4)).unwrap().withdrawable, 0);
        assert_eq!(round.closed_at, 90_000);
    }
}
