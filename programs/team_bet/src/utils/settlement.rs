use anchor_lang::prelude::*;

use crate::constants::PERCENT_DENOM;
use crate::errors::TeamBetErrorCode;
use crate::state::bet_record::Side;
use crate::state::config::DustPolicy;
use crate::state::round::LedgerSnapshot;

/// Round economics fixed when the round opened.
#[derive(Clone, Copy, Debug)]
pub struct SettlementParams {
    pub pot_lamports: u64,
    pub commission_rate: u8,
    pub dust_policy: DustPolicy,
}

/// Win/loss split of a non-tied team round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeamPayouts {
    pub winning_side: Side,
    /// Withdrawable per record, in ledger order.
    pub payouts: Vec<u64>,
    /// Commission actually collected for the fee vault.
    pub commission: u64,
    /// Pot left undistributed by floor division (after the dust policy).
    pub dust: u64,
    /// Whether the losing side could cover `pot + commission`.
    pub losers_covered: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Settlement {
    /// Equal points on both sides: every stake returned, no commission.
    Tie(Vec<u64>),
    Decided(TeamPayouts),
}

/// `floor(pot * rate / 100)`.
pub fn commission_for(pot_lamports: u64, commission_rate: u8) -> Result<u64> {
    mul_div_floor(pot_lamports, commission_rate as u64, PERCENT_DENOM)
}

/// `floor(a * b / d)` with a 128-bit intermediate.
pub fn mul_div_floor(a: u64, b: u64, d: u64) -> Result<u64> {
    require!(d > 0, TeamBetErrorCode::MathOverflow);

    let q = (a as u128)
        .checked_mul(b as u128)
        .ok_or(TeamBetErrorCode::MathOverflow)?
        / (d as u128);

    u64::try_from(q).map_err(|_| error!(TeamBetErrorCode::MathOverflow))
}

/// Refund path: every participant gets exactly their stake back.
pub fn refund_all(snapshot: &LedgerSnapshot) -> Vec<u64> {
    snapshot.bets.iter().map(|b| b.stake).collect()
}

/// Computes every participant's withdrawable amount for a closed team round.
///
/// - Equal side points is a tie and yields the refund path.
/// - Winners get `stake + floor(points * pot / winning_points)`.
/// - If the losing side's stake covers `pot + commission`, each loser pays a
///   stake-proportional share of it; otherwise every loser forfeits the
///   whole stake and commission is capped at what the losers forfeited.
pub fn settle(snapshot: &LedgerSnapshot, params: &SettlementParams) -> Result<Settlement> {
    let [a_points, b_points] = snapshot.side_points;

    if a_points == b_points {
        msg!("Settlement: tie at {} points, refunding all stakes", a_points);
        return Ok(Settlement::Tie(refund_all(snapshot)));
    }

    let winning_side = if a_points > b_points { Side::A } else { Side::B };
    let losing_side = winning_side.opponent();

    let pot = params.pot_lamports;
    let winning_points = snapshot.side_points[winning_side.index()];
    let losing_stake = snapshot.side_stake[losing_side.index()];

    let commission = commission_for(pot, params.commission_rate)?;
    let total_due = pot
        .checked_add(commission)
        .ok_or(TeamBetErrorCode::MathOverflow)?;
    let losers_covered = losing_stake >= total_due;

    let mut payouts = vec![0u64; snapshot.bets.len()];
    let mut distributed: u64 = 0;
    let mut last_winner: Option<usize> = None;

    for (i, bet) in snapshot.bets.iter().enumerate() {
        let side = bet.side.ok_or(TeamBetErrorCode::AssertInvariantFailed)?;

        payouts[i] = if side == winning_side {
            // Zero winning points cannot happen with a rate floor of 1 and a
            // minimum stake of one unit, but the stake is still returned.
            let share = if winning_points > 0 {
                mul_div_floor(bet.points, pot, winning_points)?
            } else {
                0
            };
            distributed = distributed
                .checked_add(share)
                .ok_or(TeamBetErrorCode::MathOverflow)?;
            last_winner = Some(i);

            bet.stake
                .checked_add(share)
                .ok_or(TeamBetErrorCode::MathOverflow)?
        } else if losers_covered {
            let loss = mul_div_floor(bet.stake, total_due, losing_stake)?;
            bet.stake
                .checked_sub(loss)
                .ok_or(TeamBetErrorCode::MathOverflow)?
        } else {
            0
        };
    }

    let mut dust = if winning_points > 0 {
        pot.checked_sub(distributed)
            .ok_or(TeamBetErrorCode::AssertInvariantFailed)?
    } else {
        0
    };

    if params.dust_policy == DustPolicy::SweepToLastWinner && dust > 0 {
        if let Some(i) = last_winner {
            payouts[i] = payouts[i]
                .checked_add(dust)
                .ok_or(TeamBetErrorCode::MathOverflow)?;
            dust = 0;
        }
    }

    // Floored losses can leave less than the nominal commission behind.
    let paid = payouts
        .iter()
        .try_fold(0u64, |acc, p| acc.checked_add(*p))
        .ok_or(TeamBetErrorCode::MathOverflow)?;
    let headroom = pot
        .checked_add(snapshot.total_stake)
        .ok_or(TeamBetErrorCode::MathOverflow)?
        .checked_sub(paid)
        .ok_or(TeamBetErrorCode::AssertInvariantFailed)?;

    let commission = if losers_covered {
        commission
    } else {
        commission.min(losing_stake)
    }
    .min(headroom);

    msg!(
        "Settlement: winner={:?} points={}/{} losing_stake={} due={} covered={} commission={} dust={}",
        winning_side,
        a_points,
        b_points,
        losing_stake,
        total_due,
        losers_covered,
        commission,
        dust
    );

    Ok(Settlement::Decided(TeamPayouts {
        winning_side,
        payouts,
        commission,
        dust,
        losers_covered,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{SIDE_A, SIDE_B};
    use crate::state::config::RepeatBetPolicy;
    use crate::test_utils::{key, open_team_round, small_rules};

    fn params(pot: u64, rate: u8, dust_policy: DustPolicy) -> SettlementParams {
        SettlementParams {
            pot_lamports: pot,
            commission_rate: rate,
            dust_policy,
        }
    }

    fn decided(s: Settlement) -> TeamPayouts {
        match s {
            Settlement::Decided(t) => t,
            Settlement::Tie(_) => panic!("expected a decided round"),
        }
    }

    #[test]
    fn losers_forfeit_everything_when_they_cannot_cover() {
        // min 50, unit 50, pot 100, commission 10%.
        let rules = small_rules(RepeatBetPolicy::Reject);
        let mut round = open_team_round(100, 10);
        round.place_bet(&rules, key(1), SIDE_A, 100, 1_000).unwrap();
        round.place_bet(&rules, key(2), SIDE_B, 100, 1_000 + 3_600).unwrap();

        let out = decided(
            settle(&round.snapshot(), &params(100, 10, DustPolicy::HouseRetains)).unwrap(),
        );

        assert_eq!(out.winning_side, Side::A);
        assert!(!out.losers_covered);
        assert_eq!(out.commission, 10);
        assert_eq!(out.payouts, vec![200, 0]);
        assert_eq!(out.dust, 0);
    }

    #[test]
    fn losers_pay_stake_proportional_share_when_covered() {
        let rules = small_rules(RepeatBetPolicy::Reject);
        let mut round = open_team_round(100, 10);
        round.place_bet(&rules, key(1), SIDE_A, 100, 1_000).unwrap();
        // Side B: 300 + 100 stake, fewer points because they bet late.
        round.place_bet(&rules, key(2), SIDE_B, 300, 1_000 + 20 * 3_600).unwrap();
        round.place_bet(&rules, key(3), SIDE_B, 100, 1_000 + 20 * 3_600).unwrap();

        let out = decided(
            settle(&round.snapshot(), &params(100, 10, DustPolicy::HouseRetains)).unwrap(),
        );

        // A has 48 points, B has 6 + 2 = 8.
        assert_eq!(out.winning_side, Side::A);
        assert!(out.losers_covered);
        assert_eq!(out.commission, 10);
        // due = 110 over a 400 stake: 300 pays 82, 100 pays 27.
        assert_eq!(out.payouts, vec![200, 218, 73]);
    }

    #[test]
    fn winners_split_pot_by_points_and_dust_is_retained() {
        let rules = small_rules(RepeatBetPolicy::Reject);
        let mut round = open_team_round(100, 0);
        // 48, 46 and 44 points on side A; one large late bet on B.
        round.place_bet(&rules, key(1), SIDE_A, 100, 1_000).unwrap();
        round.place_bet(&rules, key(2), SIDE_A, 100, 1_000 + 3_600).unwrap();
        round.place_bet(&rules, key(3), SIDE_A, 100, 1_000 + 2 * 3_600).unwrap();
        round.place_bet(&rules, key(4), SIDE_B, 500, 1_000 + 23 * 3_600).unwrap();

        let out = decided(
            settle(&round.snapshot(), &params(100, 0, DustPolicy::HouseRetains)).unwrap(),
        );

        // 100 * 48/138 = 34, 100 * 46/138 = 33, 100 * 44/138 = 31 -> 98 distributed.
        assert_eq!(out.payouts[..3], [134, 133, 131]);
        assert_eq!(out.dust, 2);
        // B covers 100: pays everything due.
        assert_eq!(out.payouts[3], 400);
    }

    #[test]
    fn dust_can_be_swept_to_last_winner() {
        let rules = small_rules(RepeatBetPolicy::Reject);
        let mut round = open_team_round(100, 0);
        round.place_bet(&rules, key(1), SIDE_A, 100, 1_000).unwrap();
        round.place_bet(&rules, key(2), SIDE_A, 100, 1_000 + 3_600).unwrap();
        round.place_bet(&rules, key(3), SIDE_A, 100, 1_000 + 2 * 3_600).unwrap();
        round.place_bet(&rules, key(4), SIDE_B, 500, 1_000 + 23 * 3_600).unwrap();

        let out = decided(
            settle(&round.snapshot(), &params(100, 0, DustPolicy::SweepToLastWinner)).unwrap(),
        );

        assert_eq!(out.payouts[..3], [134, 133, 133]);
        assert_eq!(out.dust, 0);
    }

    #[test]
    fn tie_refunds_all_without_commission() {
        let rules = small_rules(RepeatBetPolicy::Reject);
        let mut round = open_team_round(100, 10);
        round.place_bet(&rules, key(1), SIDE_A, 100, 1_000).unwrap();
        round.place_bet(&rules, key(2), SIDE_B, 100, 1_000).unwrap();

        let out = settle(&round.snapshot(), &params(100, 10, DustPolicy::HouseRetains)).unwrap();
        assert_eq!(out, Settlement::Tie(vec![100, 100]));
    }

    #[test]
    fn empty_round_is_a_tie() {
        let round = open_team_round(100, 10);
        let out = settle(&round.snapshot(), &params(100, 10, DustPolicy::HouseRetains)).unwrap();
        assert_eq!(out, Settlement::Tie(vec![]));
    }

    #[test]
    fn one_sided_round_pays_pot_without_commission() {
        let rules = small_rules(RepeatBetPolicy::Reject);
        let mut round = open_team_round(100, 10);
        round.place_bet(&rules, key(1), SIDE_A, 100, 1_000).unwrap();

        let out = decided(
            settle(&round.snapshot(), &params(100, 10, DustPolicy::HouseRetains)).unwrap(),
        );

        assert_eq!(out.winning_side, Side::A);
        assert!(!out.losers_covered);
        assert_eq!(out.commission, 0);
        assert_eq!(out.payouts, vec![200]);
    }

    #[test]
    fn commission_is_capped_by_forfeited_stake() {
        let rules = small_rules(RepeatBetPolicy::Reject);
        let mut round = open_team_round(1_000, 50);
        round.place_bet(&rules, key(1), SIDE_A, 100, 1_000).unwrap();
        round.place_bet(&rules, key(2), SIDE_B, 50, 1_000 + 5 * 3_600).unwrap();

        let out = decided(
            settle(&round.snapshot(), &params(1_000, 50, DustPolicy::HouseRetains)).unwrap(),
        );

        assert!(!out.losers_covered);
        assert_eq!(out.commission, 50);
        assert_eq!(out.payouts, vec![1_100, 0]);
    }

    #[test]
    fn floored_losses_cap_commission_when_covered() {
        let rules = small_rules(RepeatBetPolicy::Reject);
        let mut round = open_team_round(2, 50);
        round.place_bet(&rules, key(1), SIDE_A, 100, 1_000).unwrap();
        for i in 2..=5u8 {
            round.place_bet(&rules, key(i), SIDE_B, 50, 1_000 + 20 * 3_600).unwrap();
        }

        let snapshot = round.snapshot();
        let out = decided(settle(&snapshot, &params(2, 50, DustPolicy::HouseRetains)).unwrap());

        // due = 3 over a 200 stake: every 50 pays floor(0.75) = 0.
        assert!(out.losers_covered);
        assert_eq!(out.payouts, vec![102, 50, 50, 50, 50]);
        assert_eq!(out.commission, 0);

        let paid: u64 = out.payouts.iter().sum();
        assert!(paid + out.commission <= 2 + snapshot.total_stake);
    }

    #[test]
    fn payouts_never_exceed_pot_plus_stakes() {
        let rules = small_rules(RepeatBetPolicy::Accumulate);

        for pot in [1u64, 7, 100, 1_000, 12_345] {
            for rate in [0u8, 1, 10, 33, 50] {
                for b_stake in [50u64, 120, 999, 5_000] {
                    let mut round = open_team_round(pot, rate);
                    round.place_bet(&rules, key(1), SIDE_A, 150, 1_000).unwrap();
                    round.place_bet(&rules, key(2), SIDE_A, 75, 1_000 + 3_600).unwrap();
                    round
                        .place_bet(&rules, key(3), SIDE_B, b_stake, 1_000 + 12 * 3_600)
                        .unwrap();

                    let snapshot = round.snapshot();
                    let out = match settle(&snapshot, &params(pot, rate, DustPolicy::HouseRetains))
                        .unwrap()
                    {
                        Settlement::Decided(t) => t,
                        Settlement::Tie(_) => continue,
                    };

                    let paid: u64 = out.payouts.iter().sum();
                    assert!(
                        paid + out.commission <= pot + snapshot.total_stake,
                        "pot={} rate={} b_stake={} paid={} commission={}",
                        pot,
                        rate,
                        b_stake,
                        paid,
                        out.commission
                    );

                    for (bet, payout) in snapshot.bets.iter().zip(out.payouts.iter()) {
                        if bet.is_on(out.winning_side) {
                            assert!(*payout <= bet.stake + pot);
                        } else {
                            assert!(*payout <= bet.stake);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn commission_rounds_down() {
        assert_eq!(commission_for(100, 10).unwrap(), 10);
        assert_eq!(commission_for(99, 10).unwrap(), 9);
        assert_eq!(commission_for(u64::MAX, 50).unwrap(), u64::MAX / 2);
    }
}
