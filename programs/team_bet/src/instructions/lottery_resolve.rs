use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar::slot_hashes;

use crate::errors::TeamBetErrorCode;
use crate::events::{CommissionPaid, LotteryResolved};
use crate::state::*;
use crate::utils::entropy::latest_slot_hash;
use crate::utils::selection::{derive_seed, distribute_lottery, select_winner_indices, LotteryPayouts};
use crate::utils::transfers::debit_treasury;

#[derive(Accounts)]
pub struct ResolveLottery<'info> {
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

    /// CHECK: SlotHashes sysvar, address-checked.
    #[account(address = slot_hashes::ID)]
    pub slot_hashes: UncheckedAccount<'info>,

    pub authority: Signer<'info>,
}

/// Draws the lottery winners and distributes the pot.
///
/// Pure in `(round ledger, config, seed)` so the draw can be replayed from the
/// seed recorded on the round.
pub(crate) fn draw_and_apply(
    round: &mut Round,
    treasury: &mut Treasury,
    cfg: &Config,
    seed: [u8; 32],
    now_ts: i64,
) -> Result<LotteryPayouts> {
    let k = cfg.lottery_winner_count as usize;
    let n = round.participant_count();
    let required = k.max(cfg.lottery_min_participants as usize);
    require!(n >= required, TeamBetErrorCode::InsufficientParticipants);

    let reserved = round.reserved_lamports()?;
    let winner_idx = select_winner_indices(n, k, seed)?;
    let split = distribute_lottery(
        n,
        &winner_idx,
        reserved,
        round.commission_rate,
        cfg.lottery_prize_lamports,
    )?;

    let winners: Vec<Pubkey> = winner_idx
        .iter()
        .map(|&i| round.bets[i].participant)
        .collect();

    let total = round.close_with_payouts(&split.payouts, RoundPhase::Settled, now_ts)?;
    require!(total == split.net_pot, TeamBetErrorCode::AssertInvariantFailed);

    round.winners = winners;
    round.seed_used = seed;
    round.commission_lamports = split.house_fee;

    treasury.rebase_on_close(reserved, total)?;
    Ok(split)
}

pub fn resolve_lottery_handler(ctx: Context<ResolveLottery>) -> Result<()> {
    let cfg = &ctx.accounts.config;
    let round = &mut ctx.accounts.round;

    require!(round.is_open(), TeamBetErrorCode::RoundNotOpen);
    require!(round.mode == GameMode::Lottery, TeamBetErrorCode::WrongGameMode);

    round.assert_invariant()?;

    // ─────────────────────────────
    // Seed from host entropy
    // ─────────────────────────────
    let clock = Clock::get()?;
    let slot_hash = latest_slot_hash(&ctx.accounts.slot_hashes.to_account_info())?;
    let seed = derive_seed(clock.unix_timestamp, &slot_hash, &ctx.accounts.authority.key());

    let split = draw_and_apply(round, &mut ctx.accounts.treasury, cfg, seed, clock.unix_timestamp)?;

    msg!(
        "lottery: round={} winners={} fee={} share={}",
        round.round_id,
        round.winners.len(),
        split.house_fee,
        split.consolation_share
    );

    // ─────────────────────────────
    // House fee goes out immediately
    // ─────────────────────────────
    if split.house_fee > 0 {
        let treasury_info = ctx.accounts.treasury.to_account_info();
        let rent_min = Rent::get()?.minimum_balance(treasury_info.data_len());
        debit_treasury(
            &treasury_info,
            &ctx.accounts.fee_vault.to_account_info(),
            split.house_fee,
            rent_min,
        )?;

        let treasury = &mut ctx.accounts.treasury;
        treasury.total_fees_withdrawn = treasury
            .total_fees_withdrawn
            .checked_add(split.house_fee)
            .ok_or(TeamBetErrorCode::MathOverflow)?;
        treasury.total_out_lamports = treasury
            .total_out_lamports
            .checked_add(split.house_fee)
            .ok_or(TeamBetErrorCode::MathOverflow)?;

        emit!(CommissionPaid {
            round_id: round.round_id,
            fee_vault: cfg.fee_vault,
            amount: split.house_fee,
        });
    }

    emit!(LotteryResolved {
        round_id: round.round_id,
        seed,
        winners: round.winners.clone(),
        prize_per_winner: cfg.lottery_prize_lamports,
        consolation_share: split.consolation_share,
        house_fee: split.house_fee,
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SIDE_NONE;
    use crate::test_utils::{code_of, empty_round, empty_treasury, key, sample_config, small_rules};

    fn lottery_round(entrants: u8, stake: u64, pot: u64) -> Round {
        let rules = small_rules(RepeatBetPolicy::Reject);
        let mut round = empty_round();
        round
            .open(GameMode::Lottery, 1_000, 24 * 3_600, pot, 10)
            .unwrap();
        for n in 0..entrants {
            round
                .place_bet(&rules, key(10 + n), SIDE_NONE, stake, 1_000)
                .unwrap();
        }
        round
    }

    fn lottery_config(k: u8, prize: u64, min_participants: u16) -> Config {
        let mut cfg = sample_config();
        cfg.lottery_winner_count = k;
        cfg.lottery_prize_lamports = prize;
        cfg.lottery_min_participants = min_participants;
        cfg
    }

    #[test]
    fn draw_pays_flat_prizes_and_splits_the_rest() {
        // 7 x 100 staked + 300 pot = 1_000, fee 10% = 100, 2 prizes of 300,
        // 300 left over 5 non-winners.
        let mut round = lottery_round(7, 100, 300);
        let mut treasury = empty_treasury();
        treasury.reserve(1_000).unwrap();
        let cfg = lottery_config(2, 300, 5);

        let split = draw_and_apply(&mut round, &mut treasury, &cfg, [3u8; 32], 5_000).unwrap();

        assert_eq!(split.house_fee, 100);
        assert_eq!(round.phase, RoundPhase::Settled);
        assert_eq!(round.winners.len(), 2);
        assert_eq!(round.seed_used, [3u8; 32]);
        for w in round.winners.iter() {
            assert_eq!(round.find_bet(w).unwrap().withdrawable, 300);
        }
        let non_winners: Vec<u64> = round
            .bets
            .iter()
            .filter(|b| !round.winners.contains(&b.participant))
            .map(|b| b.withdrawable)
            .collect();
        assert_eq!(non_winners, vec![60; 5]);
        assert_eq!(treasury.liabilities_lamports, 900);
    }

    #[test]
    fn replaying_the_seed_reproduces_the_winners() {
        let cfg = lottery_config(3, 50, 3);
        let seed = derive_seed(1_234, &[8u8; 32], &key(1));

        let mut a = lottery_round(9, 100, 0);
        let mut b = lottery_round(9, 100, 0);
        draw_and_apply(&mut a, &mut empty_treasury_with(900), &cfg, seed, 2_000).unwrap();
        draw_and_apply(&mut b, &mut empty_treasury_with(900), &cfg, seed, 2_000).unwrap();

        assert_eq!(a.winners, b.winners);
    }

    fn empty_treasury_with(reserved: u64) -> Treasury {
        let mut t = empty_treasury();
        t.reserve(reserved).unwrap();
        t
    }

    #[test]
    fn minimum_participants_gate_the_draw() {
        let mut round = lottery_round(4, 100, 0);
        let cfg = lottery_config(2, 10, 5);

        let err = draw_and_apply(&mut round, &mut empty_treasury_with(400), &cfg, [1u8; 32], 2_000)
            .unwrap_err();
        assert_eq!(
            code_of(err),
            code_of(error!(TeamBetErrorCode::InsufficientParticipants))
        );
        assert!(round.is_open());
    }

    #[test]
    fn prize_pool_must_cover_every_winner() {
        let mut round = lottery_round(5, 100, 0);
        let cfg = lottery_config(3, 200, 5);

        let err = draw_and_apply(&mut round, &mut empty_treasury_with(500), &cfg, [1u8; 32], 2_000)
            .unwrap_err();
        assert_eq!(
            code_of(err),
            code_of(error!(TeamBetErrorCode::InsufficientPrizePool))
        );
    }
}
