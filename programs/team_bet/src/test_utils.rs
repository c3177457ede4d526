//! Fixtures shared by the unit tests.

use anchor_lang::prelude::*;

use crate::constants::{DEFAULT_POINT_RATES, LAMPORTS_PER_SOL, MAX_POINT_RATES};
use crate::state::{Config, DustPolicy, GameMode, RepeatBetPolicy, Round, RoundPhase, Treasury};
use crate::utils::betting::BetRules;

pub fn key(n: u8) -> Pubkey {
    Pubkey::new_from_array([n; 32])
}

/// Anchor error code number, for comparing errors in assertions.
pub fn code_of(err: anchor_lang::error::Error) -> u32 {
    match err {
        anchor_lang::error::Error::AnchorError(e) => e.error_code_number,
        anchor_lang::error::Error::ProgramError(_) => u32::MAX,
    }
}

pub fn sample_config() -> Config {
    let mut cfg = Config {
        pause_bet: 0,
        pause_withdraw: 0,
        authority: key(1),
        fee_vault: key(2),
        commission_rate: 10,
        min_bet_lamports: LAMPORTS_PER_SOL / 100,
        round_duration_secs: 24 * 3_600,
        points_unit: LAMPORTS_PER_SOL,
        point_rates: [0; MAX_POINT_RATES],
        point_rates_len: 0,
        repeat_bet_policy: RepeatBetPolicy::Accumulate,
        dust_policy: DustPolicy::HouseRetains,
        ban_list_enabled: 0,
        refund_on_tie: 1,
        lottery_winner_count: 3,
        lottery_prize_lamports: LAMPORTS_PER_SOL,
        lottery_min_participants: 5,
        started_at: 0,
        bump: 0,
        _reserved: [0; 16],
    };
    cfg.set_point_rates(&DEFAULT_POINT_RATES).unwrap();
    cfg
}

pub fn empty_round() -> Round {
    let mut round = Round {
        round_id: 0,
        phase: RoundPhase::Idle,
        mode: GameMode::Teams,
        started_at: 0,
        duration_secs: 0,
        pot_lamports: 0,
        commission_rate: 0,
        side_stake: [0; 2],
        side_points: [0; 2],
        total_stake: 0,
        winning_side: None,
        commission_lamports: 0,
        unswept_dust: 0,
        total_payouts: 0,
        claimed_lamports: 0,
        closed_at: 0,
        seed_used: [0; 32],
        winners: Vec::new(),
        bets: Vec::new(),
        bump: 0,
        version: 0,
        _reserved: [0; 16],
    };
    round.init_new(255);
    round
}

pub fn empty_treasury() -> Treasury {
    Treasury {
        bump: 0,
        liabilities_lamports: 0,
        total_in_lamports: 0,
        total_out_lamports: 0,
        total_fees_withdrawn: 0,
        house_deposited: 0,
        house_withdrawn: 0,
        total_abandoned_lamports: 0,
        version: Treasury::VERSION,
        _reserved: [0u8; 32],
    }
}

/// Minimum 50, unit 50, default table: 100 lamports at hour 0 earn 48 points.
pub fn small_rules(policy: RepeatBetPolicy) -> BetRules {
    let mut cfg = sample_config();
    cfg.min_bet_lamports = 50;
    cfg.points_unit = 50;
    cfg.repeat_bet_policy = policy;
    cfg.bet_rules()
}

/// Team round opened at t=1000 for 24h.
pub fn open_team_round(pot: u64, commission_rate: u8) -> Round {
    let mut round = empty_round();
    round
        .open(GameMode::Teams, 1_000, 24 * 3_600, pot, commission_rate)
        .unwrap();
    round
}
