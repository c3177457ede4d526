use anchor_lang::prelude::*;

use crate::constants::{MAX_POINT_RATES, SIDE_A, SIDE_B, SIDE_NONE};
use crate::errors::TeamBetErrorCode;
use crate::state::bet_record::Side;
use crate::state::config::RepeatBetPolicy;
use crate::state::round::GameMode;
use crate::utils::points::PointRateSchedule;

/// The slice of `Config` the ledger needs to admit a bet.
#[derive(Clone, Copy, Debug)]
pub struct BetRules {
    pub min_bet_lamports: u64,
    pub points_unit: u64,
    pub repeat_bet_policy: RepeatBetPolicy,
    pub point_rates: [u32; MAX_POINT_RATES],
    pub point_rates_len: u8,
}

impl BetRules {
    pub fn schedule(&self) -> PointRateSchedule<'_> {
        let len = (self.point_rates_len as usize).min(MAX_POINT_RATES);
        PointRateSchedule::new(&self.point_rates[..len])
    }
}

/// Maps a wire side code to a side for the given round mode.
///
/// Team rounds need `1` (A) or `2` (B); lottery rounds need `0`.
pub fn resolve_side(side_code: u8, mode: GameMode) -> Result<Option<Side>> {
    match (mode, side_code) {
        (GameMode::Teams, SIDE_A) => Ok(Some(Side::A)),
        (GameMode::Teams, SIDE_B) => Ok(Some(Side::B)),
        (GameMode::Lottery, SIDE_NONE) => Ok(None),
        _ => err!(TeamBetErrorCode::InvalidSide),
    }
}

/// Betting stays open until `started_at + duration_secs`, inclusive.
pub fn is_within_betting_window(started_at: i64, duration_secs: i64, now_ts: i64) -> bool {
    let closes_at = started_at.saturating_add(duration_secs);
    let open = now_ts <= closes_at;

    msg!(
        "Betting window check: started_at={} closes_at={} now={}",
        started_at,
        closes_at,
        now_ts
    );
    open
}
