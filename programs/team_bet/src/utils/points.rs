use anchor_lang::prelude::*;

use crate::constants::{FLOOR_POINT_RATE, SECONDS_PER_HOUR};
use crate::errors::TeamBetErrorCode;

/// Hourly point-rate table.
///
/// `rate(elapsed)` looks up `table[elapsed / 3600]` and falls back to a floor
/// rate of 1 once the round has run past the table. The table is expected to
/// be non-increasing so early stakes never earn less than late ones.
#[derive(Clone, Copy, Debug)]
pub struct PointRateSchedule<'a> {
    rates: &'a [u32],
}

impl<'a> PointRateSchedule<'a> {
    pub fn new(rates: &'a [u32]) -> Self {
        Self { rates }
    }

    /// Points per whole token for a bet placed `elapsed_secs` after round start.
    /// Negative elapsed time counts as the first hour.
    pub fn rate(&self, elapsed_secs: i64) -> u64 {
        let hours = elapsed_secs.max(0) / SECONDS_PER_HOUR;

        usize::try_from(hours)
            .ok()
            .and_then(|h| self.rates.get(h))
            .map(|&r| r as u64)
            .unwrap_or(FLOOR_POINT_RATE)
    }

    /// `floor(amount / unit) * rate(elapsed)`.
    ///
    /// Stake below one whole unit earns nothing; splitting a stake into many
    /// sub-unit bets cannot farm points.
    pub fn points_for(&self, amount: u64, unit: u64, elapsed_secs: i64) -> Result<u64> {
        require!(unit > 0, TeamBetErrorCode::InvalidPointsUnit);

        let whole_units = amount / unit;
        whole_units
            .checked_mul(self.rate(elapsed_secs))
            .ok_or_else(|| error!(TeamBetErrorCode::MathOverflow))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: [u32; 10] = [24, 23, 22, 21, 20, 19, 18, 17, 16, 15];

    #[test]
    fn rate_follows_whole_hours() {
        let schedule = PointRateSchedule::new(&TABLE);

        assert_eq!(schedule.rate(0), 24);
        assert_eq!(schedule.rate(3_599), 24);
        assert_eq!(schedule.rate(3_600), 23);
        assert_eq!(schedule.rate(9 * 3_600), 15);
    }

    #[test]
    fn rate_floors_at_one_past_the_table() {
        let schedule = PointRateSchedule::new(&TABLE);

        assert_eq!(schedule.rate(10 * 3_600), 1);
        assert_eq!(schedule.rate(i64::MAX), 1);
    }

    #[test]
    fn negative_elapsed_uses_first_rate() {
        let schedule = PointRateSchedule::new(&TABLE);
        assert_eq!(schedule.rate(-5), 24);
    }

    #[test]
    fn points_use_whole_units_only() {
        let schedule = PointRateSchedule::new(&TABLE);

        assert_eq!(schedule.points_for(100, 50, 0).unwrap(), 48);
        assert_eq!(schedule.points_for(100, 50, 3_600).unwrap(), 46);
        assert_eq!(schedule.points_for(149, 50, 0).unwrap(), 48);
        assert_eq!(schedule.points_for(49, 50, 0).unwrap(), 0);
    }

    #[test]
    fn zero_unit_is_rejected() {
        let schedule = PointRateSchedule::new(&TABLE);
        assert!(schedule.points_for(100, 0, 0).is_err());
    }
}
