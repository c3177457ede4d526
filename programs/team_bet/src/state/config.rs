use anchor_lang::prelude::*;

use crate::constants::{
    MAX_COMMISSION_RATE, MAX_LOTTERY_WINNERS, MAX_POINT_RATES, MIN_ROUND_DURATION_SECS,
};
use crate::errors::TeamBetErrorCode;
use crate::utils::betting::BetRules;
use crate::utils::points::PointRateSchedule;

/// What happens when the same participant bets twice in one round.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RepeatBetPolicy {
    /// Second bet fails with `AlreadyBet`.
    Reject,
    /// Stake and points are added to the existing record (same side only).
    Accumulate,
}

/// Where the team-settlement rounding shortfall ends up.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DustPolicy {
    /// Shortfall stays in the treasury and is reported as `Round.unswept_dust`.
    HouseRetains,
    /// Shortfall is added to the last winning record in ledger order.
    SweepToLastWinner,
}

/// Global configuration PDA.
///
/// Stores protocol-wide controls (authority, commission routing, pause flags),
/// round economics, the point-rate table and the optional behaviors that the
/// betting and settlement paths switch on. This account holds no lamports.
#[account]
pub struct Config {
    /// 1 = betting paused, 0 = enabled.
    pub pause_bet: u8,

    /// 1 = withdrawals paused, 0 = enabled.
    pub pause_withdraw: u8,

    /// Program admin authority.
    pub authority: Pubkey,

    /// Destination for commission and lottery house fees.
    pub fee_vault: Pubkey,

    /// Commission in whole percent of the pot (0..=50).
    pub commission_rate: u8,

    /// Smallest accepted stake per bet, in lamports.
    pub min_bet_lamports: u64,

    /// How long a round accepts bets after it opens.
    pub round_duration_secs: i64,

    /// Lamports per whole token when converting stake to points.
    pub points_unit: u64,

    /// Points per whole token, indexed by whole hours since round start.
    /// Only `point_rates[..point_rates_len]` is live. Fixed at initialize.
    pub point_rates: [u32; MAX_POINT_RATES],
    pub point_rates_len: u8,

    pub repeat_bet_policy: RepeatBetPolicy,
    pub dust_policy: DustPolicy,

    /// 1 = consult the BannedList on bet and withdraw.
    pub ban_list_enabled: u8,

    /// 1 = a tied team round settles as a full refund,
    /// 0 = `settle_game` rejects ties and the admin must force a refund.
    pub refund_on_tie: u8,

    /// Lottery: number of winners drawn.
    pub lottery_winner_count: u8,

    /// Lottery: flat prize per winner, in lamports.
    pub lottery_prize_lamports: u64,

    /// Lottery: entrants required before a draw is allowed.
    pub lottery_min_participants: u16,

    /// Unix timestamp when the program was initialized.
    pub started_at: i64,

    /// PDA bump for Config.
    pub bump: u8,

    /// Reserved space for future upgrades.
    pub _reserved: [u8; 16],
}

impl Config {
    pub const SEED: &'static [u8] = b"config";

    /// Serialized size excluding the 8-byte Anchor discriminator.
    pub const SIZE: usize =
        1 +  // pause_bet
            1 +  // pause_withdraw
            32 + // authority
            32 + // fee_vault
            1 +  // commission_rate
            8 +  // min_bet_lamports
            8 +  // round_duration_secs
            8 +  // points_unit
            (4 * MAX_POINT_RATES) + // point_rates
            1 +  // point_rates_len
            1 +  // repeat_bet_policy
            1 +  // dust_policy
            1 +  // ban_list_enabled
            1 +  // refund_on_tie
            1 +  // lottery_winner_count
            8 +  // lottery_prize_lamports
            2 +  // lottery_min_participants
            8 +  // started_at
            1 +  // bump
            16;  // reserved

    pub fn is_betting_paused(&self) -> bool {
        self.pause_bet != 0
    }

    pub fn is_withdraw_paused(&self) -> bool {
        self.pause_withdraw != 0
    }

    pub fn is_ban_list_enabled(&self) -> bool {
        self.ban_list_enabled != 0
    }

    pub fn refunds_on_tie(&self) -> bool {
        self.refund_on_tie != 0
    }

    pub fn point_schedule(&self) -> PointRateSchedule<'_> {
        PointRateSchedule::new(&self.point_rates[..self.point_rates_len as usize])
    }

    pub fn bet_rules(&self) -> BetRules {
        BetRules {
            min_bet_lamports: self.min_bet_lamports,
            points_unit: self.points_unit,
            repeat_bet_policy: self.repeat_bet_policy,
            point_rates: self.point_rates,
            point_rates_len: self.point_rates_len,
        }
    }

    /// Copies a point-rate table into the fixed-size slot.
    ///
    /// Entries must be positive. Ordering is not enforced here; whoever
    /// configures the table keeps it non-increasing.
    pub fn set_point_rates(&mut self, rates: &[u32]) -> Result<()> {
        require!(
            !rates.is_empty() && rates.len() <= MAX_POINT_RATES,
            TeamBetErrorCode::InvalidPointRates
        );
        require!(
            rates.iter().all(|&r| r > 0),
            TeamBetErrorCode::InvalidPointRates
        );

        let mut table = [0u32; MAX_POINT_RATES];
        table[..rates.len()].copy_from_slice(rates);
        self.point_rates = table;
        self.point_rates_len = rates.len() as u8;
        Ok(())
    }

    /// Validates the round economics as a whole.
    pub fn validate(&self) -> Result<()> {
        require!(
            self.commission_rate <= MAX_COMMISSION_RATE,
            TeamBetErrorCode::InvalidCommissionRate
        );
        require!(
            self.round_duration_secs >= MIN_ROUND_DURATION_SECS,
            TeamBetErrorCode::InvalidRoundDuration
        );
        require!(self.points_unit > 0, TeamBetErrorCode::InvalidPointsUnit);
        require!(self.min_bet_lamports > 0, TeamBetErrorCode::InvalidBetAmount);
        require!(
            self.point_rates_len >= 1 && self.point_rates_len as usize <= MAX_POINT_RATES,
            TeamBetErrorCode::InvalidPointRates
        );

        let k = self.lottery_winner_count as usize;
        require!(
            k >= 1 && k <= MAX_LOTTERY_WINNERS,
            TeamBetErrorCode::InvalidLotteryConfig
        );
        require!(
            self.lottery_prize_lamports > 0,
            TeamBetErrorCode::InvalidLotteryConfig
        );
        require!(
            self.lottery_min_participants as usize >= k,
            TeamBetErrorCode::InvalidLotteryConfig
        );

        require!(
            self.authority != self.fee_vault,
            TeamBetErrorCode::AuthorityCannotEqualFeeVault
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_config;

    #[test]
    fn config_size_matches_serialization() {
        let cfg = sample_config();

        let mut bytes = Vec::new();
        cfg.serialize(&mut bytes).unwrap();
        assert_eq!(bytes.len(), Config::SIZE);
    }

    #[test]
    fn sample_config_is_valid() {
        assert!(sample_config().validate().is_ok());
    }

    #[test]
    fn rejects_commission_above_fifty_percent() {
        let mut cfg = sample_config();
        cfg.commission_rate = 50;
        assert!(cfg.validate().is_ok());

        cfg.commission_rate = 51;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_duration_below_floor() {
        let mut cfg = sample_config();
        cfg.round_duration_secs = MIN_ROUND_DURATION_SECS - 1;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_lottery_min_participants_below_winner_count() {
        let mut cfg = sample_config();
        cfg.lottery_min_participants = 2;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn point_rate_table_bounds() {
        let mut cfg = sample_config();
        assert!(cfg.set_point_rates(&[]).is_err());
        assert!(cfg.set_point_rates(&[5, 0, 3]).is_err());
        assert!(cfg.set_point_rates(&[1u32; MAX_POINT_RATES + 1]).is_err());

        cfg.set_point_rates(&[9, 8]).unwrap();
        assert_eq!(cfg.point_rates_len, 2);
        assert_eq!(cfg.point_schedule().rate(0), 9);
        assert_eq!(cfg.point_schedule().rate(3_600), 8);
        assert_eq!(cfg.point_schedule().rate(7_200), 1);
    }
}
