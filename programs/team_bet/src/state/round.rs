use anchor_lang::prelude::*;

use crate::constants::{MAX_LOTTERY_WINNERS, MAX_PARTICIPANTS, ROUND_VERSION};
use crate::errors::TeamBetErrorCode;
use crate::state::bet_record::{BetRecord, Side};
use crate::state::config::RepeatBetPolicy;
use crate::utils::betting::{is_within_betting_window, resolve_side, BetRules};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundPhase {
    /// No round has been opened yet.
    Idle,
    /// Accepting bets.
    Open,
    /// Closed by normal settlement or a lottery draw.
    Settled,
    /// Closed by a full refund (tie or forced).
    Refunded,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMode {
    /// Two sides compete on time-weighted points.
    Teams,
    /// Single pool, `k` winners drawn from a hash chain.
    Lottery,
}

/// ---------------------------------------------------------------------------
/// Round
/// ---------------------------------------------------------------------------
///
/// The single live round: lifecycle state, per-side aggregates and the bet
/// ledger itself. `start_game` re-opens this account, discarding the previous
/// ledger (unclaimed balances are abandoned to the house).
///
/// Invariant: `side_stake`, `side_points` and `total_stake` always equal the
/// sums over `bets`. They are maintained incrementally on every bet and
/// checked by `assert_invariant` before settlement.
#[account]
pub struct Round {
    // Identification
    pub round_id: u64,
    pub phase: RoundPhase,
    pub mode: GameMode,

    // Configuration captured when the round opened
    pub started_at: i64,
    pub duration_secs: i64,
    pub pot_lamports: u64,
    pub commission_rate: u8,

    // Aggregates (index 0 = A, 1 = B)
    pub side_stake: [u64; 2],
    pub side_points: [u64; 2],
    pub total_stake: u64,

    // Outcome
    pub winning_side: Option<Side>,
    pub commission_lamports: u64,
    pub unswept_dust: u64,
    pub total_payouts: u64,
    pub claimed_lamports: u64,
    pub closed_at: i64,

    // Lottery provenance
    pub seed_used: [u8; 32],
    pub winners: Vec<Pubkey>,

    // Ledger
    pub bets: Vec<BetRecord>,

    pub bump: u8,
    pub version: u8,
    pub _reserved: [u8; 16],
}

/// Result of admitting one bet into the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BetReceipt {
    pub side: Option<Side>,
    pub amount: u64,
    pub points: u64,
    pub point_rate: u64,
    /// Participant totals after this bet.
    pub total_stake: u64,
    pub total_points: u64,
    pub is_new_participant: bool,
}

/// Read-only view of the ledger handed to the settlement engines.
#[derive(Clone, Copy, Debug)]
pub struct LedgerSnapshot<'a> {
    pub bets: &'a [BetRecord],
    pub side_stake: [u64; 2],
    pub side_points: [u64; 2],
    pub total_stake: u64,
}

impl Round {
    pub const SEED: &'static [u8] = b"round";

    /// Serialized size excluding the 8-byte Anchor discriminator,
    /// with both vectors at capacity.
    pub const SIZE: usize =
        8 +  // round_id
            1 +  // phase
            1 +  // mode
            8 +  // started_at
            8 +  // duration_secs
            8 +  // pot_lamports
            1 +  // commission_rate
            16 + // side_stake
            16 + // side_points
            8 +  // total_stake
            2 +  // winning_side
            8 +  // commission_lamports
            8 +  // unswept_dust
            8 +  // total_payouts
            8 +  // claimed_lamports
            8 +  // closed_at
            32 + // seed_used
            4 + (32 * MAX_LOTTERY_WINNERS) + // winners
            4 + (BetRecord::SIZE * MAX_PARTICIPANTS) + // bets
            1 +  // bump
            1 +  // version
            16;  // reserved

    pub fn init_new(&mut self, bump: u8) {
        self.round_id = 0;
        self.phase = RoundPhase::Idle;
        self.mode = GameMode::Teams;
        self.bump = bump;
        self.version = ROUND_VERSION;
        self._reserved = [0u8; 16];
        self.clear(0, 0, 0, 0);
    }

    /// Opens a fresh round, discarding the previous ledger and aggregates.
    pub fn open(
        &mut self,
        mode: GameMode,
        now_ts: i64,
        duration_secs: i64,
        pot_lamports: u64,
        commission_rate: u8,
    ) -> Result<()> {
        require!(!self.is_open(), TeamBetErrorCode::RoundAlreadyOpen);

        self.round_id = self
            .round_id
            .checked_add(1)
            .ok_or(TeamBetErrorCode::MathOverflow)?;
        self.phase = RoundPhase::Open;
        self.mode = mode;
        self.clear(now_ts, duration_secs, pot_lamports, commission_rate);
        Ok(())
    }

    fn clear(&mut self, now_ts: i64, duration_secs: i64, pot_lamports: u64, commission_rate: u8) {
        self.started_at = now_ts;
        self.duration_secs = duration_secs;
        self.pot_lamports = pot_lamports;
        self.commission_rate = commission_rate;

        self.side_stake = [0; 2];
        self.side_points = [0; 2];
        self.total_stake = 0;

        self.winning_side = None;
        self.commission_lamports = 0;
        self.unswept_dust = 0;
        self.total_payouts = 0;
        self.claimed_lamports = 0;
        self.closed_at = 0;

        self.seed_used = [0u8; 32];
        self.winners = Vec::new();
        self.bets = Vec::new();
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.phase == RoundPhase::Open
    }

    pub fn participant_count(&self) -> usize {
        self.bets.len()
    }

    pub fn find_bet(&self, participant: &Pubkey) -> Option<&BetRecord> {
        self.bets.iter().find(|b| b.participant == *participant)
    }

    pub fn find_bet_mut(&mut self, participant: &Pubkey) -> Option<&mut BetRecord> {
        self.bets.iter_mut().find(|b| b.participant == *participant)
    }

    /// Lamports settled to participants and not yet claimed.
    pub fn outstanding_lamports(&self) -> u64 {
        self.total_payouts.saturating_sub(self.claimed_lamports)
    }

    /// Treasury reservation held by an open round: the pot plus every stake.
    pub fn reserved_lamports(&self) -> Result<u64> {
        Ok(self
            .pot_lamports
            .checked_add(self.total_stake)
            .ok_or(TeamBetErrorCode::MathOverflow)?)
    }

    /// Admits a bet into the ledger.
    ///
    /// Checks phase, side, minimum stake and betting window, computes the
    /// time-weighted points and applies the repeat-bet policy. Per-side
    /// aggregates are incremented by the new amount and points. Pause and
    /// ban checks belong to the caller.
    pub fn place_bet(
        &mut self,
        rules: &BetRules,
        participant: Pubkey,
        side_code: u8,
        amount: u64,
        now_ts: i64,
    ) -> Result<BetReceipt> {
        require!(self.is_open(), TeamBetErrorCode::RoundClosed);

        let side = resolve_side(side_code, self.mode)?;

        require!(amount > 0, TeamBetErrorCode::InvalidBetAmount);
        require!(amount >= rules.min_bet_lamports, TeamBetErrorCode::BelowMinimum);
        require!(
            is_within_betting_window(self.started_at, self.duration_secs, now_ts),
            TeamBetErrorCode::BettingWindowExpired
        );

        // Lottery entries carry no side and earn no points.
        let elapsed = now_ts.saturating_sub(self.started_at);
        let (point_rate, points) = match side {
            Some(_) => {
                let schedule = rules.schedule();
                (
                    schedule.rate(elapsed),
                    schedule.points_for(amount, rules.points_unit, elapsed)?,
                )
            }
            None => (0, 0),
        };

        // Compute every new total before touching state.
        let new_total_stake = self
            .total_stake
            .checked_add(amount)
            .ok_or(TeamBetErrorCode::MathOverflow)?;

        let new_side_totals = match side {
            Some(s) => {
                let i = s.index();
                let stake = self.side_stake[i]
                    .checked_add(amount)
                    .ok_or(TeamBetErrorCode::MathOverflow)?;
                let pts = self.side_points[i]
                    .checked_add(points)
                    .ok_or(TeamBetErrorCode::MathOverflow)?;
                Some((i, stake, pts))
            }
            None => None,
        };

        let (record_stake, record_points, is_new_participant) =
            match self.find_bet_mut(&participant) {
                Some(existing) => {
                    require!(
                        rules.repeat_bet_policy == RepeatBetPolicy::Accumulate,
                        TeamBetErrorCode::AlreadyBet
                    );
                    require!(existing.side == side, TeamBetErrorCode::SideMismatch);

                    let stake = existing
                        .stake
                        .checked_add(amount)
                        .ok_or(TeamBetErrorCode::MathOverflow)?;
                    let pts = existing
                        .points
                        .checked_add(points)
                        .ok_or(TeamBetErrorCode::MathOverflow)?;

                    existing.stake = stake;
                    existing.points = pts;
                    (stake, pts, false)
                }
                None => {
                    require!(
                        self.bets.len() < MAX_PARTICIPANTS,
                        TeamBetErrorCode::LedgerFull
                    );
                    self.bets
                        .push(BetRecord::new(participant, side, amount, points));
                    (amount, points, true)
                }
            };

        self.total_stake = new_total_stake;
        if let Some((i, stake, pts)) = new_side_totals {
            self.side_stake[i] = stake;
            self.side_points[i] = pts;
        }

        Ok(BetReceipt {
            side,
            amount,
            points,
            point_rate,
            total_stake: record_stake,
            total_points: record_points,
            is_new_participant,
        })
    }

    pub fn snapshot(&self) -> LedgerSnapshot<'_> {
        LedgerSnapshot {
            bets: &self.bets,
            side_stake: self.side_stake,
            side_points: self.side_points,
            total_stake: self.total_stake,
        }
    }

    /// Recomputes the aggregates from the ledger and compares.
    pub fn assert_invariant(&self) -> Result<()> {
        let mut stake = [0u64; 2];
        let mut points = [0u64; 2];
        let mut total: u64 = 0;

        for bet in self.bets.iter() {
            total = total
                .checked_add(bet.stake)
                .ok_or(TeamBetErrorCode::MathOverflow)?;

            if let Some(side) = bet.side {
                let i = side.index();
                stake[i] = stake[i]
                    .checked_add(bet.stake)
                    .ok_or(TeamBetErrorCode::MathOverflow)?;
                points[i] = points[i]
                    .checked_add(bet.points)
                    .ok_or(TeamBetErrorCode::MathOverflow)?;
            }
        }

        require!(
            stake == self.side_stake && points == self.side_points && total == self.total_stake,
            TeamBetErrorCode::AssertInvariantFailed
        );
        Ok(())
    }

    /// Closes the round, overwriting every record's `withdrawable` with the
    /// matching entry of `payouts` (ledger order). Returns the payout total.
    pub fn close_with_payouts(
        &mut self,
        payouts: &[u64],
        phase: RoundPhase,
        now_ts: i64,
    ) -> Result<u64> {
        require!(self.is_open(), TeamBetErrorCode::RoundNotOpen);
        require!(
            matches!(phase, RoundPhase::Settled | RoundPhase::Refunded),
            TeamBetErrorCode::AssertInvariantFailed
        );
        require!(
            payouts.len() == self.bets.len(),
            TeamBetErrorCode::AssertInvariantFailed
        );

        let mut total: u64 = 0;
        for (bet, &amount) in self.bets.iter_mut().zip(payouts.iter()) {
            bet.withdrawable = amount;
            total = total
                .checked_add(amount)
                .ok_or(TeamBetErrorCode::MathOverflow)?;
        }

        self.total_payouts = total;
        self.claimed_lamports = 0;
        self.phase = phase;
        self.closed_at = now_ts;
        Ok(total)
    }
}
