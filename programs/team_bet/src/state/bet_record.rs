use anchor_lang::prelude::*;

use crate::constants::{SIDE_A, SIDE_B};

/// One of the two competing sides in a team round.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl Side {
    /// Index into the per-side aggregate arrays on `Round`.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }

    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    /// Wire code used by `place_bet` (`1` = A, `2` = B).
    #[inline]
    pub fn code(self) -> u8 {
        match self {
            Side::A => SIDE_A,
            Side::B => SIDE_B,
        }
    }
}

/// ---------------------------------------------------------------------------
/// BetRecord
/// ---------------------------------------------------------------------------
/// A participant's position in the current round.
///
/// Created on the first bet, mutated by repeat bets (accumulate policy),
/// by settlement (sets `withdrawable`) and by withdrawal (zeroes it).
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BetRecord {
    pub participant: Pubkey,

    /// Backed side; `None` for lottery entries.
    pub side: Option<Side>,

    /// Total lamports staked this round.
    pub stake: u64,

    /// Time-weighted points earned by the stake.
    pub points: u64,

    /// Claimable lamports. Non-zero only between settlement and claim.
    pub withdrawable: u64,
}

impl BetRecord {
    pub const SIZE: usize =
        32 + // participant
            2 +  // side (Option tag + variant)
            8 +  // stake
            8 +  // points
            8;   // withdrawable

    pub fn new(participant: Pubkey, side: Option<Side>, stake: u64, points: u64) -> Self {
        Self {
            participant,
            side,
            stake,
            points,
            withdrawable: 0,
        }
    }

    #[inline]
    pub fn is_on(&self, side: Side) -> bool {
        self.side == Some(side)
    }
}
