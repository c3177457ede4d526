use anchor_lang::prelude::*;
use sha2::{Digest, Sha256};

use crate::constants::{MAX_DRAW_ATTEMPTS, PERCENT_DENOM};
use crate::errors::TeamBetErrorCode;
use crate::utils::settlement::mul_div_floor;

/// Builds the draw seed from host entropy:
///
/// ```text
/// seed = SHA256(unix_timestamp_le || slot_hash || caller)
/// ```
pub fn derive_seed(unix_timestamp: i64, slot_hash: &[u8; 32], caller: &Pubkey) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(unix_timestamp.to_le_bytes());
    hasher.update(slot_hash);
    hasher.update(caller.as_ref());
    hasher.finalize().into()
}

/// Reads a 32-byte digest as a big-endian integer and reduces it mod `modulus`.
pub fn reduce_be(digest: &[u8; 32], modulus: u64) -> u64 {
    debug_assert!(modulus > 0);

    let m = modulus as u128;
    digest
        .iter()
        .fold(0u128, |acc, &b| ((acc << 8) | b as u128) % m) as u64
}

/// Iterated SHA-256 over a running 32-byte state.
#[derive(Clone, Debug)]
pub struct HashChain {
    state: [u8; 32],
}

impl HashChain {
    pub fn new(seed: [u8; 32]) -> Self {
        Self { state: seed }
    }

    /// Re-hashes the running value and returns the new digest.
    pub fn advance(&mut self) -> [u8; 32] {
        self.state = Sha256::digest(self.state).into();
        self.state
    }

    /// Endless stream of indices in `0..count`, one hash step each.
    pub fn indices(self, count: usize) -> IndexStream {
        IndexStream { chain: self, count }
    }
}

/// Index stream derived from a hash chain. Pure in `(seed, count)`.
#[derive(Clone, Debug)]
pub struct IndexStream {
    chain: HashChain,
    count: usize,
}

impl Iterator for IndexStream {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        let digest = self.chain.advance();
        Some(reduce_be(&digest, self.count as u64) as usize)
    }
}

/// Draws `k` distinct indices from `0..count` without replacement.
///
/// Repeats are skipped without consuming a slot; the order of the result is
/// the order of selection.
pub fn select_winner_indices(count: usize, k: usize, seed: [u8; 32]) -> Result<Vec<usize>> {
    require!(k > 0 && count >= k, TeamBetErrorCode::InsufficientParticipants);

    let mut chosen = vec![false; count];
    let mut winners = Vec::with_capacity(k);

    for idx in HashChain::new(seed)
        .indices(count)
        .take(MAX_DRAW_ATTEMPTS as usize)
    {
        if chosen[idx] {
            continue;
        }
        chosen[idx] = true;
        winners.push(idx);

        if winners.len() == k {
            return Ok(winners);
        }
    }

    err!(TeamBetErrorCode::SelectionExhausted)
}

/// Same draw as [`select_winner_indices`], mapped onto the participants.
pub fn select_winners<T: Copy>(participants: &[T], k: usize, seed: [u8; 32]) -> Result<Vec<T>> {
    Ok(select_winner_indices(participants.len(), k, seed)?
        .into_iter()
        .map(|i| participants[i])
        .collect())
}

/// Lottery pot split.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LotteryPayouts {
    pub house_fee: u64,
    pub net_pot: u64,
    /// Withdrawable per participant, in ledger order.
    pub payouts: Vec<u64>,
    /// Even share paid to every non-winner.
    pub consolation_share: u64,
}

/// Splits a lottery pot.
///
/// House fee = `floor(total_pot * rate / 100)`. Each winner receives the flat
/// prize. What is left of the net pot is divided evenly among non-winners and
/// the integer remainder goes to the last non-winner in ledger order, so no
/// lamport is left unassigned. With no non-winners the remainder goes to the
/// last winner drawn.
pub fn distribute_lottery(
    participant_count: usize,
    winners: &[usize],
    total_pot: u64,
    fee_rate: u8,
    prize_per_winner: u64,
) -> Result<LotteryPayouts> {
    let house_fee = mul_div_floor(total_pot, fee_rate as u64, PERCENT_DENOM)?;
    let net_pot = total_pot
        .checked_sub(house_fee)
        .ok_or(TeamBetErrorCode::MathOverflow)?;

    let prizes = prize_per_winner
        .checked_mul(winners.len() as u64)
        .ok_or(TeamBetErrorCode::MathOverflow)?;
    require!(net_pot >= prizes, TeamBetErrorCode::InsufficientPrizePool);
    let remainder = net_pot - prizes;

    let mut payouts = vec![0u64; participant_count];
    for &w in winners.iter() {
        require!(w < participant_count, TeamBetErrorCode::AssertInvariantFailed);
        payouts[w] = prize_per_winner;
    }

    let losers: Vec<usize> = (0..participant_count)
        .filter(|i| !winners.contains(i))
        .collect();

    let consolation_share = match losers.last() {
        Some(&last) => {
            let share = remainder / losers.len() as u64;
            let dust = remainder % losers.len() as u64;
            for &i in losers.iter() {
                payouts[i] = share;
            }
            payouts[last] = share
                .checked_add(dust)
                .ok_or(TeamBetErrorCode::MathOverflow)?;
            share
        }
        None => {
            if let Some(&last) = winners.last() {
                payouts[last] = payouts[last]
                    .checked_add(remainder)
                    .ok_or(TeamBetErrorCode::MathOverflow)?;
            }
            0
        }
    };

    Ok(LotteryPayouts {
        house_fee,
        net_pot,
        payouts,
        consolation_share,
    })
}
