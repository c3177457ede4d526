use anchor_lang::prelude::*;

use crate::errors::TeamBetErrorCode;

/// SlotHashes layout: `u64` entry count, then `(slot: u64, hash: [u8; 32])`
/// entries, most recent first.
const COUNT_LEN: usize = 8;
const ENTRY_LEN: usize = 8 + 32;

/// Most recent slot hash from the SlotHashes sysvar account.
pub fn latest_slot_hash(slot_hashes: &AccountInfo) -> Result<[u8; 32]> {
    let data = slot_hashes.try_borrow_data()?;
    parse_latest_slot_hash(&data)
}

/// Parses raw SlotHashes data. Returns the hash of the first entry.
pub fn parse_latest_slot_hash(data: &[u8]) -> Result<[u8; 32]> {
    let count_bytes: [u8; 8] = data
        .get(..COUNT_LEN)
        .and_then(|b| b.try_into().ok())
        .ok_or(TeamBetErrorCode::SlotHashesUnavailable)?;
    require!(
        u64::from_le_bytes(count_bytes) > 0,
        TeamBetErrorCode::SlotHashesUnavailable
    );

    let hash: [u8; 32] = data
        .get(COUNT_LEN + 8..COUNT_LEN + ENTRY_LEN)
        .and_then(|b| b.try_into().ok())
        .ok_or(TeamBetErrorCode::SlotHashesUnavailable)?;

    Ok(hash)
}
