use anchor_lang::prelude::*;

use crate::constants::MAX_BANNED;
use crate::errors::TeamBetErrorCode;

/// Participants excluded from betting and withdrawal.
///
/// Only consulted when `Config.ban_list_enabled` is set. Settlement never
/// reads or writes it.
#[account]
pub struct BannedList {
    pub entries: Vec<Pubkey>,
    pub bump: u8,
}

impl BannedList {
    pub const SEED: &'static [u8] = b"banned";

    pub const SIZE: usize =
        4 + (32 * MAX_BANNED) + // entries
            1; // bump

    pub fn contains(&self, participant: &Pubkey) -> bool {
        self.entries.iter().any(|k| k == participant)
    }

    /// Adds then removes. Re-adding an existing entry is a no-op.
    pub fn apply(&mut self, add: &[Pubkey], remove: &[Pubkey]) -> Result<()> {
        for key in add.iter() {
            if !self.contains(key) {
                require!(self.entries.len() < MAX_BANNED, TeamBetErrorCode::BanListFull);
                self.entries.push(*key);
            }
        }
        self.entries.retain(|k| !remove.contains(k));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::key;

    #[test]
    fn banned_list_max_size() {
        let list = BannedList {
            entries: vec![Pubkey::default(); MAX_BANNED],
            bump: 0,
        };

        let mut bytes = Vec::new();
        list.serialize(&mut bytes).unwrap();
        assert_eq!(bytes.len(), BannedList::SIZE);
    }

    #[test]
    fn add_and_remove() {
        let mut list = BannedList { entries: vec![], bump: 0 };

        list.apply(&[key(1), key(2), key(1)], &[]).unwrap();
        assert_eq!(list.entries.len(), 2);
        assert!(list.contains(&key(1)));

        list.apply(&[], &[key(1)]).unwrap();
        assert!(!list.contains(&key(1)));
        assert!(list.contains(&key(2)));
    }

    #[test]
    fn capacity_is_enforced() {
        let mut list = BannedList {
            entries: vec![Pubkey::default(); MAX_BANNED],
            bump: 0,
        };
        assert!(list.apply(&[key(9)], &[]).is_err());
    }
}
