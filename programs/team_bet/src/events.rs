use anchor_lang::prelude::*;

// --- CONFIG & ADMIN ---
#[event]
pub struct ConfigInitialized {
    pub authority: Pubkey,
    pub fee_vault: Pubkey,
    pub commission_rate: u8,
    pub min_bet_lamports: u64,
    pub round_duration_secs: i64,
}

#[event]
pub struct ConfigUpdated {
    pub authority: Pubkey,
    pub fee_vault: Pubkey,
    pub pause_bet: u8,
    pub pause_withdraw: u8,
    pub commission_rate: u8,
    pub min_bet_lamports: u64,
    pub round_duration_secs: i64,
}

#[event]
pub struct BanListUpdated {
    pub added: u16,
    pub removed: u16,
    pub total: u16,
}

// --- TREASURY ---
#[event]
pub struct TreasuryFunded {
    pub funder: Pubkey,
    pub amount: u64,
    pub free_balance: u64,
}

#[event]
pub struct HouseFundsWithdrawn {
    pub to: Pubkey,
    pub amount: u64,
    pub free_balance: u64,
}

// --- ROUND ---
#[event]
pub struct GameStarted {
    pub round_id: u64,
    pub mode: u8,
    pub pot_lamports: u64,
    pub started_at: i64,
    pub ends_at: i64,
    /// Unclaimed balances of the previous round released back to the house.
    pub abandoned_lamports: u64,
}

#[event]
pub struct BetPlaced {
    pub round_id: u64,
    pub participant: Pubkey,
    pub side: u8,
    pub amount: u64,
    pub points: u64,
    pub point_rate: u64,
    pub total_stake: u64,
    pub total_points: u64,
}

// --- SETTLEMENT ---
#[event]
pub struct GameSettled {
    pub round_id: u64,
    pub winning_side: u8,
    pub losers_covered: bool,
    pub total_payouts: u64,
    pub commission_lamports: u64,
    pub unswept_dust: u64,
}

#[event]
pub struct GameRefunded {
    pub round_id: u64,
    pub participants: u16,
    pub total_refunded: u64,
    pub tie: bool,
}

// --- LOTTERY ---
#[event]
pub struct LotteryResolved {
    pub round_id: u64,
    pub seed: [u8; 32],
    pub winners: Vec<Pubkey>,
    pub prize_per_winner: u64,
    pub consolation_share: u64,
    pub house_fee: u64,
}

// --- FEES ---
#[event]
pub struct CommissionPaid {
    pub round_id: u64,
    pub fee_vault: Pubkey,
    pub amount: u64,
}

// --- WITHDRAWAL ---
#[event]
pub struct Withdrawn {
    pub round_id: u64,
    pub participant: Pubkey,
    pub amount: u64,
}
