pub const ROUND_VERSION: u8 = 1;

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

pub const SECONDS_PER_HOUR: i64 = 3_600;

/// Commission is a whole percentage of the pot, capped at 50%.
pub const MAX_COMMISSION_RATE: u8 = 50;
pub const PERCENT_DENOM: u64 = 100;

/// Shortest round a config may describe.
pub const MIN_ROUND_DURATION_SECS: i64 = SECONDS_PER_HOUR;

/// Capacity of the point-rate table (one entry per elapsed hour).
pub const MAX_POINT_RATES: usize = 24;

/// Rate applied once elapsed hours run past the configured table.
pub const FLOOR_POINT_RATE: u64 = 1;

/// Ledger capacity; keeps `Round` under the 10 KiB PDA init limit.
pub const MAX_PARTICIPANTS: usize = 128;

pub const MAX_BANNED: usize = 64;

pub const MAX_LOTTERY_WINNERS: usize = 16;

/// Upper bound on hash steps spent drawing lottery winners.
pub const MAX_DRAW_ATTEMPTS: u32 = 4_096;

pub const SIDE_NONE: u8 = 0;
pub const SIDE_A: u8 = 1;
pub const SIDE_B: u8 = 2;

/// Default hourly schedule: 24 points per whole SOL in the first hour, down to 15.
pub const DEFAULT_POINT_RATES: [u32; 10] = [24, 23, 22, 21, 20, 19, 18, 17, 16, 15];
