use anchor_lang::prelude::*;

#[error_code]
pub enum TeamBetErrorCode {
    // ─────────────────────────────
    // Setup and configuration
    // ─────────────────────────────
    #[msg("Commission rate must be between 0 and 50 percent")]
    InvalidCommissionRate,

    #[msg("Round duration below minimum")]
    InvalidRoundDuration,

    #[msg("Invalid point rate table")]
    InvalidPointRates,

    InvalidPointsUnit,
    InvalidLotteryConfig,
    InvalidAuthorityTarget,
    InvalidFeeVault,
    AuthorityCannotEqualFeeVault,

    #[msg("Pot size must be set first")]
    InvalidPotSize,

    // ─────────────────────────────
    // General / Access Control
    // ─────────────────────────────
    #[msg("Unauthorized")]
    Unauthorized,

    #[msg("Math overflow")]
    MathOverflow,

    AssertInvariantFailed,

    #[msg("Insufficient treasury balance")]
    InsufficientTreasuryBalance,

    // ─────────────────────────────
    // Round lifecycle
    // ─────────────────────────────
    #[msg("Game already active")]
    RoundAlreadyOpen,

    #[msg("No active game")]
    RoundNotOpen,

    #[msg("Config cannot change during an active game")]
    ConfigLockedActiveRound,

    #[msg("Instruction not valid for this game mode")]
    WrongGameMode,

    #[msg("Cannot end game with tie score")]
    TieRequiresRefund,

    // ─────────────────────────────
    // Betting validation
    // ─────────────────────────────
    #[msg("Betting closed")]
    RoundClosed,

    #[msg("Betting window expired")]
    BettingWindowExpired,

    #[msg("Betting paused")]
    BettingPaused,

    #[msg("Invalid side")]
    InvalidSide,

    #[msg("Bet below minimum")]
    BelowMinimum,

    #[msg("Invalid amount")]
    InvalidBetAmount,

    #[msg("Already bet")]
    AlreadyBet,

    #[msg("Repeat bet must back the same side")]
    SideMismatch,

    #[msg("Participant is banned")]
    Banned,

    LedgerFull,
    BanListFull,

    // ─────────────────────────────
    // Lottery draw
    // ─────────────────────────────
    #[msg("Not enough participants")]
    InsufficientParticipants,

    InsufficientPrizePool,
    SelectionExhausted,
    SlotHashesUnavailable,

    // ─────────────────────────────
    // Withdrawal
    // ─────────────────────────────
    #[msg("Nothing to withdraw")]
    NothingToWithdraw,

    #[msg("Withdrawals paused")]
    WithdrawPaused,
}
