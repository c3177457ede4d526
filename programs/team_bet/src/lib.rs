use anchor_lang::prelude::*;

// -----------------------------------------------------------------------------
// Program ID
// -----------------------------------------------------------------------------
declare_id!("3zfpTDQYP6RqEe76UACsf5TSVCa4sTg8LaSQZor793Zj");

// -----------------------------------------------------------------------------
// Modules
// -----------------------------------------------------------------------------
pub mod state;
pub mod instructions;
pub mod utils;
pub mod errors;
pub mod events;
pub mod constants;

#[cfg(test)]
mod test_utils;

use instructions::*;
use state::{BetRecord, GameMode};

// -----------------------------------------------------------------------------
// Program Entrypoints
// -----------------------------------------------------------------------------
#[program]
pub mod team_bet {
    use super::*;

    // -------------------------------------------------------------------------
    // initialize
    // -------------------------------------------------------------------------
    pub fn initialize(ctx: Context<Initialize>, args: InitializeArgs) -> Result<()> {
        initialize_handler(ctx, args)
    }

    // -------------------------------------------------------------------------
    // update_config
    // -------------------------------------------------------------------------
    pub fn update_config(ctx: Context<UpdateConfig>, args: UpdateConfigArgs) -> Result<()> {
        update_config_handler(ctx, args)
    }

    // -------------------------------------------------------------------------
    // emergency_pause_all
    // -------------------------------------------------------------------------
    pub fn emergency_pause_all(ctx: Context<UpdateConfig>) -> Result<()> {
        update_config_handler(ctx, UpdateConfigArgs::pause_all())
    }

    pub fn update_ban_list(
        ctx: Context<UpdateBanList>,
        add: Vec<Pubkey>,
        remove: Vec<Pubkey>,
    ) -> Result<()> {
        update_ban_list_handler(ctx, add, remove)
    }

    // =====================================================================
    // TREASURY
    // =====================================================================

    pub fn fund_treasury(ctx: Context<FundTreasury>, amount: u64) -> Result<()> {
        fund_treasury_handler(ctx, amount)
    }

    pub fn withdraw_house_funds(ctx: Context<WithdrawHouseFunds>, amount: u64) -> Result<()> {
        withdraw_house_funds_handler(ctx, amount)
    }

    // =====================================================================
    // ROUND LIFECYCLE
    // =====================================================================

    pub fn start_game(ctx: Context<StartGame>, mode: GameMode, pot_lamports: u64) -> Result<()> {
        start_game_handler(ctx, mode, pot_lamports)
    }

    pub fn place_bet(ctx: Context<PlaceBet>, side_code: u8, amount: u64) -> Result<()> {
        place_bet_handler(ctx, side_code, amount)
    }

    pub fn settle_game(ctx: Context<SettleGame>) -> Result<()> {
        settle_game_handler(ctx)
    }

    pub fn force_refund(ctx: Context<ForceRefund>) -> Result<()> {
        force_refund_handler(ctx)
    }

    pub fn resolve_lottery(ctx: Context<ResolveLottery>) -> Result<()> {
        resolve_lottery_handler(ctx)
    }

    pub fn withdraw(ctx: Context<Withdraw>) -> Result<()> {
        withdraw_handler(ctx)
    }

    // =====================================================================
    // READ-ONLY QUERIES (return data)
    // =====================================================================

    pub fn round_status(ctx: Context<ViewRound>) -> Result<RoundStatusView> {
        round_status_handler(ctx)
    }

    pub fn participant_bet(ctx: Context<ViewRound>, participant: Pubkey) -> Result<Option<BetRecord>> {
        participant_bet_handler(ctx, participant)
    }

    pub fn preview_points(ctx: Context<ViewRound>, amount: u64) -> Result<u64> {
        preview_points_handler(ctx, amount)
    }
}
