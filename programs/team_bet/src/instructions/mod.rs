pub mod ban_list_update;
pub mod bet_place;
pub mod config_update;
pub mod game_refund;
pub mod game_settle;
pub mod game_start;
pub mod initialize;
pub mod lottery_resolve;
pub mod payout_withdraw;
pub mod round_view;
pub mod treasury_fund;
pub mod treasury_withdraw;

pub use ban_list_update::*;
pub use bet_place::*;
pub use config_update::*;
pub use game_refund::*;
pub use game_settle::*;
pub use game_start::*;
pub use initialize::*;
pub use lottery_resolve::*;
pub use payout_withdraw::*;
pub use round_view::*;
pub use treasury_fund::*;
pub use treasury_withdraw::*;
