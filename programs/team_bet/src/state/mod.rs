pub mod banned_list;
pub mod bet_record;
pub mod config;
pub mod round;
pub mod treasury;

pub use banned_list::*;
pub use bet_record::*;
pub use config::*;
pub use round::*;
pub use treasury::*;
