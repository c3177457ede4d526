pub mod betting;
pub mod entropy;
pub mod points;
pub mod selection;
pub mod settlement;
pub mod transfers;

pub use points::*;
pub use selection::*;
pub use settlement::*;
