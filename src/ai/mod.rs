pub mod selector;

pub use selector::{NetGainSelector, select_move};
