pub mod account_manager;
pub mod time;
pub mod utils;

pub use account_manager::{AccountManager, Action};
pub use time::{Clock, FixedClock, SystemClock};
