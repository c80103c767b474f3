#![doc(test(attr(deny(warnings))))]

//! Forecash Core projects an account balance from one-off and recurring events and applies
//! the schedule changes a user makes while paying them.

pub mod config;
pub mod core;
pub mod errors;
pub mod schedule;
pub mod storage;
pub mod utils;

pub use errors::ForecastError;
pub use schedule::{predict, Account, Event, EventId, Forecast, Frequency, Transaction};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Forecash tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
