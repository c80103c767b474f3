//! Forecast engine: recurrence rule, events, projection and the account action rules.

pub mod account;
pub mod event;
pub mod forecast;
pub mod frequency;
pub mod projector;
pub mod transaction;

pub use account::Account;
pub use event::{Event, EventId};
pub use forecast::{default_horizon, Forecast, ForecastLine, ForecastTotals};
pub use frequency::{Frequency, ParseFrequencyError, UnknownFrequencyCode};
pub use projector::{predict, Occurrences};
pub use transaction::Transaction;
