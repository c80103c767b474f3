use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    event::{Event, EventId},
    forecast::Forecast,
    projector::predict,
    transaction::Transaction,
};
use crate::errors::ForecastError;

/// The balance plus the schedule of events that will change it.
///
/// Scheduling actions take a [`Transaction`] from the latest projection. When the transaction
/// is no longer the first pending occurrence of a repeating event, or its event is gone, the
/// action does nothing and returns `false`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "Balance", with = "rust_decimal::serde::float")]
    balance: Decimal,
    #[serde(
        rename = "Events",
        default,
        deserialize_with = "crate::storage::null_as_empty"
    )]
    events: Vec<Event>,
}

impl Account {
    pub fn new(balance: Decimal) -> Self {
        Self {
            balance,
            events: Vec::new(),
        }
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|event| event.id() == id)
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    pub fn predict(&self, until: NaiveDate) -> Vec<Transaction> {
        predict(&self.events, until)
    }

    pub fn forecast(&self, until: NaiveDate) -> Forecast {
        Forecast::build(self, until)
    }

    /// Adds an event and returns the handle it is stored under.
    pub fn add_event(&mut self, mut event: Event) -> EventId {
        let id = EventId::new();
        event.assign_id(id);
        self.events.push(event);
        id
    }

    pub fn set_balance(&mut self, value: Decimal) {
        self.balance = value;
    }

    /// Replaces the fields of an existing event, keeping its handle.
    pub fn update_event(
        &mut self,
        id: EventId,
        mut replacement: Event,
    ) -> Result<(), ForecastError> {
        let event = self
            .events
            .iter_mut()
            .find(|event| event.id() == id)
            .ok_or(ForecastError::EventNotFound(id))?;
        replacement.assign_id(id);
        *event = replacement;
        Ok(())
    }

    /// Completes (`apply_balance = true`) or deletes (`false`) a pending occurrence.
    ///
    /// One-off events are removed; repeating events advance to their next occurrence.
    pub fn resolve(&mut self, transaction: &Transaction, apply_balance: bool) -> bool {
        let Some(index) = self.guarded_index(transaction) else {
            return false;
        };
        if apply_balance {
            self.balance += self.events[index].amount;
        }
        self.advance_or_remove(index);
        true
    }

    /// Moves a one-off event by `delta_days`. Repeating events never move this way.
    pub fn shift_date(&mut self, transaction: &Transaction, delta_days: i64) -> bool {
        let Some(event) = self
            .events
            .iter_mut()
            .find(|event| event.id() == transaction.event_id)
        else {
            tracing::debug!(event = %transaction.event_id, "shift ignored: unknown event");
            return false;
        };
        if event.repeats() {
            tracing::debug!(event = %event.id(), "shift ignored: repeating event");
            return false;
        }
        let shifted = Duration::try_days(delta_days)
            .and_then(|delta| event.anchor_date.checked_add_signed(delta));
        match shifted {
            Some(date) => {
                event.anchor_date = date;
                true
            }
            None => false,
        }
    }

    /// Pays an occurrence on `today`.
    ///
    /// A one-off event is simply re-dated. For a repeating event a one-off copy dated `today`
    /// is split off and the series advances from its own anchor, keeping its cadence.
    pub fn pull_forward(&mut self, transaction: &Transaction, today: NaiveDate) -> bool {
        let Some(index) = self.guarded_index(transaction) else {
            return false;
        };
        let event = &mut self.events[index];
        if !event.repeats() {
            event.anchor_date = today;
            return true;
        }
        let split = Event::once(today, event.description.clone(), event.amount);
        self.add_event(split);
        self.advance_or_remove(index);
        true
    }

    /// Index of the transaction's event when the first-occurrence rule allows mutating it.
    fn guarded_index(&self, transaction: &Transaction) -> Option<usize> {
        let Some(index) = self
            .events
            .iter()
            .position(|event| event.id() == transaction.event_id)
        else {
            tracing::debug!(event = %transaction.event_id, "action ignored: unknown event");
            return None;
        };
        let event = &self.events[index];
        if event.repeats() && !transaction.is_first_occurrence_of(event) {
            tracing::debug!(
                event = %event.id(),
                occurrence = %transaction.occurrence_date,
                anchor = %event.anchor_date,
                "action ignored: not the first pending occurrence"
            );
            return None;
        }
        Some(index)
    }

    fn advance_or_remove(&mut self, index: usize) {
        let event = &mut self.events[index];
        match event.frequency.next_occurrence(event.anchor_date) {
            Some(next) => event.anchor_date = next,
            None => {
                if event.repeats() {
                    tracing::warn!(event = %event.id(), "recurrence has no successor, removing");
                }
                self.events.remove(index);
            }
        }
    }
}
