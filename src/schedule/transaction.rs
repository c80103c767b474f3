use chrono::NaiveDate;

use super::event::{Event, EventId};

/// A projected occurrence of an event on a specific date.
///
/// Transactions only hold the handle of their source event. They are rebuilt on every
/// projection and go stale as soon as the account is mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transaction {
    pub occurrence_date: NaiveDate,
    pub event_id: EventId,
}

impl Transaction {
    pub fn new(occurrence_date: NaiveDate, event_id: EventId) -> Self {
        Self {
            occurrence_date,
            event_id,
        }
    }

    pub fn is_first_occurrence_of(&self, event: &Event) -> bool {
        self.occurrence_date == event.anchor_date
    }
}
