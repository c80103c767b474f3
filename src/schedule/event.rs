use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{frequency::Frequency, projector::Occurrences};

/// Session-scoped handle for an event inside an [`Account`](super::Account).
///
/// Handles are not persisted; every load assigns fresh ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(Uuid);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A one-off or recurring income/expense.
///
/// `anchor_date` is the date of the next pending occurrence. It moves forward as occurrences
/// are resolved and is never the original creation date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(skip, default)]
    id: EventId,
    #[serde(rename = "Date", with = "crate::storage::date_format")]
    pub anchor_date: NaiveDate,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Amount", with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "Frequency")]
    pub frequency: Frequency,
}

impl Event {
    pub fn new(
        anchor_date: NaiveDate,
        description: impl Into<String>,
        amount: Decimal,
        frequency: Frequency,
    ) -> Self {
        Self {
            id: EventId::new(),
            anchor_date,
            description: description.into(),
            amount,
            frequency,
        }
    }

    pub fn once(anchor_date: NaiveDate, description: impl Into<String>, amount: Decimal) -> Self {
        Self::new(anchor_date, description, amount, Frequency::Once)
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: EventId) {
        self.id = id;
    }

    pub fn repeats(&self) -> bool {
        self.frequency.repeats()
    }

    /// Occurrences of this event strictly before `until`, starting at the anchor.
    pub fn occurrences(&self, until: NaiveDate) -> Occurrences {
        Occurrences::new(self, until)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_events_get_distinct_ids() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let a = Event::once(date, "Rent", Decimal::new(-1000, 0));
        let b = Event::once(date, "Rent", Decimal::new(-1000, 0));
        assert_ne!(a.id(), b.id());
        assert_ne!(a, b);
    }

    #[test]
    fn serializes_with_snapshot_field_names() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
        let event = Event::new(date, "Gym", Decimal::new(-3500, 2), Frequency::Monthly);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["Date"], "2024-02-15");
        assert_eq!(json["Description"], "Gym");
        assert_eq!(json["Amount"], -35.0);
        assert_eq!(json["Frequency"], 4);
        assert!(json.get("id").is_none());
    }
}
