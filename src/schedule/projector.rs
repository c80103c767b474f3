use std::iter::FusedIterator;

use chrono::NaiveDate;

use super::{
    event::{Event, EventId},
    frequency::Frequency,
    transaction::Transaction,
};

/// Iterator over the occurrences of one event before a horizon.
#[derive(Debug, Clone)]
pub struct Occurrences {
    event_id: EventId,
    frequency: Frequency,
    next: Option<NaiveDate>,
    until: NaiveDate,
}

impl Occurrences {
    pub(crate) fn new(event: &Event, until: NaiveDate) -> Self {
        Self {
            event_id: event.id(),
            frequency: event.frequency,
            next: Some(event.anchor_date),
            until,
        }
    }
}

impl Iterator for Occurrences {
    type Item = Transaction;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.filter(|date| *date < self.until)?;
        self.next = self.frequency.next_occurrence(current);
        Some(Transaction::new(current, self.event_id))
    }
}

impl FusedIterator for Occurrences {}

/// Expands `events` into a timeline of every occurrence before `until`, sorted by date.
///
/// The sort is stable, so transactions sharing a date keep the order of `events`.
pub fn predict<'a, I>(events: I, until: NaiveDate) -> Vec<Transaction>
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut transactions: Vec<Transaction> = events
        .into_iter()
        .flat_map(|event| event.occurrences(until))
        .collect();
    transactions.sort_by_key(|txn| txn.occurrence_date);
    tracing::debug!(count = transactions.len(), %until, "projected transactions");
    transactions
}
