use std::{fmt, str::FromStr};

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How often an event repeats. Persisted as its integer code (`Once = 0` ... `Yearly = 5`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Frequency {
    #[default]
    Once,
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Yearly,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown frequency code {0}")]
pub struct UnknownFrequencyCode(pub u8);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown frequency `{0}` (expected once, daily, weekly, biweekly, monthly or yearly)")]
pub struct ParseFrequencyError(pub String);

impl Frequency {
    pub const ALL: [Frequency; 6] = [
        Frequency::Once,
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Biweekly,
        Frequency::Monthly,
        Frequency::Yearly,
    ];

    /// `Once` is the only frequency without a successor occurrence.
    pub fn repeats(self) -> bool {
        self != Frequency::Once
    }

    /// Returns the occurrence that follows `anchor`, or `None` when there is none.
    ///
    /// Month and year steps keep the day of month and normalize overflow into the following
    /// month, so `2024-01-31` is followed by `2024-03-02` and `2024-02-29` by `2025-03-01`.
    /// A step past the representable calendar also yields `None`.
    pub fn next_occurrence(self, anchor: NaiveDate) -> Option<NaiveDate> {
        match self {
            Frequency::Once => None,
            Frequency::Daily => anchor.checked_add_days(Days::new(1)),
            Frequency::Weekly => anchor.checked_add_days(Days::new(7)),
            Frequency::Biweekly => anchor.checked_add_days(Days::new(14)),
            Frequency::Monthly => add_months(anchor, 1),
            Frequency::Yearly => add_months(anchor, 12),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Frequency::Once => "Once",
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Biweekly => "Biweekly",
            Frequency::Monthly => "Monthly",
            Frequency::Yearly => "Yearly",
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Frequency::Once => 0,
            Frequency::Daily => 1,
            Frequency::Weekly => 2,
            Frequency::Biweekly => 3,
            Frequency::Monthly => 4,
            Frequency::Yearly => 5,
        }
    }
}

/// Adds calendar months to `date`, rolling a day past the end of the target month forward
/// (`2024-10-31` plus one month is `2024-12-01`).
pub(crate) fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    let index = i64::from(date.year()) * 12 + i64::from(date.month0()) + i64::from(months);
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month = u32::try_from(index.rem_euclid(12)).ok()? + 1;
    NaiveDate::from_ymd_opt(year, month, 1)?.checked_add_days(Days::new(u64::from(date.day0())))
}

impl From<Frequency> for u8 {
    fn from(frequency: Frequency) -> Self {
        frequency.code()
    }
}

impl TryFrom<u8> for Frequency {
    type Error = UnknownFrequencyCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Frequency::ALL
            .into_iter()
            .find(|frequency| frequency.code() == code)
            .ok_or(UnknownFrequencyCode(code))
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim();
        Frequency::ALL
            .into_iter()
            .find(|frequency| frequency.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseFrequencyError(value.to_string()))
    }
}
