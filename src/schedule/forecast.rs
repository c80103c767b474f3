use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{account::Account, frequency::add_months, transaction::Transaction};

/// A projected transaction with the event data and running balance needed to display it.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastLine {
    pub transaction: Transaction,
    pub description: String,
    pub amount: Decimal,
    /// Account balance after this transaction is applied.
    pub balance: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastTotals {
    pub generated: usize,
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
    pub closing_balance: Decimal,
}

impl ForecastTotals {
    fn from_lines(opening_balance: Decimal, lines: &[ForecastLine]) -> Self {
        let mut totals = ForecastTotals {
            generated: lines.len(),
            closing_balance: opening_balance,
            ..ForecastTotals::default()
        };
        for line in lines {
            if line.amount.is_sign_negative() {
                totals.expenses += line.amount.abs();
            } else {
                totals.income += line.amount;
            }
        }
        totals.net = totals.income - totals.expenses;
        if let Some(last) = lines.last() {
            totals.closing_balance = last.balance;
        }
        totals
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub until: NaiveDate,
    pub opening_balance: Decimal,
    pub lines: Vec<ForecastLine>,
    pub totals: ForecastTotals,
}

impl Forecast {
    pub fn build(account: &Account, until: NaiveDate) -> Self {
        let opening_balance = account.balance();
        let mut running = opening_balance;
        let lines: Vec<ForecastLine> = account
            .predict(until)
            .into_iter()
            .filter_map(|transaction| {
                let event = account.event(transaction.event_id)?;
                running += event.amount;
                Some(ForecastLine {
                    transaction,
                    description: event.description.clone(),
                    amount: event.amount,
                    balance: running,
                })
            })
            .collect();
        let totals = ForecastTotals::from_lines(opening_balance, &lines);
        Self {
            until,
            opening_balance,
            lines,
            totals,
        }
    }

    /// Lowest projected balance and the date it occurs, if any transactions were projected.
    pub fn low_point(&self) -> Option<(NaiveDate, Decimal)> {
        self.lines
            .iter()
            .min_by_key(|line| line.balance)
            .map(|line| (line.transaction.occurrence_date, line.balance))
    }
}

/// Horizon `months` calendar months after `today`, rolling over like a monthly step.
pub fn default_horizon(today: NaiveDate, months: u32) -> NaiveDate {
    add_months(today, months).unwrap_or(NaiveDate::MAX)
}
