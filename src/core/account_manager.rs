use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    core::time::Clock,
    errors::ForecastError,
    schedule::{default_horizon, Account, Event, EventId, Forecast, Transaction},
    storage::StorageBackend,
};

/// Commands a presentation layer can issue against the loaded account.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Mark the occurrence paid and apply its amount to the balance.
    Complete(Transaction),
    /// Drop the occurrence without touching the balance.
    Delete(Transaction),
    ShiftDate {
        transaction: Transaction,
        days: i64,
    },
    /// Pay the occurrence today.
    PullForward(Transaction),
    AddEvent(Event),
    UpdateEvent {
        id: EventId,
        event: Event,
    },
    SetBalance(Decimal),
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Action::Complete(_) => "complete",
            Action::Delete(_) => "delete",
            Action::ShiftDate { .. } => "shift_date",
            Action::PullForward(_) => "pull_forward",
            Action::AddEvent(_) => "add_event",
            Action::UpdateEvent { .. } => "update_event",
            Action::SetBalance(_) => "set_balance",
        }
    }
}

/// Facade that owns the account, the file it came from and the unsaved-changes flag.
pub struct AccountManager {
    account: Account,
    path: PathBuf,
    dirty: bool,
    storage: Box<dyn StorageBackend>,
    clock: Box<dyn Clock>,
}

impl AccountManager {
    pub fn open(
        path: impl Into<PathBuf>,
        storage: Box<dyn StorageBackend>,
        clock: Box<dyn Clock>,
    ) -> Result<Self, ForecastError> {
        let path = path.into();
        let account = storage.load(&path)?;
        Ok(Self::with_account(account, path, storage, clock))
    }

    /// Wraps an in-memory account that has not been written to `path` yet.
    pub fn with_account(
        account: Account,
        path: impl Into<PathBuf>,
        storage: Box<dyn StorageBackend>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            account,
            path: path.into(),
            dirty: false,
            storage,
            clock,
        }
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn horizon(&self, months: u32) -> NaiveDate {
        default_horizon(self.today(), months)
    }

    pub fn predict(&self, until: NaiveDate) -> Vec<Transaction> {
        self.account.predict(until)
    }

    pub fn forecast(&self, until: NaiveDate) -> Forecast {
        self.account.forecast(until)
    }

    /// Applies `action`, returning whether the account changed.
    ///
    /// Actions on stale or non-first occurrences return `Ok(false)`.
    pub fn apply(&mut self, action: Action) -> Result<bool, ForecastError> {
        let name = action.name();
        let changed = match action {
            Action::Complete(txn) => self.account.resolve(&txn, true),
            Action::Delete(txn) => self.account.resolve(&txn, false),
            Action::ShiftDate { transaction, days } => {
                self.account.shift_date(&transaction, days)
            }
            Action::PullForward(txn) => {
                let today = self.clock.today();
                self.account.pull_forward(&txn, today)
            }
            Action::AddEvent(event) => {
                let id = self.account.add_event(event);
                tracing::debug!(event = %id, "event added");
                true
            }
            Action::UpdateEvent { id, event } => {
                self.account.update_event(id, event)?;
                true
            }
            Action::SetBalance(value) => {
                self.account.set_balance(value);
                true
            }
        };
        if changed {
            self.dirty = true;
            tracing::info!(action = name, balance = %self.account.balance(), "applied action");
        } else {
            tracing::debug!(action = name, "action had no effect");
        }
        Ok(changed)
    }

    pub fn save(&mut self) -> Result<(), ForecastError> {
        self.storage.save(&self.account, &self.path)?;
        self.dirty = false;
        Ok(())
    }

    /// Re-reads the snapshot, discarding unsaved changes. A failed read keeps the current state.
    pub fn reload(&mut self) -> Result<(), ForecastError> {
        if self.dirty {
            tracing::warn!(path = %self.path.display(), "reload discards unsaved changes");
        }
        self.storage.reload(&mut self.account, &self.path)?;
        self.dirty = false;
        Ok(())
    }
}
