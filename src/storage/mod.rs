pub mod date_format;
pub mod json_backend;

use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::{errors::ForecastError, schedule::Account};

pub type Result<T> = std::result::Result<T, ForecastError>;

/// Abstraction over persistence backends that hold one account snapshot per file.
pub trait StorageBackend: Send + Sync {
    fn load(&self, path: &Path) -> Result<Account>;
    fn save(&self, account: &Account, path: &Path) -> Result<()>;

    /// Loads `path` into `account`, leaving it untouched if the load fails.
    fn reload(&self, account: &mut Account, path: &Path) -> Result<()> {
        *account = self.load(path)?;
        Ok(())
    }
}

pub use json_backend::{
    load_account_from_path as load, reload_account_from_path as reload,
    save_account_to_path as save, JsonStorage,
};

/// Treats an explicit `null` list as empty; older snapshots store an empty event list that way.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn parses_snapshot_shape() {
        let json = r#"{
            "Balance": 1523.75,
            "Events": [
                {"Date": "2024-01-01T00:00:00-05:00", "Description": "Rent", "Amount": -1200, "Frequency": 4},
                {"Date": "2024-02-10", "Description": "Tax refund", "Amount": 310.5, "Frequency": 0}
            ]
        }"#;
        let account: Account = serde_json::from_str(json).expect("parse snapshot");
        assert_eq!(account.balance(), Decimal::new(152375, 2));
        assert_eq!(account.event_count(), 2);
        assert_eq!(account.events()[0].amount, Decimal::new(-1200, 0));
        assert_eq!(account.events()[1].amount, Decimal::new(3105, 1));
        assert_ne!(account.events()[0].id(), account.events()[1].id());
    }

    #[test]
    fn null_events_load_as_empty() {
        let account: Account =
            serde_json::from_str(r#"{"Balance": 0, "Events": null}"#).expect("parse snapshot");
        assert_eq!(account.event_count(), 0);
        let account: Account = serde_json::from_str(r#"{"Balance": 0}"#).expect("parse snapshot");
        assert_eq!(account.event_count(), 0);
    }

    #[test]
    fn rejects_unknown_frequency_code() {
        let json = r#"{"Balance": 0, "Events": [
            {"Date": "2024-01-01", "Description": "x", "Amount": 1, "Frequency": 7}
        ]}"#;
        assert!(serde_json::from_str::<Account>(json).is_err());
    }
}
