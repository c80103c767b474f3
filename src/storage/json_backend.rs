use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{core::utils::ensure_dir, schedule::Account};

use super::{Result, StorageBackend};

const TMP_SUFFIX: &str = "tmp";

/// Reads and writes whole-account snapshots as JSON files.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStorage;

impl StorageBackend for JsonStorage {
    fn load(&self, path: &Path) -> Result<Account> {
        load_account_from_path(path)
    }

    fn save(&self, account: &Account, path: &Path) -> Result<()> {
        save_account_to_path(account, path)
    }
}

pub fn load_account_from_path(path: &Path) -> Result<Account> {
    let data = fs::read_to_string(path)?;
    let account: Account = serde_json::from_str(&data)?;
    tracing::info!(
        path = %path.display(),
        events = account.event_count(),
        "loaded account snapshot"
    );
    Ok(account)
}

/// Overwrites `path` with the full account, staging through a sibling temp file first.
pub fn save_account_to_path(account: &Account, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(account)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    tracing::info!(
        path = %path.display(),
        events = account.event_count(),
        "saved account snapshot"
    );
    Ok(())
}

/// Replaces `account` with the snapshot at `path`. On failure `account` is left untouched.
pub fn reload_account_from_path(account: &mut Account, path: &Path) -> Result<()> {
    *account = load_account_from_path(path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    file.sync_all()?;
    Ok(())
}
