#![allow(dead_code)]

use std::path::PathBuf;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tempfile::TempDir;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date")
}

pub fn money(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Writes `contents` to `account.json` inside a fresh temp dir. Keep the guard alive.
pub fn account_file(contents: &str) -> (TempDir, PathBuf) {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("account.json");
    std::fs::write(&path, contents).expect("write account file");
    (temp, path)
}
