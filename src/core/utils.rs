use dirs::home_dir;
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

const HOME_ENV: &str = "FORECASH_HOME";
const CONFIG_DIR: &str = ".config";
const APP_DIR_NAME: &str = "forecash";
const ACCOUNT_FILE: &str = "account.json";
const SETTINGS_FILE: &str = "settings.json";

/// Returns the application directory, defaulting to `~/.config/forecash`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join(APP_DIR_NAME)
}

/// Account snapshot used when neither the command line nor the settings name one.
pub fn default_account_file() -> PathBuf {
    account_file_in(&app_data_dir())
}

pub fn account_file_in(base: &Path) -> PathBuf {
    base.join(ACCOUNT_FILE)
}

pub fn settings_file_in(base: &Path) -> PathBuf {
    base.join(SETTINGS_FILE)
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if path.as_os_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(path)
}
