use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{app_data_dir, default_account_file, ensure_dir, settings_file_in},
    errors::ForecastError,
};

const TMP_SUFFIX: &str = "tmp";
const DEFAULT_HORIZON_MONTHS: u32 = 4;
const MAX_HORIZON_MONTHS: u32 = 120;

/// User settings stored next to the account snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_path: Option<PathBuf>,
    #[serde(default = "Settings::default_horizon_months")]
    pub horizon_months: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            account_path: None,
            horizon_months: DEFAULT_HORIZON_MONTHS,
        }
    }
}

impl Settings {
    fn default_horizon_months() -> u32 {
        DEFAULT_HORIZON_MONTHS
    }

    /// Account file to open: the explicit override, then the configured path, then the default.
    pub fn resolve_account_path(&self, explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.account_path.clone())
            .unwrap_or_else(default_account_file)
    }

    pub fn validate(&self) -> Result<(), ForecastError> {
        if self.horizon_months == 0 || self.horizon_months > MAX_HORIZON_MONTHS {
            return Err(ForecastError::Config(format!(
                "horizon_months must be between 1 and {MAX_HORIZON_MONTHS}, got {}",
                self.horizon_months
            )));
        }
        Ok(())
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        Self {
            path: settings_file_in(&base),
        }
    }

    /// Loads settings, falling back to defaults when the file does not exist.
    pub fn load(&self) -> Result<Settings, ForecastError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let settings: Settings = serde_json::from_str(&data)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self, settings: &Settings) -> Result<(), ForecastError> {
        settings.validate()?;
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        let tmp = self.path.with_extension(format!("json.{TMP_SUFFIX}"));
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
