use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::currency::RateTable;
use crate::domain::Currency;
use crate::errors::SubscriptionError;
use crate::utils::ensure_dir;

const TMP_SUFFIX: &str = "tmp";
const DEFAULT_UPCOMING_WINDOW_DAYS: i64 = 30;

/// Site-wide settings the hosting application loads at startup and injects
/// into report computations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub default_currency: Currency,
    #[serde(default)]
    pub rates: RateTable,
    pub upcoming_window_days: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_currency: Currency::Cny,
            rates: RateTable::default(),
            upcoming_window_days: DEFAULT_UPCOMING_WINDOW_DAYS,
        }
    }
}

/// Loads and saves `Settings` at a fixed JSON file path.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store at the platform default location.
    pub fn new() -> Result<Self, SubscriptionError> {
        let path = crate::utils::default_config_path().ok_or_else(|| {
            SubscriptionError::Config("no platform configuration directory available".into())
        })?;
        Ok(Self { path })
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<Settings, SubscriptionError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            tracing::debug!(path = %self.path.display(), "settings file missing, using defaults");
            Ok(Settings::default())
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<(), SubscriptionError> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
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

fn write_atomic(path: &Path, data: &str) -> Result<(), SubscriptionError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
