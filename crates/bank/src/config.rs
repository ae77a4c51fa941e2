//! Bank configuration (identity + storage location).

use std::path::{Path, PathBuf};

pub const DEFAULT_NAME: &str = "Signal Iduna Bank";
pub const DEFAULT_CITY: &str = "Hamburg";
pub const DEFAULT_BIC: &str = "SIBAHH26";
pub const DEFAULT_DATA_DIR: &str = "data";

const ACCOUNTS_FILE: &str = "accounts.json";
const CUSTOMERS_FILE: &str = "customers.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankConfig {
    pub name: String,
    pub city: String,
    pub bic: String,
    /// Directory holding one storage file per entity kind.
    pub data_dir: PathBuf,
}

impl BankConfig {
    pub fn new(name: impl Into<String>, city: impl Into<String>, bic: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            city: city.into(),
            bic: bic.into(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Read `BANK_NAME`, `BANK_CITY`, `BANK_BIC` and `BANK_DATA_DIR`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; missing or blank values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str, default: &str, warn: bool| {
            match lookup(key).filter(|v| !v.trim().is_empty()) {
                Some(v) => v.trim().to_string(),
                None => {
                    if warn {
                        tracing::warn!(key, default, "{key} not set; using default");
                    }
                    default.to_string()
                }
            }
        };

        Self {
            name: value("BANK_NAME", DEFAULT_NAME, true),
            city: value("BANK_CITY", DEFAULT_CITY, true),
            bic: value("BANK_BIC", DEFAULT_BIC, true),
            data_dir: PathBuf::from(value("BANK_DATA_DIR", DEFAULT_DATA_DIR, false)),
        }
    }

    /// `BANK_DATA_DIR`, or the default when unset.
    pub fn data_dir_from_env() -> PathBuf {
        std::env::var("BANK_DATA_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(|v| PathBuf::from(v.trim()))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn accounts_path(&self) -> PathBuf {
        self.data_dir.join(ACCOUNTS_FILE)
    }

    pub fn customers_path(&self) -> PathBuf {
        self.data_dir.join(CUSTOMERS_FILE)
    }
}

impl Default for BankConfig {
    fn default() -> Self {
        Self::new(DEFAULT_NAME, DEFAULT_CITY, DEFAULT_BIC)
    }
}
