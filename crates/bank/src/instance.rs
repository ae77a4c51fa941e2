//! Process-wide bank instance with an explicit init-once lifecycle.
//!
//! Prefer constructing a [`Bank`] with [`Bank::open`] and passing it around.
//! This module exists for callers that need a single shared handle: call
//! [`initialize`] exactly once at startup, then [`get_instance`] anywhere.

use std::sync::{Mutex, OnceLock};

use crate::bank::Bank;
use crate::config::BankConfig;
use crate::error::BankError;

static INSTANCE: OnceLock<Mutex<Bank>> = OnceLock::new();

/// Create the instance with the given identity; storage location comes from
/// `BANK_DATA_DIR` (see [`BankConfig::data_dir_from_env`]).
pub fn initialize(name: &str, city: &str, bic: &str) -> Result<&'static Mutex<Bank>, BankError> {
    let config = BankConfig::new(name, city, bic).with_data_dir(BankConfig::data_dir_from_env());
    initialize_with(&config)
}

/// Create the instance from a full configuration.
///
/// Fails with [`BankError::AlreadyInitialized`] on a second call, and with the
/// load error if stored state cannot be read.
pub fn initialize_with(config: &BankConfig) -> Result<&'static Mutex<Bank>, BankError> {
    if INSTANCE.get().is_some() {
        return Err(BankError::AlreadyInitialized);
    }

    let bank = Bank::open_with_files(config)?;
    INSTANCE
        .set(Mutex::new(bank))
        .map_err(|_| BankError::AlreadyInitialized)?;
    get_instance()
}

/// The instance created by [`initialize`].
pub fn get_instance() -> Result<&'static Mutex<Bank>, BankError> {
    INSTANCE.get().ok_or(BankError::NotInitialized)
}
