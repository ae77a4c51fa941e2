//! `bankledger-bank`: the bank facade over the ledger and its repositories.
//!
//! Construct a [`Bank`] once at process start (either directly with
//! [`Bank::open`] or through the process-wide [`instance`]) and pass it to
//! every consumer.

pub mod bank;
pub mod config;
pub mod demo;
pub mod error;
pub mod instance;

pub use bank::{AccountStorage, Bank, CustomerStorage};
pub use config::BankConfig;
pub use error::BankError;
