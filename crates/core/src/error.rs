//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, rejected transactions). Infrastructure concerns belong elsewhere.
///
/// Values are carried in their display form so the error stays independent of
/// the ledger types that raise it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Arithmetic or comparison between amounts of different currencies.
    #[error("currency mismatch: expected {expected}, found {found}")]
    CurrencyMismatch { expected: String, found: String },

    /// A withdrawal exceeds the funds available on the account.
    #[error("insufficient funds on {iban}: requested {requested}, available {available}")]
    InsufficientFunds {
        iban: String,
        requested: String,
        available: String,
    },

    /// A transaction was applied to an account other than the one it targets.
    #[error("transaction for {transaction} cannot be applied to account {account}")]
    AccountMismatch { account: String, transaction: String },

    /// Transactions are rejected while an account is not active.
    #[error("account {0} is inactive")]
    InactiveAccount(String),

    /// A lookup by identifier found nothing.
    #[error("not found: {0}")]
    NotFound(String),

    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn currency_mismatch(expected: impl ToString, found: impl ToString) -> Self {
        Self::CurrencyMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub fn insufficient_funds(
        iban: impl ToString,
        requested: impl ToString,
        available: impl ToString,
    ) -> Self {
        Self::InsufficientFunds {
            iban: iban.to_string(),
            requested: requested.to_string(),
            available: available.to_string(),
        }
    }

    pub fn account_mismatch(account: impl ToString, transaction: impl ToString) -> Self {
        Self::AccountMismatch {
            account: account.to_string(),
            transaction: transaction.to_string(),
        }
    }

    pub fn inactive_account(iban: impl ToString) -> Self {
        Self::InactiveAccount(iban.to_string())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether the caller can reasonably recover (re-prompt, pick another account).
    ///
    /// Currency mismatches point at a programming error and are not recoverable.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::CurrencyMismatch { .. })
    }
}
