use thiserror::Error;

use bankledger_core::DomainError;
use bankledger_infra::StorageError;

/// Facade-level error: domain rejections, storage failures and lifecycle misuse.
#[derive(Debug, Error)]
pub enum BankError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("bank is already initialized")]
    AlreadyInitialized,

    #[error("bank is not initialized; call initialize first")]
    NotInitialized,
}
