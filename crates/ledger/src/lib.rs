//! Retail ledger domain (money, accounts, customers, transactions).
//!
//! Pure domain logic only: no IO, no persistence concerns.

pub mod account;
pub mod customer;
pub mod money;
pub mod transaction;

pub use account::{Account, AccountKind, AccountStatus};
pub use customer::Customer;
pub use money::{Currency, Money};
pub use transaction::{Transaction, TransactionDetails};
