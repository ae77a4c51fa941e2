use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use bankledger_core::{DomainError, DomainResult, Iban};

use crate::account::Account;
use crate::money::Money;

/// Payload shared by every transaction kind (immutable once built).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDetails {
    iban: Iban,
    purpose: String,
    amount: Money,
    timestamp: DateTime<Utc>,
}

/// A booking against a single account.
///
/// The set of kinds is closed; `apply_to` and every other consumer match on it
/// exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Transaction {
    Deposit(TransactionDetails),
    Withdrawal(TransactionDetails),
}

impl TransactionDetails {
    fn new(
        iban: Iban,
        purpose: impl Into<String>,
        amount: Money,
        timestamp: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if !amount.is_positive() {
            return Err(DomainError::validation(format!(
                "transaction amount must be positive, got {amount}"
            )));
        }
        Ok(Self {
            iban,
            purpose: purpose.into(),
            amount,
            timestamp,
        })
    }
}

impl Transaction {
    pub fn deposit(iban: Iban, purpose: impl Into<String>, amount: Money) -> DomainResult<Self> {
        Self::deposit_at(iban, purpose, amount, Utc::now())
    }

    pub fn deposit_at(
        iban: Iban,
        purpose: impl Into<String>,
        amount: Money,
        timestamp: DateTime<Utc>,
    ) -> DomainResult<Self> {
        TransactionDetails::new(iban, purpose, amount, timestamp).map(Self::Deposit)
    }

    pub fn withdrawal(iban: Iban, purpose: impl Into<String>, amount: Money) -> DomainResult<Self> {
        Self::withdrawal_at(iban, purpose, amount, Utc::now())
    }

    pub fn withdrawal_at(
        iban: Iban,
        purpose: impl Into<String>,
        amount: Money,
        timestamp: DateTime<Utc>,
    ) -> DomainResult<Self> {
        TransactionDetails::new(iban, purpose, amount, timestamp).map(Self::Withdrawal)
    }

    pub fn details(&self) -> &TransactionDetails {
        match self {
            Transaction::Deposit(d) | Transaction::Withdrawal(d) => d,
        }
    }

    pub fn iban(&self) -> &Iban {
        &self.details().iban
    }

    pub fn purpose(&self) -> &str {
        &self.details().purpose
    }

    pub fn amount(&self) -> &Money {
        &self.details().amount
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.details().timestamp
    }

    /// Display marker: `+` for deposits, `-` for withdrawals.
    pub fn symbol(&self) -> &'static str {
        match self {
            Transaction::Deposit(_) => "+",
            Transaction::Withdrawal(_) => "-",
        }
    }

    /// Mutate the account balance according to the transaction kind.
    ///
    /// On error the balance is left untouched. Status and IBAN checks are the
    /// caller's job (see [`Account::make_transaction`]).
    pub(crate) fn apply_to(&self, account: &mut Account) -> DomainResult<()> {
        match self {
            Transaction::Deposit(d) => account.credit(&d.amount),
            Transaction::Withdrawal(d) => {
                if !account.is_amount_available(&d.amount)? {
                    return Err(DomainError::insufficient_funds(
                        account.iban(),
                        &d.amount,
                        account.available_funds()?,
                    ));
                }
                account.debit(&d.amount)
            }
        }
    }
}

impl core::fmt::Display for Transaction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}: ({}) {}, purpose: {}",
            self.timestamp().to_rfc3339_opts(SecondsFormat::Secs, true),
            self.symbol(),
            self.amount(),
            self.purpose()
        )
    }
}
