use core::cmp::Ordering;

use serde::{Deserialize, Serialize};

use bankledger_core::{CustomerId, DomainError, DomainResult, Entity, Iban};

use crate::money::{Currency, Money};
use crate::transaction::Transaction;

/// Account status lifecycle. No transaction executes while inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Inactive,
}

impl core::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AccountStatus::Active => f.write_str("active"),
            AccountStatus::Inactive => f.write_str("inactive"),
        }
    }
}

/// Variant-specific account terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AccountKind {
    /// Current account with an overdraft limit.
    Current {
        debit_interest_rate: f32,
        limit: Money,
    },
    /// Savings account; withdrawals are capped at the balance.
    Savings { credit_interest_rate: f32 },
}

impl AccountKind {
    pub fn name(&self) -> &'static str {
        match self {
            AccountKind::Current { .. } => "current",
            AccountKind::Savings { .. } => "savings",
        }
    }
}

/// A customer account holding a balance and its booking history.
///
/// The balance currency is fixed at creation (EUR). The balance only changes
/// through [`Account::make_transaction`], and the history only ever grows by
/// transactions that were applied successfully.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAccount")]
pub struct Account {
    iban: Iban,
    /// Non-owning reference; the customer lives in its own repository.
    owner: CustomerId,
    balance: Money,
    status: AccountStatus,
    kind: AccountKind,
    transactions: Vec<Transaction>,
}

#[derive(Deserialize)]
struct RawAccount {
    iban: Iban,
    owner: CustomerId,
    balance: Money,
    status: AccountStatus,
    kind: AccountKind,
    transactions: Vec<Transaction>,
}

impl TryFrom<RawAccount> for Account {
    type Error = DomainError;

    /// Stored accounts must satisfy the same invariants as live ones.
    fn try_from(raw: RawAccount) -> DomainResult<Self> {
        raw.balance.require_currency(&Currency::eur())?;
        if let AccountKind::Current { limit, .. } = &raw.kind {
            limit.require_currency(raw.balance.currency())?;
            if limit.is_negative() {
                return Err(DomainError::validation(format!(
                    "account {}: overdraft limit must not be negative, got {limit}",
                    raw.iban
                )));
            }
        }
        for transaction in &raw.transactions {
            if transaction.iban() != &raw.iban {
                return Err(DomainError::account_mismatch(&raw.iban, transaction.iban()));
            }
            transaction.amount().require_currency(raw.balance.currency())?;
        }

        Ok(Self {
            iban: raw.iban,
            owner: raw.owner,
            balance: raw.balance,
            status: raw.status,
            kind: raw.kind,
            transactions: raw.transactions,
        })
    }
}

impl Account {
    fn new(iban: Iban, owner: CustomerId, kind: AccountKind) -> Self {
        Self {
            iban,
            owner,
            balance: Money::zero_euro(),
            status: AccountStatus::Active,
            kind,
            transactions: Vec::new(),
        }
    }

    /// New current account with a zero balance and no overdraft.
    pub fn current(iban: Iban, owner: CustomerId) -> Self {
        Self::new(
            iban,
            owner,
            AccountKind::Current {
                debit_interest_rate: 0.0,
                limit: Money::zero_euro(),
            },
        )
    }

    pub fn savings(iban: Iban, owner: CustomerId) -> Self {
        Self::new(
            iban,
            owner,
            AccountKind::Savings {
                credit_interest_rate: 0.0,
            },
        )
    }

    pub fn iban(&self) -> &Iban {
        &self.iban
    }

    pub fn owner(&self) -> CustomerId {
        self.owner
    }

    pub fn set_owner(&mut self, owner: CustomerId) {
        self.owner = owner;
    }

    pub fn balance(&self) -> &Money {
        &self.balance
    }

    pub fn status(&self) -> AccountStatus {
        self.status
    }

    pub fn set_status(&mut self, status: AccountStatus) {
        self.status = status;
    }

    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    pub fn kind(&self) -> &AccountKind {
        &self.kind
    }

    /// Read-only view of the applied transactions, in application order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Overdraft limit; `None` for savings accounts.
    pub fn limit(&self) -> Option<&Money> {
        match &self.kind {
            AccountKind::Current { limit, .. } => Some(limit),
            AccountKind::Savings { .. } => None,
        }
    }

    pub fn set_limit(&mut self, new_limit: Money) -> DomainResult<()> {
        new_limit.require_currency(self.balance.currency())?;
        if new_limit.is_negative() {
            return Err(DomainError::validation(format!(
                "overdraft limit must not be negative, got {new_limit}"
            )));
        }
        match &mut self.kind {
            AccountKind::Current { limit, .. } => {
                *limit = new_limit;
                Ok(())
            }
            AccountKind::Savings { .. } => Err(DomainError::validation(format!(
                "savings account {} has no overdraft limit",
                self.iban
            ))),
        }
    }

    /// Debit rate for current accounts, credit rate for savings accounts.
    pub fn interest_rate(&self) -> f32 {
        match self.kind {
            AccountKind::Current {
                debit_interest_rate,
                ..
            } => debit_interest_rate,
            AccountKind::Savings {
                credit_interest_rate,
            } => credit_interest_rate,
        }
    }

    pub fn set_debit_interest_rate(&mut self, rate: f32) -> DomainResult<()> {
        validate_rate(rate)?;
        match &mut self.kind {
            AccountKind::Current {
                debit_interest_rate,
                ..
            } => {
                *debit_interest_rate = rate;
                Ok(())
            }
            AccountKind::Savings { .. } => Err(DomainError::validation(format!(
                "savings account {} has no debit interest rate",
                self.iban
            ))),
        }
    }

    pub fn set_credit_interest_rate(&mut self, rate: f32) -> DomainResult<()> {
        validate_rate(rate)?;
        match &mut self.kind {
            AccountKind::Savings {
                credit_interest_rate,
            } => {
                *credit_interest_rate = rate;
                Ok(())
            }
            AccountKind::Current { .. } => Err(DomainError::validation(format!(
                "current account {} has no credit interest rate",
                self.iban
            ))),
        }
    }

    /// Funds a withdrawal may draw on: the balance, plus the overdraft limit
    /// for current accounts.
    pub fn available_funds(&self) -> DomainResult<Money> {
        match &self.kind {
            AccountKind::Current { limit, .. } => self.balance.add(limit),
            AccountKind::Savings { .. } => Ok(self.balance.clone()),
        }
    }

    pub fn is_amount_available(&self, amount: &Money) -> DomainResult<bool> {
        let available = self.available_funds()?;
        Ok(amount.try_cmp(&available)? != Ordering::Greater)
    }

    /// Apply a transaction and record it in the history.
    ///
    /// Fails without touching balance or history if the account is inactive,
    /// the transaction targets another IBAN, funds are insufficient or the
    /// currency differs from the balance currency.
    pub fn make_transaction(&mut self, transaction: Transaction) -> DomainResult<()> {
        if !self.is_active() {
            return Err(DomainError::inactive_account(&self.iban));
        }
        if transaction.iban() != &self.iban {
            return Err(DomainError::account_mismatch(&self.iban, transaction.iban()));
        }

        transaction.apply_to(self)?;
        self.transactions.push(transaction);
        Ok(())
    }

    pub(crate) fn credit(&mut self, amount: &Money) -> DomainResult<()> {
        self.balance = self.balance.add(amount)?;
        Ok(())
    }

    pub(crate) fn debit(&mut self, amount: &Money) -> DomainResult<()> {
        self.balance = self.balance.subtract(amount)?;
        Ok(())
    }
}

fn validate_rate(rate: f32) -> DomainResult<()> {
    if !rate.is_finite() || rate < 0.0 {
        return Err(DomainError::validation(format!(
            "interest rate must be a non-negative number, got {rate}"
        )));
    }
    Ok(())
}

impl Entity for Account {
    type Id = Iban;

    fn id(&self) -> &Self::Id {
        &self.iban
    }
}

impl core::fmt::Display for Account {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "[{}] balance: {}", self.iban, self.balance)?;
        match &self.kind {
            AccountKind::Current {
                debit_interest_rate,
                limit,
            } => write!(f, ", overdraft: {limit}, debit rate: {debit_interest_rate:.2}%")?,
            AccountKind::Savings {
                credit_interest_rate,
            } => write!(f, ", credit rate: {credit_interest_rate:.2}%")?,
        }
        write!(f, ", owner: {} ({})", self.owner, self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn iban() -> Iban {
        Iban::new("DE231234").unwrap()
    }

    fn deposit(amount: Decimal) -> Transaction {
        Transaction::deposit(iban(), "Deposit", Money::euro(amount)).unwrap()
    }

    fn withdrawal(amount: Decimal) -> Transaction {
        Transaction::withdrawal(iban(), "Withdrawal", Money::euro(amount)).unwrap()
    }

    #[test]
    fn new_accounts_start_active_with_zero_euro() {
        let account = Account::savings(iban(), CustomerId::new());
        assert_eq!(account.balance(), &Money::zero_euro());
        assert!(account.is_active());
        assert!(account.transactions().is_empty());
        assert_eq!(account.limit(), None);
    }

    #[test]
    fn overdraft_scenario() {
        let mut account = Account::current(iban(), CustomerId::new());
        account.set_limit(Money::euro(dec!(500.00))).unwrap();

        account.make_transaction(deposit(dec!(2500.00))).unwrap();
        assert_eq!(account.balance(), &Money::euro(dec!(2500.00)));

        account.make_transaction(withdrawal(dec!(2900.00))).unwrap();
        assert_eq!(account.balance(), &Money::euro(dec!(-400.00)));

        let err = account.make_transaction(withdrawal(dec!(200.00))).unwrap_err();
        assert!(matches!(err, DomainError::InsufficientFunds { .. }));
        assert_eq!(account.balance(), &Money::euro(dec!(-400.00)));
        assert_eq!(account.transactions().len(), 2);
    }

    #[test]
    fn savings_accounts_cannot_overdraw() {
        let mut account = Account::savings(iban(), CustomerId::new());
        account.make_transaction(deposit(dec!(100.00))).unwrap();

        let err = account.make_transaction(withdrawal(dec!(100.01))).unwrap_err();
        assert!(matches!(err, DomainError::InsufficientFunds { .. }));

        account.make_transaction(withdrawal(dec!(100.00))).unwrap();
        assert!(account.balance().is_zero());
    }

    #[test]
    fn mismatched_iban_is_rejected_without_side_effects() {
        let mut account = Account::current(iban(), CustomerId::new());
        let foreign = Transaction::deposit(
            Iban::new("DE129087").unwrap(),
            "Deposit",
            Money::euro(dec!(10)),
        )
        .unwrap();

        let err = account.make_transaction(foreign).unwrap_err();
        assert!(matches!(err, DomainError::AccountMismatch { .. }));
        assert!(account.balance().is_zero());
        assert!(account.transactions().is_empty());
    }

    #[test]
    fn inactive_accounts_reject_deposits() {
        let mut account = Account::current(iban(), CustomerId::new());
        account.set_status(AccountStatus::Inactive);

        let err = account.make_transaction(deposit(dec!(10))).unwrap_err();
        assert_eq!(err, DomainError::inactive_account("DE231234"));
        assert!(account.balance().is_zero());

        account.set_status(AccountStatus::Active);
        account.make_transaction(deposit(dec!(10))).unwrap();
        assert_eq!(account.balance(), &Money::euro(dec!(10)));
    }

    #[test]
    fn foreign_currency_is_rejected_without_side_effects() {
        let mut account = Account::current(iban(), CustomerId::new());
        let usd = Money::of(dec!(10), Currency::new("USD").unwrap());
        let t = Transaction::deposit(iban(), "Deposit", usd).unwrap();

        let err = account.make_transaction(t).unwrap_err();
        assert!(matches!(err, DomainError::CurrencyMismatch { .. }));
        assert!(account.transactions().is_empty());
    }

    #[test]
    fn variant_specific_setters_reject_the_other_variant() {
        let mut savings = Account::savings(iban(), CustomerId::new());
        assert!(savings.set_limit(Money::euro(dec!(100))).is_err());
        assert!(savings.set_debit_interest_rate(0.1).is_err());
        savings.set_credit_interest_rate(0.02).unwrap();
        assert_eq!(savings.interest_rate(), 0.02);

        let mut current = Account::current(iban(), CustomerId::new());
        assert!(current.set_credit_interest_rate(0.02).is_err());
        assert!(current.set_debit_interest_rate(f32::NAN).is_err());
        assert!(current.set_limit(Money::euro(dec!(-1))).is_err());
        let usd_limit = Money::of(dec!(100), Currency::new("USD").unwrap());
        assert!(matches!(
            current.set_limit(usd_limit),
            Err(DomainError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn history_keeps_application_order() {
        let mut account = Account::current(iban(), CustomerId::new());
        let first = deposit(dec!(100.45));
        let second = deposit(dec!(200.45));
        let third = withdrawal(dec!(150.00));

        account.make_transaction(first.clone()).unwrap();
        account.make_transaction(second.clone()).unwrap();
        account.make_transaction(withdrawal(dec!(10000))).unwrap_err();
        account.make_transaction(third.clone()).unwrap();

        assert_eq!(account.transactions(), &[first, second, third]);
        assert_eq!(account.balance(), &Money::euro(dec!(150.90)));
    }

    #[test]
    fn stored_accounts_load_back_unchanged() {
        let mut account = Account::current(iban(), CustomerId::new());
        account.set_limit(Money::euro(dec!(500))).unwrap();
        account.make_transaction(deposit(dec!(100.45))).unwrap();

        let json = serde_json::to_value(&account).unwrap();
        let back: Account = serde_json::from_value(json).unwrap();
        assert_eq!(back, account);
    }

    #[test]
    fn stored_accounts_must_keep_euro_balances() {
        let mut account = Account::current(iban(), CustomerId::new());
        account.make_transaction(deposit(dec!(100.45))).unwrap();
        let valid = serde_json::to_value(&account).unwrap();

        let mut usd_balance = valid.clone();
        usd_balance["balance"]["currency"] = "USD".into();
        assert!(serde_json::from_value::<Account>(usd_balance).is_err());

        let mut usd_limit = valid.clone();
        usd_limit["kind"]["limit"]["currency"] = "USD".into();
        assert!(serde_json::from_value::<Account>(usd_limit).is_err());

        let mut negative_limit = valid.clone();
        negative_limit["kind"]["limit"]["amount"] = "-1.00".into();
        assert!(serde_json::from_value::<Account>(negative_limit).is_err());

        let mut foreign_booking = valid;
        foreign_booking["transactions"][0]["iban"] = "DE999999".into();
        assert!(serde_json::from_value::<Account>(foreign_booking).is_err());
    }

    fn cents() -> impl Strategy<Value = Decimal> {
        (1i64..10_000_000i64).prop_map(|c| Decimal::new(c, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: without an overdraft, withdrawing more than the balance fails
        /// and leaves the balance unchanged.
        #[test]
        fn withdrawal_above_balance_fails(balance in cents(), extra in cents()) {
            let mut account = Account::savings(iban(), CustomerId::new());
            account.make_transaction(deposit(balance)).unwrap();

            let result = account.make_transaction(withdrawal(balance + extra));
            let rejected = matches!(result, Err(DomainError::InsufficientFunds { .. }));
            prop_assert!(rejected);
            prop_assert_eq!(account.balance(), &Money::euro(balance));
            prop_assert_eq!(account.transactions().len(), 1);
        }

        /// Property: a current account can draw exactly down to balance + limit.
        #[test]
        fn overdraft_boundary_is_balance_plus_limit(
            balance in cents(),
            limit in cents(),
            amount in cents(),
        ) {
            let mut account = Account::current(iban(), CustomerId::new());
            account.set_limit(Money::euro(limit)).unwrap();
            account.make_transaction(deposit(balance)).unwrap();

            let result = account.make_transaction(withdrawal(amount));
            if amount <= balance + limit {
                prop_assert!(result.is_ok());
                prop_assert_eq!(account.balance(), &Money::euro(balance - amount));
                prop_assert_eq!(account.transactions().len(), 2);
            } else {
                prop_assert!(result.is_err());
                prop_assert_eq!(account.balance(), &Money::euro(balance));
                prop_assert_eq!(account.transactions().len(), 1);
            }
        }
    }
}
