//! Bank facade: one repository per entity kind plus the ledger operations
//! consumed by user-facing collaborators.

use bankledger_core::{CustomerId, DomainError, DomainResult, Iban};
use bankledger_infra::{FileStorage, MapRepository, Repository, Storage};
use bankledger_ledger::{Account, AccountStatus, Customer, Transaction};

use crate::config::BankConfig;
use crate::error::BankError;

/// Storage strategy for the account repository.
pub type AccountStorage = Box<dyn Storage<Iban, Account>>;

/// Storage strategy for the customer repository.
pub type CustomerStorage = Box<dyn Storage<CustomerId, Customer>>;

pub struct Bank {
    name: String,
    city: String,
    bic: String,
    accounts: MapRepository<Account, AccountStorage>,
    customers: MapRepository<Customer, CustomerStorage>,
}

impl Bank {
    /// Build the bank and eagerly load both repositories.
    ///
    /// Storage that holds nothing yet yields an empty bank; any other load
    /// failure aborts.
    pub fn open(
        config: &BankConfig,
        account_storage: AccountStorage,
        customer_storage: CustomerStorage,
    ) -> Result<Self, BankError> {
        let mut bank = Self {
            name: required("bank name", &config.name)?,
            city: required("bank city", &config.city)?,
            bic: required("BIC", &config.bic)?,
            accounts: MapRepository::new(account_storage),
            customers: MapRepository::new(customer_storage),
        };

        bank.customers.initialize()?;
        bank.accounts.initialize()?;

        tracing::info!(
            bic = %bank.bic,
            customers = bank.customers.count(),
            accounts = bank.accounts.count(),
            "bank opened"
        );
        Ok(bank)
    }

    /// Open with one JSON file per entity kind under `config.data_dir`.
    pub fn open_with_files(config: &BankConfig) -> Result<Self, BankError> {
        Self::open(
            config,
            Box::new(FileStorage::<Iban, Account>::new(config.accounts_path())),
            Box::new(FileStorage::<CustomerId, Customer>::new(config.customers_path())),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) -> DomainResult<()> {
        self.name = required("bank name", name)?;
        Ok(())
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn set_city(&mut self, city: &str) -> DomainResult<()> {
        self.city = required("bank city", city)?;
        Ok(())
    }

    pub fn bic(&self) -> &str {
        &self.bic
    }

    // ---------------------------------------------------------------------
    // Customers
    // ---------------------------------------------------------------------

    /// Register a customer, replacing any customer with the same id.
    pub fn add_customer(&mut self, customer: Customer) {
        tracing::info!(customer_id = %customer.customer_id(), "customer added");
        self.customers.save(customer);
    }

    /// Remove a customer that no longer owns any account.
    ///
    /// Unlike the other repository passthroughs this is guarded: a customer
    /// who still owns accounts is rejected with a validation error. Remove the
    /// accounts first.
    pub fn remove_customer(&mut self, id: &CustomerId) -> DomainResult<Customer> {
        let owned: Vec<String> = self
            .accounts_of(*id)
            .iter()
            .map(|a| a.iban().to_string())
            .collect();
        if !owned.is_empty() {
            return Err(DomainError::validation(format!(
                "customer {id} still owns accounts: {}",
                owned.join(", ")
            )));
        }

        let removed = self
            .customers
            .delete_by_id(id)
            .ok_or_else(|| DomainError::not_found(format!("customer {id}")))?;
        tracing::info!(customer_id = %id, "customer removed");
        Ok(removed)
    }

    pub fn customer(&self, id: &CustomerId) -> DomainResult<&Customer> {
        self.customers
            .find_by_id(id)
            .ok_or_else(|| DomainError::not_found(format!("customer {id}")))
    }

    pub fn customer_mut(&mut self, id: &CustomerId) -> DomainResult<&mut Customer> {
        self.customers
            .find_by_id_mut(id)
            .ok_or_else(|| DomainError::not_found(format!("customer {id}")))
    }

    /// All customers, ordered by name.
    pub fn customers(&self) -> Vec<&Customer> {
        let mut customers = self.customers.find_all();
        customers.sort_by(|a, b| a.name().cmp(b.name()).then(a.customer_id().cmp(&b.customer_id())));
        customers
    }

    // ---------------------------------------------------------------------
    // Accounts
    // ---------------------------------------------------------------------

    /// Register an account, replacing any account with the same IBAN.
    ///
    /// Unlike a plain repository save, the owner must already be a registered
    /// customer; otherwise this fails with `NotFound` and nothing is stored.
    pub fn add_account(&mut self, account: Account) -> DomainResult<()> {
        let owner = account.owner();
        if !self.customers.contains(&owner) {
            return Err(DomainError::not_found(format!("customer {owner}")));
        }
        tracing::info!(iban = %account.iban(), kind = account.kind().name(), "account added");
        self.accounts.save(account);
        Ok(())
    }

    pub fn remove_account(&mut self, iban: &Iban) -> DomainResult<Account> {
        let removed = self
            .accounts
            .delete_by_id(iban)
            .ok_or_else(|| DomainError::not_found(format!("account {iban}")))?;
        tracing::info!(%iban, "account removed");
        Ok(removed)
    }

    pub fn account(&self, iban: &Iban) -> DomainResult<&Account> {
        self.accounts
            .find_by_id(iban)
            .ok_or_else(|| DomainError::not_found(format!("account {iban}")))
    }

    pub fn account_mut(&mut self, iban: &Iban) -> DomainResult<&mut Account> {
        self.accounts
            .find_by_id_mut(iban)
            .ok_or_else(|| DomainError::not_found(format!("account {iban}")))
    }

    /// All accounts, ordered by IBAN.
    pub fn accounts(&self) -> Vec<&Account> {
        let mut accounts = self.accounts.find_all();
        accounts.sort_by(|a, b| a.iban().cmp(b.iban()));
        accounts
    }

    pub fn accounts_of(&self, owner: CustomerId) -> Vec<&Account> {
        self.accounts()
            .into_iter()
            .filter(|a| a.owner() == owner)
            .collect()
    }

    pub fn set_account_status(&mut self, iban: &Iban, status: AccountStatus) -> DomainResult<()> {
        self.account_mut(iban)?.set_status(status);
        tracing::info!(%iban, %status, "account status changed");
        Ok(())
    }

    /// Apply a transaction to the account its IBAN names.
    pub fn make_transaction(&mut self, transaction: Transaction) -> DomainResult<()> {
        let iban = transaction.iban().clone();
        let symbol = transaction.symbol();
        let amount = transaction.amount().to_string();

        match self.account_mut(&iban)?.make_transaction(transaction) {
            Ok(()) => {
                tracing::info!(%iban, symbol, %amount, "transaction applied");
                Ok(())
            }
            Err(e) => {
                tracing::info!(%iban, symbol, %amount, error = %e, "transaction rejected");
                Err(e)
            }
        }
    }

    // ---------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------

    /// Flush both repositories to storage.
    pub fn persist(&self) -> Result<(), BankError> {
        self.customers.persist()?;
        self.accounts.persist()?;
        tracing::info!(
            customers = self.customers.count(),
            accounts = self.accounts.count(),
            "bank persisted"
        );
        Ok(())
    }
}

fn required(what: &str, value: &str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{what} must not be empty")));
    }
    Ok(trimmed.to_string())
}

impl core::fmt::Debug for Bank {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Bank")
            .field("name", &self.name)
            .field("city", &self.city)
            .field("bic", &self.bic)
            .field("customers", &self.customers.count())
            .field("accounts", &self.accounts.count())
            .finish()
    }
}

impl core::fmt::Display for Bank {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({}), BIC: {}", self.name, self.city, self.bic)
    }
}
