//! Demo data for a first run against empty storage.

use rust_decimal::Decimal;

use bankledger_core::{DomainResult, Iban};
use bankledger_ledger::{Account, Customer, Money, Transaction};

use crate::bank::Bank;

/// Two customers with one current account each; the first account gets a few
/// bookings and a 1000.00 EUR overdraft.
pub fn seed(bank: &mut Bank) -> DomainResult<()> {
    tracing::info!("seeding demo data");

    let ottokar = Customer::new("Ottokar Domma", "Leipzig")?;
    let lieselotte = Customer::new("Lieselotte Scharfsinnig", "Hamburg")?;

    let main_iban = Iban::new("DE231234")?;
    let second_iban = Iban::new("DE129087")?;
    let main_account = Account::current(main_iban.clone(), lieselotte.customer_id());
    let second_account = Account::current(second_iban, ottokar.customer_id());

    bank.add_customer(ottokar);
    bank.add_customer(lieselotte);
    bank.add_account(main_account)?;
    bank.add_account(second_account)?;

    for cents in [10_045i64, 20_045, 30_045] {
        let amount = Money::euro(Decimal::new(cents, 2));
        bank.make_transaction(Transaction::deposit(main_iban.clone(), "Deposit", amount)?)?;
    }
    let amount = Money::euro(Decimal::new(15_000, 2));
    bank.make_transaction(Transaction::withdrawal(main_iban.clone(), "Withdrawal", amount)?)?;

    bank.account_mut(&main_iban)?
        .set_limit(Money::euro(Decimal::new(1_000, 0)))?;

    tracing::info!(balance = %bank.account(&main_iban)?.balance(), "demo data ready");
    Ok(())
}
