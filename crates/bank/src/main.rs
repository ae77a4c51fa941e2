use anyhow::{Context, anyhow};

use bankledger_bank::{config, demo, instance};

fn main() -> anyhow::Result<()> {
    bankledger_observability::init();

    let config = config::BankConfig::from_env();
    let shared = instance::initialize_with(&config).context("failed to load bank state")?;
    let mut bank = shared.lock().map_err(|_| anyhow!("bank lock poisoned"))?;

    if bank.accounts().is_empty() {
        demo::seed(&mut bank).context("failed to seed demo data")?;
    }

    tracing::info!(bank = %*bank, "bank information");
    for customer in bank.customers() {
        tracing::info!(%customer, "customer");
    }
    for account in bank.accounts() {
        tracing::info!(%account, "account");
        for transaction in account.transactions() {
            tracing::info!(iban = %account.iban(), %transaction, "transaction");
        }
    }

    bank.persist().context("failed to persist bank state")?;
    Ok(())
}
