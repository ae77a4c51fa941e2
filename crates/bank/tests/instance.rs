//! Process-wide instance lifecycle. Kept in its own test binary because the
//! instance can only be created once per process.

use std::fs;

use bankledger_bank::{BankConfig, BankError, instance};

#[test]
fn instance_is_created_once_and_shared() {
    assert!(matches!(instance::get_instance(), Err(BankError::NotInitialized)));

    let data_dir = std::env::temp_dir().join(format!("bankledger-instance-{}", uuid::Uuid::now_v7()));
    fs::create_dir_all(&data_dir).unwrap();
    let config = BankConfig::new("Signal Iduna Bank", "Hamburg", "SIBAHH26").with_data_dir(&data_dir);

    // A failed load leaves the process uninitialized.
    fs::write(config.accounts_path(), "not json at all").unwrap();
    let err = instance::initialize_with(&config).unwrap_err();
    assert!(matches!(err, BankError::Storage(_)));
    assert!(matches!(instance::get_instance(), Err(BankError::NotInitialized)));

    fs::remove_file(config.accounts_path()).unwrap();
    let created = instance::initialize_with(&config).unwrap();
    let fetched = instance::get_instance().unwrap();
    assert!(std::ptr::eq(created, fetched));
    assert_eq!(fetched.lock().unwrap().bic(), "SIBAHH26");

    assert!(matches!(
        instance::initialize("Another Bank", "Berlin", "ANOTDEBB"),
        Err(BankError::AlreadyInitialized)
    ));
    assert_eq!(instance::get_instance().unwrap().lock().unwrap().name(), "Signal Iduna Bank");

    fs::remove_dir_all(data_dir).unwrap();
}
