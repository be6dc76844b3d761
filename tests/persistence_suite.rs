mod common;

use std::fs;

use assert_fs::prelude::*;
use chrono::Local;
use common::setup_test_env;
use cuentas::{Config, ConfigManager, EntryDraft, MovementKind, Session};
use predicates::prelude::*;

fn today_draft(concept: &str, amount: &str) -> EntryDraft {
    EntryDraft::new(MovementKind::Expense, concept, amount).with_date(Local::now().date_naive())
}

#[test]
fn session_restart_returns_appended_records_in_order() {
    let base = setup_test_env();
    let mut session = Session::open_in(base.clone()).expect("open session");
    session.submit(&today_draft("bread", "2.50")).expect("submit bread");
    session.submit(&today_draft("milk", "1.20")).expect("submit milk");
    let before = session.store().records().to_vec();
    drop(session);

    let reopened = Session::open_in(base).expect("reopen session");
    assert_eq!(reopened.store().records(), before.as_slice());
    assert_eq!(reopened.summary().len(), 2);
}

#[test]
fn ledger_file_uses_registros_layout() {
    let temp = assert_fs::TempDir::new().unwrap();
    let mut session = Session::open_in(temp.path().to_path_buf()).expect("open session");
    session
        .submit(&EntryDraft::new(MovementKind::Income, "salary", "1200").with_date(common::ymd(2024, 3, 20)))
        .expect("submit");

    let file = temp.child("registros.json");
    file.assert(predicate::path::exists());
    file.assert(predicate::str::contains("\"tipoMovimiento\":\"ingreso\""));

    let raw = fs::read_to_string(file.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value[0]["fecha"], "2024-03-20");
    assert_eq!(value[0]["concepto"], "salary");
    assert_eq!(value[0]["monto"].as_f64(), Some(1200.0));
    temp.close().unwrap();
}

#[test]
fn config_can_redirect_storage_key_and_directory() {
    let base = setup_test_env();
    let data_dir = base.join("elsewhere");
    let manager = ConfigManager::with_base_dir(base.clone()).expect("config manager");
    manager
        .save(&Config {
            storage_key: "pruebas".into(),
            data_dir: Some(data_dir.clone()),
            ..Config::default()
        })
        .expect("save config");

    let mut session = Session::open_in(base.clone()).expect("open session");
    session.submit(&today_draft("bread", "1")).expect("submit");

    assert!(data_dir.join("pruebas.json").exists());
    assert!(!base.join("registros.json").exists());
}

#[test]
fn corrupted_ledger_opens_empty_and_keeps_a_copy() {
    let base = setup_test_env();
    fs::write(base.join("registros.json"), "not json at all").unwrap();

    let mut session = Session::open_in(base.clone()).expect("fails open");
    assert!(session.store().is_empty());

    let backups: Vec<_> = fs::read_dir(base.join("backups").join("registros"))
        .expect("backup dir")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    assert!(
        backups.iter().any(|name| name.ends_with("_corrupt.json")),
        "expected quarantined file, found {backups:?}"
    );

    session.submit(&today_draft("fresh", "3")).expect("submit after recovery");
    let reopened = Session::open_in(base).expect("reopen");
    assert_eq!(reopened.store().len(), 1);
}

#[test]
fn invalid_submission_leaves_storage_untouched() {
    let base = setup_test_env();
    let mut session = Session::open_in(base.clone()).expect("open session");
    let err = session
        .submit(&EntryDraft::new(MovementKind::Expense, "", "5"))
        .expect_err("incomplete draft");
    assert!(err.is_validation());
    assert!(!base.join("registros.json").exists());
}
