use std::sync::Arc;

use chrono::NaiveDate;
use messmate_app::{AppConfig, AppError, MessManager, bootstrap};
use messmate_core::{DomainError, MemberId};
use messmate_infra::{
    InMemoryKeyValueStore, KeyValueStore, ROSTER_KEY, RosterRepository, StorageError,
};
use messmate_ledger::{MemberField, PendingAction, Roster};

const TWO_MEMBERS: &str = r#"[
    {"id":1,"name":"Tushar Sheikh","deposit":100,"meals":10},
    {"id":2,"name":"Abu Bakar","deposit":0,"meals":10}
]"#;

fn shared_store(payload: Option<&str>) -> Arc<InMemoryKeyValueStore> {
    let store = InMemoryKeyValueStore::new();
    if let Some(payload) = payload {
        store.set(ROSTER_KEY, payload).unwrap();
    }
    Arc::new(store)
}

fn stored_roster(store: &Arc<InMemoryKeyValueStore>) -> Roster {
    RosterRepository::new(store.clone()).try_load().unwrap().unwrap()
}

/// Store whose writes always fail, reads always miss.
struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::LockPoisoned)
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::LockPoisoned)
    }
}

#[test]
fn summary_reflects_stored_roster() {
    let manager = MessManager::open(shared_store(Some(TWO_MEMBERS)));
    let summary = manager.summary();

    assert_eq!(summary.total_deposit, 100.0);
    assert_eq!(summary.total_meals, 20.0);
    assert_eq!(summary.meal_rate, 5.0);
    assert_eq!(summary.standings[0].balance, 50.0);
    assert_eq!(summary.standings[1].balance, -50.0);
}

#[test]
fn every_mutation_is_written_through() {
    let store = shared_store(Some(TWO_MEMBERS));
    let mut manager = MessManager::open(store.clone());

    let id = manager.add_member("Shahin").unwrap().unwrap();
    assert_eq!(id, MemberId::new(3));
    assert_eq!(stored_roster(&store).members(), manager.members());

    manager.update_field(id, MemberField::Deposit, "60").unwrap();
    manager.update_field(id, MemberField::Meals, "4.5").unwrap();
    assert_eq!(stored_roster(&store).members(), manager.members());

    let stored = stored_roster(&store);
    let shahin = stored.get(id).unwrap();
    assert_eq!(shahin.deposit, 60.0);
    assert_eq!(shahin.meals, 4.5);
}

#[test]
fn rejected_input_keeps_value_and_storage() {
    let store = shared_store(Some(TWO_MEMBERS));
    let mut manager = MessManager::open(store.clone());
    let before = store.get(ROSTER_KEY).unwrap();

    let err = manager
        .update_field(MemberId::new(1), MemberField::Deposit, "a lot")
        .unwrap_err();

    assert!(matches!(err, AppError::Domain(DomainError::Validation(_))));
    assert_eq!(manager.roster().get(MemberId::new(1)).unwrap().deposit, 100.0);
    assert_eq!(store.get(ROSTER_KEY).unwrap(), before);
}

#[test]
fn delete_requires_confirmation() {
    let store = shared_store(Some(TWO_MEMBERS));
    let mut manager = MessManager::open(store.clone());

    let token = manager.request_delete(MemberId::new(2));
    assert_eq!(
        manager.pending_confirmation(),
        Some((token, PendingAction::DeleteMember(MemberId::new(2))))
    );
    // Nothing happens until confirmed.
    assert_eq!(manager.members().len(), 2);

    manager.confirm(token).unwrap();

    assert_eq!(manager.members().len(), 1);
    assert!(manager.roster().get(MemberId::new(2)).is_none());
    assert_eq!(stored_roster(&store).len(), 1);
}

#[test]
fn declined_reset_changes_nothing() {
    let store = shared_store(Some(TWO_MEMBERS));
    let mut manager = MessManager::open(store.clone());
    let before_members = manager.members().to_vec();
    let before_stored = store.get(ROSTER_KEY).unwrap();

    let token = manager.request_reset();
    assert!(manager.cancel(token));

    assert_eq!(manager.members(), &before_members[..]);
    assert_eq!(store.get(ROSTER_KEY).unwrap(), before_stored);
    assert!(matches!(
        manager.confirm(token),
        Err(AppError::Domain(DomainError::NotFound(_)))
    ));
}

#[test]
fn confirmed_reset_zeroes_everything_and_persists() {
    let store = shared_store(Some(TWO_MEMBERS));
    let mut manager = MessManager::open(store.clone());

    let token = manager.request_reset();
    manager.confirm(token).unwrap();

    let stored = stored_roster(&store);
    assert_eq!(stored.len(), 2);
    for m in stored.members() {
        assert_eq!(m.deposit, 0.0);
        assert_eq!(m.meals, 0.0);
    }
    assert_eq!(stored.members()[0].name, "Tushar Sheikh");
    assert_eq!(manager.summary().meal_rate, 0.0);
}

#[test]
fn superseded_confirmation_is_rejected() {
    let mut manager = MessManager::open(shared_store(Some(TWO_MEMBERS)));

    let stale = manager.request_delete(MemberId::new(1));
    let fresh = manager.request_reset();

    assert!(manager.confirm(stale).is_err());
    assert_eq!(manager.members().len(), 2);
    assert_eq!(manager.members()[0].deposit, 100.0);

    manager.confirm(fresh).unwrap();
    assert_eq!(manager.members()[0].deposit, 0.0);
}

#[test]
fn corrupt_storage_falls_back_to_seed() {
    let manager = MessManager::open(shared_store(Some("[{\"id\": \"oops\"}]")));
    assert_eq!(manager.roster(), &Roster::seeded());
}

#[test]
fn add_after_maximum_stored_id_is_rejected() {
    let payload = r#"[{"id":18446744073709551615,"name":"A","deposit":10,"meals":1}]"#;
    let store = shared_store(Some(payload));
    let mut manager = MessManager::open(store.clone());
    assert_eq!(manager.members()[0].id, MemberId::new(u64::MAX));

    let err = manager.add_member("B").unwrap_err();

    assert!(matches!(
        err,
        AppError::Domain(DomainError::InvariantViolation(_))
    ));
    assert_eq!(manager.members().len(), 1);
    assert_eq!(store.get(ROSTER_KEY).unwrap().as_deref(), Some(payload));
}

#[test]
fn persistence_failure_is_reported() {
    let mut manager = MessManager::open(ReadOnlyStore);

    let err = manager.add_member("Tarik").unwrap_err();

    assert!(matches!(err, AppError::Storage(StorageError::LockPoisoned)));
}

#[test]
fn exports_follow_the_live_roster() {
    let mut manager = MessManager::open(shared_store(Some(TWO_MEMBERS)));
    manager.update_field(MemberId::new(2), MemberField::Deposit, "100").unwrap();

    let csv = manager.export_csv().unwrap();
    assert_eq!(
        csv,
        "Name,Deposit,Meals,Cost,Balance\n\
         Tushar Sheikh,100,10,100.00,0.00\n\
         Abu Bakar,100,10,100.00,0.00\n"
    );

    let report = manager.report(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
    assert_eq!(report.rate, "10.00");
    assert_eq!(report.rows[0].balance, "+0.00");

    let dir = tempfile::tempdir().unwrap();
    let path = manager.export_csv_to(dir.path()).unwrap();
    assert!(path.ends_with("meal_data.csv"));
    assert_eq!(std::fs::read_to_string(path).unwrap(), csv);

    let pdf = manager
        .export_report_pdf_to(dir.path(), NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
        .unwrap();
    assert!(pdf.ends_with("meal-report.pdf"));
    assert!(std::fs::read(pdf).unwrap().starts_with(b"%PDF"));
}

#[test]
fn bootstrap_persists_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::with_data_dir(dir.path().join("data"));

    {
        let mut manager = bootstrap(&config).unwrap();
        assert_eq!(manager.members().len(), 10);
        manager
            .update_field(MemberId::new(1), MemberField::Deposit, "500")
            .unwrap();
    }

    let manager = bootstrap(&config).unwrap();
    assert_eq!(manager.members().len(), 10);
    assert_eq!(manager.members()[0].deposit, 500.0);
    assert!(config.db_path().exists());
}
