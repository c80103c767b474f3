mod common;

use std::fs;

use common::{account_file, date, money};
use forecash_core::{
    core::{AccountManager, Action, FixedClock},
    storage::{self, JsonStorage},
    Event, Frequency,
};
use serde_json::Value;

const LEGACY_SNAPSHOT: &str = r#"{"Balance":1250.5,"Events":[
    {"Date":"2024-01-05T00:00:00-05:00","Description":"Paycheck","Amount":2100,"Frequency":3},
    {"Date":"2024-01-31T00:00:00-05:00","Description":"Rent","Amount":-1400,"Frequency":4},
    {"Date":"2024-02-14T00:00:00-05:00","Description":"Dinner","Amount":-85.25,"Frequency":0}
]}"#;

#[test]
fn loads_snapshot_written_with_timestamps() {
    let (_guard, path) = account_file(LEGACY_SNAPSHOT);
    let account = storage::load(&path).expect("load snapshot");

    assert_eq!(account.balance(), money(125050));
    let events = account.events();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].frequency, Frequency::Biweekly);
    assert_eq!(events[1].anchor_date, date(2024, 1, 31));
    assert_eq!(events[2].amount, money(-8525));
}

#[test]
fn save_writes_expected_shape() {
    let (_guard, path) = account_file(LEGACY_SNAPSHOT);
    let account = storage::load(&path).expect("load snapshot");
    storage::save(&account, &path).expect("save snapshot");

    let json: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["Balance"], 1250.5);
    let events = json["Events"].as_array().expect("events array");
    assert_eq!(events.len(), 3);
    assert_eq!(events[0]["Date"], "2024-01-05");
    assert_eq!(events[0]["Frequency"], 3);
    assert_eq!(events[1]["Description"], "Rent");
    assert_eq!(events[2]["Amount"], -85.25);
}

#[test]
fn reload_discards_unsaved_changes() {
    let (_guard, path) = account_file(LEGACY_SNAPSHOT);
    let mut account = storage::load(&path).expect("load snapshot");
    account.set_balance(money(0));
    account.add_event(Event::once(date(2024, 3, 1), "Impulse buy", money(-999)));

    storage::reload(&mut account, &path).expect("reload snapshot");
    assert_eq!(account.balance(), money(125050));
    assert_eq!(account.event_count(), 3);
}

#[test]
fn missing_file_is_an_error() {
    let temp = tempfile::tempdir().unwrap();
    assert!(storage::load(&temp.path().join("absent.json")).is_err());
}

#[test]
fn manager_applies_actions_and_persists_them() {
    let (_guard, path) = account_file(LEGACY_SNAPSHOT);
    let mut manager = AccountManager::open(
        &path,
        Box::new(JsonStorage),
        Box::new(FixedClock(date(2024, 1, 3))),
    )
    .expect("open account");

    let until = date(2024, 3, 1);
    let first = manager.predict(until)[0];
    assert_eq!(first.occurrence_date, date(2024, 1, 5));
    assert!(manager.apply(Action::Complete(first)).unwrap());

    let rent = manager
        .predict(until)
        .into_iter()
        .find(|txn| txn.occurrence_date == date(2024, 1, 31))
        .expect("rent row");
    assert!(manager.apply(Action::PullForward(rent)).unwrap());
    manager.save().expect("save");

    let reopened = storage::load(&path).expect("reload from disk");
    assert_eq!(reopened.balance(), money(335050));
    assert_eq!(reopened.event_count(), 4);
    let paycheck = &reopened.events()[0];
    assert_eq!(paycheck.anchor_date, date(2024, 1, 19));
    let rent = &reopened.events()[1];
    assert_eq!(rent.anchor_date, date(2024, 3, 2));
    let split = &reopened.events()[3];
    assert_eq!(split.frequency, Frequency::Once);
    assert_eq!(split.anchor_date, date(2024, 1, 3));
    assert_eq!(split.amount, money(-140000));
}

#[test]
fn failed_save_preserves_original_file() {
    let (_guard, path) = account_file(LEGACY_SNAPSHOT);
    let original = fs::read_to_string(&path).unwrap();
    let mut account = storage::load(&path).expect("load snapshot");

    // A directory squatting on the temp name makes the write fail before the rename.
    let tmp_path = path.with_extension("json.tmp");
    fs::create_dir_all(&tmp_path).unwrap();

    account.set_balance(money(1));
    assert!(
        storage::save(&account, &path).is_err(),
        "expected save to fail when the temp path is a directory"
    );
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        original,
        "failed save must not touch the snapshot"
    );
}
