use membership_core::{open_pool_in_memory, Sport, SportStore, SqliteStore, StoreErrorKind};
use uuid::Uuid;

fn store() -> SqliteStore {
    SqliteStore::from_pool(open_pool_in_memory().unwrap())
}

#[test]
fn add_and_get_round_trip() {
    let store = store();
    let added = store.add_sport(&Sport::new("Chess", "d")).unwrap();

    assert!(!added.id.is_nil());
    let loaded = store.get_sport_by_id(added.id).unwrap();
    assert_eq!(loaded.name, "Chess");
    assert_eq!(loaded.description, "d");
}

#[test]
fn duplicate_name_is_already_exists() {
    let store = store();
    store.add_sport(&Sport::new("Chess", "d")).unwrap();

    let err = store.add_sport(&Sport::new("Chess", "other")).unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::AlreadyExists);
}

#[test]
fn get_unknown_id_is_not_found() {
    let err = store().get_sport_by_id(Uuid::new_v4()).unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::NotFound);
}

#[test]
fn get_all_on_empty_table_is_empty() {
    assert!(store().get_all_sports().unwrap().is_empty());
}

#[test]
fn updating_description_keeps_name() {
    let store = store();
    let mut sport = store.add_sport(&Sport::new("Chess", "d")).unwrap();

    sport.description = "d2".to_string();
    let updated = store.update_sport(&sport).unwrap();

    assert_eq!(updated.name, "Chess");
    assert_eq!(updated.description, "d2");
    assert_eq!(store.get_sport_by_id(sport.id).unwrap(), updated);
}

#[test]
fn update_to_existing_name_is_already_exists() {
    let store = store();
    store.add_sport(&Sport::new("Chess", "")).unwrap();
    let mut tennis = store.add_sport(&Sport::new("Tennis", "")).unwrap();

    tennis.name = "Chess".to_string();
    let err = store.update_sport(&tennis).unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::AlreadyExists);
}

#[test]
fn update_unknown_id_is_not_found() {
    let store = store();
    let mut ghost = Sport::new("Squash", "");
    ghost.id = Uuid::new_v4();

    let err = store.update_sport(&ghost).unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::NotFound);
}

#[test]
fn delete_then_get_is_not_found() {
    let store = store();
    let sport = store.add_sport(&Sport::new("Rowing", "")).unwrap();

    store.delete_sport(sport.id).unwrap();

    assert_eq!(
        store.get_sport_by_id(sport.id).unwrap_err().kind(),
        StoreErrorKind::NotFound
    );
    assert_eq!(
        store.delete_sport(sport.id).unwrap_err().kind(),
        StoreErrorKind::NotFound
    );
}
