use membership_core::db::{open_pool, PoolConfig};
use membership_core::store::{SqliteMemberStore, SqliteMembershipStore};
use membership_core::{
    open_pool_in_memory, InMemoryStore, Member, MemberPatch, MemberService, MemberStore,
    Membership, MembershipService, MembershipStore, MembershipType, ServiceError, Sport,
    SportPatch, SportService, SportStore, SqliteStore, Store, StoreErrorKind, Stores,
    ValidationError,
};
use std::sync::Arc;
use std::thread;
use uuid::Uuid;

const START: i64 = 1_700_000_000_000;

fn member(name: &str, email: &str) -> Member {
    Member::new(name, email, "1234567890", "", START)
}

fn backends() -> Vec<(&'static str, Arc<dyn Store>)> {
    vec![
        (
            "sqlite",
            Arc::new(SqliteStore::from_pool(open_pool_in_memory().unwrap())),
        ),
        ("memory", Arc::new(InMemoryStore::new())),
    ]
}

#[test]
fn backends_report_the_same_error_kinds() {
    for (name, store) in backends() {
        let john = store
            .add_member(&member("John Doe", "john@example.com"))
            .unwrap();
        let chess = store.add_sport(&Sport::new("Chess", "")).unwrap();

        let duplicate = store
            .add_member(&member("Johnny", "john@example.com"))
            .unwrap_err();
        assert_eq!(duplicate.kind(), StoreErrorKind::AlreadyExists, "{name}");

        let duplicate_sport = store.add_sport(&Sport::new("Chess", "x")).unwrap_err();
        assert_eq!(duplicate_sport.kind(), StoreErrorKind::AlreadyExists, "{name}");

        let missing = store.get_member_by_id(Uuid::new_v4()).unwrap_err();
        assert_eq!(missing.kind(), StoreErrorKind::NotFound, "{name}");

        let orphan = Membership::new(
            Uuid::new_v4(),
            chess.id,
            MembershipType::Membership,
            START,
            START,
            10.0,
        );
        let dangling = store.add_membership(&orphan).unwrap_err();
        assert_eq!(
            dangling.kind(),
            StoreErrorKind::MissingRequiredField,
            "{name}"
        );

        store
            .add_membership(&Membership::new(
                john.id,
                chess.id,
                MembershipType::Training,
                START,
                START,
                10.0,
            ))
            .unwrap();
        let referenced = store.delete_sport(chess.id).unwrap_err();
        assert_eq!(
            referenced.kind(),
            StoreErrorKind::MissingRequiredField,
            "{name}"
        );

        let gone = store.delete_member(Uuid::new_v4()).unwrap_err();
        assert_eq!(gone.kind(), StoreErrorKind::NotFound, "{name}");
    }
}

#[test]
fn backends_agree_on_update_error_kinds() {
    for (name, store) in backends() {
        store
            .add_member(&member("John Doe", "john@example.com"))
            .unwrap();
        let mut jane = store
            .add_member(&member("Jane Doe", "jane@example.com"))
            .unwrap();
        store.add_sport(&Sport::new("Chess", "")).unwrap();
        let mut tennis = store.add_sport(&Sport::new("Tennis", "")).unwrap();

        let mut ghost = member("Ghost", "ghost@example.com");
        ghost.id = Uuid::new_v4();
        let err = store.update_member(&ghost).unwrap_err();
        assert_eq!(err.kind(), StoreErrorKind::NotFound, "{name}");

        jane.email = "john@example.com".to_string();
        let err = store.update_member(&jane).unwrap_err();
        assert_eq!(err.kind(), StoreErrorKind::AlreadyExists, "{name}");

        // An unknown id wins over a taken email.
        ghost.email = "john@example.com".to_string();
        let err = store.update_member(&ghost).unwrap_err();
        assert_eq!(err.kind(), StoreErrorKind::NotFound, "{name}");

        let mut ghost_sport = Sport::new("Squash", "");
        ghost_sport.id = Uuid::new_v4();
        let err = store.update_sport(&ghost_sport).unwrap_err();
        assert_eq!(err.kind(), StoreErrorKind::NotFound, "{name}");

        tennis.name = "Chess".to_string();
        let err = store.update_sport(&tennis).unwrap_err();
        assert_eq!(err.kind(), StoreErrorKind::AlreadyExists, "{name}");

        ghost_sport.name = "Chess".to_string();
        let err = store.update_sport(&ghost_sport).unwrap_err();
        assert_eq!(err.kind(), StoreErrorKind::NotFound, "{name}");
    }
}

#[test]
fn backends_treat_nan_fee_as_missing_field() {
    for (name, store) in backends() {
        let john = store
            .add_member(&member("John Doe", "john@example.com"))
            .unwrap();
        let chess = store.add_sport(&Sport::new("Chess", "")).unwrap();

        let nan_fee = Membership::new(
            john.id,
            chess.id,
            MembershipType::Membership,
            START,
            START,
            f64::NAN,
        );
        let err = store.add_membership(&nan_fee).unwrap_err();
        assert_eq!(err.kind(), StoreErrorKind::MissingRequiredField, "{name}");
        assert!(store.get_all_memberships().unwrap().is_empty(), "{name}");
    }
}

#[test]
fn member_service_rejects_invalid_member_without_writing() {
    let store = Arc::new(SqliteStore::from_pool(open_pool_in_memory().unwrap()));
    let service = MemberService::new(Arc::clone(&store));

    let err = service
        .register_member(&member("Jo", "john@example.com"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Invalid(ValidationError::Member(_))));
    assert_eq!(err.store_kind(), None);
    assert!(store.get_all_members().unwrap().is_empty());
}

#[test]
fn member_service_patch_is_validated_before_update() {
    let store = Arc::new(InMemoryStore::new());
    let service = MemberService::new(Arc::clone(&store));
    let john = service
        .register_member(&member("John Doe", "john@example.com"))
        .unwrap();

    let bad = MemberPatch {
        email: Some("not-an-email".to_string()),
        ..MemberPatch::default()
    };
    assert!(matches!(
        service.update_member(john.id, &bad),
        Err(ServiceError::Invalid(_))
    ));
    assert_eq!(
        service.get_member(john.id).unwrap().email,
        "john@example.com"
    );

    let good = MemberPatch {
        phone_number: Some("0987654321".to_string()),
        ..MemberPatch::default()
    };
    let updated = service.update_member(john.id, &good).unwrap();
    assert_eq!(updated.phone_number, "0987654321");
    assert_eq!(updated.name, "John Doe");

    let err = service.update_member(Uuid::new_v4(), &good).unwrap_err();
    assert_eq!(err.store_kind(), Some(StoreErrorKind::NotFound));
}

#[test]
fn sport_service_partial_update_keeps_untouched_fields() {
    let store = Arc::new(SqliteStore::from_pool(open_pool_in_memory().unwrap()));
    let service = SportService::new(store);
    let chess = service.create_sport(&Sport::new("Chess", "d")).unwrap();

    let updated = service
        .update_sport(
            chess.id,
            &SportPatch {
                description: Some("d2".to_string()),
                ..SportPatch::default()
            },
        )
        .unwrap();

    assert_eq!(updated.name, "Chess");
    assert_eq!(updated.description, "d2");
    assert_eq!(service.get_sport(chess.id).unwrap(), updated);
}

#[test]
fn membership_service_rejects_due_date_before_start_date() {
    let store: Arc<dyn Store> = Arc::new(InMemoryStore::new());
    let members = MemberService::new(Arc::clone(&store));
    let sports = SportService::new(Arc::clone(&store));
    let memberships = MembershipService::new(Arc::clone(&store));

    let john = members
        .register_member(&member("John Doe", "john@example.com"))
        .unwrap();
    let chess = sports.create_sport(&Sport::new("Chess", "")).unwrap();

    let backwards = Membership::new(
        john.id,
        chess.id,
        MembershipType::Membership,
        START + 1,
        START,
        25.0,
    );
    assert!(matches!(
        memberships.enroll(&backwards),
        Err(ServiceError::Invalid(ValidationError::Membership(_)))
    ));
    assert!(memberships.list_memberships().unwrap().is_empty());

    let enrolled = memberships
        .enroll(&Membership { due_date: START + 1, start_date: START, ..backwards })
        .unwrap();
    assert_eq!(memberships.get_membership(enrolled.id).unwrap(), enrolled);
}

#[test]
fn stores_can_mix_adapters_per_entity() {
    let pool = open_pool_in_memory().unwrap();
    let mixed = Stores::new(
        SqliteMemberStore::new(pool.clone()),
        InMemoryStore::new(),
        SqliteMembershipStore::new(pool),
    );

    let john = mixed
        .add_member(&member("John Doe", "john@example.com"))
        .unwrap();
    let chess = mixed.add_sport(&Sport::new("Chess", "")).unwrap();

    assert_eq!(mixed.get_member_by_id(john.id).unwrap(), john);
    assert_eq!(mixed.get_all_sports().unwrap(), vec![chess.clone()]);

    // The sport lives only in memory, so the SQLite foreign key rejects it.
    let membership = Membership::new(
        john.id,
        chess.id,
        MembershipType::Membership,
        START,
        START,
        10.0,
    );
    let err = mixed.add_membership(&membership).unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::MissingRequiredField);
}

#[test]
fn file_backed_store_handles_concurrent_adds() {
    let dir = tempfile::tempdir().unwrap();
    let pool = open_pool(dir.path().join("club.db"), &PoolConfig::default()).unwrap();
    let store = Arc::new(SqliteStore::from_pool(pool));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                store
                    .add_member(&member("Member", &format!("m{i}@example.com")))
                    .unwrap()
            })
        })
        .collect();

    let mut ids: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap().id)
        .collect();
    ids.sort();
    ids.dedup();

    assert_eq!(ids.len(), 8);
    assert_eq!(store.get_all_members().unwrap().len(), 8);
}
