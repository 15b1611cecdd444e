use membership_core::model::{
    MemberValidationError, MembershipValidationError, SportValidationError,
};
use membership_core::{
    Member, MemberPatch, MemberStatus, Membership, MembershipStatus, MembershipType, Sport,
    SportPatch,
};
use uuid::Uuid;

fn john() -> Member {
    Member::new(
        "John Doe",
        "john@example.com",
        "1234567890",
        "12 Main Street",
        1_700_000_000_000,
    )
}

fn training(start_date: i64, due_date: i64) -> Membership {
    Membership::new(
        Uuid::new_v4(),
        Uuid::new_v4(),
        MembershipType::Training,
        start_date,
        due_date,
        10.0,
    )
}

#[test]
fn member_new_sets_defaults() {
    let member = john();
    assert!(member.id.is_nil());
    assert_eq!(member.status, MemberStatus::Active);
    assert!(member.is_valid());
}

#[test]
fn member_name_must_be_longer_than_two_chars() {
    let mut member = john();
    member.name = "Jo".to_string();
    assert_eq!(
        member.validate(),
        Err(MemberValidationError::NameTooShort { chars: 2 })
    );

    member.name = "Joe".to_string();
    assert!(member.is_valid());
}

#[test]
fn member_email_must_have_standard_shape() {
    for bad in ["john", "john@example", "john@@example.com", "@example.com", ""] {
        let mut member = john();
        member.email = bad.to_string();
        assert!(!member.is_valid(), "`{bad}` should be rejected");
    }

    let mut member = john();
    member.email = "jane.doe+club@mail.example.org".to_string();
    assert!(member.is_valid());
}

#[test]
fn member_phone_must_be_exactly_ten_chars() {
    let mut member = john();
    member.phone_number = "123456789".to_string();
    assert_eq!(
        member.validate(),
        Err(MemberValidationError::InvalidPhoneNumber { chars: 9 })
    );
    member.phone_number = "12345678901".to_string();
    assert!(!member.is_valid());
}

#[test]
fn member_status_round_trips_through_integers() {
    assert_eq!(i64::from(MemberStatus::Inactive), 0);
    assert_eq!(i64::from(MemberStatus::Active), 1);
    assert_eq!(MemberStatus::try_from(1_i64), Ok(MemberStatus::Active));
    assert_eq!(MemberStatus::try_from(2_i64), Err(2));
    assert_eq!(MemberStatus::Inactive.as_str(), "Inactive");
}

#[test]
fn member_patch_changes_only_supplied_fields() {
    let mut member = john();
    let patch = MemberPatch {
        address: Some("34 Side Road".to_string()),
        status: Some(MemberStatus::Inactive),
        ..MemberPatch::default()
    };
    patch.apply_to(&mut member);

    assert_eq!(member.address, "34 Side Road");
    assert_eq!(member.status, MemberStatus::Inactive);
    assert_eq!(member.name, "John Doe");
    assert_eq!(member.email, "john@example.com");
}

#[test]
fn sport_name_must_be_longer_than_two_chars() {
    assert_eq!(
        Sport::new("Go", "board game").validate(),
        Err(SportValidationError::NameTooShort { chars: 2 })
    );
    assert!(Sport::new("Chess", "").is_valid());
}

#[test]
fn sport_patch_leaves_name_untouched_when_absent() {
    let mut sport = Sport::new("Chess", "d");
    SportPatch {
        description: Some("d2".to_string()),
        ..SportPatch::default()
    }
    .apply_to(&mut sport);

    assert_eq!(sport.name, "Chess");
    assert_eq!(sport.description, "d2");
}

#[test]
fn membership_due_date_before_start_date_is_invalid() {
    let t0 = 1_700_000_000_000;
    let t1 = t0 + 86_400_000;
    let membership = training(t1, t0);

    assert!(!membership.is_valid());
    assert_eq!(
        membership.validate(),
        Err(MembershipValidationError::DueBeforeStart { start: t1, due: t0 })
    );
}

#[test]
fn membership_same_day_period_is_valid() {
    assert!(training(1_000, 1_000).is_valid());
}

#[test]
fn membership_fee_must_be_positive() {
    for fee in [0.0, -5.0, f64::NAN] {
        let mut membership = training(0, 1);
        membership.fee = fee;
        assert!(!membership.is_valid(), "fee {fee} should be rejected");
    }
}

#[test]
fn membership_type_and_status_reject_unknown_values() {
    assert_eq!(
        "training".parse::<MembershipType>(),
        Ok(MembershipType::Training)
    );
    assert_eq!(
        "membership".parse::<MembershipType>(),
        Ok(MembershipType::Membership)
    );
    assert_eq!(
        "yearly".parse::<MembershipType>(),
        Err(MembershipValidationError::UnknownType("yearly".to_string()))
    );
    assert_eq!(
        MembershipStatus::try_from(0_i64),
        Ok(MembershipStatus::Inactive)
    );
    assert_eq!(
        MembershipStatus::try_from(7_i64),
        Err(MembershipValidationError::UnknownStatus(7))
    );
}

#[test]
fn membership_serialization_uses_type_field() {
    let membership = training(10, 20);
    let json = serde_json::to_value(&membership).unwrap();
    assert_eq!(json["type"], "training");
    assert_eq!(json["start_date"], 10);
    assert_eq!(json["fee"], 10.0);

    let decoded: Membership = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, membership);
}
