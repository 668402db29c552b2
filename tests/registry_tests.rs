//! Tests for the registries and the access desk working together

use chrono::{Days, NaiveDate};
use facility_keycard::keycard::today;
use facility_keycard::*;

fn desk() -> AccessDesk {
    AccessDesk::new(FacilityConfig { seed: Some(2024), ..FacilityConfig::default() })
}

fn trainer(first: &str, last: &str) -> EmployeeDetails {
    EmployeeDetails {
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: None,
        phone_number: Some("555-0150".to_string()),
        department: "Training".to_string(),
        position: "Personal Trainer".to_string(),
        salary: 41_000.0,
        hire_date: NaiveDate::from_ymd_opt(2023, 9, 1).unwrap(),
        work_status: WorkStatus::Active,
    }
}

/// Member and employee ids count independently from 1
#[test]
fn test_independent_id_counters() {
    let mut desk = desk();
    let m1 = desk.register_member(NewMember::new("John", "Doe").with_phone("555-0100")).unwrap();
    let e1 = desk.hire_employee(trainer("Jane", "Smith")).unwrap();
    let m2 = desk.register_member(NewMember::new("Ann", "Lee").with_phone("555-0100")).unwrap();

    assert_eq!(m1, MemberId::new(1));
    assert_eq!(e1, EmployeeId::new(1));
    assert_eq!(m2, MemberId::new(2));
}

/// Generated card numbers are unique across many issuances
#[test]
fn test_generated_numbers_are_unique() {
    let mut desk = desk();
    let id = desk.register_member(NewMember::new("John", "Doe").with_phone("555-0100")).unwrap();
    for _ in 0..50 {
        desk.issue_member_card(id, None, None).unwrap();
    }
    assert_eq!(desk.cards().len(), 50);
    assert_eq!(desk.cards().cards_for_holder("John Doe").len(), 50);
}

/// A holder may carry several cards; the registry filters by validity
#[test]
fn test_valid_and_expired_queries() {
    let mut desk = desk();
    let id = desk.register_member(NewMember::new("John", "Doe").with_phone("555-0100")).unwrap();
    let yesterday = today().checked_sub_days(Days::new(1)).unwrap();

    desk.issue_member_card(id, Some("MEM00001".to_string()), None).unwrap();
    desk.issue_member_card(id, Some("MEM00002".to_string()), Some(yesterday)).unwrap();
    desk.issue_member_card(id, Some("MEM00003".to_string()), None).unwrap();
    desk.cards_mut().revoke_card("MEM00003").unwrap();

    let valid: Vec<&str> = desk.cards().valid_cards().iter().map(|c| c.card_number()).collect();
    assert_eq!(valid, vec!["MEM00001"]);
    let expired: Vec<&str> = desk.cards().expired_cards().iter().map(|c| c.card_number()).collect();
    assert_eq!(expired, vec!["MEM00002"]);
}

/// Door checks grant valid cards and deny the rest, recording every attempt
#[test]
fn test_access_decisions() {
    let mut desk = desk();
    let id = desk.hire_employee(trainer("Jane", "Smith")).unwrap();
    let number = desk.issue_employee_card(id, None, None).unwrap().card_number().to_string();

    let granted = desk.check_access(&number, "Staff Room").unwrap();
    assert!(granted.granted);

    desk.cards_mut().revoke_card(&number).unwrap();
    let denied = desk.check_access(&number, "Server Closet").unwrap();
    assert!(!denied.granted);
    assert_eq!(denied.denial, Some(DenialReason::Inactive));

    let status = desk.card_status(&number).unwrap();
    assert_eq!(status.last_access_location.as_deref(), Some("Server Closet"));
    assert!(!status.valid);

    assert!(desk.check_access("EMP-missing", "Lobby").unwrap_err().is_not_found());
}

/// Removing a member leaves previously issued cards untouched
#[test]
fn test_cards_outlive_member_records() {
    let mut desk = desk();
    let id = desk.register_member(NewMember::new("John", "Doe").with_email("john@doe.com")).unwrap();
    desk.issue_member_card(id, Some("MEM12345".to_string()), None).unwrap();

    desk.members_mut().remove_member(id).unwrap();

    let card = desk.cards().get_card("MEM12345").unwrap();
    assert_eq!(card.card_holder_name(), "John Doe");
    assert_eq!(card.card_holder_email(), Some("john@doe.com"));
    assert!(card.is_valid());
}

/// Members track dues independently of their cards
#[test]
fn test_overdue_members() {
    let mut desk = desk();
    let a = desk.register_member(NewMember::new("A", "One").with_phone("555-0100")).unwrap();
    desk.register_member(NewMember::new("B", "Two").with_phone("555-0100")).unwrap();

    desk.members_mut().mark_member_payment_overdue(a).unwrap();
    assert_eq!(desk.members().overdue_payment_count(), 1);

    desk.members_mut().record_member_payment(a).unwrap();
    assert_eq!(desk.members().overdue_payment_count(), 0);
}

/// Custom prefixes flow from configuration into generated numbers
#[test]
fn test_configured_prefixes() {
    let config = FacilityConfig {
        member_card_prefix: "GYM".to_string(),
        employee_card_prefix: "STF".to_string(),
        card_number_digits: 7,
        seed: Some(1),
        ..FacilityConfig::default()
    };
    config.validate().unwrap();

    let mut desk = AccessDesk::new(config);
    let m = desk.register_member(NewMember::new("John", "Doe").with_phone("555-0100")).unwrap();
    let e = desk.hire_employee(trainer("Jane", "Smith")).unwrap();

    let member_number = desk.issue_member_card(m, None, None).unwrap().card_number().to_string();
    let employee_number = desk.issue_employee_card(e, None, None).unwrap().card_number().to_string();

    assert!(member_number.starts_with("GYM"));
    assert_eq!(member_number.len(), 10);
    assert!(employee_number.starts_with("STF"));
}
