//! Front desk that ties holders, card numbers and keycards together
//!
//! The [`AccessDesk`] owns every registry for a session along with the card number
//! generator. Issuing through the desk looks the holder up, picks an unused card
//! number for the holder's kind and applies the configured default expiration.

use chrono::{Days, NaiveDate};
use serde::Serialize;
use tracing::{info, instrument};

use crate::holder::{EmployeeDetails, IdentityHolder};
use crate::keycard::{shift_months, today, CardNumberGenerator, CardStatus, KeyCard};
use crate::registry::{
    AccessDecision, EmployeeRegistry, KeyCardRegistry, MemberRegistry, NewMember, RegistryError,
    RegistryResult,
};
use crate::types::{EmployeeId, FacilityConfig, HolderKind, MemberId, WorkStatus};

/// Everything the scripted lifecycle walk produced
#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    /// Door checks in the order they were made
    pub decisions: Vec<AccessDecision>,
    /// Status of every card at the end of the walk
    pub statuses: Vec<CardStatus>,
}

/// Session state for issuing and checking keycards
#[derive(Debug)]
pub struct AccessDesk {
    config: FacilityConfig,
    members: MemberRegistry,
    employees: EmployeeRegistry,
    cards: KeyCardRegistry,
    generator: CardNumberGenerator,
}

impl AccessDesk {
    /// Open a desk with empty registries
    #[instrument(skip(config), fields(seed = ?config.seed))]
    pub fn new(config: FacilityConfig) -> Self {
        let generator = CardNumberGenerator::new(&config);
        info!(component = "desk", "Access desk opened");
        Self {
            config,
            members: MemberRegistry::new(),
            employees: EmployeeRegistry::new(),
            cards: KeyCardRegistry::new(),
            generator,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &FacilityConfig {
        &self.config
    }

    /// Member records
    pub fn members(&self) -> &MemberRegistry {
        &self.members
    }

    /// Member records, mutable
    pub fn members_mut(&mut self) -> &mut MemberRegistry {
        &mut self.members
    }

    /// Employee records
    pub fn employees(&self) -> &EmployeeRegistry {
        &self.employees
    }

    /// Employee records, mutable
    pub fn employees_mut(&mut self) -> &mut EmployeeRegistry {
        &mut self.employees
    }

    /// Issued cards
    pub fn cards(&self) -> &KeyCardRegistry {
        &self.cards
    }

    /// Issued cards, mutable
    pub fn cards_mut(&mut self) -> &mut KeyCardRegistry {
        &mut self.cards
    }

    /// Register a member and return the assigned id
    pub fn register_member(&mut self, application: NewMember) -> RegistryResult<MemberId> {
        Ok(self.members.add_member(application)?.member_id)
    }

    /// Hire an employee and return the assigned id
    pub fn hire_employee(&mut self, details: EmployeeDetails) -> RegistryResult<EmployeeId> {
        Ok(self.employees.add_employee(details)?.employee_id)
    }

    /// Issue a card to a registered member, dated today
    ///
    /// A missing `card_number` is generated from the member prefix. A missing
    /// expiration defaults to one year after issuance.
    pub fn issue_member_card(
        &mut self,
        member_id: MemberId,
        card_number: Option<String>,
        expiration_date: Option<NaiveDate>,
    ) -> RegistryResult<&KeyCard> {
        self.issue_member_card_on(member_id, card_number, expiration_date, today())
    }

    /// Issue a card to a registered member as if today were `issue_date`
    pub fn issue_member_card_on(
        &mut self,
        member_id: MemberId,
        card_number: Option<String>,
        expiration_date: Option<NaiveDate>,
        issue_date: NaiveDate,
    ) -> RegistryResult<&KeyCard> {
        let member = self.members.get_member(member_id)?;
        let number = allocate_number(&mut self.generator, &self.cards, member.holder_kind(), card_number)?;
        self.cards.issue_card_on(number, member, expiration_date, issue_date)
    }

    /// Issue a card to a registered employee, dated today
    ///
    /// A missing expiration defaults to the configured employee validity period.
    pub fn issue_employee_card(
        &mut self,
        employee_id: EmployeeId,
        card_number: Option<String>,
        expiration_date: Option<NaiveDate>,
    ) -> RegistryResult<&KeyCard> {
        self.issue_employee_card_on(employee_id, card_number, expiration_date, today())
    }

    /// Issue a card to a registered employee as if today were `issue_date`
    pub fn issue_employee_card_on(
        &mut self,
        employee_id: EmployeeId,
        card_number: Option<String>,
        expiration_date: Option<NaiveDate>,
        issue_date: NaiveDate,
    ) -> RegistryResult<&KeyCard> {
        let expiration_date = match expiration_date {
            Some(date) => date,
            None => self.default_employee_expiration(issue_date)?,
        };

        let employee = self.employees.get_employee(employee_id)?;
        let number =
            allocate_number(&mut self.generator, &self.cards, employee.holder_kind(), card_number)?;
        self.cards.issue_card_on(number, employee, Some(expiration_date), issue_date)
    }

    fn default_employee_expiration(&self, issue_date: NaiveDate) -> RegistryResult<NaiveDate> {
        let months = self
            .config
            .employee_card_validity_years
            .checked_mul(12)
            .and_then(|m| i32::try_from(m).ok())
            .ok_or_else(|| RegistryError::invalid_argument("Employee card validity is too long"))?;
        shift_months(issue_date, months)
            .ok_or_else(|| RegistryError::invalid_argument("Employee card expiration out of range"))
    }

    /// Present a card at a location now
    pub fn check_access(&mut self, card_number: &str, location: &str) -> RegistryResult<AccessDecision> {
        self.cards.record_access(card_number, location)
    }

    /// Snapshot of a card's state today
    pub fn card_status(&self, card_number: &str) -> RegistryResult<CardStatus> {
        self.card_status_on(card_number, today())
    }

    /// Snapshot of a card's state on `date`
    pub fn card_status_on(&self, card_number: &str, date: NaiveDate) -> RegistryResult<CardStatus> {
        Ok(CardStatus::of(self.cards.get_card(card_number)?, date))
    }

    /// Snapshots of every issued card on `date`, in card number order
    pub fn all_statuses_on(&self, date: NaiveDate) -> Vec<CardStatus> {
        self.cards.all_cards().into_iter().map(|card| CardStatus::of(card, date)).collect()
    }

    /// Walk a member, an employee and a lapsed member through the card lifecycle
    ///
    /// Issues `MEM12345`, `EMP67890` and a generated member card that expired
    /// yesterday, then checks doors around a revoke, reinstate and 3-month extension.
    pub fn run_demo(&mut self) -> RegistryResult<DemoReport> {
        let issued_on = today();

        let john = self.register_member(
            NewMember::new("John", "Doe").with_email("john.doe@email.com").with_phone("555-0101"),
        )?;
        let jane = self.hire_employee(EmployeeDetails {
            first_name: "Jane".to_string(),
            last_name: "Smith".to_string(),
            email: Some("jane.smith@fitness.com".to_string()),
            phone_number: Some("555-0199".to_string()),
            department: "Front Desk".to_string(),
            position: "Manager".to_string(),
            salary: 52_000.0,
            hire_date: issued_on,
            work_status: WorkStatus::Active,
        })?;
        let lapsed = self.register_member(NewMember::new("Sam", "Rivera").with_phone("555-0142"))?;

        self.issue_member_card(john, Some("MEM12345".to_string()), None)?;
        self.issue_employee_card(jane, Some("EMP67890".to_string()), None)?;
        let yesterday = issued_on
            .checked_sub_days(Days::new(1))
            .ok_or_else(|| RegistryError::invalid_argument("Issue date out of range"))?;
        let lapsed_number =
            self.issue_member_card(lapsed, None, Some(yesterday))?.card_number().to_string();

        let mut decisions = vec![
            self.check_access("MEM12345", "Main Entrance")?,
            self.check_access("EMP67890", "Staff Room")?,
            self.check_access(&lapsed_number, "Main Entrance")?,
        ];

        self.cards.revoke_card("MEM12345")?;
        decisions.push(self.check_access("MEM12345", "Gym Floor")?);

        self.cards.reinstate_card("MEM12345")?;
        self.cards.extend_card("MEM12345", 3)?;
        decisions.push(self.check_access("MEM12345", "Pool")?);

        info!(component = "desk", checks = decisions.len(), "Demo walk finished");
        Ok(DemoReport { decisions, statuses: self.all_statuses_on(today()) })
    }
}

/// Pick the requested card number, or generate one the registry has not issued
fn allocate_number(
    generator: &mut CardNumberGenerator,
    cards: &KeyCardRegistry,
    kind: HolderKind,
    requested: Option<String>,
) -> RegistryResult<String> {
    match requested {
        Some(number) => Ok(number),
        None => generator
            .next_number(kind, |candidate| cards.contains(candidate))
            .ok_or_else(|| RegistryError::CardNumbersExhausted(generator.prefix(kind).to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keycard::DenialReason;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn seeded_desk() -> AccessDesk {
        AccessDesk::new(FacilityConfig { seed: Some(7), ..FacilityConfig::default() })
    }

    fn staff(first: &str, last: &str) -> EmployeeDetails {
        EmployeeDetails {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: Some(format!("{}@fitness.com", first.to_lowercase())),
            phone_number: None,
            department: "Front Desk".to_string(),
            position: "Associate".to_string(),
            salary: 32_000.0,
            hire_date: date(2024, 5, 1),
            work_status: WorkStatus::Active,
        }
    }

    #[test]
    fn test_member_card_uses_member_prefix_and_one_year_default() {
        let mut desk = seeded_desk();
        let id = desk.register_member(NewMember::new("John", "Doe").with_phone("555-0100")).unwrap();

        let card = desk.issue_member_card_on(id, None, None, date(2025, 1, 15)).unwrap();
        assert!(card.card_number().starts_with("MEM"));
        assert!(card.is_member_card());
        assert_eq!(card.card_holder_name(), "John Doe");
        assert_eq!(card.expiration_date(), date(2026, 1, 15));
    }

    #[test]
    fn test_employee_card_uses_configured_validity() {
        let mut desk = seeded_desk();
        let id = desk.hire_employee(staff("Jane", "Smith")).unwrap();

        let card = desk.issue_employee_card_on(id, None, None, date(2025, 1, 15)).unwrap();
        assert!(card.card_number().starts_with("EMP"));
        assert!(card.is_employee_card());
        assert_eq!(card.card_holder_email(), Some("jane@fitness.com"));
        assert_eq!(card.expiration_date(), date(2027, 1, 15));
    }

    #[test]
    fn test_explicit_number_and_expiration_are_kept() {
        let mut desk = seeded_desk();
        let id = desk.hire_employee(staff("Jane", "Smith")).unwrap();

        let card = desk
            .issue_employee_card_on(id, Some("EMP67890".to_string()), Some(date(2025, 6, 30)), date(2025, 1, 1))
            .unwrap();
        assert_eq!(card.card_number(), "EMP67890");
        assert_eq!(card.expiration_date(), date(2025, 6, 30));

        let duplicate = desk.issue_employee_card(id, Some("EMP67890".to_string()), None);
        assert_eq!(duplicate.unwrap_err(), RegistryError::DuplicateCardNumber("EMP67890".to_string()));
    }

    #[test]
    fn test_unknown_holders_are_rejected() {
        let mut desk = seeded_desk();
        assert_eq!(
            desk.issue_member_card(MemberId::new(42), None, None).unwrap_err(),
            RegistryError::MemberNotFound(MemberId::new(42))
        );
        assert!(desk.issue_employee_card(EmployeeId::new(1), None, None).unwrap_err().is_not_found());
        assert!(desk.cards().is_empty());
    }

    #[test]
    fn test_exhausted_numbers() {
        let mut desk = AccessDesk::new(FacilityConfig {
            card_number_digits: 1,
            seed: Some(3),
            ..FacilityConfig::default()
        });
        let id = desk.register_member(NewMember::new("Ann", "Lee").with_phone("555-0100")).unwrap();
        for n in 0..10 {
            desk.issue_member_card(id, Some(format!("MEM{}", n)), None).unwrap();
        }

        let result = desk.issue_member_card(id, None, None);
        assert_eq!(result.unwrap_err(), RegistryError::CardNumbersExhausted("MEM".to_string()));
    }

    #[test]
    fn test_status_and_access() {
        let mut desk = seeded_desk();
        let id = desk.register_member(NewMember::new("John", "Doe").with_phone("555-0100")).unwrap();
        let number = desk.issue_member_card(id, None, None).unwrap().card_number().to_string();

        let decision = desk.check_access(&number, "Main Entrance").unwrap();
        assert!(decision.granted);

        let status = desk.card_status(&number).unwrap();
        assert!(status.valid);
        assert_eq!(status.last_access_location.as_deref(), Some("Main Entrance"));
        assert_eq!(desk.all_statuses_on(today()).len(), 1);
        assert!(desk.card_status("MEM-none").unwrap_err().is_not_found());
    }

    #[test]
    fn test_demo_walk_completes() {
        let mut desk = seeded_desk();
        let report = desk.run_demo().unwrap();

        let outcomes: Vec<Option<DenialReason>> = report.decisions.iter().map(|d| d.denial).collect();
        assert_eq!(
            outcomes,
            vec![None, None, Some(DenialReason::Expired), Some(DenialReason::Inactive), None]
        );
        assert_eq!(report.statuses.len(), 3);
        assert_eq!(desk.members().len(), 2);

        let john = desk.card_status("MEM12345").unwrap();
        assert!(john.valid);
        assert_eq!(john.last_access_location.as_deref(), Some("Pool"));
        let one_year = shift_months(today(), 12).unwrap();
        assert_eq!(john.expiration_date, shift_months(one_year, 3).unwrap());
    }

    #[test]
    fn test_unvalidated_digit_count_does_not_panic() {
        let mut desk = AccessDesk::new(FacilityConfig {
            card_number_digits: 20,
            ..FacilityConfig::default()
        });
        let id = desk.register_member(NewMember::new("Ann", "Lee").with_email("ann@lee.com")).unwrap();

        let result = desk.issue_member_card(id, None, None);
        assert_eq!(result.unwrap_err(), RegistryError::CardNumbersExhausted("MEM".to_string()));
        assert!(desk.issue_member_card(id, Some("MEM1".to_string()), None).is_ok());
    }
}
