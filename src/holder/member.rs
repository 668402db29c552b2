//! Member records
//!
//! This module contains the Member struct: a paying customer of the facility.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::holder::identity::{join_name, IdentityHolder};
use crate::keycard::today;
use crate::types::{HolderKind, MemberId, MembershipStatus, MembershipType, PaymentOption};

/// A facility member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Registry-assigned identifier
    pub member_id: MemberId,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Contact email
    pub email: Option<String>,
    /// Contact phone
    pub phone_number: Option<String>,
    /// Date the member joined
    pub membership_date: NaiveDate,
    /// Standing of the membership
    pub membership_status: MembershipStatus,
    /// Membership tier
    pub membership_type: MembershipType,
    /// How dues are paid
    pub payment_option: PaymentOption,
    /// Whether dues are overdue
    pub payment_overdue: bool,
}

impl Member {
    /// Create a new active member who joined today
    pub fn new(
        member_id: MemberId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: Option<String>,
        phone_number: Option<String>,
    ) -> Self {
        Self {
            member_id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email,
            phone_number,
            membership_date: today(),
            membership_status: MembershipStatus::Active,
            membership_type: MembershipType::Basic,
            payment_option: PaymentOption::Cash,
            payment_overdue: false,
        }
    }

    /// Full name, first then last
    pub fn full_name(&self) -> String {
        join_name(&self.first_name, &self.last_name)
    }

    /// Whether the membership is active
    pub fn is_active(&self) -> bool {
        self.membership_status == MembershipStatus::Active
    }

    /// Mark the membership active
    pub fn activate(&mut self) {
        self.membership_status = MembershipStatus::Active;
    }

    /// Mark the membership inactive
    pub fn deactivate(&mut self) {
        self.membership_status = MembershipStatus::Inactive;
    }

    /// Whole years between the membership date and `today`
    pub fn years_of_membership(&self, today: NaiveDate) -> u32 {
        today.years_since(self.membership_date).unwrap_or(0)
    }

    /// Record a payment, clearing any overdue flag
    pub fn record_payment(&mut self) {
        self.payment_overdue = false;
    }

    /// Flag dues as overdue
    pub fn mark_payment_overdue(&mut self) {
        self.payment_overdue = true;
    }

    /// Whether dues are overdue
    pub fn is_payment_overdue(&self) -> bool {
        self.payment_overdue
    }
}

impl IdentityHolder for Member {
    fn display_name(&self) -> String {
        self.full_name()
    }

    fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    fn phone(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }

    fn holder_kind(&self) -> HolderKind {
        HolderKind::Member
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn john() -> Member {
        Member::new(
            MemberId::new(1),
            "John",
            "Doe",
            Some("john.doe@email.com".to_string()),
            Some("555-1234".to_string()),
        )
    }

    #[test]
    fn test_new_member_defaults() {
        let member = john();
        assert_eq!(member.full_name(), "John Doe");
        assert!(member.is_active());
        assert_eq!(member.membership_type, MembershipType::Basic);
        assert_eq!(member.payment_option, PaymentOption::Cash);
        assert!(!member.is_payment_overdue());
        assert_eq!(member.membership_date, today());
    }

    #[test]
    fn test_activation_toggles_status() {
        let mut member = john();
        member.deactivate();
        assert_eq!(member.membership_status, MembershipStatus::Inactive);
        member.activate();
        assert!(member.is_active());
    }

    #[test]
    fn test_payment_tracking() {
        let mut member = john();
        member.mark_payment_overdue();
        assert!(member.is_payment_overdue());
        member.record_payment();
        assert!(!member.is_payment_overdue());
    }

    #[test]
    fn test_years_of_membership() {
        let mut member = john();
        member.membership_date = NaiveDate::from_ymd_opt(2020, 6, 15).unwrap();

        assert_eq!(member.years_of_membership(NaiveDate::from_ymd_opt(2023, 6, 14).unwrap()), 2);
        assert_eq!(member.years_of_membership(NaiveDate::from_ymd_opt(2023, 6, 15).unwrap()), 3);
        // A date before joining counts as zero years
        assert_eq!(member.years_of_membership(NaiveDate::from_ymd_opt(2019, 1, 1).unwrap()), 0);
    }

    #[test]
    fn test_identity_holder_view() {
        let member = john();
        let snapshot = member.snapshot();
        assert_eq!(snapshot.display_name, "John Doe");
        assert_eq!(snapshot.email.as_deref(), Some("john.doe@email.com"));
        assert_eq!(snapshot.phone.as_deref(), Some("555-1234"));
        assert_eq!(snapshot.kind, HolderKind::Member);
    }
}
