//! In-memory registry of facility members
//!
//! Ids are handed out from a counter owned by the registry instance, starting at 1.
//! Removing a member never frees its id; only [`MemberRegistry::clear`] resets the
//! counter.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::holder::Member;
use crate::registry::error::{RegistryError, RegistryResult};
use crate::types::{MemberId, MembershipStatus, MembershipType, PaymentOption};

/// Application for a new membership
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewMember {
    /// First name (required)
    pub first_name: String,
    /// Last name (required)
    pub last_name: String,
    /// Contact email; email or phone is required
    pub email: Option<String>,
    /// Contact phone; email or phone is required
    pub phone_number: Option<String>,
    /// Membership tier
    pub membership_type: MembershipType,
    /// Payment method
    pub payment_option: PaymentOption,
    /// Initial standing
    pub membership_status: MembershipStatus,
}

impl NewMember {
    /// Start an application with defaults for everything but the name
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self { first_name: first_name.into(), last_name: last_name.into(), ..Default::default() }
    }

    /// Set the email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the phone number
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone_number = Some(phone.into());
        self
    }

    /// Set the membership tier
    pub fn with_type(mut self, membership_type: MembershipType) -> Self {
        self.membership_type = membership_type;
        self
    }

    /// Set the payment method
    pub fn with_payment(mut self, payment_option: PaymentOption) -> Self {
        self.payment_option = payment_option;
        self
    }

    /// Set the initial standing
    pub fn with_status(mut self, membership_status: MembershipStatus) -> Self {
        self.membership_status = membership_status;
        self
    }
}

/// Partial update of a member; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberUpdate {
    /// New first name; blank values are ignored
    pub first_name: Option<String>,
    /// New last name; blank values are ignored
    pub last_name: Option<String>,
    /// New email; a blank value clears it
    pub email: Option<String>,
    /// New phone; a blank value clears it
    pub phone_number: Option<String>,
    /// New tier
    pub membership_type: Option<MembershipType>,
    /// New payment method
    pub payment_option: Option<PaymentOption>,
    /// New standing
    pub membership_status: Option<MembershipStatus>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Registry of members keyed by id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberRegistry {
    members: BTreeMap<MemberId, Member>,
    next_member_id: u32,
}

impl MemberRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self { members: BTreeMap::new(), next_member_id: 1 }
    }

    /// Add a member
    ///
    /// # Errors
    /// `InvalidArgument` when a name is blank, or when neither email nor phone is given.
    pub fn add_member(&mut self, application: NewMember) -> RegistryResult<&Member> {
        if application.first_name.trim().is_empty() {
            warn!(component = "registry", "Rejected member without first name");
            return Err(RegistryError::invalid_argument("First name is required"));
        }
        if application.last_name.trim().is_empty() {
            warn!(component = "registry", "Rejected member without last name");
            return Err(RegistryError::invalid_argument("Last name is required"));
        }

        let email = non_blank(application.email);
        let phone_number = non_blank(application.phone_number);
        if email.is_none() && phone_number.is_none() {
            warn!(component = "registry", "Rejected member without contact details");
            return Err(RegistryError::invalid_argument(
                "Either email or phone number must be provided",
            ));
        }

        let member_id = MemberId::new(self.next_member_id);
        self.next_member_id += 1;

        let mut member = Member::new(
            member_id,
            application.first_name,
            application.last_name,
            email,
            phone_number,
        );
        member.membership_type = application.membership_type;
        member.payment_option = application.payment_option;
        member.membership_status = application.membership_status;

        info!(
            component = "registry",
            member_id = member_id.value(),
            name = member.full_name().as_str(),
            "Member added"
        );
        Ok(&*self.members.entry(member_id).or_insert(member))
    }

    /// Add a member from a single contact string
    ///
    /// A contact containing `@` is taken as an email, anything else as a phone number.
    pub fn add_member_with_contact(
        &mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        contact: &str,
    ) -> RegistryResult<&Member> {
        let application = NewMember::new(first_name, last_name);
        let application = if contact.contains('@') {
            application.with_email(contact)
        } else {
            application.with_phone(contact)
        };
        self.add_member(application)
    }

    /// Apply a partial update
    pub fn update_member(&mut self, member_id: MemberId, update: MemberUpdate) -> RegistryResult<&Member> {
        let member = self.get_member_mut(member_id)?;

        if let Some(first_name) = non_blank(update.first_name) {
            member.first_name = first_name;
        }
        if let Some(last_name) = non_blank(update.last_name) {
            member.last_name = last_name;
        }
        if let Some(email) = update.email {
            member.email = non_blank(Some(email));
        }
        if let Some(phone_number) = update.phone_number {
            member.phone_number = non_blank(Some(phone_number));
        }
        if let Some(membership_type) = update.membership_type {
            member.membership_type = membership_type;
        }
        if let Some(payment_option) = update.payment_option {
            member.payment_option = payment_option;
        }
        if let Some(membership_status) = update.membership_status {
            member.membership_status = membership_status;
        }

        info!(component = "registry", member_id = member_id.value(), "Member updated");
        Ok(&*member)
    }

    /// Remove a member, returning the removed record
    pub fn remove_member(&mut self, member_id: MemberId) -> RegistryResult<Member> {
        let removed =
            self.members.remove(&member_id).ok_or(RegistryError::MemberNotFound(member_id))?;
        info!(component = "registry", member_id = member_id.value(), "Member removed");
        Ok(removed)
    }

    /// Look up a member
    pub fn find_member(&self, member_id: MemberId) -> Option<&Member> {
        self.members.get(&member_id)
    }

    /// Look up a member, failing if absent
    pub fn get_member(&self, member_id: MemberId) -> RegistryResult<&Member> {
        self.find_member(member_id).ok_or(RegistryError::MemberNotFound(member_id))
    }

    /// Look up a member for modification, failing if absent
    pub fn get_member_mut(&mut self, member_id: MemberId) -> RegistryResult<&mut Member> {
        self.members.get_mut(&member_id).ok_or(RegistryError::MemberNotFound(member_id))
    }

    /// Members whose first, last or full name contains `query`, ignoring case
    ///
    /// A blank query matches nobody.
    pub fn find_members_by_name(&self, query: &str) -> Vec<&Member> {
        let term = query.trim().to_lowercase();
        if term.is_empty() {
            return Vec::new();
        }

        let results: Vec<&Member> = self
            .members
            .values()
            .filter(|member| {
                member.first_name.to_lowercase().contains(&term)
                    || member.last_name.to_lowercase().contains(&term)
                    || member.full_name().to_lowercase().contains(&term)
            })
            .collect();

        debug!(component = "registry", query, matches = results.len(), "Member name search");
        results
    }

    /// All members in id order
    pub fn all_members(&self) -> Vec<&Member> {
        self.members.values().collect()
    }

    /// Members in good standing
    pub fn active_members(&self) -> Vec<&Member> {
        self.members_with_status(MembershipStatus::Active)
    }

    /// Members whose membership is inactive
    pub fn inactive_members(&self) -> Vec<&Member> {
        self.members_with_status(MembershipStatus::Inactive)
    }

    fn members_with_status(&self, status: MembershipStatus) -> Vec<&Member> {
        self.members.values().filter(|m| m.membership_status == status).collect()
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the registry holds no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Set a member's standing to active
    pub fn activate_member(&mut self, member_id: MemberId) -> RegistryResult<()> {
        self.get_member_mut(member_id)?.activate();
        info!(component = "registry", member_id = member_id.value(), "Member activated");
        Ok(())
    }

    /// Set a member's standing to inactive
    pub fn deactivate_member(&mut self, member_id: MemberId) -> RegistryResult<()> {
        self.get_member_mut(member_id)?.deactivate();
        info!(component = "registry", member_id = member_id.value(), "Member deactivated");
        Ok(())
    }

    /// Members with overdue dues
    pub fn members_with_overdue_payments(&self) -> Vec<&Member> {
        self.members.values().filter(|m| m.is_payment_overdue()).collect()
    }

    /// Count of members with overdue dues
    pub fn overdue_payment_count(&self) -> usize {
        self.members.values().filter(|m| m.is_payment_overdue()).count()
    }

    /// Record a payment for a member
    pub fn record_member_payment(&mut self, member_id: MemberId) -> RegistryResult<()> {
        self.get_member_mut(member_id)?.record_payment();
        info!(component = "registry", member_id = member_id.value(), "Payment recorded");
        Ok(())
    }

    /// Flag a member's dues as overdue
    pub fn mark_member_payment_overdue(&mut self, member_id: MemberId) -> RegistryResult<()> {
        self.get_member_mut(member_id)?.mark_payment_overdue();
        info!(component = "registry", member_id = member_id.value(), "Payment marked overdue");
        Ok(())
    }

    /// Remove every member and restart ids at 1
    pub fn clear(&mut self) {
        let removed = self.members.len();
        self.members.clear();
        self.next_member_id = 1;
        warn!(component = "registry", removed, "Member registry cleared");
    }
}

impl Default for MemberRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn john() -> NewMember {
        NewMember::new("John", "Doe").with_email("john.doe@example.com").with_phone("555-1234")
    }

    #[test]
    fn test_add_member() {
        let mut registry = MemberRegistry::new();
        let member = registry.add_member(john()).unwrap();

        assert_eq!(member.member_id, MemberId::new(1));
        assert_eq!(member.first_name, "John");
        assert_eq!(member.email.as_deref(), Some("john.doe@example.com"));
        assert_eq!(member.membership_type, MembershipType::Basic);
        assert_eq!(member.payment_option, PaymentOption::Cash);
        assert_eq!(member.membership_status, MembershipStatus::Active);
    }

    #[test]
    fn test_add_member_validation() {
        let mut registry = MemberRegistry::new();

        let no_first = NewMember::new("", "Doe").with_email("a@b.com");
        assert!(matches!(registry.add_member(no_first), Err(RegistryError::InvalidArgument(_))));

        let no_last = NewMember::new("John", "  ").with_email("a@b.com");
        assert!(registry.add_member(no_last).is_err());

        let no_contact = NewMember::new("John", "Doe").with_email("").with_phone(" ");
        assert_eq!(
            registry.add_member(no_contact).unwrap_err(),
            RegistryError::invalid_argument("Either email or phone number must be provided")
        );

        // Failed additions do not consume ids
        let member = registry.add_member(john()).unwrap();
        assert_eq!(member.member_id, MemberId::new(1));
    }

    #[test]
    fn test_add_member_with_contact() {
        let mut registry = MemberRegistry::new();

        let with_email = registry.add_member_with_contact("Jane", "Doe", "jane@example.com").unwrap();
        assert_eq!(with_email.email.as_deref(), Some("jane@example.com"));
        assert!(with_email.phone_number.is_none());

        let with_phone = registry.add_member_with_contact("Bob", "Smith", "555-9876").unwrap();
        assert!(with_phone.email.is_none());
        assert_eq!(with_phone.phone_number.as_deref(), Some("555-9876"));
    }

    #[test]
    fn test_update_member() {
        let mut registry = MemberRegistry::new();
        let id = registry.add_member(john()).unwrap().member_id;

        let update = MemberUpdate {
            first_name: Some("Jane".to_string()),
            last_name: Some("".to_string()),
            membership_type: Some(MembershipType::Premium),
            membership_status: Some(MembershipStatus::Inactive),
            ..Default::default()
        };
        let updated = registry.update_member(id, update).unwrap();

        assert_eq!(updated.first_name, "Jane");
        assert_eq!(updated.last_name, "Doe");
        assert_eq!(updated.membership_type, MembershipType::Premium);
        assert_eq!(updated.membership_status, MembershipStatus::Inactive);
        assert_eq!(updated.email.as_deref(), Some("john.doe@example.com"));

        let missing = registry.update_member(MemberId::new(999), MemberUpdate::default());
        assert_eq!(missing.unwrap_err(), RegistryError::MemberNotFound(MemberId::new(999)));
    }

    #[test]
    fn test_remove_member_never_reuses_id() {
        let mut registry = MemberRegistry::new();
        let id = registry.add_member(john()).unwrap().member_id;

        assert_eq!(registry.remove_member(id).unwrap().first_name, "John");
        assert!(registry.remove_member(id).unwrap_err().is_not_found());

        let next = registry.add_member(john()).unwrap();
        assert_eq!(next.member_id, MemberId::new(2));
    }

    #[test]
    fn test_find_members_by_name() {
        let mut registry = MemberRegistry::new();
        registry.add_member(john()).unwrap();
        registry.add_member(NewMember::new("Jane", "Doe").with_phone("1")).unwrap();
        registry.add_member(NewMember::new("Bob", "Johnson").with_phone("2")).unwrap();

        assert_eq!(registry.find_members_by_name("jane").len(), 1);
        assert_eq!(registry.find_members_by_name("DOE").len(), 2);
        assert_eq!(registry.find_members_by_name("john").len(), 2);
        assert_eq!(registry.find_members_by_name("n d").len(), 1);
        assert!(registry.find_members_by_name("zed").is_empty());
        assert!(registry.find_members_by_name("  ").is_empty());
    }

    #[test]
    fn test_status_filters_and_toggles() {
        let mut registry = MemberRegistry::new();
        let active = registry.add_member(john()).unwrap().member_id;
        let inactive = registry
            .add_member(
                NewMember::new("Jane", "Doe").with_phone("1").with_status(MembershipStatus::Inactive),
            )
            .unwrap()
            .member_id;

        assert_eq!(registry.active_members().len(), 1);
        assert_eq!(registry.inactive_members()[0].member_id, inactive);

        registry.activate_member(inactive).unwrap();
        registry.deactivate_member(active).unwrap();
        assert_eq!(registry.active_members()[0].member_id, inactive);
        assert!(registry.activate_member(MemberId::new(999)).is_err());
    }

    #[test]
    fn test_overdue_payments() {
        let mut registry = MemberRegistry::new();
        let first = registry.add_member(john()).unwrap().member_id;
        registry.add_member(NewMember::new("Jane", "Doe").with_phone("1")).unwrap();

        registry.mark_member_payment_overdue(first).unwrap();
        assert_eq!(registry.overdue_payment_count(), 1);
        assert_eq!(registry.members_with_overdue_payments()[0].member_id, first);

        registry.record_member_payment(first).unwrap();
        assert_eq!(registry.overdue_payment_count(), 0);
    }

    #[test]
    fn test_clear_resets_counter() {
        let mut registry = MemberRegistry::new();
        assert!(registry.is_empty());
        registry.add_member(john()).unwrap();
        registry.add_member(john()).unwrap();
        assert_eq!(registry.len(), 2);

        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.add_member(john()).unwrap().member_id, MemberId::new(1));
    }
}
