//! The identity capability consumed by keycard issuance
//!
//! A keycard only needs a display name, optional contact details and the holder
//! kind. Anything that can provide those four values can be issued a card.

use serde::{Deserialize, Serialize};

use crate::types::HolderKind;

/// Capability of an identity record that a keycard can be issued for
///
/// `Member` and `Employee` both implement this. Issuance reads the values once
/// through [`IdentityHolder::snapshot`]; the card never refers back to the record.
pub trait IdentityHolder {
    /// Name printed on the card, normally "first last"
    fn display_name(&self) -> String;

    /// Contact email, if any
    fn email(&self) -> Option<&str>;

    /// Contact phone, if any
    fn phone(&self) -> Option<&str>;

    /// Whether this is a member or an employee
    fn holder_kind(&self) -> HolderKind;

    /// Capture the current identity values
    fn snapshot(&self) -> HolderSnapshot {
        HolderSnapshot {
            display_name: self.display_name(),
            email: non_blank(self.email()),
            phone: non_blank(self.phone()),
            kind: self.holder_kind(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).map(str::to_string)
}

/// Join first and last name the way every card displays them
pub fn join_name(first_name: &str, last_name: &str) -> String {
    format!("{} {}", first_name, last_name)
}

/// Identity values captured at the moment a card is issued
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolderSnapshot {
    /// Holder display name
    pub display_name: String,
    /// Holder email
    pub email: Option<String>,
    /// Holder phone
    pub phone: Option<String>,
    /// Holder kind
    pub kind: HolderKind,
}

impl HolderSnapshot {
    /// Build a snapshot directly from first and last name
    pub fn new(
        first_name: &str,
        last_name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        kind: HolderKind,
    ) -> Self {
        Self {
            display_name: join_name(first_name, last_name),
            email: non_blank(email),
            phone: non_blank(phone),
            kind,
        }
    }

    /// Placeholder holder for cards issued before the holder is known
    pub fn unknown() -> Self {
        Self { display_name: "Unknown".to_string(), email: None, phone: None, kind: HolderKind::Employee }
    }
}

impl IdentityHolder for HolderSnapshot {
    fn display_name(&self) -> String {
        self.display_name.clone()
    }

    fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    fn holder_kind(&self) -> HolderKind {
        self.kind
    }

    fn snapshot(&self) -> HolderSnapshot {
        self.clone()
    }
}
