//! Record identifier types for the facility registries
//!
//! Members and employees are keyed by small integers handed out by the registry
//! that owns them. The newtypes keep the two number spaces from being mixed up.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Identifier of a member record, assigned by a [`MemberRegistry`](crate::registry::MemberRegistry)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberId(pub u32);

impl MemberId {
    /// Wrap a raw member number
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw member number
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MBR_{}", self.0)
    }
}

impl Serialize for MemberId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for MemberId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let raw = s.strip_prefix("MBR_").unwrap_or(&s);
        raw.parse::<u32>().map(MemberId).map_err(serde::de::Error::custom)
    }
}

/// Identifier of an employee record, assigned by an [`EmployeeRegistry`](crate::registry::EmployeeRegistry)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EmployeeId(pub u32);

impl EmployeeId {
    /// Wrap a raw employee number
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw employee number
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EMP_{}", self.0)
    }
}

impl Serialize for EmployeeId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for EmployeeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let raw = s.strip_prefix("EMP_").unwrap_or(&s);
        raw.parse::<u32>().map(EmployeeId).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_id_display() {
        assert_eq!(MemberId::new(1).to_string(), "MBR_1");
        assert_eq!(MemberId::new(42).to_string(), "MBR_42");
    }

    #[test]
    fn test_employee_id_display() {
        assert_eq!(EmployeeId::new(7).to_string(), "EMP_7");
    }

    #[test]
    fn test_id_serialization() {
        let member_json = serde_json::to_string(&MemberId::new(3)).unwrap();
        assert_eq!(member_json, "\"MBR_3\"");
        let member: MemberId = serde_json::from_str(&member_json).unwrap();
        assert_eq!(member, MemberId::new(3));

        let employee_json = serde_json::to_string(&EmployeeId::new(9)).unwrap();
        assert_eq!(employee_json, "\"EMP_9\"");
        let employee: EmployeeId = serde_json::from_str(&employee_json).unwrap();
        assert_eq!(employee, EmployeeId::new(9));
    }

    #[test]
    fn test_id_deserialization_without_prefix() {
        let member: MemberId = serde_json::from_str("\"12\"").unwrap();
        assert_eq!(member.value(), 12);

        let bad: Result<EmployeeId, _> = serde_json::from_str("\"EMP_abc\"");
        assert!(bad.is_err());
    }

    #[test]
    fn test_id_ordering() {
        assert!(MemberId::new(1) < MemberId::new(2));
        assert!(EmployeeId::new(10) > EmployeeId::new(9));
    }
}
