//! Enumeration types for the facility records
//!
//! This module contains the enumerations shared by identity records, keycards and
//! configuration: holder kinds, membership and staffing states, and output formats.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of identity a keycard is issued for
///
/// A card copies this from its holder at issuance and never changes it afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HolderKind {
    /// A paying facility member
    Member,
    /// A member of staff
    Employee,
}

impl fmt::Display for HolderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HolderKind::Member => write!(f, "Member"),
            HolderKind::Employee => write!(f, "Employee"),
        }
    }
}

impl FromStr for HolderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "member" | "mem" => Ok(HolderKind::Member),
            "employee" | "emp" | "staff" => Ok(HolderKind::Employee),
            _ => Err(format!("Unknown holder kind: {}", s)),
        }
    }
}

/// Tier of a membership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MembershipType {
    /// Entry-level membership
    #[default]
    Basic,
    /// Premium membership
    Premium,
    /// VIP membership
    Vip,
}

impl fmt::Display for MembershipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MembershipType::Basic => write!(f, "Basic"),
            MembershipType::Premium => write!(f, "Premium"),
            MembershipType::Vip => write!(f, "VIP"),
        }
    }
}

impl FromStr for MembershipType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(MembershipType::Basic),
            "premium" => Ok(MembershipType::Premium),
            "vip" => Ok(MembershipType::Vip),
            _ => Err(format!("Unknown membership type: {}", s)),
        }
    }
}

/// Whether a membership is currently in good standing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MembershipStatus {
    /// Membership is current
    #[default]
    Active,
    /// Membership is suspended or lapsed
    Inactive,
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MembershipStatus::Active => write!(f, "Active"),
            MembershipStatus::Inactive => write!(f, "Inactive"),
        }
    }
}

impl FromStr for MembershipStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(MembershipStatus::Active),
            "inactive" => Ok(MembershipStatus::Inactive),
            _ => Err(format!("Unknown membership status: {}", s)),
        }
    }
}

/// How a member pays their dues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentOption {
    /// Cash at the front desk
    #[default]
    Cash,
    /// Credit card
    CreditCard,
    /// Debit card
    DebitCard,
    /// Direct bank transfer
    BankTransfer,
}

impl fmt::Display for PaymentOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentOption::Cash => write!(f, "Cash"),
            PaymentOption::CreditCard => write!(f, "Credit Card"),
            PaymentOption::DebitCard => write!(f, "Debit Card"),
            PaymentOption::BankTransfer => write!(f, "Bank Transfer"),
        }
    }
}

impl FromStr for PaymentOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['_', '-'], " ").as_str() {
            "cash" => Ok(PaymentOption::Cash),
            "credit card" | "creditcard" | "credit" => Ok(PaymentOption::CreditCard),
            "debit card" | "debitcard" | "debit" => Ok(PaymentOption::DebitCard),
            "bank transfer" | "banktransfer" | "bank" => Ok(PaymentOption::BankTransfer),
            _ => Err(format!("Unknown payment option: {}", s)),
        }
    }
}

/// Employment state of a staff member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WorkStatus {
    /// Currently working
    #[default]
    Active,
    /// Temporarily away
    OnLeave,
    /// No longer employed
    Terminated,
}

impl fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkStatus::Active => write!(f, "Active"),
            WorkStatus::OnLeave => write!(f, "On Leave"),
            WorkStatus::Terminated => write!(f, "Terminated"),
        }
    }
}

impl FromStr for WorkStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['_', '-'], " ").as_str() {
            "active" => Ok(WorkStatus::Active),
            "on leave" | "onleave" | "leave" => Ok(WorkStatus::OnLeave),
            "terminated" => Ok(WorkStatus::Terminated),
            _ => Err(format!("Unknown work status: {}", s)),
        }
    }
}

/// Output format options for the command line front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    /// JSON documents, one per card
    Json,
    /// Human readable lines
    Text,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Text => write!(f, "Text"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" | "txt" => Ok(OutputFormat::Text),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}
