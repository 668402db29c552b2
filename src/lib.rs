//! Facility Keycard
//!
//! Access keycards for a membership facility: cards issued to members and employees,
//! validity derived from activation state and expiration date, and a record of the
//! last access attempt made with each card.
//!
//! # Overview
//!
//! A [`KeyCard`] captures its holder's identity at issuance and carries no reference
//! back to the holder record. Anything implementing [`IdentityHolder`] can be issued a
//! card; [`Member`] and [`Employee`] are the two holder kinds the facility knows.
//!
//! ## Key Features
//!
//! - **Validity**: a card is valid when it is active and its expiration date has not passed
//! - **Lifecycle**: revoke, reinstate and extend cards without reissuing them
//! - **Access tracking**: every attempt is recorded, granted or not
//! - **Registries**: in-memory member, employee and card registries with unique card numbers
//! - **Configuration**: card number prefixes, digit counts and default validity periods
//!
//! ## Quick Start
//!
//! ```rust
//! use facility_keycard::*;
//!
//! let mut members = MemberRegistry::new();
//! let member = members.add_member_with_contact("John", "Doe", "john.doe@email.com")?;
//!
//! let mut card = KeyCard::issue("MEM12345", member, None)?;
//! assert!(card.is_valid());
//! assert!(card.is_member_card());
//!
//! card.record_access("Main Entrance");
//! card.deactivate();
//! assert!(!card.is_valid());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Identifiers, enums and configuration
//! - [`holder`]: The identity capability and the member and employee records
//! - [`keycard`]: The card itself, its status view and card number generation
//! - [`registry`]: In-memory registries and uniqueness enforcement
//! - [`desk`]: Session orchestration over the registries
//! - [`logging`]: Tracing subscriber setup
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Types     │◄───┤   Holder    │◄───┤   KeyCard   │
//! │ Identifiers │    │ Member      │    │ Status      │
//! │ Enums       │    │ Employee    │    │ Generator   │
//! │ Config      │    │ Identity    │    │             │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!                            ▲                   ▲
//!                            │                   │
//!                    ┌─────────────┐    ┌─────────────┐
//!                    │  Registry   │◄───┤    Desk     │
//!                    │ Members     │    │             │
//!                    │ Employees   │    │             │
//!                    │ Cards       │    │             │
//!                    └─────────────┘    └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

pub mod desk;
pub mod holder;
pub mod keycard;
pub mod logging;
pub mod registry;
pub mod types;

// Core types and identifiers
pub use types::{
    CliArgs, ConfigValidationError, EmployeeId, FacilityConfig, HolderKind, MemberId,
    MembershipStatus, MembershipType, OutputFormat, PaymentOption, WorkStatus,
};

// Holders
pub use holder::{Employee, EmployeeDetails, HolderSnapshot, IdentityHolder, Member};

// Keycards
pub use keycard::{
    AccessRecord, CardNumberGenerator, CardStatus, DenialReason, KeyCard, KeyCardError,
    KeyCardResult,
};

// Registries
pub use registry::{
    AccessDecision, EmployeeRegistry, KeyCardRegistry, MemberRegistry, MemberUpdate, NewMember,
    RegistryError, RegistryResult,
};

pub use desk::{AccessDesk, DemoReport};
pub use logging::LoggingConfig;
