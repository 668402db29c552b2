//! In-memory registries for members, employees and keycards
//!
//! # Overview
//!
//! - **MemberRegistry**: members keyed by auto-incrementing id, with search and dues tracking
//! - **EmployeeRegistry**: employees keyed by auto-incrementing id, with department search
//! - **KeyCardRegistry**: issued cards keyed by card number; enforces uniqueness
//! - **RegistryError**: not-found, duplicate and validation errors
//!
//! Each registry owns its id counter. Nothing here is shared or persisted.
//!
//! # Usage Example
//!
//! ```rust
//! use facility_keycard::registry::*;
//!
//! let mut members = MemberRegistry::new();
//! let mut cards = KeyCardRegistry::new();
//!
//! let member = members.add_member(NewMember::new("John", "Doe").with_email("john@doe.com")).unwrap();
//! cards.issue_card("MEM12345", member, None).unwrap();
//!
//! let decision = cards.record_access("MEM12345", "Main Entrance").unwrap();
//! assert!(decision.granted);
//! ```

pub mod card_registry;
pub mod employee_registry;
pub mod error;
pub mod member_registry;

pub use card_registry::{AccessDecision, KeyCardRegistry};
pub use employee_registry::EmployeeRegistry;
pub use error::{RegistryError, RegistryResult};
pub use member_registry::{MemberRegistry, MemberUpdate, NewMember};
