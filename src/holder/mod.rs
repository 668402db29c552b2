//! Identity records that keycards are issued for
//!
//! # Overview
//!
//! - **IdentityHolder**: the capability a keycard depends on (display name, contact, kind)
//! - **HolderSnapshot**: the identity values a card captures at issuance
//! - **Member**: a paying customer with membership tier, status and dues tracking
//! - **Employee**: a member of staff with department, position and work status
//!
//! # Usage Example
//!
//! ```rust
//! use facility_keycard::holder::*;
//! use facility_keycard::types::*;
//!
//! let member = Member::new(MemberId::new(1), "John", "Doe", None, Some("555-1234".to_string()));
//! let snapshot = member.snapshot();
//!
//! assert_eq!(snapshot.display_name, "John Doe");
//! assert_eq!(snapshot.kind, HolderKind::Member);
//! ```

pub mod employee;
pub mod identity;
pub mod member;

pub use employee::{Employee, EmployeeDetails};
pub use identity::{HolderSnapshot, IdentityHolder};
pub use member::Member;
