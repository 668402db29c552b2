//! Keycard issuance, validity and access recording
//!
//! # Overview
//!
//! - **KeyCard**: the credential; owns the holder snapshot, dates, active flag and last access
//! - **CardStatus**: a serializable point-in-time view for presentation layers
//! - **CardNumberGenerator**: proposes `<prefix><digits>` card numbers
//! - **KeyCardError**: the single issuance error kind
//!
//! # Usage Example
//!
//! ```rust
//! use facility_keycard::holder::*;
//! use facility_keycard::keycard::*;
//! use facility_keycard::types::*;
//!
//! let member = Member::new(MemberId::new(1), "John", "Doe", None, None);
//! let mut card = KeyCard::issue("MEM12345", &member, None).unwrap();
//!
//! assert_eq!(card.card_holder_name(), "John Doe");
//! assert!(card.is_valid());
//!
//! card.deactivate();
//! card.record_access("Main Entrance");
//! assert!(!card.is_valid());
//! assert_eq!(card.last_access_location(), Some("Main Entrance"));
//! ```

pub mod error;
pub mod generator;
#[allow(clippy::module_inception)]
pub mod keycard;
pub mod status;

pub use error::{KeyCardError, KeyCardResult};
pub use generator::CardNumberGenerator;
pub use keycard::{shift_months, today, AccessRecord, DenialReason, KeyCard};
pub use status::CardStatus;
