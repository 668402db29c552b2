//! Core types and identifiers for the facility keycard system
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the crate.
//!
//! # Overview
//!
//! - **Identifiers**: registry-assigned integer ids for members and employees
//! - **Enums**: holder kinds, membership and staffing states, output formats
//! - **Configuration**: facility configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use facility_keycard::types::*;
//!
//! let member_id = MemberId::new(1);
//! assert_eq!(member_id.to_string(), "MBR_1");
//!
//! let kind: HolderKind = "employee".parse().unwrap();
//! assert_eq!(kind, HolderKind::Employee);
//!
//! let config = FacilityConfig { card_number_digits: 6, ..Default::default() };
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
