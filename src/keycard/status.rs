//! Point-in-time view of a keycard for presentation layers

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::keycard::keycard::{DenialReason, KeyCard};
use crate::types::HolderKind;

/// Plain values describing a card as of a given date
///
/// Everything is computed once when the status is built; unlike [`KeyCard::is_valid`]
/// it does not move with the clock afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardStatus {
    /// Card number
    pub card_number: String,
    /// Holder display name
    pub holder_name: String,
    /// Holder email
    pub holder_email: Option<String>,
    /// Holder phone
    pub holder_phone: Option<String>,
    /// Card kind
    pub card_type: HolderKind,
    /// Issue date
    pub issue_date: NaiveDate,
    /// Expiration date
    pub expiration_date: NaiveDate,
    /// Date the status was evaluated for
    pub evaluated_on: NaiveDate,
    /// Administrative flag
    pub active: bool,
    /// Whether the expiration date had passed
    pub expired: bool,
    /// Whether the card was usable
    pub valid: bool,
    /// Reason the card would be refused
    pub denial: Option<DenialReason>,
    /// Time of the last recorded access attempt
    pub last_access_time: Option<DateTime<Utc>>,
    /// Location of the last recorded access attempt
    pub last_access_location: Option<String>,
}

impl CardStatus {
    /// Capture the status of `card` as of `date`
    pub fn of(card: &KeyCard, date: NaiveDate) -> Self {
        Self {
            card_number: card.card_number().to_string(),
            holder_name: card.card_holder_name().to_string(),
            holder_email: card.card_holder_email().map(str::to_string),
            holder_phone: card.card_holder_phone().map(str::to_string),
            card_type: card.card_type(),
            issue_date: card.issue_date(),
            expiration_date: card.expiration_date(),
            evaluated_on: date,
            active: card.is_active(),
            expired: card.is_expired_on(date),
            valid: card.is_valid_on(date),
            denial: card.denial_reason_on(date),
            last_access_time: card.last_access_time(),
            last_access_location: card.last_access_location().map(str::to_string),
        }
    }
}
