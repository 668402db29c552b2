//! The keycard credential and its lifecycle
//!
//! A card has two independent axes. `active` is the administrative switch, flipped
//! by [`KeyCard::activate`] and [`KeyCard::deactivate`]. Expiry is temporal and is
//! never stored: it is derived from the expiration date and the current date each
//! time it is asked for. A card is valid only when it is active and not expired.

use chrono::{DateTime, Local, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

use crate::card_event;
use crate::holder::{HolderSnapshot, IdentityHolder};
use crate::keycard::error::{KeyCardError, KeyCardResult};
use crate::types::HolderKind;

/// Today's date on the local clock
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Shift a date by a signed number of months, clamping to the end of the month
///
/// Returns `None` if the result falls outside the representable date range.
pub fn shift_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    }
}

/// Why a card check fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DenialReason {
    /// The card has been deactivated
    Inactive,
    /// The expiration date has passed
    Expired,
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenialReason::Inactive => write!(f, "Card Inactive"),
            DenialReason::Expired => write!(f, "Card Expired"),
        }
    }
}

/// The most recent access attempt recorded on a card
///
/// Time and location are kept together so one can never be set without the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRecord {
    /// When the attempt happened
    pub time: DateTime<Utc>,
    /// Where the attempt happened
    pub location: String,
}

/// An access credential issued to a member or employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyCard {
    card_number: String,
    holder: HolderSnapshot,
    issue_date: NaiveDate,
    expiration_date: NaiveDate,
    active: bool,
    last_access: Option<AccessRecord>,
}

impl KeyCard {
    /// Issue a new active card for `holder`, dated today
    ///
    /// When `expiration_date` is `None` the card expires one year after issuance.
    /// The holder's name, contact details and kind are copied; later edits to the
    /// holder record do not reach the card.
    ///
    /// # Errors
    /// [`KeyCardError::InvalidArgument`] if `card_number` is empty or blank.
    pub fn issue<H>(
        card_number: impl Into<String>,
        holder: &H,
        expiration_date: Option<NaiveDate>,
    ) -> KeyCardResult<Self>
    where
        H: IdentityHolder + ?Sized,
    {
        Self::issue_on(card_number, holder, expiration_date, today())
    }

    /// Issue a card as if today were `issue_date`
    pub fn issue_on<H>(
        card_number: impl Into<String>,
        holder: &H,
        expiration_date: Option<NaiveDate>,
        issue_date: NaiveDate,
    ) -> KeyCardResult<Self>
    where
        H: IdentityHolder + ?Sized,
    {
        let card_number = card_number.into();
        if card_number.trim().is_empty() {
            warn!(component = "keycard", "Rejected keycard issuance with empty card number");
            return Err(KeyCardError::invalid_argument("card number must not be empty"));
        }

        let expiration_date = match expiration_date {
            Some(date) => date,
            None => issue_date.checked_add_months(Months::new(12)).ok_or_else(|| {
                KeyCardError::invalid_argument(format!(
                    "default expiration overflows the calendar for issue date {}",
                    issue_date
                ))
            })?,
        };

        let card = Self {
            card_number,
            holder: holder.snapshot(),
            issue_date,
            expiration_date,
            active: true,
            last_access: None,
        };

        card_event!(
            info,
            "Keycard issued",
            card_number = card.card_number.as_str(),
            holder = card.holder.display_name.as_str(),
            kind = tracing::field::display(card.holder.kind),
            expiration = tracing::field::display(card.expiration_date),
        );

        Ok(card)
    }

    /// Card number as issued
    pub fn card_number(&self) -> &str {
        &self.card_number
    }

    /// The identity values captured at issuance
    pub fn holder(&self) -> &HolderSnapshot {
        &self.holder
    }

    /// Holder display name
    pub fn card_holder_name(&self) -> &str {
        &self.holder.display_name
    }

    /// Holder email, if one was on record at issuance
    pub fn card_holder_email(&self) -> Option<&str> {
        self.holder.email.as_deref()
    }

    /// Holder phone, if one was on record at issuance
    pub fn card_holder_phone(&self) -> Option<&str> {
        self.holder.phone.as_deref()
    }

    /// Kind of card, fixed at issuance
    pub fn card_type(&self) -> HolderKind {
        self.holder.kind
    }

    /// Whether this card was issued to a member
    pub fn is_member_card(&self) -> bool {
        self.card_type() == HolderKind::Member
    }

    /// Whether this card was issued to an employee
    pub fn is_employee_card(&self) -> bool {
        self.card_type() == HolderKind::Employee
    }

    /// Date the card was issued
    pub fn issue_date(&self) -> NaiveDate {
        self.issue_date
    }

    /// Last day the card is usable
    pub fn expiration_date(&self) -> NaiveDate {
        self.expiration_date
    }

    /// Administrative flag only; an active card may still be expired.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the expiration date has passed, read against the clock on every call
    pub fn is_expired(&self) -> bool {
        self.is_expired_on(today())
    }

    /// Whether the card is expired as of `date`; the expiration day itself still counts
    pub fn is_expired_on(&self, date: NaiveDate) -> bool {
        date > self.expiration_date
    }

    /// Whether the card should open doors right now
    ///
    /// Re-evaluated on every call, so the answer can flip at midnight with no
    /// mutation in between.
    pub fn is_valid(&self) -> bool {
        self.is_valid_on(today())
    }

    /// Whether the card is valid as of `date`
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        self.active && !self.is_expired_on(date)
    }

    /// Why the card would be refused as of `date`, or `None` if it is valid
    ///
    /// An inactive card reports `Inactive` even when it is also expired.
    pub fn denial_reason_on(&self, date: NaiveDate) -> Option<DenialReason> {
        if !self.active {
            Some(DenialReason::Inactive)
        } else if self.is_expired_on(date) {
            Some(DenialReason::Expired)
        } else {
            None
        }
    }

    /// Enable the card. Idempotent.
    pub fn activate(&mut self) {
        self.active = true;
        card_event!(info, "Keycard activated", card_number = self.card_number.as_str());
    }

    /// Revoke the card. Idempotent.
    pub fn deactivate(&mut self) {
        self.active = false;
        card_event!(info, "Keycard deactivated", card_number = self.card_number.as_str());
    }

    /// Move the expiration date by `months`; negative values shorten it
    ///
    /// Dates clamp to the end of the month (Jan 31 plus one month is the last day
    /// of February). A shift that leaves the calendar range is ignored.
    pub fn extend_expiration(&mut self, months: i32) {
        match shift_months(self.expiration_date, months) {
            Some(new_date) => {
                let previous = self.expiration_date;
                self.expiration_date = new_date;
                card_event!(
                    info,
                    "Keycard expiration changed",
                    card_number = self.card_number.as_str(),
                    months = months,
                    previous = tracing::field::display(previous),
                    expiration = tracing::field::display(new_date),
                );
            }
            None => {
                warn!(
                    component = "keycard",
                    card_number = self.card_number.as_str(),
                    months,
                    "Expiration shift out of calendar range; expiration unchanged"
                );
            }
        }
    }

    /// Record an access attempt at `location`, stamped with the current time
    ///
    /// Recording is unconditional: invalid and inactive cards are logged too.
    pub fn record_access(&mut self, location: impl Into<String>) {
        self.record_access_at(location, Utc::now());
    }

    /// Record an access attempt at an explicit time
    pub fn record_access_at(&mut self, location: impl Into<String>, time: DateTime<Utc>) {
        let location = location.into();
        debug!(
            component = "keycard",
            card_number = self.card_number.as_str(),
            location = location.as_str(),
            active = self.active,
            "Recording access attempt"
        );
        self.last_access = Some(AccessRecord { time, location });
    }

    /// Most recent access attempt, if any
    pub fn last_access(&self) -> Option<&AccessRecord> {
        self.last_access.as_ref()
    }

    /// Time of the most recent access attempt
    pub fn last_access_time(&self) -> Option<DateTime<Utc>> {
        self.last_access.as_ref().map(|record| record.time)
    }

    /// Location of the most recent access attempt
    pub fn last_access_location(&self) -> Option<&str> {
        self.last_access.as_ref().map(|record| record.location.as_str())
    }
}

impl Default for KeyCard {
    /// A blank card: no number, unknown employee holder, valid for a year from today
    fn default() -> Self {
        let issue_date = today();
        Self {
            card_number: String::new(),
            holder: HolderSnapshot::unknown(),
            issue_date,
            expiration_date: shift_months(issue_date, 12).unwrap_or(issue_date),
            active: true,
            last_access: None,
        }
    }
}
