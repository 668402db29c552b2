//! Registry of issued keycards
//!
//! A bare [`KeyCard`] does not know about other cards. This registry is the layer
//! that keeps card numbers unique and answers door checks by number.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::holder::IdentityHolder;
use crate::keycard::{today, DenialReason, KeyCard};
use crate::registry::error::{RegistryError, RegistryResult};

/// Outcome of an access attempt checked against a card
///
/// The attempt is recorded on the card whether or not it was granted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDecision {
    /// Card presented
    pub card_number: String,
    /// Where the card was presented
    pub location: String,
    /// When the card was presented
    pub time: DateTime<Utc>,
    /// Whether access was granted
    pub granted: bool,
    /// Why access was refused
    pub denial: Option<DenialReason>,
}

/// Registry of keycards keyed by card number
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeyCardRegistry {
    cards: BTreeMap<String, KeyCard>,
}

impl KeyCardRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a card dated today
    ///
    /// # Errors
    /// `DuplicateCardNumber` if the number is taken, `KeyCard` if issuance rejects the input.
    pub fn issue_card<H>(
        &mut self,
        card_number: impl Into<String>,
        holder: &H,
        expiration_date: Option<NaiveDate>,
    ) -> RegistryResult<&KeyCard>
    where
        H: IdentityHolder + ?Sized,
    {
        self.issue_card_on(card_number, holder, expiration_date, today())
    }

    /// Issue a card as if today were `issue_date`
    pub fn issue_card_on<H>(
        &mut self,
        card_number: impl Into<String>,
        holder: &H,
        expiration_date: Option<NaiveDate>,
        issue_date: NaiveDate,
    ) -> RegistryResult<&KeyCard>
    where
        H: IdentityHolder + ?Sized,
    {
        let card_number = card_number.into();
        if self.cards.contains_key(&card_number) {
            warn!(component = "registry", card_number = card_number.as_str(), "Duplicate card number");
            return Err(RegistryError::DuplicateCardNumber(card_number));
        }

        let card = KeyCard::issue_on(card_number.clone(), holder, expiration_date, issue_date)?;
        Ok(&*self.cards.entry(card_number).or_insert(card))
    }

    /// Whether a card number is already issued
    pub fn contains(&self, card_number: &str) -> bool {
        self.cards.contains_key(card_number)
    }

    /// Look up a card
    pub fn get_card(&self, card_number: &str) -> RegistryResult<&KeyCard> {
        self.cards.get(card_number).ok_or_else(|| RegistryError::CardNotFound(card_number.to_string()))
    }

    /// Look up a card for modification
    pub fn get_card_mut(&mut self, card_number: &str) -> RegistryResult<&mut KeyCard> {
        self.cards
            .get_mut(card_number)
            .ok_or_else(|| RegistryError::CardNotFound(card_number.to_string()))
    }

    /// Deactivate a card
    pub fn revoke_card(&mut self, card_number: &str) -> RegistryResult<()> {
        self.get_card_mut(card_number)?.deactivate();
        Ok(())
    }

    /// Reactivate a card
    pub fn reinstate_card(&mut self, card_number: &str) -> RegistryResult<()> {
        self.get_card_mut(card_number)?.activate();
        Ok(())
    }

    /// Move a card's expiration by `months`, returning the new expiration date
    pub fn extend_card(&mut self, card_number: &str, months: i32) -> RegistryResult<NaiveDate> {
        let card = self.get_card_mut(card_number)?;
        card.extend_expiration(months);
        Ok(card.expiration_date())
    }

    /// Present a card at `location` now
    pub fn record_access(&mut self, card_number: &str, location: &str) -> RegistryResult<AccessDecision> {
        self.record_access_at(card_number, location, Utc::now())
    }

    /// Present a card at `location` at an explicit time
    ///
    /// Validity is judged against the local calendar date of `time`.
    pub fn record_access_at(
        &mut self,
        card_number: &str,
        location: &str,
        time: DateTime<Utc>,
    ) -> RegistryResult<AccessDecision> {
        let card = self.get_card_mut(card_number)?;
        let date = time.with_timezone(&Local).date_naive();
        let denial = card.denial_reason_on(date);
        card.record_access_at(location, time);

        let decision = AccessDecision {
            card_number: card_number.to_string(),
            location: location.to_string(),
            time,
            granted: denial.is_none(),
            denial,
        };

        if decision.granted {
            info!(component = "registry", card_number, location, "Access granted");
        } else {
            warn!(
                component = "registry",
                card_number,
                location,
                reason = %DenialReasonField(denial),
                "Access denied"
            );
        }
        Ok(decision)
    }

    /// Remove a card, returning it
    pub fn remove_card(&mut self, card_number: &str) -> RegistryResult<KeyCard> {
        let removed = self
            .cards
            .remove(card_number)
            .ok_or_else(|| RegistryError::CardNotFound(card_number.to_string()))?;
        info!(component = "registry", card_number, "Keycard removed");
        Ok(removed)
    }

    /// Cards issued under a holder name
    pub fn cards_for_holder(&self, holder_name: &str) -> Vec<&KeyCard> {
        let cards: Vec<&KeyCard> =
            self.cards.values().filter(|c| c.card_holder_name() == holder_name).collect();
        debug!(component = "registry", holder_name, count = cards.len(), "Cards for holder");
        cards
    }

    /// Cards valid right now
    pub fn valid_cards(&self) -> Vec<&KeyCard> {
        self.valid_cards_on(today())
    }

    /// Cards valid on `date`
    pub fn valid_cards_on(&self, date: NaiveDate) -> Vec<&KeyCard> {
        self.cards.values().filter(|c| c.is_valid_on(date)).collect()
    }

    /// Cards expired right now, active or not
    pub fn expired_cards(&self) -> Vec<&KeyCard> {
        self.expired_cards_on(today())
    }

    /// Cards expired on `date`, active or not
    pub fn expired_cards_on(&self, date: NaiveDate) -> Vec<&KeyCard> {
        self.cards.values().filter(|c| c.is_expired_on(date)).collect()
    }

    /// All cards in card number order
    pub fn all_cards(&self) -> Vec<&KeyCard> {
        self.cards.values().collect()
    }

    /// Number of cards
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether no cards have been issued
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

struct DenialReasonField(Option<DenialReason>);

impl std::fmt::Display for DenialReasonField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(reason) => write!(f, "{}", reason),
            None => write!(f, "none"),
        }
    }
}
