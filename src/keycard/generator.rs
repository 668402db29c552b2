//! Card number generation
//!
//! Numbers have the shape `<prefix><digits>`, e.g. `MEM04217`. The generator only
//! proposes numbers; uniqueness is decided by whoever supplies `is_taken`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::types::{FacilityConfig, HolderKind};

/// Attempts made before giving up on finding a free number
pub const MAX_ATTEMPTS: usize = 1_000;

/// Random card number generator
#[derive(Debug)]
pub struct CardNumberGenerator {
    rng: StdRng,
    member_prefix: String,
    employee_prefix: String,
    digits: usize,
}

impl CardNumberGenerator {
    /// Create a generator from the facility configuration
    ///
    /// A configured seed makes the sequence reproducible.
    pub fn new(config: &FacilityConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            member_prefix: config.member_card_prefix.clone(),
            employee_prefix: config.employee_card_prefix.clone(),
            digits: config.card_number_digits,
        }
    }

    /// Prefix used for `kind`
    pub fn prefix(&self, kind: HolderKind) -> &str {
        match kind {
            HolderKind::Member => &self.member_prefix,
            HolderKind::Employee => &self.employee_prefix,
        }
    }

    /// Propose a card number for `kind` that `is_taken` rejects as unused
    ///
    /// Returns `None` after [`MAX_ATTEMPTS`] collisions, or when the digit count
    /// does not fit a `u64`.
    pub fn next_number<F>(&mut self, kind: HolderKind, is_taken: F) -> Option<String>
    where
        F: Fn(&str) -> bool,
    {
        let prefix = self.prefix(kind).to_string();
        let Some(upper) = u32::try_from(self.digits).ok().and_then(|d| 10u64.checked_pow(d)) else {
            warn!(component = "keycard", digits = self.digits, "Card number digit count too large");
            return None;
        };

        for attempt in 0..MAX_ATTEMPTS {
            let value = self.rng.gen_range(0..upper);
            let candidate = format!("{}{:0width$}", prefix, value, width = self.digits);
            if !is_taken(&candidate) {
                debug!(component = "keycard", candidate = candidate.as_str(), attempt, "Generated card number");
                return Some(candidate);
            }
        }

        warn!(component = "keycard", prefix = prefix.as_str(), "No free card number found");
        None
    }
}
