//! Purchase rule configuration.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;

/// Default maximum number of tickets in a single purchase
pub const DEFAULT_MAX_TICKETS_PER_PURCHASE: u32 = 25;

/// Environment variable overriding [`PurchaseRules::max_tickets_per_purchase`]
pub const MAX_TICKETS_PER_PURCHASE_VAR: &str = "MAX_TICKETS_PER_PURCHASE";

/// Business limits applied to every purchase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRules {
    /// Maximum tickets (all categories, infants included) per purchase
    pub max_tickets_per_purchase: u32,
}

impl Default for PurchaseRules {
    fn default() -> Self {
        Self {
            max_tickets_per_purchase: DEFAULT_MAX_TICKETS_PER_PURCHASE,
        }
    }
}

impl PurchaseRules {
    /// Load rules from environment variables.
    ///
    /// Missing or unparsable values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load rules through an arbitrary key lookup (environment, file, test map)
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            max_tickets_per_purchase: lookup(MAX_TICKETS_PER_PURCHASE_VAR)
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(DEFAULT_MAX_TICKETS_PER_PURCHASE),
        }
    }
}
