//! Domain types for cinema ticket purchases.
//!
//! Value objects only: nothing here is persisted, and every derived quantity
//! ([`TicketCounts`], [`PurchaseSummary`]) is recomputed per purchase.

use crate::error::InvalidPurchaseError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Identifiers
// ============================================================================

/// A validated account identifier.
///
/// Only strictly positive identities can be constructed, so every collaborator
/// receiving an `AccountId` can rely on it being valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct AccountId(i64);

impl AccountId {
    /// Returns the raw identity
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for AccountId {
    type Error = InvalidPurchaseError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(InvalidPurchaseError::InvalidAccountId)
        }
    }
}

impl From<AccountId> for i64 {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Money Value Object (pence-based to avoid floating point errors)
// ============================================================================

/// Represents money in pence to avoid floating-point arithmetic errors
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(u64);

impl Money {
    /// Zero pence
    pub const ZERO: Self = Self(0);

    /// Creates a `Money` value from pence
    #[must_use]
    pub const fn from_pence(pence: u64) -> Self {
        Self(pence)
    }

    /// Creates a `Money` value from whole pounds, saturating at `u64::MAX` pence
    #[must_use]
    pub const fn from_pounds(pounds: u64) -> Self {
        Self(pounds.saturating_mul(100))
    }

    /// Returns the amount in pence
    #[must_use]
    pub const fn pence(&self) -> u64 {
        self.0
    }

    /// Returns the amount in whole pounds (rounded down)
    #[must_use]
    pub const fn pounds(&self) -> u64 {
        self.0 / 100
    }

    /// Checks if the amount is zero
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds two money amounts, saturating at `u64::MAX` pence
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Multiplies money by a quantity, saturating at `u64::MAX` pence
    #[must_use]
    pub const fn saturating_multiply(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(quantity as u64))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "£{}.{:02}", self.pounds(), self.pence() % 100)
    }
}

// ============================================================================
// Tickets
// ============================================================================

/// Ticket category
///
/// Closed set: the price table and seat rule below are exhaustive matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketType {
    /// Adult ticket (£25, occupies a seat)
    Adult,
    /// Child ticket (£15, occupies a seat)
    Child,
    /// Infant ticket (free, sits on an adult's lap)
    Infant,
}

impl TicketType {
    /// Every ticket type, in price-table order
    pub const ALL: [Self; 3] = [Self::Adult, Self::Child, Self::Infant];

    /// Price of a single ticket of this type
    #[must_use]
    pub const fn unit_price(self) -> Money {
        match self {
            Self::Adult => Money::from_pounds(25),
            Self::Child => Money::from_pounds(15),
            Self::Infant => Money::ZERO,
        }
    }

    /// Whether a ticket of this type needs a seat reserved
    #[must_use]
    pub const fn requires_seat(self) -> bool {
        match self {
            Self::Adult | Self::Child => true,
            Self::Infant => false,
        }
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Adult => write!(f, "ADULT"),
            Self::Child => write!(f, "CHILD"),
            Self::Infant => write!(f, "INFANT"),
        }
    }
}

/// A request for some number of tickets of one type.
///
/// Immutable once built; a count of zero is allowed and contributes nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketTypeRequest {
    ticket_type: TicketType,
    no_of_tickets: u32,
}

impl TicketTypeRequest {
    /// Creates a new request
    #[must_use]
    pub const fn new(ticket_type: TicketType, no_of_tickets: u32) -> Self {
        Self {
            ticket_type,
            no_of_tickets,
        }
    }

    /// Request for `n` adult tickets
    #[must_use]
    pub const fn adult(n: u32) -> Self {
        Self::new(TicketType::Adult, n)
    }

    /// Request for `n` child tickets
    #[must_use]
    pub const fn child(n: u32) -> Self {
        Self::new(TicketType::Child, n)
    }

    /// Request for `n` infant tickets
    #[must_use]
    pub const fn infant(n: u32) -> Self {
        Self::new(TicketType::Infant, n)
    }

    /// The requested ticket type
    #[must_use]
    pub const fn ticket_type(&self) -> TicketType {
        self.ticket_type
    }

    /// The number of tickets requested
    #[must_use]
    pub const fn no_of_tickets(&self) -> u32 {
        self.no_of_tickets
    }
}

impl fmt::Display for TicketTypeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ticket_type, self.no_of_tickets)
    }
}

/// Per-category ticket totals aggregated from a list of requests.
///
/// Counts saturate at `u32::MAX` rather than wrapping, so an absurdly large
/// request still trips the capacity rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketCounts {
    /// Adult tickets
    pub adult: u32,
    /// Child tickets
    pub child: u32,
    /// Infant tickets
    pub infant: u32,
}

impl TicketCounts {
    /// Sums the requested tickets per category. Order of requests is irrelevant.
    #[must_use]
    pub fn from_requests(requests: &[TicketTypeRequest]) -> Self {
        requests.iter().fold(Self::default(), |mut counts, request| {
            let slot = match request.ticket_type() {
                TicketType::Adult => &mut counts.adult,
                TicketType::Child => &mut counts.child,
                TicketType::Infant => &mut counts.infant,
            };
            *slot = slot.saturating_add(request.no_of_tickets());
            counts
        })
    }

    /// Number of tickets of the given type
    #[must_use]
    pub const fn count(&self, ticket_type: TicketType) -> u32 {
        match ticket_type {
            TicketType::Adult => self.adult,
            TicketType::Child => self.child,
            TicketType::Infant => self.infant,
        }
    }

    /// Total number of tickets across all categories
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.adult.saturating_add(self.child).saturating_add(self.infant)
    }

    /// Whether any child or infant tickets are present
    #[must_use]
    pub const fn has_dependants(&self) -> bool {
        self.child > 0 || self.infant > 0
    }

    /// Seats needed: infants do not occupy one
    #[must_use]
    pub fn seats_to_reserve(&self) -> u32 {
        TicketType::ALL
            .into_iter()
            .filter(|ticket_type| ticket_type.requires_seat())
            .fold(0, |seats, ticket_type| {
                seats.saturating_add(self.count(ticket_type))
            })
    }

    /// Price of all tickets according to the price table
    #[must_use]
    pub fn total_price(&self) -> Money {
        TicketType::ALL
            .into_iter()
            .fold(Money::ZERO, |total, ticket_type| {
                let subtotal = ticket_type
                    .unit_price()
                    .saturating_multiply(self.count(ticket_type));
                total.saturating_add(subtotal)
            })
    }
}

/// Outcome of a successful purchase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseSummary {
    /// Account that paid and holds the seats
    pub account_id: AccountId,
    /// Aggregated ticket counts
    pub counts: TicketCounts,
    /// Amount charged
    pub total_price: Money,
    /// Seats reserved
    pub seats_reserved: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_rejects_non_positive() {
        assert_eq!(
            AccountId::try_from(0),
            Err(InvalidPurchaseError::InvalidAccountId)
        );
        assert_eq!(
            AccountId::try_from(-7),
            Err(InvalidPurchaseError::InvalidAccountId)
        );
        assert_eq!(AccountId::try_from(1).unwrap().as_i64(), 1);
    }

    #[test]
    fn test_account_id_deserialize_is_validated() {
        let id: AccountId = serde_json::from_str("42").unwrap();
        assert_eq!(i64::from(id), 42);
        assert!(serde_json::from_str::<AccountId>("0").is_err());
    }

    #[test]
    fn test_price_table() {
        assert_eq!(TicketType::Adult.unit_price(), Money::from_pounds(25));
        assert_eq!(TicketType::Child.unit_price(), Money::from_pounds(15));
        assert!(TicketType::Infant.unit_price().is_zero());
        assert!(!TicketType::Infant.requires_seat());
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_pounds(95).to_string(), "£95.00");
        assert_eq!(Money::from_pence(1505).to_string(), "£15.05");
    }

    #[test]
    fn test_money_saturating_arithmetic() {
        assert_eq!(
            Money::from_pence(u64::MAX).saturating_add(Money::from_pence(1)),
            Money::from_pence(u64::MAX)
        );
        assert_eq!(
            Money::from_pounds(25).saturating_multiply(3),
            Money::from_pounds(75)
        );
        assert_eq!(
            Money::from_pence(u64::MAX).saturating_multiply(2),
            Money::from_pence(u64::MAX)
        );
        assert_eq!(Money::from_pounds(u64::MAX).pence(), u64::MAX);
    }

    #[test]
    fn test_counts_sum_duplicates() {
        let counts = TicketCounts::from_requests(&[
            TicketTypeRequest::adult(2),
            TicketTypeRequest::child(1),
            TicketTypeRequest::adult(3),
            TicketTypeRequest::infant(0),
        ]);

        assert_eq!(counts.adult, 5);
        assert_eq!(counts.child, 1);
        assert_eq!(counts.infant, 0);
        assert_eq!(counts.total(), 6);
        assert_eq!(counts.seats_to_reserve(), 6);
        assert_eq!(counts.total_price(), Money::from_pounds(140));
    }

    #[test]
    fn test_counts_order_independent() {
        let forward = TicketCounts::from_requests(&[
            TicketTypeRequest::adult(2),
            TicketTypeRequest::child(3),
        ]);
        let reversed = TicketCounts::from_requests(&[
            TicketTypeRequest::child(3),
            TicketTypeRequest::adult(2),
        ]);
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_counts_saturate() {
        let counts = TicketCounts::from_requests(&[
            TicketTypeRequest::adult(u32::MAX),
            TicketTypeRequest::adult(1),
            TicketTypeRequest::child(5),
        ]);
        assert_eq!(counts.adult, u32::MAX);
        assert_eq!(counts.total(), u32::MAX);
    }

    #[test]
    fn test_infants_are_free_and_seatless() {
        let counts = TicketCounts::from_requests(&[
            TicketTypeRequest::adult(1),
            TicketTypeRequest::infant(4),
        ]);
        assert_eq!(counts.seats_to_reserve(), 1);
        assert_eq!(counts.total_price(), Money::from_pounds(25));
        assert!(counts.has_dependants());
    }

    #[test]
    fn test_ticket_type_serde_names() {
        assert_eq!(serde_json::to_string(&TicketType::Infant).unwrap(), "\"INFANT\"");
        let request: TicketTypeRequest =
            serde_json::from_str(r#"{"ticket_type":"CHILD","no_of_tickets":3}"#).unwrap();
        assert_eq!(request, TicketTypeRequest::child(3));
    }
}
