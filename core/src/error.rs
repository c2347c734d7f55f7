//! Error types for ticket purchases.
//!
//! Validation failures are a typed outcome ([`InvalidPurchaseError`]) whose
//! `Display` text is part of the public contract. Collaborator failures are
//! opaque and pass through [`PurchaseError`] unchanged.

use crate::payment_gateway::PaymentError;
use crate::seat_booking::ReservationError;
use thiserror::Error;

/// Boxed error raised by an external collaborator
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A purchase request that breaks a business rule.
///
/// Checked in declaration order; the first violated rule wins.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidPurchaseError {
    /// Account identifier is zero or negative
    #[error("Invalid account ID")]
    InvalidAccountId,

    /// No ticket requests were supplied
    #[error("No tickets are given")]
    NoTickets,

    /// More tickets than one purchase may contain
    #[error("The number of tickets must not exceed {max}")]
    TooManyTickets {
        /// Tickets in the request (saturated at `u32::MAX`)
        requested: u32,
        /// Configured limit
        max: u32,
    },

    /// Child or infant tickets without any adult
    #[error("Child/Infant tickets can not be purchased without an Adult ticket")]
    AdultRequired,
}

/// Errors returned by [`TicketService::purchase_tickets`](crate::TicketService::purchase_tickets)
#[derive(Error, Debug)]
pub enum PurchaseError {
    /// Request rejected before any collaborator was called
    #[error(transparent)]
    Invalid(#[from] InvalidPurchaseError),

    /// Payment service failed; no seats were reserved
    #[error(transparent)]
    Payment(#[from] PaymentError),

    /// Reservation service failed after payment was taken
    #[error(transparent)]
    Reservation(#[from] ReservationError),
}

impl PurchaseError {
    /// Returns the validation failure, if this is one
    #[must_use]
    pub const fn as_invalid(&self) -> Option<&InvalidPurchaseError> {
        match self {
            Self::Invalid(error) => Some(error),
            Self::Payment(_) | Self::Reservation(_) => None,
        }
    }
}
