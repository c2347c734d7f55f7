//! Seat reservation collaborator seam.

use crate::error::BoxError;
use crate::types::AccountId;
use thiserror::Error;

/// Failure raised by a seat reservation service, forwarded untouched
#[derive(Error, Debug)]
#[error(transparent)]
pub struct ReservationError(#[from] BoxError);

impl ReservationError {
    /// Wraps any collaborator error
    pub fn new(error: impl Into<BoxError>) -> Self {
        Self(error.into())
    }

    /// Unwraps the collaborator's own error
    #[must_use]
    pub fn into_inner(self) -> BoxError {
        self.0
    }
}

/// Seat reservation service
pub trait SeatReservationService: Send + Sync {
    /// Reserve `total_seats_to_allocate` seats for the account
    ///
    /// # Errors
    ///
    /// Returns error if the seats could not be reserved
    fn reserve_seat(
        &self,
        account_id: AccountId,
        total_seats_to_allocate: u32,
    ) -> Result<(), ReservationError>;
}
