//! Payment collaborator seam.
//!
//! The payment processor is external. A purchase hands it the account and the
//! total amount; it either completes or fails with an error this crate never
//! inspects.

use crate::error::BoxError;
use crate::types::{AccountId, Money};
use thiserror::Error;

/// Failure raised by a payment service, forwarded untouched
#[derive(Error, Debug)]
#[error(transparent)]
pub struct PaymentError(#[from] BoxError);

impl PaymentError {
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

/// Ticket payment service
///
/// Abstraction over whatever takes the customer's money.
pub trait TicketPaymentService: Send + Sync {
    /// Charge `total_amount` to the account
    ///
    /// # Errors
    ///
    /// Returns error if the payment could not be made
    fn make_payment(&self, account_id: AccountId, total_amount: Money) -> Result<(), PaymentError>;
}
