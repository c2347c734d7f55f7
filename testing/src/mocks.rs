//! Recording and failing collaborator doubles.
//!
//! - [`CallLog`]: shared, ordered record of every collaborator call
//! - [`RecordingPaymentService`] / [`RecordingReservationService`]: always succeed
//! - [`FailingPaymentService`] / [`FailingReservationService`]: record, then fail
//!
//! Payment and reservation doubles built from the same [`CallLog`] share one
//! sequence, so tests can assert the order in which they were called.

use cinema_tickets_core::{
    AccountId, Money, PaymentError, ReservationError, SeatReservationService,
    TicketPaymentService,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

/// One call made to an external collaborator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollaboratorCall {
    /// `make_payment` was called
    Payment {
        /// Account charged
        account_id: AccountId,
        /// Amount charged
        total_amount: Money,
    },
    /// `reserve_seat` was called
    Reservation {
        /// Account holding the seats
        account_id: AccountId,
        /// Seats requested
        seats: u32,
    },
}

/// Ordered log of collaborator calls, cheap to clone and share.
#[derive(Clone, Debug, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<CollaboratorCall>>>,
}

impl CallLog {
    /// Create an empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, Vec<CollaboratorCall>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a call
    pub fn record(&self, call: CollaboratorCall) {
        self.guard().push(call);
    }

    /// Snapshot of every call so far, in order
    #[must_use]
    pub fn calls(&self) -> Vec<CollaboratorCall> {
        self.guard().clone()
    }

    /// Number of calls recorded
    #[must_use]
    pub fn len(&self) -> usize {
        self.guard().len()
    }

    /// True if no collaborator has been called
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }

    /// Payment calls only
    #[must_use]
    pub fn payments(&self) -> Vec<(AccountId, Money)> {
        self.guard()
            .iter()
            .filter_map(|call| match *call {
                CollaboratorCall::Payment {
                    account_id,
                    total_amount,
                } => Some((account_id, total_amount)),
                CollaboratorCall::Reservation { .. } => None,
            })
            .collect()
    }

    /// Reservation calls only
    #[must_use]
    pub fn reservations(&self) -> Vec<(AccountId, u32)> {
        self.guard()
            .iter()
            .filter_map(|call| match *call {
                CollaboratorCall::Reservation { account_id, seats } => Some((account_id, seats)),
                CollaboratorCall::Payment { .. } => None,
            })
            .collect()
    }

    /// Forget all recorded calls
    pub fn clear(&self) {
        self.guard().clear();
    }
}

/// Error produced by the failing doubles
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct SimulatedFailure(pub String);

/// Payment service that records each call and always succeeds
#[derive(Clone, Debug, Default)]
pub struct RecordingPaymentService {
    log: CallLog,
}

impl RecordingPaymentService {
    /// Record into `log`
    #[must_use]
    pub const fn new(log: CallLog) -> Self {
        Self { log }
    }
}

impl TicketPaymentService for RecordingPaymentService {
    fn make_payment(&self, account_id: AccountId, total_amount: Money) -> Result<(), PaymentError> {
        self.log.record(CollaboratorCall::Payment {
            account_id,
            total_amount,
        });
        Ok(())
    }
}

/// Reservation service that records each call and always succeeds
#[derive(Clone, Debug, Default)]
pub struct RecordingReservationService {
    log: CallLog,
}

impl RecordingReservationService {
    /// Record into `log`
    #[must_use]
    pub const fn new(log: CallLog) -> Self {
        Self { log }
    }
}

impl SeatReservationService for RecordingReservationService {
    fn reserve_seat(&self, account_id: AccountId, seats: u32) -> Result<(), ReservationError> {
        self.log
            .record(CollaboratorCall::Reservation { account_id, seats });
        Ok(())
    }
}

/// Payment service that records the attempt and then fails with `message`
#[derive(Clone, Debug)]
pub struct FailingPaymentService {
    log: CallLog,
    message: String,
}

impl FailingPaymentService {
    /// Fail every payment with `message`
    #[must_use]
    pub fn new(log: CallLog, message: impl Into<String>) -> Self {
        Self {
            log,
            message: message.into(),
        }
    }
}

impl TicketPaymentService for FailingPaymentService {
    fn make_payment(&self, account_id: AccountId, total_amount: Money) -> Result<(), PaymentError> {
        self.log.record(CollaboratorCall::Payment {
            account_id,
            total_amount,
        });
        Err(PaymentError::new(SimulatedFailure(self.message.clone())))
    }
}

/// Reservation service that records the attempt and then fails with `message`
#[derive(Clone, Debug)]
pub struct FailingReservationService {
    log: CallLog,
    message: String,
}

impl FailingReservationService {
    /// Fail every reservation with `message`
    #[must_use]
    pub fn new(log: CallLog, message: impl Into<String>) -> Self {
        Self {
            log,
            message: message.into(),
        }
    }
}

impl SeatReservationService for FailingReservationService {
    fn reserve_seat(&self, account_id: AccountId, seats: u32) -> Result<(), ReservationError> {
        self.log
            .record(CollaboratorCall::Reservation { account_id, seats });
        Err(ReservationError::new(SimulatedFailure(self.message.clone())))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_log_keeps_order() {
        let log = CallLog::new();
        let payments = RecordingPaymentService::new(log.clone());
        let reservations = RecordingReservationService::new(log.clone());
        let account = AccountId::try_from(9).unwrap();

        reservations.reserve_seat(account, 2).unwrap();
        payments.make_payment(account, Money::from_pounds(50)).unwrap();

        assert_eq!(
            log.calls(),
            vec![
                CollaboratorCall::Reservation {
                    account_id: account,
                    seats: 2
                },
                CollaboratorCall::Payment {
                    account_id: account,
                    total_amount: Money::from_pounds(50)
                },
            ]
        );
        assert_eq!(log.payments(), vec![(account, Money::from_pounds(50))]);
        assert_eq!(log.reservations(), vec![(account, 2)]);

        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_failing_doubles_record_then_fail() {
        let log = CallLog::new();
        let account = AccountId::try_from(1).unwrap();

        let error = FailingPaymentService::new(log.clone(), "card declined")
            .make_payment(account, Money::from_pounds(25))
            .unwrap_err();
        assert_eq!(error.to_string(), "card declined");

        let error = FailingReservationService::new(log.clone(), "screen full")
            .reserve_seat(account, 1)
            .unwrap_err();
        assert_eq!(error.to_string(), "screen full");

        assert_eq!(log.len(), 2);
    }
}
