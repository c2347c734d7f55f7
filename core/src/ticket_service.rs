//! Ticket purchase: validate, price, then delegate.
//!
//! ```text
//! purchase_tickets(account_id, requests)
//!   1. account_id > 0                     else "Invalid account ID"
//!   2. requests non-empty                 else "No tickets are given"
//!   3. aggregate counts per ticket type
//!   4. total <= max_tickets_per_purchase  else "The number of tickets must not exceed N"
//!   5. child/infant => adult present      else "Child/Infant tickets can not be purchased ..."
//!   6. make_payment(account, price)
//!   7. reserve_seat(account, adult + child)
//! ```
//!
//! Every rule is checked before either collaborator is touched. There is no
//! compensation step: if step 7 fails the account has already been charged.

use crate::config::PurchaseRules;
use crate::error::{InvalidPurchaseError, PurchaseError};
use crate::payment_gateway::TicketPaymentService;
use crate::seat_booking::SeatReservationService;
use crate::types::{AccountId, PurchaseSummary, TicketCounts, TicketTypeRequest};
use std::sync::Arc;

/// Validates and prices a purchase without side effects.
///
/// # Errors
///
/// Returns the first broken rule, in the order the rules are listed in the
/// module docs.
pub fn validate_purchase(
    account_id: i64,
    ticket_type_requests: &[TicketTypeRequest],
    rules: &PurchaseRules,
) -> Result<PurchaseSummary, InvalidPurchaseError> {
    let account_id = AccountId::try_from(account_id)?;

    if ticket_type_requests.is_empty() {
        return Err(InvalidPurchaseError::NoTickets);
    }

    let counts = TicketCounts::from_requests(ticket_type_requests);

    let requested = counts.total();
    if requested > rules.max_tickets_per_purchase {
        return Err(InvalidPurchaseError::TooManyTickets {
            requested,
            max: rules.max_tickets_per_purchase,
        });
    }

    if counts.has_dependants() && counts.adult == 0 {
        return Err(InvalidPurchaseError::AdultRequired);
    }

    Ok(PurchaseSummary {
        account_id,
        counts,
        total_price: counts.total_price(),
        seats_reserved: counts.seats_to_reserve(),
    })
}

/// Cinema ticket service
///
/// Holds the two external collaborators and the purchase rules. Stateless
/// between calls, so one instance can be shared across threads.
#[derive(Clone)]
pub struct TicketService {
    payment_service: Arc<dyn TicketPaymentService>,
    reservation_service: Arc<dyn SeatReservationService>,
    rules: PurchaseRules,
}

impl TicketService {
    /// Creates a service with the default purchase rules
    #[must_use]
    pub fn new(
        payment_service: Arc<dyn TicketPaymentService>,
        reservation_service: Arc<dyn SeatReservationService>,
    ) -> Self {
        Self::with_rules(payment_service, reservation_service, PurchaseRules::default())
    }

    /// Creates a service with rules loaded by [`PurchaseRules::from_env`]
    #[must_use]
    pub fn from_env(
        payment_service: Arc<dyn TicketPaymentService>,
        reservation_service: Arc<dyn SeatReservationService>,
    ) -> Self {
        Self::with_rules(payment_service, reservation_service, PurchaseRules::from_env())
    }

    /// Creates a service with custom purchase rules
    #[must_use]
    pub fn with_rules(
        payment_service: Arc<dyn TicketPaymentService>,
        reservation_service: Arc<dyn SeatReservationService>,
        rules: PurchaseRules,
    ) -> Self {
        Self {
            payment_service,
            reservation_service,
            rules,
        }
    }

    /// Rules this service enforces
    #[must_use]
    pub const fn rules(&self) -> &PurchaseRules {
        &self.rules
    }

    /// Purchase tickets for an account.
    ///
    /// Payment is taken first, then seats are reserved. Neither collaborator
    /// is called when validation fails.
    ///
    /// # Errors
    ///
    /// - [`PurchaseError::Invalid`] if the request breaks a purchase rule
    /// - [`PurchaseError::Payment`] if the payment service fails (no seats reserved)
    /// - [`PurchaseError::Reservation`] if the reservation service fails (payment already taken)
    #[tracing::instrument(
        skip(self, ticket_type_requests),
        fields(request_count = ticket_type_requests.len()),
        name = "purchase_tickets"
    )]
    pub fn purchase_tickets(
        &self,
        account_id: i64,
        ticket_type_requests: &[TicketTypeRequest],
    ) -> Result<PurchaseSummary, PurchaseError> {
        let summary = validate_purchase(account_id, ticket_type_requests, &self.rules)
            .inspect_err(|error| {
                tracing::warn!(reason = %error, "Ticket purchase rejected");
            })?;

        tracing::debug!(
            account_id = %summary.account_id,
            amount = %summary.total_price,
            "Requesting payment"
        );
        self.payment_service
            .make_payment(summary.account_id, summary.total_price)
            .inspect_err(|error| {
                tracing::error!(error = %error, "Payment failed, no seats reserved");
            })?;

        tracing::debug!(
            account_id = %summary.account_id,
            seats = summary.seats_reserved,
            "Requesting seat reservation"
        );
        self.reservation_service
            .reserve_seat(summary.account_id, summary.seats_reserved)
            .inspect_err(|error| {
                tracing::error!(
                    error = %error,
                    amount = %summary.total_price,
                    "Seat reservation failed after payment was taken"
                );
            })?;

        tracing::info!(
            account_id = %summary.account_id,
            adult = summary.counts.adult,
            child = summary.counts.child,
            infant = summary.counts.infant,
            amount = %summary.total_price,
            amount_pence = summary.total_price.pence(),
            seats = summary.seats_reserved,
            "Ticket purchase completed"
        );

        Ok(summary)
    }
}

impl std::fmt::Debug for TicketService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TicketService")
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::payment_gateway::PaymentError;
    use crate::seat_booking::ReservationError;
    use crate::types::Money;
    use std::sync::Mutex;

    #[derive(Debug, PartialEq, Eq)]
    enum Call {
        Pay(i64, u64), // pence
        Reserve(i64, u32),
    }

    #[derive(Default)]
    struct Spy {
        calls: Mutex<Vec<Call>>,
    }

    impl TicketPaymentService for Spy {
        fn make_payment(
            &self,
            account_id: AccountId,
            total_amount: Money,
        ) -> Result<(), PaymentError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Pay(account_id.as_i64(), total_amount.pence()));
            Ok(())
        }
    }

    impl SeatReservationService for Spy {
        fn reserve_seat(&self, account_id: AccountId, seats: u32) -> Result<(), ReservationError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Reserve(account_id.as_i64(), seats));
            Ok(())
        }
    }

    fn service() -> (TicketService, Arc<Spy>) {
        let spy = Arc::new(Spy::default());
        let service = TicketService::new(spy.clone(), spy.clone());
        (service, spy)
    }

    #[test]
    fn test_valid_purchase_pays_then_reserves() {
        let (service, spy) = service();

        let summary = service
            .purchase_tickets(
                1,
                &[
                    TicketTypeRequest::adult(2),
                    TicketTypeRequest::child(3),
                    TicketTypeRequest::infant(1),
                ],
            )
            .unwrap();

        assert_eq!(summary.total_price, Money::from_pounds(95));
        assert_eq!(summary.seats_reserved, 5);
        assert_eq!(
            *spy.calls.lock().unwrap(),
            vec![Call::Pay(1, 9500), Call::Reserve(1, 5)]
        );
    }

    #[test]
    fn test_rejection_makes_no_calls() {
        let (service, spy) = service();

        let error = service
            .purchase_tickets(1, &[TicketTypeRequest::child(1)])
            .unwrap_err();

        assert_eq!(error.as_invalid(), Some(&InvalidPurchaseError::AdultRequired));
        assert!(spy.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_account_checked_before_tickets() {
        assert_eq!(
            validate_purchase(0, &[], &PurchaseRules::default()),
            Err(InvalidPurchaseError::InvalidAccountId)
        );
    }

    #[test]
    fn test_capacity_checked_before_adult_rule() {
        assert_eq!(
            validate_purchase(1, &[TicketTypeRequest::child(26)], &PurchaseRules::default()),
            Err(InvalidPurchaseError::TooManyTickets {
                requested: 26,
                max: 25
            })
        );
    }

    #[test]
    fn test_exactly_25_is_allowed() {
        let summary = validate_purchase(
            1,
            &[TicketTypeRequest::adult(20), TicketTypeRequest::infant(5)],
            &PurchaseRules::default(),
        )
        .unwrap();
        assert_eq!(summary.counts.total(), 25);
        assert_eq!(summary.seats_reserved, 20);
        assert_eq!(summary.total_price, Money::from_pounds(500));
    }

    #[test]
    fn test_zero_count_requests_are_valid() {
        let summary =
            validate_purchase(3, &[TicketTypeRequest::adult(0)], &PurchaseRules::default())
                .unwrap();
        assert_eq!(summary.total_price, Money::ZERO);
        assert_eq!(summary.seats_reserved, 0);
    }

    #[test]
    fn test_rules_follow_constructor() {
        let spy = Arc::new(Spy::default());
        let service = TicketService::from_env(spy.clone(), spy.clone());
        assert_eq!(service.rules(), &PurchaseRules::from_env());

        let rules = PurchaseRules {
            max_tickets_per_purchase: 4,
        };
        let service = TicketService::with_rules(spy.clone(), spy, rules);
        assert_eq!(service.rules(), &rules);
    }

    #[test]
    fn test_custom_limit() {
        let rules = PurchaseRules {
            max_tickets_per_purchase: 2,
        };
        assert_eq!(
            validate_purchase(1, &[TicketTypeRequest::adult(3)], &rules)
                .unwrap_err()
                .to_string(),
            "The number of tickets must not exceed 2"
        );
    }
}
