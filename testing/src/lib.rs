//! # Cinema Tickets Testing
//!
//! Testing utilities for cinema ticket purchases.
//!
//! This crate provides:
//! - Collaborator doubles that record calls into a shared [`CallLog`]
//! - Helpers that wire a [`TicketService`] to those doubles
//! - proptest strategies for the domain types
//!
//! ## Example
//!
//! ```
//! use cinema_tickets_core::{Money, TicketTypeRequest};
//! use cinema_tickets_testing::helpers::recording_ticket_service;
//!
//! let (service, log) = recording_ticket_service();
//! service
//!     .purchase_tickets(1, &[TicketTypeRequest::adult(1)])
//!     .unwrap();
//!
//! assert_eq!(log.payments()[0].1, Money::from_pounds(25));
//! ```

use cinema_tickets_core::TicketService;

pub mod mocks;

/// Test helpers and utilities.
pub mod helpers {
    use super::mocks::{CallLog, RecordingPaymentService, RecordingReservationService};
    use super::TicketService;
    use cinema_tickets_core::{PurchaseRules, SeatReservationService, TicketPaymentService};
    use std::sync::Arc;

    /// Service whose collaborators both record into the returned log
    #[must_use]
    pub fn recording_ticket_service() -> (TicketService, CallLog) {
        recording_ticket_service_with_rules(PurchaseRules::default())
    }

    /// [`recording_ticket_service`] with custom rules
    #[must_use]
    pub fn recording_ticket_service_with_rules(rules: PurchaseRules) -> (TicketService, CallLog) {
        let log = CallLog::new();
        let service = TicketService::with_rules(
            Arc::new(RecordingPaymentService::new(log.clone())),
            Arc::new(RecordingReservationService::new(log.clone())),
            rules,
        );
        (service, log)
    }

    /// Service built from arbitrary collaborators, default rules
    #[must_use]
    pub fn ticket_service_with(
        payment: impl TicketPaymentService + 'static,
        reservation: impl SeatReservationService + 'static,
    ) -> TicketService {
        TicketService::new(Arc::new(payment), Arc::new(reservation))
    }

    /// Install a fmt subscriber writing through the test harness.
    ///
    /// Honors `RUST_LOG`, defaults to `debug`. Safe to call from every test;
    /// only the first call installs anything.
    pub fn init_test_tracing() {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use cinema_tickets_core::{TicketType, TicketTypeRequest};
    use proptest::prelude::*;

    /// Any ticket type
    pub fn arb_ticket_type() -> impl Strategy<Value = TicketType> {
        prop_oneof![
            Just(TicketType::Adult),
            Just(TicketType::Child),
            Just(TicketType::Infant),
        ]
    }

    /// A single request of any type with `0..=max_count` tickets
    pub fn arb_ticket_request(max_count: u32) -> impl Strategy<Value = TicketTypeRequest> {
        (arb_ticket_type(), 0..=max_count)
            .prop_map(|(ticket_type, count)| TicketTypeRequest::new(ticket_type, count))
    }

    /// A non-empty list of up to `max_len` requests
    pub fn arb_ticket_requests(
        max_len: usize,
        max_count: u32,
    ) -> impl Strategy<Value = Vec<TicketTypeRequest>> {
        prop::collection::vec(arb_ticket_request(max_count), 1..=max_len.max(1))
    }

    /// Strictly positive account ids
    pub fn arb_valid_account_id() -> impl Strategy<Value = i64> {
        1..=i64::MAX
    }

    /// Zero or negative account ids
    pub fn arb_invalid_account_id() -> impl Strategy<Value = i64> {
        i64::MIN..=0
    }
}

// Re-export commonly used items
pub use helpers::{init_test_tracing, recording_ticket_service};
pub use mocks::{
    CallLog, CollaboratorCall, FailingPaymentService, FailingReservationService,
    RecordingPaymentService, RecordingReservationService, SimulatedFailure,
};
