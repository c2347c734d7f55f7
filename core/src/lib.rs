//! # Cinema Tickets Core
//!
//! Validation and pricing of cinema ticket purchases.
//!
//! A purchase is a single synchronous operation: check the request against
//! the business rules, compute the price and seat count, then hand off to two
//! external collaborators (payment first, seat reservation second).
//!
//! ## Rules
//!
//! | Ticket | Price | Seat |
//! |--------|-------|------|
//! | Adult  | £25   | yes  |
//! | Child  | £15   | yes  |
//! | Infant | £0    | no   |
//!
//! - At most 25 tickets per purchase (configurable, see [`PurchaseRules`])
//! - Child and infant tickets need at least one adult ticket
//! - Account ids must be strictly positive
//!
//! ## Example
//!
//! ```
//! use cinema_tickets_core::{
//!     AccountId, Money, PaymentError, ReservationError, SeatReservationService,
//!     TicketPaymentService, TicketService, TicketTypeRequest,
//! };
//! use std::sync::Arc;
//!
//! struct Gateway;
//!
//! impl TicketPaymentService for Gateway {
//!     fn make_payment(&self, _: AccountId, _: Money) -> Result<(), PaymentError> {
//!         Ok(())
//!     }
//! }
//!
//! impl SeatReservationService for Gateway {
//!     fn reserve_seat(&self, _: AccountId, _: u32) -> Result<(), ReservationError> {
//!         Ok(())
//!     }
//! }
//!
//! let service = TicketService::new(Arc::new(Gateway), Arc::new(Gateway));
//! let summary = service.purchase_tickets(
//!     1,
//!     &[
//!         TicketTypeRequest::adult(2),
//!         TicketTypeRequest::child(3),
//!         TicketTypeRequest::infant(1),
//!     ],
//! )?;
//!
//! assert_eq!(summary.total_price, Money::from_pounds(95));
//! assert_eq!(summary.seats_reserved, 5);
//! # Ok::<(), cinema_tickets_core::PurchaseError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod payment_gateway;
pub mod seat_booking;
pub mod ticket_service;
pub mod types;

pub use config::PurchaseRules;
pub use error::{BoxError, InvalidPurchaseError, PurchaseError};
pub use payment_gateway::{PaymentError, TicketPaymentService};
pub use seat_booking::{ReservationError, SeatReservationService};
pub use ticket_service::{TicketService, validate_purchase};
pub use types::*;
