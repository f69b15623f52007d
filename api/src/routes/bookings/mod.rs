//! Booking routes: checkout session creation, reconciliation, lookup.

pub mod checkout;
pub mod get;
pub mod reconcile;

pub use checkout::create_checkout_session;
pub use get::get_booking;
pub use reconcile::reconcile_session;
