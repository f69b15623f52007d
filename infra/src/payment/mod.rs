//! Payment gateway implementations.

pub mod stripe;

pub use stripe::{StripeCheckoutGateway, StripeConfig};
