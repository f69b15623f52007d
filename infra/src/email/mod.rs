//! Outbound email implementations.

pub mod sendgrid;

#[cfg(any(feature = "mock-services", test))]
pub mod mock;

pub use sendgrid::{SendGridConfig, SendGridMailer};

#[cfg(any(feature = "mock-services", test))]
pub use mock::LoggingMailer;
