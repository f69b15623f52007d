//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the StayEasy
//! application. It provides concrete implementations for database access,
//! the payment gateway and outbound email.
//!
//! ## Architecture
//!
//! - **Database**: MySQL implementations of the core repository traits using SQLx
//! - **Payment**: Stripe Checkout client implementing `PaymentGateway`
//! - **Email**: SendGrid client implementing `Mailer`, plus a logging mock
//!   for local development
//!
//! ## Features
//!
//! - `mysql`: MySQL database support (default)
//! - `stripe-payments`: Stripe Checkout gateway (default)
//! - `sendgrid-email`: SendGrid mail delivery (default)
//! - `mock-services`: logging mock implementations for local development

use thiserror::Error;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Payment module - Stripe Checkout gateway
pub mod payment;

/// Email module - outbound mail providers
pub mod email;

/// Errors raised while constructing or talking to infrastructure services
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Payment gateway error: {0}")]
    Payment(String),

    #[error("Email service error: {0}")]
    Email(String),
}
