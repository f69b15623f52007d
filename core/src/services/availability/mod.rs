//! Availability checking for listings.

pub mod service;

#[cfg(test)]
mod tests;

pub use service::{AvailabilityService, RangeCheck};
