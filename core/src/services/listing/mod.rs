//! Listing CRUD and host authorization.

pub mod service;

#[cfg(test)]
mod tests;

pub use service::{ListingDraft, ListingService, ListingUpdate};
