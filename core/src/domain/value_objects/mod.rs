//! Value objects shared across entities and services.

pub mod date_range;
pub mod item_ref;
pub mod location;

pub use date_range::{merge_periods, DatePeriod};
pub use item_ref::ItemRef;
pub use location::Location;
