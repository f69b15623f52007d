//! Listing routes: CRUD, calendar availability and search.

pub mod availability;
pub mod create;
pub mod delete;
pub mod get;
pub mod search;
pub mod update;

pub use availability::unavailable_periods;
pub use create::create_listing;
pub use delete::delete_listing;
pub use get::{get_listing, list_listings, my_listings};
pub use search::search_listings;
pub use update::update_listing;
