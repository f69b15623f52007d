//! Domain entities.

pub mod booking;
pub mod listing;
pub mod notification;
pub mod review;
pub mod user;

pub use booking::{Booking, BookingStatus};
pub use listing::Listing;
pub use notification::{EmailNotification, NotificationStatus};
pub use review::Review;
pub use user::{User, UserRole};
