//! Email notification outbox.
//!
//! State changes never send mail inline. They enqueue an
//! [`EmailNotification`](crate::domain::entities::notification::EmailNotification)
//! through the outbox repository, and [`OutboxWorker`] drains the queue with
//! retries, decoupling delivery reliability from the request path.

pub mod mock;
pub mod templates;
pub mod traits;
pub mod worker;


pub use mock::MockMailer;
pub use traits::Mailer;
pub use worker::{OutboxWorker, OutboxWorkerConfig};
