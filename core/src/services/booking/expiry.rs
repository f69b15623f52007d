//! Hold expiry sweep for abandoned checkout sessions.
//!
//! Availability queries already ignore expired holds, so the sweep is not
//! load-bearing for correctness; it keeps the bookings table tidy by moving
//! lapsed pending rows to cancelled.

use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info};

use crate::errors::DomainError;
use crate::repositories::BookingRepository;

/// Configuration for the hold expiry sweep
#[derive(Debug, Clone)]
pub struct HoldSweepConfig {
    /// How often to run the sweep (in seconds)
    pub interval_seconds: u64,
    /// Maximum number of holds to cancel in one batch
    pub batch_size: u32,
    /// Whether the sweep is enabled
    pub enabled: bool,
}

impl Default for HoldSweepConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 300,
            batch_size: 500,
            enabled: true,
        }
    }
}

/// Summary of one sweep cycle
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepResult {
    /// Expired holds cancelled this cycle
    pub cancelled: usize,
}

/// Background sweep cancelling pending bookings whose hold has lapsed
pub struct BookingHoldSweep<B: BookingRepository> {
    booking_repository: Arc<B>,
    config: HoldSweepConfig,
}

impl<B: BookingRepository> BookingHoldSweep<B> {
    /// Create a new hold expiry sweep
    pub fn new(booking_repository: Arc<B>, config: HoldSweepConfig) -> Self {
        Self {
            booking_repository,
            config,
        }
    }

    /// Run a single sweep cycle
    pub async fn run_sweep(&self) -> Result<SweepResult, DomainError> {
        if !self.config.enabled {
            return Ok(SweepResult::default());
        }

        let now = Utc::now();
        let expired = self
            .booking_repository
            .find_expired_holds(now, self.config.batch_size)
            .await?;

        let mut result = SweepResult::default();
        for mut booking in expired {
            booking.cancel();
            match self.booking_repository.update(booking).await {
                Ok(booking) => {
                    result.cancelled += 1;
                    info!(
                        booking_id = %booking.id,
                        session_id = %booking.checkout_session_id,
                        "Cancelled expired booking hold"
                    );
                }
                Err(e) => {
                    error!(error = %e, "Failed to cancel expired hold");
                }
            }
        }

        Ok(result)
    }

    /// Run the sweep loop until the task is aborted
    pub async fn run(&self) {
        let mut interval =
            tokio::time::interval(std::time::Duration::from_secs(self.config.interval_seconds));
        loop {
            interval.tick().await;
            if let Err(e) = self.run_sweep().await {
                error!(error = %e, "Hold expiry sweep failed");
            }
        }
    }
}
