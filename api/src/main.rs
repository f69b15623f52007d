use actix_web::{web, HttpServer};
use dotenv::dotenv;
use log::{info, warn};
use std::sync::Arc;

mod app;
mod dto;
mod handlers;
mod middleware;
mod routes;

use se_core::services::auth::{AuthService, AuthServiceConfig};
use se_core::services::availability::AvailabilityService;
use se_core::services::booking::{
    BookingHoldSweep, BookingService, BookingServiceConfig, HoldSweepConfig,
};
use se_core::services::listing::ListingService;
use se_core::services::notification::{OutboxWorker, OutboxWorkerConfig};
use se_core::services::review::ReviewService;
use se_core::services::search::SearchService;
use se_core::services::token::{TokenService, TokenServiceConfig};
use se_infra::database::mysql::{
    MySqlBookingRepository, MySqlListingRepository, MySqlOutboxRepository,
    MySqlReviewRepository, MySqlUserRepository,
};
use se_infra::email::{SendGridConfig, SendGridMailer};
use se_infra::payment::{StripeCheckoutGateway, StripeConfig};
use se_shared::config::AppConfig;

use app::create_app;
use routes::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting StayEasy API Server");

    let config = AppConfig::from_env();
    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    // Database pool and repositories
    let pool = se_infra::database::create_pool(&config.database)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    let user_repo = Arc::new(MySqlUserRepository::new(pool.clone()));
    let listing_repo = Arc::new(MySqlListingRepository::new(pool.clone()));
    let booking_repo = Arc::new(MySqlBookingRepository::new(pool.clone()));
    let review_repo = Arc::new(MySqlReviewRepository::new(pool.clone()));
    let outbox_repo = Arc::new(MySqlOutboxRepository::new(pool.clone()));

    // External collaborators
    let payment_gateway = Arc::new(
        StripeCheckoutGateway::new(StripeConfig {
            secret_key: config.payment.secret_key.clone(),
            currency: config.payment.currency.clone(),
            max_retries: 3,
            retry_delay_ms: 1000,
            request_timeout_secs: 30,
        })
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?,
    );

    if config.email.api_key.is_empty() {
        warn!("SENDGRID_API_KEY is empty; outbox deliveries will fail and retry");
    }
    let mailer = Arc::new(
        SendGridMailer::new(SendGridConfig {
            api_key: config.email.api_key.clone(),
            from_address: config.email.from_address.clone(),
            from_name: config.email.from_name.clone(),
            request_timeout_secs: 30,
        })
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?,
    );

    // Core services
    let token_service = Arc::new(TokenService::new(TokenServiceConfig {
        secret: config.auth.jwt_secret.clone(),
        access_token_expiry: config.auth.access_token_expiry,
        issuer: config.auth.issuer.clone(),
    }));
    let auth_service = Arc::new(AuthService::new(
        user_repo.clone(),
        outbox_repo.clone(),
        token_service,
        AuthServiceConfig {
            otp_expiry_minutes: config.auth.otp_expiry_minutes,
            bcrypt_cost: config.auth.bcrypt_cost,
        },
    ));
    let listing_service = Arc::new(ListingService::new(listing_repo.clone()));
    let availability_service = Arc::new(AvailabilityService::new(
        listing_repo.clone(),
        booking_repo.clone(),
    ));
    let booking_service = Arc::new(BookingService::new(
        listing_repo.clone(),
        booking_repo.clone(),
        user_repo.clone(),
        availability_service.clone(),
        payment_gateway,
        outbox_repo.clone(),
        BookingServiceConfig {
            hold_ttl_minutes: config.payment.hold_ttl_minutes,
            success_url: config.payment.success_url(),
            cancel_url_template: format!("{}/listing/{{listing_id}}", config.payment.client_url),
        },
    ));
    let search_service = Arc::new(SearchService::new(
        listing_repo.clone(),
        booking_repo.clone(),
    ));
    let review_service = Arc::new(ReviewService::new(review_repo, listing_repo));

    // Background workers
    let outbox_worker = OutboxWorker::new(
        outbox_repo,
        mailer,
        OutboxWorkerConfig {
            interval_seconds: config.email.worker_interval_seconds,
            max_attempts: config.email.max_attempts,
            ..Default::default()
        },
    );
    tokio::spawn(async move { outbox_worker.run().await });

    let hold_sweep = BookingHoldSweep::new(booking_repo, HoldSweepConfig::default());
    tokio::spawn(async move { hold_sweep.run().await });

    let app_state = web::Data::new(AppState {
        auth_service,
        listing_service,
        availability_service,
        booking_service,
        search_service,
        review_service,
    });

    let auth_config = config.auth.clone();
    HttpServer::new(move || create_app(app_state.clone(), &auth_config))
        .bind(&bind_address)?
        .run()
        .await
}
