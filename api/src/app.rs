//! Application factory.
//!
//! Builds the Actix application from an [`AppState`], wiring routes,
//! middleware and the default handlers.

use actix_web::{middleware::Logger, web, App, HttpResponse};

use crate::middleware::{cors::create_cors, JwtAuth};
use crate::routes::{auth, bookings, listings, reviews, AppState};

use se_core::repositories::{
    BookingRepository, ListingRepository, OutboxRepository, ReviewRepository, UserRepository,
};
use se_core::services::payment::PaymentGateway;
use se_shared::config::AuthConfig;

/// Create and configure the application with all dependencies
pub fn create_app<U, L, B, R, O, P>(
    app_state: web::Data<AppState<U, L, B, R, O, P>>,
    auth_config: &AuthConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    L: ListingRepository + 'static,
    B: BookingRepository + 'static,
    R: ReviewRepository + 'static,
    O: OutboxRepository + 'static,
    P: PaymentGateway + 'static,
{
    let cors = create_cors();
    let jwt = || JwtAuth::new(auth_config.jwt_secret.clone(), auth_config.issuer.clone());

    App::new()
        // Add application state
        .app_data(app_state)
        // Add middleware (order matters: CORS runs outermost)
        .wrap(Logger::default())
        .wrap(cors)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/signup", web::post().to(auth::signup::<U, L, B, R, O, P>))
                        .route(
                            "/verify-email",
                            web::post().to(auth::verify_email::<U, L, B, R, O, P>),
                        )
                        .route("/login", web::post().to(auth::login::<U, L, B, R, O, P>))
                        .route(
                            "/me",
                            web::get().to(auth::me::<U, L, B, R, O, P>).wrap(jwt()),
                        ),
                )
                .service(
                    web::scope("/listings")
                        // Fixed segments are registered before the {id} matcher
                        .route(
                            "/search",
                            web::get().to(listings::search_listings::<U, L, B, R, O, P>),
                        )
                        .route(
                            "/mine",
                            web::get()
                                .to(listings::my_listings::<U, L, B, R, O, P>)
                                .wrap(jwt()),
                        )
                        .service(
                            web::resource("")
                                .route(web::get().to(listings::list_listings::<U, L, B, R, O, P>))
                                .route(
                                    web::post()
                                        .to(listings::create_listing::<U, L, B, R, O, P>)
                                        .wrap(jwt()),
                                ),
                        )
                        .route(
                            "/{id}/unavailable-periods",
                            web::get().to(listings::unavailable_periods::<U, L, B, R, O, P>),
                        )
                        .service(
                            web::resource("/{id}")
                                .route(web::get().to(listings::get_listing::<U, L, B, R, O, P>))
                                .route(
                                    web::put()
                                        .to(listings::update_listing::<U, L, B, R, O, P>)
                                        .wrap(jwt()),
                                )
                                .route(
                                    web::delete()
                                        .to(listings::delete_listing::<U, L, B, R, O, P>)
                                        .wrap(jwt()),
                                ),
                        ),
                )
                .service(
                    web::scope("/bookings")
                        .route(
                            "/checkout-session",
                            web::post()
                                .to(bookings::create_checkout_session::<U, L, B, R, O, P>)
                                .wrap(jwt()),
                        )
                        .route(
                            "/sessions/{session_id}/status",
                            web::get()
                                .to(bookings::reconcile_session::<U, L, B, R, O, P>)
                                .wrap(jwt()),
                        )
                        .route(
                            "/{id}",
                            web::get()
                                .to(bookings::get_booking::<U, L, B, R, O, P>)
                                .wrap(jwt()),
                        ),
                )
                .service(
                    web::scope("/reviews")
                        .route(
                            "",
                            web::post()
                                .to(reviews::create_review::<U, L, B, R, O, P>)
                                .wrap(jwt()),
                        )
                        .route(
                            "/{id}",
                            web::delete()
                                .to(reviews::delete_review::<U, L, B, R, O, P>)
                                .wrap(jwt()),
                        )
                        .route(
                            "/{item_type}/{item_id}",
                            web::get().to(reviews::list_reviews::<U, L, B, R, O, P>),
                        ),
                ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "stay-easy-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
