//! End-to-end API tests over the in-memory repositories.
//!
//! Builds the real application factory against the core mocks and drives
//! the signup, listing, booking and review flows through HTTP.

use actix_web::{test, web};
use serde_json::json;
use std::sync::Arc;

use se_api::app::create_app;
use se_api::routes::AppState;
use se_core::repositories::{
    MockBookingRepository, MockListingRepository, MockOutboxRepository, MockReviewRepository,
    MockUserRepository,
};
use se_core::services::auth::{AuthService, AuthServiceConfig};
use se_core::services::availability::AvailabilityService;
use se_core::services::booking::{BookingService, BookingServiceConfig};
use se_core::services::listing::ListingService;
use se_core::services::payment::MockPaymentGateway;
use se_core::services::review::ReviewService;
use se_core::services::search::SearchService;
use se_core::services::token::{TokenService, TokenServiceConfig};
use se_shared::config::AuthConfig;

type TestState = AppState<
    MockUserRepository,
    MockListingRepository,
    MockBookingRepository,
    MockReviewRepository,
    MockOutboxRepository,
    MockPaymentGateway,
>;

struct Fixture {
    state: web::Data<TestState>,
    auth_config: AuthConfig,
    outbox: Arc<MockOutboxRepository>,
    gateway: Arc<MockPaymentGateway>,
}

fn fixture() -> Fixture {
    let auth_config = AuthConfig::default();

    let users = Arc::new(MockUserRepository::new());
    let listings = Arc::new(MockListingRepository::new());
    let bookings = Arc::new(MockBookingRepository::new());
    let reviews = Arc::new(MockReviewRepository::new());
    let outbox = Arc::new(MockOutboxRepository::new());
    let gateway = Arc::new(MockPaymentGateway::new());

    let token_service = Arc::new(TokenService::new(TokenServiceConfig {
        secret: auth_config.jwt_secret.clone(),
        access_token_expiry: auth_config.access_token_expiry,
        issuer: auth_config.issuer.clone(),
    }));
    let availability = Arc::new(AvailabilityService::new(listings.clone(), bookings.clone()));

    let state = web::Data::new(AppState {
        auth_service: Arc::new(AuthService::new(
            users.clone(),
            outbox.clone(),
            token_service,
            AuthServiceConfig::fast_for_tests(),
        )),
        listing_service: Arc::new(ListingService::new(listings.clone())),
        availability_service: availability.clone(),
        booking_service: Arc::new(BookingService::new(
            listings.clone(),
            bookings.clone(),
            users,
            availability,
            gateway.clone(),
            outbox.clone(),
            BookingServiceConfig::default(),
        )),
        search_service: Arc::new(SearchService::new(listings.clone(), bookings)),
        review_service: Arc::new(ReviewService::new(reviews, listings)),
    });

    Fixture {
        state,
        auth_config,
        outbox,
        gateway,
    }
}

/// Pull the verification code out of the most recently queued email.
async fn queued_otp(outbox: &MockOutboxRepository) -> String {
    let emails = outbox.all().await;
    let body = &emails.last().unwrap().body_text;
    body.chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect()
}

/// Inline signup + verify, returning the bearer token.
macro_rules! signup_and_verify {
    ($app:expr, $outbox:expr, $email:expr, $role:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/signup")
            .set_json(json!({
                "name": "Test User",
                "email": $email,
                "password": "correct horse",
                "role": $role
            }))
            .to_request();
        let resp = test::call_service($app, req).await;
        assert_eq!(resp.status().as_u16(), 201);

        let otp = queued_otp($outbox).await;
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/verify-email")
            .set_json(json!({ "email": $email, "otp": otp }))
            .to_request();
        let resp = test::call_service($app, req).await;
        assert!(resp.status().is_success());
        let body: serde_json::Value = test::read_body_json(resp).await;
        body["access_token"].as_str().unwrap().to_string()
    }};
}

#[actix_rt::test]
async fn test_health_check() {
    let f = fixture();
    let app = test::init_service(create_app(f.state.clone(), &f.auth_config)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "stay-easy-api");
}

#[actix_rt::test]
async fn test_unknown_route_is_404() {
    let f = fixture();
    let app = test::init_service(create_app(f.state.clone(), &f.auth_config)).await;

    let req = test::TestRequest::get().uri("/api/v2/nope").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);
}

#[actix_rt::test]
async fn test_signup_verify_login_flow() {
    let f = fixture();
    let app = test::init_service(create_app(f.state.clone(), &f.auth_config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .set_json(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "correct horse",
            "role": "host"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);

    // Login before verification is refused
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "ada@example.com", "password": "correct horse" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 403);

    // Verify with the emailed code
    let otp = queued_otp(&f.outbox).await;
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/verify-email")
        .set_json(json!({ "email": "ada@example.com", "otp": otp }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    let token = body["access_token"].as_str().unwrap().to_string();

    // Login now works
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "ada@example.com", "password": "correct horse" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    // The token authenticates /me
    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let me: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(me["email"], "ada@example.com");
    // Credentials never leave the server
    assert!(me.get("password_hash").is_none());
}

#[actix_rt::test]
async fn test_signup_rejects_invalid_role_and_email() {
    let f = fixture();
    let app = test::init_service(create_app(f.state.clone(), &f.auth_config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .set_json(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "correct horse",
            "role": "admin"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .set_json(json!({
            "name": "Ada",
            "email": "not-an-email",
            "password": "correct horse",
            "role": "guest"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
}

#[actix_rt::test]
async fn test_protected_routes_require_token() {
    let f = fixture();
    let app = test::init_service(create_app(f.state.clone(), &f.auth_config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/listings")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 401);

    let req = test::TestRequest::post()
        .uri("/api/v1/bookings/checkout-session")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 401);
}

#[actix_rt::test]
async fn test_listing_and_checkout_flow() {
    let f = fixture();
    let app = test::init_service(create_app(f.state.clone(), &f.auth_config)).await;

    let host_token = signup_and_verify!(&app, &f.outbox, "host@example.com", "host");

    // Host publishes a listing
    let req = test::TestRequest::post()
        .uri("/api/v1/listings")
        .insert_header(("Authorization", format!("Bearer {host_token}")))
        .set_json(json!({
            "title": "Harbour loft",
            "description": "Bright loft near the quay",
            "price_per_night_cents": 10000,
            "cleaning_fee_cents": 5000,
            "max_guests": 4,
            "location": {
                "address": "1 Quay Rd",
                "city": "Sydney",
                "country": "Australia",
                "lat": -33.86,
                "lng": 151.21
            }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let listing: serde_json::Value = test::read_body_json(resp).await;
    let listing_id = listing["id"].as_str().unwrap().to_string();

    // Guest opens checkout
    let guest_token = signup_and_verify!(&app, &f.outbox, "guest@example.com", "guest");
    let req = test::TestRequest::post()
        .uri("/api/v1/bookings/checkout-session")
        .insert_header(("Authorization", format!("Bearer {guest_token}")))
        .set_json(json!({
            "listing_id": listing_id,
            "check_in": "2026-01-01",
            "check_out": "2026-01-04",
            "guests": 2
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let checkout: serde_json::Value = test::read_body_json(resp).await;
    assert!(checkout["url"].as_str().unwrap().contains("checkout.mock"));
    let booking_id = checkout["booking_id"].as_str().unwrap().to_string();

    // 3 nights at $100 plus $50 cleaning fee priced into the session
    let session_requests = f.gateway.requests().await;
    assert_eq!(session_requests.len(), 1);
    assert_eq!(session_requests[0].line_item.unit_amount_cents, 35_000);

    // The pending hold now blocks the calendar
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/listings/{listing_id}/unavailable-periods"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let periods: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(periods["periods"].as_array().unwrap().len(), 1);
    assert_eq!(periods["periods"][0]["start_date"], "2026-01-01");
    assert_eq!(periods["periods"][0]["end_date"], "2026-01-04");

    // Settle at the provider, then reconcile via the success-page poll
    let session_id = "cs_mock_1";
    f.gateway.settle(session_id).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/bookings/sessions/{session_id}/status"))
        .insert_header(("Authorization", format!("Bearer {guest_token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let reconcile: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(reconcile["status"], "paid");
    assert_eq!(reconcile["booking"]["status"], "paid");
    assert_eq!(reconcile["booking"]["id"], booking_id.as_str());

    // Conflicting second checkout is rejected
    let req = test::TestRequest::post()
        .uri("/api/v1/bookings/checkout-session")
        .insert_header(("Authorization", format!("Bearer {guest_token}")))
        .set_json(json!({
            "listing_id": listing_id,
            "check_in": "2026-01-03",
            "check_out": "2026-01-05",
            "guests": 1
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 409);

    // Search excludes the listing for the booked dates
    let req = test::TestRequest::get()
        .uri("/api/v1/listings/search?location=syd&check_in=2026-01-02&check_out=2026-01-05")
        .to_request();
    let resp = test::call_service(&app, req).await;
    let results: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(results["count"], 0);

    // But finds it for free dates
    let req = test::TestRequest::get()
        .uri("/api/v1/listings/search?location=syd&check_in=2026-02-01&check_out=2026-02-05")
        .to_request();
    let resp = test::call_service(&app, req).await;
    let results: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(results["count"], 1);
}

#[actix_rt::test]
async fn test_review_flow() {
    let f = fixture();
    let app = test::init_service(create_app(f.state.clone(), &f.auth_config)).await;

    let host_token = signup_and_verify!(&app, &f.outbox, "host@example.com", "host");
    let req = test::TestRequest::post()
        .uri("/api/v1/listings")
        .insert_header(("Authorization", format!("Bearer {host_token}")))
        .set_json(json!({
            "title": "Harbour loft",
            "description": "Bright loft near the quay",
            "price_per_night_cents": 10000,
            "location": {
                "address": "1 Quay Rd",
                "city": "Sydney",
                "country": "Australia"
            }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let listing: serde_json::Value = test::read_body_json(resp).await;
    let listing_id = listing["id"].as_str().unwrap().to_string();

    let guest_token = signup_and_verify!(&app, &f.outbox, "guest@example.com", "guest");
    let req = test::TestRequest::post()
        .uri("/api/v1/reviews")
        .insert_header(("Authorization", format!("Bearer {guest_token}")))
        .set_json(json!({
            "item_type": "listing",
            "item_id": listing_id,
            "rating": 5,
            "comment": "Spotless and quiet"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let created: serde_json::Value = test::read_body_json(resp).await;
    let review_id = created["review"]["id"].as_str().unwrap().to_string();

    // Anyone can list reviews for the item
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/reviews/listing/{listing_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let listed: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(listed["reviews"].as_array().unwrap().len(), 1);

    // A third account is neither author nor host and cannot delete
    let other_token = signup_and_verify!(&app, &f.outbox, "other@example.com", "guest");
    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/reviews/{review_id}"))
        .insert_header(("Authorization", format!("Bearer {other_token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 403);

    // The listing host can
    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/reviews/{review_id}"))
        .insert_header(("Authorization", format!("Bearer {host_token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}
