// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Router fixtures for the HTTP tests.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header, request::Builder},
};
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::Mutex;
use tower::ServiceExt;
use travelease_api::{
    AdminLoginRequest, BookingResponse, BootstrapAdminRequest, BootstrapAdminResponse,
    LoginResponse, SessionPolicy, SignupRequest, StartBookingRequest,
};
use travelease_persistence::Persistence;

use crate::{AppState, LiveEventBroadcaster, build_router};

pub const TEST_PASSWORD: &str = "Wander2026!";

/// Cheapest flights, `hotel-1`, the Eiffel Tower and a cab for two
/// travelers over five days.
pub const BILLING_TOTAL: i64 = 177_000;

pub fn create_test_app_state() -> AppState {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        live: Arc::new(LiveEventBroadcaster::new()),
        sessions: SessionPolicy::default(),
    }
}

pub fn create_test_app() -> Router {
    build_router(create_test_app_state())
}

fn authorized(builder: Builder, token: Option<&str>) -> Builder {
    match token {
        Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

/// Sends a JSON body to `uri`.
pub async fn send_json<T: Serialize>(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: &T,
) -> Response<Body> {
    let request: Request<Body> = authorized(Request::builder().method(method).uri(uri), token)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Sends a request without a body.
pub async fn send_empty(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
) -> Response<Body> {
    let request: Request<Body> = authorized(Request::builder().method(method).uri(uri), token)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn read_body(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

/// Asserts the status and decodes the JSON body.
pub async fn expect_json<T: DeserializeOwned>(response: Response<Body>, status: StatusCode) -> T {
    assert_eq!(response.status(), status);
    serde_json::from_slice(&read_body(response).await).unwrap()
}

pub fn create_test_signup(n: u32) -> SignupRequest {
    SignupRequest {
        username: format!("traveler{n}"),
        email: format!("traveler{n}@example.com"),
        password: String::from(TEST_PASSWORD),
        password_confirmation: String::from(TEST_PASSWORD),
        first_name: format!("Kabir{n}"),
        last_name: String::from("Shah"),
        city: None,
        country: None,
    }
}

/// Signs up traveler `n` over HTTP.
pub async fn signup_test_traveler(app: &Router, n: u32) -> LoginResponse {
    let response = send_json(app, "POST", "/auth/signup", None, &create_test_signup(n)).await;
    expect_json(response, StatusCode::OK).await
}

/// Bootstraps the first admin and opens an admin session for it.
pub async fn create_test_admin_session(app: &Router) -> LoginResponse {
    let bootstrap = BootstrapAdminRequest {
        username: String::from("ops"),
        email: String::from("ops@travelease.example"),
        password: String::from(TEST_PASSWORD),
        password_confirmation: String::from(TEST_PASSWORD),
        first_name: String::from("Nikhil"),
        last_name: String::from("Menon"),
    };
    let response = send_json(app, "POST", "/admin/bootstrap", None, &bootstrap).await;
    let created: BootstrapAdminResponse = expect_json(response, StatusCode::OK).await;

    let login = AdminLoginRequest {
        user_id: created.user_id,
        password: String::from(TEST_PASSWORD),
    };
    let response = send_json(app, "POST", "/admin/login", None, &login).await;
    expect_json(response, StatusCode::OK).await
}

/// Delhi to Paris, 10 to 14 May 2026, two travelers.
pub fn create_test_trip_request() -> StartBookingRequest {
    StartBookingRequest {
        origin: String::from("Delhi"),
        destination: String::from("Paris"),
        start_date: String::from("2026-05-10"),
        end_date: String::from("2026-05-14"),
        travelers: 2,
        booking_id: None,
    }
}

pub async fn start_test_booking(app: &Router, token: &str) -> BookingResponse {
    let response = send_json(
        app,
        "POST",
        "/bookings",
        Some(token),
        &create_test_trip_request(),
    )
    .await;
    expect_json(response, StatusCode::OK).await
}

/// Walks a new booking up to the billing step and returns its id.
pub async fn advance_to_billing(app: &Router, token: &str) -> i64 {
    let booking_id: i64 = start_test_booking(app, token).await.booking_id;
    let steps: [(&str, serde_json::Value); 5] = [
        (
            "transportation",
            serde_json::json!({
                "outbound_id": "flight-outbound-1",
                "return_id": "flight-return-1"
            }),
        ),
        (
            "accommodation",
            serde_json::json!({ "accommodation_id": "hotel-1" }),
        ),
        (
            "attractions/toggle",
            serde_json::json!({ "attraction_id": "attraction-1" }),
        ),
        ("attractions/confirm", serde_json::json!({})),
        (
            "local-transport",
            serde_json::json!({ "transport_id": "transport-1" }),
        ),
    ];

    for (step, body) in steps {
        let uri: String = format!("/bookings/{booking_id}/{step}");
        let response = send_json(app, "POST", &uri, Some(token), &body).await;
        assert_eq!(response.status(), StatusCode::OK, "step {step} failed");
    }
    booking_id
}
