// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{Router, http::StatusCode};
use tokio::sync::broadcast;
use travelease_api::{
    BookingResponse, CheckoutRequest, ConfirmationResponse, FlightsResponse, LoginResponse,
    MyTripsResponse, PassengersResponse,
};

use crate::{AppState, ErrorResponse, LiveEvent, build_router};

use super::helpers::{
    BILLING_TOTAL, advance_to_billing, create_test_app, create_test_app_state, expect_json,
    send_empty, send_json, signup_test_traveler, start_test_booking,
};

#[tokio::test]
async fn test_wizard_runs_to_confirmation() {
    let app: Router = create_test_app();
    let session: LoginResponse = signup_test_traveler(&app, 1).await;
    let token: &str = &session.session_token;

    let booking_id: i64 = advance_to_billing(&app, token).await;

    let response = send_empty(&app, "GET", &format!("/bookings/{booking_id}"), Some(token)).await;
    let billing: BookingResponse = expect_json(response, StatusCode::OK).await;
    assert_eq!(billing.step_number, 6);
    assert_eq!(billing.price.total, BILLING_TOTAL);

    let response = send_json(
        &app,
        "POST",
        &format!("/bookings/{booking_id}/checkout"),
        Some(token),
        &CheckoutRequest {
            amount_paid: BILLING_TOTAL,
        },
    )
    .await;
    let paid: ConfirmationResponse = expect_json(response, StatusCode::OK).await;
    assert_eq!(paid.receipt.amount_paid, BILLING_TOTAL);
    assert_eq!(paid.route, "Delhi to Paris");

    let uri: String = format!("/bookings/{booking_id}/confirmation");
    let response = send_empty(&app, "GET", &uri, Some(token)).await;
    let confirmation: ConfirmationResponse = expect_json(response, StatusCode::OK).await;
    assert_eq!(confirmation.receipt, paid.receipt);

    let response = send_empty(&app, "GET", "/my-trips", Some(token)).await;
    let trips: MyTripsResponse = expect_json(response, StatusCode::OK).await;
    assert_eq!(trips.trips.len(), 1);
}

#[tokio::test]
async fn test_checkout_with_wrong_amount_is_rejected() {
    let app: Router = create_test_app();
    let session: LoginResponse = signup_test_traveler(&app, 1).await;
    let token: &str = &session.session_token;
    let booking_id: i64 = advance_to_billing(&app, token).await;

    let response = send_json(
        &app,
        "POST",
        &format!("/bookings/{booking_id}/checkout"),
        Some(token),
        &CheckoutRequest { amount_paid: 1 },
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let uri: String = format!("/bookings/{booking_id}/confirmation");
    let response = send_empty(&app, "GET", &uri, Some(token)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_out_of_order_step_is_unprocessable() {
    let app: Router = create_test_app();
    let session: LoginResponse = signup_test_traveler(&app, 1).await;
    let token: &str = &session.session_token;
    let booking_id: i64 = start_test_booking(&app, token).await.booking_id;

    let response = send_json(
        &app,
        "POST",
        &format!("/bookings/{booking_id}/accommodation"),
        Some(token),
        &serde_json::json!({ "accommodation_id": "hotel-1" }),
    )
    .await;

    let error: ErrorResponse = expect_json(response, StatusCode::UNPROCESSABLE_ENTITY).await;
    assert!(error.error);
}

#[tokio::test]
async fn test_back_and_reset() {
    let app: Router = create_test_app();
    let session: LoginResponse = signup_test_traveler(&app, 1).await;
    let token: &str = &session.session_token;
    let booking_id: i64 = advance_to_billing(&app, token).await;

    let uri: String = format!("/bookings/{booking_id}/back");
    let response = send_empty(&app, "POST", &uri, Some(token)).await;
    let back: BookingResponse = expect_json(response, StatusCode::OK).await;
    assert_eq!(back.step_number, 5);

    let uri: String = format!("/bookings/{booking_id}/reset");
    let response = send_empty(&app, "POST", &uri, Some(token)).await;
    let reset: BookingResponse = expect_json(response, StatusCode::OK).await;
    assert_eq!(reset.step_number, 1);
    assert!(reset.booking.trip.is_none());
}

#[tokio::test]
async fn test_other_traveler_cannot_read_booking() {
    let app: Router = create_test_app();
    let owner: LoginResponse = signup_test_traveler(&app, 1).await;
    let other: LoginResponse = signup_test_traveler(&app, 2).await;
    let booking_id: i64 = start_test_booking(&app, &owner.session_token).await.booking_id;

    let uri: String = format!("/bookings/{booking_id}");
    let response = send_empty(&app, "GET", &uri, Some(&other.session_token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = send_empty(&app, "GET", "/bookings/9999", Some(&owner.session_token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_passengers_requires_travel_id() {
    let app: Router = create_test_app();
    let session: LoginResponse = signup_test_traveler(&app, 1).await;
    let token: &str = &session.session_token;

    let response = send_empty(&app, "GET", "/passengers", Some(token)).await;
    let error: ErrorResponse = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert!(error.message.contains("travel_id"));

    let travel_id: i64 = start_test_booking(&app, token)
        .await
        .booking
        .travel_id
        .unwrap();
    let uri: String = format!("/passengers?travel_id={travel_id}");
    let response = send_empty(&app, "GET", &uri, Some(token)).await;
    let passengers: PassengersResponse = expect_json(response, StatusCode::OK).await;
    assert_eq!(passengers.passengers.len(), 1);
}

#[tokio::test]
async fn test_flight_lookup() {
    let app: Router = create_test_app();
    let session: LoginResponse = signup_test_traveler(&app, 1).await;
    let token: &str = &session.session_token;
    advance_to_billing(&app, token).await;

    let response = send_empty(&app, "GET", "/flights?from=Delhi&to=Paris", Some(token)).await;
    let flights: FlightsResponse = expect_json(response, StatusCode::OK).await;
    assert_eq!(flights.flights.len(), 1);

    let response = send_empty(&app, "GET", "/flights?to=Paris", Some(token)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_booking_events_reach_live_feed() {
    let app_state: AppState = create_test_app_state();
    let mut rx: broadcast::Receiver<LiveEvent> = app_state.live.subscribe();
    let app: Router = build_router(app_state);
    let session: LoginResponse = signup_test_traveler(&app, 1).await;
    let token: &str = &session.session_token;

    let booking_id: i64 = advance_to_billing(&app, token).await;
    send_json(
        &app,
        "POST",
        &format!("/bookings/{booking_id}/checkout"),
        Some(token),
        &CheckoutRequest {
            amount_paid: BILLING_TOTAL,
        },
    )
    .await;

    assert!(matches!(
        rx.try_recv(),
        Ok(LiveEvent::BookingStarted { ref destination, .. }) if destination == "Paris"
    ));
    assert!(matches!(
        rx.try_recv(),
        Ok(LiveEvent::BookingCompleted { amount_paid, .. }) if amount_paid == BILLING_TOTAL
    ));
}
