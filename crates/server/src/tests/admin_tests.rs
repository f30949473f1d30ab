// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{
    Router,
    http::{StatusCode, header},
};
use tokio::sync::broadcast;
use travelease_api::{
    BookingResponse, CheckoutRequest, CreateDiscountResponse, DashboardResponse,
    ListDiscountsResponse, ListUsersResponse, LoginResponse, ReportsResponse, SeedResponse,
    TravelRecordsCreatedResponse, TravelRecordsResponse,
};

use crate::{AppState, LiveEvent, WriteResponse, build_router};

use super::helpers::{
    BILLING_TOTAL, advance_to_billing, create_test_admin_session, create_test_app,
    create_test_app_state, expect_json, read_body, send_empty, send_json, signup_test_traveler,
};

fn summer_discount() -> serde_json::Value {
    serde_json::json!({
        "code": "summer10",
        "discount_type": "percentage",
        "amount": 10
    })
}

#[tokio::test]
async fn test_traveler_is_forbidden_from_admin_routes() {
    let app: Router = create_test_app();
    let session: LoginResponse = signup_test_traveler(&app, 1).await;
    let token: &str = &session.session_token;

    for uri in [
        "/admin/users",
        "/admin/discounts",
        "/admin/travels",
        "/admin/dashboard",
        "/admin/reports",
        "/admin/reports/export",
    ] {
        let response = send_empty(&app, "GET", uri, Some(token)).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{uri}");
    }

    let response = send_empty(&app, "POST", "/admin/seed", Some(token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_discount_lifecycle() {
    let app_state: AppState = create_test_app_state();
    let mut rx: broadcast::Receiver<LiveEvent> = app_state.live.subscribe();
    let app: Router = build_router(app_state);
    let admin: LoginResponse = create_test_admin_session(&app).await;
    let token: &str = &admin.session_token;

    let response = send_json(
        &app,
        "POST",
        "/admin/discounts",
        Some(token),
        &summer_discount(),
    )
    .await;
    let created: CreateDiscountResponse = expect_json(response, StatusCode::OK).await;
    assert_eq!(created.discount.code, "SUMMER10");
    let discount_id: i64 = created.discount.discount_id;
    assert_eq!(
        rx.try_recv().unwrap(),
        LiveEvent::DiscountCreated {
            discount_id,
            code: String::from("SUMMER10"),
        }
    );

    let response = send_json(
        &app,
        "POST",
        "/admin/discounts",
        Some(token),
        &summer_discount(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = send_empty(&app, "GET", "/admin/discounts", Some(token)).await;
    let listed: ListDiscountsResponse = expect_json(response, StatusCode::OK).await;
    assert_eq!(listed.discounts.len(), 1);

    let uri: String = format!("/admin/discounts/{discount_id}");
    let response = send_empty(&app, "DELETE", &uri, Some(token)).await;
    let deleted: WriteResponse = expect_json(response, StatusCode::OK).await;
    assert!(deleted.success);
    assert_eq!(
        rx.try_recv().unwrap(),
        LiveEvent::DiscountDeleted { discount_id }
    );

    let response = send_empty(&app, "DELETE", &uri, Some(token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_discount_applies_and_is_removed_over_http() {
    let app: Router = create_test_app();
    let admin: LoginResponse = create_test_admin_session(&app).await;
    send_json(
        &app,
        "POST",
        "/admin/discounts",
        Some(&admin.session_token),
        &summer_discount(),
    )
    .await;
    let traveler: LoginResponse = signup_test_traveler(&app, 1).await;
    let token: &str = &traveler.session_token;
    let booking_id: i64 = advance_to_billing(&app, token).await;
    let uri: String = format!("/bookings/{booking_id}/discount");

    let code = serde_json::json!({ "code": "SUMMER10" });
    let response = send_json(&app, "POST", &uri, Some(token), &code).await;
    let discounted: BookingResponse = expect_json(response, StatusCode::OK).await;
    assert_eq!(discounted.price.total, BILLING_TOTAL - 17_700);

    let response = send_empty(&app, "DELETE", &uri, Some(token)).await;
    let restored: BookingResponse = expect_json(response, StatusCode::OK).await;
    assert_eq!(restored.price.total, BILLING_TOTAL);

    let unknown = serde_json::json!({ "code": "NOPE" });
    let response = send_json(&app, "POST", &uri, Some(token), &unknown).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dashboard_reports_and_export() {
    let app: Router = create_test_app();
    let admin: LoginResponse = create_test_admin_session(&app).await;
    let traveler: LoginResponse = signup_test_traveler(&app, 1).await;
    let token: &str = &traveler.session_token;
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
    let admin_token: &str = &admin.session_token;

    let response = send_empty(&app, "GET", "/admin/dashboard", Some(admin_token)).await;
    let dashboard: DashboardResponse = expect_json(response, StatusCode::OK).await;
    assert_eq!(dashboard.stats.total_bookings, 1);
    assert_eq!(dashboard.stats.total_revenue, BILLING_TOTAL);

    let response = send_empty(&app, "GET", "/admin/reports", Some(admin_token)).await;
    let reports: ReportsResponse = expect_json(response, StatusCode::OK).await;
    assert_eq!(reports.average_booking_value, BILLING_TOTAL);

    let response = send_empty(&app, "GET", "/admin/reports/export", Some(admin_token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    let csv: String = String::from_utf8(read_body(response).await).unwrap();
    assert_eq!(csv.lines().count(), 2);
    assert!(csv.contains("traveler1@example.com"));
}

#[tokio::test]
async fn test_seed_travel_records_and_user_search() {
    let app_state: AppState = create_test_app_state();
    let mut rx: broadcast::Receiver<LiveEvent> = app_state.live.subscribe();
    let app: Router = build_router(app_state);
    let admin: LoginResponse = create_test_admin_session(&app).await;
    let token: &str = &admin.session_token;

    let response = send_empty(&app, "POST", "/admin/seed", Some(token)).await;
    let seeded: SeedResponse = expect_json(response, StatusCode::OK).await;
    assert_eq!(seeded.summary.users_created, 10);
    assert!(matches!(
        rx.try_recv(),
        Ok(LiveEvent::SampleDataSeeded {
            users_created: 10,
            ..
        })
    ));

    let response = send_empty(&app, "POST", "/admin/travel-records", Some(token)).await;
    let created: TravelRecordsCreatedResponse = expect_json(response, StatusCode::OK).await;
    assert_eq!(created.summary.travel_ids.len(), 5);

    let response = send_empty(&app, "GET", "/admin/travels", Some(token)).await;
    let travels: TravelRecordsResponse = expect_json(response, StatusCode::OK).await;
    assert_eq!(travels.records.len(), 5);

    let response = send_empty(&app, "GET", "/admin/users?search=user3%40", Some(token)).await;
    let users: ListUsersResponse = expect_json(response, StatusCode::OK).await;
    assert_eq!(users.total, 1);
    assert_eq!(users.users[0].email, "user3@example.com");
}

#[tokio::test]
async fn test_live_feed_requires_session() {
    let app: Router = create_test_app();

    let response = send_empty(&app, "GET", "/admin/live", None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
