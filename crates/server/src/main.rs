// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod live;
mod session;

#[cfg(test)]
mod tests;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState, WebSocketUpgrade},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::{Duration, OffsetDateTime};
use tokio::sync::Mutex;
use tracing::{error, info};
use travelease_api::{
    AdminCheckResponse, AdminLoginRequest, ApiError, ApplyDiscountRequest, AuthenticatedActor,
    AuthorizationService, BookingResponse, BootstrapAdminRequest, BootstrapAdminResponse,
    CheckoutRequest, ConfirmationResponse, CreateDiscountRequest, CreateDiscountResponse,
    DashboardResponse, FlightsResponse, ListDiscountsResponse, ListUsersResponse, LoginRequest,
    LoginResponse, MyTripsResponse, PassengersResponse, ReportsResponse, ResortsResponse,
    SeedResponse, SelectAccommodationRequest, SelectLocalTransportRequest,
    SelectTransportationRequest, SessionPolicy, SignupRequest, StartBookingRequest,
    ToggleAttractionRequest, TravelRecordsCreatedResponse, TravelRecordsResponse,
    add_travel_records, admin_check, admin_login, apply_discount, bootstrap_admin, checkout,
    confirm_attractions, create_discount, dashboard, delete_discount, export_bookings_csv,
    flights_by_route, get_booking, get_confirmation, go_back, list_discounts, list_travel_records,
    list_users, login, logout, my_trips, passengers_by_travel, remove_discount, reports,
    reset_booking, resorts_by_location, seed_sample_data, select_accommodation,
    select_local_transport, select_transportation, signup, skip_accommodation, start_booking,
    today_utc, toggle_attraction,
};
use travelease_audit::Cause;
use travelease_persistence::Persistence;

use live::{LiveEvent, LiveEventBroadcaster};
use session::{SessionError, SessionUser, bearer_token};

/// TravelEase Server - HTTP server for the TravelEase booking system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "TRAVELEASE_DATABASE")]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, env = "TRAVELEASE_BIND", default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, env = "TRAVELEASE_PORT", default_value_t = 3000)]
    port: u16,

    /// Lifetime of a traveler session, in days
    #[arg(long, env = "TRAVELEASE_SESSION_DAYS", default_value_t = 30)]
    session_days: i64,

    /// Lifetime of an admin session, in hours
    #[arg(long, env = "TRAVELEASE_ADMIN_SESSION_HOURS", default_value_t = 24)]
    admin_session_hours: i64,

    /// Log filter used when `RUST_LOG` is unset
    #[arg(long, env = "TRAVELEASE_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Args {
    const fn session_policy(&self) -> SessionPolicy {
        SessionPolicy {
            traveler_lifetime: Duration::days(self.session_days),
            admin_lifetime: Duration::hours(self.admin_session_hours),
        }
    }
}

/// Application state shared across handlers.
///
/// Persistence sits behind a Mutex; handlers hold the lock only for the
/// duration of one API call.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
    live: Arc<LiveEventBroadcaster>,
    sessions: SessionPolicy,
}

// ============================================================================
// Wire types
// ============================================================================

/// Search box shared by the admin list views.
#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PassengersQuery {
    #[serde(default)]
    travel_id: Option<i64>,
}

/// Blank values are rejected by the API layer with a field-specific message.
#[derive(Debug, Deserialize)]
struct FlightsQuery {
    #[serde(default)]
    from: String,
    #[serde(default)]
    to: String,
}

#[derive(Debug, Deserialize)]
struct ResortsQuery {
    #[serde(default)]
    location: String,
}

/// Response for writes that return nothing else.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WriteResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    status: StatusCode,
    message: String,
}

impl HttpError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } | ApiError::PasswordPolicyViolation { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error while handling request");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<SessionError> for HttpError {
    fn from(err: SessionError) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: err.message(),
        }
    }
}

/// Builds the audit cause for one request.
fn request_cause(description: &str) -> Cause {
    let nanos: i128 = OffsetDateTime::now_utc().unix_timestamp_nanos();
    Cause::new(format!("req-{nanos}"), description.to_string())
}

// ============================================================================
// Account handlers
// ============================================================================

/// Handler for POST `/auth/signup`.
async fn handle_signup(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    info!(username = %req.username, "Handling signup request");

    let mut persistence = app_state.persistence.lock().await;
    let response: LoginResponse = signup(&mut persistence, &app_state.sessions, &req)?;
    drop(persistence);

    info!(user_id = response.user_id, "Traveler signed up");
    Ok(Json(response))
}

/// Handler for POST `/auth/login`.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    info!("Handling login request");

    let mut persistence = app_state.persistence.lock().await;
    let response: LoginResponse = login(&mut persistence, &app_state.sessions, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/admin/login`.
async fn handle_admin_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AdminLoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    info!(user_id = req.user_id, "Handling admin login request");

    let mut persistence = app_state.persistence.lock().await;
    let response: LoginResponse = admin_login(&mut persistence, &app_state.sessions, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/auth/logout`.
///
/// Ends the session named by the bearer token.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<WriteResponse>, HttpError> {
    let token: &str = bearer_token(&headers)?;

    let mut persistence = app_state.persistence.lock().await;
    logout(&mut persistence, token)?;
    drop(persistence);

    Ok(Json(WriteResponse {
        success: true,
        message: Some(String::from("Logged out")),
    }))
}

// ============================================================================
// Booking wizard handlers
// ============================================================================

/// Handler for POST `/bookings`.
///
/// Starts a booking, or resumes the traveler's draft when one is open.
async fn handle_start_booking(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Json(req): Json<StartBookingRequest>,
) -> Result<Json<BookingResponse>, HttpError> {
    info!(
        user_id = actor.user_id,
        origin = %req.origin,
        destination = %req.destination,
        travelers = req.travelers,
        "Handling start_booking request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: BookingResponse = start_booking(
        &mut persistence,
        &req,
        &actor,
        request_cause("Start booking"),
    )?;
    drop(persistence);

    app_state.live.broadcast(&LiveEvent::BookingStarted {
        booking_id: response.booking_id,
        user_id: response.user_id,
        destination: req.destination.trim().to_string(),
    });

    Ok(Json(response))
}

/// Handler for GET `/bookings/{id}`.
async fn handle_get_booking(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(booking_id): Path<i64>,
) -> Result<Json<BookingResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: BookingResponse = get_booking(&mut persistence, booking_id, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/bookings/{id}/transportation`.
async fn handle_select_transportation(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(booking_id): Path<i64>,
    Json(req): Json<SelectTransportationRequest>,
) -> Result<Json<BookingResponse>, HttpError> {
    info!(
        booking_id,
        outbound = %req.outbound_id,
        return_leg = %req.return_id,
        skip_accommodation = req.skip_accommodation,
        "Handling select_transportation request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: BookingResponse = select_transportation(
        &mut persistence,
        booking_id,
        &req,
        &actor,
        request_cause("Select transportation"),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/bookings/{id}/accommodation`.
async fn handle_select_accommodation(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(booking_id): Path<i64>,
    Json(req): Json<SelectAccommodationRequest>,
) -> Result<Json<BookingResponse>, HttpError> {
    info!(
        booking_id,
        accommodation = %req.accommodation_id,
        "Handling select_accommodation request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: BookingResponse = select_accommodation(
        &mut persistence,
        booking_id,
        &req,
        &actor,
        request_cause("Select accommodation"),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/bookings/{id}/accommodation/skip`.
async fn handle_skip_accommodation(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(booking_id): Path<i64>,
) -> Result<Json<BookingResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: BookingResponse = skip_accommodation(
        &mut persistence,
        booking_id,
        &actor,
        request_cause("Skip accommodation"),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/bookings/{id}/attractions/toggle`.
async fn handle_toggle_attraction(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(booking_id): Path<i64>,
    Json(req): Json<ToggleAttractionRequest>,
) -> Result<Json<BookingResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: BookingResponse = toggle_attraction(
        &mut persistence,
        booking_id,
        &req,
        &actor,
        request_cause("Toggle attraction"),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/bookings/{id}/attractions/confirm`.
async fn handle_confirm_attractions(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(booking_id): Path<i64>,
) -> Result<Json<BookingResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: BookingResponse = confirm_attractions(
        &mut persistence,
        booking_id,
        &actor,
        request_cause("Confirm attractions"),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/bookings/{id}/local-transport`.
async fn handle_select_local_transport(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(booking_id): Path<i64>,
    Json(req): Json<SelectLocalTransportRequest>,
) -> Result<Json<BookingResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: BookingResponse = select_local_transport(
        &mut persistence,
        booking_id,
        &req,
        &actor,
        request_cause("Select local transport"),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/bookings/{id}/discount`.
async fn handle_apply_discount(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(booking_id): Path<i64>,
    Json(req): Json<ApplyDiscountRequest>,
) -> Result<Json<BookingResponse>, HttpError> {
    info!(booking_id, code = %req.code, "Handling apply_discount request");

    let mut persistence = app_state.persistence.lock().await;
    let response: BookingResponse = apply_discount(
        &mut persistence,
        booking_id,
        &req,
        &actor,
        request_cause("Apply discount"),
        today_utc(),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/bookings/{id}/discount`.
async fn handle_remove_discount(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(booking_id): Path<i64>,
) -> Result<Json<BookingResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: BookingResponse = remove_discount(
        &mut persistence,
        booking_id,
        &actor,
        request_cause("Remove discount"),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/bookings/{id}/checkout`.
///
/// Records payment and broadcasts the completed booking.
async fn handle_checkout(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(booking_id): Path<i64>,
    Json(req): Json<CheckoutRequest>,
) -> Result<Json<ConfirmationResponse>, HttpError> {
    info!(
        booking_id,
        amount_paid = req.amount_paid,
        "Handling checkout request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ConfirmationResponse = checkout(
        &mut persistence,
        booking_id,
        &req,
        &actor,
        request_cause("Checkout"),
        today_utc(),
    )?;
    drop(persistence);

    info!(
        booking_id,
        order_id = response.receipt.order_id,
        billing_id = response.receipt.billing_id,
        "Booking paid"
    );
    app_state.live.broadcast(&LiveEvent::BookingCompleted {
        booking_id,
        order_id: response.receipt.order_id,
        amount_paid: response.receipt.amount_paid,
    });

    Ok(Json(response))
}

/// Handler for GET `/bookings/{id}/confirmation`.
async fn handle_get_confirmation(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(booking_id): Path<i64>,
) -> Result<Json<ConfirmationResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ConfirmationResponse = get_confirmation(&mut persistence, booking_id, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/bookings/{id}/back`.
async fn handle_go_back(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(booking_id): Path<i64>,
) -> Result<Json<BookingResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: BookingResponse =
        go_back(&mut persistence, booking_id, &actor, request_cause("Go back"))?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/bookings/{id}/reset`.
async fn handle_reset_booking(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(booking_id): Path<i64>,
) -> Result<Json<BookingResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: BookingResponse = reset_booking(
        &mut persistence,
        booking_id,
        &actor,
        request_cause("Reset booking"),
    )?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Lookup handlers
// ============================================================================

/// Handler for GET `/my-trips`.
async fn handle_my_trips(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
) -> Result<Json<MyTripsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: MyTripsResponse = my_trips(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/passengers?travel_id=`.
async fn handle_passengers(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Query(query): Query<PassengersQuery>,
) -> Result<Json<PassengersResponse>, HttpError> {
    let travel_id: i64 = query
        .travel_id
        .ok_or_else(|| HttpError::bad_request("travel_id query parameter is required"))?;

    let mut persistence = app_state.persistence.lock().await;
    let response: PassengersResponse = passengers_by_travel(&mut persistence, travel_id, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/flights?from=&to=`.
async fn handle_flights(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_actor, _user): SessionUser,
    Query(query): Query<FlightsQuery>,
) -> Result<Json<FlightsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: FlightsResponse = flights_by_route(&mut persistence, &query.from, &query.to)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/resorts?location=`.
async fn handle_resorts(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_actor, _user): SessionUser,
    Query(query): Query<ResortsQuery>,
) -> Result<Json<ResortsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ResortsResponse = resorts_by_location(&mut persistence, &query.location)?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Admin handlers
// ============================================================================

/// Handler for GET `/admin/users?search=`.
async fn handle_list_users(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ListUsersResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListUsersResponse =
        list_users(&mut persistence, &actor, query.search.as_deref())?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/admin/discounts`.
async fn handle_list_discounts(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
) -> Result<Json<ListDiscountsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListDiscountsResponse = list_discounts(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/admin/discounts`.
async fn handle_create_discount(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Json(req): Json<CreateDiscountRequest>,
) -> Result<Json<CreateDiscountResponse>, HttpError> {
    info!(
        user_id = actor.user_id,
        code = %req.code,
        discount_type = %req.discount_type,
        "Handling create_discount request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateDiscountResponse = create_discount(
        &mut persistence,
        &req,
        &actor,
        request_cause("Create discount"),
    )?;
    drop(persistence);

    app_state.live.broadcast(&LiveEvent::DiscountCreated {
        discount_id: response.discount.discount_id,
        code: response.discount.code.clone(),
    });

    Ok(Json(response))
}

/// Handler for DELETE `/admin/discounts/{id}`.
async fn handle_delete_discount(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(discount_id): Path<i64>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        user_id = actor.user_id,
        discount_id, "Handling delete_discount request"
    );

    let mut persistence = app_state.persistence.lock().await;
    delete_discount(
        &mut persistence,
        discount_id,
        &actor,
        request_cause("Delete discount"),
    )?;
    drop(persistence);

    app_state
        .live
        .broadcast(&LiveEvent::DiscountDeleted { discount_id });

    Ok(Json(WriteResponse {
        success: true,
        message: Some(format!("Deleted discount {discount_id}")),
    }))
}

/// Handler for GET `/admin/travels?search=`.
async fn handle_list_travel_records(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<TravelRecordsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: TravelRecordsResponse =
        list_travel_records(&mut persistence, &actor, query.search.as_deref())?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/admin/dashboard?search=`.
async fn handle_dashboard(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<DashboardResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: DashboardResponse =
        dashboard(&mut persistence, &actor, query.search.as_deref())?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/admin/reports`.
async fn handle_reports(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
) -> Result<Json<ReportsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ReportsResponse = reports(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/admin/reports/export`.
///
/// Returns every paid booking as a CSV attachment.
async fn handle_export_reports(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let csv: String = export_bookings_csv(&mut persistence, &actor)?;
    drop(persistence);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"travelease-bookings.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}

/// Handler for POST `/admin/seed`.
async fn handle_seed(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
) -> Result<Json<SeedResponse>, HttpError> {
    info!(user_id = actor.user_id, "Handling seed request");

    let mut persistence = app_state.persistence.lock().await;
    let response: SeedResponse =
        seed_sample_data(&mut persistence, &actor, request_cause("Seed sample data"))?;
    drop(persistence);

    app_state.live.broadcast(&LiveEvent::SampleDataSeeded {
        users_created: response.summary.users_created,
        agencies_created: response.summary.agencies_created,
        stations_created: response.summary.stations_created,
    });

    Ok(Json(response))
}

/// Handler for POST `/admin/travel-records`.
async fn handle_add_travel_records(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
) -> Result<Json<TravelRecordsCreatedResponse>, HttpError> {
    info!(user_id = actor.user_id, "Handling add_travel_records request");

    let mut persistence = app_state.persistence.lock().await;
    let response: TravelRecordsCreatedResponse = add_travel_records(
        &mut persistence,
        &actor,
        request_cause("Add travel records"),
        today_utc(),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/admin/check`.
///
/// Unauthenticated so a fresh install can tell whether to offer bootstrap.
async fn handle_admin_check(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<AdminCheckResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: AdminCheckResponse = admin_check(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/admin/bootstrap`.
///
/// Creates the first superadmin. Refused once any admin exists.
async fn handle_bootstrap_admin(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<BootstrapAdminRequest>,
) -> Result<Json<BootstrapAdminResponse>, HttpError> {
    info!(username = %req.username, "Handling bootstrap_admin request");

    let mut persistence = app_state.persistence.lock().await;
    let response: BootstrapAdminResponse =
        bootstrap_admin(&mut persistence, &req, request_cause("Bootstrap admin"))?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/admin/live`.
///
/// Upgrades an admin session to the live activity WebSocket.
async fn handle_live(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    ws: WebSocketUpgrade,
) -> Result<Response, HttpError> {
    AuthorizationService::authorize_admin(&actor, "live_feed").map_err(ApiError::from)?;

    let broadcaster: Arc<LiveEventBroadcaster> = Arc::clone(&app_state.live);
    Ok(ws.on_upgrade(move |socket| live::stream_events(socket, broadcaster)))
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/auth/signup", post(handle_signup))
        .route("/auth/login", post(handle_login))
        .route("/auth/logout", post(handle_logout))
        .route("/bookings", post(handle_start_booking))
        .route("/bookings/{id}", get(handle_get_booking))
        .route(
            "/bookings/{id}/transportation",
            post(handle_select_transportation),
        )
        .route(
            "/bookings/{id}/accommodation",
            post(handle_select_accommodation),
        )
        .route(
            "/bookings/{id}/accommodation/skip",
            post(handle_skip_accommodation),
        )
        .route(
            "/bookings/{id}/attractions/toggle",
            post(handle_toggle_attraction),
        )
        .route(
            "/bookings/{id}/attractions/confirm",
            post(handle_confirm_attractions),
        )
        .route(
            "/bookings/{id}/local-transport",
            post(handle_select_local_transport),
        )
        .route(
            "/bookings/{id}/discount",
            post(handle_apply_discount).delete(handle_remove_discount),
        )
        .route("/bookings/{id}/checkout", post(handle_checkout))
        .route("/bookings/{id}/confirmation", get(handle_get_confirmation))
        .route("/bookings/{id}/back", post(handle_go_back))
        .route("/bookings/{id}/reset", post(handle_reset_booking))
        .route("/my-trips", get(handle_my_trips))
        .route("/passengers", get(handle_passengers))
        .route("/flights", get(handle_flights))
        .route("/resorts", get(handle_resorts))
        .route("/admin/login", post(handle_admin_login))
        .route("/admin/check", get(handle_admin_check))
        .route("/admin/bootstrap", post(handle_bootstrap_admin))
        .route("/admin/users", get(handle_list_users))
        .route(
            "/admin/discounts",
            get(handle_list_discounts).post(handle_create_discount),
        )
        .route("/admin/discounts/{id}", delete(handle_delete_discount))
        .route("/admin/travels", get(handle_list_travel_records))
        .route("/admin/dashboard", get(handle_dashboard))
        .route("/admin/reports", get(handle_reports))
        .route("/admin/reports/export", get(handle_export_reports))
        .route("/admin/seed", post(handle_seed))
        .route("/admin/travel-records", post(handle_add_travel_records))
        .route("/admin/live", get(handle_live))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level)),
        )
        .init();

    info!("Initializing TravelEase server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!(path = %db_path, "Using file-based database");
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        live: Arc::new(LiveEventBroadcaster::new()),
        sessions: args.session_policy(),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!(%addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
