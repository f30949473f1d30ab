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

//! The TravelEase API boundary.
//!
//! Authentication, authorization and the handler functions the HTTP server
//! calls. Handlers translate domain, core and persistence errors into
//! `ApiError` so lower-layer types never reach the wire.

mod auth;
mod csv_export;
mod error;
mod handlers;
mod password_policy;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{
    AuthenticatedActor, AuthenticationService, AuthorizationService, Role, SessionPolicy,
};
pub use csv_export::bookings_to_csv;
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    add_travel_records, admin_check, admin_login, apply_discount, bootstrap_admin, checkout,
    confirm_attractions, create_discount, dashboard, delete_discount, export_bookings_csv,
    flights_by_route, get_booking, get_confirmation, go_back, list_discounts, list_travel_records,
    list_users, login, logout, my_trips, passengers_by_travel, remove_discount, reports,
    reset_booking, resorts_by_location, seed_sample_data, select_accommodation,
    select_local_transport, select_transportation, signup, skip_accommodation, start_booking,
    today_utc, toggle_attraction,
};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    AdminCheckResponse, AdminLoginRequest, ApplyDiscountRequest, BookingResponse,
    BootstrapAdminRequest, BootstrapAdminResponse, CheckoutRequest, ConfirmationResponse,
    CreateDiscountRequest, CreateDiscountResponse, DashboardResponse, FlightsResponse,
    ListDiscountsResponse, ListUsersResponse, LoginRequest, LoginResponse, MyTripsResponse,
    PassengersResponse, ReportsResponse, ResortsResponse, SeedResponse,
    SelectAccommodationRequest, SelectLocalTransportRequest, SelectTransportationRequest,
    SignupRequest, StartBookingRequest, StepOffers, ToggleAttractionRequest,
    TravelRecordsCreatedResponse, TravelRecordsResponse,
};
