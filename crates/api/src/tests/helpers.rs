// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use time::Date;
use travelease_audit::Cause;
use travelease_persistence::Persistence;

use crate::{
    AuthenticatedActor, BookingResponse, BootstrapAdminRequest, BootstrapAdminResponse,
    LoginResponse, Role, SelectAccommodationRequest, SelectLocalTransportRequest,
    SelectTransportationRequest, SessionPolicy, SignupRequest, StartBookingRequest,
    ToggleAttractionRequest, bootstrap_admin, confirm_attractions, select_accommodation,
    select_local_transport, select_transportation, signup, start_booking, toggle_attraction,
};

pub const TEST_PASSWORD: &str = "Wander2026!";

/// Total of the booking `advance_to_billing` builds: two travelers, five
/// days, the cheapest flights, `hotel-1`, the Eiffel Tower and a cab.
pub const BILLING_TOTAL: i64 = 177_000;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-1"), String::from("API request"))
}

/// The date discounts are checked against.
pub fn create_test_today() -> Date {
    time::macros::date!(2026 - 05 - 01)
}

pub fn create_test_signup(n: u32) -> SignupRequest {
    SignupRequest {
        username: format!("traveler{n}"),
        email: format!("traveler{n}@example.com"),
        password: String::from(TEST_PASSWORD),
        password_confirmation: String::from(TEST_PASSWORD),
        first_name: format!("Asha{n}"),
        last_name: String::from("Rao"),
        city: Some(String::from("Pune")),
        country: Some(String::from("India")),
    }
}

/// Signs up traveler `n` and returns the session response.
pub fn signup_test_traveler(persistence: &mut Persistence, n: u32) -> LoginResponse {
    signup(persistence, &SessionPolicy::default(), &create_test_signup(n))
        .expect("Failed to sign up test traveler")
}

pub fn create_test_traveler(persistence: &mut Persistence, n: u32) -> AuthenticatedActor {
    let session: LoginResponse = signup_test_traveler(persistence, n);
    AuthenticatedActor::new(session.user_id, Role::Traveler)
}

pub fn create_test_bootstrap_request() -> BootstrapAdminRequest {
    BootstrapAdminRequest {
        username: String::from("chief"),
        email: String::from("chief@travelease.example"),
        password: String::from(TEST_PASSWORD),
        password_confirmation: String::from(TEST_PASSWORD),
        first_name: String::from("Meera"),
        last_name: String::from("Iyer"),
    }
}

/// Bootstraps the first superadmin and returns it as an admin actor.
pub fn create_test_admin(persistence: &mut Persistence) -> AuthenticatedActor {
    let response: BootstrapAdminResponse = bootstrap_admin(
        persistence,
        &create_test_bootstrap_request(),
        create_test_cause(),
    )
    .expect("Failed to bootstrap admin");
    AuthenticatedActor::new(response.user_id, Role::Admin)
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

pub fn start_test_booking(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> BookingResponse {
    start_booking(
        persistence,
        &create_test_trip_request(),
        actor,
        create_test_cause(),
    )
    .expect("Failed to start booking")
}

pub fn cheapest_flights() -> SelectTransportationRequest {
    SelectTransportationRequest {
        outbound_id: String::from("flight-outbound-1"),
        return_id: String::from("flight-return-1"),
        skip_accommodation: false,
    }
}

/// Walks a new booking through every step up to billing and returns its id.
pub fn advance_to_billing(persistence: &mut Persistence, actor: &AuthenticatedActor) -> i64 {
    let booking_id: i64 = start_test_booking(persistence, actor).booking_id;
    select_transportation(
        persistence,
        booking_id,
        &cheapest_flights(),
        actor,
        create_test_cause(),
    )
    .expect("Failed to select transportation");
    select_accommodation(
        persistence,
        booking_id,
        &SelectAccommodationRequest {
            accommodation_id: String::from("hotel-1"),
        },
        actor,
        create_test_cause(),
    )
    .expect("Failed to select accommodation");
    toggle_attraction(
        persistence,
        booking_id,
        &ToggleAttractionRequest {
            attraction_id: String::from("attraction-1"),
        },
        actor,
        create_test_cause(),
    )
    .expect("Failed to toggle attraction");
    confirm_attractions(persistence, booking_id, actor, create_test_cause())
        .expect("Failed to confirm attractions");
    select_local_transport(
        persistence,
        booking_id,
        &SelectLocalTransportRequest {
            transport_id: Some(String::from("transport-1")),
        },
        actor,
        create_test_cause(),
    )
    .expect("Failed to select local transport");
    booking_id
}
