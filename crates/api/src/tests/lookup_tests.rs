// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use travelease_persistence::Persistence;

use crate::{
    ApiError, AuthenticatedActor, FlightsResponse, PassengersResponse, ResortsResponse,
    StartBookingRequest, flights_by_route, my_trips, passengers_by_travel, resorts_by_location,
    start_booking,
};

use super::helpers::{
    advance_to_billing, create_test_admin, create_test_cause, create_test_persistence,
    create_test_traveler, create_test_trip_request, start_test_booking,
};

#[test]
fn test_my_trips_lists_only_own_trips() {
    let mut persistence: Persistence = create_test_persistence();
    let first: AuthenticatedActor = create_test_traveler(&mut persistence, 1);
    let second: AuthenticatedActor = create_test_traveler(&mut persistence, 2);
    start_test_booking(&mut persistence, &first);
    start_booking(
        &mut persistence,
        &StartBookingRequest {
            destination: String::from("Goa"),
            start_date: String::from("2026-06-01"),
            end_date: String::from("2026-06-03"),
            ..create_test_trip_request()
        },
        &first,
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(my_trips(&mut persistence, &first).unwrap().trips.len(), 2);
    assert!(my_trips(&mut persistence, &second).unwrap().trips.is_empty());
}

#[test]
fn test_passengers_visible_to_owner_and_admin() {
    let mut persistence: Persistence = create_test_persistence();
    let owner: AuthenticatedActor = create_test_traveler(&mut persistence, 1);
    let other: AuthenticatedActor = create_test_traveler(&mut persistence, 2);
    let admin: AuthenticatedActor = create_test_admin(&mut persistence);
    let travel_id: i64 = start_test_booking(&mut persistence, &owner)
        .booking
        .travel_id
        .unwrap();

    let own: PassengersResponse =
        passengers_by_travel(&mut persistence, travel_id, &owner).unwrap();
    assert_eq!(own.passengers.len(), 1);
    assert_eq!(own.passengers[0].passengers_no, 2);

    let foreign: PassengersResponse =
        passengers_by_travel(&mut persistence, travel_id, &other).unwrap();
    assert!(foreign.passengers.is_empty());

    let all: PassengersResponse =
        passengers_by_travel(&mut persistence, travel_id, &admin).unwrap();
    assert_eq!(all.passengers.len(), 1);
}

#[test]
fn test_passengers_for_unknown_travel() {
    let mut persistence: Persistence = create_test_persistence();
    let traveler: AuthenticatedActor = create_test_traveler(&mut persistence, 1);

    let result: Result<PassengersResponse, ApiError> =
        passengers_by_travel(&mut persistence, 404, &traveler);

    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { ref resource_type, .. }) if resource_type == "Travel"
    ));
}

#[test]
fn test_flights_and_resorts_follow_selections() {
    let mut persistence: Persistence = create_test_persistence();
    let traveler: AuthenticatedActor = create_test_traveler(&mut persistence, 1);
    assert!(
        flights_by_route(&mut persistence, "Delhi", "Paris")
            .unwrap()
            .flights
            .is_empty()
    );

    advance_to_billing(&mut persistence, &traveler);

    let flights: FlightsResponse = flights_by_route(&mut persistence, "Delhi", "Paris").unwrap();
    assert_eq!(flights.flights.len(), 1);
    assert_eq!(flights.flights[0].name, "AirPod Airlines");
    assert_eq!(flights.flights[0].date, "2026-05-10");

    let resorts: ResortsResponse = resorts_by_location(&mut persistence, "paris").unwrap();
    assert_eq!(resorts.resorts.len(), 1);
    assert_eq!(resorts.resorts[0].name, "Grand Plaza Hotel");
    assert_eq!(resorts.resorts[0].price, 18_900);
}

#[test]
fn test_lookups_reject_blank_locations() {
    let mut persistence: Persistence = create_test_persistence();

    assert!(matches!(
        flights_by_route(&mut persistence, "", "Paris"),
        Err(ApiError::InvalidInput { ref field, .. }) if field == "from"
    ));
    assert!(matches!(
        resorts_by_location(&mut persistence, "  "),
        Err(ApiError::InvalidInput { ref field, .. }) if field == "location"
    ));
}
