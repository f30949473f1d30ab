// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking wizard handlers, driven step by step.

use travelease::WizardStep;
use travelease_persistence::{PassengerData, Persistence, TravelDetails, TripSummary};

use crate::{
    ApiError, AuthenticatedActor, BookingResponse, CheckoutRequest, ConfirmationResponse,
    SelectAccommodationRequest, SelectTransportationRequest, StartBookingRequest,
    ToggleAttractionRequest, checkout, get_booking, get_confirmation, go_back, my_trips,
    reset_booking, select_accommodation, select_transportation, skip_accommodation,
    start_booking, toggle_attraction,
};

use super::helpers::{
    BILLING_TOTAL, advance_to_billing, cheapest_flights, create_test_admin, create_test_cause,
    create_test_persistence, create_test_today, create_test_traveler, create_test_trip_request,
    start_test_booking,
};

fn pay(
    persistence: &mut Persistence,
    booking_id: i64,
    actor: &AuthenticatedActor,
    amount_paid: i64,
) -> Result<ConfirmationResponse, ApiError> {
    checkout(
        persistence,
        booking_id,
        &CheckoutRequest { amount_paid },
        actor,
        create_test_cause(),
        create_test_today(),
    )
}

#[test]
fn test_start_booking_records_travel_and_passenger() {
    let mut persistence: Persistence = create_test_persistence();
    let traveler: AuthenticatedActor = create_test_traveler(&mut persistence, 1);

    let response: BookingResponse = start_test_booking(&mut persistence, &traveler);

    assert_eq!(response.step, WizardStep::Transportation);
    assert_eq!(response.step_number, 2);
    assert_eq!(response.step_label, "Transportation");
    assert_eq!(response.user_id, traveler.user_id);
    // International trips are offered three flights each way.
    assert_eq!(response.offers.transport.len(), 6);
    assert!(response.offers.accommodations.is_empty());
    assert_eq!(response.price.total, 0);

    let travel_id: i64 = response.booking.travel_id.unwrap();
    let travel: TravelDetails = persistence.get_travel_by_id(travel_id).unwrap().unwrap();
    assert_eq!(travel.station.name, "Delhi to Paris");
    assert_eq!(travel.travel.duration, 5);
    assert_eq!(travel.travel.date, "2026-05-10");
    assert_eq!(travel.travel.dates, "2026-05-10 to 2026-05-14");

    let passengers: Vec<PassengerData> =
        persistence.get_passengers_by_travel_id(travel_id).unwrap();
    assert_eq!(passengers.len(), 1);
    assert_eq!(passengers[0].user_id, traveler.user_id);
    assert_eq!(passengers[0].passengers_no, 2);
}

#[test]
fn test_start_booking_validates_trip() {
    let mut persistence: Persistence = create_test_persistence();
    let traveler: AuthenticatedActor = create_test_traveler(&mut persistence, 1);

    let cases: [(StartBookingRequest, &str); 4] = [
        (
            StartBookingRequest {
                end_date: String::from("2026-05-01"),
                ..create_test_trip_request()
            },
            "end_date",
        ),
        (
            StartBookingRequest {
                travelers: 0,
                ..create_test_trip_request()
            },
            "travelers",
        ),
        (
            StartBookingRequest {
                destination: String::from("  "),
                ..create_test_trip_request()
            },
            "destination",
        ),
        (
            StartBookingRequest {
                start_date: String::from("10/05/2026"),
                ..create_test_trip_request()
            },
            "date",
        ),
    ];

    for (request, expected_field) in cases {
        let result: Result<BookingResponse, ApiError> =
            start_booking(&mut persistence, &request, &traveler, create_test_cause());
        assert!(
            matches!(
                result,
                Err(ApiError::InvalidInput { ref field, .. }) if field == expected_field
            ),
            "expected invalid {expected_field}, got {result:?}"
        );
    }
    assert!(persistence.list_travel_records().unwrap().is_empty());
}

#[test]
fn test_select_transportation_rejects_unknown_and_swapped_legs() {
    let mut persistence: Persistence = create_test_persistence();
    let traveler: AuthenticatedActor = create_test_traveler(&mut persistence, 1);
    let booking_id: i64 = start_test_booking(&mut persistence, &traveler).booking_id;

    let unknown: Result<BookingResponse, ApiError> = select_transportation(
        &mut persistence,
        booking_id,
        &SelectTransportationRequest {
            outbound_id: String::from("flight-outbound-9"),
            ..cheapest_flights()
        },
        &traveler,
        create_test_cause(),
    );
    assert!(matches!(
        unknown,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "outbound_id"
    ));

    let swapped: Result<BookingResponse, ApiError> = select_transportation(
        &mut persistence,
        booking_id,
        &SelectTransportationRequest {
            outbound_id: String::from("flight-return-1"),
            return_id: String::from("flight-outbound-1"),
            skip_accommodation: false,
        },
        &traveler,
        create_test_cause(),
    );
    assert!(matches!(
        swapped,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "transport_leg"
    ));

    let booking: BookingResponse = get_booking(&mut persistence, booking_id, &traveler).unwrap();
    assert_eq!(booking.step, WizardStep::Transportation);
    assert!(booking.booking.outbound.is_none());
}

#[test]
fn test_full_wizard_reaches_billing_with_priced_selections() {
    let mut persistence: Persistence = create_test_persistence();
    let traveler: AuthenticatedActor = create_test_traveler(&mut persistence, 1);

    let booking_id: i64 = advance_to_billing(&mut persistence, &traveler);
    let booking: BookingResponse = get_booking(&mut persistence, booking_id, &traveler).unwrap();

    assert_eq!(booking.step, WizardStep::Billing);
    assert_eq!(booking.price.transport, 60_000);
    assert_eq!(booking.price.accommodation, 94_500);
    assert_eq!(booking.price.attractions, 5_000);
    assert_eq!(booking.price.local_transport, 17_500);
    assert_eq!(booking.price.total, BILLING_TOTAL);
    assert_eq!(booking.total_display, "₹1,77,000");

    let travel_id: i64 = booking.booking.travel_id.unwrap();
    let passenger: PassengerData = persistence
        .get_passengers_by_travel_id(travel_id)
        .unwrap()
        .remove(0);
    assert!(passenger.flight_id.is_some());
    assert!(passenger.resort_id.is_some());
    assert!(passenger.vehicle_id.is_some());
    assert_eq!(
        persistence
            .get_flights_by_route("Paris", "Delhi")
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn test_offers_follow_the_current_step() {
    let mut persistence: Persistence = create_test_persistence();
    let traveler: AuthenticatedActor = create_test_traveler(&mut persistence, 1);
    let booking_id: i64 = start_test_booking(&mut persistence, &traveler).booking_id;

    let accommodation: BookingResponse = select_transportation(
        &mut persistence,
        booking_id,
        &cheapest_flights(),
        &traveler,
        create_test_cause(),
    )
    .unwrap();
    assert_eq!(accommodation.offers.accommodations.len(), 5);
    assert!(accommodation.offers.transport.is_empty());

    let attractions: BookingResponse =
        skip_accommodation(&mut persistence, booking_id, &traveler, create_test_cause()).unwrap();
    assert_eq!(attractions.step, WizardStep::Attractions);
    assert_eq!(attractions.offers.attractions[0].name, "Eiffel Tower");
}

#[test]
fn test_skip_accommodation_flag_and_go_back() {
    let mut persistence: Persistence = create_test_persistence();
    let traveler: AuthenticatedActor = create_test_traveler(&mut persistence, 1);
    let booking_id: i64 = start_test_booking(&mut persistence, &traveler).booking_id;

    let response: BookingResponse = select_transportation(
        &mut persistence,
        booking_id,
        &SelectTransportationRequest {
            skip_accommodation: true,
            ..cheapest_flights()
        },
        &traveler,
        create_test_cause(),
    )
    .unwrap();
    assert_eq!(response.step, WizardStep::Attractions);
    assert!(response.booking.accommodation.is_none());

    let back: BookingResponse =
        go_back(&mut persistence, booking_id, &traveler, create_test_cause()).unwrap();
    assert_eq!(back.step, WizardStep::Transportation);
}

#[test]
fn test_toggle_attraction_twice_removes_it() {
    let mut persistence: Persistence = create_test_persistence();
    let traveler: AuthenticatedActor = create_test_traveler(&mut persistence, 1);
    let booking_id: i64 = start_test_booking(&mut persistence, &traveler).booking_id;
    select_transportation(
        &mut persistence,
        booking_id,
        &SelectTransportationRequest {
            skip_accommodation: true,
            ..cheapest_flights()
        },
        &traveler,
        create_test_cause(),
    )
    .unwrap();

    let request: ToggleAttractionRequest = ToggleAttractionRequest {
        attraction_id: String::from("attraction-2"),
    };
    let added: BookingResponse = toggle_attraction(
        &mut persistence,
        booking_id,
        &request,
        &traveler,
        create_test_cause(),
    )
    .unwrap();
    assert_eq!(added.booking.attractions.len(), 1);
    assert_eq!(added.price.attractions, 3_400);

    let removed: BookingResponse = toggle_attraction(
        &mut persistence,
        booking_id,
        &request,
        &traveler,
        create_test_cause(),
    )
    .unwrap();
    assert!(removed.booking.attractions.is_empty());
    assert_eq!(removed.price.attractions, 0);
}

#[test]
fn test_commands_out_of_step_are_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    let traveler: AuthenticatedActor = create_test_traveler(&mut persistence, 1);
    let booking_id: i64 = start_test_booking(&mut persistence, &traveler).booking_id;

    let result: Result<BookingResponse, ApiError> =
        skip_accommodation(&mut persistence, booking_id, &traveler, create_test_cause());

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "wizard_step"
    ));
}

#[test]
fn test_checkout_rejects_wrong_amount() {
    let mut persistence: Persistence = create_test_persistence();
    let traveler: AuthenticatedActor = create_test_traveler(&mut persistence, 1);
    let booking_id: i64 = advance_to_billing(&mut persistence, &traveler);

    let result: Result<ConfirmationResponse, ApiError> =
        pay(&mut persistence, booking_id, &traveler, BILLING_TOTAL - 1);

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "payment_amount"
    ));
    let trips: Vec<TripSummary> = my_trips(&mut persistence, &traveler).unwrap().trips;
    assert!(trips.iter().all(|trip| trip.order_id.is_none()));
}

#[test]
fn test_checkout_records_order_and_confirmation() {
    let mut persistence: Persistence = create_test_persistence();
    let traveler: AuthenticatedActor = create_test_traveler(&mut persistence, 1);
    let booking_id: i64 = advance_to_billing(&mut persistence, &traveler);

    let confirmation: ConfirmationResponse =
        pay(&mut persistence, booking_id, &traveler, BILLING_TOTAL).unwrap();

    assert_eq!(confirmation.route, "Delhi to Paris");
    assert_eq!(confirmation.travelers, 2);
    assert_eq!(confirmation.receipt.amount_paid, BILLING_TOTAL);
    assert_eq!(confirmation.amount_display, "₹1,77,000");

    let again: ConfirmationResponse =
        get_confirmation(&mut persistence, booking_id, &traveler).unwrap();
    assert_eq!(again, confirmation);

    let trips: Vec<TripSummary> = my_trips(&mut persistence, &traveler).unwrap().trips;
    assert_eq!(trips.len(), 1);
    assert_eq!(trips[0].order_id, Some(confirmation.receipt.order_id));
    assert_eq!(trips[0].total_price, Some(BILLING_TOTAL));

    // Paid bookings cannot be reopened or paid twice.
    assert!(go_back(&mut persistence, booking_id, &traveler, create_test_cause()).is_err());
    assert!(pay(&mut persistence, booking_id, &traveler, BILLING_TOTAL).is_err());
}

#[test]
fn test_confirmation_requires_payment() {
    let mut persistence: Persistence = create_test_persistence();
    let traveler: AuthenticatedActor = create_test_traveler(&mut persistence, 1);
    let booking_id: i64 = advance_to_billing(&mut persistence, &traveler);

    let result: Result<ConfirmationResponse, ApiError> =
        get_confirmation(&mut persistence, booking_id, &traveler);

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "not_paid"
    ));
}

#[test]
fn test_bookings_are_private_to_their_owner() {
    let mut persistence: Persistence = create_test_persistence();
    let owner: AuthenticatedActor = create_test_traveler(&mut persistence, 1);
    let other: AuthenticatedActor = create_test_traveler(&mut persistence, 2);
    let admin: AuthenticatedActor = create_test_admin(&mut persistence);
    let booking_id: i64 = start_test_booking(&mut persistence, &owner).booking_id;

    assert!(matches!(
        get_booking(&mut persistence, booking_id, &other),
        Err(ApiError::Unauthorized { .. })
    ));
    assert!(matches!(
        reset_booking(&mut persistence, booking_id, &other, create_test_cause()),
        Err(ApiError::Unauthorized { .. })
    ));
    assert_eq!(
        get_booking(&mut persistence, booking_id, &admin)
            .unwrap()
            .user_id,
        owner.user_id
    );
}

#[test]
fn test_unknown_booking_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();
    let traveler: AuthenticatedActor = create_test_traveler(&mut persistence, 1);

    let result: Result<BookingResponse, ApiError> = get_booking(&mut persistence, 999, &traveler);

    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { ref resource_type, .. }) if resource_type == "Booking"
    ));
}

#[test]
fn test_reset_then_restart_reuses_booking() {
    let mut persistence: Persistence = create_test_persistence();
    let traveler: AuthenticatedActor = create_test_traveler(&mut persistence, 1);
    let booking_id: i64 = advance_to_billing(&mut persistence, &traveler);

    let reset: BookingResponse =
        reset_booking(&mut persistence, booking_id, &traveler, create_test_cause()).unwrap();
    assert_eq!(reset.step, WizardStep::TripDetails);
    assert_eq!(reset.price.total, 0);

    let restarted: BookingResponse = start_booking(
        &mut persistence,
        &StartBookingRequest {
            destination: String::from("Goa"),
            booking_id: Some(booking_id),
            ..create_test_trip_request()
        },
        &traveler,
        create_test_cause(),
    )
    .unwrap();
    assert_eq!(restarted.booking_id, booking_id);
    assert_eq!(
        restarted.booking.trip.unwrap().destination.name(),
        "Goa"
    );
    assert_eq!(
        persistence
            .list_booking_drafts_for_user(traveler.user_id)
            .unwrap()
            .len(),
        1
    );

    let trips: Vec<TripSummary> = my_trips(&mut persistence, &traveler).unwrap().trips;
    assert_eq!(trips.len(), 1);
    assert_eq!(Some(trips[0].travel_id), restarted.booking.travel_id);
}

#[test]
fn test_resubmitting_same_trip_keeps_travel_and_flights() {
    let mut persistence: Persistence = create_test_persistence();
    let traveler: AuthenticatedActor = create_test_traveler(&mut persistence, 1);
    let started: BookingResponse = start_test_booking(&mut persistence, &traveler);
    let booking_id: i64 = started.booking_id;
    select_transportation(
        &mut persistence,
        booking_id,
        &cheapest_flights(),
        &traveler,
        create_test_cause(),
    )
    .unwrap();
    go_back(&mut persistence, booking_id, &traveler, create_test_cause()).unwrap();
    go_back(&mut persistence, booking_id, &traveler, create_test_cause()).unwrap();

    let restarted: BookingResponse = start_booking(
        &mut persistence,
        &StartBookingRequest {
            booking_id: Some(booking_id),
            ..create_test_trip_request()
        },
        &traveler,
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(restarted.step, WizardStep::Transportation);
    assert!(restarted.booking.outbound.is_some());
    assert_eq!(restarted.booking.travel_id, started.booking.travel_id);

    let travel_id: i64 = restarted.booking.travel_id.unwrap();
    let passengers: Vec<PassengerData> =
        persistence.get_passengers_by_travel_id(travel_id).unwrap();
    assert_eq!(passengers.len(), 1);
    assert!(passengers[0].flight_id.is_some());
    assert_eq!(my_trips(&mut persistence, &traveler).unwrap().trips.len(), 1);
}

#[test]
fn test_changed_trip_releases_previous_travel() {
    let mut persistence: Persistence = create_test_persistence();
    let traveler: AuthenticatedActor = create_test_traveler(&mut persistence, 1);
    let started: BookingResponse = start_test_booking(&mut persistence, &traveler);
    let old_travel: i64 = started.booking.travel_id.unwrap();
    go_back(
        &mut persistence,
        started.booking_id,
        &traveler,
        create_test_cause(),
    )
    .unwrap();

    let restarted: BookingResponse = start_booking(
        &mut persistence,
        &StartBookingRequest {
            destination: String::from("Goa"),
            booking_id: Some(started.booking_id),
            ..create_test_trip_request()
        },
        &traveler,
        create_test_cause(),
    )
    .unwrap();

    let new_travel: i64 = restarted.booking.travel_id.unwrap();
    assert_ne!(new_travel, old_travel);
    assert!(
        persistence
            .get_passengers_by_travel_id(old_travel)
            .unwrap()
            .is_empty()
    );
    let trips: Vec<TripSummary> = my_trips(&mut persistence, &traveler).unwrap().trips;
    assert_eq!(trips.len(), 1);
    assert_eq!(trips[0].travel_id, new_travel);
}

#[test]
fn test_skipping_stay_after_choosing_hotel_clears_resort() {
    let mut persistence: Persistence = create_test_persistence();
    let traveler: AuthenticatedActor = create_test_traveler(&mut persistence, 1);
    let booking_id: i64 = start_test_booking(&mut persistence, &traveler).booking_id;
    select_transportation(
        &mut persistence,
        booking_id,
        &cheapest_flights(),
        &traveler,
        create_test_cause(),
    )
    .unwrap();
    select_accommodation(
        &mut persistence,
        booking_id,
        &SelectAccommodationRequest {
            accommodation_id: String::from("hotel-1"),
        },
        &traveler,
        create_test_cause(),
    )
    .unwrap();
    go_back(&mut persistence, booking_id, &traveler, create_test_cause()).unwrap();
    go_back(&mut persistence, booking_id, &traveler, create_test_cause()).unwrap();

    let skipped: BookingResponse = select_transportation(
        &mut persistence,
        booking_id,
        &SelectTransportationRequest {
            skip_accommodation: true,
            ..cheapest_flights()
        },
        &traveler,
        create_test_cause(),
    )
    .unwrap();

    assert!(skipped.booking.accommodation.is_none());
    let travel_id: i64 = skipped.booking.travel_id.unwrap();
    let passengers: Vec<PassengerData> =
        persistence.get_passengers_by_travel_id(travel_id).unwrap();
    assert!(passengers.iter().all(|p| p.resort_id.is_none()));
}

#[test]
fn test_restart_past_first_step_is_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    let traveler: AuthenticatedActor = create_test_traveler(&mut persistence, 1);
    let booking_id: i64 = start_test_booking(&mut persistence, &traveler).booking_id;
    let travels_before: usize = persistence.list_travel_records().unwrap().len();

    let result: Result<BookingResponse, ApiError> = start_booking(
        &mut persistence,
        &StartBookingRequest {
            booking_id: Some(booking_id),
            ..create_test_trip_request()
        },
        &traveler,
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "wizard_step"
    ));
    assert_eq!(
        persistence.list_travel_records().unwrap().len(),
        travels_before
    );
}

#[test]
fn test_every_transition_is_logged() {
    let mut persistence: Persistence = create_test_persistence();
    let traveler: AuthenticatedActor = create_test_traveler(&mut persistence, 1);
    let booking_id: i64 = advance_to_billing(&mut persistence, &traveler);
    pay(&mut persistence, booking_id, &traveler, BILLING_TOTAL).unwrap();

    let codes: Vec<String> = persistence
        .get_ops_by_user_id(traveler.user_id)
        .unwrap()
        .into_iter()
        .map(|op| op.code)
        .collect();

    assert_eq!(
        codes.first().map(String::as_str).unwrap_or_default(),
        "Checkout"
    );
    // StartTrip through Checkout: seven transitions.
    assert_eq!(codes.len(), 7);
}
