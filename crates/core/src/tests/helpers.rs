// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Booking, Command, TransitionResult, apply};
use time::macros::date;
use travelease_audit::{Actor, Cause};
use travelease_domain::{
    AppliedDiscount, DiscountCode, DiscountKind, Location, TransportOption, TripDetails,
    find_accommodation, find_attraction, find_local_transport, find_transport_option,
};

pub fn create_test_actor() -> Actor {
    Actor::traveler(42)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-789"), String::from("Traveler request"))
}

/// Delhi to Paris, 2026-05-10 to 2026-05-14, two travelers.
pub fn create_test_trip() -> TripDetails {
    TripDetails::new(
        Location::new("origin", "Delhi").unwrap(),
        Location::new("destination", "Paris").unwrap(),
        date!(2026 - 05 - 10),
        date!(2026 - 05 - 14),
        2,
    )
}

pub fn create_test_discount(kind: DiscountKind, value: i64) -> AppliedDiscount {
    AppliedDiscount::new(9, DiscountCode::parse("SPRING").unwrap(), kind, Some(value)).unwrap()
}

pub fn run(booking: &Booking, command: Command) -> Booking {
    let result: TransitionResult =
        apply(booking, command, create_test_actor(), create_test_cause()).unwrap();
    result.new_state
}

pub fn outbound_leg(trip: &TripDetails) -> TransportOption {
    find_transport_option(trip, "flight-outbound-1").unwrap()
}

pub fn return_leg(trip: &TripDetails) -> TransportOption {
    find_transport_option(trip, "flight-return-2").unwrap()
}

pub fn booking_at_transportation() -> Booking {
    run(
        &Booking::new(),
        Command::StartTrip {
            trip: create_test_trip(),
            travel_id: 11,
        },
    )
}

pub fn booking_at_accommodation() -> Booking {
    let trip: TripDetails = create_test_trip();
    run(
        &booking_at_transportation(),
        Command::SelectTransportation {
            outbound: outbound_leg(&trip),
            return_leg: return_leg(&trip),
        },
    )
}

pub fn booking_at_attractions() -> Booking {
    run(
        &booking_at_accommodation(),
        Command::SelectAccommodation {
            accommodation: find_accommodation("Paris", "hotel-3").unwrap(),
        },
    )
}

/// Full selections: flights, hotel-3, Eiffel Tower, bike rental.
pub fn booking_at_billing() -> Booking {
    let with_attraction: Booking = run(
        &booking_at_attractions(),
        Command::ToggleAttraction {
            attraction: find_attraction("Paris", "attraction-1").unwrap(),
        },
    );
    let confirmed: Booking = run(&with_attraction, Command::ConfirmAttractions);
    run(
        &confirmed,
        Command::SelectLocalTransport {
            transport: find_local_transport("transport-3"),
        },
    )
}
