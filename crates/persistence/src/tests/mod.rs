// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod discount_tests;
mod draft_tests;
mod initialization_tests;
mod report_tests;
mod session_tests;

use time::Date;
use travelease_audit::{Actor, Cause};

use crate::{NewPassenger, NewTravel, NewUser, Persistence};

pub fn create_test_actor() -> Actor {
    Actor::traveler(42)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

pub fn create_test_date() -> Date {
    time::macros::date!(2026 - 05 - 10)
}

pub fn create_test_new_user(n: u32) -> NewUser {
    NewUser {
        username: format!("traveler{n}"),
        email: format!("Traveler{n}@Example.com"),
        password: String::from("correct horse 1"),
        first_name: format!("Asha{n}"),
        last_name: String::from("Rao"),
        city: Some(String::from("Pune")),
        country: Some(String::from("India")),
        verified: false,
    }
}

/// Inserts a user and returns its id.
pub fn create_test_user(persistence: &mut Persistence, n: u32) -> i64 {
    persistence
        .create_user(&create_test_new_user(n))
        .expect("Failed to create test user")
}

/// Inserts a Delhi to Paris travel on the default agency and vehicle.
pub fn create_test_travel(persistence: &mut Persistence) -> i64 {
    create_test_travel_to(persistence, "Delhi", "Paris")
}

pub fn create_test_travel_to(persistence: &mut Persistence, from: &str, to: &str) -> i64 {
    let agency_id: i64 = persistence.get_or_create_default_agency().unwrap().agency_id;
    let vehicle_id: i64 = persistence
        .get_or_create_default_vehicle()
        .unwrap()
        .vehicle_id;
    let station_id: i64 = persistence
        .create_station(&format!("{from} to {to}"), from, to)
        .unwrap();

    persistence
        .create_travel(&NewTravel {
            duration: 5,
            price: 50_000,
            date: String::from("2026-05-10"),
            dates: String::from("2026-05-10 to 2026-05-14"),
            agency_id,
            station_id,
            vehicle_id,
        })
        .expect("Failed to create test travel")
}

pub fn create_test_passenger(
    persistence: &mut Persistence,
    user_id: i64,
    travel_id: i64,
    passengers_no: i32,
) -> i64 {
    persistence
        .create_passenger(&NewPassenger {
            user_id,
            travel_id,
            passengers_no,
            flight_id: None,
            resort_id: None,
            vehicle_id: None,
        })
        .expect("Failed to create test passenger")
}
