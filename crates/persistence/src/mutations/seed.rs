// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sample data for demos and manual testing.

use diesel::SqliteConnection;
use time::{Date, Duration};
use tracing::info;
use travelease_domain::format_iso_date;

use crate::data_models::{
    AgencyData, NewPassenger, NewTravel, NewUser, SampleTravelSummary, SeedSummary, StationData,
    UserData, VehicleData,
};
use crate::error::PersistenceError;
use crate::mutations::catalog::{
    create_agency, create_station, get_or_create_default_agency, get_or_create_default_vehicle,
};
use crate::mutations::passengers::create_passenger;
use crate::mutations::travels::create_travel;
use crate::mutations::users::create_user;
use crate::queries::catalog::{
    get_agency_by_name, get_station_by_id, get_station_by_name, list_agencies, list_stations,
    list_vehicles,
};
use crate::queries::users::{get_user_by_email, get_user_by_id, list_users};

const SAMPLE_AGENCIES: [&str; 5] = [
    "Sunshine Travels",
    "Global Adventures",
    "Exotic Journeys",
    "Luxury Escapes",
    "Wanderlust Agency",
];

const SAMPLE_LOCATIONS: [&str; 10] = [
    "Paris",
    "London",
    "New York",
    "Tokyo",
    "Sydney",
    "Rome",
    "Barcelona",
    "Dubai",
    "Singapore",
    "Bangkok",
];

const SAMPLE_USER_COUNT: usize = 10;
const SAMPLE_TRAVEL_COUNT: i64 = 5;

/// Inserts sample users, agencies and stations.
///
/// Rows that already exist (by email or name) are skipped, so running this
/// twice creates nothing the second time.
///
/// # Errors
///
/// Returns an error if a database operation fails.
pub fn seed_sample_data(conn: &mut SqliteConnection) -> Result<SeedSummary, PersistenceError> {
    let mut summary: SeedSummary = SeedSummary::default();

    for i in 1..=SAMPLE_USER_COUNT {
        let email: String = format!("user{i}@example.com");
        if get_user_by_email(conn, &email)?.is_some() {
            continue;
        }
        create_user(
            conn,
            &NewUser {
                username: format!("user{i}"),
                email,
                password: format!("password{i}"),
                first_name: format!("First{i}"),
                last_name: format!("Last{i}"),
                city: None,
                country: None,
                verified: true,
            },
        )?;
        summary.users_created += 1;
    }

    for (i, name) in (1_usize..).zip(SAMPLE_AGENCIES) {
        if get_agency_by_name(conn, name)?.is_some() {
            continue;
        }
        create_agency(conn, name, &format!("{} Main Street, City {i}", 100 + i))?;
        summary.agencies_created += 1;
    }

    for (i, from) in SAMPLE_LOCATIONS.iter().enumerate() {
        let to: &str = SAMPLE_LOCATIONS[(i + 5) % SAMPLE_LOCATIONS.len()];
        let name: String = format!("{from} to {to}");
        if get_station_by_name(conn, &name)?.is_some() {
            continue;
        }
        create_station(conn, &name, from, to)?;
        summary.stations_created += 1;
    }

    info!(
        users = summary.users_created,
        agencies = summary.agencies_created,
        stations = summary.stations_created,
        "Sample data seeded"
    );
    Ok(summary)
}

/// Adds five weekly sample travels starting a week after `today`.
///
/// Travel `i` (1-based) departs `today + 7i` days, lasts seven days, costs
/// `50000 + 10000i` and gets two passenger rows of `i + 1` people each.
/// The first existing agency, station, vehicle and user are used; defaults
/// are created when a table is empty.
///
/// # Errors
///
/// Returns an error if a database operation fails.
pub fn add_sample_travel_records(
    conn: &mut SqliteConnection,
    today: Date,
) -> Result<SampleTravelSummary, PersistenceError> {
    let agency: AgencyData = match list_agencies(conn)?.into_iter().next() {
        Some(agency) => agency,
        None => get_or_create_default_agency(conn)?,
    };
    let vehicle: VehicleData = match list_vehicles(conn)?.into_iter().next() {
        Some(vehicle) => vehicle,
        None => get_or_create_default_vehicle(conn)?,
    };
    let station: StationData = match list_stations(conn)?.into_iter().next() {
        Some(station) => station,
        None => {
            let station_id: i64 = create_station(conn, "Default Station", "Paris", "London")?;
            get_station_by_id(conn, station_id)?.ok_or_else(|| {
                PersistenceError::NotFound(format!("Station {station_id}"))
            })?
        }
    };
    let user: UserData = match list_users(conn)?.into_iter().last() {
        Some(user) => user,
        None => {
            let user_id: i64 = create_user(
                conn,
                &NewUser {
                    username: String::from("defaultuser"),
                    email: String::from("default@example.com"),
                    password: String::from("password123"),
                    first_name: String::from("Default"),
                    last_name: String::from("User"),
                    city: None,
                    country: None,
                    verified: true,
                },
            )?;
            get_user_by_id(conn, user_id)?
                .ok_or_else(|| PersistenceError::NotFound(format!("User {user_id}")))?
        }
    };

    let mut summary: SampleTravelSummary = SampleTravelSummary::default();

    for i in 1..=SAMPLE_TRAVEL_COUNT {
        let start: Date = today + Duration::days(7 * i);
        let end: Date = start + Duration::days(7);
        let travel_id: i64 = create_travel(
            conn,
            &NewTravel {
                duration: 7,
                price: 50_000 + 10_000 * i,
                date: format_iso_date(start),
                dates: format!("{} to {}", format_iso_date(start), format_iso_date(end)),
                agency_id: agency.agency_id,
                station_id: station.station_id,
                vehicle_id: vehicle.vehicle_id,
            },
        )?;

        // Each travel gets a party of two and a party of three.
        for party in 2..=3 {
            create_passenger(
                conn,
                &NewPassenger {
                    user_id: user.user_id,
                    travel_id,
                    passengers_no: party,
                    flight_id: None,
                    resort_id: None,
                    vehicle_id: None,
                },
            )?;
            summary.passengers_created += 1;
        }
        summary.travel_ids.push(travel_id);
    }

    info!(
        travels = summary.travel_ids.len(),
        passengers = summary.passengers_created,
        "Sample travel records added"
    );
    Ok(summary)
}
