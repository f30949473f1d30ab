// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Passenger mutations.
//!
//! The `assign_travel_*` functions update every passenger row of a travel,
//! since a booking's party shares one flight, resort and vehicle.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::{NewPassenger, PassengerUpdate};
use crate::diesel_schema::{orders, passengers};
use crate::error::PersistenceError;

/// Creates a passenger row.
///
/// # Errors
///
/// Returns an error if a referenced row does not exist or the insert
/// fails.
pub fn create_passenger(
    conn: &mut SqliteConnection,
    passenger: &NewPassenger,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(passengers::table)
        .values((
            passengers::user_id.eq(passenger.user_id),
            passengers::travel_id.eq(passenger.travel_id),
            passengers::passengers_no.eq(passenger.passengers_no),
            passengers::flight_id.eq(passenger.flight_id),
            passengers::resort_id.eq(passenger.resort_id),
            passengers::vehicle_id.eq(passenger.vehicle_id),
        ))
        .execute(conn)?;

    let passenger_id: i64 = conn.get_last_insert_rowid()?;
    debug!(
        passenger_id,
        user_id = passenger.user_id,
        travel_id = passenger.travel_id,
        "Passenger created"
    );
    Ok(passenger_id)
}

#[derive(AsChangeset)]
#[diesel(table_name = passengers)]
struct PassengerChangeset {
    passengers_no: Option<i32>,
    flight_id: Option<i64>,
    resort_id: Option<i64>,
    vehicle_id: Option<i64>,
}

/// Applies a partial update to a passenger row.
///
/// An update with no fields set is a no-op.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the passenger does not exist.
pub fn update_passenger(
    conn: &mut SqliteConnection,
    passenger_id: i64,
    update: &PassengerUpdate,
) -> Result<(), PersistenceError> {
    if update.is_empty() {
        return Ok(());
    }

    let changes: PassengerChangeset = PassengerChangeset {
        passengers_no: update.passengers_no,
        flight_id: update.flight_id,
        resort_id: update.resort_id,
        vehicle_id: update.vehicle_id,
    };

    let updated: usize =
        diesel::update(passengers::table.filter(passengers::passenger_id.eq(passenger_id)))
            .set(&changes)
            .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Passenger {passenger_id}"
        )));
    }
    Ok(())
}

/// Sets the flight on every passenger row of a travel.
///
/// # Errors
///
/// Returns an error if the flight does not exist or the update fails.
pub fn assign_travel_flight(
    conn: &mut SqliteConnection,
    travel_id: i64,
    flight_id: i64,
) -> Result<usize, PersistenceError> {
    let updated: usize =
        diesel::update(passengers::table.filter(passengers::travel_id.eq(travel_id)))
            .set(passengers::flight_id.eq(Some(flight_id)))
            .execute(conn)?;

    info!(travel_id, flight_id, updated, "Flight assigned to travel");
    Ok(updated)
}

/// Sets or clears the resort on every passenger row of a travel.
///
/// # Errors
///
/// Returns an error if the resort does not exist or the update fails.
pub fn assign_travel_resort(
    conn: &mut SqliteConnection,
    travel_id: i64,
    resort_id: Option<i64>,
) -> Result<usize, PersistenceError> {
    let updated: usize =
        diesel::update(passengers::table.filter(passengers::travel_id.eq(travel_id)))
            .set(passengers::resort_id.eq(resort_id))
            .execute(conn)?;

    info!(travel_id, ?resort_id, updated, "Resort assigned to travel");
    Ok(updated)
}

/// Sets or clears the local vehicle on every passenger row of a travel.
///
/// # Errors
///
/// Returns an error if the vehicle does not exist or the update fails.
pub fn assign_travel_vehicle(
    conn: &mut SqliteConnection,
    travel_id: i64,
    vehicle_id: Option<i64>,
) -> Result<usize, PersistenceError> {
    let updated: usize =
        diesel::update(passengers::table.filter(passengers::travel_id.eq(travel_id)))
            .set(passengers::vehicle_id.eq(vehicle_id))
            .execute(conn)?;

    info!(travel_id, ?vehicle_id, updated, "Vehicle assigned to travel");
    Ok(updated)
}

/// Removes a user's passenger rows from a travel, keeping rows an order
/// already references.
///
/// # Errors
///
/// Returns an error if the database query or delete fails.
pub fn release_unpaid_passengers(
    conn: &mut SqliteConnection,
    travel_id: i64,
    user_id: i64,
) -> Result<usize, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let candidates: Vec<i64> = passengers::table
            .filter(passengers::travel_id.eq(travel_id))
            .filter(passengers::user_id.eq(user_id))
            .select(passengers::passenger_id)
            .load::<i64>(conn)?;
        let paid: Vec<i64> = orders::table
            .filter(orders::passenger_id.eq_any(&candidates))
            .select(orders::passenger_id)
            .load::<i64>(conn)?;
        let unpaid: Vec<i64> = candidates
            .into_iter()
            .filter(|passenger_id| !paid.contains(passenger_id))
            .collect();

        let deleted: usize =
            diesel::delete(passengers::table.filter(passengers::passenger_id.eq_any(&unpaid)))
                .execute(conn)?;

        info!(travel_id, user_id, deleted, "Unpaid passengers released");
        Ok(deleted)
    })
}
