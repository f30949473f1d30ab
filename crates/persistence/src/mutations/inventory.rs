// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::{NewFlight, NewResort};
use crate::diesel_schema::{flights, resorts};
use crate::error::PersistenceError;

const DEFAULT_DEPARTURE_TIME: &str = "10:00:00";
const DEFAULT_ARRIVAL_TIME: &str = "14:00:00";

/// Creates a flight.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_flight(
    conn: &mut SqliteConnection,
    flight: &NewFlight,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(flights::table)
        .values((
            flights::name.eq(&flight.name),
            flights::price.eq(flight.price),
            flights::from_location.eq(&flight.from_location),
            flights::to_location.eq(&flight.to_location),
            flights::date.eq(&flight.date),
            flights::departure_time.eq(flight
                .departure_time
                .as_deref()
                .unwrap_or(DEFAULT_DEPARTURE_TIME)),
            flights::arrival_time.eq(flight
                .arrival_time
                .as_deref()
                .unwrap_or(DEFAULT_ARRIVAL_TIME)),
        ))
        .execute(conn)?;

    let flight_id: i64 = conn.get_last_insert_rowid()?;
    info!(flight_id, name = %flight.name, "Flight created");
    Ok(flight_id)
}

/// Creates a resort.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_resort(
    conn: &mut SqliteConnection,
    resort: &NewResort,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(resorts::table)
        .values((
            resorts::name.eq(&resort.name),
            resorts::price.eq(resort.price),
            resorts::address.eq(&resort.address),
        ))
        .execute(conn)?;

    let resort_id: i64 = conn.get_last_insert_rowid()?;
    info!(resort_id, name = %resort.name, "Resort created");
    Ok(resort_id)
}
