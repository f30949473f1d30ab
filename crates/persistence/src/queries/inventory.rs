// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Flight and resort queries.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::{FlightData, ResortData};
use crate::diesel_schema::{flights, resorts};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = flights)]
struct FlightRow {
    flight_id: i64,
    name: String,
    price: i64,
    from_location: String,
    to_location: String,
    date: String,
    departure_time: String,
    arrival_time: String,
}

impl From<FlightRow> for FlightData {
    fn from(row: FlightRow) -> Self {
        Self {
            flight_id: row.flight_id,
            name: row.name,
            price: row.price,
            from_location: row.from_location,
            to_location: row.to_location,
            date: row.date,
            departure_time: row.departure_time,
            arrival_time: row.arrival_time,
        }
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = resorts)]
struct ResortRow {
    resort_id: i64,
    name: String,
    price: i64,
    address: String,
}

/// Lists flights flying exactly `from` to `to`, cheapest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_flights_by_route(
    conn: &mut SqliteConnection,
    from: &str,
    to: &str,
) -> Result<Vec<FlightData>, PersistenceError> {
    let rows: Vec<FlightRow> = flights::table
        .filter(flights::from_location.eq(from))
        .filter(flights::to_location.eq(to))
        .order((flights::price.asc(), flights::flight_id.asc()))
        .select(FlightRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(FlightData::from).collect())
}

/// Retrieves a flight by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_flight_by_id(
    conn: &mut SqliteConnection,
    flight_id: i64,
) -> Result<Option<FlightData>, PersistenceError> {
    let result: Result<FlightRow, diesel::result::Error> = flights::table
        .filter(flights::flight_id.eq(flight_id))
        .select(FlightRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists resorts whose address contains `location`, ignoring ASCII case.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_resorts_by_location(
    conn: &mut SqliteConnection,
    location: &str,
) -> Result<Vec<ResortData>, PersistenceError> {
    let pattern: String = format!("%{}%", location.trim());

    let rows: Vec<ResortRow> = resorts::table
        .filter(resorts::address.like(pattern))
        .order(resorts::resort_id.asc())
        .select(ResortRow::as_select())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|row| ResortData {
            resort_id: row.resort_id,
            name: row.name,
            price: row.price,
            address: row.address,
        })
        .collect())
}
