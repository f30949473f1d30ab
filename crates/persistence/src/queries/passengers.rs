// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashMap;

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::{PassengerData, TripSummary};
use crate::diesel_schema::{orders, passengers, stations, travels};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = passengers)]
pub(crate) struct PassengerRow {
    passenger_id: i64,
    user_id: i64,
    travel_id: i64,
    passengers_no: i32,
    flight_id: Option<i64>,
    resort_id: Option<i64>,
    vehicle_id: Option<i64>,
}

impl From<PassengerRow> for PassengerData {
    fn from(row: PassengerRow) -> Self {
        Self {
            passenger_id: row.passenger_id,
            user_id: row.user_id,
            travel_id: row.travel_id,
            passengers_no: row.passengers_no,
            flight_id: row.flight_id,
            resort_id: row.resort_id,
            vehicle_id: row.vehicle_id,
        }
    }
}

/// Retrieves a passenger by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the passenger is not found.
pub fn get_passenger_by_id(
    conn: &mut SqliteConnection,
    passenger_id: i64,
) -> Result<Option<PassengerData>, PersistenceError> {
    let result: Result<PassengerRow, diesel::result::Error> = passengers::table
        .filter(passengers::passenger_id.eq(passenger_id))
        .select(PassengerRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists the passenger rows of a travel in insertion order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_passengers_by_travel_id(
    conn: &mut SqliteConnection,
    travel_id: i64,
) -> Result<Vec<PassengerData>, PersistenceError> {
    debug!(travel_id, "Listing passengers for travel");

    let rows: Vec<PassengerRow> = passengers::table
        .filter(passengers::travel_id.eq(travel_id))
        .order(passengers::passenger_id.asc())
        .select(PassengerRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(PassengerData::from).collect())
}

/// Retrieves the first passenger row a user holds on a travel.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn find_lead_passenger(
    conn: &mut SqliteConnection,
    user_id: i64,
    travel_id: i64,
) -> Result<Option<PassengerData>, PersistenceError> {
    let result: Result<PassengerRow, diesel::result::Error> = passengers::table
        .filter(passengers::user_id.eq(user_id))
        .filter(passengers::travel_id.eq(travel_id))
        .order(passengers::passenger_id.asc())
        .select(PassengerRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

type TripTuple = (
    PassengerRow,
    String,
    String,
    i32,
    String,
    String,
    Option<i64>,
    Option<String>,
    Option<i64>,
);

/// Lists the trips a user holds passenger rows on, latest departure first.
///
/// A travel appears once even when the user has several passenger rows on
/// it; the row carrying an order wins.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_trips_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<TripSummary>, PersistenceError> {
    let rows: Vec<TripTuple> = passengers::table
        .inner_join(travels::table.inner_join(stations::table))
        .left_join(orders::table)
        .filter(passengers::user_id.eq(user_id))
        .order((travels::date.desc(), passengers::passenger_id.asc()))
        .select((
            PassengerRow::as_select(),
            travels::date,
            travels::dates,
            travels::duration,
            stations::from_location,
            stations::to_location,
            orders::order_id.nullable(),
            orders::status.nullable(),
            orders::total_price.nullable(),
        ))
        .load(conn)?;

    let mut trips: Vec<TripSummary> = Vec::new();
    let mut index_by_travel: HashMap<i64, usize> = HashMap::new();

    for (row, date, dates, duration, from_location, to_location, order_id, status, total) in rows
    {
        let passenger: PassengerData = row.into();
        let summary: TripSummary = TripSummary {
            travel_id: passenger.travel_id,
            passenger_id: passenger.passenger_id,
            from_location,
            to_location,
            date,
            dates,
            duration,
            passengers_no: passenger.passengers_no,
            order_id,
            order_status: status,
            total_price: total,
        };

        match index_by_travel.get(&summary.travel_id) {
            Some(&index) => {
                if trips[index].order_id.is_none() && summary.order_id.is_some() {
                    trips[index] = summary;
                }
            }
            None => {
                index_by_travel.insert(summary.travel_id, trips.len());
                trips.push(summary);
            }
        }
    }

    Ok(trips)
}
