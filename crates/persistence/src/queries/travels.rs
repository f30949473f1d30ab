// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Travel queries.
//!
//! Travels are always read joined with their agency, station and vehicle.

use std::collections::BTreeMap;

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::{
    AgencyData, PassengerData, PassengerRecord, StationData, TravelData, TravelDetails,
    TravelFilter, TravelRecord, VehicleData,
};
use crate::diesel_schema::{agencies, passengers, stations, travels, users, vehicles};
use crate::error::PersistenceError;
use crate::queries::catalog::{AgencyRow, StationRow, VehicleRow};
use crate::queries::passengers::PassengerRow;

#[derive(Queryable, Selectable)]
#[diesel(table_name = travels)]
pub(crate) struct TravelRow {
    travel_id: i64,
    duration: i32,
    price: i64,
    date: String,
    dates: String,
    agency_id: i64,
    station_id: i64,
    vehicle_id: i64,
    created_at: String,
}

impl From<TravelRow> for TravelData {
    fn from(row: TravelRow) -> Self {
        Self {
            travel_id: row.travel_id,
            duration: row.duration,
            price: row.price,
            date: row.date,
            dates: row.dates,
            agency_id: row.agency_id,
            station_id: row.station_id,
            vehicle_id: row.vehicle_id,
            created_at: row.created_at,
        }
    }
}

type DetailsTuple = (TravelRow, AgencyRow, StationRow, VehicleRow);

fn details_from(tuple: DetailsTuple) -> TravelDetails {
    let (travel, agency, station, vehicle) = tuple;
    TravelDetails {
        travel: TravelData::from(travel),
        agency: AgencyData::from(agency),
        station: StationData::from(station),
        vehicle: VehicleData::from(vehicle),
    }
}

/// Retrieves a travel with its agency, station and vehicle.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the travel is not found.
pub fn get_travel_by_id(
    conn: &mut SqliteConnection,
    travel_id: i64,
) -> Result<Option<TravelDetails>, PersistenceError> {
    debug!(travel_id, "Looking up travel");

    let result: Result<DetailsTuple, diesel::result::Error> = travels::table
        .inner_join(agencies::table)
        .inner_join(stations::table)
        .inner_join(vehicles::table)
        .filter(travels::travel_id.eq(travel_id))
        .select((
            TravelRow::as_select(),
            AgencyRow::as_select(),
            StationRow::as_select(),
            VehicleRow::as_select(),
        ))
        .first(conn);

    match result {
        Ok(tuple) => Ok(Some(details_from(tuple))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists travels matching a filter, ordered by departure date.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_travels(
    conn: &mut SqliteConnection,
    filter: &TravelFilter,
) -> Result<Vec<TravelDetails>, PersistenceError> {
    let mut query = travels::table
        .inner_join(agencies::table)
        .inner_join(stations::table)
        .inner_join(vehicles::table)
        .select((
            TravelRow::as_select(),
            AgencyRow::as_select(),
            StationRow::as_select(),
            VehicleRow::as_select(),
        ))
        .into_boxed();

    if let Some(from) = &filter.from_location {
        query = query.filter(stations::from_location.like(from.trim().to_string()));
    }
    if let Some(to) = &filter.to_location {
        query = query.filter(stations::to_location.like(to.trim().to_string()));
    }
    if let Some(date) = &filter.date {
        query = query.filter(travels::date.eq(date.clone()));
    }
    if let Some(agency_id) = filter.agency_id {
        query = query.filter(travels::agency_id.eq(agency_id));
    }

    let rows: Vec<DetailsTuple> = query
        .order((travels::date.asc(), travels::travel_id.asc()))
        .load(conn)?;

    Ok(rows.into_iter().map(details_from).collect())
}

/// Lists every travel with its passengers, newest travel first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_travel_records(
    conn: &mut SqliteConnection,
) -> Result<Vec<TravelRecord>, PersistenceError> {
    let mut details: Vec<TravelDetails> = list_travels(conn, &TravelFilter::default())?;
    details.sort_by(|a, b| b.travel.travel_id.cmp(&a.travel.travel_id));

    let passenger_rows: Vec<(PassengerRow, (String, String, String))> = passengers::table
        .inner_join(users::table)
        .order(passengers::passenger_id.asc())
        .select((
            PassengerRow::as_select(),
            (users::first_name, users::last_name, users::email),
        ))
        .load(conn)?;

    let mut by_travel: BTreeMap<i64, Vec<PassengerRecord>> = BTreeMap::new();
    for (row, (first_name, last_name, email)) in passenger_rows {
        let passenger: PassengerData = row.into();
        by_travel
            .entry(passenger.travel_id)
            .or_default()
            .push(PassengerRecord {
                passenger,
                first_name,
                last_name,
                email,
            });
    }

    Ok(details
        .into_iter()
        .map(|details| {
            let passengers: Vec<PassengerRecord> = by_travel
                .remove(&details.travel.travel_id)
                .unwrap_or_default();
            TravelRecord {
                details,
                passengers,
            }
        })
        .collect())
}

/// Lists travel records matching a free-text search.
///
/// The term matches case-insensitively against the travel id, route,
/// dates, agency name and passenger names and emails. A blank term
/// returns every record.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn search_travel_records(
    conn: &mut SqliteConnection,
    term: &str,
) -> Result<Vec<TravelRecord>, PersistenceError> {
    let needle: String = term.trim().to_lowercase();
    let records: Vec<TravelRecord> = list_travel_records(conn)?;
    if needle.is_empty() {
        return Ok(records);
    }

    Ok(records
        .into_iter()
        .filter(|record| record_matches(record, &needle))
        .collect())
}

fn record_matches(record: &TravelRecord, needle: &str) -> bool {
    let details: &TravelDetails = &record.details;
    let travel_fields: [&str; 5] = [
        &details.station.from_location,
        &details.station.to_location,
        &details.station.name,
        &details.travel.dates,
        &details.agency.name,
    ];

    details.travel.travel_id.to_string() == needle
        || travel_fields
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
        || record.passengers.iter().any(|p| {
            p.first_name.to_lowercase().contains(needle)
                || p.last_name.to_lowercase().contains(needle)
                || p.email.to_lowercase().contains(needle)
        })
}
