// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Agency, vehicle and station queries.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::{AgencyData, StationData, VehicleData};
use crate::diesel_schema::{agencies, stations, vehicles};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = agencies)]
pub(crate) struct AgencyRow {
    agency_id: i64,
    name: String,
    address: String,
}

impl From<AgencyRow> for AgencyData {
    fn from(row: AgencyRow) -> Self {
        Self {
            agency_id: row.agency_id,
            name: row.name,
            address: row.address,
        }
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = vehicles)]
pub(crate) struct VehicleRow {
    vehicle_id: i64,
    name: String,
    vehicle_type: String,
}

impl From<VehicleRow> for VehicleData {
    fn from(row: VehicleRow) -> Self {
        Self {
            vehicle_id: row.vehicle_id,
            name: row.name,
            vehicle_type: row.vehicle_type,
        }
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = stations)]
pub(crate) struct StationRow {
    station_id: i64,
    name: String,
    from_location: String,
    to_location: String,
    travel_id: Option<i64>,
}

impl From<StationRow> for StationData {
    fn from(row: StationRow) -> Self {
        Self {
            station_id: row.station_id,
            name: row.name,
            from_location: row.from_location,
            to_location: row.to_location,
            travel_id: row.travel_id,
        }
    }
}

/// Lists agencies in insertion order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_agencies(conn: &mut SqliteConnection) -> Result<Vec<AgencyData>, PersistenceError> {
    let rows: Vec<AgencyRow> = agencies::table
        .order(agencies::agency_id.asc())
        .select(AgencyRow::as_select())
        .load(conn)?;
    Ok(rows.into_iter().map(AgencyData::from).collect())
}

/// Retrieves an agency by its unique name.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no agency has that name.
pub fn get_agency_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Option<AgencyData>, PersistenceError> {
    let result: Result<AgencyRow, diesel::result::Error> = agencies::table
        .filter(agencies::name.eq(name))
        .select(AgencyRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists vehicles in insertion order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_vehicles(conn: &mut SqliteConnection) -> Result<Vec<VehicleData>, PersistenceError> {
    let rows: Vec<VehicleRow> = vehicles::table
        .order(vehicles::vehicle_id.asc())
        .select(VehicleRow::as_select())
        .load(conn)?;
    Ok(rows.into_iter().map(VehicleData::from).collect())
}

/// Retrieves the first vehicle with the given name and type.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn find_vehicle(
    conn: &mut SqliteConnection,
    name: &str,
    vehicle_type: &str,
) -> Result<Option<VehicleData>, PersistenceError> {
    let result: Result<VehicleRow, diesel::result::Error> = vehicles::table
        .filter(vehicles::name.eq(name))
        .filter(vehicles::vehicle_type.eq(vehicle_type))
        .order(vehicles::vehicle_id.asc())
        .select(VehicleRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists stations in insertion order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_stations(conn: &mut SqliteConnection) -> Result<Vec<StationData>, PersistenceError> {
    let rows: Vec<StationRow> = stations::table
        .order(stations::station_id.asc())
        .select(StationRow::as_select())
        .load(conn)?;
    Ok(rows.into_iter().map(StationData::from).collect())
}

/// Retrieves a station by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the station is not found.
pub fn get_station_by_id(
    conn: &mut SqliteConnection,
    station_id: i64,
) -> Result<Option<StationData>, PersistenceError> {
    let result: Result<StationRow, diesel::result::Error> = stations::table
        .filter(stations::station_id.eq(station_id))
        .select(StationRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves the first station with the given name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_station_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Option<StationData>, PersistenceError> {
    let result: Result<StationRow, diesel::result::Error> = stations::table
        .filter(stations::name.eq(name))
        .order(stations::station_id.asc())
        .select(StationRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
