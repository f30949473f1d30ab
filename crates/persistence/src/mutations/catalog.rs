// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Agency, vehicle and station mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::{AgencyData, VehicleData};
use crate::diesel_schema::{agencies, stations, vehicles};
use crate::error::PersistenceError;
use crate::queries::catalog::{find_vehicle, get_agency_by_name};

/// Name of the agency used when a booking does not name one.
pub const DEFAULT_AGENCY_NAME: &str = "Default Travel Agency";
/// Address of the default agency.
pub const DEFAULT_AGENCY_ADDRESS: &str = "123 Main Street";
/// Name of the vehicle used when a booking does not name one.
pub const DEFAULT_VEHICLE_NAME: &str = "Standard Vehicle";
/// Type of the default vehicle.
pub const DEFAULT_VEHICLE_TYPE: &str = "car";

/// Creates an agency.
///
/// # Errors
///
/// Returns an error if the name is taken or the insert fails.
pub fn create_agency(
    conn: &mut SqliteConnection,
    name: &str,
    address: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(agencies::table)
        .values((agencies::name.eq(name), agencies::address.eq(address)))
        .execute(conn)?;

    let agency_id: i64 = conn.get_last_insert_rowid()?;
    info!(agency_id, name, "Agency created");
    Ok(agency_id)
}

/// Returns the default agency, creating it on first use.
///
/// # Errors
///
/// Returns an error if a database operation fails.
pub fn get_or_create_default_agency(
    conn: &mut SqliteConnection,
) -> Result<AgencyData, PersistenceError> {
    if let Some(agency) = get_agency_by_name(conn, DEFAULT_AGENCY_NAME)? {
        return Ok(agency);
    }

    let agency_id: i64 = create_agency(conn, DEFAULT_AGENCY_NAME, DEFAULT_AGENCY_ADDRESS)?;
    Ok(AgencyData {
        agency_id,
        name: DEFAULT_AGENCY_NAME.to_string(),
        address: DEFAULT_AGENCY_ADDRESS.to_string(),
    })
}

/// Creates a vehicle.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_vehicle(
    conn: &mut SqliteConnection,
    name: &str,
    vehicle_type: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(vehicles::table)
        .values((
            vehicles::name.eq(name),
            vehicles::vehicle_type.eq(vehicle_type),
        ))
        .execute(conn)?;

    let vehicle_id: i64 = conn.get_last_insert_rowid()?;
    info!(vehicle_id, name, vehicle_type, "Vehicle created");
    Ok(vehicle_id)
}

/// Returns the default vehicle, creating it on first use.
///
/// # Errors
///
/// Returns an error if a database operation fails.
pub fn get_or_create_default_vehicle(
    conn: &mut SqliteConnection,
) -> Result<VehicleData, PersistenceError> {
    if let Some(vehicle) = find_vehicle(conn, DEFAULT_VEHICLE_NAME, DEFAULT_VEHICLE_TYPE)? {
        return Ok(vehicle);
    }

    let vehicle_id: i64 = create_vehicle(conn, DEFAULT_VEHICLE_NAME, DEFAULT_VEHICLE_TYPE)?;
    Ok(VehicleData {
        vehicle_id,
        name: DEFAULT_VEHICLE_NAME.to_string(),
        vehicle_type: DEFAULT_VEHICLE_TYPE.to_string(),
    })
}

/// Creates a station, not yet linked to any travel.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_station(
    conn: &mut SqliteConnection,
    name: &str,
    from_location: &str,
    to_location: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(stations::table)
        .values((
            stations::name.eq(name),
            stations::from_location.eq(from_location),
            stations::to_location.eq(to_location),
        ))
        .execute(conn)?;

    let station_id: i64 = conn.get_last_insert_rowid()?;
    info!(station_id, name, "Station created");
    Ok(station_id)
}
