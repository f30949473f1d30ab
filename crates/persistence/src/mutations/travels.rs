// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;
use travelease_domain::normalize_travel_price;

use crate::backend::PersistenceBackend;
use crate::data_models::NewTravel;
use crate::diesel_schema::{stations, travels};
use crate::error::PersistenceError;

/// Creates a travel and links its station back to it.
///
/// Both writes happen in one transaction. The price is clamped to at
/// least 1.
///
/// # Errors
///
/// Returns an error if the agency, station or vehicle does not exist, or
/// a write fails. Nothing is written on error.
pub fn create_travel(
    conn: &mut SqliteConnection,
    travel: &NewTravel,
) -> Result<i64, PersistenceError> {
    let price: i64 = normalize_travel_price(travel.price);

    let travel_id: i64 = conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::insert_into(travels::table)
            .values((
                travels::duration.eq(travel.duration),
                travels::price.eq(price),
                travels::date.eq(&travel.date),
                travels::dates.eq(&travel.dates),
                travels::agency_id.eq(travel.agency_id),
                travels::station_id.eq(travel.station_id),
                travels::vehicle_id.eq(travel.vehicle_id),
            ))
            .execute(conn)?;

        let travel_id: i64 = conn.get_last_insert_rowid()?;

        diesel::update(stations::table.filter(stations::station_id.eq(travel.station_id)))
            .set(stations::travel_id.eq(Some(travel_id)))
            .execute(conn)?;

        Ok(travel_id)
    })?;

    info!(
        travel_id,
        station_id = travel.station_id,
        price,
        "Travel created"
    );
    Ok(travel_id)
}
