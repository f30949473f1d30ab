// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order and billing mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::{CompletedBooking, NewBooking, NewPassenger, PassengerData};
use crate::diesel_schema::{billings, orders};
use crate::error::PersistenceError;
use crate::mutations::passengers::create_passenger;
use crate::queries::passengers::find_lead_passenger;

/// Status written on orders created at checkout.
pub const ORDER_STATUS_COMPLETED: &str = "completed";

/// Records a paid booking.
///
/// The order references the user's first passenger row on the travel; a
/// single-person row is created when the user has none. The order and a
/// paid billing are then inserted. Everything happens in one transaction.
///
/// # Errors
///
/// Returns an error if the travel, user or discount does not exist, or a
/// write fails. Nothing is written on error.
pub fn complete_booking(
    conn: &mut SqliteConnection,
    booking: &NewBooking,
) -> Result<CompletedBooking, PersistenceError> {
    let completed: CompletedBooking = conn.transaction::<_, PersistenceError, _>(|conn| {
        let passenger_id: i64 =
            match find_lead_passenger(conn, booking.user_id, booking.travel_id)? {
                Some(PassengerData { passenger_id, .. }) => passenger_id,
                None => create_passenger(
                    conn,
                    &NewPassenger {
                        user_id: booking.user_id,
                        travel_id: booking.travel_id,
                        passengers_no: 1,
                        flight_id: None,
                        resort_id: None,
                        vehicle_id: None,
                    },
                )?,
            };

        diesel::insert_into(orders::table)
            .values((
                orders::total_price.eq(booking.total_price),
                orders::status.eq(ORDER_STATUS_COMPLETED),
                orders::passenger_id.eq(passenger_id),
                orders::discount_id.eq(booking.discount_id),
            ))
            .execute(conn)?;
        let order_id: i64 = conn.get_last_insert_rowid()?;

        diesel::insert_into(billings::table)
            .values((
                billings::amount_paid.eq(booking.amount_paid),
                billings::is_paid.eq(1),
                billings::order_id.eq(order_id),
                billings::user_id.eq(booking.user_id),
            ))
            .execute(conn)?;
        let billing_id: i64 = conn.get_last_insert_rowid()?;

        Ok(CompletedBooking {
            passenger_id,
            order_id,
            billing_id,
        })
    })?;

    info!(
        user_id = booking.user_id,
        travel_id = booking.travel_id,
        order_id = completed.order_id,
        billing_id = completed.billing_id,
        amount_paid = booking.amount_paid,
        "Booking completed"
    );
    Ok(completed)
}

/// Sets an order's status.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the order does not exist.
pub fn update_order_status(
    conn: &mut SqliteConnection,
    order_id: i64,
    status: &str,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(orders::table.filter(orders::order_id.eq(order_id)))
        .set(orders::status.eq(status))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("Order {order_id}")));
    }

    info!(order_id, status, "Order status updated");
    Ok(())
}

/// Attaches a discount to an order and sets its new total.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the order does not exist.
pub fn apply_discount_to_order(
    conn: &mut SqliteConnection,
    order_id: i64,
    discount_id: i64,
    total_price: i64,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(orders::table.filter(orders::order_id.eq(order_id)))
        .set((
            orders::discount_id.eq(Some(discount_id)),
            orders::total_price.eq(total_price),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("Order {order_id}")));
    }

    info!(order_id, discount_id, total_price, "Discount applied to order");
    Ok(())
}
