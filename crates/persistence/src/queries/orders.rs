// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order and billing queries.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::{BillingData, OrderData};
use crate::diesel_schema::{billings, orders, passengers};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = orders)]
struct OrderRow {
    order_id: i64,
    total_price: i64,
    status: String,
    passenger_id: i64,
    discount_id: Option<i64>,
    created_at: String,
}

impl From<OrderRow> for OrderData {
    fn from(row: OrderRow) -> Self {
        Self {
            order_id: row.order_id,
            total_price: row.total_price,
            status: row.status,
            passenger_id: row.passenger_id,
            discount_id: row.discount_id,
            created_at: row.created_at,
        }
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = billings)]
struct BillingRow {
    billing_id: i64,
    amount_paid: i64,
    is_paid: i32,
    order_id: i64,
    user_id: i64,
    created_at: String,
}

/// Retrieves an order by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the order is not found.
pub fn get_order_by_id(
    conn: &mut SqliteConnection,
    order_id: i64,
) -> Result<Option<OrderData>, PersistenceError> {
    let result: Result<OrderRow, diesel::result::Error> = orders::table
        .filter(orders::order_id.eq(order_id))
        .select(OrderRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists the orders placed through a user's passenger rows, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_orders_by_user_id(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<OrderData>, PersistenceError> {
    let rows: Vec<OrderRow> = orders::table
        .inner_join(passengers::table)
        .filter(passengers::user_id.eq(user_id))
        .order(orders::order_id.desc())
        .select(OrderRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(OrderData::from).collect())
}

/// Lists a user's billings, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_billings_by_user_id(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<BillingData>, PersistenceError> {
    let rows: Vec<BillingRow> = billings::table
        .filter(billings::user_id.eq(user_id))
        .order(billings::billing_id.desc())
        .select(BillingRow::as_select())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|row| BillingData {
            billing_id: row.billing_id,
            amount_paid: row.amount_paid,
            is_paid: row.is_paid != 0,
            order_id: row.order_id,
            user_id: row.user_id,
            created_at: row.created_at,
        })
        .collect())
}
