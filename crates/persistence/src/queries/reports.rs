// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Admin dashboard and report queries.
//!
//! Aggregation happens in Rust over narrow joined selects; the data set is
//! small and this keeps every query in plain Diesel DSL.

use std::collections::{BTreeMap, HashMap};

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::{
    BookingExportRow, DashboardStats, DestinationCount, MonthlyBookings, RecentBooking,
};
use crate::diesel_schema::{
    billings, discounts, orders, passengers, stations, travels, users,
};
use crate::error::PersistenceError;
use crate::queries::discounts::count_discounts;
use crate::queries::users::count_users;

/// Computes the dashboard headline numbers.
///
/// Revenue sums paid billings only.
///
/// # Errors
///
/// Returns an error if a database query fails.
pub fn dashboard_stats(conn: &mut SqliteConnection) -> Result<DashboardStats, PersistenceError> {
    let total_bookings: i64 = billings::table.count().get_result(conn)?;
    let total_users: i64 = count_users(conn)?;
    let active_discounts: i64 = count_discounts(conn, true)?;
    let paid: Vec<i64> = billings::table
        .filter(billings::is_paid.eq(1))
        .select(billings::amount_paid)
        .load(conn)?;

    Ok(DashboardStats {
        total_bookings,
        total_users,
        active_discounts,
        total_revenue: paid.iter().sum(),
    })
}

type BookingTuple = (
    (i64, i64, i64, i64, String),
    (String, String, String),
    (String, String, String, i32),
    (i64, String, Option<i64>),
);

/// Loads every billing joined through to its customer and route, newest
/// first, paired with the paying user's id.
fn load_booking_rows(
    conn: &mut SqliteConnection,
) -> Result<Vec<(i64, BookingExportRow)>, PersistenceError> {
    let rows: Vec<BookingTuple> = billings::table
        .inner_join(users::table)
        .inner_join(
            orders::table.inner_join(
                passengers::table.inner_join(travels::table.inner_join(stations::table)),
            ),
        )
        .order(billings::billing_id.desc())
        .select((
            (
                billings::billing_id,
                billings::order_id,
                billings::user_id,
                billings::amount_paid,
                billings::created_at,
            ),
            (users::first_name, users::last_name, users::email),
            (
                stations::from_location,
                stations::to_location,
                travels::date,
                passengers::passengers_no,
            ),
            (orders::total_price, orders::status, orders::discount_id),
        ))
        .load(conn)?;

    let codes: HashMap<i64, String> = discounts::table
        .select((discounts::discount_id, discounts::code))
        .load::<(i64, String)>(conn)?
        .into_iter()
        .collect();

    Ok(rows
        .into_iter()
        .map(
            |(
                (billing_id, order_id, user_id, amount_paid, booked_at),
                (first_name, last_name, email),
                (from_location, to_location, travel_date, travelers),
                (total_price, status, discount_id),
            )| {
                let row: BookingExportRow = BookingExportRow {
                    billing_id,
                    order_id,
                    customer_name: format!("{first_name} {last_name}"),
                    email,
                    from_location,
                    to_location,
                    travel_date,
                    travelers,
                    total_price,
                    amount_paid,
                    discount_code: discount_id.and_then(|id| codes.get(&id).cloned()),
                    status,
                    booked_at,
                };
                (user_id, row)
            },
        )
        .collect())
}

/// Lists the most recent paid bookings, optionally filtered.
///
/// The search term matches case-insensitively against the customer name,
/// email, route and order id.
///
/// # Errors
///
/// Returns an error if a database query fails.
pub fn recent_bookings(
    conn: &mut SqliteConnection,
    limit: usize,
    search: Option<&str>,
) -> Result<Vec<RecentBooking>, PersistenceError> {
    let needle: String = search.unwrap_or_default().trim().to_lowercase();

    Ok(load_booking_rows(conn)?
        .into_iter()
        .filter(|(_, row)| needle.is_empty() || booking_matches(row, &needle))
        .take(limit)
        .map(|(user_id, row)| RecentBooking {
            billing_id: row.billing_id,
            order_id: row.order_id,
            user_id,
            customer_name: row.customer_name,
            email: row.email,
            from_location: row.from_location,
            to_location: row.to_location,
            travel_date: row.travel_date,
            amount_paid: row.amount_paid,
            status: row.status,
            created_at: row.booked_at,
        })
        .collect())
}

fn booking_matches(row: &BookingExportRow, needle: &str) -> bool {
    row.order_id.to_string() == needle
        || [
            &row.customer_name,
            &row.email,
            &row.from_location,
            &row.to_location,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Ranks destinations by number of orders.
///
/// Ties are broken alphabetically.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn top_destinations(
    conn: &mut SqliteConnection,
    limit: usize,
) -> Result<Vec<DestinationCount>, PersistenceError> {
    let destinations: Vec<String> = orders::table
        .inner_join(passengers::table.inner_join(travels::table.inner_join(stations::table)))
        .select(stations::to_location)
        .load(conn)?;

    let mut counts: BTreeMap<String, i64> = BTreeMap::new();
    for destination in destinations {
        *counts.entry(destination).or_insert(0) += 1;
    }

    let mut ranked: Vec<DestinationCount> = counts
        .into_iter()
        .map(|(destination, bookings)| DestinationCount {
            destination,
            bookings,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.bookings
            .cmp(&a.bookings)
            .then_with(|| a.destination.cmp(&b.destination))
    });
    ranked.truncate(limit);

    Ok(ranked)
}

/// Buckets billings by `YYYY-MM` of their creation time, oldest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn bookings_by_month(
    conn: &mut SqliteConnection,
) -> Result<Vec<MonthlyBookings>, PersistenceError> {
    let rows: Vec<(String, i64, i32)> = billings::table
        .select((
            billings::created_at,
            billings::amount_paid,
            billings::is_paid,
        ))
        .load(conn)?;

    let mut months: BTreeMap<String, (i64, i64)> = BTreeMap::new();
    for (created_at, amount_paid, is_paid) in rows {
        let month: String = created_at.chars().take(7).collect();
        let entry: &mut (i64, i64) = months.entry(month).or_insert((0, 0));
        entry.0 += 1;
        if is_paid != 0 {
            entry.1 += amount_paid;
        }
    }

    Ok(months
        .into_iter()
        .map(|(month, (bookings, revenue))| MonthlyBookings {
            month,
            bookings,
            revenue,
        })
        .collect())
}

/// Every booking, newest first, shaped for CSV export.
///
/// # Errors
///
/// Returns an error if a database query fails.
pub fn booking_export_rows(
    conn: &mut SqliteConnection,
) -> Result<Vec<BookingExportRow>, PersistenceError> {
    Ok(load_booking_rows(conn)?
        .into_iter()
        .map(|(_, row)| row)
        .collect())
}
