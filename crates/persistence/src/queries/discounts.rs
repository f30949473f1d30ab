// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::DiscountData;
use crate::diesel_schema::discounts;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = discounts)]
struct DiscountRow {
    discount_id: i64,
    code: String,
    discount_type: String,
    amount: Option<i64>,
    expiry_date: Option<String>,
    is_active: i32,
    created_at: String,
}

impl From<DiscountRow> for DiscountData {
    fn from(row: DiscountRow) -> Self {
        Self {
            discount_id: row.discount_id,
            code: row.code,
            discount_type: row.discount_type,
            amount: row.amount,
            expiry_date: row.expiry_date,
            is_active: row.is_active != 0,
            created_at: row.created_at,
        }
    }
}

/// Lists discounts, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_discounts(conn: &mut SqliteConnection) -> Result<Vec<DiscountData>, PersistenceError> {
    let rows: Vec<DiscountRow> = discounts::table
        .order((discounts::created_at.desc(), discounts::discount_id.desc()))
        .select(DiscountRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(DiscountData::from).collect())
}

/// Retrieves a discount by code. The code is matched uppercased.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no discount has that code.
pub fn get_discount_by_code(
    conn: &mut SqliteConnection,
    code: &str,
) -> Result<Option<DiscountData>, PersistenceError> {
    let normalized: String = code.trim().to_uppercase();
    debug!(code = %normalized, "Looking up discount");

    let result: Result<DiscountRow, diesel::result::Error> = discounts::table
        .filter(discounts::code.eq(&normalized))
        .select(DiscountRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Counts discounts; with `active_only`, only those flagged active.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_discounts(
    conn: &mut SqliteConnection,
    active_only: bool,
) -> Result<i64, PersistenceError> {
    let count: i64 = if active_only {
        discounts::table
            .filter(discounts::is_active.eq(1))
            .count()
            .get_result(conn)?
    } else {
        discounts::table.count().get_result(conn)?
    };
    Ok(count)
}
