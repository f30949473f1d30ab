// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;
use travelease_domain::format_iso_date;

use crate::backend::PersistenceBackend;
use crate::data_models::NewDiscount;
use crate::diesel_schema::discounts;
use crate::error::PersistenceError;

/// Creates a discount. The code is stored uppercased.
///
/// # Errors
///
/// Returns `PersistenceError::DuplicateDiscountCode` if the code exists.
pub fn create_discount(
    conn: &mut SqliteConnection,
    discount: &NewDiscount,
) -> Result<i64, PersistenceError> {
    let code: String = discount.code.trim().to_uppercase();
    let expiry_date: Option<String> = discount.expiry_date.map(format_iso_date);

    diesel::insert_into(discounts::table)
        .values((
            discounts::code.eq(&code),
            discounts::discount_type.eq(discount.discount_type.as_str()),
            discounts::amount.eq(discount.amount),
            discounts::expiry_date.eq(expiry_date),
            discounts::is_active.eq(i32::from(discount.is_active)),
        ))
        .execute(conn)
        .map_err(|e| {
            if PersistenceError::is_unique_violation(&e) {
                PersistenceError::DuplicateDiscountCode(code.clone())
            } else {
                PersistenceError::from(e)
            }
        })?;

    let discount_id: i64 = conn.get_last_insert_rowid()?;
    info!(discount_id, code = %code, "Discount created");
    Ok(discount_id)
}

/// Deletes a discount. Orders that used it keep their row with the
/// reference cleared.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the discount does not exist.
pub fn delete_discount(
    conn: &mut SqliteConnection,
    discount_id: i64,
) -> Result<(), PersistenceError> {
    let deleted: usize =
        diesel::delete(discounts::table.filter(discounts::discount_id.eq(discount_id)))
            .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Discount {discount_id}"
        )));
    }

    info!(discount_id, "Discount deleted");
    Ok(())
}
