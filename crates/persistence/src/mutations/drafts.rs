// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking draft mutations.
//!
//! A draft stores the whole wizard `Booking` as JSON next to the label of
//! its current step. Drafts are kept after payment since confirmations are
//! read back from them; the wizard never deletes one.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;
use travelease::Booking;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::booking_drafts;
use crate::error::PersistenceError;

/// Creates a draft for a user.
///
/// # Errors
///
/// Returns an error if the booking cannot be serialized or the user does
/// not exist.
pub fn create_booking_draft(
    conn: &mut SqliteConnection,
    user_id: i64,
    booking: &Booking,
) -> Result<i64, PersistenceError> {
    let booking_json: String = serde_json::to_string(booking)?;

    diesel::insert_into(booking_drafts::table)
        .values((
            booking_drafts::user_id.eq(user_id),
            booking_drafts::step.eq(booking.step.label()),
            booking_drafts::booking_json.eq(&booking_json),
        ))
        .execute(conn)?;

    let draft_id: i64 = conn.get_last_insert_rowid()?;
    debug!(draft_id, user_id, "Booking draft created");
    Ok(draft_id)
}

/// Replaces the booking stored in a draft.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the draft does not exist.
pub fn update_booking_draft(
    conn: &mut SqliteConnection,
    draft_id: i64,
    booking: &Booking,
) -> Result<(), PersistenceError> {
    let booking_json: String = serde_json::to_string(booking)?;

    let updated: usize =
        diesel::update(booking_drafts::table.filter(booking_drafts::draft_id.eq(draft_id)))
            .set((
                booking_drafts::step.eq(booking.step.label()),
                booking_drafts::booking_json.eq(&booking_json),
                booking_drafts::updated_at
                    .eq(diesel::dsl::sql::<diesel::sql_types::Text>("CURRENT_TIMESTAMP")),
            ))
            .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("Booking draft {draft_id}")));
    }

    debug!(draft_id, step = %booking.step, "Booking draft updated");
    Ok(())
}

/// Deletes a draft.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the draft does not exist.
pub fn delete_booking_draft(
    conn: &mut SqliteConnection,
    draft_id: i64,
) -> Result<(), PersistenceError> {
    let deleted: usize =
        diesel::delete(booking_drafts::table.filter(booking_drafts::draft_id.eq(draft_id)))
            .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!("Booking draft {draft_id}")));
    }

    debug!(draft_id, "Booking draft deleted");
    Ok(())
}
