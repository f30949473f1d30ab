// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use travelease::Booking;

use crate::data_models::BookingDraft;
use crate::diesel_schema::booking_drafts;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = booking_drafts)]
struct DraftRow {
    draft_id: i64,
    user_id: i64,
    step: String,
    booking_json: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<DraftRow> for BookingDraft {
    type Error = PersistenceError;

    fn try_from(row: DraftRow) -> Result<Self, Self::Error> {
        let booking: Booking = serde_json::from_str(&row.booking_json)?;
        Ok(Self {
            draft_id: row.draft_id,
            user_id: row.user_id,
            step: row.step,
            booking,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Retrieves a booking draft by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the stored booking cannot be
/// deserialized. Returns `Ok(None)` if the draft is not found.
pub fn get_booking_draft(
    conn: &mut SqliteConnection,
    draft_id: i64,
) -> Result<Option<BookingDraft>, PersistenceError> {
    let result: Result<DraftRow, diesel::result::Error> = booking_drafts::table
        .filter(booking_drafts::draft_id.eq(draft_id))
        .select(DraftRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(BookingDraft::try_from(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists a user's drafts, most recently updated first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored booking cannot be
/// deserialized.
pub fn list_booking_drafts_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<BookingDraft>, PersistenceError> {
    let rows: Vec<DraftRow> = booking_drafts::table
        .filter(booking_drafts::user_id.eq(user_id))
        .order((
            booking_drafts::updated_at.desc(),
            booking_drafts::draft_id.desc(),
        ))
        .select(DraftRow::as_select())
        .load(conn)?;

    rows.into_iter().map(BookingDraft::try_from).collect()
}
