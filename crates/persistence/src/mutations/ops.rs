// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;
use travelease_audit::AuditEvent;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::ops;
use crate::error::PersistenceError;

/// Appends an audit event to the operation log.
///
/// The action name is stored as the op `code`.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event` - The event to record
/// * `user_id` - The user the operation concerns, if any
///
/// # Errors
///
/// Returns an error if the event cannot be serialized or inserted.
pub fn record_op(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
    user_id: Option<i64>,
) -> Result<i64, PersistenceError> {
    let actor_json: String = serde_json::to_string(&event.actor)?;
    let cause_json: String = serde_json::to_string(&event.cause)?;
    let action_json: String = serde_json::to_string(&event.action)?;
    let before_json: String = serde_json::to_string(&event.before)?;
    let after_json: String = serde_json::to_string(&event.after)?;

    diesel::insert_into(ops::table)
        .values((
            ops::user_id.eq(user_id),
            ops::code.eq(&event.action.name),
            ops::actor_json.eq(&actor_json),
            ops::cause_json.eq(&cause_json),
            ops::action_json.eq(&action_json),
            ops::before_snapshot_json.eq(&before_json),
            ops::after_snapshot_json.eq(&after_json),
        ))
        .execute(conn)?;

    let op_id: i64 = conn.get_last_insert_rowid()?;
    debug!(op_id, ?user_id, summary = %event.summary(), "Op recorded");
    Ok(op_id)
}
