// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operation log queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use travelease_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};

use crate::data_models::OpData;
use crate::diesel_schema::ops;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = ops)]
struct OpRow {
    op_id: i64,
    user_id: Option<i64>,
    code: String,
    actor_json: String,
    cause_json: String,
    action_json: String,
    before_snapshot_json: String,
    after_snapshot_json: String,
    created_at: String,
}

impl TryFrom<OpRow> for OpData {
    type Error = PersistenceError;

    fn try_from(row: OpRow) -> Result<Self, Self::Error> {
        let actor: Actor = serde_json::from_str(&row.actor_json)?;
        let cause: Cause = serde_json::from_str(&row.cause_json)?;
        let action: Action = serde_json::from_str(&row.action_json)?;
        let before: StateSnapshot = serde_json::from_str(&row.before_snapshot_json)?;
        let after: StateSnapshot = serde_json::from_str(&row.after_snapshot_json)?;

        Ok(Self {
            op_id: row.op_id,
            user_id: row.user_id,
            code: row.code,
            event: AuditEvent::new(actor, cause, action, before, after),
            created_at: row.created_at,
        })
    }
}

/// Lists the operations recorded against a user, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored event cannot be
/// deserialized.
pub fn get_ops_by_user_id(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<OpData>, PersistenceError> {
    let rows: Vec<OpRow> = ops::table
        .filter(ops::user_id.eq(user_id))
        .order(ops::op_id.desc())
        .select(OpRow::as_select())
        .load(conn)?;

    rows.into_iter().map(OpData::try_from).collect()
}

/// Counts every recorded operation.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_ops(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(ops::table.count().get_result(conn)?)
}
