// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User and superadmin queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::{SuperadminData, UserData};
use crate::diesel_schema::{superadmins, users};
use crate::error::PersistenceError;

/// Diesel Queryable struct for user rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = users)]
pub(crate) struct UserRow {
    user_id: i64,
    username: String,
    email: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    city: Option<String>,
    country: Option<String>,
    verified: i32,
    created_at: String,
}

impl From<UserRow> for UserData {
    fn from(row: UserRow) -> Self {
        Self {
            user_id: row.user_id,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            first_name: row.first_name,
            last_name: row.last_name,
            city: row.city,
            country: row.country,
            verified: row.verified != 0,
            created_at: row.created_at,
        }
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = superadmins)]
struct SuperadminRow {
    superadmin_id: i64,
    user_id: i64,
    password_hash: String,
    created_at: String,
}

/// Retrieves a user by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user is not found.
pub fn get_user_by_id(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Option<UserData>, PersistenceError> {
    debug!(user_id, "Looking up user by ID");

    let result: Result<UserRow, diesel::result::Error> = users::table
        .filter(users::user_id.eq(user_id))
        .select(UserRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves a user by email address.
///
/// The email is trimmed and lowercased before lookup, matching how it is
/// stored.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user is not found.
pub fn get_user_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<UserData>, PersistenceError> {
    let normalized: String = email.trim().to_lowercase();
    debug!(email = %normalized, "Looking up user by email");

    let result: Result<UserRow, diesel::result::Error> = users::table
        .filter(users::email.eq(&normalized))
        .select(UserRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves a user by username.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user is not found.
pub fn get_user_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> Result<Option<UserData>, PersistenceError> {
    let result: Result<UserRow, diesel::result::Error> = users::table
        .filter(users::username.eq(username.trim()))
        .select(UserRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists all users, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_users(conn: &mut SqliteConnection) -> Result<Vec<UserData>, PersistenceError> {
    let rows: Vec<UserRow> = users::table
        .order((users::created_at.desc(), users::user_id.desc()))
        .select(UserRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(UserData::from).collect())
}

/// Lists users matching a free-text search, newest first.
///
/// The term matches case-insensitively against the user id, first and
/// last name, email, city and country. A blank term returns every user.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn search_users(
    conn: &mut SqliteConnection,
    term: &str,
) -> Result<Vec<UserData>, PersistenceError> {
    let needle: String = term.trim().to_lowercase();
    let all: Vec<UserData> = list_users(conn)?;
    if needle.is_empty() {
        return Ok(all);
    }

    Ok(all
        .into_iter()
        .filter(|user| user_matches(user, &needle))
        .collect())
}

fn user_matches(user: &UserData, needle: &str) -> bool {
    let fields: [&str; 5] = [
        &user.first_name,
        &user.last_name,
        &user.email,
        user.city.as_deref().unwrap_or_default(),
        user.country.as_deref().unwrap_or_default(),
    ];
    user.user_id.to_string().contains(needle)
        || fields
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
}

/// Counts registered users.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_users(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(users::table.count().get_result(conn)?)
}

/// Retrieves the superadmin grant for a user.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user is not a superadmin.
pub fn get_superadmin_by_user_id(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Option<SuperadminData>, PersistenceError> {
    debug!(user_id, "Looking up superadmin");

    let result: Result<SuperadminRow, diesel::result::Error> = superadmins::table
        .filter(superadmins::user_id.eq(user_id))
        .select(SuperadminRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(SuperadminData {
            superadmin_id: row.superadmin_id,
            user_id: row.user_id,
            password_hash: row.password_hash,
            created_at: row.created_at,
        })),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Counts superadmins.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_superadmins(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(superadmins::table.count().get_result(conn)?)
}
