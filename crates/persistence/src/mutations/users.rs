// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User and superadmin mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::{NewUser, ProfileUpdate};
use crate::diesel_schema::{superadmins, users};
use crate::error::PersistenceError;

/// Hashes a plain-text password with bcrypt.
///
/// # Errors
///
/// Returns an error if hashing fails.
pub fn hash_password(password: &str) -> Result<String, PersistenceError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))
}

/// Creates a new user.
///
/// The email is stored trimmed and lowercased; the password is hashed.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user` - The user to create
///
/// # Errors
///
/// Returns `PersistenceError::DuplicateUser` if the username or email is
/// already registered, or a database error.
pub fn create_user(conn: &mut SqliteConnection, user: &NewUser) -> Result<i64, PersistenceError> {
    let email: String = user.email.trim().to_lowercase();
    let username: String = user.username.trim().to_string();

    info!(username = %username, email = %email, "Creating user");

    let password_hash: String = hash_password(&user.password)?;

    diesel::insert_into(users::table)
        .values((
            users::username.eq(&username),
            users::email.eq(&email),
            users::password_hash.eq(&password_hash),
            users::first_name.eq(user.first_name.trim()),
            users::last_name.eq(user.last_name.trim()),
            users::city.eq(user.city.as_deref()),
            users::country.eq(user.country.as_deref()),
            users::verified.eq(i32::from(user.verified)),
        ))
        .execute(conn)
        .map_err(|e| {
            if PersistenceError::is_unique_violation(&e) {
                PersistenceError::DuplicateUser(email.clone())
            } else {
                PersistenceError::from(e)
            }
        })?;

    let user_id: i64 = conn.get_last_insert_rowid()?;

    info!(user_id, "User created");
    Ok(user_id)
}

#[derive(AsChangeset)]
#[diesel(table_name = users)]
struct ProfileChangeset<'a> {
    first_name: Option<&'a str>,
    last_name: Option<&'a str>,
    city: Option<&'a str>,
    country: Option<&'a str>,
}

impl ProfileChangeset<'_> {
    const fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.city.is_none()
            && self.country.is_none()
    }
}

/// Applies a partial profile update.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the user does not exist.
pub fn update_user_profile(
    conn: &mut SqliteConnection,
    user_id: i64,
    update: &ProfileUpdate,
) -> Result<(), PersistenceError> {
    debug!(user_id, "Updating user profile");

    let exists: i64 = users::table
        .filter(users::user_id.eq(user_id))
        .count()
        .get_result(conn)?;
    if exists == 0 {
        return Err(PersistenceError::NotFound(format!("User {user_id}")));
    }

    let changes: ProfileChangeset<'_> = ProfileChangeset {
        first_name: update.first_name.as_deref().map(str::trim),
        last_name: update.last_name.as_deref().map(str::trim),
        city: update.city.as_deref().map(str::trim),
        country: update.country.as_deref().map(str::trim),
    };
    if changes.is_empty() {
        return Ok(());
    }

    diesel::update(users::table.filter(users::user_id.eq(user_id)))
        .set(&changes)
        .execute(conn)?;

    Ok(())
}

/// Grants superadmin rights to a user with a separate admin password.
///
/// # Errors
///
/// Returns an error if the user is missing, already a superadmin, or the
/// insert fails.
pub fn create_superadmin(
    conn: &mut SqliteConnection,
    user_id: i64,
    password: &str,
) -> Result<i64, PersistenceError> {
    info!(user_id, "Creating superadmin");

    let password_hash: String = hash_password(password)?;

    diesel::insert_into(superadmins::table)
        .values((
            superadmins::user_id.eq(user_id),
            superadmins::password_hash.eq(&password_hash),
        ))
        .execute(conn)
        .map_err(|e| {
            if PersistenceError::is_unique_violation(&e) {
                PersistenceError::DuplicateUser(format!("superadmin for user {user_id}"))
            } else {
                PersistenceError::from(e)
            }
        })?;

    let superadmin_id: i64 = conn.get_last_insert_rowid()?;

    info!(superadmin_id, user_id, "Superadmin created");
    Ok(superadmin_id)
}
