// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sessions, authentication and role checks.

use std::str::FromStr;

use time::format_description::well_known::Iso8601;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};
use travelease_audit::Actor;
use travelease_persistence::{NewUser, Persistence, PersistenceError, SessionData, UserData};

use crate::error::AuthError;

/// What a session is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// A signed-in customer. Travelers may only touch their own bookings.
    Traveler,
    /// A superadmin. Admins manage users, discounts, travel records and
    /// reports, and may view any booking.
    Admin,
}

impl Role {
    /// Value stored in the `sessions.role` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Traveler => "traveler",
            Self::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "traveler" => Ok(Self::Traveler),
            "admin" => Ok(Self::Admin),
            other => Err(AuthError::AuthenticationFailed {
                reason: format!("Invalid session role: {other}"),
            }),
        }
    }
}

/// A user with a validated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The signed-in user.
    pub user_id: i64,
    /// The role the session was opened with.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(user_id: i64, role: Role) -> Self {
        Self { user_id, role }
    }

    /// The audit actor recorded for this user's actions.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        match self.role {
            Role::Traveler => Actor::traveler(self.user_id),
            Role::Admin => Actor::admin(self.user_id),
        }
    }
}

/// Session lifetimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    /// How long a traveler stays signed in.
    pub traveler_lifetime: Duration,
    /// How long an admin session lasts.
    pub admin_lifetime: Duration,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            traveler_lifetime: Duration::days(30),
            admin_lifetime: Duration::hours(24),
        }
    }
}

impl SessionPolicy {
    /// Lifetime of a new session for `role`.
    #[must_use]
    pub const fn lifetime_for(&self, role: Role) -> Duration {
        match role {
            Role::Traveler => self.traveler_lifetime,
            Role::Admin => self.admin_lifetime,
        }
    }
}

/// Role-based access checks.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Requires the Admin role.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    /// * `action` - Name of the attempted action, used in the error
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` for travelers.
    pub fn authorize_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Traveler => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Requires that the actor owns the booking, or is an admin.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` when a traveler reaches for
    /// someone else's booking.
    pub fn authorize_booking_access(
        actor: &AuthenticatedActor,
        owner_user_id: i64,
    ) -> Result<(), AuthError> {
        if actor.role == Role::Admin || actor.user_id == owner_user_id {
            return Ok(());
        }
        Err(AuthError::Unauthorized {
            action: String::from("access another traveler's booking"),
            required_role: String::from("the booking owner or Admin"),
        })
    }
}

/// Signs users in and out and validates session tokens.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Registers a traveler and opens a session for them.
    ///
    /// The caller is responsible for the password policy.
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `authenticated_actor`, `user`)
    ///
    /// # Errors
    ///
    /// Returns an error if the email or username is taken or the session
    /// cannot be created.
    pub fn signup(
        persistence: &mut Persistence,
        policy: &SessionPolicy,
        new_user: &NewUser,
    ) -> Result<(String, AuthenticatedActor, UserData), AuthError> {
        let user_id: i64 = persistence
            .create_user(new_user)
            .map_err(|e| match e {
                PersistenceError::DuplicateUser(email) => AuthError::AuthenticationFailed {
                    reason: format!("An account already exists for {email}"),
                },
                other => Self::map_persistence_error(other),
            })?;
        let user: UserData = Self::load_user(persistence, user_id)?;

        info!(user_id, "Traveler signed up");
        Self::open_session(persistence, policy, user, Role::Traveler)
    }

    /// Authenticates a traveler by email and password.
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `authenticated_actor`, `user`)
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AuthenticationFailed` for an unknown email or a
    /// wrong password; both produce the same message.
    pub fn login(
        persistence: &mut Persistence,
        policy: &SessionPolicy,
        email: &str,
        password: &str,
    ) -> Result<(String, AuthenticatedActor, UserData), AuthError> {
        let user: Option<UserData> = persistence
            .get_user_by_email(email)
            .map_err(Self::map_persistence_error)?;
        let Some(user) = user else {
            warn!("Login attempt for unknown email");
            return Err(Self::invalid_credentials());
        };

        if !persistence
            .verify_password(password, &user.password_hash)
            .map_err(Self::map_persistence_error)?
        {
            warn!(user_id = user.user_id, "Login attempt with wrong password");
            return Err(Self::invalid_credentials());
        }

        Self::open_session(persistence, policy, user, Role::Traveler)
    }

    /// Authenticates a superadmin by user id and admin password.
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `authenticated_actor`, `user`)
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AuthenticationFailed` when the user has no
    /// superadmin grant or the password does not match it.
    pub fn admin_login(
        persistence: &mut Persistence,
        policy: &SessionPolicy,
        user_id: i64,
        password: &str,
    ) -> Result<(String, AuthenticatedActor, UserData), AuthError> {
        let Some(grant) = persistence
            .get_superadmin_by_user_id(user_id)
            .map_err(Self::map_persistence_error)?
        else {
            warn!(user_id, "Admin login attempt without superadmin grant");
            return Err(Self::invalid_credentials());
        };

        if !persistence
            .verify_password(password, &grant.password_hash)
            .map_err(Self::map_persistence_error)?
        {
            warn!(user_id, "Admin login attempt with wrong password");
            return Err(Self::invalid_credentials());
        }

        let user: UserData = Self::load_user(persistence, user_id)?;
        Self::open_session(persistence, policy, user, Role::Admin)
    }

    /// Validates a session token.
    ///
    /// Expiry is checked on read; an expired session is deleted. Admin
    /// sessions additionally require the superadmin grant to still exist.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AuthenticationFailed` if the token is unknown
    /// or expired, or the user is gone.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<(AuthenticatedActor, UserData), AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime =
            OffsetDateTime::parse(&session.expires_at, &Iso8601::DEFAULT).map_err(|e| {
                AuthError::AuthenticationFailed {
                    reason: format!("Failed to parse session expiration: {e}"),
                }
            })?;

        if OffsetDateTime::now_utc() > expires_at {
            debug!(session_id = session.session_id, "Deleting expired session");
            persistence
                .delete_session(session_token)
                .map_err(Self::map_persistence_error)?;
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let role: Role = session.role.parse()?;
        if role == Role::Admin
            && persistence
                .get_superadmin_by_user_id(session.user_id)
                .map_err(Self::map_persistence_error)?
                .is_none()
        {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Superadmin access has been revoked"),
            });
        }

        let user: UserData = Self::load_user(persistence, session.user_id)?;

        persistence
            .update_session_activity(session.session_id)
            .map_err(Self::map_persistence_error)?;

        Ok((AuthenticatedActor::new(user.user_id, role), user))
    }

    /// Ends a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the token does not name a session.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(Self::map_persistence_error)
    }

    fn open_session(
        persistence: &mut Persistence,
        policy: &SessionPolicy,
        user: UserData,
        role: Role,
    ) -> Result<(String, AuthenticatedActor, UserData), AuthError> {
        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let format_time = |at: OffsetDateTime| {
            at.format(&Iso8601::DEFAULT)
                .map_err(|e| AuthError::AuthenticationFailed {
                    reason: format!("Failed to format session time: {e}"),
                })
        };
        let session_token: String = Self::generate_session_token();
        let expires_at: String = format_time(now + policy.lifetime_for(role))?;

        // Sessions nobody reads again are only removed here.
        persistence
            .delete_expired_sessions(&format_time(now)?)
            .map_err(Self::map_persistence_error)?;
        persistence
            .create_session(&session_token, user.user_id, role.as_str(), &expires_at)
            .map_err(Self::map_persistence_error)?;

        info!(user_id = user.user_id, role = role.as_str(), "Session opened");
        Ok((
            session_token,
            AuthenticatedActor::new(user.user_id, role),
            user,
        ))
    }

    fn load_user(persistence: &mut Persistence, user_id: i64) -> Result<UserData, AuthError> {
        persistence
            .get_user_by_id(user_id)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: format!("User {user_id} not found"),
            })
    }

    fn invalid_credentials() -> AuthError {
        AuthError::AuthenticationFailed {
            reason: String::from("Invalid credentials"),
        }
    }

    /// Tokens look like `session_{nanos}_{random}`.
    fn generate_session_token() -> String {
        let nanos: u128 = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_nanos());
        format!("session_{nanos}_{}", rand::random::<u64>())
    }

    fn map_persistence_error(err: PersistenceError) -> AuthError {
        match err {
            PersistenceError::SessionNotFound => AuthError::AuthenticationFailed {
                reason: String::from("Session not found"),
            },
            other => AuthError::AuthenticationFailed {
                reason: format!("Database error: {other}"),
            },
        }
    }
}
