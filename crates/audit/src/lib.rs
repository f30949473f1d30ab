// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! Audit records for TravelEase.
//!
//! Each successful booking transition and each administrative mutation
//! yields one [`AuditEvent`]. Persistence stores these in the operation
//! log so a booking's history can be replayed for support.

use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// The entity that initiated a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Identifier of the actor, usually a user id.
    pub id: String,
    /// Kind of actor: `traveler`, `admin` or `system`.
    pub actor_type: String,
}

impl Actor {
    /// Actor type for signed-in travelers.
    pub const TRAVELER: &'static str = "traveler";
    /// Actor type for superadmins.
    pub const ADMIN: &'static str = "admin";
    /// Actor type for work the service does on its own behalf.
    pub const SYSTEM: &'static str = "system";

    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The actor identifier
    /// * `actor_type` - One of the actor type constants
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }

    /// A traveler identified by user id.
    #[must_use]
    pub fn traveler(user_id: i64) -> Self {
        Self::new(user_id.to_string(), String::from(Self::TRAVELER))
    }

    /// A superadmin identified by user id.
    #[must_use]
    pub fn admin(user_id: i64) -> Self {
        Self::new(user_id.to_string(), String::from(Self::ADMIN))
    }

    /// The service itself, e.g. for seeding or session cleanup.
    #[must_use]
    pub fn system() -> Self {
        Self::new(String::from("travelease"), String::from(Self::SYSTEM))
    }

    /// Returns the numeric user id if the actor is a person.
    #[must_use]
    pub fn user_id(&self) -> Option<i64> {
        if self.actor_type == Self::SYSTEM {
            return None;
        }
        self.id.parse().ok()
    }
}

/// Why a change was made, typically the inbound request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    /// Correlation identifier, e.g. a request id.
    pub id: String,
    /// Free-form description.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// What was done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Action name, e.g. `SelectAccommodation` or `CreateDiscount`.
    pub name: String,
    /// Optional human-readable details.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The action name
    /// * `details` - Optional details, e.g. the selected option id
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// Serialized view of state on one side of a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// JSON or plain-text rendering of the state.
    pub data: String,
}

impl StateSnapshot {
    /// Creates a snapshot from pre-rendered data.
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }

    /// Captures any serializable value as a JSON snapshot.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if `value` cannot be rendered.
    pub fn capture<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::to_string(value)?))
    }

    /// A snapshot for the side of a change where nothing existed yet.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(String::new())
    }

    /// Returns true when no state was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.trim().is_empty()
    }
}

/// An immutable record of one state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Who made the change.
    pub actor: Actor,
    /// Why it was made.
    pub cause: Cause,
    /// What was done.
    pub action: Action,
    /// State before the change.
    pub before: StateSnapshot,
    /// State after the change.
    pub after: StateSnapshot,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            actor,
            cause,
            action,
            before,
            after,
        }
    }

    /// One-line description used in logs and the operation log `code`.
    #[must_use]
    pub fn summary(&self) -> String {
        match &self.action.details {
            Some(details) => format!("{}: {details}", self.action.name),
            None => self.action.name.clone(),
        }
    }
}
