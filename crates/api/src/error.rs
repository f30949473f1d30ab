// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::password_policy::PasswordPolicyError;
use travelease::CoreError;
use travelease_domain::DomainError;
use travelease_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Credentials or session were rejected.
    AuthenticationFailed {
        /// Why.
        reason: String,
    },
    /// The actor's role does not allow the action.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => write!(f, "Not allowed to {action}: requires {required_role}"),
        }
    }
}

impl std::error::Error for AuthError {}

/// Errors returned to API callers.
///
/// Lower-layer errors are translated into these explicitly so internal
/// types never reach the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Credentials or session were rejected.
    AuthenticationFailed {
        /// Why.
        reason: String,
    },
    /// The actor's role does not allow the action.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A booking or business rule was violated.
    DomainRuleViolation {
        /// Short rule identifier, e.g. `wizard_step`.
        rule: String,
        /// Human-readable description.
        message: String,
    },
    /// A request field was missing or malformed.
    InvalidInput {
        /// The offending field.
        field: String,
        /// Human-readable description.
        message: String,
    },
    /// A referenced record does not exist.
    ResourceNotFound {
        /// The kind of record, e.g. `Booking`.
        resource_type: String,
        /// Human-readable description.
        message: String,
    },
    /// Something failed that the caller cannot fix.
    Internal {
        /// Description for logs.
        message: String,
    },
    /// The chosen password breaks the password policy.
    PasswordPolicyViolation {
        /// Human-readable description.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => write!(f, "Not allowed to {action}: requires {required_role}"),
            Self::DomainRuleViolation { message, .. }
            | Self::InvalidInput { message, .. }
            | Self::PasswordPolicyViolation { message } => f.write_str(message),
            Self::ResourceNotFound {
                resource_type,
                message,
            } => write!(f, "{resource_type} not found: {message}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::PasswordPolicyViolation {
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    let field: &str = match err {
        DomainError::InvalidLocation { field, .. } => {
            return ApiError::InvalidInput { field, message };
        }
        DomainError::LegDirectionMismatch { .. } | DomainError::LegRouteMismatch { .. } => {
            return ApiError::DomainRuleViolation {
                rule: String::from("transport_leg"),
                message,
            };
        }
        DomainError::InvalidEmail(_) => "email",
        DomainError::InvalidName(_) => "name",
        DomainError::InvalidDateRange { .. } => "end_date",
        DomainError::DateParseError { .. } => "date",
        DomainError::InvalidTravelerCount { .. } => "travelers",
        DomainError::InvalidDiscountCode(_) => "code",
        DomainError::InvalidDiscountKind(_) => "discount_type",
        DomainError::InvalidDiscountValue { .. } | DomainError::NegativeAmount { .. } => "amount",
        DomainError::InvalidDuration(_) => "duration",
        DomainError::InvalidLocalTransportKind(_) => "transport_type",
    };
    ApiError::InvalidInput {
        field: field.to_string(),
        message,
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        err @ CoreError::InvalidStep { .. } => ApiError::DomainRuleViolation {
            rule: String::from("wizard_step"),
            message: err.to_string(),
        },
        err @ CoreError::MissingSelection(_) => ApiError::DomainRuleViolation {
            rule: String::from("missing_selection"),
            message: err.to_string(),
        },
        err @ CoreError::PaymentMismatch { .. } => ApiError::DomainRuleViolation {
            rule: String::from("payment_amount"),
            message: err.to_string(),
        },
        CoreError::Internal(msg) => ApiError::Internal { message: msg },
    }
}

/// Translates a persistence error into an API error.
///
/// Uniqueness and lookup failures are the caller's concern; everything
/// else is internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::DuplicateUser(email) => ApiError::DomainRuleViolation {
            rule: String::from("unique_user"),
            message: format!("An account already exists for {email}"),
        },
        PersistenceError::DuplicateDiscountCode(code) => ApiError::DomainRuleViolation {
            rule: String::from("unique_discount_code"),
            message: format!("Discount code {code} already exists"),
        },
        PersistenceError::NotFound(what) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message: what,
        },
        PersistenceError::SessionNotFound => ApiError::AuthenticationFailed {
            reason: String::from("Session not found"),
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
