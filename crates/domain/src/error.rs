// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Email address is empty or malformed.
    InvalidEmail(String),
    /// A person or entity name is empty or invalid.
    InvalidName(String),
    /// Origin or destination is empty or invalid.
    InvalidLocation {
        /// Which end of the trip was invalid (`origin` or `destination`).
        field: String,
        /// Description of the problem.
        reason: String,
    },
    /// The trip end date precedes its start date.
    InvalidDateRange {
        /// The trip start date.
        start_date: time::Date,
        /// The trip end date.
        end_date: time::Date,
    },
    /// Failed to parse a date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// The number of travelers is outside the accepted range.
    InvalidTravelerCount {
        /// The rejected count.
        count: u32,
        /// The maximum accepted count.
        max: u32,
    },
    /// A discount code is empty or malformed.
    InvalidDiscountCode(String),
    /// A discount type string is not recognised.
    InvalidDiscountKind(String),
    /// A discount value is out of range for its kind.
    InvalidDiscountValue {
        /// The discount kind.
        kind: String,
        /// The rejected value.
        value: i64,
    },
    /// A travel duration string could not be parsed into days.
    InvalidDuration(String),
    /// A monetary amount is negative.
    NegativeAmount {
        /// The field carrying the amount.
        field: String,
        /// The rejected amount.
        amount: i64,
    },
    /// A local transport type string is not recognised.
    InvalidLocalTransportKind(String),
    /// A transport leg was selected for the wrong direction.
    LegDirectionMismatch {
        /// The expected direction.
        expected: String,
        /// The direction of the offered option.
        actual: String,
    },
    /// A transport leg does not serve the trip route.
    LegRouteMismatch {
        /// The option identifier.
        option_id: String,
        /// Description of the mismatch.
        reason: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidLocation { field, reason } => {
                write!(f, "Invalid {field}: {reason}")
            }
            Self::InvalidDateRange {
                start_date,
                end_date,
            } => {
                write!(
                    f,
                    "Trip end date {end_date} is before start date {start_date}"
                )
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::InvalidTravelerCount { count, max } => {
                write!(
                    f,
                    "Invalid traveler count: {count}. Must be between 1 and {max}"
                )
            }
            Self::InvalidDiscountCode(msg) => write!(f, "Invalid discount code: {msg}"),
            Self::InvalidDiscountKind(kind) => {
                write!(
                    f,
                    "Invalid discount type '{kind}'. Must be 'percentage' or 'fixed'"
                )
            }
            Self::InvalidDiscountValue { kind, value } => {
                write!(f, "Invalid {kind} discount value: {value}")
            }
            Self::InvalidDuration(value) => {
                write!(f, "Invalid travel duration '{value}'. Expected e.g. '7 days'")
            }
            Self::NegativeAmount { field, amount } => {
                write!(f, "Amount for '{field}' must not be negative (got {amount})")
            }
            Self::InvalidLocalTransportKind(kind) => {
                write!(f, "Invalid local transport type: {kind}")
            }
            Self::LegDirectionMismatch { expected, actual } => {
                write!(f, "Expected a {expected} leg but got a {actual} leg")
            }
            Self::LegRouteMismatch { option_id, reason } => {
                write!(f, "Transport option '{option_id}' does not fit the trip: {reason}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
