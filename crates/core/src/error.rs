// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::state::WizardStep;
use travelease_domain::{DomainError, Money};

/// Errors that can occur during booking transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The command is not accepted at the booking's current step.
    InvalidStep {
        /// Name of the rejected command.
        command: String,
        /// The step the booking is on.
        step: WizardStep,
    },
    /// A selection the command depends on has not been made.
    MissingSelection(String),
    /// The amount charged does not match the priced booking.
    PaymentMismatch {
        /// Total computed from the booking.
        expected: Money,
        /// Amount reported by the receipt.
        actual: Money,
    },
    /// The booking could not be captured for auditing.
    Internal(String),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::InvalidStep { command, step } => {
                write!(f, "{command} is not allowed on the {step} step")
            }
            Self::MissingSelection(what) => write!(f, "Please select {what}"),
            Self::PaymentMismatch { expected, actual } => write!(
                f,
                "Payment of {actual} does not match booking total {expected}"
            ),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
