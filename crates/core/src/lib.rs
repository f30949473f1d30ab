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

mod apply;
mod command;
mod error;
mod state;

#[cfg(test)]
mod tests;

use travelease_domain::validate_trip_details;

pub use apply::apply;
pub use command::Command;
pub use error::CoreError;
pub use state::{Booking, Receipt, TransitionResult, WizardStep};

/// Checks that a booking can be paid for.
///
/// This is a read-only validation that does not create audit events. It
/// runs before the order and billing are persisted so a failed check
/// leaves no records behind.
///
/// # Arguments
///
/// * `booking` - The booking about to be checked out
///
/// # Errors
///
/// Returns an error if:
/// - The booking is not on the billing step
/// - Trip details or either transport leg are missing
/// - The trip details are no longer valid
pub fn validate_checkout(booking: &Booking) -> Result<(), CoreError> {
    apply::require_step(booking, "Checkout", WizardStep::Billing)?;

    let Some(trip) = booking.trip.as_ref() else {
        return Err(CoreError::MissingSelection(String::from("trip details")));
    };
    validate_trip_details(trip)?;

    if booking.outbound.is_none() || booking.return_leg.is_none() {
        return Err(CoreError::MissingSelection(String::from(
            "both outbound and return journeys",
        )));
    }

    Ok(())
}
