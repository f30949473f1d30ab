// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{Booking, Receipt, TransitionResult, WizardStep};
use crate::validate_checkout;
use travelease_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use travelease_domain::{
    LegDirection, Money, TransportOption, TripDetails, format_inr, format_iso_date,
    validate_leg, validate_trip_details,
};

/// Applies a command to a booking, producing a new booking and audit event.
///
/// # Arguments
///
/// * `booking` - The current booking (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new booking and audit event
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The command is not accepted on the booking's current step
/// - A selection the command depends on is missing
/// - The command violates domain rules
#[allow(clippy::too_many_lines)]
pub fn apply(
    booking: &Booking,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let name: &'static str = command.name();

    let (new_state, details): (Booking, Option<String>) = match command {
        Command::StartTrip { trip, travel_id } => start_trip(booking, trip, travel_id)?,
        Command::SelectTransportation {
            outbound,
            return_leg,
        } => {
            require_step(booking, name, WizardStep::Transportation)?;
            let mut next: Booking = with_legs(booking, outbound, return_leg)?;
            next.accommodation_skipped = false;
            next.step = WizardStep::Accommodation;
            let details: Option<String> = leg_details(&next);
            (next, details)
        }
        Command::SkipToAttractions {
            outbound,
            return_leg,
        } => {
            require_step(booking, name, WizardStep::Transportation)?;
            let mut next: Booking = with_legs(booking, outbound, return_leg)?;
            next.accommodation = None;
            next.accommodation_skipped = true;
            next.step = WizardStep::Attractions;
            let details: Option<String> = leg_details(&next);
            (next, details)
        }
        Command::SelectAccommodation { accommodation } => {
            require_step(booking, name, WizardStep::Accommodation)?;
            let details: String = format!("{} ({})", accommodation.name, accommodation.id);
            let mut next: Booking = booking.clone();
            next.accommodation = Some(accommodation);
            next.accommodation_skipped = false;
            next.step = WizardStep::Attractions;
            (next, Some(details))
        }
        Command::SkipAccommodation => {
            require_step(booking, name, WizardStep::Accommodation)?;
            let mut next: Booking = booking.clone();
            next.accommodation = None;
            next.accommodation_skipped = true;
            next.step = WizardStep::Attractions;
            (next, None)
        }
        Command::ToggleAttraction { attraction } => {
            require_step(booking, name, WizardStep::Attractions)?;
            let mut next: Booking = booking.clone();
            let details: String = if booking.has_attraction(&attraction.id) {
                next.attractions.retain(|a| a.id != attraction.id);
                format!("Removed {}", attraction.name)
            } else {
                let added: String = format!("Added {}", attraction.name);
                next.attractions.push(attraction);
                added
            };
            (next, Some(details))
        }
        Command::ConfirmAttractions => {
            require_step(booking, name, WizardStep::Attractions)?;
            let mut next: Booking = booking.clone();
            next.step = WizardStep::LocalTransport;
            let details: String = format!("{} attraction(s)", next.attractions.len());
            (next, Some(details))
        }
        Command::SelectLocalTransport { transport } => {
            require_step(booking, name, WizardStep::LocalTransport)?;
            let details: Option<String> = transport.as_ref().map(|t| t.name.clone());
            let mut next: Booking = booking.clone();
            next.local_transport = transport;
            next.step = WizardStep::Billing;
            (next, details)
        }
        Command::ApplyDiscount { discount } => {
            require_step(booking, name, WizardStep::Billing)?;
            let details: String = format!(
                "{} ({} {})",
                discount.code.value(),
                discount.value,
                discount.kind
            );
            let mut next: Booking = booking.clone();
            next.discount = Some(discount);
            (next, Some(details))
        }
        Command::RemoveDiscount => {
            require_step(booking, name, WizardStep::Billing)?;
            let mut next: Booking = booking.clone();
            let removed = next
                .discount
                .take()
                .ok_or_else(|| CoreError::MissingSelection(String::from("a discount")))?;
            (next, Some(removed.code.value().to_string()))
        }
        Command::Checkout { receipt } => checkout(booking, receipt)?,
        Command::GoBack => {
            let target: WizardStep = back_target(booking)?;
            let mut next: Booking = booking.clone();
            next.step = target;
            let details: String = format!("{} -> {target}", booking.step);
            (next, Some(details))
        }
        Command::Reset => (Booking::new(), None),
    };

    let before: StateSnapshot = booking.to_snapshot()?;
    let after: StateSnapshot = new_state.to_snapshot()?;
    let action: Action = Action::new(String::from(name), details);
    let audit_event: AuditEvent = AuditEvent::new(actor, cause, action, before, after);

    Ok(TransitionResult {
        new_state,
        audit_event,
    })
}

pub(crate) fn require_step(
    booking: &Booking,
    command: &str,
    expected: WizardStep,
) -> Result<(), CoreError> {
    if booking.step != expected {
        return Err(CoreError::InvalidStep {
            command: command.to_string(),
            step: booking.step,
        });
    }
    Ok(())
}

fn start_trip(
    booking: &Booking,
    trip: TripDetails,
    travel_id: i64,
) -> Result<(Booking, Option<String>), CoreError> {
    require_step(booking, "StartTrip", WizardStep::TripDetails)?;
    validate_trip_details(&trip)?;

    let mut next: Booking = booking.clone();
    // Legs and hotels are tied to the route and dates.
    if next.trip.as_ref() != Some(&trip) {
        next = Booking::new();
    }

    let details: String = format!(
        "{}, {} to {}, {} traveler(s)",
        trip.route_name(),
        format_iso_date(trip.start_date),
        format_iso_date(trip.end_date),
        trip.travelers
    );
    next.trip = Some(trip);
    next.travel_id = Some(travel_id);
    next.step = WizardStep::Transportation;
    Ok((next, Some(details)))
}

fn with_legs(
    booking: &Booking,
    outbound: TransportOption,
    return_leg: TransportOption,
) -> Result<Booking, CoreError> {
    let trip: &TripDetails = booking
        .trip
        .as_ref()
        .ok_or_else(|| CoreError::MissingSelection(String::from("trip details")))?;
    validate_leg(trip, &outbound, LegDirection::Outbound)?;
    validate_leg(trip, &return_leg, LegDirection::Return)?;

    let mut next: Booking = booking.clone();
    next.outbound = Some(outbound);
    next.return_leg = Some(return_leg);
    Ok(next)
}

fn leg_details(booking: &Booking) -> Option<String> {
    match (&booking.outbound, &booking.return_leg) {
        (Some(out), Some(back)) => Some(format!("{} / {}", out.id, back.id)),
        _ => None,
    }
}

fn checkout(
    booking: &Booking,
    receipt: Receipt,
) -> Result<(Booking, Option<String>), CoreError> {
    validate_checkout(booking)?;

    let expected: Money = booking.price_breakdown().total;
    if receipt.amount_paid != expected {
        return Err(CoreError::PaymentMismatch {
            expected,
            actual: receipt.amount_paid,
        });
    }

    let details: String = format!(
        "Order {} paid {}",
        receipt.order_id,
        format_inr(receipt.amount_paid)
    );
    let mut next: Booking = booking.clone();
    next.receipt = Some(receipt);
    next.step = WizardStep::Confirmation;
    Ok((next, Some(details)))
}

fn back_target(booking: &Booking) -> Result<WizardStep, CoreError> {
    let invalid = || CoreError::InvalidStep {
        command: String::from("GoBack"),
        step: booking.step,
    };
    match booking.step {
        WizardStep::TripDetails | WizardStep::Confirmation => Err(invalid()),
        WizardStep::Attractions if booking.accommodation_skipped => {
            Ok(WizardStep::Transportation)
        }
        step => step.previous().ok_or_else(invalid),
    }
}
