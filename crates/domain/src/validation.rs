// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{LegDirection, Money, TransportOption, TripDetails};
use time::Date;

/// Maximum number of travelers accepted on a single booking.
pub const MAX_TRAVELERS: u32 = 50;

/// Validates the trip details entered on the first wizard step.
///
/// Location presence is enforced when `Location` values are constructed;
/// this checks the relationships between fields.
///
/// # Errors
///
/// Returns an error if:
/// - The end date is before the start date
/// - The traveler count is zero or above `MAX_TRAVELERS`
pub fn validate_trip_details(trip: &TripDetails) -> Result<(), DomainError> {
    if trip.end_date < trip.start_date {
        return Err(DomainError::InvalidDateRange {
            start_date: trip.start_date,
            end_date: trip.end_date,
        });
    }

    if trip.travelers == 0 || trip.travelers > MAX_TRAVELERS {
        return Err(DomainError::InvalidTravelerCount {
            count: trip.travelers,
            max: MAX_TRAVELERS,
        });
    }

    Ok(())
}

/// Validates that a person's name is present.
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if the trimmed value is empty.
pub fn validate_name(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::InvalidName(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Validates that a monetary amount is not negative.
///
/// # Errors
///
/// Returns `DomainError::NegativeAmount` for amounts below zero.
pub fn validate_amount(field: &str, amount: Money) -> Result<(), DomainError> {
    if amount < 0 {
        return Err(DomainError::NegativeAmount {
            field: field.to_string(),
            amount,
        });
    }
    Ok(())
}

/// Validates that a transport option is usable as the given leg of a trip.
///
/// Outbound legs must depart from the origin on the start date and arrive
/// at the destination; return legs mirror that on the end date.
///
/// # Errors
///
/// Returns an error if the direction, route or date does not match.
pub fn validate_leg(
    trip: &TripDetails,
    option: &TransportOption,
    expected: LegDirection,
) -> Result<(), DomainError> {
    if option.direction != expected {
        return Err(DomainError::LegDirectionMismatch {
            expected: expected.as_str().to_string(),
            actual: option.direction.as_str().to_string(),
        });
    }

    let (from, to, date): (&str, &str, Date) = match expected {
        LegDirection::Outbound => (
            trip.origin.name(),
            trip.destination.name(),
            trip.start_date,
        ),
        LegDirection::Return => (trip.destination.name(), trip.origin.name(), trip.end_date),
    };

    if !option.from.eq_ignore_ascii_case(from) || !option.to.eq_ignore_ascii_case(to) {
        return Err(DomainError::LegRouteMismatch {
            option_id: option.id.clone(),
            reason: format!(
                "runs {} to {}, expected {from} to {to}",
                option.from, option.to
            ),
        });
    }

    if option.date != date {
        return Err(DomainError::LegRouteMismatch {
            option_id: option.id.clone(),
            reason: format!("departs on {}, expected {date}", option.date),
        });
    }

    Ok(())
}

/// Parses the leading day count of a duration string such as `"9 days"`.
///
/// # Errors
///
/// Returns `DomainError::InvalidDuration` if no positive integer leads the
/// string.
pub fn parse_duration_days(value: &str) -> Result<u32, DomainError> {
    let digits: String = value
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    match digits.parse::<u32>() {
        Ok(days) if days > 0 => Ok(days),
        _ => Err(DomainError::InvalidDuration(value.to_string())),
    }
}

/// Travel prices are stored as at least one rupee.
#[must_use]
pub fn normalize_travel_price(price: Money) -> Money {
    price.max(1)
}
