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

mod catalog;
mod error;
mod pricing;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use catalog::{
    accommodation_options, attraction_options, find_accommodation, find_attraction,
    find_local_transport, find_transport_option, local_transport_options, transport_options,
};
pub use error::DomainError;
pub use pricing::{
    PriceBreakdown, PricedSelections, apply_discount, calculate_price, format_inr, trip_days,
};
pub use types::{
    Accommodation, AppliedDiscount, Attraction, DiscountCode, DiscountKind, Email, LegDirection,
    LocalTransport, LocalTransportKind, Location, Money, TransportMode, TransportOption,
    TripDetails, format_iso_date, parse_iso_date,
};
pub use validation::{
    MAX_TRAVELERS, normalize_travel_price, parse_duration_days, validate_amount, validate_leg,
    validate_name, validate_trip_details,
};
