// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{booking_at_billing, create_test_discount, run};
use crate::{Booking, Command};
use travelease_domain::{DiscountKind, PriceBreakdown};

#[test]
fn test_empty_booking_prices_to_zero() {
    let booking: Booking = Booking::new();
    assert_eq!(booking.days(), 0);
    assert_eq!(booking.price_breakdown(), PriceBreakdown::default());
}

#[test]
fn test_price_breakdown_for_full_booking() {
    // Two travelers over five days: flights 15000 + 20000, hotel-3 at
    // 12900 a night, Eiffel Tower at 2500, bike at 1200 a day.
    let booking: Booking = booking_at_billing();
    let breakdown: PriceBreakdown = booking.price_breakdown();

    assert_eq!(booking.days(), 5);
    assert_eq!(breakdown.transport, 70_000);
    assert_eq!(breakdown.accommodation, 64_500);
    assert_eq!(breakdown.attractions, 5_000);
    assert_eq!(breakdown.local_transport, 6_000);
    assert_eq!(breakdown.subtotal, 145_500);
    assert_eq!(breakdown.total, 145_500);
}

#[test]
fn test_price_breakdown_with_percentage_discount() {
    let booking: Booking = run(
        &booking_at_billing(),
        Command::ApplyDiscount {
            discount: create_test_discount(DiscountKind::Percentage, 15),
        },
    );
    let breakdown: PriceBreakdown = booking.price_breakdown();

    assert_eq!(breakdown.discount, 21_825);
    assert_eq!(breakdown.total, 123_675);
}

#[test]
fn test_booking_round_trips_through_json() {
    let booking: Booking = booking_at_billing();
    let json: String = serde_json::to_string(&booking).unwrap();
    let back: Booking = serde_json::from_str(&json).unwrap();
    assert_eq!(back, booking);
}
