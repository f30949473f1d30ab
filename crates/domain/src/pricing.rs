// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::types::{
    Accommodation, AppliedDiscount, Attraction, DiscountKind, LocalTransport, Money,
    TransportOption,
};

/// Number of calendar days a trip covers, counting both ends.
///
/// A trip that starts and ends on the same day lasts one day.
#[must_use]
pub fn trip_days(start_date: Date, end_date: Date) -> i64 {
    (end_date - start_date).whole_days().abs() + 1
}

/// The selections a price is computed over.
#[derive(Debug, Clone, Copy)]
pub struct PricedSelections<'a> {
    /// Number of travelers.
    pub travelers: u32,
    /// Trip length in days.
    pub days: i64,
    /// Selected transport legs.
    pub legs: &'a [&'a TransportOption],
    /// Selected stay, if any.
    pub accommodation: Option<&'a Accommodation>,
    /// Selected attractions.
    pub attractions: &'a [Attraction],
    /// Selected local transport, if any.
    pub local_transport: Option<&'a LocalTransport>,
    /// Discount applied at billing, if any.
    pub discount: Option<&'a AppliedDiscount>,
}

/// A priced booking, itemized per wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Transport legs, per traveler.
    pub transport: Money,
    /// Stay, per night.
    pub accommodation: Money,
    /// Attractions, per traveler.
    pub attractions: Money,
    /// Local transport, per day.
    pub local_transport: Money,
    /// Sum of the above.
    pub subtotal: Money,
    /// Amount taken off by the discount.
    pub discount: Money,
    /// Amount payable.
    pub total: Money,
}

/// Prices a set of selections.
///
/// Transport and attractions are charged per traveler; accommodation and
/// local transport are charged per day of the trip.
#[must_use]
pub fn calculate_price(selections: &PricedSelections<'_>) -> PriceBreakdown {
    let travelers: Money = Money::from(selections.travelers);

    let transport: Money = selections
        .legs
        .iter()
        .map(|leg| leg.price * travelers)
        .sum();
    let accommodation: Money = selections
        .accommodation
        .map_or(0, |stay| stay.price * selections.days);
    let attractions: Money = selections
        .attractions
        .iter()
        .map(|attraction| attraction.price * travelers)
        .sum();
    let local_transport: Money = selections
        .local_transport
        .map_or(0, |transport| transport.price_per_day * selections.days);

    let subtotal: Money = transport + accommodation + attractions + local_transport;
    let total: Money = selections
        .discount
        .map_or(subtotal, |discount| apply_discount(subtotal, discount));

    PriceBreakdown {
        transport,
        accommodation,
        attractions,
        local_transport,
        subtotal,
        discount: subtotal - total,
        total,
    }
}

/// Applies a discount to a subtotal.
///
/// Percentages are clamped to `0..=100` and the result is rounded half-up
/// to whole rupees. Fixed discounts never take the total below zero.
#[must_use]
pub fn apply_discount(subtotal: Money, discount: &AppliedDiscount) -> Money {
    match discount.kind {
        DiscountKind::Percentage => {
            let percent: i64 = discount.value.clamp(0, 100);
            // Half-up rounding in integer arithmetic.
            (subtotal * (100 - percent) + 50).div_euclid(100)
        }
        DiscountKind::Fixed => (subtotal - discount.value.max(0)).max(0),
    }
}

/// Formats an amount in rupees with Indian digit grouping, e.g. `₹1,23,456`.
#[must_use]
pub fn format_inr(amount: Money) -> String {
    let digits: String = amount.unsigned_abs().to_string();
    let sign: &str = if amount < 0 { "-" } else { "" };

    if digits.len() <= 3 {
        return format!("{sign}₹{digits}");
    }

    let (head, last_three): (&str, &str) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest: &str = head;
    while rest.len() > 2 {
        let (left, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = left;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups.reverse();

    format!("{sign}₹{},{last_three}", groups.join(","))
}
