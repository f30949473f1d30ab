// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use travelease_audit::{AuditEvent, StateSnapshot};
use travelease_domain::{
    Accommodation, AppliedDiscount, Attraction, LocalTransport, Money, PriceBreakdown,
    PricedSelections, TransportOption, TripDetails, calculate_price, trip_days,
};

use crate::error::CoreError;

/// The pages of the booking wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    /// Origin, destination, dates and travelers.
    TripDetails,
    /// Outbound and return legs.
    Transportation,
    /// Hotel selection.
    Accommodation,
    /// Attraction selection.
    Attractions,
    /// Local transport at the destination.
    LocalTransport,
    /// Price summary, discount and payment.
    Billing,
    /// Booking receipt.
    Confirmation,
}

impl WizardStep {
    /// One-based position in the wizard.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::TripDetails => 1,
            Self::Transportation => 2,
            Self::Accommodation => 3,
            Self::Attractions => 4,
            Self::LocalTransport => 5,
            Self::Billing => 6,
            Self::Confirmation => 7,
        }
    }

    /// The following step, or `None` on the last one.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::TripDetails => Some(Self::Transportation),
            Self::Transportation => Some(Self::Accommodation),
            Self::Accommodation => Some(Self::Attractions),
            Self::Attractions => Some(Self::LocalTransport),
            Self::LocalTransport => Some(Self::Billing),
            Self::Billing => Some(Self::Confirmation),
            Self::Confirmation => None,
        }
    }

    /// The preceding step, or `None` on the first one.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::TripDetails => None,
            Self::Transportation => Some(Self::TripDetails),
            Self::Accommodation => Some(Self::Transportation),
            Self::Attractions => Some(Self::Accommodation),
            Self::LocalTransport => Some(Self::Attractions),
            Self::Billing => Some(Self::LocalTransport),
            Self::Confirmation => Some(Self::Billing),
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TripDetails => "Trip Details",
            Self::Transportation => "Transportation",
            Self::Accommodation => "Accommodation",
            Self::Attractions => "Attractions",
            Self::LocalTransport => "Local Transport",
            Self::Billing => "Billing",
            Self::Confirmation => "Confirmation",
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Identifiers produced when a booking is paid for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// The persisted order.
    pub order_id: i64,
    /// The persisted billing record.
    pub billing_id: i64,
    /// The lead passenger the order references.
    pub passenger_id: i64,
    /// Amount charged.
    pub amount_paid: Money,
}

/// A booking in progress.
///
/// Bookings are values: every transition produces a new `Booking` and the
/// previous one is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Current wizard step.
    pub step: WizardStep,
    /// Trip details, set on the first step.
    pub trip: Option<TripDetails>,
    /// The travel record created for the trip.
    pub travel_id: Option<i64>,
    /// Outbound leg.
    pub outbound: Option<TransportOption>,
    /// Return leg.
    pub return_leg: Option<TransportOption>,
    /// Selected stay.
    pub accommodation: Option<Accommodation>,
    /// True when the traveler chose to skip accommodation.
    pub accommodation_skipped: bool,
    /// Selected attractions, in the order they were picked.
    pub attractions: Vec<Attraction>,
    /// Selected local transport.
    pub local_transport: Option<LocalTransport>,
    /// Discount applied on the billing step.
    pub discount: Option<AppliedDiscount>,
    /// Set once payment has been recorded.
    pub receipt: Option<Receipt>,
}

impl Booking {
    /// Creates an empty booking on the first step.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            step: WizardStep::TripDetails,
            trip: None,
            travel_id: None,
            outbound: None,
            return_leg: None,
            accommodation: None,
            accommodation_skipped: false,
            attractions: Vec::new(),
            local_transport: None,
            discount: None,
            receipt: None,
        }
    }

    /// Trip length in days, counting both ends. Zero before trip details
    /// are entered.
    #[must_use]
    pub fn days(&self) -> i64 {
        self.trip
            .as_ref()
            .map_or(0, |trip| trip_days(trip.start_date, trip.end_date))
    }

    /// Prices the current selections.
    #[must_use]
    pub fn price_breakdown(&self) -> PriceBreakdown {
        let legs: Vec<&TransportOption> = self
            .outbound
            .iter()
            .chain(self.return_leg.iter())
            .collect();
        let selections: PricedSelections<'_> = PricedSelections {
            travelers: self.trip.as_ref().map_or(0, |trip| trip.travelers),
            days: self.days(),
            legs: &legs,
            accommodation: self.accommodation.as_ref(),
            attractions: &self.attractions,
            local_transport: self.local_transport.as_ref(),
            discount: self.discount.as_ref(),
        };
        calculate_price(&selections)
    }

    /// True when the attraction is among the selections.
    #[must_use]
    pub fn has_attraction(&self, attraction_id: &str) -> bool {
        self.attractions.iter().any(|a| a.id == attraction_id)
    }

    /// Captures the booking for an audit event.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Internal` if the booking cannot be serialized.
    pub fn to_snapshot(&self) -> Result<StateSnapshot, CoreError> {
        StateSnapshot::capture(self).map_err(|e| CoreError::Internal(e.to_string()))
    }
}

impl Default for Booking {
    fn default() -> Self {
        Self::new()
    }
}

/// The result of a successful booking transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The booking after the transition.
    pub new_state: Booking,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}
