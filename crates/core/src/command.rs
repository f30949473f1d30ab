// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::state::Receipt;
use travelease_domain::{
    Accommodation, AppliedDiscount, Attraction, LocalTransport, TransportOption, TripDetails,
};

/// A booking intent, expressed as data.
///
/// Catalog lookups happen before a command is built, so commands carry the
/// resolved options rather than ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Enter trip details.
    StartTrip {
        /// The trip.
        trip: TripDetails,
        /// The travel record persisted for the trip.
        travel_id: i64,
    },
    /// Choose both legs and continue to accommodation.
    SelectTransportation {
        /// Outbound leg.
        outbound: TransportOption,
        /// Return leg.
        return_leg: TransportOption,
    },
    /// Choose both legs and go straight to attractions.
    SkipToAttractions {
        /// Outbound leg.
        outbound: TransportOption,
        /// Return leg.
        return_leg: TransportOption,
    },
    /// Choose a stay.
    SelectAccommodation {
        /// The stay.
        accommodation: Accommodation,
    },
    /// Continue without a stay.
    SkipAccommodation,
    /// Add the attraction, or remove it if already selected.
    ToggleAttraction {
        /// The attraction.
        attraction: Attraction,
    },
    /// Finish picking attractions.
    ConfirmAttractions,
    /// Choose local transport; `None` continues without one.
    SelectLocalTransport {
        /// The service, if any.
        transport: Option<LocalTransport>,
    },
    /// Attach a validated discount.
    ApplyDiscount {
        /// The discount.
        discount: AppliedDiscount,
    },
    /// Detach the current discount.
    RemoveDiscount,
    /// Record payment.
    Checkout {
        /// Identifiers of the persisted order and billing.
        receipt: Receipt,
    },
    /// Return to the previous step.
    GoBack,
    /// Abandon the booking and start over.
    Reset,
}

impl Command {
    /// Name recorded as the audit action.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::StartTrip { .. } => "StartTrip",
            Self::SelectTransportation { .. } => "SelectTransportation",
            Self::SkipToAttractions { .. } => "SkipToAttractions",
            Self::SelectAccommodation { .. } => "SelectAccommodation",
            Self::SkipAccommodation => "SkipAccommodation",
            Self::ToggleAttraction { .. } => "ToggleAttraction",
            Self::ConfirmAttractions => "ConfirmAttractions",
            Self::SelectLocalTransport { .. } => "SelectLocalTransport",
            Self::ApplyDiscount { .. } => "ApplyDiscount",
            Self::RemoveDiscount => "RemoveDiscount",
            Self::Checkout { .. } => "Checkout",
            Self::GoBack => "GoBack",
            Self::Reset => "Reset",
        }
    }
}
