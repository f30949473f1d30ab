// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use serde::{Deserialize, Serialize};
use travelease::{Booking, Receipt, WizardStep};
use travelease_domain::{
    Accommodation, Attraction, LocalTransport, Money, PriceBreakdown, TransportOption,
};
use travelease_persistence::{
    DashboardStats, DestinationCount, DiscountData, FlightData, MonthlyBookings, PassengerData,
    RecentBooking, ResortData, SampleTravelSummary, SeedSummary, TravelRecord, TripSummary,
    UserData,
};

/// Traveler registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Traveler sign-in by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Admin panel sign-in. Admins identify by user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminLoginRequest {
    pub user_id: i64,
    pub password: String,
}

/// A newly opened session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub session_token: String,
    pub user_id: i64,
    pub username: String,
    pub display_name: String,
    /// `traveler` or `admin`.
    pub role: String,
    /// ISO 8601 expiry timestamp.
    pub expires_at: String,
}

/// Trip details entered on the first wizard step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartBookingRequest {
    pub origin: String,
    pub destination: String,
    /// `YYYY-MM-DD`.
    pub start_date: String,
    /// `YYYY-MM-DD`.
    pub end_date: String,
    pub travelers: u32,
    /// Reuses an existing booking that was sent back to the first step.
    #[serde(default)]
    pub booking_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectTransportationRequest {
    pub outbound_id: String,
    pub return_id: String,
    /// Jump straight to attractions without choosing a stay.
    #[serde(default)]
    pub skip_accommodation: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectAccommodationRequest {
    pub accommodation_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleAttractionRequest {
    pub attraction_id: String,
}

/// `None` continues without local transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectLocalTransportRequest {
    #[serde(default)]
    pub transport_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyDiscountRequest {
    pub code: String,
}

/// Payment for a booking on the billing step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// Must equal the booking total.
    pub amount_paid: Money,
}

/// The options offered on the booking's current step. Lists for other
/// steps are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOffers {
    pub transport: Vec<TransportOption>,
    pub accommodations: Vec<Accommodation>,
    pub attractions: Vec<Attraction>,
    pub local_transport: Vec<LocalTransport>,
}

/// A booking as the wizard renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingResponse {
    pub booking_id: i64,
    pub user_id: i64,
    pub step: WizardStep,
    pub step_number: u8,
    pub step_label: String,
    pub booking: Booking,
    pub price: PriceBreakdown,
    /// The total formatted in rupees.
    pub total_display: String,
    pub offers: StepOffers,
}

/// Receipt page data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationResponse {
    pub booking_id: i64,
    pub receipt: Receipt,
    pub route: String,
    pub start_date: String,
    pub end_date: String,
    pub travelers: u32,
    pub price: PriceBreakdown,
    pub amount_display: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MyTripsResponse {
    pub trips: Vec<TripSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengersResponse {
    pub travel_id: i64,
    pub passengers: Vec<PassengerData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightsResponse {
    pub flights: Vec<FlightData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResortsResponse {
    pub resorts: Vec<ResortData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUsersResponse {
    pub users: Vec<UserData>,
    pub total: usize,
}

/// New discount code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDiscountRequest {
    pub code: String,
    /// `percentage` or `fixed`.
    pub discount_type: String,
    /// Percentage points or rupees. Omitted uses the type's default.
    #[serde(default)]
    pub amount: Option<i64>,
    /// `YYYY-MM-DD`; omitted never expires.
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDiscountResponse {
    pub discount: DiscountData,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListDiscountsResponse {
    pub discounts: Vec<DiscountData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelRecordsResponse {
    pub records: Vec<TravelRecord>,
}

/// Dashboard headline numbers and the latest bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub revenue_display: String,
    pub recent_bookings: Vec<RecentBooking>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportsResponse {
    pub stats: DashboardStats,
    pub top_destinations: Vec<DestinationCount>,
    pub monthly: Vec<MonthlyBookings>,
    /// Mean paid amount per booking, zero with no bookings.
    pub average_booking_value: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedResponse {
    pub summary: SeedSummary,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelRecordsCreatedResponse {
    pub summary: SampleTravelSummary,
    pub message: String,
}

/// Whether the admin panel has been set up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminCheckResponse {
    pub has_admin: bool,
    pub admin_count: i64,
}

/// Creates the first superadmin on an empty installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapAdminRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapAdminResponse {
    pub user_id: i64,
    pub message: String,
}
