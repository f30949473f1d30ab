// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use time::Date;
use travelease::Booking;
use travelease_audit::AuditEvent;
use travelease_domain::DiscountKind;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub verified: bool,
    pub created_at: String,
}

impl UserData {
    /// First and last name joined with a space.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Fields for a new user. The password is plain text and hashed on insert.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub verified: bool,
}

/// Partial profile update; `None` leaves a column untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

/// A superadmin grant on a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuperadminData {
    pub superadmin_id: i64,
    pub user_id: i64,
    pub password_hash: String,
    pub created_at: String,
}

/// Session information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub user_id: i64,
    pub role: String,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgencyData {
    pub agency_id: i64,
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleData {
    pub vehicle_id: i64,
    pub name: String,
    pub vehicle_type: String,
}

/// A route between two locations, linked back to the travel that uses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationData {
    pub station_id: i64,
    pub name: String,
    pub from_location: String,
    pub to_location: String,
    pub travel_id: Option<i64>,
}

/// A travel row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelData {
    pub travel_id: i64,
    /// Length in days.
    pub duration: i32,
    pub price: i64,
    /// Departure date, `YYYY-MM-DD`.
    pub date: String,
    /// Human-readable range, `"start to end"`.
    pub dates: String,
    pub agency_id: i64,
    pub station_id: i64,
    pub vehicle_id: i64,
    pub created_at: String,
}

/// Fields for a new travel. `create_travel` clamps the price to at least 1.
#[derive(Debug, Clone)]
pub struct NewTravel {
    pub duration: i32,
    pub price: i64,
    pub date: String,
    pub dates: String,
    pub agency_id: i64,
    pub station_id: i64,
    pub vehicle_id: i64,
}

/// Optional filters for `list_travels`. Locations match case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct TravelFilter {
    pub from_location: Option<String>,
    pub to_location: Option<String>,
    pub date: Option<String>,
    pub agency_id: Option<i64>,
}

/// A travel joined with its agency, station and vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelDetails {
    pub travel: TravelData,
    pub agency: AgencyData,
    pub station: StationData,
    pub vehicle: VehicleData,
}

/// A passenger row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerData {
    pub passenger_id: i64,
    pub user_id: i64,
    pub travel_id: i64,
    pub passengers_no: i32,
    pub flight_id: Option<i64>,
    pub resort_id: Option<i64>,
    pub vehicle_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct NewPassenger {
    pub user_id: i64,
    pub travel_id: i64,
    pub passengers_no: i32,
    pub flight_id: Option<i64>,
    pub resort_id: Option<i64>,
    pub vehicle_id: Option<i64>,
}

/// Partial passenger update; `None` leaves a column untouched.
#[derive(Debug, Clone, Default)]
pub struct PassengerUpdate {
    pub passengers_no: Option<i32>,
    pub flight_id: Option<i64>,
    pub resort_id: Option<i64>,
    pub vehicle_id: Option<i64>,
}

impl PassengerUpdate {
    /// True when no column would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.passengers_no.is_none()
            && self.flight_id.is_none()
            && self.resort_id.is_none()
            && self.vehicle_id.is_none()
    }
}

/// A passenger with the user it belongs to, for the admin travel view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerRecord {
    pub passenger: PassengerData,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// A travel with its passengers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelRecord {
    pub details: TravelDetails,
    pub passengers: Vec<PassengerRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightData {
    pub flight_id: i64,
    pub name: String,
    pub price: i64,
    pub from_location: String,
    pub to_location: String,
    pub date: String,
    pub departure_time: String,
    pub arrival_time: String,
}

/// Fields for a new flight. Missing times default to `10:00:00` and
/// `14:00:00`.
#[derive(Debug, Clone)]
pub struct NewFlight {
    pub name: String,
    pub price: i64,
    pub from_location: String,
    pub to_location: String,
    pub date: String,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResortData {
    pub resort_id: i64,
    pub name: String,
    pub price: i64,
    pub address: String,
}

#[derive(Debug, Clone)]
pub struct NewResort {
    pub name: String,
    pub price: i64,
    pub address: String,
}

/// A discount code row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountData {
    pub discount_id: i64,
    pub code: String,
    pub discount_type: String,
    pub amount: Option<i64>,
    pub expiry_date: Option<String>,
    pub is_active: bool,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct NewDiscount {
    pub code: String,
    pub discount_type: DiscountKind,
    pub amount: Option<i64>,
    pub expiry_date: Option<Date>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderData {
    pub order_id: i64,
    pub total_price: i64,
    pub status: String,
    pub passenger_id: i64,
    pub discount_id: Option<i64>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingData {
    pub billing_id: i64,
    pub amount_paid: i64,
    pub is_paid: bool,
    pub order_id: i64,
    pub user_id: i64,
    pub created_at: String,
}

/// Payment details persisted by `complete_booking`.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_id: i64,
    pub travel_id: i64,
    pub total_price: i64,
    pub amount_paid: i64,
    pub discount_id: Option<i64>,
}

/// Identifiers produced by `complete_booking`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedBooking {
    pub passenger_id: i64,
    pub order_id: i64,
    pub billing_id: i64,
}

/// A persisted audit event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpData {
    pub op_id: i64,
    pub user_id: Option<i64>,
    pub code: String,
    pub event: AuditEvent,
    pub created_at: String,
}

/// An in-progress wizard booking owned by a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    pub draft_id: i64,
    pub user_id: i64,
    /// Label of the step the booking was saved at.
    pub step: String,
    pub booking: Booking,
    pub created_at: String,
    pub updated_at: String,
}

/// One of a user's trips, with its order when the trip was paid for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripSummary {
    pub travel_id: i64,
    pub passenger_id: i64,
    pub from_location: String,
    pub to_location: String,
    pub date: String,
    pub dates: String,
    pub duration: i32,
    pub passengers_no: i32,
    pub order_id: Option<i64>,
    pub order_status: Option<String>,
    pub total_price: Option<i64>,
}

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_bookings: i64,
    pub total_users: i64,
    pub active_discounts: i64,
    pub total_revenue: i64,
}

/// A paid booking as listed on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentBooking {
    pub billing_id: i64,
    pub order_id: i64,
    pub user_id: i64,
    pub customer_name: String,
    pub email: String,
    pub from_location: String,
    pub to_location: String,
    pub travel_date: String,
    pub amount_paid: i64,
    pub status: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationCount {
    pub destination: String,
    pub bookings: i64,
}

/// Paid bookings and revenue for one `YYYY-MM` month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBookings {
    pub month: String,
    pub bookings: i64,
    pub revenue: i64,
}

/// One line of the bookings CSV export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingExportRow {
    pub billing_id: i64,
    pub order_id: i64,
    pub customer_name: String,
    pub email: String,
    pub from_location: String,
    pub to_location: String,
    pub travel_date: String,
    pub travelers: i32,
    pub total_price: i64,
    pub amount_paid: i64,
    pub discount_code: Option<String>,
    pub status: String,
    pub booked_at: String,
}

/// Rows inserted by `seed_sample_data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeedSummary {
    pub users_created: usize,
    pub agencies_created: usize,
    pub stations_created: usize,
}

/// Rows inserted by `add_sample_travel_records`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SampleTravelSummary {
    pub travel_ids: Vec<i64>,
    pub passengers_created: usize,
}
