// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for TravelEase.
//!
//! Users, travels, bookings, discounts and the operation log live in a
//! single `SQLite` database accessed through Diesel. The schema is created
//! by embedded migrations when a connection is opened.
//!
//! ## Layout
//!
//! - `backend` opens connections and runs migrations
//! - `queries` holds read-only lookups
//! - `mutations` holds writes; multi-table writes are transactional
//! - `Persistence` is the adapter the API layer talks to
//!
//! ## Testing
//!
//! `Persistence::new_in_memory()` gives every caller its own shared-cache
//! in-memory database, so tests never see each other's rows.

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
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::Date;
use travelease::Booking;
use travelease_audit::AuditEvent;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{
    AgencyData, BillingData, BookingDraft, BookingExportRow, CompletedBooking, DashboardStats,
    DestinationCount, DiscountData, FlightData, MonthlyBookings, NewBooking, NewDiscount,
    NewFlight, NewPassenger, NewResort, NewTravel, NewUser, OpData, OrderData, PassengerData,
    PassengerRecord, PassengerUpdate, ProfileUpdate, RecentBooking, ResortData,
    SampleTravelSummary, SeedSummary, SessionData, StationData, SuperadminData, TravelData,
    TravelDetails, TravelFilter, TravelRecord, TripSummary, UserData, VehicleData,
};
pub use error::PersistenceError;
pub use mutations::bookings::ORDER_STATUS_COMPLETED;
pub use mutations::catalog::{
    DEFAULT_AGENCY_ADDRESS, DEFAULT_AGENCY_NAME, DEFAULT_VEHICLE_NAME, DEFAULT_VEHICLE_TYPE,
};

use backend::PersistenceBackend;

/// Atomic counter for unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a persistence adapter over a fresh in-memory database.
    ///
    /// Each call gets its own shared-cache database named from an atomic
    /// counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String =
            format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a persistence adapter over a database file, creating it if
    /// needed.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Users & Superadmins
    // ========================================================================

    /// Creates a user with a bcrypt-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::DuplicateUser` if the username or email is
    /// taken.
    pub fn create_user(&mut self, user: &NewUser) -> Result<i64, PersistenceError> {
        mutations::users::create_user(&mut self.conn, user)
    }

    /// Retrieves a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_id(&mut self, user_id: i64) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_id(&mut self.conn, user_id)
    }

    /// Retrieves a user by email, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_email(&mut self, email: &str) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_email(&mut self.conn, email)
    }

    /// Retrieves a user by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_username(
        &mut self,
        username: &str,
    ) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_username(&mut self.conn, username)
    }

    /// Applies a partial profile update.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or the update fails.
    pub fn update_user_profile(
        &mut self,
        user_id: i64,
        update: &ProfileUpdate,
    ) -> Result<(), PersistenceError> {
        mutations::users::update_user_profile(&mut self.conn, user_id, update)
    }

    /// Lists users, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_users(&mut self) -> Result<Vec<UserData>, PersistenceError> {
        queries::users::list_users(&mut self.conn)
    }

    /// Lists users matching a free-text search.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn search_users(&mut self, term: &str) -> Result<Vec<UserData>, PersistenceError> {
        queries::users::search_users(&mut self.conn, term)
    }

    /// Counts registered users.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_users(&mut self) -> Result<i64, PersistenceError> {
        queries::users::count_users(&mut self.conn)
    }

    /// Checks a plain-text password against a bcrypt hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the hash is malformed.
    pub fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, PersistenceError> {
        bcrypt::verify(password, password_hash)
            .map_err(|e| PersistenceError::Other(format!("Failed to verify password: {e}")))
    }

    /// Grants superadmin rights to a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the user is missing or already a superadmin.
    pub fn create_superadmin(
        &mut self,
        user_id: i64,
        password: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::users::create_superadmin(&mut self.conn, user_id, password)
    }

    /// Retrieves the superadmin grant for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_superadmin_by_user_id(
        &mut self,
        user_id: i64,
    ) -> Result<Option<SuperadminData>, PersistenceError> {
        queries::users::get_superadmin_by_user_id(&mut self.conn, user_id)
    }

    /// Counts superadmins.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_superadmins(&mut self) -> Result<i64, PersistenceError> {
        queries::users::count_superadmins(&mut self.conn)
    }

    // ========================================================================
    // Sessions
    // ========================================================================

    /// Creates a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be created.
    pub fn create_session(
        &mut self,
        session_token: &str,
        user_id: i64,
        role: &str,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::sessions::create_session(
            &mut self.conn,
            session_token,
            user_id,
            role,
            expires_at,
        )
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::sessions::get_session_by_token(&mut self.conn, session_token)
    }

    /// Touches a session's last activity timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub fn update_session_activity(&mut self, session_id: i64) -> Result<(), PersistenceError> {
        mutations::sessions::update_session_activity(&mut self.conn, session_id)
    }

    /// Deletes a session by token.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::SessionNotFound` if no session has the token.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::sessions::delete_session(&mut self.conn, session_token)
    }

    /// Deletes sessions that expired before `now` (ISO 8601, UTC).
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_expired_sessions(&mut self, now: &str) -> Result<usize, PersistenceError> {
        mutations::sessions::delete_expired_sessions(&mut self.conn, now)
    }

    // ========================================================================
    // Agencies, Vehicles & Stations
    // ========================================================================

    /// Creates an agency.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken or the insert fails.
    pub fn create_agency(&mut self, name: &str, address: &str) -> Result<i64, PersistenceError> {
        mutations::catalog::create_agency(&mut self.conn, name, address)
    }

    /// Lists agencies.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_agencies(&mut self) -> Result<Vec<AgencyData>, PersistenceError> {
        queries::catalog::list_agencies(&mut self.conn)
    }

    /// Returns the default agency, creating it on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub fn get_or_create_default_agency(&mut self) -> Result<AgencyData, PersistenceError> {
        mutations::catalog::get_or_create_default_agency(&mut self.conn)
    }

    /// Creates a vehicle.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_vehicle(
        &mut self,
        name: &str,
        vehicle_type: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::catalog::create_vehicle(&mut self.conn, name, vehicle_type)
    }

    /// Lists vehicles.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_vehicles(&mut self) -> Result<Vec<VehicleData>, PersistenceError> {
        queries::catalog::list_vehicles(&mut self.conn)
    }

    /// Returns the default vehicle, creating it on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub fn get_or_create_default_vehicle(&mut self) -> Result<VehicleData, PersistenceError> {
        mutations::catalog::get_or_create_default_vehicle(&mut self.conn)
    }

    /// Creates a station.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_station(
        &mut self,
        name: &str,
        from_location: &str,
        to_location: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::catalog::create_station(&mut self.conn, name, from_location, to_location)
    }

    /// Lists stations.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_stations(&mut self) -> Result<Vec<StationData>, PersistenceError> {
        queries::catalog::list_stations(&mut self.conn)
    }

    /// Retrieves a station by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_station_by_id(
        &mut self,
        station_id: i64,
    ) -> Result<Option<StationData>, PersistenceError> {
        queries::catalog::get_station_by_id(&mut self.conn, station_id)
    }

    // ========================================================================
    // Travels
    // ========================================================================

    /// Creates a travel and back-links its station.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced row is missing or a write fails.
    pub fn create_travel(&mut self, travel: &NewTravel) -> Result<i64, PersistenceError> {
        mutations::travels::create_travel(&mut self.conn, travel)
    }

    /// Retrieves a travel joined with its agency, station and vehicle.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_travel_by_id(
        &mut self,
        travel_id: i64,
    ) -> Result<Option<TravelDetails>, PersistenceError> {
        queries::travels::get_travel_by_id(&mut self.conn, travel_id)
    }

    /// Lists travels matching a filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_travels(
        &mut self,
        filter: &TravelFilter,
    ) -> Result<Vec<TravelDetails>, PersistenceError> {
        queries::travels::list_travels(&mut self.conn, filter)
    }

    /// Lists every travel with its passengers.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_travel_records(&mut self) -> Result<Vec<TravelRecord>, PersistenceError> {
        queries::travels::list_travel_records(&mut self.conn)
    }

    /// Lists travel records matching a free-text search.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn search_travel_records(
        &mut self,
        term: &str,
    ) -> Result<Vec<TravelRecord>, PersistenceError> {
        queries::travels::search_travel_records(&mut self.conn, term)
    }

    // ========================================================================
    // Flights & Resorts
    // ========================================================================

    /// Creates a flight.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_flight(&mut self, flight: &NewFlight) -> Result<i64, PersistenceError> {
        mutations::inventory::create_flight(&mut self.conn, flight)
    }

    /// Retrieves a flight by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_flight_by_id(
        &mut self,
        flight_id: i64,
    ) -> Result<Option<FlightData>, PersistenceError> {
        queries::inventory::get_flight_by_id(&mut self.conn, flight_id)
    }

    /// Lists flights on an exact route.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_flights_by_route(
        &mut self,
        from: &str,
        to: &str,
    ) -> Result<Vec<FlightData>, PersistenceError> {
        queries::inventory::get_flights_by_route(&mut self.conn, from, to)
    }

    /// Creates a resort.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_resort(&mut self, resort: &NewResort) -> Result<i64, PersistenceError> {
        mutations::inventory::create_resort(&mut self.conn, resort)
    }

    /// Lists resorts whose address contains `location`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_resorts_by_location(
        &mut self,
        location: &str,
    ) -> Result<Vec<ResortData>, PersistenceError> {
        queries::inventory::get_resorts_by_location(&mut self.conn, location)
    }

    // ========================================================================
    // Passengers
    // ========================================================================

    /// Creates a passenger row.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced row is missing or the insert fails.
    pub fn create_passenger(&mut self, passenger: &NewPassenger) -> Result<i64, PersistenceError> {
        mutations::passengers::create_passenger(&mut self.conn, passenger)
    }

    /// Retrieves a passenger by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_passenger_by_id(
        &mut self,
        passenger_id: i64,
    ) -> Result<Option<PassengerData>, PersistenceError> {
        queries::passengers::get_passenger_by_id(&mut self.conn, passenger_id)
    }

    /// Applies a partial update to a passenger row.
    ///
    /// # Errors
    ///
    /// Returns an error if the passenger does not exist or the update fails.
    pub fn update_passenger(
        &mut self,
        passenger_id: i64,
        update: &PassengerUpdate,
    ) -> Result<(), PersistenceError> {
        mutations::passengers::update_passenger(&mut self.conn, passenger_id, update)
    }

    /// Sets the flight on every passenger row of a travel.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn assign_travel_flight(
        &mut self,
        travel_id: i64,
        flight_id: i64,
    ) -> Result<usize, PersistenceError> {
        mutations::passengers::assign_travel_flight(&mut self.conn, travel_id, flight_id)
    }

    /// Sets or clears the resort on every passenger row of a travel.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn assign_travel_resort(
        &mut self,
        travel_id: i64,
        resort_id: Option<i64>,
    ) -> Result<usize, PersistenceError> {
        mutations::passengers::assign_travel_resort(&mut self.conn, travel_id, resort_id)
    }

    /// Sets or clears the local vehicle on every passenger row of a travel.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn assign_travel_vehicle(
        &mut self,
        travel_id: i64,
        vehicle_id: Option<i64>,
    ) -> Result<usize, PersistenceError> {
        mutations::passengers::assign_travel_vehicle(&mut self.conn, travel_id, vehicle_id)
    }

    /// Removes a user's unpaid passenger rows from a travel.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query or delete fails.
    pub fn release_unpaid_passengers(
        &mut self,
        travel_id: i64,
        user_id: i64,
    ) -> Result<usize, PersistenceError> {
        mutations::passengers::release_unpaid_passengers(&mut self.conn, travel_id, user_id)
    }

    /// Lists the passenger rows of a travel.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_passengers_by_travel_id(
        &mut self,
        travel_id: i64,
    ) -> Result<Vec<PassengerData>, PersistenceError> {
        queries::passengers::get_passengers_by_travel_id(&mut self.conn, travel_id)
    }

    /// Lists a user's trips, latest departure first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_trips_for_user(
        &mut self,
        user_id: i64,
    ) -> Result<Vec<TripSummary>, PersistenceError> {
        queries::passengers::list_trips_for_user(&mut self.conn, user_id)
    }

    // ========================================================================
    // Discounts
    // ========================================================================

    /// Creates a discount with an uppercased code.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::DuplicateDiscountCode` if the code exists.
    pub fn create_discount(&mut self, discount: &NewDiscount) -> Result<i64, PersistenceError> {
        mutations::discounts::create_discount(&mut self.conn, discount)
    }

    /// Lists discounts, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_discounts(&mut self) -> Result<Vec<DiscountData>, PersistenceError> {
        queries::discounts::list_discounts(&mut self.conn)
    }

    /// Deletes a discount.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the discount does not exist.
    pub fn delete_discount(&mut self, discount_id: i64) -> Result<(), PersistenceError> {
        mutations::discounts::delete_discount(&mut self.conn, discount_id)
    }

    /// Retrieves a discount by code, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_discount_by_code(
        &mut self,
        code: &str,
    ) -> Result<Option<DiscountData>, PersistenceError> {
        queries::discounts::get_discount_by_code(&mut self.conn, code)
    }

    /// Counts discounts, optionally only the active ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_discounts(&mut self, active_only: bool) -> Result<i64, PersistenceError> {
        queries::discounts::count_discounts(&mut self.conn, active_only)
    }

    // ========================================================================
    // Orders & Billings
    // ========================================================================

    /// Records a paid booking: lead passenger, order and billing in one
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced row is missing or a write fails.
    pub fn complete_booking(
        &mut self,
        booking: &NewBooking,
    ) -> Result<CompletedBooking, PersistenceError> {
        mutations::bookings::complete_booking(&mut self.conn, booking)
    }

    /// Retrieves an order by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_order_by_id(
        &mut self,
        order_id: i64,
    ) -> Result<Option<OrderData>, PersistenceError> {
        queries::orders::get_order_by_id(&mut self.conn, order_id)
    }

    /// Lists a user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_orders_by_user_id(
        &mut self,
        user_id: i64,
    ) -> Result<Vec<OrderData>, PersistenceError> {
        queries::orders::get_orders_by_user_id(&mut self.conn, user_id)
    }

    /// Lists a user's billings, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_billings_by_user_id(
        &mut self,
        user_id: i64,
    ) -> Result<Vec<BillingData>, PersistenceError> {
        queries::orders::get_billings_by_user_id(&mut self.conn, user_id)
    }

    /// Sets an order's status.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the order does not exist.
    pub fn update_order_status(
        &mut self,
        order_id: i64,
        status: &str,
    ) -> Result<(), PersistenceError> {
        mutations::bookings::update_order_status(&mut self.conn, order_id, status)
    }

    /// Attaches a discount to an order and sets its new total.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the order does not exist.
    pub fn apply_discount_to_order(
        &mut self,
        order_id: i64,
        discount_id: i64,
        total_price: i64,
    ) -> Result<(), PersistenceError> {
        mutations::bookings::apply_discount_to_order(
            &mut self.conn,
            order_id,
            discount_id,
            total_price,
        )
    }

    // ========================================================================
    // Operation Log
    // ========================================================================

    /// Appends an audit event to the operation log.
    ///
    /// # Errors
    ///
    /// Returns an error if the event cannot be serialized or inserted.
    pub fn record_op(
        &mut self,
        event: &AuditEvent,
        user_id: Option<i64>,
    ) -> Result<i64, PersistenceError> {
        mutations::ops::record_op(&mut self.conn, event, user_id)
    }

    /// Lists the operations recorded against a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or an event cannot be decoded.
    pub fn get_ops_by_user_id(&mut self, user_id: i64) -> Result<Vec<OpData>, PersistenceError> {
        queries::ops::get_ops_by_user_id(&mut self.conn, user_id)
    }

    /// Counts every recorded operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_ops(&mut self) -> Result<i64, PersistenceError> {
        queries::ops::count_ops(&mut self.conn)
    }

    // ========================================================================
    // Booking Drafts
    // ========================================================================

    /// Stores a new wizard booking for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking cannot be serialized or inserted.
    pub fn create_booking_draft(
        &mut self,
        user_id: i64,
        booking: &Booking,
    ) -> Result<i64, PersistenceError> {
        mutations::drafts::create_booking_draft(&mut self.conn, user_id, booking)
    }

    /// Retrieves a booking draft.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the booking cannot be decoded.
    pub fn get_booking_draft(
        &mut self,
        draft_id: i64,
    ) -> Result<Option<BookingDraft>, PersistenceError> {
        queries::drafts::get_booking_draft(&mut self.conn, draft_id)
    }

    /// Lists a user's drafts, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a booking cannot be decoded.
    pub fn list_booking_drafts_for_user(
        &mut self,
        user_id: i64,
    ) -> Result<Vec<BookingDraft>, PersistenceError> {
        queries::drafts::list_booking_drafts_for_user(&mut self.conn, user_id)
    }

    /// Replaces the booking stored in a draft.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the draft does not exist.
    pub fn update_booking_draft(
        &mut self,
        draft_id: i64,
        booking: &Booking,
    ) -> Result<(), PersistenceError> {
        mutations::drafts::update_booking_draft(&mut self.conn, draft_id, booking)
    }

    /// Deletes a booking draft.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the draft does not exist.
    pub fn delete_booking_draft(&mut self, draft_id: i64) -> Result<(), PersistenceError> {
        mutations::drafts::delete_booking_draft(&mut self.conn, draft_id)
    }

    // ========================================================================
    // Reports
    // ========================================================================

    /// Computes the dashboard headline numbers.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub fn dashboard_stats(&mut self) -> Result<DashboardStats, PersistenceError> {
        queries::reports::dashboard_stats(&mut self.conn)
    }

    /// Lists the most recent bookings, optionally filtered by a search term.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub fn recent_bookings(
        &mut self,
        limit: usize,
        search: Option<&str>,
    ) -> Result<Vec<RecentBooking>, PersistenceError> {
        queries::reports::recent_bookings(&mut self.conn, limit, search)
    }

    /// Ranks destinations by number of orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn top_destinations(
        &mut self,
        limit: usize,
    ) -> Result<Vec<DestinationCount>, PersistenceError> {
        queries::reports::top_destinations(&mut self.conn, limit)
    }

    /// Buckets bookings and revenue by month.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn bookings_by_month(&mut self) -> Result<Vec<MonthlyBookings>, PersistenceError> {
        queries::reports::bookings_by_month(&mut self.conn)
    }

    /// Every booking, shaped for CSV export.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub fn booking_export_rows(&mut self) -> Result<Vec<BookingExportRow>, PersistenceError> {
        queries::reports::booking_export_rows(&mut self.conn)
    }

    // ========================================================================
    // Sample Data
    // ========================================================================

    /// Inserts sample users, agencies and stations, skipping existing rows.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub fn seed_sample_data(&mut self) -> Result<SeedSummary, PersistenceError> {
        mutations::seed::seed_sample_data(&mut self.conn)
    }

    /// Adds five weekly sample travels starting a week after `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub fn add_sample_travel_records(
        &mut self,
        today: Date,
    ) -> Result<SampleTravelSummary, PersistenceError> {
        mutations::seed::add_sample_travel_records(&mut self.conn, today)
    }
}
