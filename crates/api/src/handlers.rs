// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for accounts, the booking wizard, lookups and the
//! admin panel.
//!
//! Handlers are synchronous functions over a `Persistence`. They validate
//! input, enforce authorization, run wizard transitions through the core
//! crate and record every state change in the operation log.

use time::{Date, OffsetDateTime};
use tracing::{debug, info, warn};
use travelease::{
    Booking, Command, CoreError, Receipt, TransitionResult, WizardStep, apply, validate_checkout,
};
use travelease_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use travelease_domain::{
    Accommodation, AppliedDiscount, Attraction, DiscountCode, DiscountKind, Email, LocalTransport,
    Location, Money, PriceBreakdown, TransportOption, TripDetails, accommodation_options,
    attraction_options, find_accommodation, find_attraction, find_local_transport,
    find_transport_option, format_inr, format_iso_date, local_transport_options, parse_iso_date,
    transport_options, trip_days, validate_amount, validate_name, validate_trip_details,
};
use travelease_persistence::{
    BookingDraft, BookingExportRow, CompletedBooking, DashboardStats, DiscountData, NewBooking,
    NewDiscount, NewFlight, NewPassenger, NewResort, NewTravel, NewUser, PassengerData,
    Persistence, SampleTravelSummary, SeedSummary, SessionData, UserData,
};

use crate::auth::{
    AuthenticatedActor, AuthenticationService, AuthorizationService, Role, SessionPolicy,
};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::password_policy::PasswordPolicy;
use crate::csv_export::bookings_to_csv;
use crate::request_response::{
    AdminCheckResponse, AdminLoginRequest, ApplyDiscountRequest, BookingResponse,
    BootstrapAdminRequest, BootstrapAdminResponse, CheckoutRequest, ConfirmationResponse,
    CreateDiscountRequest, CreateDiscountResponse, DashboardResponse, FlightsResponse,
    ListDiscountsResponse, ListUsersResponse, LoginRequest, LoginResponse, MyTripsResponse,
    PassengersResponse, ReportsResponse, ResortsResponse, SeedResponse,
    SelectAccommodationRequest, SelectLocalTransportRequest, SelectTransportationRequest,
    SignupRequest, StartBookingRequest, StepOffers, ToggleAttractionRequest,
    TravelRecordsCreatedResponse, TravelRecordsResponse,
};

/// Price stored on the travel row a wizard trip creates. What the traveler
/// pays comes from the booking's selections.
const WIZARD_TRAVEL_PRICE: Money = 50_000;

/// Bookings shown on the admin dashboard.
const RECENT_BOOKINGS_LIMIT: usize = 10;

/// Destinations ranked on the reports page.
const TOP_DESTINATIONS_LIMIT: usize = 5;

// ============================================================================
// Accounts
// ============================================================================

/// Registers a traveler and signs them in.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `sessions` - Session lifetimes
/// * `request` - The signup form
///
/// # Errors
///
/// Returns an error if:
/// - The email, username or names are invalid
/// - The password breaks the password policy
/// - An account already uses the email or username
pub fn signup(
    persistence: &mut Persistence,
    sessions: &SessionPolicy,
    request: &SignupRequest,
) -> Result<LoginResponse, ApiError> {
    let email: Email = Email::parse(&request.email).map_err(translate_domain_error)?;
    validate_name("Username", &request.username).map_err(translate_domain_error)?;
    validate_name("First name", &request.first_name).map_err(translate_domain_error)?;
    validate_name("Last name", &request.last_name).map_err(translate_domain_error)?;

    PasswordPolicy::default().validate(
        &request.password,
        &request.password_confirmation,
        &request.username,
        email.value(),
    )?;

    ensure_account_available(persistence, request.username.trim(), email.value())?;

    let new_user: NewUser = NewUser {
        username: request.username.trim().to_string(),
        email: email.value().to_string(),
        password: request.password.clone(),
        first_name: request.first_name.trim().to_string(),
        last_name: request.last_name.trim().to_string(),
        city: request.city.clone(),
        country: request.country.clone(),
        verified: false,
    };

    let (session_token, _actor, user): (String, AuthenticatedActor, UserData) =
        AuthenticationService::signup(persistence, sessions, &new_user)?;
    login_response(persistence, session_token, &user, Role::Traveler)
}

/// Signs a traveler in by email and password.
///
/// # Errors
///
/// Returns `ApiError::AuthenticationFailed` for unknown emails and wrong
/// passwords alike.
pub fn login(
    persistence: &mut Persistence,
    sessions: &SessionPolicy,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let email: Email = Email::parse(&request.email).map_err(translate_domain_error)?;
    let (session_token, _actor, user): (String, AuthenticatedActor, UserData) =
        AuthenticationService::login(persistence, sessions, email.value(), &request.password)?;
    login_response(persistence, session_token, &user, Role::Traveler)
}

/// Signs a superadmin into the admin panel.
///
/// # Errors
///
/// Returns `ApiError::AuthenticationFailed` if the user is not a superadmin
/// or the password is wrong.
pub fn admin_login(
    persistence: &mut Persistence,
    sessions: &SessionPolicy,
    request: &AdminLoginRequest,
) -> Result<LoginResponse, ApiError> {
    let (session_token, _actor, user): (String, AuthenticatedActor, UserData) =
        AuthenticationService::admin_login(
            persistence,
            sessions,
            request.user_id,
            &request.password,
        )?;
    login_response(persistence, session_token, &user, Role::Admin)
}

/// Ends a session.
///
/// # Errors
///
/// Returns `ApiError::AuthenticationFailed` if the token names no session.
pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    info!("Session closed");
    Ok(())
}

fn ensure_account_available(
    persistence: &mut Persistence,
    username: &str,
    email: &str,
) -> Result<(), ApiError> {
    let email_taken: bool = persistence
        .get_user_by_email(email)
        .map_err(translate_persistence_error)?
        .is_some();
    let username_taken: bool = persistence
        .get_user_by_username(username)
        .map_err(translate_persistence_error)?
        .is_some();

    if email_taken || username_taken {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("unique_user"),
            message: String::from("An account with this email or username already exists"),
        });
    }
    Ok(())
}

fn login_response(
    persistence: &mut Persistence,
    session_token: String,
    user: &UserData,
    role: Role,
) -> Result<LoginResponse, ApiError> {
    let session: SessionData = persistence
        .get_session_by_token(&session_token)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Session missing right after it was opened"),
        })?;

    Ok(LoginResponse {
        session_token,
        user_id: user.user_id,
        username: user.username.clone(),
        display_name: format!("{} {}", user.first_name, user.last_name),
        role: role.as_str().to_string(),
        expires_at: session.expires_at,
    })
}

// ============================================================================
// Booking wizard
// ============================================================================

/// Enters trip details and moves the booking to transportation.
///
/// A travel record and the traveler's passenger row are created for the
/// trip. Without `booking_id` a new booking is opened; with it, a booking
/// that was sent back to the first step is reused. Resubmitting the same
/// trip keeps its travel; a different trip releases the old passenger row.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - Origin, destination, dates and travelers
/// * `actor` - The authenticated actor
/// * `cause` - The cause recorded in the audit event
///
/// # Errors
///
/// Returns an error if:
/// - The locations, dates or traveler count are invalid
/// - The reused booking is missing, foreign, or past the first step
pub fn start_booking(
    persistence: &mut Persistence,
    request: &StartBookingRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<BookingResponse, ApiError> {
    let trip: TripDetails = parse_trip(request)?;
    validate_trip_details(&trip).map_err(translate_domain_error)?;

    let draft: BookingDraft = match request.booking_id {
        Some(booking_id) => load_draft(persistence, booking_id, actor)?,
        None => {
            let draft_id: i64 = persistence
                .create_booking_draft(actor.user_id, &Booking::new())
                .map_err(translate_persistence_error)?;
            load_draft(persistence, draft_id, actor)?
        }
    };

    if draft.booking.step != WizardStep::TripDetails {
        return Err(translate_core_error(CoreError::InvalidStep {
            command: String::from("StartTrip"),
            step: draft.booking.step,
        }));
    }

    // An unchanged trip keeps its travel and the selections stored on it.
    let travel_id: i64 = match draft.booking.travel_id {
        Some(travel_id) if draft.booking.trip.as_ref() == Some(&trip) => travel_id,
        previous => {
            if let Some(abandoned) = previous {
                persistence
                    .release_unpaid_passengers(abandoned, draft.user_id)
                    .map_err(translate_persistence_error)?;
            }
            record_trip(persistence, &trip, draft.user_id)?
        }
    };
    let booking: Booking = commit(
        persistence,
        &draft,
        Command::StartTrip { trip, travel_id },
        actor,
        cause,
    )?;

    info!(
        booking_id = draft.draft_id,
        user_id = draft.user_id,
        travel_id,
        "Booking started"
    );
    Ok(booking_response(draft.draft_id, draft.user_id, booking))
}

/// Returns a booking with the options for its current step.
///
/// # Errors
///
/// Returns an error if the booking does not exist or belongs to another
/// traveler.
pub fn get_booking(
    persistence: &mut Persistence,
    booking_id: i64,
    actor: &AuthenticatedActor,
) -> Result<BookingResponse, ApiError> {
    let draft: BookingDraft = load_draft(persistence, booking_id, actor)?;
    Ok(booking_response(draft.draft_id, draft.user_id, draft.booking))
}

/// Chooses the outbound and return legs.
///
/// With `skip_accommodation` the booking goes straight to attractions and
/// any stay chosen earlier is detached from the passenger rows.
/// Both legs are stored as flight rows and the outbound flight is attached
/// to the trip's passenger rows.
///
/// # Errors
///
/// Returns an error if an option id is unknown, a leg does not fit the
/// trip, or the booking is not on the transportation step.
pub fn select_transportation(
    persistence: &mut Persistence,
    booking_id: i64,
    request: &SelectTransportationRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<BookingResponse, ApiError> {
    let draft: BookingDraft = load_draft(persistence, booking_id, actor)?;
    let trip: &TripDetails = require_trip(&draft.booking)?;
    let outbound: TransportOption = find_transport_option(trip, &request.outbound_id)
        .ok_or_else(|| unknown_option("outbound_id", &request.outbound_id))?;
    let return_leg: TransportOption = find_transport_option(trip, &request.return_id)
        .ok_or_else(|| unknown_option("return_id", &request.return_id))?;

    let command: Command = if request.skip_accommodation {
        Command::SkipToAttractions {
            outbound,
            return_leg,
        }
    } else {
        Command::SelectTransportation {
            outbound,
            return_leg,
        }
    };
    let booking: Booking = commit(persistence, &draft, command, actor, cause)?;

    let travel_id: i64 = require_travel_id(&booking)?;
    let mut flight_ids: Vec<i64> = Vec::with_capacity(2);
    for leg in booking.outbound.iter().chain(booking.return_leg.iter()) {
        let flight_id: i64 = persistence
            .create_flight(&NewFlight {
                name: leg.company.clone(),
                price: leg.price,
                from_location: leg.from.clone(),
                to_location: leg.to.clone(),
                date: format_iso_date(leg.date),
                departure_time: Some(leg.departure_time.clone()),
                arrival_time: Some(leg.arrival_time.clone()),
            })
            .map_err(translate_persistence_error)?;
        flight_ids.push(flight_id);
    }
    if let Some(outbound_flight_id) = flight_ids.first() {
        persistence
            .assign_travel_flight(travel_id, *outbound_flight_id)
            .map_err(translate_persistence_error)?;
    }
    if request.skip_accommodation {
        persistence
            .assign_travel_resort(travel_id, None)
            .map_err(translate_persistence_error)?;
    }

    Ok(booking_response(draft.draft_id, draft.user_id, booking))
}

/// Chooses a stay. The hotel is stored as a resort and attached to the
/// trip's passenger rows.
///
/// # Errors
///
/// Returns an error if the hotel is not offered at the destination or the
/// booking is not on the accommodation step.
pub fn select_accommodation(
    persistence: &mut Persistence,
    booking_id: i64,
    request: &SelectAccommodationRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<BookingResponse, ApiError> {
    let draft: BookingDraft = load_draft(persistence, booking_id, actor)?;
    let destination: String = require_trip(&draft.booking)?.destination.name().to_string();
    let accommodation: Accommodation =
        find_accommodation(&destination, &request.accommodation_id)
            .ok_or_else(|| unknown_option("accommodation_id", &request.accommodation_id))?;

    let booking: Booking = commit(
        persistence,
        &draft,
        Command::SelectAccommodation { accommodation },
        actor,
        cause,
    )?;

    let travel_id: i64 = require_travel_id(&booking)?;
    if let Some(stay) = booking.accommodation.as_ref() {
        let resort_id: i64 = persistence
            .create_resort(&NewResort {
                name: stay.name.clone(),
                price: stay.price,
                address: destination,
            })
            .map_err(translate_persistence_error)?;
        persistence
            .assign_travel_resort(travel_id, Some(resort_id))
            .map_err(translate_persistence_error)?;
    }

    Ok(booking_response(draft.draft_id, draft.user_id, booking))
}

/// Continues without a stay.
///
/// # Errors
///
/// Returns an error if the booking is not on the accommodation step.
pub fn skip_accommodation(
    persistence: &mut Persistence,
    booking_id: i64,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<BookingResponse, ApiError> {
    let draft: BookingDraft = load_draft(persistence, booking_id, actor)?;
    let booking: Booking = commit(
        persistence,
        &draft,
        Command::SkipAccommodation,
        actor,
        cause,
    )?;

    persistence
        .assign_travel_resort(require_travel_id(&booking)?, None)
        .map_err(translate_persistence_error)?;
    Ok(booking_response(draft.draft_id, draft.user_id, booking))
}

/// Adds an attraction, or removes it if it is already selected.
///
/// # Errors
///
/// Returns an error if the attraction is not offered at the destination
/// or the booking is not on the attractions step.
pub fn toggle_attraction(
    persistence: &mut Persistence,
    booking_id: i64,
    request: &ToggleAttractionRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<BookingResponse, ApiError> {
    let draft: BookingDraft = load_draft(persistence, booking_id, actor)?;
    let destination: &str = require_trip(&draft.booking)?.destination.name();
    let attraction: Attraction = find_attraction(destination, &request.attraction_id)
        .ok_or_else(|| unknown_option("attraction_id", &request.attraction_id))?;

    let booking: Booking = commit(
        persistence,
        &draft,
        Command::ToggleAttraction { attraction },
        actor,
        cause,
    )?;
    Ok(booking_response(draft.draft_id, draft.user_id, booking))
}

/// Finishes picking attractions.
///
/// # Errors
///
/// Returns an error if the booking is not on the attractions step.
pub fn confirm_attractions(
    persistence: &mut Persistence,
    booking_id: i64,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<BookingResponse, ApiError> {
    let draft: BookingDraft = load_draft(persistence, booking_id, actor)?;
    let booking: Booking = commit(
        persistence,
        &draft,
        Command::ConfirmAttractions,
        actor,
        cause,
    )?;
    Ok(booking_response(draft.draft_id, draft.user_id, booking))
}

/// Chooses local transport, or continues without any.
///
/// A chosen service is stored as a vehicle and attached to the trip's
/// passenger rows.
///
/// # Errors
///
/// Returns an error if the service id is unknown or the booking is not on
/// the local transport step.
pub fn select_local_transport(
    persistence: &mut Persistence,
    booking_id: i64,
    request: &SelectLocalTransportRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<BookingResponse, ApiError> {
    let draft: BookingDraft = load_draft(persistence, booking_id, actor)?;
    let transport: Option<LocalTransport> = request
        .transport_id
        .as_deref()
        .map(|transport_id| {
            find_local_transport(transport_id)
                .ok_or_else(|| unknown_option("transport_id", transport_id))
        })
        .transpose()?;

    let booking: Booking = commit(
        persistence,
        &draft,
        Command::SelectLocalTransport { transport },
        actor,
        cause,
    )?;

    let vehicle_id: Option<i64> = booking
        .local_transport
        .as_ref()
        .map(|service| persistence.create_vehicle(&service.name, service.kind.as_str()))
        .transpose()
        .map_err(translate_persistence_error)?;
    persistence
        .assign_travel_vehicle(require_travel_id(&booking)?, vehicle_id)
        .map_err(translate_persistence_error)?;

    Ok(booking_response(draft.draft_id, draft.user_id, booking))
}

/// Redeems a discount code on the billing step.
///
/// The code must exist, be active and not have expired before `today`.
///
/// # Errors
///
/// Returns an error if the code is malformed, unknown, inactive or expired,
/// or the booking is not on the billing step.
pub fn apply_discount(
    persistence: &mut Persistence,
    booking_id: i64,
    request: &ApplyDiscountRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
    today: Date,
) -> Result<BookingResponse, ApiError> {
    let draft: BookingDraft = load_draft(persistence, booking_id, actor)?;
    let code: DiscountCode = DiscountCode::parse(&request.code).map_err(translate_domain_error)?;

    let stored: DiscountData = persistence
        .get_discount_by_code(code.value())
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Discount"),
            message: format!("Discount code {} does not exist", code.value()),
        })?;
    let discount: AppliedDiscount = redeemable_discount(&stored, code, today)?;

    let booking: Booking = commit(
        persistence,
        &draft,
        Command::ApplyDiscount { discount },
        actor,
        cause,
    )?;
    Ok(booking_response(draft.draft_id, draft.user_id, booking))
}

/// Detaches the current discount.
///
/// # Errors
///
/// Returns an error if no discount is applied or the booking is not on
/// the billing step.
pub fn remove_discount(
    persistence: &mut Persistence,
    booking_id: i64,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<BookingResponse, ApiError> {
    let draft: BookingDraft = load_draft(persistence, booking_id, actor)?;
    let booking: Booking = commit(persistence, &draft, Command::RemoveDiscount, actor, cause)?;
    Ok(booking_response(draft.draft_id, draft.user_id, booking))
}

/// Pays for a booking.
///
/// The order and billing rows are written in one transaction before the
/// booking moves to confirmation. `amount_paid` must equal the total.
///
/// # Errors
///
/// Returns an error if:
/// - The booking is not on the billing step or lacks a selection
/// - The applied discount was deleted, deactivated or has expired
/// - The amount does not match the booking total
pub fn checkout(
    persistence: &mut Persistence,
    booking_id: i64,
    request: &CheckoutRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
    today: Date,
) -> Result<ConfirmationResponse, ApiError> {
    let draft: BookingDraft = load_draft(persistence, booking_id, actor)?;
    validate_checkout(&draft.booking).map_err(translate_core_error)?;
    if let Some(applied) = draft.booking.discount.as_ref() {
        recheck_discount(persistence, booking_id, applied, today)?;
    }

    let price: PriceBreakdown = draft.booking.price_breakdown();
    if request.amount_paid != price.total {
        warn!(
            booking_id,
            expected = price.total,
            actual = request.amount_paid,
            "Payment does not match booking total"
        );
        return Err(translate_core_error(CoreError::PaymentMismatch {
            expected: price.total,
            actual: request.amount_paid,
        }));
    }

    let completed: CompletedBooking = persistence
        .complete_booking(&NewBooking {
            user_id: draft.user_id,
            travel_id: require_travel_id(&draft.booking)?,
            total_price: price.total,
            amount_paid: request.amount_paid,
            discount_id: draft.booking.discount.as_ref().map(|d| d.discount_id),
        })
        .map_err(translate_persistence_error)?;

    let receipt: Receipt = Receipt {
        order_id: completed.order_id,
        billing_id: completed.billing_id,
        passenger_id: completed.passenger_id,
        amount_paid: request.amount_paid,
    };
    let booking: Booking = commit(
        persistence,
        &draft,
        Command::Checkout { receipt },
        actor,
        cause,
    )?;

    info!(
        booking_id,
        order_id = completed.order_id,
        amount_paid = request.amount_paid,
        "Booking paid"
    );
    confirmation_response(draft.draft_id, &booking)
}

/// Returns the receipt of a paid booking.
///
/// # Errors
///
/// Returns an error if the booking has not been paid for.
pub fn get_confirmation(
    persistence: &mut Persistence,
    booking_id: i64,
    actor: &AuthenticatedActor,
) -> Result<ConfirmationResponse, ApiError> {
    let draft: BookingDraft = load_draft(persistence, booking_id, actor)?;
    confirmation_response(draft.draft_id, &draft.booking)
}

/// Returns to the previous step.
///
/// # Errors
///
/// Returns an error on the first step or once the booking is paid.
pub fn go_back(
    persistence: &mut Persistence,
    booking_id: i64,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<BookingResponse, ApiError> {
    let draft: BookingDraft = load_draft(persistence, booking_id, actor)?;
    let booking: Booking = commit(persistence, &draft, Command::GoBack, actor, cause)?;
    Ok(booking_response(draft.draft_id, draft.user_id, booking))
}

/// Clears every selection and returns to the first step.
///
/// Unpaid passenger rows of the abandoned trip are removed.
///
/// # Errors
///
/// Returns an error if the booking does not exist or belongs to another
/// traveler.
pub fn reset_booking(
    persistence: &mut Persistence,
    booking_id: i64,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<BookingResponse, ApiError> {
    let draft: BookingDraft = load_draft(persistence, booking_id, actor)?;
    let booking: Booking = commit(persistence, &draft, Command::Reset, actor, cause)?;

    // Paid rows stay attached to their order.
    if let Some(travel_id) = draft.booking.travel_id {
        persistence
            .release_unpaid_passengers(travel_id, draft.user_id)
            .map_err(translate_persistence_error)?;
    }
    Ok(booking_response(draft.draft_id, draft.user_id, booking))
}

fn parse_trip(request: &StartBookingRequest) -> Result<TripDetails, ApiError> {
    let origin: Location =
        Location::new("origin", &request.origin).map_err(translate_domain_error)?;
    let destination: Location =
        Location::new("destination", &request.destination).map_err(translate_domain_error)?;
    let start_date: Date = parse_iso_date(&request.start_date).map_err(translate_domain_error)?;
    let end_date: Date = parse_iso_date(&request.end_date).map_err(translate_domain_error)?;
    Ok(TripDetails::new(
        origin,
        destination,
        start_date,
        end_date,
        request.travelers,
    ))
}

/// Writes the travel record for a trip and the traveler's passenger row.
fn record_trip(
    persistence: &mut Persistence,
    trip: &TripDetails,
    user_id: i64,
) -> Result<i64, ApiError> {
    let agency_id: i64 = persistence
        .get_or_create_default_agency()
        .map_err(translate_persistence_error)?
        .agency_id;
    let vehicle_id: i64 = persistence
        .get_or_create_default_vehicle()
        .map_err(translate_persistence_error)?
        .vehicle_id;
    let station_id: i64 = persistence
        .create_station(
            &trip.route_name(),
            trip.origin.name(),
            trip.destination.name(),
        )
        .map_err(translate_persistence_error)?;

    let duration: i32 =
        i32::try_from(trip_days(trip.start_date, trip.end_date)).map_err(|_| {
            ApiError::InvalidInput {
                field: String::from("end_date"),
                message: String::from("Trip is too long"),
            }
        })?;
    let passengers_no: i32 = i32::try_from(trip.travelers).map_err(|_| ApiError::InvalidInput {
        field: String::from("travelers"),
        message: String::from("Too many travelers"),
    })?;
    let start: String = format_iso_date(trip.start_date);

    let travel_id: i64 = persistence
        .create_travel(&NewTravel {
            duration,
            price: WIZARD_TRAVEL_PRICE,
            dates: format!("{start} to {}", format_iso_date(trip.end_date)),
            date: start,
            agency_id,
            station_id,
            vehicle_id,
        })
        .map_err(translate_persistence_error)?;

    persistence
        .create_passenger(&NewPassenger {
            user_id,
            travel_id,
            passengers_no,
            flight_id: None,
            resort_id: None,
            vehicle_id: None,
        })
        .map_err(translate_persistence_error)?;

    Ok(travel_id)
}

/// Loads a booking and checks the actor may touch it.
fn load_draft(
    persistence: &mut Persistence,
    booking_id: i64,
    actor: &AuthenticatedActor,
) -> Result<BookingDraft, ApiError> {
    let draft: BookingDraft = persistence
        .get_booking_draft(booking_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Booking"),
            message: format!("Booking {booking_id} does not exist"),
        })?;
    AuthorizationService::authorize_booking_access(actor, draft.user_id)?;
    Ok(draft)
}

/// Runs a wizard command, logs the audit event and stores the new booking.
fn commit(
    persistence: &mut Persistence,
    draft: &BookingDraft,
    command: Command,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<Booking, ApiError> {
    let command_name: &'static str = command.name();
    let result: TransitionResult = apply(&draft.booking, command, actor.to_audit_actor(), cause)
        .map_err(translate_core_error)?;

    persistence
        .record_op(&result.audit_event, Some(draft.user_id))
        .map_err(translate_persistence_error)?;
    persistence
        .update_booking_draft(draft.draft_id, &result.new_state)
        .map_err(translate_persistence_error)?;

    debug!(
        booking_id = draft.draft_id,
        command = command_name,
        step = %result.new_state.step,
        "Booking updated"
    );
    Ok(result.new_state)
}

fn require_trip(booking: &Booking) -> Result<&TripDetails, ApiError> {
    booking.trip.as_ref().ok_or_else(|| {
        translate_core_error(CoreError::MissingSelection(String::from("trip details")))
    })
}

fn require_travel_id(booking: &Booking) -> Result<i64, ApiError> {
    booking.travel_id.ok_or_else(|| ApiError::Internal {
        message: String::from("Booking has no travel record"),
    })
}

fn unknown_option(field: &str, option_id: &str) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message: format!("'{option_id}' is not offered for this trip"),
    }
}

/// Confirms a discount applied earlier can still be redeemed.
fn recheck_discount(
    persistence: &mut Persistence,
    booking_id: i64,
    applied: &AppliedDiscount,
    today: Date,
) -> Result<(), ApiError> {
    let code: &str = applied.code.value();
    let stored: Option<DiscountData> = persistence
        .get_discount_by_code(code)
        .map_err(translate_persistence_error)?;

    let outcome: Result<(), ApiError> = match stored {
        Some(stored) if stored.discount_id == applied.discount_id => {
            redeemable_discount(&stored, applied.code.clone(), today).map(|_| ())
        }
        _ => Err(ApiError::DomainRuleViolation {
            rule: String::from("discount_withdrawn"),
            message: format!("Discount code {code} no longer exists"),
        }),
    };

    outcome.map_err(|err| {
        warn!(booking_id, code, %err, "Applied discount can no longer be redeemed");
        match err {
            ApiError::DomainRuleViolation { rule, message } => ApiError::DomainRuleViolation {
                rule,
                message: format!("{message}; remove it from the booking and try again"),
            },
            other => other,
        }
    })
}

/// Checks a stored discount can be redeemed and resolves its value.
fn redeemable_discount(
    stored: &DiscountData,
    code: DiscountCode,
    today: Date,
) -> Result<AppliedDiscount, ApiError> {
    if !stored.is_active {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("discount_inactive"),
            message: format!("Discount code {} is no longer active", code.value()),
        });
    }

    if let Some(expiry) = stored.expiry_date.as_deref() {
        let expiry_date: Date = parse_iso_date(expiry).map_err(translate_domain_error)?;
        if expiry_date < today {
            return Err(ApiError::DomainRuleViolation {
                rule: String::from("discount_expired"),
                message: format!("Discount code {} expired on {expiry}", code.value()),
            });
        }
    }

    let kind: DiscountKind = stored
        .discount_type
        .parse()
        .map_err(translate_domain_error)?;
    AppliedDiscount::new(stored.discount_id, code, kind, stored.amount)
        .map_err(translate_domain_error)
}

fn booking_response(booking_id: i64, user_id: i64, booking: Booking) -> BookingResponse {
    let price: PriceBreakdown = booking.price_breakdown();
    BookingResponse {
        booking_id,
        user_id,
        step: booking.step,
        step_number: booking.step.number(),
        step_label: booking.step.label().to_string(),
        total_display: format_inr(price.total),
        offers: step_offers(&booking),
        price,
        booking,
    }
}

/// Options for the booking's current step.
fn step_offers(booking: &Booking) -> StepOffers {
    let Some(trip) = booking.trip.as_ref() else {
        return StepOffers::default();
    };
    let destination: &str = trip.destination.name();

    match booking.step {
        WizardStep::Transportation => StepOffers {
            transport: transport_options(trip),
            ..StepOffers::default()
        },
        WizardStep::Accommodation => StepOffers {
            accommodations: accommodation_options(destination),
            ..StepOffers::default()
        },
        WizardStep::Attractions => StepOffers {
            attractions: attraction_options(destination),
            ..StepOffers::default()
        },
        WizardStep::LocalTransport => StepOffers {
            local_transport: local_transport_options(),
            ..StepOffers::default()
        },
        WizardStep::TripDetails | WizardStep::Billing | WizardStep::Confirmation => {
            StepOffers::default()
        }
    }
}

fn confirmation_response(
    booking_id: i64,
    booking: &Booking,
) -> Result<ConfirmationResponse, ApiError> {
    let (Some(receipt), Some(trip)) = (booking.receipt.as_ref(), booking.trip.as_ref()) else {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("not_paid"),
            message: format!("Booking {booking_id} has not been paid for"),
        });
    };

    Ok(ConfirmationResponse {
        booking_id,
        receipt: receipt.clone(),
        route: trip.route_name(),
        start_date: format_iso_date(trip.start_date),
        end_date: format_iso_date(trip.end_date),
        travelers: trip.travelers,
        price: booking.price_breakdown(),
        amount_display: format_inr(receipt.amount_paid),
    })
}

// ============================================================================
// Lookups
// ============================================================================

/// Lists the actor's own trips, latest departure first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn my_trips(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<MyTripsResponse, ApiError> {
    let trips = persistence
        .list_trips_for_user(actor.user_id)
        .map_err(translate_persistence_error)?;
    Ok(MyTripsResponse { trips })
}

/// Lists the passenger rows of a travel.
///
/// Admins see every row; travelers only see their own.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the travel does not exist.
pub fn passengers_by_travel(
    persistence: &mut Persistence,
    travel_id: i64,
    actor: &AuthenticatedActor,
) -> Result<PassengersResponse, ApiError> {
    if persistence
        .get_travel_by_id(travel_id)
        .map_err(translate_persistence_error)?
        .is_none()
    {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Travel"),
            message: format!("Travel {travel_id} does not exist"),
        });
    }

    let mut passengers: Vec<PassengerData> = persistence
        .get_passengers_by_travel_id(travel_id)
        .map_err(translate_persistence_error)?;
    if actor.role == Role::Traveler {
        passengers.retain(|p| p.user_id == actor.user_id);
    }

    Ok(PassengersResponse {
        travel_id,
        passengers,
    })
}

/// Lists stored flights on an exact route.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if either end is blank.
pub fn flights_by_route(
    persistence: &mut Persistence,
    from: &str,
    to: &str,
) -> Result<FlightsResponse, ApiError> {
    let from: Location = Location::new("from", from).map_err(translate_domain_error)?;
    let to: Location = Location::new("to", to).map_err(translate_domain_error)?;
    let flights = persistence
        .get_flights_by_route(from.name(), to.name())
        .map_err(translate_persistence_error)?;
    Ok(FlightsResponse { flights })
}

/// Lists stored resorts whose address mentions `location`.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the location is blank.
pub fn resorts_by_location(
    persistence: &mut Persistence,
    location: &str,
) -> Result<ResortsResponse, ApiError> {
    let location: Location = Location::new("location", location).map_err(translate_domain_error)?;
    let resorts = persistence
        .get_resorts_by_location(location.name())
        .map_err(translate_persistence_error)?;
    Ok(ResortsResponse { resorts })
}

// ============================================================================
// Admin panel
// ============================================================================

/// Lists users, optionally filtered by a search term.
///
/// # Errors
///
/// Returns `ApiError::Unauthorized` for non-admins.
pub fn list_users(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    search: Option<&str>,
) -> Result<ListUsersResponse, ApiError> {
    AuthorizationService::authorize_admin(actor, "list_users")?;

    let users: Vec<UserData> = match search_term(search) {
        Some(term) => persistence.search_users(term),
        None => persistence.list_users(),
    }
    .map_err(translate_persistence_error)?;

    Ok(ListUsersResponse {
        total: users.len(),
        users,
    })
}

/// Creates a discount code.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - The code, type, amount or expiry date is invalid
/// - The code already exists
pub fn create_discount(
    persistence: &mut Persistence,
    request: &CreateDiscountRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<CreateDiscountResponse, ApiError> {
    AuthorizationService::authorize_admin(actor, "create_discount")?;

    let code: DiscountCode = DiscountCode::parse(&request.code).map_err(translate_domain_error)?;
    let kind: DiscountKind = request
        .discount_type
        .parse()
        .map_err(translate_domain_error)?;
    if let Some(amount) = request.amount {
        validate_amount("amount", amount).map_err(translate_domain_error)?;
        // Rejects percentages above 100.
        AppliedDiscount::new(0, code.clone(), kind, Some(amount))
            .map_err(translate_domain_error)?;
    }
    let expiry_date: Option<Date> = request
        .expiry_date
        .as_deref()
        .filter(|value| !value.trim().is_empty())
        .map(parse_iso_date)
        .transpose()
        .map_err(translate_domain_error)?;

    let discount_id: i64 = persistence
        .create_discount(&NewDiscount {
            code: code.value().to_string(),
            discount_type: kind,
            amount: request.amount,
            expiry_date,
            is_active: request.is_active,
        })
        .map_err(translate_persistence_error)?;

    let discount: DiscountData = persistence
        .get_discount_by_code(code.value())
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::Internal {
            message: format!("Discount {discount_id} missing after insert"),
        })?;

    let after: StateSnapshot = snapshot(&discount)?;
    record_admin_op(
        persistence,
        actor,
        cause,
        Action::new(
            String::from("CreateDiscount"),
            Some(code.value().to_string()),
        ),
        StateSnapshot::empty(),
        after,
    )?;

    info!(discount_id, code = code.value(), kind = %kind, "Discount created");
    Ok(CreateDiscountResponse {
        message: format!("Discount code {} created", discount.code),
        discount,
    })
}

/// Lists discount codes, newest first.
///
/// # Errors
///
/// Returns `ApiError::Unauthorized` for non-admins.
pub fn list_discounts(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<ListDiscountsResponse, ApiError> {
    AuthorizationService::authorize_admin(actor, "list_discounts")?;
    let discounts: Vec<DiscountData> = persistence
        .list_discounts()
        .map_err(translate_persistence_error)?;
    Ok(ListDiscountsResponse { discounts })
}

/// Deletes a discount code.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the discount does not
/// exist.
pub fn delete_discount(
    persistence: &mut Persistence,
    discount_id: i64,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_admin(actor, "delete_discount")?;
    persistence
        .delete_discount(discount_id)
        .map_err(|e| match translate_persistence_error(e) {
            ApiError::ResourceNotFound { message, .. } => ApiError::ResourceNotFound {
                resource_type: String::from("Discount"),
                message,
            },
            other => other,
        })?;

    record_admin_op(
        persistence,
        actor,
        cause,
        Action::new(
            String::from("DeleteDiscount"),
            Some(discount_id.to_string()),
        ),
        StateSnapshot::empty(),
        StateSnapshot::empty(),
    )?;
    info!(discount_id, "Discount deleted");
    Ok(())
}

/// Lists travels with their passengers, optionally filtered by a search
/// term.
///
/// # Errors
///
/// Returns `ApiError::Unauthorized` for non-admins.
pub fn list_travel_records(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    search: Option<&str>,
) -> Result<TravelRecordsResponse, ApiError> {
    AuthorizationService::authorize_admin(actor, "list_travel_records")?;
    let records = match search_term(search) {
        Some(term) => persistence.search_travel_records(term),
        None => persistence.list_travel_records(),
    }
    .map_err(translate_persistence_error)?;
    Ok(TravelRecordsResponse { records })
}

/// Dashboard headline numbers and the latest bookings.
///
/// # Errors
///
/// Returns `ApiError::Unauthorized` for non-admins.
pub fn dashboard(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    search: Option<&str>,
) -> Result<DashboardResponse, ApiError> {
    AuthorizationService::authorize_admin(actor, "view_dashboard")?;
    let stats: DashboardStats = persistence
        .dashboard_stats()
        .map_err(translate_persistence_error)?;
    let recent_bookings = persistence
        .recent_bookings(RECENT_BOOKINGS_LIMIT, search_term(search))
        .map_err(translate_persistence_error)?;

    Ok(DashboardResponse {
        revenue_display: format_inr(stats.total_revenue),
        stats,
        recent_bookings,
    })
}

/// Booking and revenue reports.
///
/// # Errors
///
/// Returns `ApiError::Unauthorized` for non-admins.
pub fn reports(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<ReportsResponse, ApiError> {
    AuthorizationService::authorize_admin(actor, "view_reports")?;
    let stats: DashboardStats = persistence
        .dashboard_stats()
        .map_err(translate_persistence_error)?;
    let top_destinations = persistence
        .top_destinations(TOP_DESTINATIONS_LIMIT)
        .map_err(translate_persistence_error)?;
    let monthly = persistence
        .bookings_by_month()
        .map_err(translate_persistence_error)?;

    let average_booking_value: Money = if stats.total_bookings > 0 {
        stats.total_revenue / stats.total_bookings
    } else {
        0
    };

    Ok(ReportsResponse {
        stats,
        top_destinations,
        monthly,
        average_booking_value,
    })
}

/// Every booking as CSV, header row first.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the CSV cannot be
/// written.
pub fn export_bookings_csv(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<String, ApiError> {
    AuthorizationService::authorize_admin(actor, "export_reports")?;
    let rows: Vec<BookingExportRow> = persistence
        .booking_export_rows()
        .map_err(translate_persistence_error)?;
    debug!(rows = rows.len(), "Exporting bookings");
    bookings_to_csv(&rows)
}

/// Inserts sample users, agencies and stations. Existing rows are left
/// alone, so running it twice adds nothing.
///
/// # Errors
///
/// Returns `ApiError::Unauthorized` for non-admins.
pub fn seed_sample_data(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<SeedResponse, ApiError> {
    AuthorizationService::authorize_admin(actor, "seed_sample_data")?;
    let summary: SeedSummary = persistence
        .seed_sample_data()
        .map_err(translate_persistence_error)?;

    let after: StateSnapshot = snapshot(&summary)?;
    record_admin_op(
        persistence,
        actor,
        cause,
        Action::new(String::from("SeedSampleData"), None),
        StateSnapshot::empty(),
        after,
    )?;

    Ok(SeedResponse {
        message: format!(
            "Created {} users, {} agencies and {} stations",
            summary.users_created, summary.agencies_created, summary.stations_created
        ),
        summary,
    })
}

/// Adds five weekly sample travels starting a week after `today`.
///
/// # Errors
///
/// Returns `ApiError::Unauthorized` for non-admins.
pub fn add_travel_records(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    cause: Cause,
    today: Date,
) -> Result<TravelRecordsCreatedResponse, ApiError> {
    AuthorizationService::authorize_admin(actor, "add_travel_records")?;
    let summary: SampleTravelSummary = persistence
        .add_sample_travel_records(today)
        .map_err(translate_persistence_error)?;

    let after: StateSnapshot = snapshot(&summary)?;
    record_admin_op(
        persistence,
        actor,
        cause,
        Action::new(String::from("AddTravelRecords"), None),
        StateSnapshot::empty(),
        after,
    )?;

    Ok(TravelRecordsCreatedResponse {
        message: format!(
            "Created {} travel records and {} passenger records",
            summary.travel_ids.len(),
            summary.passengers_created
        ),
        summary,
    })
}

/// Reports whether any superadmin exists. Requires no session.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn admin_check(persistence: &mut Persistence) -> Result<AdminCheckResponse, ApiError> {
    let admin_count: i64 = persistence
        .count_superadmins()
        .map_err(translate_persistence_error)?;
    Ok(AdminCheckResponse {
        has_admin: admin_count > 0,
        admin_count,
    })
}

/// Creates the first superadmin on an installation that has none.
///
/// The account password doubles as the admin panel password.
///
/// # Errors
///
/// Returns an error if:
/// - A superadmin already exists
/// - The account fields or password are invalid
/// - The email or username is taken
pub fn bootstrap_admin(
    persistence: &mut Persistence,
    request: &BootstrapAdminRequest,
    cause: Cause,
) -> Result<BootstrapAdminResponse, ApiError> {
    if persistence
        .count_superadmins()
        .map_err(translate_persistence_error)?
        > 0
    {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("admin_exists"),
            message: String::from("An administrator has already been set up"),
        });
    }

    let email: Email = Email::parse(&request.email).map_err(translate_domain_error)?;
    validate_name("Username", &request.username).map_err(translate_domain_error)?;
    validate_name("First name", &request.first_name).map_err(translate_domain_error)?;
    validate_name("Last name", &request.last_name).map_err(translate_domain_error)?;
    PasswordPolicy::default().validate(
        &request.password,
        &request.password_confirmation,
        &request.username,
        email.value(),
    )?;
    ensure_account_available(persistence, request.username.trim(), email.value())?;

    let user_id: i64 = persistence
        .create_user(&NewUser {
            username: request.username.trim().to_string(),
            email: email.value().to_string(),
            password: request.password.clone(),
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            city: None,
            country: None,
            verified: true,
        })
        .map_err(translate_persistence_error)?;
    persistence
        .create_superadmin(user_id, &request.password)
        .map_err(translate_persistence_error)?;

    let event: AuditEvent = AuditEvent::new(
        Actor::system(),
        cause,
        Action::new(String::from("BootstrapAdmin"), Some(user_id.to_string())),
        StateSnapshot::empty(),
        StateSnapshot::empty(),
    );
    persistence
        .record_op(&event, Some(user_id))
        .map_err(translate_persistence_error)?;

    info!(user_id, "First administrator created");
    Ok(BootstrapAdminResponse {
        user_id,
        message: format!("Administrator created; sign in with user id {user_id}"),
    })
}

/// Today's date in UTC.
#[must_use]
pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}

fn search_term(search: Option<&str>) -> Option<&str> {
    search.map(str::trim).filter(|term| !term.is_empty())
}

fn snapshot<T: serde::Serialize>(value: &T) -> Result<StateSnapshot, ApiError> {
    StateSnapshot::capture(value).map_err(|e| ApiError::Internal {
        message: format!("Failed to capture audit snapshot: {e}"),
    })
}

fn record_admin_op(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    cause: Cause,
    action: Action,
    before: StateSnapshot,
    after: StateSnapshot,
) -> Result<(), ApiError> {
    let event: AuditEvent = AuditEvent::new(actor.to_audit_actor(), cause, action, before, after);
    persistence
        .record_op(&event, Some(actor.user_id))
        .map_err(translate_persistence_error)?;
    Ok(())
}
