// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Monetary amount in whole rupees.
pub type Money = i64;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Parses an ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_iso_date(value: &str) -> Result<Date, DomainError> {
    let format = time::macros::format_description!("[year]-[month]-[day]");
    Date::parse(value.trim(), &format).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Formats a date as ISO 8601 (`YYYY-MM-DD`).
#[must_use]
pub fn format_iso_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// A normalized email address.
///
/// Emails are trimmed and lowercased so lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email {
    value: String,
}

impl Email {
    /// Parses and normalizes an email address.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidEmail` if the address is empty, has no
    /// single `@`, or its domain lacks a dot.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let normalized: String = value.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(DomainError::InvalidEmail(String::from(
                "Email cannot be empty",
            )));
        }

        let mut parts = normalized.split('@');
        let local: &str = parts.next().unwrap_or_default();
        let domain: &str = parts.next().unwrap_or_default();
        if parts.next().is_some() || local.is_empty() || domain.is_empty() {
            return Err(DomainError::InvalidEmail(format!(
                "'{normalized}' must contain exactly one '@' between a name and a domain"
            )));
        }
        if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
            return Err(DomainError::InvalidEmail(format!(
                "'{domain}' is not a valid email domain"
            )));
        }
        if normalized.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidEmail(String::from(
                "Email cannot contain whitespace",
            )));
        }

        Ok(Self { value: normalized })
    }

    /// Returns the normalized address.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

/// A city or place name used as a trip origin or destination.
///
/// Locations keep their original casing for display but compare
/// case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    name: String,
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.name.to_lowercase() == other.name.to_lowercase()
    }
}

impl Eq for Location {}

impl std::hash::Hash for Location {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.to_lowercase().hash(state);
    }
}

impl Location {
    /// Creates a location from a name, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidLocation` if the trimmed name is empty.
    pub fn new(field: &str, name: &str) -> Result<Self, DomainError> {
        let trimmed: &str = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidLocation {
                field: field.to_string(),
                reason: String::from("Please select a location"),
            });
        }
        Ok(Self {
            name: trimmed.to_string(),
        })
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// A discount code.
///
/// Codes are normalized to uppercase so redemption is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiscountCode {
    value: String,
}

impl DiscountCode {
    /// Maximum accepted code length.
    pub const MAX_LENGTH: usize = 32;
    /// Minimum accepted code length.
    pub const MIN_LENGTH: usize = 3;

    /// Parses and normalizes a discount code.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDiscountCode` if the code is too short,
    /// too long, or contains characters other than ASCII letters, digits,
    /// `-` and `_`.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let normalized: String = value.trim().to_uppercase();
        let len: usize = normalized.len();
        if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&len) {
            return Err(DomainError::InvalidDiscountCode(format!(
                "Code must be between {} and {} characters",
                Self::MIN_LENGTH,
                Self::MAX_LENGTH
            )));
        }
        if !normalized
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(DomainError::InvalidDiscountCode(format!(
                "'{normalized}' may only contain letters, digits, '-' and '_'"
            )));
        }
        Ok(Self { value: normalized })
    }

    /// Returns the normalized code.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// How a discount reduces the subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    /// Percentage off the subtotal.
    Percentage,
    /// Fixed rupee amount off the subtotal.
    Fixed,
}

impl DiscountKind {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Fixed => "fixed",
        }
    }

    /// Value used when a discount row carries no amount of its own.
    #[must_use]
    pub const fn default_value(&self) -> i64 {
        match self {
            Self::Percentage => 10,
            Self::Fixed => 500,
        }
    }
}

impl FromStr for DiscountKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "percentage" => Ok(Self::Percentage),
            "fixed" => Ok(Self::Fixed),
            _ => Err(DomainError::InvalidDiscountKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A discount that has been validated and attached to a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedDiscount {
    /// The persisted discount identifier.
    pub discount_id: i64,
    /// The redeemed code.
    pub code: DiscountCode,
    /// The discount kind.
    pub kind: DiscountKind,
    /// Percentage points or rupees, depending on `kind`.
    pub value: i64,
}

impl AppliedDiscount {
    /// Creates an applied discount, resolving a missing or non-positive
    /// stored amount to the kind's default value.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDiscountValue` if a percentage exceeds 100.
    pub fn new(
        discount_id: i64,
        code: DiscountCode,
        kind: DiscountKind,
        stored_amount: Option<i64>,
    ) -> Result<Self, DomainError> {
        let value: i64 = match stored_amount {
            Some(amount) if amount > 0 => amount,
            _ => kind.default_value(),
        };
        if kind == DiscountKind::Percentage && value > 100 {
            return Err(DomainError::InvalidDiscountValue {
                kind: kind.as_str().to_string(),
                value,
            });
        }
        Ok(Self {
            discount_id,
            code,
            kind,
            value,
        })
    }
}

/// The details entered on the first wizard step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripDetails {
    /// Where the trip starts.
    pub origin: Location,
    /// Where the trip goes.
    pub destination: Location,
    /// First day of the trip.
    #[serde(with = "iso_date")]
    pub start_date: Date,
    /// Last day of the trip.
    #[serde(with = "iso_date")]
    pub end_date: Date,
    /// Number of people travelling.
    pub travelers: u32,
}

impl TripDetails {
    /// Creates new trip details. Validation happens in `validate_trip_details`.
    #[must_use]
    pub const fn new(
        origin: Location,
        destination: Location,
        start_date: Date,
        end_date: Date,
        travelers: u32,
    ) -> Self {
        Self {
            origin,
            destination,
            start_date,
            end_date,
            travelers,
        }
    }

    /// A trip is international when origin and destination differ.
    ///
    /// International trips are offered flights only.
    #[must_use]
    pub fn is_international(&self) -> bool {
        self.origin != self.destination
    }

    /// Human-readable route label, e.g. `"Delhi to Paris"`.
    #[must_use]
    pub fn route_name(&self) -> String {
        format!("{} to {}", self.origin, self.destination)
    }
}

/// Direction of a transport leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegDirection {
    /// Origin to destination on the start date.
    Outbound,
    /// Destination back to origin on the end date.
    Return,
}

impl LegDirection {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Outbound => "outbound",
            Self::Return => "return",
        }
    }
}

impl std::fmt::Display for LegDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mode of long-distance transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// Air travel.
    Flight,
    /// Rail travel, offered on domestic trips only.
    Train,
}

impl TransportMode {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Flight => "flight",
            Self::Train => "train",
        }
    }
}

/// A bookable transport leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportOption {
    /// Catalog identifier, e.g. `flight-outbound-1`.
    pub id: String,
    /// Flight or train.
    pub mode: TransportMode,
    /// Outbound or return.
    pub direction: LegDirection,
    /// Operating company.
    pub company: String,
    /// Departure time (`H:MM`).
    pub departure_time: String,
    /// Arrival time (`H:MM`).
    pub arrival_time: String,
    /// Price per traveler.
    pub price: Money,
    /// Departure location.
    pub from: String,
    /// Arrival location.
    pub to: String,
    /// Travel date.
    #[serde(with = "iso_date")]
    pub date: Date,
}

/// A bookable stay, priced per night.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accommodation {
    /// Catalog identifier, e.g. `hotel-1`.
    pub id: String,
    /// Property name.
    pub name: String,
    /// Neighbourhood within the destination.
    pub location: String,
    /// Price per night.
    pub price: Money,
    /// Star rating (1-5).
    pub rating: u8,
    /// Amenity tags.
    pub amenities: Vec<String>,
}

/// A bookable attraction, priced per traveler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attraction {
    /// Catalog identifier, e.g. `attraction-1`.
    pub id: String,
    /// Attraction name.
    pub name: String,
    /// Where it is.
    pub location: String,
    /// Price per traveler.
    pub price: Money,
    /// Short description.
    pub description: String,
}

/// Category of local transport at the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocalTransportKind {
    /// On-call taxi.
    #[serde(rename = "cab")]
    Cab,
    /// Van with driver.
    #[serde(rename = "van")]
    Van,
    /// Scooter or bike.
    #[serde(rename = "bike")]
    Bike,
    /// Self-drive rental car.
    #[serde(rename = "self-drive")]
    SelfDrive,
    /// Chauffeured luxury car.
    #[serde(rename = "luxury")]
    Luxury,
}

impl LocalTransportKind {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cab => "cab",
            Self::Van => "van",
            Self::Bike => "bike",
            Self::SelfDrive => "self-drive",
            Self::Luxury => "luxury",
        }
    }
}

impl FromStr for LocalTransportKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cab" => Ok(Self::Cab),
            "van" => Ok(Self::Van),
            "bike" => Ok(Self::Bike),
            "self-drive" => Ok(Self::SelfDrive),
            "luxury" => Ok(Self::Luxury),
            _ => Err(DomainError::InvalidLocalTransportKind(s.to_string())),
        }
    }
}

/// A local transport service at the destination, priced per day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalTransport {
    /// Catalog identifier, e.g. `transport-1`.
    pub id: String,
    /// Service category.
    pub kind: LocalTransportKind,
    /// Service name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Price per day.
    pub price_per_day: Money,
}
