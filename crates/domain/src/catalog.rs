// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Offer catalog generation.
//!
//! Every option offered by the booking wizard is derived deterministically
//! from the trip details, so the server can regenerate a catalog and look
//! up a submitted option id without storing the offers.

use crate::types::{
    Accommodation, Attraction, LegDirection, LocalTransport, LocalTransportKind, Money,
    TransportMode, TransportOption, TripDetails,
};
use time::Date;

const AIRLINES: [&str; 3] = ["AirPod Airlines", "SkyWings", "Global Express"];
const RAIL_COMPANIES: [&str; 2] = ["Express Rail", "Coastal Line"];

/// Generates all transport legs for a trip.
///
/// Outbound options come first, then return options. Within each
/// direction flights precede trains; trains are only offered when the
/// trip is not international.
#[must_use]
pub fn transport_options(trip: &TripDetails) -> Vec<TransportOption> {
    let origin: &str = trip.origin.name();
    let destination: &str = trip.destination.name();
    let domestic: bool = !trip.is_international();

    let mut options: Vec<TransportOption> =
        flight_options(origin, destination, trip.start_date, LegDirection::Outbound);
    if domestic {
        options.extend(train_options(
            origin,
            destination,
            trip.start_date,
            LegDirection::Outbound,
        ));
    }
    options.extend(flight_options(
        destination,
        origin,
        trip.end_date,
        LegDirection::Return,
    ));
    if domestic {
        options.extend(train_options(
            destination,
            origin,
            trip.end_date,
            LegDirection::Return,
        ));
    }
    options
}

/// Looks up a transport leg by catalog id.
#[must_use]
pub fn find_transport_option(trip: &TripDetails, option_id: &str) -> Option<TransportOption> {
    transport_options(trip)
        .into_iter()
        .find(|option| option.id == option_id)
}

fn flight_options(
    from: &str,
    to: &str,
    date: Date,
    direction: LegDirection,
) -> Vec<TransportOption> {
    (0_i64..)
        .zip(AIRLINES)
        .map(|(index, company)| TransportOption {
            id: format!("flight-{}-{}", direction.as_str(), index + 1),
            mode: TransportMode::Flight,
            direction,
            company: company.to_string(),
            departure_time: format!("{}:00", 8 + index * 4),
            arrival_time: format!("{}:30", 10 + index * 4),
            price: 15_000 + index * 5_000,
            from: from.to_string(),
            to: to.to_string(),
            date,
        })
        .collect()
}

fn train_options(
    from: &str,
    to: &str,
    date: Date,
    direction: LegDirection,
) -> Vec<TransportOption> {
    (0_i64..)
        .zip(RAIL_COMPANIES)
        .map(|(index, company)| TransportOption {
            id: format!("train-{}-{}", direction.as_str(), index + 1),
            mode: TransportMode::Train,
            direction,
            company: company.to_string(),
            departure_time: format!("{}:00", 7 + index * 6),
            arrival_time: format!("{}:00", 11 + index * 6),
            price: 8_000 + index * 3_000,
            from: from.to_string(),
            to: to.to_string(),
            date,
        })
        .collect()
}

/// Generates the stays offered at a destination.
#[must_use]
pub fn accommodation_options(destination: &str) -> Vec<Accommodation> {
    let all_amenities: &[&str] = &["wifi", "pool", "restaurant", "gym"];
    let stays: [(&str, String, Money, u8, &[&str]); 5] = [
        (
            "Grand Plaza Hotel",
            format!("Downtown {destination}"),
            18_900,
            4,
            all_amenities,
        ),
        (
            "Seaside Resort & Spa",
            format!("{destination} Beach"),
            24_900,
            5,
            all_amenities,
        ),
        (
            "City Center Inn",
            format!("Central {destination}"),
            12_900,
            3,
            &["wifi", "restaurant"],
        ),
        (
            "Mountain View Lodge",
            format!("{destination} Hills"),
            15_900,
            4,
            &["wifi", "pool"],
        ),
        (
            "Luxury Suites",
            format!("{destination} Financial District"),
            29_900,
            5,
            all_amenities,
        ),
    ];

    stays
        .into_iter()
        .enumerate()
        .map(|(index, (name, location, price, rating, amenities))| Accommodation {
            id: format!("hotel-{}", index + 1),
            name: name.to_string(),
            location,
            price,
            rating,
            amenities: amenities.iter().map(ToString::to_string).collect(),
        })
        .collect()
}

/// Looks up a stay by catalog id.
#[must_use]
pub fn find_accommodation(destination: &str, accommodation_id: &str) -> Option<Accommodation> {
    accommodation_options(destination)
        .into_iter()
        .find(|stay| stay.id == accommodation_id)
}

/// Generates the attractions offered at a destination.
///
/// Paris has a curated list; every other destination gets a generic set
/// named after it.
#[must_use]
pub fn attraction_options(destination: &str) -> Vec<Attraction> {
    let entries: Vec<(String, String, Money, &str)> =
        if destination.to_lowercase().contains("paris") {
            vec![
                (
                    String::from("Eiffel Tower"),
                    String::from("Champ de Mars, Paris"),
                    2_500,
                    "Iconic iron tower with panoramic city views.",
                ),
                (
                    String::from("Louvre Museum"),
                    String::from("Rue de Rivoli, Paris"),
                    1_700,
                    "World's largest art museum & historic monument.",
                ),
                (
                    String::from("Notre-Dame Cathedral"),
                    String::from("Île de la Cité, Paris"),
                    0,
                    "Medieval Catholic cathedral with Gothic architecture.",
                ),
                (
                    String::from("Seine River Cruise"),
                    String::from("Various departure points, Paris"),
                    1_500,
                    "Scenic boat tour along the Seine River.",
                ),
                (
                    String::from("Montmartre & Sacré-Cœur"),
                    String::from("Montmartre, Paris"),
                    0,
                    "Historic district with stunning basilica.",
                ),
            ]
        } else {
            vec![
                (
                    format!("{destination} Museum of Art"),
                    format!("Downtown {destination}"),
                    1_500,
                    "Extensive collection of local and international art.",
                ),
                (
                    format!("{destination} Historical Tour"),
                    format!("Old Town, {destination}"),
                    2_500,
                    "Guided walking tour of historical landmarks.",
                ),
                (
                    format!("{destination} Botanical Gardens"),
                    format!("{destination} Park District"),
                    1_000,
                    "Beautiful gardens featuring local and exotic plants.",
                ),
                (
                    format!("{destination} Adventure Park"),
                    format!("{destination} Outskirts"),
                    3_500,
                    "Outdoor activities including zip-lining and hiking.",
                ),
                (
                    format!("{destination} Culinary Experience"),
                    format!("{destination} Food District"),
                    4_500,
                    "Food tour featuring local cuisine and delicacies.",
                ),
            ]
        };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, (name, location, price, description))| Attraction {
            id: format!("attraction-{}", index + 1),
            name,
            location,
            price,
            description: description.to_string(),
        })
        .collect()
}

/// Looks up an attraction by catalog id.
#[must_use]
pub fn find_attraction(destination: &str, attraction_id: &str) -> Option<Attraction> {
    attraction_options(destination)
        .into_iter()
        .find(|attraction| attraction.id == attraction_id)
}

/// Generates the local transport services offered at every destination.
#[must_use]
pub fn local_transport_options() -> Vec<LocalTransport> {
    let services: [(LocalTransportKind, &str, &str, Money); 5] = [
        (
            LocalTransportKind::Cab,
            "Premium Taxi Service",
            "24/7 on-call taxi service with professional drivers and comfortable vehicles.",
            3_500,
        ),
        (
            LocalTransportKind::Van,
            "Family Van Rental",
            "Spacious van ideal for families or groups, with driver included.",
            5_500,
        ),
        (
            LocalTransportKind::Bike,
            "Scooter/Bike Rental",
            "Freedom to explore at your own pace with our reliable scooters and bikes.",
            1_200,
        ),
        (
            LocalTransportKind::SelfDrive,
            "Self-Drive Car Rental",
            "Explore with privacy and convenience in our well-maintained rental cars.",
            2_800,
        ),
        (
            LocalTransportKind::Luxury,
            "Luxury Car with Chauffeur",
            "Travel in style with our premium vehicles and professional chauffeurs.",
            7_500,
        ),
    ];

    services
        .into_iter()
        .enumerate()
        .map(
            |(index, (kind, name, description, price_per_day))| LocalTransport {
                id: format!("transport-{}", index + 1),
                kind,
                name: name.to_string(),
                description: description.to_string(),
                price_per_day,
            },
        )
        .collect()
}

/// Looks up a local transport service by catalog id.
#[must_use]
pub fn find_local_transport(transport_id: &str) -> Option<LocalTransport> {
    local_transport_options()
        .into_iter()
        .find(|transport| transport.id == transport_id)
}
