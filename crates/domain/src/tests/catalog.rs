// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::create_test_trip;
use crate::{
    Accommodation, Attraction, LegDirection, LocalTransport, TransportMode, TransportOption,
    TripDetails, accommodation_options, attraction_options, find_accommodation, find_attraction,
    find_local_transport, local_transport_options, transport_options,
};
use time::macros::date;

#[test]
fn test_international_trip_offers_flights_only() {
    let trip: TripDetails = create_test_trip("Delhi", "Paris", 2);
    let options: Vec<TransportOption> = transport_options(&trip);

    assert_eq!(options.len(), 6);
    assert!(options.iter().all(|o| o.mode == TransportMode::Flight));
}

#[test]
fn test_domestic_trip_adds_trains() {
    let trip: TripDetails = create_test_trip("Goa", "Goa", 2);
    let options: Vec<TransportOption> = transport_options(&trip);

    assert_eq!(options.len(), 10);
    let ids: Vec<&str> = options.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "flight-outbound-1",
            "flight-outbound-2",
            "flight-outbound-3",
            "train-outbound-1",
            "train-outbound-2",
            "flight-return-1",
            "flight-return-2",
            "flight-return-3",
            "train-return-1",
            "train-return-2",
        ]
    );
}

#[test]
fn test_flight_schedule_and_prices() {
    let trip: TripDetails = create_test_trip("Delhi", "Paris", 1);
    let options: Vec<TransportOption> = transport_options(&trip);
    let third: &TransportOption = &options[2];

    assert_eq!(third.company, "Global Express");
    assert_eq!(third.departure_time, "16:00");
    assert_eq!(third.arrival_time, "18:30");
    assert_eq!(third.price, 25_000);
}

#[test]
fn test_return_legs_reverse_route_on_end_date() {
    let trip: TripDetails = create_test_trip("Delhi", "Paris", 1);
    let returns: Vec<TransportOption> = transport_options(&trip)
        .into_iter()
        .filter(|o| o.direction == LegDirection::Return)
        .collect();

    assert!(returns.iter().all(|o| o.from == "Paris" && o.to == "Delhi"));
    assert!(returns.iter().all(|o| o.date == date!(2026 - 05 - 14)));
}

#[test]
fn test_train_schedule_and_prices() {
    let trip: TripDetails = create_test_trip("Pune", "pune", 1);
    let train: TransportOption = transport_options(&trip)
        .into_iter()
        .find(|o| o.id == "train-outbound-2")
        .unwrap();

    assert_eq!(train.company, "Coastal Line");
    assert_eq!(train.departure_time, "13:00");
    assert_eq!(train.arrival_time, "17:00");
    assert_eq!(train.price, 11_000);
}

#[test]
fn test_accommodations_named_after_destination() {
    let stays: Vec<Accommodation> = accommodation_options("Goa");
    assert_eq!(stays.len(), 5);
    assert_eq!(stays[1].location, "Goa Beach");
    assert_eq!(stays[4].price, 29_900);

    let inn: Accommodation = find_accommodation("Goa", "hotel-3").unwrap();
    assert_eq!(inn.name, "City Center Inn");
    assert_eq!(inn.rating, 3);
    assert!(find_accommodation("Goa", "hotel-9").is_none());
}

#[test]
fn test_paris_gets_curated_attractions() {
    let attractions: Vec<Attraction> = attraction_options("Paris, France");
    assert_eq!(attractions[0].name, "Eiffel Tower");
    assert_eq!(attractions[2].price, 0);
}

#[test]
fn test_generic_attractions_for_other_destinations() {
    let attractions: Vec<Attraction> = attraction_options("Tokyo");
    let prices: Vec<i64> = attractions.iter().map(|a| a.price).collect();
    assert_eq!(prices, vec![1_500, 2_500, 1_000, 3_500, 4_500]);
    assert_eq!(
        find_attraction("Tokyo", "attraction-5").unwrap().name,
        "Tokyo Culinary Experience"
    );
}

#[test]
fn test_local_transport_catalog() {
    let services: Vec<LocalTransport> = local_transport_options();
    assert_eq!(services.len(), 5);
    let bike: LocalTransport = find_local_transport("transport-3").unwrap();
    assert_eq!(bike.price_per_day, 1_200);
    assert_eq!(bike.kind.as_str(), "bike");
}
