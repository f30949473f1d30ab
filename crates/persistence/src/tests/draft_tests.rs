// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use travelease::{Booking, WizardStep};
use travelease_domain::{Location, TripDetails};

use crate::tests::{create_test_date, create_test_user};
use crate::{BookingDraft, Persistence, PersistenceError};

fn trip_booking() -> Booking {
    let mut booking: Booking = Booking::new();
    booking.step = WizardStep::Transportation;
    booking.trip = Some(TripDetails::new(
        Location::new("origin", "Delhi").unwrap(),
        Location::new("destination", "Paris").unwrap(),
        create_test_date(),
        time::macros::date!(2026 - 05 - 14),
        2,
    ));
    booking.travel_id = Some(7);
    booking
}

#[test]
fn test_draft_round_trip() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let user_id: i64 = create_test_user(&mut persistence, 1);
    let booking: Booking = trip_booking();

    let draft_id: i64 = persistence.create_booking_draft(user_id, &booking).unwrap();

    let draft: BookingDraft = persistence.get_booking_draft(draft_id).unwrap().unwrap();
    assert_eq!(draft.user_id, user_id);
    assert_eq!(draft.step, "Transportation");
    assert_eq!(draft.booking, booking);
}

#[test]
fn test_update_draft_replaces_booking_and_step() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let user_id: i64 = create_test_user(&mut persistence, 1);
    let draft_id: i64 = persistence
        .create_booking_draft(user_id, &Booking::new())
        .unwrap();

    let booking: Booking = trip_booking();
    persistence.update_booking_draft(draft_id, &booking).unwrap();

    let draft: BookingDraft = persistence.get_booking_draft(draft_id).unwrap().unwrap();
    assert_eq!(draft.booking.travel_id, Some(7));
    assert_eq!(draft.step, WizardStep::Transportation.label());

    let drafts: Vec<BookingDraft> = persistence.list_booking_drafts_for_user(user_id).unwrap();
    assert_eq!(drafts.len(), 1);
}

#[test]
fn test_delete_draft() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let user_id: i64 = create_test_user(&mut persistence, 1);
    let draft_id: i64 = persistence
        .create_booking_draft(user_id, &Booking::new())
        .unwrap();

    persistence.delete_booking_draft(draft_id).unwrap();

    assert!(persistence.get_booking_draft(draft_id).unwrap().is_none());
    assert!(matches!(
        persistence.delete_booking_draft(draft_id),
        Err(PersistenceError::NotFound(_))
    ));
    assert!(matches!(
        persistence.update_booking_draft(draft_id, &Booking::new()),
        Err(PersistenceError::NotFound(_))
    ));
}
