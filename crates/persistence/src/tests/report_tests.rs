// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use travelease_domain::DiscountKind;

use crate::tests::{create_test_travel_to, create_test_user};
use crate::{
    BookingExportRow, CompletedBooking, DashboardStats, DestinationCount, MonthlyBookings,
    NewBooking, NewDiscount, Persistence, RecentBooking,
};

fn book(
    persistence: &mut Persistence,
    user_id: i64,
    travel_id: i64,
    amount: i64,
    discount_id: Option<i64>,
) -> CompletedBooking {
    persistence
        .complete_booking(&NewBooking {
            user_id,
            travel_id,
            total_price: amount,
            amount_paid: amount,
            discount_id,
        })
        .unwrap()
}

/// Three bookings: two to Paris, one to Goa. The Goa booking uses a
/// discount.
fn seed_bookings(persistence: &mut Persistence) -> (i64, i64) {
    let first: i64 = create_test_user(persistence, 1);
    let second: i64 = create_test_user(persistence, 2);
    let paris_a: i64 = create_test_travel_to(persistence, "Delhi", "Paris");
    let paris_b: i64 = create_test_travel_to(persistence, "Mumbai", "Paris");
    let goa: i64 = create_test_travel_to(persistence, "Pune", "Goa");
    let discount_id: i64 = persistence
        .create_discount(&NewDiscount {
            code: String::from("WELCOME"),
            discount_type: DiscountKind::Fixed,
            amount: Some(500),
            expiry_date: None,
            is_active: true,
        })
        .unwrap();

    book(persistence, first, paris_a, 100_000, None);
    book(persistence, second, paris_b, 80_000, None);
    book(persistence, second, goa, 20_000, Some(discount_id));
    (first, second)
}

#[test]
fn test_dashboard_stats_on_empty_database() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let stats: DashboardStats = persistence.dashboard_stats().unwrap();
    assert_eq!(stats, DashboardStats::default());
}

#[test]
fn test_dashboard_stats_counts_bookings_and_revenue() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    seed_bookings(&mut persistence);

    let stats: DashboardStats = persistence.dashboard_stats().unwrap();
    assert_eq!(stats.total_bookings, 3);
    assert_eq!(stats.total_users, 2);
    assert_eq!(stats.active_discounts, 1);
    assert_eq!(stats.total_revenue, 200_000);
}

#[test]
fn test_recent_bookings_newest_first_with_limit() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let (_, second) = seed_bookings(&mut persistence);

    let recent: Vec<RecentBooking> = persistence.recent_bookings(2, None).unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].to_location, "Goa");
    assert_eq!(recent[0].user_id, second);
    assert_eq!(recent[0].customer_name, "Asha2 Rao");
    assert_eq!(recent[1].from_location, "Mumbai");
}

#[test]
fn test_recent_bookings_search() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let (first, _) = seed_bookings(&mut persistence);

    let by_email: Vec<RecentBooking> = persistence
        .recent_bookings(10, Some("traveler1@"))
        .unwrap();
    assert_eq!(by_email.len(), 1);
    assert_eq!(by_email[0].user_id, first);

    let by_route: Vec<RecentBooking> = persistence.recent_bookings(10, Some("paris")).unwrap();
    assert_eq!(by_route.len(), 2);

    let blank: Vec<RecentBooking> = persistence.recent_bookings(10, Some("  ")).unwrap();
    assert_eq!(blank.len(), 3);
}

#[test]
fn test_top_destinations_ranked_by_count() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    seed_bookings(&mut persistence);

    let top: Vec<DestinationCount> = persistence.top_destinations(5).unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].destination, "Paris");
    assert_eq!(top[0].bookings, 2);
    assert_eq!(top[1].destination, "Goa");

    assert_eq!(persistence.top_destinations(1).unwrap().len(), 1);
}

#[test]
fn test_bookings_by_month_groups_current_month() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    seed_bookings(&mut persistence);

    let months: Vec<MonthlyBookings> = persistence.bookings_by_month().unwrap();
    assert_eq!(months.len(), 1);
    assert_eq!(months[0].month.len(), 7);
    assert_eq!(months[0].bookings, 3);
    assert_eq!(months[0].revenue, 200_000);
}

#[test]
fn test_export_rows_carry_discount_code() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    seed_bookings(&mut persistence);

    let rows: Vec<BookingExportRow> = persistence.booking_export_rows().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].discount_code.as_deref(), Some("WELCOME"));
    assert_eq!(rows[0].travelers, 1);
    assert!(rows[1].discount_code.is_none());
    assert_eq!(rows[2].email, "traveler1@example.com");
}
