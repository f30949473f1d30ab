// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Location, TripDetails};
use time::macros::date;

pub fn create_test_trip(origin: &str, destination: &str, travelers: u32) -> TripDetails {
    TripDetails::new(
        Location::new("origin", origin).unwrap(),
        Location::new("destination", destination).unwrap(),
        date!(2026 - 05 - 10),
        date!(2026 - 05 - 14),
        travelers,
    )
}
