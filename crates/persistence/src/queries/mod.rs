// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! Each function takes a `SqliteConnection` and returns plain data models.
//! Lookups by key return `Ok(None)` when the row does not exist.

pub mod catalog;
pub mod discounts;
pub mod drafts;
pub mod inventory;
pub mod ops;
pub mod orders;
pub mod passengers;
pub mod reports;
pub mod sessions;
pub mod travels;
pub mod users;
