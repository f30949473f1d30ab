// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write operations.
//!
//! Inserts report the new row id via `last_insert_rowid()`. Operations
//! touching more than one table run in a single transaction.

pub mod bookings;
pub mod catalog;
pub mod discounts;
pub mod drafts;
pub mod inventory;
pub mod ops;
pub mod passengers;
pub mod seed;
pub mod sessions;
pub mod travels;
pub mod users;
