// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV rendering of booking reports.

use csv::Writer;
use travelease_persistence::BookingExportRow;

use crate::error::ApiError;

/// Renders bookings as CSV with a header row named after the fields.
///
/// A missing discount code is written as an empty cell.
///
/// # Errors
///
/// Returns `ApiError::Internal` if a row cannot be written.
pub fn bookings_to_csv(rows: &[BookingExportRow]) -> Result<String, ApiError> {
    let mut writer: Writer<Vec<u8>> = Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row).map_err(csv_error)?;
    }
    if rows.is_empty() {
        writer.write_record(HEADERS).map_err(csv_error)?;
    }

    let bytes: Vec<u8> = writer.into_inner().map_err(|e| ApiError::Internal {
        message: format!("Failed to flush CSV export: {e}"),
    })?;
    String::from_utf8(bytes).map_err(|e| ApiError::Internal {
        message: format!("CSV export is not valid UTF-8: {e}"),
    })
}

/// Column names, written on their own when there are no rows to derive
/// them from.
const HEADERS: [&str; 13] = [
    "billing_id",
    "order_id",
    "customer_name",
    "email",
    "from_location",
    "to_location",
    "travel_date",
    "travelers",
    "total_price",
    "amount_paid",
    "discount_code",
    "status",
    "booked_at",
];

fn csv_error(err: csv::Error) -> ApiError {
    ApiError::Internal {
        message: format!("Failed to write CSV export: {err}"),
    }
}
