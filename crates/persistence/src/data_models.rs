// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row representations and storage codecs.
//!
//! Timestamps and times of day are stored as text so that range filters
//! can compare lexicographically; these helpers are the single place the
//! storage formats are spelled out.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use diesel::prelude::*;

use crate::diesel_schema::{loss_entries, production_entries};
use crate::error::PersistenceError;
use prodtrack_domain::{Line, LossDetail, ProductionEntry, ShiftWindow};

/// Storage format for `recorded_at` timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Storage format for window start/end times of day.
pub const TIME_FORMAT: &str = "%H:%M";

/// Diesel Queryable struct for production entry rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = production_entries)]
pub struct EntryRow {
    pub entry_id: i64,
    pub recorded_at: String,
    pub line: i32,
    pub window_start: String,
    pub window_end: String,
    pub planned: i32,
    pub actual: i32,
    pub total_loss_minutes: i32,
}

/// Diesel Queryable struct for loss entry rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = loss_entries)]
pub struct LossRow {
    pub loss_id: i64,
    pub entry_id: i64,
    pub reason: String,
    pub loss_minutes: i32,
    pub remarks: Option<String>,
}

/// Formats a timestamp for storage.
#[must_use]
pub fn timestamp_to_storage(timestamp: NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Formats a time of day for storage.
#[must_use]
pub fn time_to_storage(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Inclusive text bounds covering `[start, end]` whole days of stored
/// timestamps.
#[must_use]
pub fn date_range_bounds(start: NaiveDate, end: NaiveDate) -> (String, String) {
    (
        format!("{} 00:00:00", start.format("%Y-%m-%d")),
        format!("{} 23:59:59", end.format("%Y-%m-%d")),
    )
}

/// Narrows an unsigned domain count into the signed storage column type.
///
/// # Errors
///
/// Returns an error if the value exceeds the storage range.
pub fn count_to_storage(value: u32) -> Result<i32, PersistenceError> {
    i32::try_from(value)
        .map_err(|_| PersistenceError::InvalidStoredData(format!("Count {value} exceeds storage range")))
}

/// Widens a signed storage count back into the unsigned domain type.
///
/// # Errors
///
/// Returns an error if the stored value is negative.
pub fn count_from_storage(value: i32) -> Result<u32, PersistenceError> {
    u32::try_from(value)
        .map_err(|_| PersistenceError::InvalidStoredData(format!("Negative stored count {value}")))
}

/// Rebuilds a domain loss detail from a stored row.
///
/// # Errors
///
/// Returns an error if the stored loss minutes are negative.
pub fn loss_from_row(row: LossRow) -> Result<LossDetail, PersistenceError> {
    Ok(LossDetail::new(
        row.reason,
        count_from_storage(row.loss_minutes)?,
        row.remarks,
    ))
}

/// Rebuilds a domain production entry from a stored row and its losses.
///
/// # Errors
///
/// Returns an error if any stored field cannot be rebuilt into a domain
/// value (bad timestamp, unknown line, inverted window, negative count).
pub fn entry_from_row(
    row: EntryRow,
    losses: Vec<LossDetail>,
) -> Result<ProductionEntry, PersistenceError> {
    let recorded_at: NaiveDateTime = NaiveDateTime::parse_from_str(
        &row.recorded_at,
        TIMESTAMP_FORMAT,
    )
    .map_err(|e| {
        PersistenceError::InvalidStoredData(format!(
            "Bad recorded_at '{}': {e}",
            row.recorded_at
        ))
    })?;

    let line_number: u8 = u8::try_from(row.line).map_err(|_| {
        PersistenceError::InvalidStoredData(format!("Bad line number {}", row.line))
    })?;
    let line: Line = Line::from_number(line_number)
        .map_err(|e| PersistenceError::InvalidStoredData(e.to_string()))?;

    let window: ShiftWindow = ShiftWindow::parse(&row.window_start, &row.window_end)
        .map_err(|e| PersistenceError::InvalidStoredData(e.to_string()))?;

    let entry: ProductionEntry = ProductionEntry::new(
        recorded_at,
        line,
        window,
        count_from_storage(row.planned)?,
        count_from_storage(row.actual)?,
        count_from_storage(row.total_loss_minutes)?,
        losses,
    );

    Ok(entry.with_id(row.entry_id))
}
