// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Production entry queries.

use std::collections::HashMap;

use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::{EntryRow, LossRow, date_range_bounds, entry_from_row, loss_from_row};
use crate::diesel_schema::{loss_entries, production_entries};
use crate::error::PersistenceError;
use prodtrack_domain::{LossDetail, ProductionEntry};

/// Retrieves a production entry with its losses by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `entry_id` - The entry ID to retrieve
///
/// # Errors
///
/// Returns `PersistenceError::EntryNotFound` if no entry has the given ID,
/// or another error if the database query fails.
pub fn get_entry(
    conn: &mut SqliteConnection,
    entry_id: i64,
) -> Result<ProductionEntry, PersistenceError> {
    debug!("Looking up production entry by ID: {}", entry_id);

    let row: EntryRow = production_entries::table
        .filter(production_entries::entry_id.eq(entry_id))
        .select(EntryRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::EntryNotFound(entry_id))?;

    let mut losses_by_entry = load_losses(conn, &[entry_id])?;
    let losses: Vec<LossDetail> = losses_by_entry.remove(&entry_id).unwrap_or_default();

    entry_from_row(row, losses)
}

/// Retrieves all entries recorded on a given date, ordered by window start.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `date` - The calendar date to filter on
///
/// # Errors
///
/// Returns an error if the database query fails or a stored row cannot be
/// rebuilt into a domain value.
pub fn entries_for_date(
    conn: &mut SqliteConnection,
    date: NaiveDate,
) -> Result<Vec<ProductionEntry>, PersistenceError> {
    debug!("Listing production entries for date: {}", date);

    let (lower, upper) = date_range_bounds(date, date);

    let rows: Vec<EntryRow> = production_entries::table
        .filter(production_entries::recorded_at.ge(lower))
        .filter(production_entries::recorded_at.le(upper))
        .order(production_entries::window_start.asc())
        .select(EntryRow::as_select())
        .load(conn)?;

    attach_losses(conn, rows)
}

/// Retrieves all entries recorded in the inclusive date range
/// `[start, end]`, ordered by line then recording time.
///
/// This is the report input order: the aggregation walks one line at a
/// time in chronological order.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `start` - The first date of the range
/// * `end` - The last date of the range
///
/// # Errors
///
/// Returns an error if the database query fails or a stored row cannot be
/// rebuilt into a domain value.
pub fn entries_between(
    conn: &mut SqliteConnection,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<ProductionEntry>, PersistenceError> {
    debug!("Listing production entries between {} and {}", start, end);

    let (lower, upper) = date_range_bounds(start, end);

    let rows: Vec<EntryRow> = production_entries::table
        .filter(production_entries::recorded_at.ge(lower))
        .filter(production_entries::recorded_at.le(upper))
        .order((
            production_entries::line.asc(),
            production_entries::recorded_at.asc(),
        ))
        .select(EntryRow::as_select())
        .load(conn)?;

    attach_losses(conn, rows)
}

/// Loads losses for a set of entry IDs, grouped by owning entry.
///
/// Losses are ordered by insertion (`loss_id`) so an entry's losses come
/// back in the order they were submitted.
fn load_losses(
    conn: &mut SqliteConnection,
    entry_ids: &[i64],
) -> Result<HashMap<i64, Vec<LossDetail>>, PersistenceError> {
    let rows: Vec<LossRow> = loss_entries::table
        .filter(loss_entries::entry_id.eq_any(entry_ids))
        .order(loss_entries::loss_id.asc())
        .select(LossRow::as_select())
        .load(conn)?;

    let mut grouped: HashMap<i64, Vec<LossDetail>> = HashMap::new();
    for row in rows {
        let entry_id: i64 = row.entry_id;
        grouped.entry(entry_id).or_default().push(loss_from_row(row)?);
    }

    Ok(grouped)
}

/// Converts entry rows into domain entries with their losses attached.
fn attach_losses(
    conn: &mut SqliteConnection,
    rows: Vec<EntryRow>,
) -> Result<Vec<ProductionEntry>, PersistenceError> {
    let entry_ids: Vec<i64> = rows.iter().map(|row| row.entry_id).collect();
    let mut losses_by_entry = load_losses(conn, &entry_ids)?;

    rows.into_iter()
        .map(|row| {
            let losses: Vec<LossDetail> = losses_by_entry.remove(&row.entry_id).unwrap_or_default();
            entry_from_row(row, losses)
        })
        .collect()
}
