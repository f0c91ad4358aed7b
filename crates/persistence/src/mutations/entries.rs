// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Production entry mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, info};

use crate::backend::get_last_insert_rowid;
use crate::data_models::{count_to_storage, time_to_storage, timestamp_to_storage};
use crate::diesel_schema::{loss_entries, production_entries};
use crate::error::PersistenceError;
use prodtrack_domain::ProductionEntry;

/// Inserts a production entry together with its losses.
///
/// The entry row and all loss rows are written in one transaction; if any
/// insert fails the whole entry is rolled back.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `entry` - The entry to insert (its `entry_id` is ignored)
///
/// # Returns
///
/// The entry ID assigned by the database.
///
/// # Errors
///
/// Returns an error if any insert fails.
pub fn insert_entry(
    conn: &mut SqliteConnection,
    entry: &ProductionEntry,
) -> Result<i64, PersistenceError> {
    info!(
        line = entry.line.number(),
        window = %entry.window.label(),
        losses = entry.losses.len(),
        "Inserting production entry"
    );

    let entry_id: i64 = conn.transaction::<i64, PersistenceError, _>(|conn| {
        diesel::insert_into(production_entries::table)
            .values((
                production_entries::recorded_at.eq(timestamp_to_storage(entry.recorded_at)),
                production_entries::line.eq(i32::from(entry.line.number())),
                production_entries::window_start.eq(time_to_storage(entry.window.start())),
                production_entries::window_end.eq(time_to_storage(entry.window.end())),
                production_entries::planned.eq(count_to_storage(entry.planned)?),
                production_entries::actual.eq(count_to_storage(entry.actual)?),
                production_entries::total_loss_minutes
                    .eq(count_to_storage(entry.total_loss_minutes)?),
            ))
            .execute(conn)?;

        let entry_id: i64 = get_last_insert_rowid(conn)?;
        insert_losses(conn, entry_id, entry)?;

        Ok(entry_id)
    })?;

    info!(entry_id, "Production entry inserted");

    Ok(entry_id)
}

/// Replaces a production entry's fields and its complete loss list.
///
/// Existing losses are removed and the submitted set is inserted in their
/// place, all in one transaction.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `entry_id` - The entry to update
/// * `entry` - The replacement field values and losses
///
/// # Errors
///
/// Returns `PersistenceError::EntryNotFound` if no entry has the given ID,
/// or another error if any statement fails.
pub fn update_entry(
    conn: &mut SqliteConnection,
    entry_id: i64,
    entry: &ProductionEntry,
) -> Result<(), PersistenceError> {
    info!(entry_id, "Updating production entry");

    conn.transaction::<(), PersistenceError, _>(|conn| {
        let updated: usize = diesel::update(production_entries::table)
            .filter(production_entries::entry_id.eq(entry_id))
            .set((
                production_entries::line.eq(i32::from(entry.line.number())),
                production_entries::window_start.eq(time_to_storage(entry.window.start())),
                production_entries::window_end.eq(time_to_storage(entry.window.end())),
                production_entries::planned.eq(count_to_storage(entry.planned)?),
                production_entries::actual.eq(count_to_storage(entry.actual)?),
                production_entries::total_loss_minutes
                    .eq(count_to_storage(entry.total_loss_minutes)?),
            ))
            .execute(conn)?;

        if updated == 0 {
            return Err(PersistenceError::EntryNotFound(entry_id));
        }

        // Remove existing losses, then insert the submitted set
        let removed: usize = diesel::delete(loss_entries::table)
            .filter(loss_entries::entry_id.eq(entry_id))
            .execute(conn)?;
        debug!(entry_id, removed, "Replaced existing losses");

        insert_losses(conn, entry_id, entry)?;

        Ok(())
    })?;

    info!(entry_id, "Production entry updated");

    Ok(())
}

/// Deletes a production entry.
///
/// The entry's losses are removed by the `ON DELETE CASCADE` foreign key.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `entry_id` - The entry to delete
///
/// # Errors
///
/// Returns `PersistenceError::EntryNotFound` if no entry has the given ID,
/// or another error if the delete fails.
pub fn delete_entry(conn: &mut SqliteConnection, entry_id: i64) -> Result<(), PersistenceError> {
    info!(entry_id, "Deleting production entry");

    let deleted: usize = diesel::delete(production_entries::table)
        .filter(production_entries::entry_id.eq(entry_id))
        .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::EntryNotFound(entry_id));
    }

    Ok(())
}

/// Inserts an entry's loss rows.
fn insert_losses(
    conn: &mut SqliteConnection,
    entry_id: i64,
    entry: &ProductionEntry,
) -> Result<(), PersistenceError> {
    for loss in &entry.losses {
        diesel::insert_into(loss_entries::table)
            .values((
                loss_entries::entry_id.eq(entry_id),
                loss_entries::reason.eq(&loss.reason),
                loss_entries::loss_minutes.eq(count_to_storage(loss.minutes)?),
                loss_entries::remarks.eq(loss.remarks.as_deref()),
            ))
            .execute(conn)?;
    }

    Ok(())
}
