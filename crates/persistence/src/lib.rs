// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the production tracking service.
//!
//! This crate provides database persistence for production entries and their
//! loss records. It is built on Diesel over `SQLite`.
//!
//! ## Backend
//!
//! `SQLite` is the only backend:
//! - In-memory databases back unit and integration tests (fast and
//!   deterministic, no external infrastructure)
//! - File-based databases back deployments, with WAL mode enabled for
//!   better read concurrency
//!
//! Foreign key enforcement is verified at connection time because the
//! entry → loss cascade delete depends on it.
//!
//! ## Testing Philosophy
//!
//! - Standard tests (`cargo test`) run against in-memory `SQLite` only
//! - Each test gets its own uniquely named shared-memory database

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use chrono::NaiveDate;
use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use prodtrack_domain::ProductionEntry;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for production entries and their losses.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Create a unique shared in-memory database name per call so tests are isolated.
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::initialize_database(&shared_memory_url)?;

        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::initialize_database(path_str)?;

        // Enable WAL mode for better read concurrency
        backend::enable_wal_mode(&mut conn)?;

        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// This is a startup-time check: the cascade from production entries to
    /// their losses requires referential integrity to be enforced.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Inserts a production entry together with its losses in one
    /// transaction.
    ///
    /// # Arguments
    ///
    /// * `entry` - The entry to insert (its `entry_id` is ignored)
    ///
    /// # Returns
    ///
    /// The entry ID assigned by the database.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails; nothing is written in that
    /// case.
    pub fn insert_entry(&mut self, entry: &ProductionEntry) -> Result<i64, PersistenceError> {
        mutations::insert_entry(&mut self.conn, entry)
    }

    /// Replaces a production entry's fields and its complete loss list in
    /// one transaction.
    ///
    /// # Arguments
    ///
    /// * `entry_id` - The entry to update
    /// * `entry` - The replacement field values and losses
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::EntryNotFound` if no entry has the given
    /// ID, or another error if the update fails; nothing is changed in
    /// either case.
    pub fn update_entry(
        &mut self,
        entry_id: i64,
        entry: &ProductionEntry,
    ) -> Result<(), PersistenceError> {
        mutations::update_entry(&mut self.conn, entry_id, entry)
    }

    /// Deletes a production entry; its losses are removed by cascade.
    ///
    /// # Arguments
    ///
    /// * `entry_id` - The entry to delete
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::EntryNotFound` if no entry has the given
    /// ID, or another error if the delete fails.
    pub fn delete_entry(&mut self, entry_id: i64) -> Result<(), PersistenceError> {
        mutations::delete_entry(&mut self.conn, entry_id)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Retrieves a production entry with its losses by ID.
    ///
    /// # Arguments
    ///
    /// * `entry_id` - The entry ID to retrieve
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::EntryNotFound` if no entry has the given
    /// ID, or another error if the query fails.
    pub fn get_entry(&mut self, entry_id: i64) -> Result<ProductionEntry, PersistenceError> {
        queries::get_entry(&mut self.conn, entry_id)
    }

    /// Retrieves all entries recorded on a given date, ordered by window
    /// start.
    ///
    /// # Arguments
    ///
    /// * `date` - The calendar date to filter on
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn entries_for_date(
        &mut self,
        date: NaiveDate,
    ) -> Result<Vec<ProductionEntry>, PersistenceError> {
        queries::entries_for_date(&mut self.conn, date)
    }

    /// Retrieves all entries recorded in the inclusive date range
    /// `[start, end]`, ordered by line then recording time.
    ///
    /// # Arguments
    ///
    /// * `start` - The first date of the range
    /// * `end` - The last date of the range
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn entries_between(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ProductionEntry>, PersistenceError> {
        queries::entries_between(&mut self.conn, start, end)
    }
}
