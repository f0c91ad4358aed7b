// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A production line identifier.
///
/// The plant runs exactly two lines; the identifier is a closed set rather
/// than a free integer so an out-of-range line cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Line {
    /// Production line 1.
    One,
    /// Production line 2.
    Two,
}

impl Line {
    /// All lines, in display order. Reports iterate this so every line gets
    /// a section even when it recorded nothing.
    pub const ALL: [Self; 2] = [Self::One, Self::Two];

    /// Parses a line from its numeric identifier.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidLine` if the number is not 1 or 2.
    pub const fn from_number(number: u8) -> Result<Self, DomainError> {
        match number {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(DomainError::InvalidLine(other)),
        }
    }

    /// Returns the numeric identifier for this line.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Line {}", self.number())
    }
}

/// The time window a production entry covers, within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftWindow {
    start: NaiveTime,
    end: NaiveTime,
}

impl ShiftWindow {
    /// Creates a shift window.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidShiftWindow` if `start` does not
    /// precede `end`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, DomainError> {
        if start >= end {
            return Err(DomainError::InvalidShiftWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parses a shift window from a pair of `HH:MM` strings.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::TimeParseError` if either string is not a valid
    /// `HH:MM` time, or `DomainError::InvalidShiftWindow` if the parsed
    /// start does not precede the end.
    pub fn parse(start: &str, end: &str) -> Result<Self, DomainError> {
        let start_time: NaiveTime = parse_time_of_day(start)?;
        let end_time: NaiveTime = parse_time_of_day(end)?;
        Self::new(start_time, end_time)
    }

    /// The window start time.
    #[must_use]
    pub const fn start(&self) -> NaiveTime {
        self.start
    }

    /// The window end time.
    #[must_use]
    pub const fn end(&self) -> NaiveTime {
        self.end
    }

    /// Formats the window as `HH:MM-HH:MM` for display and report rows.
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// Parses an `HH:MM` time-of-day string.
///
/// # Errors
///
/// Returns `DomainError::TimeParseError` if the string is not a valid
/// `HH:MM` time.
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime, DomainError> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|e| DomainError::TimeParseError {
        value: value.to_string(),
        error: e.to_string(),
    })
}

/// A single downtime cause recorded against a production entry's window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LossDetail {
    /// The reason label (e.g. "Changeover", "Material shortage").
    pub reason: String,
    /// Minutes lost to this cause. Unsigned, so negative losses cannot
    /// be represented.
    pub minutes: u32,
    /// Optional free-text remarks.
    pub remarks: Option<String>,
}

impl LossDetail {
    /// Creates a loss detail.
    #[must_use]
    pub const fn new(reason: String, minutes: u32, remarks: Option<String>) -> Self {
        Self {
            reason,
            minutes,
            remarks,
        }
    }
}

/// One recorded production time window with its downtime causes.
///
/// An entry has a canonical numeric ID (`entry_id`) assigned by the
/// database; `None` indicates the entry has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionEntry {
    /// The canonical numeric identifier assigned by the database.
    pub entry_id: Option<i64>,
    /// When the entry was recorded.
    pub recorded_at: NaiveDateTime,
    /// The production line this entry belongs to.
    pub line: Line,
    /// The time window the counts cover.
    pub window: ShiftWindow,
    /// Planned output count for the window.
    pub planned: u32,
    /// Actual output count for the window.
    pub actual: u32,
    /// Total minutes of downtime in the window.
    pub total_loss_minutes: u32,
    /// Downtime causes within the window. Losses belong to exactly this
    /// entry and are deleted with it.
    pub losses: Vec<LossDetail>,
}

impl ProductionEntry {
    /// Creates a new, not-yet-persisted production entry.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        recorded_at: NaiveDateTime,
        line: Line,
        window: ShiftWindow,
        planned: u32,
        actual: u32,
        total_loss_minutes: u32,
        losses: Vec<LossDetail>,
    ) -> Self {
        Self {
            entry_id: None,
            recorded_at,
            line,
            window,
            planned,
            actual,
            total_loss_minutes,
            losses,
        }
    }

    /// Returns a copy of this entry carrying a database-assigned ID.
    #[must_use]
    pub fn with_id(mut self, entry_id: i64) -> Self {
        self.entry_id = Some(entry_id);
        self
    }
}
