// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::NaiveTime;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The line identifier is outside the fixed set of production lines.
    InvalidLine(u8),
    /// A shift window's start does not precede its end.
    InvalidShiftWindow {
        /// The window start time.
        start: NaiveTime,
        /// The window end time.
        end: NaiveTime,
    },
    /// A time-of-day string could not be parsed as `HH:MM`.
    TimeParseError {
        /// The invalid time string.
        value: String,
        /// The parsing error message.
        error: String,
    },
    /// A loss reason label is empty or too long.
    InvalidLossReason(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLine(line) => {
                write!(f, "Invalid line number {line}: must be 1 or 2")
            }
            Self::InvalidShiftWindow { start, end } => {
                write!(
                    f,
                    "Invalid shift window: start {} must precede end {}",
                    start.format("%H:%M"),
                    end.format("%H:%M")
                )
            }
            Self::TimeParseError { value, error } => {
                write!(f, "Failed to parse time '{value}': {error}")
            }
            Self::InvalidLossReason(msg) => write!(f, "Invalid loss reason: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}
