// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::ProductionEntry;

/// Maximum length of a loss reason label, matching the storage column.
const MAX_REASON_LENGTH: usize = 50;

/// Validates that a production entry's field constraints are met.
///
/// Line and window invariants are enforced at construction time
/// (`Line::from_number`, `ShiftWindow::new`); counts and loss minutes are
/// unsigned by type. What remains to check here are the loss reason labels.
///
/// # Arguments
///
/// * `entry` - The entry to validate
///
/// # Returns
///
/// * `Ok(())` if the entry's fields are valid
/// * `Err(DomainError)` if any field is invalid
///
/// # Errors
///
/// Returns an error if any loss reason is empty or longer than 50 characters.
pub fn validate_entry_fields(entry: &ProductionEntry) -> Result<(), DomainError> {
    for loss in &entry.losses {
        // Rule: reason must not be empty
        if loss.reason.trim().is_empty() {
            return Err(DomainError::InvalidLossReason(String::from(
                "Reason cannot be empty",
            )));
        }

        // Rule: reason must fit the 50-character storage column
        if loss.reason.chars().count() > MAX_REASON_LENGTH {
            return Err(DomainError::InvalidLossReason(format!(
                "Reason must be at most {MAX_REASON_LENGTH} characters"
            )));
        }
    }

    Ok(())
}
