// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Translation between API requests/responses and domain entries.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::{ApiError, translate_domain_error};
use crate::request_response::{EntryRequest, EntryResponse, LossResponse};
use prodtrack_domain::{
    Line, LossDetail, ProductionEntry, ShiftWindow, parse_time_of_day, validate_entry_fields,
};

/// Parses a time field, attributing parse failures to the named request
/// field.
fn parse_time_field(field: &str, value: &str) -> Result<chrono::NaiveTime, ApiError> {
    parse_time_of_day(value).map_err(|err| match translate_domain_error(err) {
        ApiError::InvalidInput { message, .. } => ApiError::InvalidInput {
            field: field.to_string(),
            message,
        },
        other => other,
    })
}

/// Validates an API request and turns it into a domain production entry.
///
/// This function:
/// - Translates the API request into domain types
/// - Applies field defaults (`total_loss_time` 0, `losses` empty)
/// - Validates domain rules
/// - Translates any errors to API errors
///
/// # Arguments
///
/// * `request` - The API request to parse
/// * `recorded_at` - The server-side recording timestamp for the entry
///
/// # Returns
///
/// A validated, not-yet-persisted `ProductionEntry`.
///
/// # Errors
///
/// Returns an error if:
/// - The line number is not 1 or 2
/// - Either time is not a valid `HH:MM` string
/// - The window start does not precede its end
/// - Any loss reason is empty or longer than 50 characters
pub fn parse_entry_request(
    request: &EntryRequest,
    recorded_at: NaiveDateTime,
) -> Result<ProductionEntry, ApiError> {
    debug!(
        line_number = request.line_number,
        losses = request.losses.len(),
        "Parsing entry request"
    );

    // Translate API request into domain types
    let line: Line = Line::from_number(request.line_number).map_err(translate_domain_error)?;
    let from_time = parse_time_field("from_time", &request.from_time)?;
    let to_time = parse_time_field("to_time", &request.to_time)?;
    let window: ShiftWindow =
        ShiftWindow::new(from_time, to_time).map_err(translate_domain_error)?;

    let losses: Vec<LossDetail> = request
        .losses
        .iter()
        .map(|loss| LossDetail::new(loss.reason.clone(), loss.loss_time, loss.remarks.clone()))
        .collect();

    let entry: ProductionEntry = ProductionEntry::new(
        recorded_at,
        line,
        window,
        request.planned,
        request.actual,
        request.total_loss_time.unwrap_or(0),
        losses,
    );

    validate_entry_fields(&entry).map_err(translate_domain_error)?;

    Ok(entry)
}

/// Converts a stored domain entry into its API response form.
#[must_use]
pub fn entry_to_response(entry: &ProductionEntry) -> EntryResponse {
    EntryResponse {
        // Entries coming back from persistence always carry an ID.
        id: entry.entry_id.unwrap_or_default(),
        line_number: entry.line.number(),
        from_time: entry.window.start().format("%H:%M").to_string(),
        to_time: entry.window.end().format("%H:%M").to_string(),
        planned: entry.planned,
        actual: entry.actual,
        total_loss_time: entry.total_loss_minutes,
        losses: entry
            .losses
            .iter()
            .map(|loss| LossResponse {
                reason: loss.reason.clone(),
                loss_time: loss.minutes,
                remarks: loss.remarks.clone(),
            })
            .collect(),
    }
}
