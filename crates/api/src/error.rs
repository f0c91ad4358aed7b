// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use prodtrack_domain::DomainError;

/// API-level errors.
///
/// These are distinct from domain errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly. Parse failures map onto the request field they came from;
/// rule breaks carry the violated rule's name.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidLine(line) => ApiError::InvalidInput {
            field: String::from("line_number"),
            message: format!("Line must be 1 or 2, got {line}"),
        },
        DomainError::TimeParseError { value, error } => ApiError::InvalidInput {
            field: String::from("time"),
            message: format!("'{value}' is not a valid HH:MM time: {error}"),
        },
        DomainError::InvalidShiftWindow { start, end } => ApiError::DomainRuleViolation {
            rule: String::from("window_order"),
            message: format!(
                "from_time {} must precede to_time {}",
                start.format("%H:%M"),
                end.format("%H:%M")
            ),
        },
        DomainError::InvalidLossReason(msg) => ApiError::DomainRuleViolation {
            rule: String::from("loss_reason"),
            message: msg,
        },
    }
}
