// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response types.
//!
//! These DTOs are distinct from domain types and represent the API
//! contract. Field names follow the wire format (`line_number`,
//! `from_time`, `loss_time`, …).

/// API request to create or replace a production entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRequest {
    /// The production line number (1 or 2).
    pub line_number: u8,
    /// The window start time as `HH:MM`.
    pub from_time: String,
    /// The window end time as `HH:MM`.
    pub to_time: String,
    /// Planned output count for the window.
    pub planned: u32,
    /// Actual output count for the window.
    pub actual: u32,
    /// Total downtime minutes for the window; defaults to 0 when omitted.
    pub total_loss_time: Option<u32>,
    /// Downtime causes within the window; defaults to empty when omitted.
    pub losses: Vec<LossRequest>,
}

/// One downtime cause within an entry request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LossRequest {
    /// The reason label.
    pub reason: String,
    /// Minutes lost to this cause.
    pub loss_time: u32,
    /// Optional free-text remarks.
    pub remarks: Option<String>,
}

/// API response describing a stored production entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryResponse {
    /// The entry's database identifier.
    pub id: i64,
    /// The production line number (1 or 2).
    pub line_number: u8,
    /// The window start time as `HH:MM`.
    pub from_time: String,
    /// The window end time as `HH:MM`.
    pub to_time: String,
    /// Planned output count.
    pub planned: u32,
    /// Actual output count.
    pub actual: u32,
    /// Total downtime minutes.
    pub total_loss_time: u32,
    /// Downtime causes within the window.
    pub losses: Vec<LossResponse>,
}

/// One downtime cause within an entry response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LossResponse {
    /// The reason label.
    pub reason: String,
    /// Minutes lost to this cause.
    pub loss_time: u32,
    /// Optional free-text remarks.
    pub remarks: Option<String>,
}
