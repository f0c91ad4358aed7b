// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the production tracking service.
//!
//! Request and response types here are distinct from domain types and
//! represent the API contract; domain errors are translated explicitly so
//! they are never leaked directly to callers.

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

mod error;
mod handlers;
mod request_response;

pub use error::{ApiError, translate_domain_error};
pub use handlers::{entry_to_response, parse_entry_request};
pub use request_response::{EntryRequest, EntryResponse, LossRequest, LossResponse};
