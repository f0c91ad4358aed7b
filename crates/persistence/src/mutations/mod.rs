// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the persistence layer.
//!
//! Multi-statement mutations run inside a single transaction, so a failure
//! anywhere in a request rolls back everything that request wrote.

pub mod entries;

pub use entries::{delete_entry, insert_entry, update_entry};
