// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.


use crate::{Line, LossDetail, ProductionEntry, ShiftWindow};
use chrono::NaiveDate;

pub fn create_test_window() -> ShiftWindow {
    ShiftWindow::parse("08:00", "16:00").unwrap()
}

pub fn create_test_entry(losses: Vec<LossDetail>) -> ProductionEntry {
    let recorded_at = NaiveDate::from_ymd_opt(2026, 3, 2)
        .unwrap()
        .and_hms_opt(8, 15, 0)
        .unwrap();
    ProductionEntry::new(
        recorded_at,
        Line::One,
        create_test_window(),
        500,
        480,
        20,
        losses,
    )
}
