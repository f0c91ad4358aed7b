// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.


use chrono::{NaiveDate, NaiveDateTime};
use prodtrack_domain::{Line, LossDetail, ProductionEntry, ShiftWindow};

pub fn create_test_timestamp(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    date.and_hms_opt(hour, minute, 0).unwrap()
}

pub fn create_test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

pub fn create_test_losses() -> Vec<LossDetail> {
    vec![
        LossDetail::new(String::from("Changeover"), 15, None),
        LossDetail::new(
            String::from("Material shortage"),
            10,
            Some(String::from("waiting on resin")),
        ),
    ]
}

pub fn create_test_entry(line: Line, start: &str, end: &str) -> ProductionEntry {
    ProductionEntry::new(
        create_test_timestamp(create_test_date(), 8, 15),
        line,
        ShiftWindow::parse(start, end).unwrap(),
        500,
        480,
        25,
        create_test_losses(),
    )
}
