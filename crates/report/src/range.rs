// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{Datelike, Duration, NaiveDate};

/// The report periods the service can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Today only.
    Daily,
    /// Monday of the current week through today.
    Weekly,
}

impl ReportKind {
    /// Resolves this kind into a concrete date range relative to `today`.
    #[must_use]
    pub fn range(self, today: NaiveDate) -> ReportRange {
        match self {
            Self::Daily => ReportRange {
                start: today,
                end: today,
            },
            Self::Weekly => ReportRange {
                start: today
                    - Duration::days(i64::from(today.weekday().num_days_from_monday())),
                end: today,
            },
        }
    }
}

/// An inclusive date range covered by a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRange {
    /// The first date of the range.
    pub start: NaiveDate,
    /// The last date of the range.
    pub end: NaiveDate,
}

impl ReportRange {
    /// The range as it appears in the report title, e.g.
    /// `2026-03-02 to 2026-03-04`.
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "{} to {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }

    /// The download filename for the rendered document.
    #[must_use]
    pub fn filename(&self) -> String {
        format!(
            "production_report_{}_{}.pdf",
            self.start.format("%Y%m%d"),
            self.end.format("%Y%m%d")
        )
    }
}
