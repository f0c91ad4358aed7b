// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Report aggregation.
//!
//! Groups production entries by line and calendar date, sums planned and
//! actual counts and loss minutes, and breaks losses down per reason with
//! their individual occurrences. `BTreeMap` keys keep dates and reasons in
//! sorted order so the rendered output is deterministic.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use prodtrack_domain::{Line, ProductionEntry};

/// One downtime occurrence of a reason within a (line, date) bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LossOccurrence {
    /// The shift window the loss was recorded in, as `HH:MM-HH:MM`.
    pub time_range: String,
    /// Minutes lost in this occurrence.
    pub minutes: u32,
    /// Optional free-text remarks.
    pub remarks: Option<String>,
}

/// Accumulated downtime for one reason within a (line, date) bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReasonBreakdown {
    /// Total minutes across all occurrences of this reason.
    pub total_minutes: u64,
    /// The individual occurrences, in entry order.
    pub occurrences: Vec<LossOccurrence>,
}

/// Accumulated production figures for one (line, date) bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyTotals {
    /// Sum of planned counts.
    pub planned: u64,
    /// Sum of actual counts.
    pub actual: u64,
    /// Sum of total loss minutes.
    pub total_loss_minutes: u64,
    /// Downtime per reason, keyed by reason label.
    pub losses: BTreeMap<String, ReasonBreakdown>,
}

/// The aggregated report over a date range.
///
/// Every production line has an entry, even when it recorded nothing in the
/// range; the per-line map is keyed by date in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductionReport {
    lines: BTreeMap<Line, BTreeMap<NaiveDate, DailyTotals>>,
}

impl ProductionReport {
    /// The per-date totals for a line, in date order.
    #[must_use]
    pub fn line_days(&self, line: Line) -> &BTreeMap<NaiveDate, DailyTotals> {
        // Both lines are seeded at construction, so the key always exists.
        static EMPTY: BTreeMap<NaiveDate, DailyTotals> = BTreeMap::new();
        self.lines.get(&line).unwrap_or(&EMPTY)
    }

    /// Whether no entries at all fell inside the range.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.values().all(BTreeMap::is_empty)
    }
}

/// Builds the aggregated report from an already-fetched list of entries.
///
/// A single pass: each entry lands in its (line, date) bucket, where its
/// counts are accumulated and its losses folded into the per-reason
/// breakdown with a `(window, minutes, remarks)` occurrence each.
#[must_use]
pub fn build_report(entries: &[ProductionEntry]) -> ProductionReport {
    let mut lines: BTreeMap<Line, BTreeMap<NaiveDate, DailyTotals>> = Line::ALL
        .into_iter()
        .map(|line| (line, BTreeMap::new()))
        .collect();

    for entry in entries {
        let date: NaiveDate = entry.recorded_at.date();
        let daily: &mut DailyTotals = lines
            .entry(entry.line)
            .or_default()
            .entry(date)
            .or_default();

        daily.planned += u64::from(entry.planned);
        daily.actual += u64::from(entry.actual);
        daily.total_loss_minutes += u64::from(entry.total_loss_minutes);

        for loss in &entry.losses {
            let breakdown: &mut ReasonBreakdown =
                daily.losses.entry(loss.reason.clone()).or_default();
            breakdown.total_minutes += u64::from(loss.minutes);
            breakdown.occurrences.push(LossOccurrence {
                time_range: entry.window.label(),
                minutes: loss.minutes,
                remarks: loss.remarks.clone(),
            });
        }
    }

    ProductionReport { lines }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use prodtrack_domain::{LossDetail, ShiftWindow};

    fn timestamp(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn entry(
        line: Line,
        day: u32,
        window: (&str, &str),
        planned: u32,
        actual: u32,
        loss_minutes: u32,
        losses: Vec<LossDetail>,
    ) -> ProductionEntry {
        ProductionEntry::new(
            timestamp(day, 9),
            line,
            ShiftWindow::parse(window.0, window.1).unwrap(),
            planned,
            actual,
            loss_minutes,
            losses,
        )
    }

    #[test]
    fn test_empty_input_produces_empty_report_with_both_lines() {
        let report: ProductionReport = build_report(&[]);

        assert!(report.is_empty());
        assert!(report.line_days(Line::One).is_empty());
        assert!(report.line_days(Line::Two).is_empty());
    }

    #[test]
    fn test_counts_accumulate_per_line_and_date() {
        let entries = vec![
            entry(Line::One, 2, ("08:00", "16:00"), 500, 480, 20, Vec::new()),
            entry(Line::One, 2, ("16:00", "23:30"), 400, 395, 5, Vec::new()),
            entry(Line::One, 3, ("08:00", "16:00"), 500, 500, 0, Vec::new()),
            entry(Line::Two, 2, ("08:00", "16:00"), 300, 290, 10, Vec::new()),
        ];

        let report: ProductionReport = build_report(&entries);

        let line1 = report.line_days(Line::One);
        assert_eq!(line1.len(), 2);

        let monday = &line1[&NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()];
        assert_eq!(monday.planned, 900);
        assert_eq!(monday.actual, 875);
        assert_eq!(monday.total_loss_minutes, 25);

        let tuesday = &line1[&NaiveDate::from_ymd_opt(2026, 3, 3).unwrap()];
        assert_eq!(tuesday.planned, 500);

        let line2 = report.line_days(Line::Two);
        assert_eq!(line2.len(), 1);
        assert_eq!(
            line2[&NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()].planned,
            300
        );
    }

    #[test]
    fn test_losses_group_by_reason_across_entries() {
        let entries = vec![
            entry(
                Line::One,
                2,
                ("08:00", "16:00"),
                500,
                470,
                30,
                vec![
                    LossDetail::new(String::from("Changeover"), 20, None),
                    LossDetail::new(String::from("Jam"), 10, Some(String::from("feeder 3"))),
                ],
            ),
            entry(
                Line::One,
                2,
                ("16:00", "23:30"),
                400,
                385,
                15,
                vec![LossDetail::new(String::from("Changeover"), 15, None)],
            ),
        ];

        let report: ProductionReport = build_report(&entries);
        let monday =
            &report.line_days(Line::One)[&NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()];

        assert_eq!(monday.losses.len(), 2);

        let changeover: &ReasonBreakdown = &monday.losses["Changeover"];
        assert_eq!(changeover.total_minutes, 35);
        assert_eq!(changeover.occurrences.len(), 2);
        assert_eq!(changeover.occurrences[0].time_range, "08:00-16:00");
        assert_eq!(changeover.occurrences[1].time_range, "16:00-23:30");

        let jam: &ReasonBreakdown = &monday.losses["Jam"];
        assert_eq!(jam.total_minutes, 10);
        assert_eq!(jam.occurrences[0].remarks.as_deref(), Some("feeder 3"));
    }

    #[test]
    fn test_dates_iterate_in_ascending_order() {
        let entries = vec![
            entry(Line::One, 5, ("08:00", "16:00"), 100, 100, 0, Vec::new()),
            entry(Line::One, 2, ("08:00", "16:00"), 100, 100, 0, Vec::new()),
            entry(Line::One, 3, ("08:00", "16:00"), 100, 100, 0, Vec::new()),
        ];

        let report: ProductionReport = build_report(&entries);
        let dates: Vec<NaiveDate> = report.line_days(Line::One).keys().copied().collect();

        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
                NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(),
                NaiveDate::from_ymd_opt(2026, 3, 5).unwrap(),
            ]
        );
    }

    #[test]
    fn test_reasons_iterate_in_sorted_order() {
        let entries = vec![entry(
            Line::Two,
            2,
            ("08:00", "16:00"),
            500,
            460,
            40,
            vec![
                LossDetail::new(String::from("Power dip"), 10, None),
                LossDetail::new(String::from("Changeover"), 20, None),
                LossDetail::new(String::from("Jam"), 10, None),
            ],
        )];

        let report: ProductionReport = build_report(&entries);
        let monday =
            &report.line_days(Line::Two)[&NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()];
        let reasons: Vec<&String> = monday.losses.keys().collect();

        assert_eq!(reasons, vec!["Changeover", "Jam", "Power dip"]);
    }
}
