// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! PDF rendering for aggregated production reports.
//!
//! Layout is done by hand on top of `pdf-writer`: a cursor walks down the
//! page, tables draw row by row, and a new page is started whenever the
//! next element would not fit. The document is produced entirely in memory
//! so the server can stream it without touching the filesystem.

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

use crate::aggregate::{DailyTotals, ProductionReport};
use crate::range::ReportRange;
use prodtrack_domain::Line;

// US Letter, in points.
const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 50.0;
const ROW_HEIGHT: f32 = 20.0;

const BODY_SIZE: f32 = 10.0;
const HEADER_SIZE: f32 = 11.0;
const SECTION_SIZE: f32 = 14.0;
const TITLE_SIZE: f32 = 16.0;

/// One table row: its cell texts and whether it is an emphasized summary
/// row (bold, shaded).
struct TableRow {
    cells: Vec<String>,
    emphasis: bool,
}

/// Incremental PDF document builder with a vertical layout cursor.
struct PdfDocument {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    font_id: Ref,
    bold_font_id: Ref,
    page_refs: Vec<Ref>,
    content: Content,
    content_id: Ref,
    page_open: bool,
    next_id: i32,
    y: f32,
}

impl PdfDocument {
    fn new() -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let bold_font_id = Ref::new(4);

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));
        pdf.type1_font(bold_font_id)
            .base_font(Name(b"Helvetica-Bold"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            font_id,
            bold_font_id,
            page_refs: Vec::new(),
            content: Content::new(),
            content_id: Ref::new(5),
            page_open: false,
            next_id: 5,
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    /// Generates a fresh unique object reference.
    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    /// Writes out the current page's content stream.
    fn close_page(&mut self) {
        if self.page_open {
            let content: Content = std::mem::replace(&mut self.content, Content::new());
            self.pdf.stream(self.content_id, &content.finish());
            self.page_open = false;
        }
    }

    /// Starts a new page and resets the layout cursor to the top.
    fn begin_page(&mut self) {
        self.close_page();

        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();
        self.page_refs.push(page_id);
        self.content_id = content_id;

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT))
            .contents(content_id);
        let mut resources = page.resources();
        let mut fonts = resources.fonts();
        fonts.pair(Name(b"F1"), self.font_id);
        fonts.pair(Name(b"F2"), self.bold_font_id);
        drop(fonts);
        drop(resources);
        drop(page);

        self.content = Content::new();
        self.page_open = true;
        self.y = PAGE_HEIGHT - MARGIN;

        // Page number, bottom right
        let label = format!("Page {}", self.page_refs.len());
        self.draw_text(PAGE_WIDTH - MARGIN - 60.0, MARGIN - 35.0, BODY_SIZE, false, &label);
    }

    /// Starts a new page if the next `needed` points of height do not fit.
    fn ensure_space(&mut self, needed: f32) {
        if self.y - needed < MARGIN {
            self.begin_page();
        }
    }

    fn draw_text(&mut self, x: f32, y: f32, size: f32, bold: bool, text: &str) {
        let font: Name<'_> = if bold { Name(b"F2") } else { Name(b"F1") };
        self.content.begin_text();
        self.content.set_font(font, size);
        self.content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        self.content.show(Str(text.as_bytes()));
        self.content.end_text();
    }

    fn draw_cell_borders(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.content.save_state();
        self.content.set_stroke_rgb(0.65, 0.65, 0.65);
        self.content.rect(x, y, w, h);
        self.content.stroke();
        self.content.restore_state();
    }

    /// Fills the full table width at the current row position.
    fn fill_row(&mut self, width: f32, r: f32, g: f32, b: f32) {
        self.content.save_state();
        self.content.set_fill_rgb(r, g, b);
        self.content.rect(MARGIN, self.y - ROW_HEIGHT, width, ROW_HEIGHT);
        self.content.fill_nonzero();
        self.content.restore_state();
    }

    fn draw_cells(&mut self, col_widths: &[f32], cells: &[String], size: f32, bold: bool) {
        let row_y: f32 = self.y - ROW_HEIGHT;
        let mut x: f32 = MARGIN;
        for (i, text) in cells.iter().enumerate() {
            let w: f32 = col_widths[i];
            self.draw_text(x + 4.0, row_y + 5.0, size, bold, text);
            self.draw_cell_borders(x, row_y, w, ROW_HEIGHT);
            x += w;
        }
        self.y = row_y;
    }

    fn draw_header_row(&mut self, col_widths: &[f32], headers: &[&str]) {
        let total: f32 = col_widths.iter().sum();
        self.fill_row(total, 0.85, 0.87, 0.90);
        let cells: Vec<String> = headers.iter().map(ToString::to_string).collect();
        self.draw_cells(col_widths, &cells, HEADER_SIZE, true);
    }

    /// Draws a heading line in bold.
    fn heading(&mut self, size: f32, text: &str) {
        self.ensure_space(size + 10.0);
        self.y -= size;
        let y: f32 = self.y;
        self.draw_text(MARGIN, y, size, true, text);
        self.y -= 10.0;
    }

    fn spacer(&mut self, height: f32) {
        self.y -= height;
    }

    /// Draws a table, breaking onto fresh pages (with the header row
    /// repeated) as needed.
    fn table(&mut self, headers: &[&str], rows: &[TableRow]) {
        let col_widths: Vec<f32> = compute_col_widths(headers, rows);
        let total: f32 = col_widths.iter().sum();

        // Header plus at least one row must fit before we start
        self.ensure_space(2.0 * ROW_HEIGHT);
        self.draw_header_row(&col_widths, headers);

        let mut stripe = false;
        for row in rows {
            if self.y - ROW_HEIGHT < MARGIN {
                self.begin_page();
                self.draw_header_row(&col_widths, headers);
            }

            if row.emphasis {
                self.fill_row(total, 0.90, 0.90, 0.90);
            } else if stripe {
                self.fill_row(total, 0.96, 0.96, 0.96);
            }
            self.draw_cells(&col_widths, &row.cells, BODY_SIZE, row.emphasis);
            stripe = !stripe;
        }
    }

    /// Finishes the document and returns the PDF bytes.
    fn finish(mut self) -> Vec<u8> {
        self.close_page();

        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        let count: i32 = i32::try_from(self.page_refs.len()).unwrap_or(i32::MAX);
        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(count);
        pages.kids(self.page_refs.clone());
        drop(pages);

        self.pdf.finish()
    }
}

/// Column widths sized to header and content lengths, scaled down to the
/// printable page width when they would overflow it.
#[allow(clippy::cast_precision_loss)]
fn compute_col_widths(headers: &[&str], rows: &[TableRow]) -> Vec<f32> {
    let mut widths: Vec<f32> = headers.iter().map(|h| h.len() as f32 * 6.5 + 8.0).collect();

    for row in rows {
        for (i, cell) in row.cells.iter().enumerate() {
            let w: f32 = (cell.len() as f32).mul_add(6.2, 8.0).max(widths[i]);
            widths[i] = w;
        }
    }

    let total: f32 = widths.iter().sum();
    let max: f32 = 2.0f32.mul_add(-MARGIN, PAGE_WIDTH);

    if total > max {
        let scale: f32 = max / total;
        for w in &mut widths {
            *w *= scale;
        }
    }

    widths
}

/// Builds the loss-details rows for one (line, date) bucket: one row per
/// occurrence, followed by a bold summary row per reason.
fn loss_rows(daily: &DailyTotals) -> Vec<TableRow> {
    let mut rows: Vec<TableRow> = Vec::new();

    for (reason, breakdown) in &daily.losses {
        for occurrence in &breakdown.occurrences {
            rows.push(TableRow {
                cells: vec![
                    reason.clone(),
                    occurrence.time_range.clone(),
                    format!("{} min", occurrence.minutes),
                    occurrence.remarks.clone().unwrap_or_default(),
                ],
                emphasis: false,
            });
        }

        rows.push(TableRow {
            cells: vec![
                format!("Total for {reason}"),
                String::new(),
                format!("{} min", breakdown.total_minutes),
                String::new(),
            ],
            emphasis: true,
        });
    }

    rows
}

/// Renders an aggregated report over the given range into PDF bytes.
///
/// The document carries a title with the date range, one section per
/// production line, and per date a summary table plus (when the bucket has
/// losses) a loss-details table.
#[must_use]
pub fn render_pdf(report: &ProductionReport, range: &ReportRange) -> Vec<u8> {
    let mut doc = PdfDocument::new();
    doc.begin_page();

    doc.heading(
        TITLE_SIZE,
        &format!("Production Report ({})", range.label()),
    );
    doc.spacer(15.0);

    for line in Line::ALL {
        doc.heading(SECTION_SIZE, &line.to_string());

        for (date, daily) in report.line_days(line) {
            let summary = TableRow {
                cells: vec![
                    date.format("%Y-%m-%d").to_string(),
                    daily.planned.to_string(),
                    daily.actual.to_string(),
                    format!("{} min", daily.total_loss_minutes),
                ],
                emphasis: false,
            };
            doc.table(&["Date", "Planned", "Actual", "Total Loss Time"], &[summary]);
            doc.spacer(10.0);

            if !daily.losses.is_empty() {
                doc.heading(SECTION_SIZE - 2.0, "Loss Details");
                doc.table(
                    &["Loss Reason", "Time Range", "Duration", "Remarks"],
                    &loss_rows(daily),
                );
                doc.spacer(10.0);
            }

            doc.spacer(10.0);
        }

        doc.spacer(15.0);
    }

    doc.finish()
}
