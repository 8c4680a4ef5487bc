//! Printable meal report: stats block plus a member table.
//!
//! The report is built as plain data and rendered either as fixed-width text
//! or as an A4 PDF.

use std::path::Path;

use chrono::NaiveDate;
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rect, Rgb,
};
use serde::Serialize;

use messmate_ledger::LedgerSummary;

use super::{ExportError, fixed2, plain_amount, signed_fixed2};

pub const REPORT_TITLE: &str = "Mess Manager Report";

/// Default base file name for the report.
pub const REPORT_BASE_NAME: &str = "meal-report";

/// File name used by the PDF export.
pub const REPORT_PDF_FILE_NAME: &str = "meal-report.pdf";

pub const REPORT_COLUMNS: [&str; 5] = ["Member", "Deposit", "Meals", "Cost", "Balance"];

// A4 portrait, millimetres. Vertical positions below are measured from the top.
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 14.0;
const ROW_HEIGHT: f32 = 8.0;
const TABLE_TOP: f32 = 65.0;
const COLUMN_X: [f32; 5] = [14.0, 84.0, 114.0, 144.0, 174.0];

/// One formatted table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub name: String,
    pub deposit: String,
    pub meals: String,
    pub cost: String,
    /// Two decimals, `+` prefixed when non-negative.
    pub balance: String,
}

impl ReportRow {
    fn cells(&self) -> [&str; 5] {
        [&self.name, &self.deposit, &self.meals, &self.cost, &self.balance]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MealReport {
    pub title: String,
    pub generated_on: NaiveDate,
    pub total_deposit: String,
    pub total_meals: String,
    pub rate: String,
    pub rows: Vec<ReportRow>,
}

impl MealReport {
    pub fn build(summary: &LedgerSummary, generated_on: NaiveDate) -> Self {
        let rows = summary
            .standings
            .iter()
            .map(|s| ReportRow {
                name: s.name.clone(),
                deposit: plain_amount(s.deposit),
                meals: plain_amount(s.meals),
                cost: fixed2(s.cost),
                balance: signed_fixed2(s.balance),
            })
            .collect();

        Self {
            title: REPORT_TITLE.to_string(),
            generated_on,
            total_deposit: plain_amount(summary.total_deposit),
            total_meals: plain_amount(summary.total_meals),
            rate: fixed2(summary.meal_rate),
            rows,
        }
    }

    /// Render as a fixed-width text document.
    pub fn render_text(&self) -> String {
        let mut widths = REPORT_COLUMNS.map(str::len);
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(row.cells()) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');
        out.push_str(&format!("Generated: {}\n\n", self.generated_on.format("%Y-%m-%d")));
        out.push_str(&format!(
            "Total Deposit: {}    Total Meals: {}    Rate: {}\n\n",
            self.total_deposit, self.total_meals, self.rate
        ));

        push_line(&mut out, REPORT_COLUMNS, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_line(&mut out, rule.iter().map(String::as_str), &widths);
        for row in &self.rows {
            push_line(&mut out, row.cells(), &widths);
        }

        out
    }

    /// Render as a PDF document: title, date, shaded stats block, then the
    /// member table, continuing on new pages as needed.
    pub fn render_pdf(&self) -> Result<Vec<u8>, ExportError> {
        let (doc, page, layer) =
            PdfDocument::new(&self.title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "report");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(pdf_error)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_error)?;
        let mut canvas = doc.get_page(page).get_layer(layer);

        canvas.use_text(self.title.as_str(), 20.0, Mm(MARGIN), top(20.0), &bold);
        canvas.use_text(
            format!("Generated: {}", self.generated_on.format("%Y-%m-%d")),
            10.0,
            Mm(MARGIN),
            top(28.0),
            &regular,
        );

        canvas.set_fill_color(grey(0.94));
        canvas.add_rect(
            Rect::new(Mm(MARGIN), top(55.0), Mm(PAGE_WIDTH - MARGIN), top(35.0))
                .with_mode(PaintMode::Fill),
        );
        canvas.set_fill_color(grey(0.0));
        canvas.use_text(
            format!(
                "Total Deposit: {}    Total Meals: {}    Rate: {}",
                self.total_deposit, self.total_meals, self.rate
            ),
            12.0,
            Mm(MARGIN + 6.0),
            top(47.0),
            &regular,
        );

        let mut y = TABLE_TOP;
        table_row(&canvas, REPORT_COLUMNS, y, &bold);
        for row in &self.rows {
            y += ROW_HEIGHT;
            if y > PAGE_HEIGHT - MARGIN {
                canvas = next_page(&doc);
                y = MARGIN + ROW_HEIGHT;
                table_row(&canvas, REPORT_COLUMNS, y, &bold);
                y += ROW_HEIGHT;
            }
            table_row(&canvas, row.cells(), y, &regular);
        }

        doc.save_to_bytes().map_err(pdf_error)
    }

    /// Write the PDF rendering to `path`.
    pub fn write_pdf_to_path(&self, path: &Path) -> Result<(), ExportError> {
        std::fs::write(path, self.render_pdf()?)?;
        tracing::info!(path = %path.display(), rows = self.rows.len(), "pdf report written");
        Ok(())
    }

    /// Write the text rendering to `path`.
    pub fn write_text_to_path(&self, path: &Path) -> Result<(), ExportError> {
        std::fs::write(path, self.render_text())?;
        tracing::info!(path = %path.display(), rows = self.rows.len(), "report written");
        Ok(())
    }
}

fn top(offset: f32) -> Mm {
    Mm(PAGE_HEIGHT - offset)
}

fn grey(level: f32) -> Color {
    Color::Rgb(Rgb::new(level, level, level, None))
}

fn pdf_error(err: printpdf::Error) -> ExportError {
    ExportError::Pdf(format!("{err:?}"))
}

fn next_page(doc: &PdfDocumentReference) -> PdfLayerReference {
    let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "report");
    doc.get_page(page).get_layer(layer)
}

fn table_row(canvas: &PdfLayerReference, cells: [&str; 5], y: f32, font: &IndirectFontRef) {
    for (cell, x) in cells.into_iter().zip(COLUMN_X) {
        canvas.use_text(cell, 10.0, Mm(x), top(y), font);
    }
}

/// First column left-aligned, numeric columns right-aligned.
fn push_line<'a>(out: &mut String, cells: impl IntoIterator<Item = &'a str>, widths: &[usize; 5]) {
    let line: Vec<String> = cells
        .into_iter()
        .zip(widths.iter().copied())
        .enumerate()
        .map(|(idx, (cell, w))| {
            if idx == 0 {
                format!("{cell:<w$}")
            } else {
                format!("{cell:>w$}")
            }
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}
