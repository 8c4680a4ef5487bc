//! Exports of the derived ledger: CSV rows and the printable report.

pub mod csv;
pub mod report;

use thiserror::Error;

pub use report::{MealReport, REPORT_PDF_FILE_NAME, ReportRow};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("export is not valid utf-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("pdf error: {0}")]
    Pdf(String),
}

/// Shortest decimal form of an amount (`100`, `2.5`).
pub fn plain_amount(value: f64) -> String {
    // `+ 0.0` folds negative zero into zero.
    format!("{}", value + 0.0)
}

/// Amount with two decimals.
pub fn fixed2(value: f64) -> String {
    format!("{:.2}", value + 0.0)
}

/// Amount with two decimals and an explicit `+` for non-negative values.
pub fn signed_fixed2(value: f64) -> String {
    let value = value + 0.0;
    if value >= 0.0 {
        format!("+{value:.2}")
    } else {
        format!("{value:.2}")
    }
}
