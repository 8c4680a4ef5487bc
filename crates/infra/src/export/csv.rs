//! CSV export: one row per member with cost and balance.

use std::io;
use std::path::Path;

use csv::{Terminator, Writer, WriterBuilder};

use messmate_ledger::LedgerSummary;

use super::{ExportError, fixed2, plain_amount};

/// Default download name for the CSV export.
pub const CSV_FILE_NAME: &str = "meal_data.csv";

pub const CSV_HEADER: [&str; 5] = ["Name", "Deposit", "Meals", "Cost", "Balance"];

/// Write the summary as CSV into `writer`.
pub fn write_csv<W: io::Write>(summary: &LedgerSummary, writer: W) -> Result<(), ExportError> {
    let mut wtr = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);
    write_records(summary, &mut wtr)
}

/// Render the summary as a CSV string.
pub fn to_csv_string(summary: &LedgerSummary) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_csv(summary, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

/// Write the CSV export to a file, replacing it if present.
pub fn export_csv_to_path(summary: &LedgerSummary, path: &Path) -> Result<(), ExportError> {
    let mut wtr = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_path(path)?;
    write_records(summary, &mut wtr)?;
    tracing::info!(path = %path.display(), rows = summary.member_count(), "csv export written");
    Ok(())
}

fn write_records<W: io::Write>(
    summary: &LedgerSummary,
    wtr: &mut Writer<W>,
) -> Result<(), ExportError> {
    wtr.write_record(CSV_HEADER)?;
    for s in &summary.standings {
        wtr.write_record([
            s.name.clone(),
            plain_amount(s.deposit),
            plain_amount(s.meals),
            fixed2(s.cost),
            fixed2(s.balance),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use messmate_core::MemberId;
    use messmate_ledger::Member;

    fn member(id: u64, name: &str, deposit: f64, meals: f64) -> Member {
        Member {
            id: MemberId::new(id),
            name: name.to_string(),
            deposit,
            meals,
        }
    }

    #[test]
    fn csv_has_header_and_one_row_per_member() {
        let summary = LedgerSummary::compute(&[
            member(1, "Shahin", 100.0, 10.0),
            member(2, "Riyad", 0.0, 10.0),
        ]);

        let csv = to_csv_string(&summary).unwrap();

        assert_eq!(
            csv,
            "Name,Deposit,Meals,Cost,Balance\n\
             Shahin,100,10,50.00,50.00\n\
             Riyad,0,10,50.00,-50.00\n"
        );
    }

    #[test]
    fn empty_roster_exports_header_only() {
        let csv = to_csv_string(&LedgerSummary::compute(&[])).unwrap();
        assert_eq!(csv, "Name,Deposit,Meals,Cost,Balance\n");
    }

    #[test]
    fn names_with_commas_are_quoted() {
        let summary = LedgerSummary::compute(&[member(1, "Sheikh, Tushar", 0.0, 0.0)]);
        let csv = to_csv_string(&summary).unwrap();
        assert!(csv.contains("\"Sheikh, Tushar\",0,0,0.00,0.00\n"));
    }

    #[test]
    fn export_to_path_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CSV_FILE_NAME);
        let summary = LedgerSummary::compute(&[member(1, "Tarik", 30.0, 2.5)]);

        export_csv_to_path(&summary, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "Name,Deposit,Meals,Cost,Balance\nTarik,30,2.5,30.00,0.00\n");
    }
}
