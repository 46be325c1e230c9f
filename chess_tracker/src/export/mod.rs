//! CSV export of tournament results.
//!
//! Two shapes: a single tournament's results and a full dump of every
//! recorded point. Row fetching talks to the store; formatting is pure so
//! the exact output is unit-testable.

pub mod manager;

pub use manager::{CsvDownload, ExportManager};

use crate::db::errors::StoreResult;
use crate::scoring::Category;
use chrono::NaiveDate;

/// Header of the single-tournament export.
pub const TOURNAMENT_EXPORT_HEADER: [&str; 4] = ["First Name", "Last Name", "Points", "Category"];

/// Header of the full-database export.
pub const FULL_EXPORT_HEADER: [&str; 5] =
    ["First Name", "Last Name", "Date", "Category", "Points"];

/// Download filename of the full-database export.
pub const FULL_EXPORT_FILENAME: &str = "all_results.csv";

/// One row of a single-tournament export.
#[derive(Debug, Clone, PartialEq)]
pub struct TournamentExportRow {
    pub first_name: String,
    pub last_name: String,
    pub points: f64,
    pub category: Category,
}

/// One row of the full-database export.
#[derive(Debug, Clone, PartialEq)]
pub struct FullExportRow {
    pub first_name: String,
    pub last_name: String,
    pub held_on: NaiveDate,
    pub category: Category,
    pub points: f64,
}

/// Download filename for a tournament export, derived from its date.
pub fn tournament_filename(held_on: NaiveDate) -> String {
    format!("tournament_{held_on}.csv")
}

/// Format a score for CSV output: whole scores print without a fraction.
pub fn format_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{}", points as i64)
    } else {
        points.to_string()
    }
}

/// Serialize a single tournament's rows to CSV, header first.
pub fn tournament_csv(rows: &[TournamentExportRow]) -> StoreResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(TOURNAMENT_EXPORT_HEADER)?;
    for row in rows {
        writer.write_record([
            row.first_name.as_str(),
            row.last_name.as_str(),
            &format_points(row.points),
            row.category.as_str(),
        ])?;
    }
    finish(writer)
}

/// Serialize the full-database rows to CSV, header first.
pub fn full_csv(rows: &[FullExportRow]) -> StoreResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(FULL_EXPORT_HEADER)?;
    for row in rows {
        writer.write_record([
            row.first_name.as_str(),
            row.last_name.as_str(),
            &row.held_on.to_string(),
            row.category.as_str(),
            &format_points(row.points),
        ])?;
    }
    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> StoreResult<String> {
    let bytes = writer
        .into_inner()
        .map_err(|err| csv::Error::from(std::io::Error::other(err.to_string())))?;
    // The writer only ever receives UTF-8 input.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
