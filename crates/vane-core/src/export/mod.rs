//! Tabular export of scored results.
//!
//! Exactly three columns in fixed order (`headline,label,score`), one row
//! per record, UTF-8. An absent score is an empty cell.


use std::io;
use std::path::Path;

use chrono::NaiveDate;

use crate::record::ScoreRecord;

/// Renders records as CSV text.
pub fn to_csv(records: &[ScoreRecord]) -> String {
    let mut out = String::from("headline,label,score\n");
    for record in records {
        out.push_str(&csv_field(&record.headline));
        out.push(',');
        out.push_str(&csv_field(&record.label));
        out.push(',');
        if let Some(score) = record.score {
            out.push_str(&score.to_string());
        }
        out.push('\n');
    }
    out
}

/// Writes records as a CSV file.
pub fn write_csv(path: &Path, records: &[ScoreRecord]) -> io::Result<()> {
    std::fs::write(path, to_csv(records))
}

/// Dated export file name, e.g. `headline_scores_nyt_2026_08_07.csv`.
pub fn export_filename(source: &str, date: NaiveDate) -> String {
    format!("headline_scores_{}_{}.csv", source, date.format("%Y_%m_%d"))
}

fn csv_field(text: &str) -> String {
    if text.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}
