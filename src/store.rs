use std::path::{Path, PathBuf};

use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};
use tracing::warn;

use crate::error::StoreError;
use crate::roster::{parse_count, RosterRow};

/// The columns of the canonical roster sheet.
pub const SHEET_HEADER: [&str; 5] = [
    "Company",
    "Primary Major",
    "Booths Allotted",
    "Days Registered",
    "Booth Assignments",
];

/// The columns of the older split-days sheet, read-only supported.
pub const LEGACY_SHEET_HEADER: [&str; 4] =
    ["Company", "Primary Major", "Wed Booths", "Thur Booths"];

/// The external roster store. The real backing service (a shared
/// spreadsheet) is outside this crate; anything that can produce and accept
/// roster rows can stand in for it.
pub trait RosterStore {
    fn fetch_roster(&self) -> Result<Vec<RosterRow>, StoreError>;
    fn persist_roster(&self, rows: &[RosterRow]) -> Result<(), StoreError>;
}

/// Roster store backed by a local CSV file laid out like the sheet.
///
/// Reading detects which schema version the file uses from its header;
/// writing always produces the canonical five-column schema.
pub struct CsvFileStore {
    path: PathBuf,
}

impl CsvFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        CsvFileStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RosterStore for CsvFileStore {
    fn fetch_roster(&self) -> Result<Vec<RosterRow>, StoreError> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)?;
        let header = reader.headers()?.clone();

        let legacy = if header.iter().eq(SHEET_HEADER) {
            false
        } else if header.iter().eq(LEGACY_SHEET_HEADER) {
            true
        } else {
            let found = header.iter().collect::<Vec<_>>().join(",");
            return Err(StoreError::UnknownSchema(found));
        };

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let field = |i: usize| record.get(i).unwrap_or("").trim();
            if field(0).is_empty() {
                continue;
            }

            let row = if legacy {
                RosterRow {
                    company: field(0).to_string(),
                    primary_major: field(1).to_string(),
                    wed_booths: parse_count(field(2)),
                    thur_booths: parse_count(field(3)),
                    days_registered: None,
                    booth_assignments: Vec::new(),
                }
            } else {
                // The sheet stores one allotted count, not a per-day split.
                // Copying it into both days matches what the sheet's users
                // always got; the split policy is still an open question.
                let allotted = parse_count(field(2));
                if allotted > 0 {
                    warn!(
                        company = field(0),
                        allotted, "single allotted count copied into both days"
                    );
                }
                RosterRow {
                    company: field(0).to_string(),
                    primary_major: field(1).to_string(),
                    wed_booths: allotted,
                    thur_booths: allotted,
                    days_registered: Some(field(3).to_string()),
                    booth_assignments: field(4)
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect(),
                }
            };
            rows.push(row);
        }

        Ok(rows)
    }

    fn persist_roster(&self, rows: &[RosterRow]) -> Result<(), StoreError> {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Necessary)
            .from_path(&self.path)?;

        writer.write_record(SHEET_HEADER)?;
        for row in rows {
            // Loading copies the allotted count into both days, so the
            // larger of the two is the faithful inverse.
            let allotted = row.wed_booths.max(row.thur_booths);
            writer.write_record([
                row.company.as_str(),
                row.primary_major.as_str(),
                &allotted.to_string(),
                row.days_registered.as_deref().unwrap_or(""),
                &row.booth_assignments.join(", "),
            ])?;
        }
        writer.flush().map_err(StoreError::Io)?;
        Ok(())
    }
}
