use csv::ReaderBuilder;

use crate::error::ImportError;
use crate::floor::{to_internal, SlotId};
use crate::roster::DaysRegistered;

use super::export::{COMPACT_HEADER, LEGACY_HEADER};

/// The CSV schema an imported file was written in, detected from its header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvSchema {
    /// `COMPANY,DAYS REGISTERED,ASSIGNMENT` — the schema `export_csv` emits.
    Compact,
    /// The six-column schema of older exports.
    Legacy,
}

/// Company fields recovered from an import row. Only fields the editor
/// applies are carried; matching against the loaded roster is by name.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedCompany {
    pub name: String,
    pub primary_major: Option<String>,
    pub wed_booths: Option<u32>,
    pub thur_booths: Option<u32>,
    pub days_registered: Option<DaysRegistered>,
}

/// Slots an import row claims for a company, already normalized to the
/// internal id form.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedAssignment {
    pub company_name: String,
    pub slot_ids: Vec<SlotId>,
}

/// Parses assignment CSV text.
///
/// The header must exactly match one of the known schemas; otherwise the
/// whole file is rejected before any row is looked at. Data rows with fewer
/// columns than the schema are skipped silently — import is best-effort and
/// the result is verified by the operator, not the machine.
pub fn import_csv(
    text: &str,
) -> Result<(Vec<ImportedCompany>, Vec<ImportedAssignment>), ImportError> {
    if text.trim().is_empty() {
        return Err(ImportError::Empty);
    }

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let header = reader.headers()?.clone();
    let schema = if header.iter().eq(COMPACT_HEADER) {
        CsvSchema::Compact
    } else if header.iter().eq(LEGACY_HEADER) {
        CsvSchema::Legacy
    } else {
        let found = header.iter().collect::<Vec<_>>().join(",");
        return Err(ImportError::HeaderMismatch(found));
    };

    let mut companies = Vec::new();
    let mut assignments = Vec::new();

    for record in reader.records() {
        let record = record?;
        let min_columns = match schema {
            CsvSchema::Compact => 3,
            CsvSchema::Legacy => 6,
        };
        if record.len() < min_columns {
            continue;
        }

        let field = |i: usize| record.get(i).unwrap_or("").trim();
        let name = field(0).to_string();

        let company = match schema {
            CsvSchema::Compact => ImportedCompany {
                name: name.clone(),
                primary_major: None,
                wed_booths: None,
                thur_booths: None,
                days_registered: apply_days(DaysRegistered::from_day_names(field(1))),
            },
            CsvSchema::Legacy => ImportedCompany {
                name: name.clone(),
                primary_major: Some(field(1).to_string()),
                wed_booths: Some(crate::roster::parse_count(field(2))),
                thur_booths: Some(crate::roster::parse_count(field(3))),
                days_registered: apply_days(DaysRegistered::from_label(field(4))),
            },
        };
        companies.push(company);

        let assignment_field = match schema {
            CsvSchema::Compact => field(2),
            CsvSchema::Legacy => field(5),
        };
        let slot_ids: Vec<SlotId> = assignment_field
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .filter_map(|entry| to_internal(entry).parse().ok())
            .collect();
        if !slot_ids.is_empty() {
            assignments.push(ImportedAssignment {
                company_name: name,
                slot_ids,
            });
        }
    }

    Ok((companies, assignments))
}

// An empty attendance cell means "leave the roster value alone".
fn apply_days(days: DaysRegistered) -> Option<DaysRegistered> {
    match days {
        DaysRegistered::Unset => None,
        other => Some(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_schema_imports_names_days_and_slots() {
        let text = "COMPANY,DAYS REGISTERED,ASSIGNMENT\n\
                    \"Acme Corp\",\"Wednesday Thursday\",\"J25, K3\"\n";
        let (companies, assignments) = import_csv(text).unwrap();

        assert_eq!(companies.len(), 1);
        assert_eq!(companies[0].name, "Acme Corp");
        assert_eq!(
            companies[0].days_registered,
            Some(DaysRegistered::BothDays)
        );

        assert_eq!(assignments.len(), 1);
        let ids: Vec<String> = assignments[0]
            .slot_ids
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(ids, vec!["J-bottom-25", "K-top-3"]);
    }

    #[test]
    fn legacy_schema_is_still_accepted() {
        let text = "COMPANY,PRIMARY MAJOR,WED BOOTHS,THUR BOOTHS,DAYS REGISTERED,ASSIGNMENT\n\
                    \"Acme Corp\",\"General\",\"2\",\"1\",\"Both days\",\"A-top-1, B16\"\n";
        let (companies, assignments) = import_csv(text).unwrap();

        assert_eq!(companies[0].primary_major.as_deref(), Some("General"));
        assert_eq!(companies[0].wed_booths, Some(2));
        assert_eq!(companies[0].thur_booths, Some(1));
        assert_eq!(
            companies[0].days_registered,
            Some(DaysRegistered::BothDays)
        );
        // Internal and compact id forms both normalize to internal.
        let ids: Vec<String> = assignments[0]
            .slot_ids
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(ids, vec!["A-top-1", "B-top-16"]);
    }

    #[test]
    fn unknown_header_is_rejected_before_any_row() {
        let err = import_csv("FOO,BAR\n\"Acme\",\"x\"\n").unwrap_err();
        match err {
            ImportError::HeaderMismatch(found) => assert_eq!(found, "FOO,BAR"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_file_is_rejected() {
        assert!(matches!(import_csv(""), Err(ImportError::Empty)));
        assert!(matches!(import_csv("  \n "), Err(ImportError::Empty)));
    }

    #[test]
    fn short_rows_are_skipped_silently() {
        let text = "COMPANY,DAYS REGISTERED,ASSIGNMENT\n\
                    \"Orphan\"\n\
                    \"Acme Corp\",\"Wednesday\",\"A1\"\n";
        let (companies, _) = import_csv(text).unwrap();
        assert_eq!(companies.len(), 1);
        assert_eq!(companies[0].name, "Acme Corp");
    }

    #[test]
    fn unparseable_slot_entries_are_dropped() {
        let text = "COMPANY,DAYS REGISTERED,ASSIGNMENT\n\
                    \"Acme Corp\",\"Wednesday\",\"A1, Z99, garbage\"\n";
        let (_, assignments) = import_csv(text).unwrap();
        assert_eq!(assignments[0].slot_ids.len(), 1);
        assert_eq!(assignments[0].slot_ids[0].to_string(), "A-top-1");
    }

    #[test]
    fn empty_attendance_cell_leaves_days_unset() {
        let text = "COMPANY,DAYS REGISTERED,ASSIGNMENT\n\
                    \"Acme Corp\",\"\",\"A1\"\n";
        let (companies, _) = import_csv(text).unwrap();
        assert_eq!(companies[0].days_registered, None);
    }
}
