use csv::{QuoteStyle, WriterBuilder};

use crate::floor::FloorPlan;
use crate::roster::Company;

/// Header of the compact export schema.
pub const COMPACT_HEADER: [&str; 3] = ["COMPANY", "DAYS REGISTERED", "ASSIGNMENT"];

/// Header of the legacy six-column schema, still accepted on import.
pub const LEGACY_HEADER: [&str; 6] = [
    "COMPANY",
    "PRIMARY MAJOR",
    "WED BOOTHS",
    "THUR BOOTHS",
    "DAYS REGISTERED",
    "ASSIGNMENT",
];

/// Serializes the current assignments to CSV text in the compact schema.
///
/// One row per company holding at least one slot; every field is quoted.
/// The assignment cell lists the company's slots in compact id form, in
/// floor order. Attendance is the operator-edited value, expanded to day
/// names.
pub fn export_csv(companies: &[Company], floor: &FloorPlan) -> String {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer
        .write_record(COMPACT_HEADER)
        .expect("writing to an in-memory buffer");

    for company in companies {
        let assignments: Vec<String> = floor
            .occupied()
            .filter(|(_, occupant)| *occupant == company.id)
            .map(|(slot, _)| slot.compact())
            .collect();
        if assignments.is_empty() {
            continue;
        }
        writer
            .write_record([
                company.name.as_str(),
                &company.days_registered.day_names(),
                &assignments.join(", "),
            ])
            .expect("writing to an in-memory buffer");
    }

    let bytes = writer.into_inner().expect("writing to an in-memory buffer");
    String::from_utf8(bytes).expect("CSV output is UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{companies_from_rows, DaysRegistered, RosterRow};

    fn roster() -> Vec<Company> {
        companies_from_rows(&[
            RosterRow {
                company: "Acme Corp".to_string(),
                primary_major: "General".to_string(),
                wed_booths: 1,
                thur_booths: 1,
                ..Default::default()
            },
            RosterRow {
                company: "Borealis".to_string(),
                primary_major: "Engineering".to_string(),
                wed_booths: 2,
                thur_booths: 0,
                ..Default::default()
            },
        ])
    }

    #[test]
    fn exports_only_companies_with_assignments() {
        let companies = roster();
        let mut floor = FloorPlan::new();
        floor.assign("1", 2, "J-bottom-25".parse().unwrap()).unwrap();
        floor.assign("1", 2, "K-top-3".parse().unwrap()).unwrap();

        let csv = export_csv(&companies, &floor);
        assert_eq!(
            csv,
            "\"COMPANY\",\"DAYS REGISTERED\",\"ASSIGNMENT\"\n\
             \"Acme Corp\",\"Wednesday Thursday\",\"J25, K3\"\n"
        );
    }

    #[test]
    fn export_uses_the_operator_edited_attendance() {
        let mut companies = roster();
        companies[0].days_registered = DaysRegistered::OnlyThursday;
        let mut floor = FloorPlan::new();
        floor.assign("1", 2, "A-top-1".parse().unwrap()).unwrap();

        let csv = export_csv(&companies, &floor);
        assert!(csv.contains("\"Acme Corp\",\"Thursday\",\"A1\""));
    }

    #[test]
    fn empty_floor_exports_only_the_header() {
        let csv = export_csv(&roster(), &FloorPlan::new());
        assert_eq!(csv, "\"COMPANY\",\"DAYS REGISTERED\",\"ASSIGNMENT\"\n");
    }
}
