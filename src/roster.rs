use serde::{Deserialize, Serialize};

use crate::floor::FloorPlan;

/// Which fair days a company attends. Derived from the per-day booth counts
/// when the roster is loaded, but freely editable by the operator afterward;
/// once loaded it is never re-derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DaysRegistered {
    #[serde(rename = "Both days")]
    BothDays,
    #[serde(rename = "Only Wednesday")]
    OnlyWednesday,
    #[serde(rename = "Only Thursday")]
    OnlyThursday,
    #[serde(rename = "")]
    Unset,
}

impl DaysRegistered {
    /// Initial classification from the per-day booth counts.
    pub fn from_counts(wed_booths: u32, thur_booths: u32) -> Self {
        match (wed_booths > 0, thur_booths > 0) {
            (true, true) => DaysRegistered::BothDays,
            (true, false) => DaysRegistered::OnlyWednesday,
            (false, true) => DaysRegistered::OnlyThursday,
            (false, false) => DaysRegistered::Unset,
        }
    }

    /// Display label as used on the wire and in the legacy CSV schema.
    pub fn label(&self) -> &'static str {
        match self {
            DaysRegistered::BothDays => "Both days",
            DaysRegistered::OnlyWednesday => "Only Wednesday",
            DaysRegistered::OnlyThursday => "Only Thursday",
            DaysRegistered::Unset => "",
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Both days" => DaysRegistered::BothDays,
            "Only Wednesday" => DaysRegistered::OnlyWednesday,
            "Only Thursday" => DaysRegistered::OnlyThursday,
            _ => DaysRegistered::Unset,
        }
    }

    /// Expansion into the day-name subset used by the roster store and the
    /// compact CSV schema, e.g. `"Wednesday Thursday"`.
    pub fn day_names(&self) -> String {
        match self {
            DaysRegistered::BothDays => "Wednesday Thursday".to_string(),
            DaysRegistered::OnlyWednesday => "Wednesday".to_string(),
            DaysRegistered::OnlyThursday => "Thursday".to_string(),
            DaysRegistered::Unset => String::new(),
        }
    }

    /// Classification from a whitespace-separated day-name list. Unknown
    /// day names are ignored.
    pub fn from_day_names(names: &str) -> Self {
        let mut wednesday = false;
        let mut thursday = false;
        for name in names.split_whitespace() {
            match name {
                "Wednesday" => wednesday = true,
                "Thursday" => thursday = true,
                _ => {}
            }
        }
        match (wednesday, thursday) {
            (true, true) => DaysRegistered::BothDays,
            (true, false) => DaysRegistered::OnlyWednesday,
            (false, true) => DaysRegistered::OnlyThursday,
            (false, false) => DaysRegistered::Unset,
        }
    }
}

/// An exhibiting company as the editor works with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    pub primary_major: String,
    pub wed_booths: u32,
    pub thur_booths: u32,
    pub symbol: String,
    pub days_registered: DaysRegistered,
}

impl Company {
    /// Hard quota of simultaneous slot assignments.
    pub fn total_booths(&self) -> u32 {
        self.wed_booths + self.thur_booths
    }
}

/// One roster row as exchanged with the external store, independent of which
/// sheet schema version it was read from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterRow {
    pub company: String,
    pub primary_major: String,
    pub wed_booths: u32,
    pub thur_booths: u32,
    /// Space-joined day names, present only in the schema version that
    /// stores attendance explicitly.
    pub days_registered: Option<String>,
    /// Compact-form slot ids held by the company, as stored.
    pub booth_assignments: Vec<String>,
}

/// Short display code for a company: uppercase initials of the first two
/// whitespace-separated words, `"XX"` when the name yields nothing.
pub fn derive_symbol(name: &str) -> String {
    let symbol: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(|c| c.to_uppercase())
        .take(2)
        .collect();
    if symbol.is_empty() {
        "XX".to_string()
    } else {
        symbol
    }
}

/// Parses a booth count, returning 0 if empty or invalid.
pub fn parse_count(value: &str) -> u32 {
    value.trim().parse().unwrap_or(0)
}

/// Maps external roster rows into companies. Ids are sequential in row
/// order, 1-based; symbol and initial days-registered are derived here.
pub fn companies_from_rows(rows: &[RosterRow]) -> Vec<Company> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let days_registered = match &row.days_registered {
                Some(names) => DaysRegistered::from_day_names(names),
                None => DaysRegistered::from_counts(row.wed_booths, row.thur_booths),
            };
            let primary_major = if row.primary_major.trim().is_empty() {
                "General".to_string()
            } else {
                row.primary_major.clone()
            };
            Company {
                id: (index + 1).to_string(),
                name: row.company.clone(),
                primary_major,
                wed_booths: row.wed_booths,
                thur_booths: row.thur_booths,
                symbol: derive_symbol(&row.company),
                days_registered,
            }
        })
        .collect()
}

/// Inverse mapping for persistence: every company becomes a row, attendance
/// re-expanded into day names and current assignments rendered in the
/// compact id form, in floor order.
pub fn rows_from_session(companies: &[Company], floor: &FloorPlan) -> Vec<RosterRow> {
    companies
        .iter()
        .map(|company| {
            let booth_assignments: Vec<String> = floor
                .occupied()
                .filter(|(_, occupant)| *occupant == company.id)
                .map(|(slot, _)| slot.compact())
                .collect();
            RosterRow {
                company: company.name.clone(),
                primary_major: company.primary_major.clone(),
                wed_booths: company.wed_booths,
                thur_booths: company.thur_booths,
                days_registered: Some(company.days_registered.day_names()),
                booth_assignments,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, major: &str, wed: u32, thur: u32) -> RosterRow {
        RosterRow {
            company: name.to_string(),
            primary_major: major.to_string(),
            wed_booths: wed,
            thur_booths: thur,
            days_registered: None,
            booth_assignments: Vec::new(),
        }
    }

    #[test]
    fn symbol_takes_two_uppercase_initials() {
        assert_eq!(derive_symbol("Acme Robotics Inc"), "AR");
        assert_eq!(derive_symbol("acme"), "A");
        assert_eq!(derive_symbol(""), "XX");
        assert_eq!(derive_symbol("   "), "XX");
    }

    #[test]
    fn days_classify_from_counts() {
        assert_eq!(DaysRegistered::from_counts(2, 0), DaysRegistered::OnlyWednesday);
        assert_eq!(DaysRegistered::from_counts(0, 3), DaysRegistered::OnlyThursday);
        assert_eq!(DaysRegistered::from_counts(1, 1), DaysRegistered::BothDays);
        assert_eq!(DaysRegistered::from_counts(0, 0), DaysRegistered::Unset);
    }

    #[test]
    fn day_names_round_trip() {
        for days in [
            DaysRegistered::BothDays,
            DaysRegistered::OnlyWednesday,
            DaysRegistered::OnlyThursday,
            DaysRegistered::Unset,
        ] {
            assert_eq!(DaysRegistered::from_day_names(&days.day_names()), days);
        }
        assert_eq!(
            DaysRegistered::from_day_names("Thursday Wednesday"),
            DaysRegistered::BothDays
        );
        assert_eq!(DaysRegistered::from_day_names("Friday"), DaysRegistered::Unset);
    }

    #[test]
    fn companies_get_sequential_ids_and_defaults() {
        let rows = vec![row("Acme Corp", "", 2, 1), row("Borealis", "Engineering", 0, 0)];
        let companies = companies_from_rows(&rows);

        assert_eq!(companies[0].id, "1");
        assert_eq!(companies[1].id, "2");
        assert_eq!(companies[0].primary_major, "General");
        assert_eq!(companies[1].primary_major, "Engineering");
        assert_eq!(companies[0].symbol, "AC");
        assert_eq!(companies[0].days_registered, DaysRegistered::BothDays);
        assert_eq!(companies[1].days_registered, DaysRegistered::Unset);
        assert_eq!(companies[0].total_booths(), 3);
    }

    #[test]
    fn explicit_day_list_wins_over_counts() {
        let mut r = row("Acme Corp", "General", 2, 2);
        r.days_registered = Some("Wednesday".to_string());
        let companies = companies_from_rows(&[r]);
        assert_eq!(companies[0].days_registered, DaysRegistered::OnlyWednesday);
    }

    #[test]
    fn malformed_counts_parse_to_zero() {
        assert_eq!(parse_count("3"), 3);
        assert_eq!(parse_count(" 4 "), 4);
        assert_eq!(parse_count("abc"), 0);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("-2"), 0);
    }

    #[test]
    fn rows_carry_current_assignments_in_compact_form() {
        let companies = companies_from_rows(&[row("Acme Corp", "General", 1, 1)]);
        let mut floor = FloorPlan::new();
        floor
            .assign("1", 2, "J-bottom-25".parse().unwrap())
            .unwrap();
        floor.assign("1", 2, "K-top-3".parse().unwrap()).unwrap();

        let rows = rows_from_session(&companies, &floor);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].booth_assignments, vec!["J25", "K3"]);
        assert_eq!(rows[0].days_registered.as_deref(), Some("Wednesday Thursday"));
    }

    #[test]
    fn company_json_uses_the_original_field_names() {
        let company = Company {
            id: "1".to_string(),
            name: "Acme Corp".to_string(),
            primary_major: "General".to_string(),
            wed_booths: 2,
            thur_booths: 0,
            symbol: "AC".to_string(),
            days_registered: DaysRegistered::OnlyWednesday,
        };
        let json = serde_json::to_value(&company).unwrap();
        assert_eq!(json["primaryMajor"], "General");
        assert_eq!(json["wedBooths"], 2);
        assert_eq!(json["daysRegistered"], "Only Wednesday");

        let unset = serde_json::to_value(DaysRegistered::Unset).unwrap();
        assert_eq!(unset, "");
    }
}
