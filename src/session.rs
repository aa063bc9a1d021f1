use tracing::debug;

use crate::error::FloorError;
use crate::floor::{AssignOutcome, FloorPlan, SlotId};
use crate::interchange::{ImportedAssignment, ImportedCompany};
use crate::roster::{companies_from_rows, Company, DaysRegistered, RosterRow};

/// Aggregate feedback for a completed import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Data rows read from the file.
    pub rows: usize,
    /// Rows whose company name matched the loaded roster.
    pub matched: usize,
}

/// One operator's editing state: the loaded roster and the floor plan.
///
/// The floor is regenerated fresh every time a roster is loaded; companies
/// are referenced from slots by id, never copied.
#[derive(Debug, Default)]
pub struct EditorSession {
    pub companies: Vec<Company>,
    pub floor: FloorPlan,
}

impl EditorSession {
    pub fn new() -> Self {
        EditorSession {
            companies: Vec::new(),
            floor: FloorPlan::new(),
        }
    }

    /// Builds a session from fetched roster rows with an empty floor.
    pub fn load(rows: &[RosterRow]) -> Self {
        EditorSession {
            companies: companies_from_rows(rows),
            floor: FloorPlan::new(),
        }
    }

    pub fn company(&self, company_id: &str) -> Option<&Company> {
        self.companies.iter().find(|c| c.id == company_id)
    }

    pub fn company_by_name(&self, name: &str) -> Option<&Company> {
        self.companies.iter().find(|c| c.name == name)
    }

    /// Assigns a company to a slot under its booth quota. An unknown company
    /// id gets quota 0.
    pub fn assign(&mut self, company_id: &str, slot_id: SlotId) -> Result<AssignOutcome, FloorError> {
        let quota = self
            .company(company_id)
            .map(Company::total_booths)
            .unwrap_or(0);
        self.floor.assign(company_id, quota, slot_id)
    }

    pub fn unassign(&mut self, slot_id: SlotId) -> Option<String> {
        self.floor.unassign(slot_id)
    }

    /// Operator override of a company's attendance. Returns false when the
    /// company is unknown.
    pub fn set_days(&mut self, company_id: &str, days: DaysRegistered) -> bool {
        match self.companies.iter_mut().find(|c| c.id == company_id) {
            Some(company) => {
                company.days_registered = days;
                true
            }
            None => false,
        }
    }

    /// Applies a parsed import: updates attendance of matched companies,
    /// resets the floor, then restores the file's assignments for matched
    /// names. Unmatched names are dropped silently; the file's booth counts
    /// are never applied.
    pub fn apply_import(
        &mut self,
        imported: &[ImportedCompany],
        assignments: &[ImportedAssignment],
    ) -> ImportSummary {
        let mut summary = ImportSummary {
            rows: imported.len(),
            matched: 0,
        };

        for entry in imported {
            let Some(company) = self.companies.iter_mut().find(|c| c.name == entry.name) else {
                debug!(name = %entry.name, "import row has no roster match, dropped");
                continue;
            };
            summary.matched += 1;
            if let Some(days) = entry.days_registered {
                company.days_registered = days;
            }
        }

        self.floor.reset();
        for assignment in assignments {
            let Some(company_id) = self
                .company_by_name(&assignment.company_name)
                .map(|c| c.id.clone())
            else {
                continue;
            };
            for &slot_id in &assignment.slot_ids {
                // Parsed slot ids always exist on the generated floor.
                let _ = self.floor.place(&company_id, slot_id);
            }
        }

        summary
    }
}
