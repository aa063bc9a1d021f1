use std::fs::File;
use std::io::Write;

use crate::floor::{is_wall_section, section_ids, FloorPlan};
use crate::roster::Company;

/// Formats a company for terminal output as `[symbol] name`.
pub fn format_company_label(company: &Company) -> String {
    format!("[{}] {}", company.symbol, company.name)
}

/// Prints the loaded roster with quotas and current assignment counts.
pub fn print_roster(companies: &[Company], floor: &FloorPlan) {
    println!("\n=== Roster ({} companies) ===", companies.len());
    for company in companies {
        println!(
            "  {} — {} — {}/{} booths ({})",
            format_company_label(company),
            company.primary_major,
            floor.count_for(&company.id),
            company.total_booths(),
            company.days_registered.label(),
        );
    }
}

/// Prints the floor section by section. Occupied slots show the holder's
/// symbol, empty slots show [--].
pub fn print_floor(companies: &[Company], floor: &FloorPlan) {
    let occupied = floor.occupied().count();
    println!(
        "\n=== Floor ({} of {} slots assigned) ===",
        occupied,
        floor.total_slots()
    );

    for section in section_ids() {
        let kind = if is_wall_section(section) { "wall" } else { "interior" };
        print!("  Section {} ({}):", section, kind);
        let mut any = false;
        for (slot, company_id) in floor.occupied().filter(|(s, _)| s.section == section) {
            let symbol = companies
                .iter()
                .find(|c| c.id == company_id)
                .map(|c| c.symbol.as_str())
                .unwrap_or("??");
            print!(" {}=[{}]", slot.compact(), symbol);
            any = true;
        }
        if !any {
            print!(" [--]");
        }
        println!();
    }
}

/// Writes exported CSV text to a file.
pub fn write_export_file(filename: &str, csv: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = File::create(filename)?;
    file.write_all(csv.as_bytes())?;
    Ok(())
}
