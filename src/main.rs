use booth_assignments::display::{print_floor, print_roster, write_export_file};
use booth_assignments::interchange::{export_csv, import_csv};
use booth_assignments::session::EditorSession;
use booth_assignments::store::{CsvFileStore, RosterStore};
use booth_assignments::web;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let store_path =
        std::env::var("STORE_PATH").unwrap_or_else(|_| "data/roster.csv".to_string());
    let store = CsvFileStore::new(&store_path);

    // Web mode: serve the editor API.
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "web" {
        let port = args
            .get(2)
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8080);

        println!("Starting web server on port {}...", port);
        println!("Roster store: {}", store_path);
        println!("Access the API at http://localhost:{}", port);

        web::start_server(port, store).await?;
        return Ok(());
    }

    // CLI mode: load the roster, optionally replay an assignment CSV, and
    // write the export file.
    println!("Loading roster from {}...", store_path);
    let rows = store.fetch_roster()?;
    let mut session = EditorSession::load(&rows);
    println!("Loaded {} companies", session.companies.len());

    if let Some(import_path) = args.get(1) {
        println!("Importing assignments from {}...", import_path);
        let text = std::fs::read_to_string(import_path)?;
        let (companies, assignments) = import_csv(&text)?;
        let summary = session.apply_import(&companies, &assignments);
        println!(
            "Imported {} companies ({} matched the roster)",
            summary.rows, summary.matched
        );
    }

    print_roster(&session.companies, &session.floor);
    print_floor(&session.companies, &session.floor);

    let csv = export_csv(&session.companies, &session.floor);
    write_export_file("slot_assignments.csv", &csv)?;
    println!("\nAssignments saved to slot_assignments.csv");

    Ok(())
}
