pub mod export;
pub mod import;

pub use export::{export_csv, COMPACT_HEADER, LEGACY_HEADER};
pub use import::{import_csv, CsvSchema, ImportedAssignment, ImportedCompany};
