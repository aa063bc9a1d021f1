use thiserror::Error;

/// Failures talking to the external roster store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("roster store unavailable: {0}")]
    Io(#[from] std::io::Error),
    #[error("roster store returned malformed data: {0}")]
    Csv(#[from] csv::Error),
    #[error("unrecognized roster schema, header was: {0}")]
    UnknownSchema(String),
}

/// Failures validating an assignment CSV before any row is applied.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("CSV file is empty or invalid")]
    Empty,
    #[error("CSV format is invalid, header was: {0}")]
    HeaderMismatch(String),
    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Failures operating on the floor plan.
#[derive(Debug, Error)]
pub enum FloorError {
    #[error("no such slot on the floor plan: {0}")]
    UnknownSlot(String),
}
