use thiserror::Error;

/// Application-level error type.
///
/// Only `MalformedImport` and `RejectedFileType` are user-facing; autosave
/// and clear failures are logged where they happen and never propagate, and
/// an unreadable stored document falls back silently to the template.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid JSON import: {0}")]
    MalformedImport(serde_json::Error),

    #[error("Unsupported file type '{0}': expected a .json file")]
    RejectedFileType(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
