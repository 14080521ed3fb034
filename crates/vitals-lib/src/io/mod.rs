pub mod csv;

use thiserror::Error;

/// Failures while turning a file into a `Recording`. Anything past this
/// point is the estimators' problem; the loader does no signal-level
/// validation.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}")]
    Open {
        path: String,
        #[source]
        source: ::csv::Error,
    },
    #[error("{path} is missing required column '{column}'")]
    MissingColumn { path: String, column: String },
    #[error("{path}: malformed row {row}: {detail}")]
    MalformedRow {
        path: String,
        row: usize,
        detail: String,
    },
}
