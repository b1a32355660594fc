//! Error types for the split engine.

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur during engine operation.
///
/// All precondition errors are raised synchronously at the violating call and
/// are never retried or suppressed by the engine; preventing invalid states
/// from being submitted is the UI collaborator's job. Rounding drift from a
/// clamped slider edit is deliberately *not* an error.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Negative amount or value where a non-negative one is required,
    /// or an equal distribution over zero shares.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Participant set violates a split method's requirements: empty where at
    /// least one is needed, more than one under full-to-one, or a share edit
    /// for a person who is not a participant.
    #[error("Invalid participant set: {0}")]
    InvalidParticipantSet(String),

    /// Split method tag outside the closed set of variants. Can only surface
    /// when parsing external data; inside the crate the enum is exhaustive.
    #[error("Unknown split method: {0}")]
    UnknownSplitMethod(String),

    /// A per-person division was requested against zero people.
    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Bill or summary (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Missing input file argument
    #[error("Missing input file argument. Usage: split-engine <bill.json> [--text]")]
    MissingArgument,
}
