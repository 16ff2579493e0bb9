use crate::game::Phase;
use crate::model::MemoryId;
use thiserror::Error;

/// Failures reported by a [`crate::store::MemoryStore`] backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Validation Error: {0}")]
    Validation(String),

    #[error("Memory '{0}' not found")]
    NotFound(MemoryId),

    #[error("Store Unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum JournalError {
    #[error("Memory '{0}' is not on the current page")]
    EditRejected(MemoryId),

    #[error("Memory '{requested}' is not the one being edited (editing: {editing:?})")]
    EditMismatch {
        editing: Option<MemoryId>,
        requested: MemoryId,
    },

    #[error("Validation Error: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl JournalError {
    /// True for state-machine refusals; false for failures coming back from the store.
    pub fn is_guard(&self) -> bool {
        matches!(self, Self::EditRejected(_) | Self::EditMismatch { .. })
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    #[error("No guess has been placed on the map")]
    NoGuess,

    #[error("No memories with a location to play")]
    NoEligibleRecords,

    #[error("'{operation}' is not allowed while {phase}")]
    WrongPhase {
        operation: &'static str,
        phase: Phase,
    },
}

#[derive(Error, Debug)]
pub enum MindstampsError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Journal(#[from] JournalError),

    #[error(transparent)]
    Game(#[from] GameError),
}

pub type MsResult<T> = Result<T, MindstampsError>;
