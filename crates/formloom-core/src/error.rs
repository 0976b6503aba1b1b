//! Error types for formloom-core with categorization:
//!
//! - **Structural errors**: a command or action that references fields or
//!   positions that do not exist (caller defect, exit code 4)
//! - **Collaborator errors**: persistence or suggestion service failures
//!   (exit code 2, or 3 for missing records)
//! - **Configuration errors**: invalid or unparseable settings (exit code 1)
//!
//! Field-level validation failures are not errors: they are returned as
//! [`crate::validation::FieldError`] values.

use thiserror::Error;

use crate::field::FieldId;

/// A command or action that does not fit the current field list.
///
/// The edit history rejects these without mutating its present state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StructuralError {
    /// No field with this id exists in the list
    #[error("unknown field: {0}")]
    UnknownField(FieldId),

    /// A field with this id already exists in the list
    #[error("duplicate field id: {0}")]
    DuplicateField(FieldId),

    /// Positional argument outside the list
    #[error("index {index} out of range for {len} fields")]
    IndexOutOfRange { index: usize, len: usize },

    /// Values cannot be recorded for layout-only fields
    #[error("field {0} is layout-only and takes no value")]
    LayoutField(FieldId),

    /// An update that changes nothing
    #[error("patch for field {0} changes nothing")]
    EmptyPatch(FieldId),

    /// The form already holds the configured maximum number of fields
    #[error("form cannot hold more than {limit} fields")]
    TooManyFields { limit: usize },
}

/// Failure reported by an external collaborator (storage, suggestions).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CollaboratorError {
    /// Persistence backend failed
    #[error("persistence failure: {0}")]
    Persistence(String),

    /// Requested record does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Field suggestion service failed
    #[error("suggestion service failure: {0}")]
    Suggestion(String),
}

/// Top-level error type for formloom-core.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// Structural error from an edit command or navigation call
    #[error(transparent)]
    Structural(#[from] StructuralError),

    /// Error surfaced as-is from a collaborator
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),

    /// Action not permitted in the current session state
    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    /// Invalid configuration provided
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Parse error when reading configuration or data
    #[error("Parse error: {0}")]
    ParseError(String),

    /// IO failure at a boundary
    #[error("IO error: {0}")]
    IoError(String),
}

// Convenience constructors
impl Error {
    /// Create an invalid transition error.
    pub fn invalid_transition(msg: impl Into<String>) -> Self {
        Self::InvalidTransition(msg.into())
    }

    /// Create a validation error from an invalid config.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a validation error from a parse error.
    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a system error from an IO error.
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::IoError(msg.into())
    }

    /// Create a persistence collaborator error.
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Collaborator(CollaboratorError::Persistence(msg.into()))
    }

    /// Create a not-found collaborator error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::Collaborator(CollaboratorError::NotFound(msg.into()))
    }

    /// Get the process exit code for this error.
    ///
    /// - 1: configuration or parse problems the user can fix
    /// - 2: IO and collaborator failures
    /// - 3: missing records
    /// - 4: structural defects and invalid state transitions
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidConfig(_) | Self::ParseError(_) => 1,
            Self::IoError(_)
            | Self::Collaborator(
                CollaboratorError::Persistence(_) | CollaboratorError::Suggestion(_),
            ) => 2,
            Self::Collaborator(CollaboratorError::NotFound(_)) => 3,
            Self::Structural(_) | Self::InvalidTransition(_) => 4,
        }
    }
}

/// Result type alias for formloom-core operations
pub type Result<T> = std::result::Result<T, Error>;
