//! # Formloom Core
//!
//! Form interpretation core: field schema, page segmentation, validation,
//! fill-session navigation, edit history and spam scoring. Strictly
//! functional Rust with zero unwraps.
//!
//! ## Laws (Compiler Enforced)
//!
//! - No `unwrap()` - returns `Result` instead
//! - No `expect()` - returns `Result` instead
//! - No `panic!()` - returns `Result` instead
//! - No `unsafe` - safe Rust only
//!
//! ## Error Handling
//!
//! Structural, state and collaborator failures return `Result<T, Error>`.
//! Field-level validation failures are data: [`FieldError`] values keyed by
//! field id, never `Error`.
//!
//! ## Concurrency
//!
//! Everything here is synchronous and in-memory except the collaborator
//! handoffs ([`FormStore`], [`FieldSuggester`]), which are `async`. Sessions
//! are owned by one caller at a time.

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod collaborators;
pub mod config;
mod error;
pub mod export;
pub mod field;
pub mod fill;
pub mod form;
pub mod history;
pub mod pages;
pub mod spam;
pub mod templates;
pub mod validation;

pub use collaborators::{FieldProposal, FieldSuggester, FormStore};
pub use config::Config;
pub use error::{CollaboratorError, Error, Result, StructuralError};
pub use field::{
    create_field, FieldId, FieldPatch, FieldSpec, FieldStyle, FieldType, FileRef,
    ValidationRules, Value,
};
pub use fill::{FillSession, FillState, Step, SubmitOutcome};
pub use form::{FieldList, FormDefinition, FormId, FormSubmission, Responses, SubmissionId};
pub use history::{EditCommand, EditHistory, EditSession};
pub use pages::{segment, Page, Pagination};
pub use spam::{analyze, SpamAnalysis, SpamEngine};
pub use templates::Template;
pub use validation::{
    validate, validate_fields, validate_form, validate_page, FieldError, FieldErrors,
    ValidationResult,
};
