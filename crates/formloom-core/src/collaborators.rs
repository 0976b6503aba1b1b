//! Collaborator trait interfaces.
//!
//! The core talks to storage and to the field-suggestion service only
//! through these traits. Implementations live outside this crate; tests use
//! in-memory mocks.
//!
//! Failures are surfaced as [`crate::CollaboratorError`] and never retried
//! here.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::field::{FieldId, FieldSpec, FieldStyle, FieldType, ValidationRules};
use crate::form::{FormDefinition, FormId, Responses, SubmissionId};
use crate::Result;

/// Persistence boundary for forms and submissions.
#[async_trait]
pub trait FormStore: Send + Sync {
    /// Store a form definition, returning its id.
    async fn save_form(&self, definition: &FormDefinition) -> Result<FormId>;

    /// Load a form definition.
    async fn load_form(&self, id: &FormId) -> Result<FormDefinition>;

    /// Record a completed response map for a form.
    async fn record_submission(&self, form_id: &FormId, responses: &Responses)
        -> Result<SubmissionId>;
}

/// A FieldSpec-shaped proposal from the suggestion service.
///
/// Any id it carries is untrusted and discarded on acceptance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldProposal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRules>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<FieldStyle>,
}

impl FieldProposal {
    /// Turn the proposal into a field under a fresh id.
    #[must_use]
    pub fn into_field(self) -> FieldSpec {
        let defaults = FieldSpec::new(FieldId::generate(), self.field_type);
        FieldSpec {
            label: self.label,
            required: self.required,
            placeholder: self.placeholder.or(defaults.placeholder.clone()),
            options: if self.options.is_empty() {
                defaults.options.clone()
            } else {
                self.options
            },
            validation: self.validation.or(defaults.validation.clone()),
            style: self.style,
            ..defaults
        }
    }
}

/// AI-assisted authoring boundary.
#[async_trait]
pub trait FieldSuggester: Send + Sync {
    /// Propose fields for a free-text description of the form.
    async fn suggest_fields(&self, prompt: &str) -> Result<Vec<FieldProposal>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proposal_id_is_replaced() -> std::result::Result<(), serde_json::Error> {
        let proposal: FieldProposal = serde_json::from_str(
            r#"{"id":"injected","type":"select","label":"Size","options":["S","M","L"]}"#,
        )?;
        let field = proposal.into_field();
        assert_ne!(field.id.as_str(), "injected");
        assert_eq!(field.options, vec!["S", "M", "L"]);
        assert_eq!(field.label, "Size");
        Ok(())
    }

    #[test]
    fn test_proposal_falls_back_to_type_defaults() {
        let proposal = FieldProposal {
            id: None,
            field_type: FieldType::Radio,
            label: "Pick".into(),
            required: true,
            placeholder: None,
            options: Vec::new(),
            validation: None,
            style: None,
        };
        let field = proposal.into_field();
        assert_eq!(field.options.len(), 3);
        assert!(field.required);
    }
}
