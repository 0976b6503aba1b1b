//! Form definitions and submissions.

use chrono::{DateTime, Utc};
use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

use crate::field::{FieldId, FieldSpec, Value};

/// Ordered field list. Persistent, so snapshots share structure and never
/// alias mutable state.
pub type FieldList = Vector<FieldSpec>;

/// Accumulated answers for one submission, keyed by field id.
pub type Responses = OrdMap<FieldId, Value>;

/// Unique form identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormId(String);

impl FormId {
    /// Wrap an existing identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("form_{}", uuid::Uuid::new_v4().simple()))
    }

    /// Get the ID as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FormId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique submission identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(String);

impl SubmissionId {
    /// Wrap an existing identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("sub_{}", uuid::Uuid::new_v4().simple()))
    }

    /// Get the ID as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Form-wide presentation hints, consumed only by renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
}

/// A form: metadata plus the ordered element list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDefinition {
    pub id: FormId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub elements: FieldList,
    #[serde(default)]
    pub style: FormStyle,
}

impl FormDefinition {
    /// Create an empty form with a fresh id.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: FormId::generate(),
            title: title.into(),
            description: String::new(),
            elements: Vector::new(),
            style: FormStyle::default(),
        }
    }

    /// Replace the element list.
    #[must_use]
    pub fn with_elements<I>(mut self, elements: I) -> Self
    where
        I: IntoIterator<Item = FieldSpec>,
    {
        self.elements = elements.into_iter().collect();
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Look up a field by id.
    #[must_use]
    pub fn field(&self, id: &FieldId) -> Option<&FieldSpec> {
        self.elements.iter().find(|f| &f.id == id)
    }

    /// Fields that contribute to the response map, in display order.
    pub fn input_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.elements.iter().filter(|f| f.takes_value())
    }
}

/// A completed set of answers for one form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSubmission {
    pub id: SubmissionId,
    pub form_id: FormId,
    pub responses: Responses,
    pub submitted_at: DateTime<Utc>,
}

impl FormSubmission {
    /// Create a submission stamped now.
    #[must_use]
    pub fn new(form_id: FormId, responses: Responses) -> Self {
        Self {
            id: SubmissionId::generate(),
            form_id,
            responses,
            submitted_at: Utc::now(),
        }
    }

    /// An edited copy under the same submission id.
    #[must_use]
    pub fn with_responses(&self, responses: Responses) -> Self {
        Self {
            responses,
            ..self.clone()
        }
    }
}
