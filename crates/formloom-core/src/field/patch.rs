//! Partial field updates.

use serde::{Deserialize, Deserializer, Serialize};

use super::{FieldSpec, FieldStyle, ValidationRules};

/// Replacement values for an `UpdateField` command.
///
/// `None` leaves a member untouched. For optional members the inner option
/// is the new value, so `Some(None)` clears it. `id` and type are immutable
/// and cannot be patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub placeholder: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub validation: Option<Option<ValidationRules>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub style: Option<Option<FieldStyle>>,
}

/// A key that is present always yields `Some`, so `null` means "clear".
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl FieldPatch {
    /// Create an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Replace the required flag.
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Replace or clear the placeholder.
    #[must_use]
    pub fn placeholder(mut self, placeholder: Option<String>) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Replace the options.
    #[must_use]
    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    /// Replace or clear the constraint bag.
    #[must_use]
    pub fn validation(mut self, rules: Option<ValidationRules>) -> Self {
        self.validation = Some(rules);
        self
    }

    /// Replace or clear the style hints.
    #[must_use]
    pub fn style(mut self, style: Option<FieldStyle>) -> Self {
        self.style = Some(style);
        self
    }

    /// True when the patch touches nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.label.is_none()
            && self.required.is_none()
            && self.placeholder.is_none()
            && self.options.is_none()
            && self.validation.is_none()
            && self.style.is_none()
    }

    /// Produce the patched field.
    #[must_use]
    pub fn apply(&self, field: &FieldSpec) -> FieldSpec {
        FieldSpec {
            id: field.id.clone(),
            field_type: field.field_type,
            label: self.label.clone().unwrap_or_else(|| field.label.clone()),
            required: self.required.unwrap_or(field.required),
            placeholder: self
                .placeholder
                .clone()
                .unwrap_or_else(|| field.placeholder.clone()),
            options: self.options.clone().unwrap_or_else(|| field.options.clone()),
            validation: self
                .validation
                .clone()
                .unwrap_or_else(|| field.validation.clone()),
            style: self.style.clone().unwrap_or_else(|| field.style.clone()),
        }
    }

    /// The patch that restores `field` after this patch has been applied
    /// to it. Touches exactly the members this patch touches.
    #[must_use]
    pub fn inverse_for(&self, field: &FieldSpec) -> Self {
        Self {
            label: self.label.as_ref().map(|_| field.label.clone()),
            required: self.required.map(|_| field.required),
            placeholder: self.placeholder.as_ref().map(|_| field.placeholder.clone()),
            options: self.options.as_ref().map(|_| field.options.clone()),
            validation: self.validation.as_ref().map(|_| field.validation.clone()),
            style: self.style.as_ref().map(|_| field.style.clone()),
        }
    }
}
