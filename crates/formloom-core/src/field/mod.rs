//! Field schema model.
//!
//! A form is an ordered list of [`FieldSpec`]s. Order is the display and tab
//! order; ids are unique within a form and never change after creation.
//!
//! # Architecture
//!
//! - **Identity**: [`FieldId`] - opaque newtype, freshly generated on creation
//! - **Vocabulary**: [`FieldType`] - closed enumeration of input and layout types
//! - **Constraints**: [`ValidationRules`] - the subset that applies depends on type
//! - **Edits**: [`FieldPatch`] - partial replacement used by `UpdateField`

#![forbid(unsafe_code)]

mod patch;
mod value;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

pub use patch::FieldPatch;
pub use value::{FileRef, Value};

// ============================================================================
// Identity
// ============================================================================

/// Opaque field identifier, unique within one form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    /// Wrap an existing identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("field_{}", uuid::Uuid::new_v4().simple()))
    }

    /// Get the ID as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FieldId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// Field types
// ============================================================================

/// Every kind of element a form can contain.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Email,
    Phone,
    Number,
    Url,
    Select,
    Radio,
    Checkbox,
    Date,
    Datetime,
    Time,
    Color,
    Range,
    File,
    Rating,
    Toggle,
    Tags,
    Heading,
    Paragraph,
    Image,
    Divider,
    Pagebreak,
    Thankyou,
}

impl FieldType {
    /// Layout-only types never validate, never take values and never appear
    /// in a response map.
    #[must_use]
    pub const fn is_layout(self) -> bool {
        matches!(
            self,
            Self::Heading
                | Self::Paragraph
                | Self::Image
                | Self::Divider
                | Self::Pagebreak
                | Self::Thankyou
        )
    }

    /// Types whose answer must come from `options`.
    #[must_use]
    pub const fn is_choice(self) -> bool {
        matches!(self, Self::Select | Self::Radio | Self::Checkbox)
    }

    /// Types that carry an `options` list.
    #[must_use]
    pub const fn has_options(self) -> bool {
        self.is_choice() || matches!(self, Self::Rating)
    }

    /// Input-like types that render a placeholder hint.
    #[must_use]
    pub const fn accepts_placeholder(self) -> bool {
        matches!(
            self,
            Self::Text
                | Self::Textarea
                | Self::Email
                | Self::Phone
                | Self::Number
                | Self::Url
                | Self::Select
                | Self::Tags
        )
    }

    /// Single-line answers; long or multi-line content here is suspicious.
    #[must_use]
    pub const fn is_short_answer(self) -> bool {
        matches!(
            self,
            Self::Text | Self::Email | Self::Phone | Self::Url | Self::Number
        )
    }
}

// ============================================================================
// Constraints and style
// ============================================================================

/// Typed constraint bag. Which members apply is decided by the field type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRules {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// `.ext`, `type/subtype` or `type/*` entries
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub accepted_files: Vec<String>,
}

impl ValidationRules {
    /// Numeric bounds.
    #[must_use]
    pub const fn range(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            step: None,
            min_length: None,
            max_length: None,
            pattern: None,
            accepted_files: Vec::new(),
        }
    }

    /// Text length bounds.
    #[must_use]
    pub const fn length(min_length: Option<usize>, max_length: Option<usize>) -> Self {
        Self {
            min: None,
            max: None,
            step: None,
            min_length,
            max_length,
            pattern: None,
            accepted_files: Vec::new(),
        }
    }

    /// A regular expression the whole answer must match.
    #[must_use]
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self {
            pattern: Some(pattern.into()),
            ..Self::default()
        }
    }

    /// A file allow-list.
    #[must_use]
    pub fn accepted_files<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            accepted_files: entries.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Set the step.
    #[must_use]
    pub const fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }
}

/// Horizontal alignment hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Rendering hints. Never consulted by validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

// ============================================================================
// Field specification
// ============================================================================

/// One declarative form element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub id: FieldId,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Display label; content for headings and paragraphs
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

/// Create a field of the given type with a fresh id and type-appropriate
/// defaults.
#[must_use]
pub fn create_field(field_type: FieldType) -> FieldSpec {
    FieldSpec::new(FieldId::generate(), field_type)
}

fn numbered(prefix: &str, count: usize) -> Vec<String> {
    (1..=count).map(|n| format!("{prefix}{n}")).collect()
}

impl FieldSpec {
    /// Default rating scale length.
    pub const RATING_SCALE: usize = 5;

    /// Create a field with an explicit id and type-appropriate defaults.
    #[must_use]
    pub fn new(id: FieldId, field_type: FieldType) -> Self {
        let (label, placeholder, options, validation) = match field_type {
            FieldType::Text => ("Text field", Some("Enter text"), Vec::new(), None),
            FieldType::Textarea => ("Long answer", Some("Enter your answer"), Vec::new(), None),
            FieldType::Email => ("Email", Some("name@example.com"), Vec::new(), None),
            FieldType::Phone => ("Phone", Some("+1 555 000 0000"), Vec::new(), None),
            FieldType::Number => ("Number", Some("0"), Vec::new(), None),
            FieldType::Url => ("Website", Some("https://"), Vec::new(), None),
            FieldType::Select => ("Select an option", Some("Choose..."), numbered("Option ", 3), None),
            FieldType::Radio => ("Choose one", None, numbered("Option ", 3), None),
            FieldType::Checkbox => ("Choose any", None, numbered("Option ", 3), None),
            FieldType::Date => ("Date", None, Vec::new(), None),
            FieldType::Datetime => ("Date and time", None, Vec::new(), None),
            FieldType::Time => ("Time", None, Vec::new(), None),
            FieldType::Color => ("Color", None, Vec::new(), None),
            FieldType::Range => (
                "Range",
                None,
                Vec::new(),
                Some(ValidationRules::range(0.0, 100.0).with_step(1.0)),
            ),
            FieldType::File => ("Upload a file", None, Vec::new(), None),
            FieldType::Rating => ("Rating", None, numbered("", Self::RATING_SCALE), None),
            FieldType::Toggle => ("Toggle", None, Vec::new(), None),
            FieldType::Tags => ("Tags", Some("Add a tag"), Vec::new(), None),
            FieldType::Heading => ("Heading", None, Vec::new(), None),
            FieldType::Paragraph => (
                "Add some descriptive text here.",
                None,
                Vec::new(),
                None,
            ),
            FieldType::Image => ("Image", None, Vec::new(), None),
            FieldType::Divider => ("", None, Vec::new(), None),
            FieldType::Pagebreak => ("Page break", None, Vec::new(), None),
            FieldType::Thankyou => ("Thank you!", None, Vec::new(), None),
        };

        Self {
            id,
            field_type,
            label: label.to_string(),
            required: false,
            placeholder: placeholder.map(str::to_string),
            options,
            validation,
            style: None,
        }
    }

    /// Set the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set whether an answer is required. Ignored for layout types.
    #[must_use]
    pub const fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set the placeholder.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Replace the options.
    #[must_use]
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the constraint bag.
    #[must_use]
    pub fn with_validation(mut self, rules: ValidationRules) -> Self {
        self.validation = Some(rules);
        self
    }

    /// Replace the style hints.
    #[must_use]
    pub fn with_style(mut self, style: FieldStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Whether an answer is required, taking layout types into account.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required && !self.field_type.is_layout()
    }

    /// Whether this field contributes a key to the response map.
    #[must_use]
    pub const fn takes_value(&self) -> bool {
        !self.field_type.is_layout()
    }

    /// Advisory schema lint for editors.
    ///
    /// Reports option lists that do not fit the type. Commands do not
    /// enforce these; an editor can surface them while the form is drafted.
    #[must_use]
    pub fn check_shape(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.field_type.is_choice() && self.options.len() < 2 {
            problems.push(format!(
                "{} field '{}' needs at least 2 options",
                self.field_type, self.label
            ));
        }

        if self.field_type == FieldType::Rating {
            let scale_ok = !self.options.is_empty()
                && self
                    .options
                    .iter()
                    .enumerate()
                    .all(|(i, opt)| opt.trim() == (i + 1).to_string());
            if !scale_ok {
                problems.push(format!(
                    "rating field '{}' needs a 1..n scale",
                    self.label
                ));
            }
        }

        if !self.field_type.has_options() && !self.options.is_empty() {
            problems.push(format!(
                "{} field '{}' does not use options",
                self.field_type, self.label
            ));
        }

        if let Some(rules) = &self.validation {
            if let (Some(min), Some(max)) = (rules.min, rules.max) {
                if min > max {
                    problems.push(format!("field '{}' has min above max", self.label));
                }
            }
            if let (Some(min), Some(max)) = (rules.min_length, rules.max_length) {
                if min > max {
                    problems.push(format!(
                        "field '{}' has minimum length above maximum length",
                        self.label
                    ));
                }
            }
            if rules.step.is_some_and(|step| step <= 0.0) {
                problems.push(format!("field '{}' has a non-positive step", self.label));
            }
        }

        problems
    }
}
