//! Field validation engine.
//!
//! Rules run in a fixed precedence and the first failure wins:
//!
//! 1. Presence - required fields need a non-empty answer
//! 2. Shape and format - value kind, email/url/date/time/color syntax, `pattern`
//! 3. Range and length - `min`/`max`/`step`, `min_length`/`max_length`
//! 4. Choice membership - `select`/`radio`/`rating`/`checkbox` against `options`
//! 5. File constraints - `accepted_files`
//!
//! Failures are values ([`FieldError`]), never panics or surfaced errors.
//! Layout-only fields always pass.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use im::OrdMap;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::field::{FieldId, FieldSpec, FieldType, FileRef, ValidationRules, Value};
use crate::form::{FormDefinition, Responses};
use crate::pages::{segment, Page};

// ============================================================================
// FIELD ERRORS
// ============================================================================

/// Why a single field failed validation.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "reason")]
pub enum FieldError {
    #[error("This field is required")]
    #[serde(rename = "required")]
    Required,

    #[error("Please enter a valid {expected}")]
    #[serde(rename = "format")]
    Format { expected: &'static str },

    #[error("Value does not match the required format")]
    #[serde(rename = "pattern")]
    Pattern { pattern: String },

    #[error("Field pattern is not a valid regular expression: {pattern}")]
    #[serde(rename = "invalid_pattern")]
    InvalidPattern { pattern: String },

    #[error("Value must be at least {min}")]
    #[serde(rename = "min")]
    BelowMin { min: f64 },

    #[error("Value must be at most {max}")]
    #[serde(rename = "max")]
    AboveMax { max: f64 },

    #[error("Value must be a multiple of {step}")]
    #[serde(rename = "step")]
    OffStep { step: f64 },

    #[error("Must be at least {min_length} characters")]
    #[serde(rename = "min_length")]
    TooShort { min_length: usize },

    #[error("Must be at most {max_length} characters")]
    #[serde(rename = "max_length")]
    TooLong { max_length: usize },

    #[error("'{value}' is not one of the available options")]
    #[serde(rename = "not_an_option")]
    NotAnOption { value: String },

    #[error("File '{name}' is not an accepted file type")]
    #[serde(rename = "file_type")]
    FileType { name: String },

    #[error("Expected a {expected} answer")]
    #[serde(rename = "type_mismatch")]
    TypeMismatch { expected: &'static str },
}

impl FieldError {
    /// Stable machine-readable reason code.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Format { .. } => "format",
            Self::Pattern { .. } => "pattern",
            Self::InvalidPattern { .. } => "invalid_pattern",
            Self::BelowMin { .. } => "min",
            Self::AboveMax { .. } => "max",
            Self::OffStep { .. } => "step",
            Self::TooShort { .. } => "min_length",
            Self::TooLong { .. } => "max_length",
            Self::NotAnOption { .. } => "not_an_option",
            Self::FileType { .. } => "file_type",
            Self::TypeMismatch { .. } => "type_mismatch",
        }
    }
}

/// Outcome of validating one field.
pub type ValidationResult = Result<(), FieldError>;

/// Per-field failures for a set of fields, keyed by field id.
pub type FieldErrors = OrdMap<FieldId, FieldError>;

// ============================================================================
// SINGLE FIELD
// ============================================================================

/// Validate one candidate value against its field.
///
/// `None` means the field was never answered.
pub fn validate(field: &FieldSpec, value: Option<&Value>) -> ValidationResult {
    if field.field_type.is_layout() {
        return Ok(());
    }

    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return if field.is_required() {
            Err(FieldError::Required)
        } else {
            Ok(())
        };
    };

    let defaults = ValidationRules::default();
    let rules = field.validation.as_ref().unwrap_or(&defaults);

    check_format(field.field_type, value, rules)?;
    check_bounds(field.field_type, value, rules)?;
    check_choices(field, value)?;
    check_files(field.field_type, value, rules)
}

// ============================================================================
// RULE 2: SHAPE AND FORMAT
// ============================================================================

fn check_format(field_type: FieldType, value: &Value, rules: &ValidationRules) -> ValidationResult {
    match field_type {
        FieldType::Text | FieldType::Textarea | FieldType::Phone => {
            let text = expect_text(value)?;
            check_pattern(text, rules)
        }
        FieldType::Email => {
            let text = expect_text(value)?;
            if !matches_builtin(email_regex(), text.trim()) {
                return Err(FieldError::Format {
                    expected: "email address",
                });
            }
            check_pattern(text, rules)
        }
        FieldType::Url => {
            let text = expect_text(value)?;
            match rules.pattern {
                Some(_) => check_pattern(text, rules),
                None if matches_builtin(url_regex(), text.trim()) => Ok(()),
                None => Err(FieldError::Format { expected: "URL" }),
            }
        }
        FieldType::Date => {
            let text = expect_text(value)?;
            parse_date(text.trim())
                .then_some(())
                .ok_or(FieldError::Format { expected: "date" })
        }
        FieldType::Time => {
            let text = expect_text(value)?;
            parse_time(text.trim())
                .then_some(())
                .ok_or(FieldError::Format { expected: "time" })
        }
        FieldType::Datetime => {
            let text = expect_text(value)?;
            parse_datetime(text.trim())
                .then_some(())
                .ok_or(FieldError::Format {
                    expected: "date and time",
                })
        }
        FieldType::Color => {
            let text = expect_text(value)?;
            matches_builtin(color_regex(), text.trim())
                .then_some(())
                .ok_or(FieldError::Format { expected: "color" })
        }
        FieldType::Number | FieldType::Range | FieldType::Rating => value
            .as_number()
            .filter(|n| n.is_finite())
            .map(|_| ())
            .ok_or(FieldError::TypeMismatch { expected: "number" }),
        FieldType::Select | FieldType::Radio => expect_text(value).map(|_| ()),
        FieldType::Checkbox | FieldType::Tags => match value {
            Value::List(_) => Ok(()),
            _ => Err(FieldError::TypeMismatch { expected: "list" }),
        },
        FieldType::Toggle => match value {
            Value::Bool(_) => Ok(()),
            _ => Err(FieldError::TypeMismatch {
                expected: "yes/no",
            }),
        },
        FieldType::File => match value {
            Value::Files(_) => Ok(()),
            _ => Err(FieldError::TypeMismatch { expected: "file" }),
        },
        FieldType::Heading
        | FieldType::Paragraph
        | FieldType::Image
        | FieldType::Divider
        | FieldType::Pagebreak
        | FieldType::Thankyou => Ok(()),
    }
}

fn expect_text(value: &Value) -> Result<&str, FieldError> {
    value
        .as_text()
        .ok_or(FieldError::TypeMismatch { expected: "text" })
}

fn check_pattern(text: &str, rules: &ValidationRules) -> ValidationResult {
    let Some(pattern) = rules.pattern.as_deref() else {
        return Ok(());
    };

    let anchored = Regex::new(&format!("^(?:{pattern})$")).map_err(|_| {
        FieldError::InvalidPattern {
            pattern: pattern.to_string(),
        }
    })?;

    if anchored.is_match(text) {
        Ok(())
    } else {
        Err(FieldError::Pattern {
            pattern: pattern.to_string(),
        })
    }
}

fn matches_builtin(regex: Option<&Regex>, text: &str) -> bool {
    regex.is_some_and(|re| re.is_match(text))
}

fn email_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
}

fn url_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?i)https?://[^\s/?#]+\.[^\s/?#]+(?:[/?#]\S*)?$").ok())
        .as_ref()
}

fn color_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").ok())
        .as_ref()
}

fn parse_date(text: &str) -> bool {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
}

fn parse_time(text: &str) -> bool {
    ["%H:%M", "%H:%M:%S"]
        .iter()
        .any(|fmt| NaiveTime::parse_from_str(text, fmt).is_ok())
}

fn parse_datetime(text: &str) -> bool {
    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .any(|fmt| NaiveDateTime::parse_from_str(text, fmt).is_ok())
        || DateTime::parse_from_rfc3339(text).is_ok()
}

// ============================================================================
// RULE 3: RANGE AND LENGTH
// ============================================================================

const STEP_TOLERANCE: f64 = 1e-9;

/// Rounding slack for `(n - min) / step`, which grows with the operands'
/// magnitude measured in steps.
fn step_tolerance(n: f64, min: f64, step: f64) -> f64 {
    let scale = (n.abs().max(min.abs()) / step).max(1.0);
    STEP_TOLERANCE.max(scale * f64::EPSILON * 8.0)
}

fn check_bounds(field_type: FieldType, value: &Value, rules: &ValidationRules) -> ValidationResult {
    match field_type {
        FieldType::Number | FieldType::Range => {
            let Some(n) = value.as_number() else {
                return Ok(());
            };
            if let Some(min) = rules.min.filter(|min| n < *min) {
                return Err(FieldError::BelowMin { min });
            }
            if let Some(max) = rules.max.filter(|max| n > *max) {
                return Err(FieldError::AboveMax { max });
            }
            match rules.step.filter(|step| *step > 0.0) {
                Some(step) => {
                    let min = rules.min.unwrap_or(0.0);
                    let steps = (n - min) / step;
                    if (steps - steps.round()).abs() > step_tolerance(n, min, step) {
                        Err(FieldError::OffStep { step })
                    } else {
                        Ok(())
                    }
                }
                None => Ok(()),
            }
        }
        FieldType::Text | FieldType::Textarea => {
            let length = value.as_text().map_or(0, |s| s.chars().count());
            if let Some(min_length) = rules.min_length.filter(|min| length < *min) {
                return Err(FieldError::TooShort { min_length });
            }
            if let Some(max_length) = rules.max_length.filter(|max| length > *max) {
                return Err(FieldError::TooLong { max_length });
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

// ============================================================================
// RULE 4: CHOICE MEMBERSHIP
// ============================================================================

fn check_choices(field: &FieldSpec, value: &Value) -> ValidationResult {
    let is_option = |candidate: &str| field.options.iter().any(|opt| opt == candidate);

    match (field.field_type, value) {
        (FieldType::Select | FieldType::Radio, Value::Text(choice)) => {
            if is_option(choice) {
                Ok(())
            } else {
                Err(FieldError::NotAnOption {
                    value: choice.clone(),
                })
            }
        }
        (FieldType::Checkbox, Value::List(choices)) => choices
            .iter()
            .find(|choice| !is_option(choice))
            .map_or(Ok(()), |choice| {
                Err(FieldError::NotAnOption {
                    value: choice.clone(),
                })
            }),
        (FieldType::Rating, _) => {
            let scale_match = value.as_number().is_some_and(|n| {
                field
                    .options
                    .iter()
                    .any(|opt| opt.trim().parse::<f64>().ok() == Some(n))
            });
            let text_match = value.as_text().is_some_and(is_option);
            if scale_match || text_match {
                Ok(())
            } else {
                Err(FieldError::NotAnOption {
                    value: value.to_cell(),
                })
            }
        }
        _ => Ok(()),
    }
}

// ============================================================================
// RULE 5: FILES
// ============================================================================

fn check_files(field_type: FieldType, value: &Value, rules: &ValidationRules) -> ValidationResult {
    match (field_type, value) {
        (FieldType::File, Value::Files(files)) if !rules.accepted_files.is_empty() => files
            .iter()
            .find(|file| !is_accepted(file, &rules.accepted_files))
            .map_or(Ok(()), |file| {
                Err(FieldError::FileType {
                    name: file.name.clone(),
                })
            }),
        _ => Ok(()),
    }
}

fn is_accepted(file: &FileRef, accepted: &[String]) -> bool {
    let extension = file.extension();
    let mime = file.mime();

    accepted.iter().map(|entry| entry.trim().to_ascii_lowercase()).any(|entry| {
        if entry == "*" || entry == "*/*" {
            true
        } else if let Some(ext) = entry.strip_prefix('.') {
            extension.as_deref() == Some(ext)
        } else if let Some(major) = entry.strip_suffix("/*") {
            mime.as_deref()
                .and_then(|m| m.split_once('/'))
                .is_some_and(|(m_major, _)| m_major == major)
        } else {
            mime.as_deref() == Some(entry.as_str())
        }
    })
}

// ============================================================================
// PAGES AND FORMS
// ============================================================================

/// Validate every field in `fields` against `responses`, collecting failures.
pub fn validate_fields<'a, I>(fields: I, responses: &Responses) -> FieldErrors
where
    I: IntoIterator<Item = &'a FieldSpec>,
{
    fields
        .into_iter()
        .filter_map(|field| {
            validate(field, responses.get(&field.id))
                .err()
                .map(|err| (field.id.clone(), err))
        })
        .collect()
}

/// Validate every field on one page.
#[must_use]
pub fn validate_page(page: &Page, responses: &Responses) -> FieldErrors {
    validate_fields(&page.fields, responses)
}

/// Validate every page of a form at once.
///
/// Navigation only ever checks the active page; this is for re-checking a
/// submission that arrived from elsewhere.
#[must_use]
pub fn validate_form(form: &FormDefinition, responses: &Responses) -> FieldErrors {
    segment(&form.elements)
        .pages
        .iter()
        .fold(FieldErrors::new(), |errors, page| {
            errors.union(validate_page(page, responses))
        })
}

/// Keep only answers for input fields present in `fields`.
///
/// Layout fields and unknown ids never reach a submitted response map.
pub fn retain_known<'a, I>(fields: I, responses: &Responses) -> Responses
where
    I: IntoIterator<Item = &'a FieldSpec>,
{
    fields
        .into_iter()
        .filter(|field| field.takes_value())
        .filter_map(|field| {
            responses
                .get(&field.id)
                .filter(|value| !value.is_empty())
                .map(|value| (field.id.clone(), value.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldId;

    fn field(field_type: FieldType) -> FieldSpec {
        FieldSpec::new(FieldId::new("q"), field_type)
    }

    fn reason(field: &FieldSpec, value: Value) -> Option<&'static str> {
        validate(field, Some(&value)).err().map(|e| e.reason())
    }

    // Behavior: presence
    #[test]
    fn given_required_text_when_empty_then_required() {
        let required = field(FieldType::Text).with_required(true);
        assert_eq!(reason(&required, Value::text("")), Some("required"));
        assert_eq!(validate(&required, None), Err(FieldError::Required));

        let optional = field(FieldType::Text);
        assert_eq!(validate(&optional, Some(&Value::text(""))), Ok(()));
        assert_eq!(validate(&optional, None), Ok(()));
    }

    #[test]
    fn given_required_toggle_when_false_then_ok() {
        let toggle = field(FieldType::Toggle).with_required(true);
        assert_eq!(validate(&toggle, Some(&Value::Bool(false))), Ok(()));
    }

    #[test]
    fn given_required_checkbox_when_nothing_ticked_then_required() {
        let checkbox = field(FieldType::Checkbox).with_required(true);
        assert_eq!(reason(&checkbox, Value::List(vec![])), Some("required"));
    }

    #[test]
    fn given_layout_field_then_always_ok() {
        for field_type in [
            FieldType::Heading,
            FieldType::Paragraph,
            FieldType::Divider,
            FieldType::Pagebreak,
            FieldType::Thankyou,
        ] {
            let layout = field(field_type).with_required(true);
            assert_eq!(validate(&layout, None), Ok(()));
        }
    }

    // Behavior: format
    #[test]
    fn given_email_field_then_format_enforced() {
        let email = field(FieldType::Email).with_required(true);
        assert_eq!(reason(&email, Value::text("not-an-email")), Some("format"));
        assert_eq!(validate(&email, Some(&Value::text("a@b.com"))), Ok(()));
    }

    #[test]
    fn given_required_beats_format() {
        let email = field(FieldType::Email).with_required(true);
        assert_eq!(reason(&email, Value::text("  ")), Some("required"));
    }

    #[test]
    fn given_phone_pattern_then_applied() {
        let phone =
            field(FieldType::Phone).with_validation(ValidationRules::pattern(r"\+?[0-9 ]{7,15}"));
        assert_eq!(validate(&phone, Some(&Value::text("+44 20 7946 0958"))), Ok(()));
        assert_eq!(reason(&phone, Value::text("call me")), Some("pattern"));
        assert_eq!(
            validate(&field(FieldType::Phone), Some(&Value::text("call me"))),
            Ok(())
        );
    }

    #[test]
    fn given_url_without_pattern_then_builtin_check() {
        let url = field(FieldType::Url);
        assert_eq!(validate(&url, Some(&Value::text("https://example.com/a"))), Ok(()));
        assert_eq!(reason(&url, Value::text("example")), Some("format"));

        let intranet = field(FieldType::Url).with_validation(ValidationRules::pattern(r"http://intranet/.*"));
        assert_eq!(validate(&intranet, Some(&Value::text("http://intranet/wiki"))), Ok(()));
    }

    #[test]
    fn given_pattern_then_match_is_anchored() {
        let code = field(FieldType::Text).with_validation(ValidationRules::pattern("[A-Z]{3}"));
        assert_eq!(validate(&code, Some(&Value::text("ABC"))), Ok(()));
        assert_eq!(reason(&code, Value::text("xABCx")), Some("pattern"));
    }

    #[test]
    fn given_broken_pattern_then_invalid_pattern() {
        let broken = field(FieldType::Text).with_validation(ValidationRules::pattern("(unclosed"));
        assert_eq!(reason(&broken, Value::text("x")), Some("invalid_pattern"));
    }

    #[test]
    fn given_date_time_and_color_then_syntax_checked() {
        assert_eq!(validate(&field(FieldType::Date), Some(&Value::text("2024-02-29"))), Ok(()));
        assert_eq!(reason(&field(FieldType::Date), Value::text("2023-02-29")), Some("format"));
        assert_eq!(validate(&field(FieldType::Time), Some(&Value::text("09:30"))), Ok(()));
        assert_eq!(reason(&field(FieldType::Time), Value::text("25:00")), Some("format"));
        assert_eq!(
            validate(&field(FieldType::Datetime), Some(&Value::text("2024-05-01T10:15"))),
            Ok(())
        );
        assert_eq!(validate(&field(FieldType::Color), Some(&Value::text("#a1B2c3"))), Ok(()));
        assert_eq!(reason(&field(FieldType::Color), Value::text("red")), Some("format"));
    }

    #[test]
    fn given_wrong_value_shape_then_type_mismatch() {
        assert_eq!(reason(&field(FieldType::Text), Value::Number(1.0)), Some("type_mismatch"));
        assert_eq!(reason(&field(FieldType::Number), Value::text("ten")), Some("type_mismatch"));
        assert_eq!(reason(&field(FieldType::Toggle), Value::text("yes")), Some("type_mismatch"));
    }

    // Behavior: range and length
    #[test]
    fn given_number_range_then_boundaries_inclusive() {
        let number =
            field(FieldType::Number).with_validation(ValidationRules::range(0.0, 100.0));
        assert_eq!(validate(&number, Some(&Value::Number(100.0))), Ok(()));
        assert_eq!(validate(&number, Some(&Value::Number(0.0))), Ok(()));
        assert_eq!(reason(&number, Value::Number(101.0)), Some("max"));
        assert_eq!(reason(&number, Value::Number(-1.0)), Some("min"));
        assert_eq!(validate(&number, Some(&Value::text("42"))), Ok(()));
    }

    #[test]
    fn given_step_then_offset_from_min() {
        let range = field(FieldType::Range)
            .with_validation(ValidationRules::range(1.0, 10.0).with_step(3.0));
        assert_eq!(validate(&range, Some(&Value::Number(7.0))), Ok(()));
        assert_eq!(reason(&range, Value::Number(6.0)), Some("step"));

        let decimals = field(FieldType::Number)
            .with_validation(ValidationRules::default().with_step(0.1));
        assert_eq!(validate(&decimals, Some(&Value::Number(0.3))), Ok(()));
    }

    #[test]
    fn given_large_value_on_fine_step_then_rounding_tolerated() {
        let decimals = field(FieldType::Number)
            .with_validation(ValidationRules::default().with_step(0.1));
        assert_eq!(validate(&decimals, Some(&Value::Number(123_456_789.1))), Ok(()));
        assert_eq!(reason(&decimals, Value::Number(123_456_789.15)), Some("step"));

        let offset = field(FieldType::Number)
            .with_validation(ValidationRules::range(1e9, 2e9).with_step(0.5));
        assert_eq!(validate(&offset, Some(&Value::Number(1e9 + 0.5))), Ok(()));
        assert_eq!(reason(&offset, Value::Number(1e9 + 0.25)), Some("step"));
    }

    #[test]
    fn given_length_limits_then_counted_in_chars() {
        let text = field(FieldType::Textarea)
            .with_validation(ValidationRules::length(Some(2), Some(4)));
        assert_eq!(reason(&text, Value::text("a")), Some("min_length"));
        assert_eq!(validate(&text, Some(&Value::text("äöüß"))), Ok(()));
        assert_eq!(reason(&text, Value::text("abcde")), Some("max_length"));
    }

    // Behavior: choices
    #[test]
    fn given_select_then_value_must_be_option() {
        let select = field(FieldType::Select).with_options(["Red", "Blue"]);
        assert_eq!(validate(&select, Some(&Value::text("Red"))), Ok(()));
        assert_eq!(reason(&select, Value::text("Green")), Some("not_an_option"));
    }

    #[test]
    fn given_checkbox_then_subset_of_options() {
        let checkbox = field(FieldType::Checkbox).with_options(["a", "b", "c"]);
        assert_eq!(validate(&checkbox, Some(&Value::list(["a", "c"]))), Ok(()));
        assert_eq!(
            validate(&checkbox, Some(&Value::list(["a", "z"]))),
            Err(FieldError::NotAnOption { value: "z".into() })
        );
    }

    #[test]
    fn given_rating_then_number_on_scale() {
        let rating = field(FieldType::Rating).with_options(["1", "2", "3", "4", "5"]);
        assert_eq!(validate(&rating, Some(&Value::Number(5.0))), Ok(()));
        assert_eq!(validate(&rating, Some(&Value::text("3"))), Ok(()));
        assert_eq!(reason(&rating, Value::Number(6.0)), Some("not_an_option"));
    }

    // Behavior: files
    #[test]
    fn given_accepted_files_then_extension_and_mime_rules() {
        let upload = field(FieldType::File)
            .with_validation(ValidationRules::accepted_files([".pdf", "image/*"]));
        let ok = Value::Files(vec![FileRef::new("cv.PDF"), FileRef::new("me.png")]);
        assert_eq!(validate(&upload, Some(&ok)), Ok(()));

        let bad = Value::Files(vec![FileRef::new("cv.pdf"), FileRef::new("run.exe")]);
        assert_eq!(
            validate(&upload, Some(&bad)),
            Err(FieldError::FileType {
                name: "run.exe".into()
            })
        );
    }

    #[test]
    fn given_optional_file_when_absent_then_ok() {
        let upload = field(FieldType::File)
            .with_validation(ValidationRules::accepted_files([".pdf"]));
        assert_eq!(validate(&upload, Some(&Value::Files(vec![]))), Ok(()));
        assert_eq!(
            reason(&upload.with_required(true), Value::Files(vec![])),
            Some("required")
        );
    }

    #[test]
    fn given_errors_then_serialized_with_reason_tag() -> Result<(), serde_json::Error> {
        let json = serde_json::to_value(FieldError::AboveMax { max: 5.0 })?;
        assert_eq!(json["reason"], "max");
        assert_eq!(FieldError::AboveMax { max: 5.0 }.to_string(), "Value must be at most 5");
        Ok(())
    }

    #[test]
    fn given_fields_then_errors_collected_per_id() {
        let a = FieldSpec::new(FieldId::new("a"), FieldType::Text).with_required(true);
        let b = FieldSpec::new(FieldId::new("b"), FieldType::Email);
        let responses = Responses::new().update(FieldId::new("b"), Value::text("nope"));
        let errors = validate_fields([&a, &b], &responses);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(&FieldId::new("a")), Some(&FieldError::Required));
    }

    #[test]
    fn given_layout_and_unknown_keys_then_retain_known_drops_them() {
        let a = FieldSpec::new(FieldId::new("a"), FieldType::Text);
        let h = FieldSpec::new(FieldId::new("h"), FieldType::Heading);
        let responses = Responses::new()
            .update(FieldId::new("a"), Value::text("x"))
            .update(FieldId::new("h"), Value::text("y"))
            .update(FieldId::new("ghost"), Value::text("z"));
        let kept = retain_known([&a, &h], &responses);
        assert_eq!(kept.len(), 1);
        assert!(kept.contains_key(&FieldId::new("a")));
    }

    #[test]
    fn given_multi_page_form_then_validate_form_checks_every_page() {
        let form = FormDefinition::new("Two").with_elements([
            FieldSpec::new(FieldId::new("a"), FieldType::Text).with_required(true),
            FieldSpec::new(FieldId::new("pb"), FieldType::Pagebreak),
            FieldSpec::new(FieldId::new("b"), FieldType::Email).with_required(true),
        ]);
        let responses = Responses::new().update(FieldId::new("a"), Value::text("Alice"));
        let errors = validate_form(&form, &responses);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(&FieldId::new("b")), Some(&FieldError::Required));

        let first = &segment(&form.elements).pages[0];
        assert!(validate_page(first, &responses).is_empty());
    }
}
