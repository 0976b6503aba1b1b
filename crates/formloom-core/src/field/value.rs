//! Response values, tagged by shape.
//!
//! A field's type decides which variant it expects; the validation engine
//! matches on both instead of probing untyped data.

use serde::{Deserialize, Serialize};

/// A file attached to a `file` field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileRef {
    /// Original file name, including extension
    pub name: String,
    /// MIME type reported by the uploader, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl FileRef {
    /// Create a file reference without a reported MIME type.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content_type: None,
        }
    }

    /// Attach a reported MIME type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Lowercased extension without the dot.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
    }

    /// Reported MIME type, or one inferred from the extension.
    #[must_use]
    pub fn mime(&self) -> Option<String> {
        self.content_type
            .as_ref()
            .map(|ct| ct.to_ascii_lowercase())
            .or_else(|| {
                self.extension()
                    .and_then(|ext| mime_for_extension(&ext))
                    .map(str::to_string)
            })
    }
}

fn mime_for_extension(ext: &str) -> Option<&'static str> {
    match ext {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "pdf" => Some("application/pdf"),
        "txt" => Some("text/plain"),
        "csv" => Some("text/csv"),
        "doc" => Some("application/msword"),
        "docx" => Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        "zip" => Some("application/zip"),
        "mp3" => Some("audio/mpeg"),
        "mp4" => Some("video/mp4"),
        _ => None,
    }
}

/// A single response value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// Free text, dates, times, colors and single choices
    Text(String),
    /// Numbers, ranges and ratings
    Number(f64),
    /// Toggle state; `false` is a real answer
    Bool(bool),
    /// Checkbox selections and tags
    List(Vec<String>),
    /// Uploaded files
    Files(Vec<FileRef>),
}

impl Value {
    /// Build a text value.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Build a list value.
    #[must_use]
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Whether this value counts as "no answer" for presence checks.
    ///
    /// Whitespace-only text is empty. `Bool(false)` and every number are
    /// answers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) | Self::Bool(_) => false,
            Self::List(items) => items.is_empty(),
            Self::Files(files) => files.is_empty(),
        }
    }

    /// Numeric view: numbers directly, text when it parses as a number.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Borrow the text content, if any.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Every piece of free text carried by the value.
    #[must_use]
    pub fn text_fragments(&self) -> Vec<&str> {
        match self {
            Self::Text(s) => vec![s.as_str()],
            Self::List(items) => items.iter().map(String::as_str).collect(),
            Self::Number(_) | Self::Bool(_) | Self::Files(_) => Vec::new(),
        }
    }

    /// Flat cell rendering used by the export projection.
    #[must_use]
    pub fn to_cell(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::List(items) => items.join(", "),
            Self::Files(files) => files
                .iter()
                .map(|f| f.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_false_toggle_is_an_answer() {
        assert!(!Value::Bool(false).is_empty());
    }

    #[test]
    fn test_whitespace_text_is_empty() {
        assert!(Value::text("   ").is_empty());
        assert!(Value::text("").is_empty());
        assert!(!Value::text(" a ").is_empty());
    }

    #[test]
    fn test_empty_collections_are_empty() {
        assert!(Value::List(vec![]).is_empty());
        assert!(Value::Files(vec![]).is_empty());
    }

    #[test]
    fn test_numeric_text_coerces() {
        assert_eq!(Value::text(" 42 ").as_number(), Some(42.0));
        assert_eq!(Value::text("abc").as_number(), None);
        assert_eq!(Value::Bool(true).as_number(), None);
    }

    #[test]
    fn test_file_mime_inferred_from_extension() {
        assert_eq!(
            FileRef::new("Scan.PDF").mime().as_deref(),
            Some("application/pdf")
        );
        assert_eq!(
            FileRef::new("x.bin")
                .with_content_type("Application/Octet-Stream")
                .mime()
                .as_deref(),
            Some("application/octet-stream")
        );
        assert_eq!(FileRef::new("noext").extension(), None);
    }

    #[test]
    fn test_value_serializes_tagged() -> Result<(), serde_json::Error> {
        let json = serde_json::to_string(&Value::text("hi"))?;
        assert_eq!(json, r#"{"kind":"text","value":"hi"}"#);
        let back: Value = serde_json::from_str(r#"{"kind":"list","value":["a","b"]}"#)?;
        assert_eq!(back, Value::list(["a", "b"]));
        Ok(())
    }

    #[test]
    fn test_cell_rendering() {
        assert_eq!(Value::list(["a", "b"]).to_cell(), "a, b");
        assert_eq!(Value::Number(3.5).to_cell(), "3.5");
        assert_eq!(
            Value::Files(vec![FileRef::new("a.png"), FileRef::new("b.pdf")]).to_cell(),
            "a.png, b.pdf"
        );
    }
}
