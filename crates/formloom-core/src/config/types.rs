//! Configuration type definitions
//!
//! Pure data holders; behavior lives in the sibling modules.

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════
// MAIN CONFIGURATION
// ═══════════════════════════════════════════════════════════════════════════

/// Root configuration structure
///
/// Loaded from defaults → global → project → env vars
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub spam: SpamConfig,
    pub history: HistoryConfig,
    pub forms: FormsConfig,
}

// ═══════════════════════════════════════════════════════════════════════════
// NESTED CONFIGURATION STRUCTURES
// ═══════════════════════════════════════════════════════════════════════════

/// Spam scoring knobs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpamConfig {
    /// Confidence at or above which a submission is spam, in `(0, 1]`
    pub threshold: f64,
    /// Links allowed across all answers before `url_density` triggers
    pub url_limit: usize,
    /// Extra phrases appended to the built-in keyword list
    pub keywords: Vec<String>,
    pub weights: SpamWeights,
}

/// Per-heuristic weight, each in `[0, 1]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpamWeights {
    pub url_density: f64,
    pub spam_keywords: f64,
    pub repeated_characters: f64,
    pub gibberish: f64,
    pub all_caps: f64,
    pub oversized_short_answer: f64,
    pub duplicated_answers: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum undo depth; unbounded when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FormsConfig {
    pub max_fields: usize,
}

// ═══════════════════════════════════════════════════════════════════════════
// PARTIAL LAYERS
// ═══════════════════════════════════════════════════════════════════════════

/// One config file, with `Option<T>` fields for explicit-key merge semantics.
///
/// A key present in the file overrides the earlier layer even when it
/// equals the built-in default; an absent key keeps the earlier value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PartialConfig {
    pub spam: PartialSpamConfig,
    pub history: PartialHistoryConfig,
    pub forms: PartialFormsConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PartialSpamConfig {
    pub threshold: Option<f64>,
    pub url_limit: Option<usize>,
    pub keywords: Option<Vec<String>>,
    pub weights: PartialSpamWeights,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PartialSpamWeights {
    pub url_density: Option<f64>,
    pub spam_keywords: Option<f64>,
    pub repeated_characters: Option<f64>,
    pub gibberish: Option<f64>,
    pub all_caps: Option<f64>,
    pub oversized_short_answer: Option<f64>,
    pub duplicated_answers: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PartialHistoryConfig {
    /// `Some(None)` comes from `limit = "none"` and lifts an earlier cap
    #[serde(deserialize_with = "deserialize_limit")]
    pub limit: Option<Option<usize>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PartialFormsConfig {
    pub max_fields: Option<usize>,
}

/// Accepts a depth or the string `"none"`.
fn deserialize_limit<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Option<usize>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Limit {
        Depth(usize),
        Keyword(String),
    }

    match Limit::deserialize(deserializer)? {
        Limit::Depth(depth) => Ok(Some(Some(depth))),
        Limit::Keyword(word) if word.trim().eq_ignore_ascii_case("none") => Ok(Some(None)),
        Limit::Keyword(word) => Err(serde::de::Error::custom(format!(
            "history.limit must be a number or \"none\", found \"{word}\""
        ))),
    }
}
