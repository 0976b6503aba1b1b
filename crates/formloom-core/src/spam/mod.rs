#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

//! Spam scoring for submitted responses.
//!
//! A fixed, ordered list of [`Heuristic`]s each inspects the text answers
//! and may report a [`Signal`] with a strength in `[0, 1]`. Signals are
//! combined as a noisy-OR:
//!
//! ```text
//! confidence = 1 - Π (1 - weight_i * strength_i)
//! is_spam    = confidence >= threshold
//! ```
//!
//! `reasons` lists every triggered heuristic, in heuristic order, when and
//! only when the verdict is spam. Scoring is pure: no I/O, no clock, no
//! randomness.

mod heuristics;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::SpamConfig;
use crate::field::{FieldId, FieldSpec, FieldType};
use crate::form::Responses;

pub use heuristics::{
    AllCaps, DuplicatedAnswers, Gibberish, OversizedShortAnswer, RepeatedCharacters,
    SpamKeywords, UrlDensity, BUILTIN_KEYWORDS,
};

// ═══════════════════════════════════════════════════════════════════════════
// STRATEGY INTERFACE
// ═══════════════════════════════════════════════════════════════════════════

/// One text answer, with the field type when a schema was supplied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Answer<'a> {
    pub field: &'a FieldId,
    pub field_type: Option<FieldType>,
    pub text: &'a str,
}

/// The text-bearing part of a response map.
#[derive(Debug, Clone, Default)]
pub struct SpamContext<'a> {
    answers: Vec<Answer<'a>>,
}

impl<'a> SpamContext<'a> {
    /// Collect text fragments from `responses`, typed via `schema`.
    #[must_use]
    pub fn new(responses: &'a Responses, schema: &BTreeMap<&FieldId, FieldType>) -> Self {
        let answers = responses
            .iter()
            .flat_map(|(field, value)| {
                let field_type = schema.get(field).copied();
                value.text_fragments().into_iter().map(move |text| Answer {
                    field,
                    field_type,
                    text,
                })
            })
            .collect();
        Self { answers }
    }

    /// Every text answer in field-id order.
    #[must_use]
    pub fn answers(&self) -> &[Answer<'a>] {
        &self.answers
    }

    /// Just the text.
    pub fn texts(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.answers.iter().map(|answer| answer.text)
    }
}

/// What a heuristic found.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    /// How strongly the heuristic fired, in `[0, 1]`
    pub strength: f64,
    /// Short human-readable evidence
    pub detail: String,
}

impl Signal {
    #[must_use]
    pub fn new(strength: f64, detail: impl Into<String>) -> Self {
        Self {
            strength,
            detail: detail.into(),
        }
    }
}

/// A named, weighted, pure spam check.
pub trait Heuristic: Send + Sync {
    /// Stable name, used as the reason prefix
    fn name(&self) -> &'static str;

    /// Weight in `[0, 1]`
    fn weight(&self) -> f64;

    /// `None` when the heuristic does not fire
    fn inspect(&self, context: &SpamContext<'_>) -> Option<Signal>;
}

// ═══════════════════════════════════════════════════════════════════════════
// ENGINE
// ═══════════════════════════════════════════════════════════════════════════

/// Verdict for one response map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpamAnalysis {
    pub is_spam: bool,
    pub confidence: f64,
    pub reasons: Vec<String>,
}

impl SpamAnalysis {
    /// Nothing triggered.
    #[must_use]
    pub const fn clean() -> Self {
        Self {
            is_spam: false,
            confidence: 0.0,
            reasons: Vec::new(),
        }
    }
}

/// Ordered heuristics plus a threshold.
pub struct SpamEngine {
    heuristics: Vec<Box<dyn Heuristic>>,
    threshold: f64,
}

impl std::fmt::Debug for SpamEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpamEngine")
            .field("heuristics", &self.heuristic_names())
            .field("threshold", &self.threshold)
            .finish()
    }
}

impl Default for SpamEngine {
    fn default() -> Self {
        Self::new(&SpamConfig::default())
    }
}

impl SpamEngine {
    /// The built-in heuristics, weighted and tuned by `config`.
    #[must_use]
    pub fn new(config: &SpamConfig) -> Self {
        let w = &config.weights;
        let heuristics: Vec<Box<dyn Heuristic>> = vec![
            Box::new(UrlDensity::new(config.url_limit, w.url_density)),
            Box::new(SpamKeywords::new(&config.keywords, w.spam_keywords)),
            Box::new(RepeatedCharacters::new(w.repeated_characters)),
            Box::new(Gibberish::new(w.gibberish)),
            Box::new(AllCaps::new(w.all_caps)),
            Box::new(OversizedShortAnswer::new(w.oversized_short_answer)),
            Box::new(DuplicatedAnswers::new(w.duplicated_answers)),
        ];
        Self::with_heuristics(heuristics, config.threshold)
    }

    /// A custom heuristic list. Order is the order of `reasons`.
    #[must_use]
    pub fn with_heuristics(heuristics: Vec<Box<dyn Heuristic>>, threshold: f64) -> Self {
        Self {
            heuristics,
            threshold,
        }
    }

    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Heuristic names in evaluation order.
    #[must_use]
    pub fn heuristic_names(&self) -> Vec<&'static str> {
        self.heuristics.iter().map(|h| h.name()).collect()
    }

    /// Score responses without field types. Schema-only heuristics stay quiet.
    #[must_use]
    pub fn analyze(&self, responses: &Responses) -> SpamAnalysis {
        self.score(&SpamContext::new(responses, &BTreeMap::new()))
    }

    /// Score responses knowing the form's fields.
    #[must_use]
    pub fn analyze_with_schema<'a, I>(&self, responses: &Responses, fields: I) -> SpamAnalysis
    where
        I: IntoIterator<Item = &'a FieldSpec>,
    {
        let schema: BTreeMap<&FieldId, FieldType> = fields
            .into_iter()
            .map(|field| (&field.id, field.field_type))
            .collect();
        self.score(&SpamContext::new(responses, &schema))
    }

    fn score(&self, context: &SpamContext<'_>) -> SpamAnalysis {
        let triggered: Vec<(&dyn Heuristic, Signal)> = self
            .heuristics
            .iter()
            .filter_map(|h| h.inspect(context).map(|signal| (&**h, signal)))
            .collect();

        if triggered.is_empty() {
            return SpamAnalysis::clean();
        }

        let survival: f64 = triggered
            .iter()
            .map(|(h, signal)| 1.0 - unit(h.weight()) * unit(signal.strength))
            .product();
        let confidence = unit(1.0 - survival);

        if confidence < self.threshold {
            return SpamAnalysis {
                is_spam: false,
                confidence,
                reasons: Vec::new(),
            };
        }

        let reasons: Vec<String> = triggered
            .iter()
            .map(|(h, signal)| format!("{}: {}", h.name(), signal.detail))
            .collect();
        tracing::warn!(confidence, reasons = ?reasons, "submission flagged as spam");

        SpamAnalysis {
            is_spam: true,
            confidence,
            reasons,
        }
    }
}

/// Score with the default configuration.
#[must_use]
pub fn analyze(responses: &Responses) -> SpamAnalysis {
    SpamEngine::default().analyze(responses)
}

fn unit(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}
