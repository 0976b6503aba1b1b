//! The built-in spam heuristics.
//!
//! Each one is a small pure struct; all of them ignore non-text answers.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use itertools::Itertools;
use regex::Regex;

use super::{Heuristic, Signal, SpamContext};
use crate::field::FieldId;

/// Phrases that show up in form spam far more than in real answers.
pub const BUILTIN_KEYWORDS: &[&str] = &[
    "viagra",
    "cialis",
    "casino",
    "cheap meds",
    "buy now",
    "click here",
    "free money",
    "make money fast",
    "work from home",
    "limited time offer",
    "100% free",
    "crypto giveaway",
    "bitcoin investment",
    "seo services",
    "backlinks",
    "weight loss",
    "you have won",
];

const REPEAT_RUN: usize = 6;
const GIBBERISH_WORD_LEN: usize = 6;
const GIBBERISH_CONSONANT_RUN: usize = 5;
const GIBBERISH_RATIO: f64 = 0.3;
const CAPS_MIN_LETTERS: usize = 20;
const CAPS_RATIO: f64 = 0.7;
const SHORT_ANSWER_MAX_CHARS: usize = 200;
const DUPLICATE_MIN_CHARS: usize = 12;

fn url_regex() -> Option<&'static Regex> {
    static URL: OnceLock<Option<Regex>> = OnceLock::new();
    URL.get_or_init(|| Regex::new(r"(?i)\b(?:https?://|www\.)\S+").ok())
        .as_ref()
}

fn field_list<'a>(fields: impl IntoIterator<Item = &'a FieldId>) -> String {
    fields.into_iter().map(FieldId::as_str).join(", ")
}

// ═══════════════════════════════════════════════════════════════════════════
// URL DENSITY
// ═══════════════════════════════════════════════════════════════════════════

/// More links than a real answer needs.
#[derive(Debug, Clone)]
pub struct UrlDensity {
    limit: usize,
    weight: f64,
}

impl UrlDensity {
    #[must_use]
    pub const fn new(limit: usize, weight: f64) -> Self {
        Self { limit, weight }
    }
}

impl Heuristic for UrlDensity {
    fn name(&self) -> &'static str {
        "url_density"
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn inspect(&self, context: &SpamContext<'_>) -> Option<Signal> {
        let re = url_regex()?;
        let count: usize = context.texts().map(|text| re.find_iter(text).count()).sum();
        if count <= self.limit {
            return None;
        }
        let excess = (count - self.limit) as f64;
        Some(Signal::new(
            (0.25f64.mul_add(excess, 0.5)).min(1.0),
            format!("{count} links (limit {})", self.limit),
        ))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// KEYWORDS
// ═══════════════════════════════════════════════════════════════════════════

/// Known spam phrases, matched case-insensitively.
#[derive(Debug, Clone)]
pub struct SpamKeywords {
    keywords: Vec<String>,
    weight: f64,
}

impl SpamKeywords {
    /// Built-in phrases plus `extra`.
    #[must_use]
    pub fn new(extra: &[String], weight: f64) -> Self {
        let keywords = BUILTIN_KEYWORDS
            .iter()
            .map(|k| (*k).to_string())
            .chain(extra.iter().map(|k| k.trim().to_lowercase()))
            .filter(|k| !k.is_empty())
            .unique()
            .collect();
        Self { keywords, weight }
    }
}

impl Heuristic for SpamKeywords {
    fn name(&self) -> &'static str {
        "spam_keywords"
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn inspect(&self, context: &SpamContext<'_>) -> Option<Signal> {
        let haystack = context.texts().map(str::to_lowercase).join("\n");
        let hits: Vec<&str> = self
            .keywords
            .iter()
            .filter(|k| haystack.contains(k.as_str()))
            .map(String::as_str)
            .collect();
        if hits.is_empty() {
            return None;
        }
        let extra = (hits.len() - 1) as f64;
        Some(Signal::new(
            (0.2f64.mul_add(extra, 0.6)).min(1.0),
            format!("matched {}", hits.iter().map(|k| format!("\"{k}\"")).join(", ")),
        ))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// REPEATED CHARACTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Keyboard mashing such as `aaaaaaa` or `!!!!!!!!`.
#[derive(Debug, Clone)]
pub struct RepeatedCharacters {
    weight: f64,
}

impl RepeatedCharacters {
    #[must_use]
    pub const fn new(weight: f64) -> Self {
        Self { weight }
    }
}

impl Heuristic for RepeatedCharacters {
    fn name(&self) -> &'static str {
        "repeated_characters"
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn inspect(&self, context: &SpamContext<'_>) -> Option<Signal> {
        let fields: BTreeSet<&FieldId> = context
            .answers()
            .iter()
            .filter(|answer| {
                answer
                    .text
                    .chars()
                    .dedup_with_count()
                    .any(|(run, c)| run >= REPEAT_RUN && !c.is_whitespace())
            })
            .map(|answer| answer.field)
            .collect();
        if fields.is_empty() {
            return None;
        }
        Some(Signal::new(
            1.0,
            format!("character runs of {REPEAT_RUN}+ in {}", field_list(fields)),
        ))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// GIBBERISH
// ═══════════════════════════════════════════════════════════════════════════

/// Long words that are not pronounceable.
#[derive(Debug, Clone)]
pub struct Gibberish {
    weight: f64,
}

impl Gibberish {
    #[must_use]
    pub const fn new(weight: f64) -> Self {
        Self { weight }
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

fn looks_unpronounceable(word: &str) -> bool {
    let has_vowel = word.chars().any(is_vowel);
    let longest_consonant_run = word
        .chars()
        .map(|c| !is_vowel(c))
        .dedup_with_count()
        .filter(|&(_, consonant)| consonant)
        .map(|(run, _)| run)
        .max()
        .unwrap_or(0);
    !has_vowel || longest_consonant_run >= GIBBERISH_CONSONANT_RUN
}

impl Heuristic for Gibberish {
    fn name(&self) -> &'static str {
        "gibberish"
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn inspect(&self, context: &SpamContext<'_>) -> Option<Signal> {
        let (long, odd) = context
            .texts()
            .flat_map(|text| text.split(|c: char| !c.is_ascii_alphabetic()))
            .filter(|word| word.len() >= GIBBERISH_WORD_LEN)
            .fold((0usize, 0usize), |(long, odd), word| {
                (long + 1, odd + usize::from(looks_unpronounceable(word)))
            });
        if long == 0 {
            return None;
        }
        let ratio = odd as f64 / long as f64;
        (ratio >= GIBBERISH_RATIO).then(|| {
            Signal::new(ratio, format!("{odd} of {long} long words look random"))
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// ALL CAPS
// ═══════════════════════════════════════════════════════════════════════════

/// Shouting.
#[derive(Debug, Clone)]
pub struct AllCaps {
    weight: f64,
}

impl AllCaps {
    #[must_use]
    pub const fn new(weight: f64) -> Self {
        Self { weight }
    }
}

impl Heuristic for AllCaps {
    fn name(&self) -> &'static str {
        "all_caps"
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn inspect(&self, context: &SpamContext<'_>) -> Option<Signal> {
        let (letters, upper) = context
            .texts()
            .flat_map(str::chars)
            .filter(|c| c.is_uppercase() || c.is_lowercase())
            .fold((0usize, 0usize), |(letters, upper), c| {
                (letters + 1, upper + usize::from(c.is_uppercase()))
            });
        if letters < CAPS_MIN_LETTERS {
            return None;
        }
        let ratio = upper as f64 / letters as f64;
        (ratio >= CAPS_RATIO).then(|| {
            Signal::new(1.0, format!("{:.0}% of letters uppercase", ratio * 100.0))
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// OVERSIZED SHORT ANSWER
// ═══════════════════════════════════════════════════════════════════════════

/// A short-label field holding an essay. Needs field types, so it only
/// fires when scoring with a schema.
#[derive(Debug, Clone)]
pub struct OversizedShortAnswer {
    weight: f64,
}

impl OversizedShortAnswer {
    #[must_use]
    pub const fn new(weight: f64) -> Self {
        Self { weight }
    }
}

impl Heuristic for OversizedShortAnswer {
    fn name(&self) -> &'static str {
        "oversized_short_answer"
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn inspect(&self, context: &SpamContext<'_>) -> Option<Signal> {
        let fields: BTreeSet<&FieldId> = context
            .answers()
            .iter()
            .filter(|answer| answer.field_type.is_some_and(|t| t.is_short_answer()))
            .filter(|answer| {
                answer.text.chars().count() > SHORT_ANSWER_MAX_CHARS
                    || answer.text.trim().contains('\n')
            })
            .map(|answer| answer.field)
            .collect();
        if fields.is_empty() {
            return None;
        }
        Some(Signal::new(
            1.0,
            format!("long or multi-line text in {}", field_list(fields)),
        ))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// DUPLICATED ANSWERS
// ═══════════════════════════════════════════════════════════════════════════

/// The same sentence pasted into several fields.
#[derive(Debug, Clone)]
pub struct DuplicatedAnswers {
    weight: f64,
}

impl DuplicatedAnswers {
    #[must_use]
    pub const fn new(weight: f64) -> Self {
        Self { weight }
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace().join(" ").to_lowercase()
}

impl Heuristic for DuplicatedAnswers {
    fn name(&self) -> &'static str {
        "duplicated_answers"
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn inspect(&self, context: &SpamContext<'_>) -> Option<Signal> {
        let by_text: BTreeMap<String, BTreeSet<&FieldId>> = context
            .answers()
            .iter()
            .map(|answer| (normalize(answer.text), answer.field))
            .filter(|(text, _)| text.chars().count() >= DUPLICATE_MIN_CHARS)
            .fold(BTreeMap::new(), |mut acc, (text, field)| {
                acc.entry(text).or_insert_with(BTreeSet::new).insert(field);
                acc
            });
        let fields: BTreeSet<&FieldId> = by_text
            .into_values()
            .filter(|fields| fields.len() >= 2)
            .flatten()
            .collect();
        if fields.is_empty() {
            return None;
        }
        Some(Signal::new(
            1.0,
            format!("identical text in {}", field_list(fields)),
        ))
    }
}
