//! Configuration merging logic
//!
//! Later layers override earlier ones (defaults → global → project → env).
//! Each file is read as a [`PartialConfig`]; only keys present in it
//! replace the accumulated values.

use super::types::{
    Config, FormsConfig, HistoryConfig, PartialConfig, PartialFormsConfig, PartialHistoryConfig,
    PartialSpamConfig, PartialSpamWeights, SpamConfig, SpamWeights,
};

// ═══════════════════════════════════════════════════════════════════════════
// MERGE IMPLEMENTATIONS
// ═══════════════════════════════════════════════════════════════════════════

impl Config {
    /// Merge one file layer into this config, updating only present keys.
    ///
    /// Lists are replaced, not appended.
    pub fn merge_partial(&mut self, partial: PartialConfig) {
        self.spam.merge_partial(partial.spam);
        self.history.merge_partial(partial.history);
        self.forms.merge_partial(partial.forms);
    }

    /// Consuming form of [`Config::merge_partial`].
    #[must_use]
    pub fn merged(mut self, partial: PartialConfig) -> Self {
        self.merge_partial(partial);
        self
    }
}

impl SpamConfig {
    fn merge_partial(&mut self, partial: PartialSpamConfig) {
        if let Some(threshold) = partial.threshold {
            self.threshold = threshold;
        }
        if let Some(url_limit) = partial.url_limit {
            self.url_limit = url_limit;
        }
        if let Some(keywords) = partial.keywords {
            self.keywords = keywords;
        }
        self.weights.merge_partial(partial.weights);
    }
}

impl SpamWeights {
    fn merge_partial(&mut self, partial: PartialSpamWeights) {
        let slots = [
            (&mut self.url_density, partial.url_density),
            (&mut self.spam_keywords, partial.spam_keywords),
            (&mut self.repeated_characters, partial.repeated_characters),
            (&mut self.gibberish, partial.gibberish),
            (&mut self.all_caps, partial.all_caps),
            (&mut self.oversized_short_answer, partial.oversized_short_answer),
            (&mut self.duplicated_answers, partial.duplicated_answers),
        ];
        for (slot, value) in slots {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

impl HistoryConfig {
    fn merge_partial(&mut self, partial: PartialHistoryConfig) {
        if let Some(limit) = partial.limit {
            self.limit = limit;
        }
    }
}

impl FormsConfig {
    fn merge_partial(&mut self, partial: PartialFormsConfig) {
        if let Some(max_fields) = partial.max_fields {
            self.max_fields = max_fields;
        }
    }
}
