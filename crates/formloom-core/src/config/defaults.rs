//! Default configuration values

use super::types::{FormsConfig, SpamConfig, SpamWeights};

/// Spam verdict threshold.
pub const DEFAULT_SPAM_THRESHOLD: f64 = 0.5;

/// Links tolerated before `url_density` triggers.
pub const DEFAULT_URL_LIMIT: usize = 2;

/// Cap on fields per form.
pub const DEFAULT_MAX_FIELDS: usize = 500;

// ═══════════════════════════════════════════════════════════════════════════
// DEFAULT IMPLEMENTATIONS
// ═══════════════════════════════════════════════════════════════════════════

impl Default for SpamConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SPAM_THRESHOLD,
            url_limit: DEFAULT_URL_LIMIT,
            keywords: Vec::new(),
            weights: SpamWeights::default(),
        }
    }
}

impl Default for SpamWeights {
    fn default() -> Self {
        Self {
            url_density: 0.6,
            spam_keywords: 0.55,
            repeated_characters: 0.35,
            gibberish: 0.45,
            all_caps: 0.3,
            oversized_short_answer: 0.4,
            duplicated_answers: 0.35,
        }
    }
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            max_fields: DEFAULT_MAX_FIELDS,
        }
    }
}
