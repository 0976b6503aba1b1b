//! Configuration validation

use super::types::Config;
use crate::{Error, Result};

// ═══════════════════════════════════════════════════════════════════════════
// VALIDATION LOGIC
// ═══════════════════════════════════════════════════════════════════════════

impl Config {
    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any values are out of range or invalid
    pub fn validate(&self) -> Result<()> {
        let threshold = self.spam.threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(Error::invalid_config(format!(
                "spam.threshold must be in (0, 1], got {threshold}"
            )));
        }

        let w = &self.spam.weights;
        let weights = [
            ("url_density", w.url_density),
            ("spam_keywords", w.spam_keywords),
            ("repeated_characters", w.repeated_characters),
            ("gibberish", w.gibberish),
            ("all_caps", w.all_caps),
            ("oversized_short_answer", w.oversized_short_answer),
            ("duplicated_answers", w.duplicated_answers),
        ];
        if let Some((name, weight)) = weights
            .iter()
            .find(|(_, weight)| !(0.0..=1.0).contains(weight))
        {
            return Err(Error::invalid_config(format!(
                "spam.weights.{name} must be in [0, 1], got {weight}"
            )));
        }

        if self.spam.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(Error::invalid_config(
                "spam.keywords cannot contain empty entries",
            ));
        }

        if self.history.limit == Some(0) {
            return Err(Error::invalid_config(
                "history.limit must be at least 1 - unset it for unbounded history",
            ));
        }

        if self.forms.max_fields == 0 {
            return Err(Error::invalid_config("forms.max_fields must be at least 1"));
        }

        Ok(())
    }
}
