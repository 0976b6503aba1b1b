//! `formloom check`: whole-form validation plus spam scoring.

use std::collections::BTreeMap;

use formloom_core::config::Config;
use formloom_core::{
    validate_form, FieldId, FormDefinition, Responses, SpamAnalysis, SpamEngine,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorEntry {
    pub reason: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub valid: bool,
    pub errors: BTreeMap<FieldId, ErrorEntry>,
    /// Answer keys that match no input field; they would be dropped
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignored: Vec<FieldId>,
    pub spam: SpamAnalysis,
}

pub fn run(form: &FormDefinition, responses: &Responses, config: &Config) -> CheckReport {
    let errors: BTreeMap<FieldId, ErrorEntry> = validate_form(form, responses)
        .into_iter()
        .map(|(id, error)| {
            (
                id,
                ErrorEntry {
                    reason: error.reason(),
                    message: error.to_string(),
                },
            )
        })
        .collect();

    let ignored = responses
        .keys()
        .filter(|id| form.input_fields().all(|field| &field.id != *id))
        .cloned()
        .collect();

    let spam = SpamEngine::new(&config.spam).analyze_with_schema(responses, &form.elements);

    CheckReport {
        valid: errors.is_empty(),
        errors,
        ignored,
        spam,
    }
}
