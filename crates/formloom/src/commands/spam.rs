//! `formloom spam`: spam analysis of a response map.

use formloom_core::config::Config;
use formloom_core::{FormDefinition, Responses, SpamAnalysis, SpamEngine};

pub fn run(responses: &Responses, form: Option<&FormDefinition>, config: &Config) -> SpamAnalysis {
    let engine = SpamEngine::new(&config.spam);
    match form {
        Some(form) => engine.analyze_with_schema(responses, &form.elements),
        None => engine.analyze(responses),
    }
}
