//! `formloom template`: starter form definitions.

use std::str::FromStr;

use formloom_core::{Error, FormDefinition, Result, Template};
use strum::IntoEnumIterator;

/// Build a fresh form from a named template.
///
/// # Errors
///
/// `InvalidConfig` naming the known templates when `name` matches none.
pub fn run(name: &str) -> Result<FormDefinition> {
    Template::from_str(&name.trim().to_lowercase())
        .map(Template::build)
        .map_err(|_| {
            let known: Vec<String> = Template::iter().map(|t| t.to_string()).collect();
            Error::invalid_config(format!(
                "unknown template '{name}' (expected one of: {})",
                known.join(", ")
            ))
        })
}
