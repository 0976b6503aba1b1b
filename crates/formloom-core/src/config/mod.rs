//! Configuration loading and management
//!
//! # Hierarchy
//!
//! Configuration is loaded in this order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Global config: `<config dir>/formloom/config.toml`
//! 3. Project config: `.formloom/config.toml`
//! 4. Environment variables: `FORMLOOM_*`
//!
//! # Example Config
//!
//! ```toml
//! [spam]
//! threshold = 0.6
//! url_limit = 3
//! keywords = ["essay writing service"]
//!
//! [spam.weights]
//! all_caps = 0.2
//!
//! [history]
//! limit = 200        # or "none" to lift a cap set by an earlier layer
//!
//! [forms]
//! max_fields = 300
//! ```
//!
//! # Module Structure
//!
//! - `types`: Configuration structure definitions
//! - `defaults`: Default values
//! - `load`: Loading from files and environment
//! - `merge`: Explicit-key merging of partial layers
//! - `validate`: Range checks

mod defaults;
mod load;
mod merge;
mod types;
mod validate;

#[cfg(test)]
mod tests_loading;
#[cfg(test)]
mod tests_validation;

pub use defaults::{DEFAULT_MAX_FIELDS, DEFAULT_SPAM_THRESHOLD, DEFAULT_URL_LIMIT};
pub use load::{
    global_config_path, load_config, load_config_from, load_toml_file, project_config_path,
};
pub use types::{
    Config, FormsConfig, HistoryConfig, PartialConfig, PartialFormsConfig, PartialHistoryConfig,
    PartialSpamConfig, PartialSpamWeights, SpamConfig, SpamWeights,
};
