//! Loading-focused tests for configuration
//!
//! File parsing, layering and environment overrides.

#[cfg(test)]
mod loading_tests {
    use std::collections::HashMap;
    use std::path::Path;

    use crate::config::{load_config_from, load_toml_file, project_config_path, Config};
    use crate::{Error, Result};

    fn write(dir: &Path, name: &str, body: &str) -> Result<std::path::PathBuf> {
        let path = dir.join(name);
        std::fs::write(&path, body)
            .map_err(|e| Error::io_error(format!("Failed to write test file: {e}")))?;
        Ok(path)
    }

    fn tempdir() -> Result<tempfile::TempDir> {
        tempfile::tempdir().map_err(|e| Error::io_error(format!("Failed to create temp dir: {e}")))
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_no_config_files_returns_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config = load_config_from(None, &dir.path().join("missing.toml"), no_env)?;
        assert_eq!(config, Config::default());
        Ok(())
    }

    #[test]
    fn test_project_overrides_global() -> Result<()> {
        let dir = tempdir()?;
        let global = write(
            dir.path(),
            "global.toml",
            "[spam]\nthreshold = 0.8\nurl_limit = 4\n",
        )?;
        let project = write(dir.path(), "project.toml", "[spam]\nthreshold = 0.6\n")?;

        let config = load_config_from(Some(&global), &project, no_env)?;
        assert!((config.spam.threshold - 0.6).abs() < f64::EPSILON);
        assert_eq!(config.spam.url_limit, 4);
        Ok(())
    }

    #[test]
    fn test_partial_file_only_sets_present_keys() -> Result<()> {
        let dir = tempdir()?;
        let path = write(dir.path(), "c.toml", "[history]\nlimit = 50\n")?;
        let layer = load_toml_file(&path)?;
        assert_eq!(layer.history.limit, Some(Some(50)));
        assert_eq!(layer.forms.max_fields, None);
        assert_eq!(layer.spam.threshold, None);
        Ok(())
    }

    #[test]
    fn test_project_resetting_value_to_default_overrides_global() -> Result<()> {
        let dir = tempdir()?;
        let global = write(
            dir.path(),
            "global.toml",
            "[spam]\nthreshold = 0.8\n\n[history]\nlimit = 10\n\n[forms]\nmax_fields = 50\n",
        )?;
        let project = write(
            dir.path(),
            "project.toml",
            "[spam]\nthreshold = 0.5\n\n[history]\nlimit = \"none\"\n\n[forms]\nmax_fields = 500\n",
        )?;

        let config = load_config_from(Some(&global), &project, no_env)?;
        assert!((config.spam.threshold - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.forms.max_fields, 500);
        assert_eq!(config.history.limit, None);
        Ok(())
    }

    #[test]
    fn test_unknown_history_keyword_is_parse_error() -> Result<()> {
        let dir = tempdir()?;
        let path = write(dir.path(), "c.toml", "[history]\nlimit = \"forever\"\n")?;
        assert!(matches!(load_toml_file(&path), Err(Error::ParseError(_))));
        Ok(())
    }

    #[test]
    fn test_malformed_toml_returns_parse_error() -> Result<()> {
        let dir = tempdir()?;
        let path = write(dir.path(), "bad.toml", "[spam\nthreshold = ")?;
        assert!(matches!(load_toml_file(&path), Err(Error::ParseError(_))));
        Ok(())
    }

    #[test]
    fn test_directory_path_is_io_error() -> Result<()> {
        let dir = tempdir()?;
        assert!(matches!(load_toml_file(dir.path()), Err(Error::IoError(_))));
        Ok(())
    }

    #[test]
    fn test_env_overrides_files() -> Result<()> {
        let dir = tempdir()?;
        let project = write(dir.path(), "p.toml", "[forms]\nmax_fields = 40\n")?;
        let env: HashMap<&str, &str> = [
            ("FORMLOOM_MAX_FIELDS", "20"),
            ("FORMLOOM_HISTORY_LIMIT", "7"),
            ("FORMLOOM_URL_LIMIT", " 1 "),
            ("FORMLOOM_SPAM_THRESHOLD", "0.75"),
        ]
        .into_iter()
        .collect();

        let config = load_config_from(None, &project, |key| {
            env.get(key).map(|value| (*value).to_string())
        })?;
        assert_eq!(config.forms.max_fields, 20);
        assert_eq!(config.history.limit, Some(7));
        assert_eq!(config.spam.url_limit, 1);
        assert!((config.spam.threshold - 0.75).abs() < f64::EPSILON);
        Ok(())
    }

    #[test]
    fn test_env_history_none_lifts_cap() -> Result<()> {
        let base = Config {
            history: crate::config::HistoryConfig { limit: Some(3) },
            ..Config::default()
        };
        let config = base.apply_env_with(|key| {
            (key == "FORMLOOM_HISTORY_LIMIT").then(|| "none".to_string())
        })?;
        assert_eq!(config.history.limit, None);
        Ok(())
    }

    #[test]
    fn test_env_parse_failure_is_invalid_config() {
        let result = Config::default().apply_env_with(|key| {
            (key == "FORMLOOM_URL_LIMIT").then(|| "lots".to_string())
        });
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_out_of_range_file_value_fails_validation() -> Result<()> {
        let dir = tempdir()?;
        let project = write(dir.path(), "p.toml", "[spam]\nthreshold = 1.5\n")?;
        assert!(matches!(
            load_config_from(None, &project, no_env),
            Err(Error::InvalidConfig(_))
        ));
        Ok(())
    }

    #[test]
    fn test_project_config_path() -> Result<()> {
        let path = project_config_path()?;
        assert!(path.ends_with(".formloom/config.toml"));
        Ok(())
    }
}
