//! Validation-focused tests for configuration

#[cfg(test)]
mod validation_tests {
    use crate::config::{Config, HistoryConfig, SpamConfig, SpamWeights};
    use crate::Error;

    fn with_threshold(threshold: f64) -> Config {
        Config {
            spam: SpamConfig {
                threshold,
                ..SpamConfig::default()
            },
            ..Config::default()
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_threshold_bounds() {
        assert!(with_threshold(1.0).validate().is_ok());
        assert!(with_threshold(0.01).validate().is_ok());
        assert!(matches!(
            with_threshold(0.0).validate(),
            Err(Error::InvalidConfig(_))
        ));
        assert!(with_threshold(1.01).validate().is_err());
        assert!(with_threshold(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_weight_out_of_range_names_the_weight() {
        let config = Config {
            spam: SpamConfig {
                weights: SpamWeights {
                    gibberish: 1.2,
                    ..SpamWeights::default()
                },
                ..SpamConfig::default()
            },
            ..Config::default()
        };
        let err = config.validate().err().map(|e| e.to_string()).unwrap_or_default();
        assert!(err.contains("gibberish"));
    }

    #[test]
    fn test_zero_history_limit_rejected() {
        let config = Config {
            history: HistoryConfig { limit: Some(0) },
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_keyword_rejected() {
        let config = Config {
            spam: SpamConfig {
                keywords: vec!["  ".into()],
                ..SpamConfig::default()
            },
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_max_fields_rejected() {
        let mut config = Config::default();
        config.forms.max_fields = 0;
        assert!(config.validate().is_err());
    }
}
