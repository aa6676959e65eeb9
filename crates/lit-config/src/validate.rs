//! Post-merge configuration validation.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

/// Longest expiration offered as a day-count option (100 years).
pub const MAX_EXPIRATION_DAYS: u32 = 36_500;

/// Validate a fully merged and deserialized configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_catalog(config)?;
    validate_expiration(config)?;
    validate_logging(config)?;
    Ok(())
}

fn validate_catalog(config: &Config) -> ConfigResult<()> {
    if config
        .catalog
        .path
        .as_ref()
        .is_some_and(|p| p.as_os_str().is_empty())
    {
        return Err(ConfigError::ValidationError {
            field: "catalog.path".to_owned(),
            message: "catalog path must not be empty; omit it to use the built-in catalog"
                .to_owned(),
        });
    }
    Ok(())
}

fn validate_expiration(config: &Config) -> ConfigResult<()> {
    let days = &config.expiration.day_options;

    if days.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "expiration.day_options".to_owned(),
            message: "at least one day-count option is required".to_owned(),
        });
    }

    if let Some(bad) = days
        .iter()
        .find(|d| **d == 0 || **d > MAX_EXPIRATION_DAYS)
    {
        return Err(ConfigError::ValidationError {
            field: "expiration.day_options".to_owned(),
            message: format!("day count {bad} must be between 1 and {MAX_EXPIRATION_DAYS}"),
        });
    }

    if days.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(ConfigError::ValidationError {
            field: "expiration.day_options".to_owned(),
            message: "day-count options must be strictly ascending".to_owned(),
        });
    }

    Ok(())
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.logging.level.as_str()) {
        return Err(ConfigError::ValidationError {
            field: "logging.level".to_owned(),
            message: format!(
                "unsupported log level '{}'; expected one of: {}",
                config.logging.level,
                valid_levels.join(", ")
            ),
        });
    }

    let valid_formats = ["pretty", "compact", "json", "full"];
    if !valid_formats.contains(&config.logging.format.as_str()) {
        return Err(ConfigError::ValidationError {
            field: "logging.format".to_owned(),
            message: format!(
                "unsupported log format '{}'; expected one of: {}",
                config.logging.format,
                valid_formats.join(", ")
            ),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn field_of(result: ConfigResult<()>) -> String {
        match result {
            Err(ConfigError::ValidationError { field, .. }) => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_empty_day_options_rejected() {
        let mut config = Config::default();
        config.expiration.day_options.clear();
        assert_eq!(field_of(validate(&config)), "expiration.day_options");
    }

    #[test]
    fn test_zero_day_option_rejected() {
        let mut config = Config::default();
        config.expiration.day_options = vec![0, 7];
        assert_eq!(field_of(validate(&config)), "expiration.day_options");
    }

    #[test]
    fn test_oversized_day_option_rejected() {
        let mut config = Config::default();
        config.expiration.day_options = vec![7, 36_501];
        assert_eq!(field_of(validate(&config)), "expiration.day_options");
    }

    #[test]
    fn test_unsorted_day_options_rejected() {
        let mut config = Config::default();
        config.expiration.day_options = vec![30, 7];
        assert_eq!(field_of(validate(&config)), "expiration.day_options");

        config.expiration.day_options = vec![7, 7];
        assert_eq!(field_of(validate(&config)), "expiration.day_options");
    }

    #[test]
    fn test_bad_log_level_rejected() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_owned();
        assert_eq!(field_of(validate(&config)), "logging.level");
    }

    #[test]
    fn test_bad_log_format_rejected() {
        let mut config = Config::default();
        config.logging.format = "xml".to_owned();
        assert_eq!(field_of(validate(&config)), "logging.format");
    }

    #[test]
    fn test_empty_catalog_path_rejected() {
        let mut config = Config::default();
        config.catalog.path = Some(PathBuf::new());
        assert_eq!(field_of(validate(&config)), "catalog.path");
    }
}
