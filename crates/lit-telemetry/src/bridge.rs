//! Conversion from the `[logging]` config section.

use lit_config::LoggingSection;

use crate::error::TelemetryError;
use crate::logging::{LogConfig, LogFormat};

impl TryFrom<&LoggingSection> for LogConfig {
    type Error = TelemetryError;

    fn try_from(section: &LoggingSection) -> Result<Self, Self::Error> {
        let format: LogFormat = section.format.parse()?;
        let config = section.directives.iter().fold(
            LogConfig::new(section.level.clone()).with_format(format),
            |config, directive| config.with_directive(directive.clone()),
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_section_converts() {
        let config = LogConfig::try_from(&LoggingSection::default()).unwrap();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Compact);
        assert!(config.directives.is_empty());
    }

    #[test]
    fn test_section_directives_carry_over() {
        let section = LoggingSection {
            level: "debug".to_owned(),
            format: "json".to_owned(),
            directives: vec!["lit_session=trace".to_owned()],
        };
        let config = LogConfig::try_from(&section).unwrap();
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.directives, vec!["lit_session=trace"]);
        assert!(config.build_filter().is_ok());
    }

    #[test]
    fn test_unknown_format_rejected() {
        let section = LoggingSection {
            format: "xml".to_owned(),
            ..LoggingSection::default()
        };
        assert!(LogConfig::try_from(&section).is_err());
    }
}
