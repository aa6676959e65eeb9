//! Environment variable fallbacks.
//!
//! Environment variables fill in fields that no config file set; they never
//! override a value from `/etc/lit` or `~/.lit`.

use std::collections::HashMap;

use tracing::debug;

use crate::merge::{ConfigLayer, FieldSources};

struct EnvMapping {
    var_name: &'static str,
    field_path: &'static str,
}

const ENV_MAPPINGS: &[EnvMapping] = &[
    EnvMapping {
        var_name: "LIT_LOG_LEVEL",
        field_path: "logging.level",
    },
    EnvMapping {
        var_name: "LIT_LOG_FORMAT",
        field_path: "logging.format",
    },
    EnvMapping {
        var_name: "LIT_CATALOG_PATH",
        field_path: "catalog.path",
    },
];

/// Snapshot the process environment.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars().collect()
}

/// Apply `LIT_*` fallbacks to fields no config file set.
///
/// Returns the number of variables applied.
pub fn apply_env_fallbacks<S: ::std::hash::BuildHasher>(
    merged: &mut toml::Value,
    sources: &mut FieldSources,
    env_vars: &HashMap<String, String, S>,
) -> usize {
    let mut count: usize = 0;

    for mapping in ENV_MAPPINGS {
        if sources
            .get(mapping.field_path)
            .is_some_and(|layer| layer.is_file())
        {
            continue;
        }

        let Some(val) = env_vars.get(mapping.var_name) else {
            continue;
        };
        if val.is_empty() {
            continue;
        }

        debug!(
            var = mapping.var_name,
            field = mapping.field_path,
            "applying env var fallback"
        );
        set_string_field(merged, mapping.field_path, val);
        sources.insert(mapping.field_path.to_owned(), ConfigLayer::Environment);
        count = count.saturating_add(1);
    }

    count
}

/// Set a dotted path to a string value, creating intermediate tables.
fn set_string_field(root: &mut toml::Value, path: &str, value: &str) {
    let mut current = root;
    let mut segments = path.split('.').peekable();

    while let Some(segment) = segments.next() {
        let toml::Value::Table(table) = current else {
            return;
        };
        if segments.peek().is_none() {
            table.insert(segment.to_owned(), toml::Value::String(value.to_owned()));
            return;
        }
        current = table
            .entry(segment.to_owned())
            .or_insert(toml::Value::Table(toml::map::Map::new()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_env_fills_defaulted_field() {
        let mut merged: toml::Value = toml::from_str("[logging]\nlevel = \"info\"\n").unwrap();
        let mut sources = FieldSources::new();
        sources.insert("logging.level".to_owned(), ConfigLayer::Defaults);

        let applied = apply_env_fallbacks(
            &mut merged,
            &mut sources,
            &env(&[("LIT_LOG_LEVEL", "debug")]),
        );

        assert_eq!(applied, 1);
        assert_eq!(merged["logging"]["level"].as_str(), Some("debug"));
        assert_eq!(
            sources.get("logging.level"),
            Some(&ConfigLayer::Environment)
        );
    }

    #[test]
    fn test_env_does_not_override_file() {
        let mut merged: toml::Value = toml::from_str("[logging]\nlevel = \"warn\"\n").unwrap();
        let mut sources = FieldSources::new();
        sources.insert("logging.level".to_owned(), ConfigLayer::User);

        let applied = apply_env_fallbacks(
            &mut merged,
            &mut sources,
            &env(&[("LIT_LOG_LEVEL", "trace")]),
        );

        assert_eq!(applied, 0);
        assert_eq!(merged["logging"]["level"].as_str(), Some("warn"));
    }

    #[test]
    fn test_env_creates_missing_table() {
        let mut merged: toml::Value = toml::from_str("").unwrap();
        let mut sources = FieldSources::new();

        apply_env_fallbacks(
            &mut merged,
            &mut sources,
            &env(&[("LIT_CATALOG_PATH", "/etc/lit/catalog.toml")]),
        );

        assert_eq!(
            merged["catalog"]["path"].as_str(),
            Some("/etc/lit/catalog.toml")
        );
    }

    #[test]
    fn test_empty_env_value_ignored() {
        let mut merged: toml::Value = toml::from_str("").unwrap();
        let mut sources = FieldSources::new();

        let applied =
            apply_env_fallbacks(&mut merged, &mut sources, &env(&[("LIT_LOG_FORMAT", "")]));

        assert_eq!(applied, 0);
        assert!(merged.get("logging").is_none());
    }
}
