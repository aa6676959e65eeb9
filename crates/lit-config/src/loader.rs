//! Layered loading.
//!
//! [`load`] builds the final config in this order:
//! 1. Embedded `defaults.toml`
//! 2. Merge `/etc/lit/config.toml` (system)
//! 3. Merge `~/.lit/config.toml` (user), or `$LIT_HOME/config.toml`
//! 4. Apply `LIT_*` env var fallbacks for fields no file set
//! 5. Deserialize the merged tree → `Config`
//! 6. Validate

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::env::{apply_env_fallbacks, collect_env_vars};
use crate::error::{ConfigError, ConfigResult};
use crate::merge::{ConfigLayer, FieldSources, deep_merge_tracking, record_leaves};
use crate::types::Config;
use crate::validate;

/// Compiled-in defaults; every other layer overlays this.
const DEFAULTS_TOML: &str = include_str!("defaults.toml");

/// Larger config files are rejected unread.
const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576;

/// System-wide config location.
const SYSTEM_CONFIG_PATH: &str = "/etc/lit/config.toml";

/// A loaded configuration plus provenance.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The final configuration.
    pub config: Config,
    /// Which layer set each leaf field.
    pub field_sources: FieldSources,
    /// Config files that were found and merged, in merge order.
    pub loaded_files: Vec<String>,
}

impl ResolvedConfig {
    /// The layer that set a dotted field path, if any.
    #[must_use]
    pub fn source_of(&self, field: &str) -> Option<ConfigLayer> {
        self.field_sources.get(field).copied()
    }
}

/// Load configuration with the full precedence chain.
///
/// `home_override` replaces the user config directory (the directory that
/// would otherwise be `~/.lit`).
///
/// # Errors
///
/// Returns a [`ConfigError`] when a layer cannot be read or parsed, or when
/// the merged result fails validation.
pub fn load(home_override: Option<&Path>) -> ConfigResult<ResolvedConfig> {
    let env_vars = collect_env_vars();
    let user_path = match home_override {
        Some(dir) => dir.join("config.toml"),
        None => user_config_path(&env_vars)?,
    };
    load_layers(Some(Path::new(SYSTEM_CONFIG_PATH)), &user_path, &env_vars)
}

/// Merge the layers in precedence order.
pub(crate) fn load_layers<S: ::std::hash::BuildHasher>(
    system_path: Option<&Path>,
    user_path: &Path,
    env_vars: &HashMap<String, String, S>,
) -> ConfigResult<ResolvedConfig> {
    let mut merged: toml::Value =
        toml::from_str(DEFAULTS_TOML).map_err(|e| ConfigError::ParseError {
            path: "<embedded defaults>".to_owned(),
            source: e,
        })?;

    let mut field_sources = FieldSources::new();
    let mut loaded_files = Vec::new();
    record_leaves(&merged, "", ConfigLayer::Defaults, &mut field_sources);

    let file_layers = system_path
        .map(|p| (p, ConfigLayer::System))
        .into_iter()
        .chain(std::iter::once((user_path, ConfigLayer::User)));

    for (path, layer) in file_layers {
        if let Some(overlay) = try_load_file(path)? {
            deep_merge_tracking(&mut merged, &overlay, "", layer, &mut field_sources);
            loaded_files.push(path.display().to_string());
            info!(path = %path.display(), %layer, "loaded config layer");
        }
    }

    let env_count = apply_env_fallbacks(&mut merged, &mut field_sources, env_vars);
    if env_count > 0 {
        debug!(count = env_count, "applied environment variable fallbacks");
    }

    let config: Config =
        merged
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::ParseError {
                path: "<merged config>".to_owned(),
                source: e,
            })?;

    validate::validate(&config)?;

    Ok(ResolvedConfig {
        config,
        field_sources,
        loaded_files,
    })
}

/// Load a single file over the struct defaults, skipping the other layers.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file cannot be read, parsed, or fails
/// validation.
pub fn load_file(path: &Path) -> ConfigResult<Config> {
    let Some(value) = try_load_file(path)? else {
        return Err(ConfigError::ReadError {
            path: path.display().to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        });
    };

    let config: Config = value
        .try_into()
        .map_err(|e: toml::de::Error| ConfigError::ParseError {
            path: path.display().to_string(),
            source: e,
        })?;

    validate::validate(&config)?;
    Ok(config)
}

/// Try to load a file, returning `None` if it doesn't exist.
fn try_load_file(path: &Path) -> ConfigResult<Option<toml::Value>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file here");
            return Ok(None);
        },
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.display().to_string(),
                source: e,
            });
        },
    };

    if content.len() as u64 > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::ValidationError {
            field: path.display().to_string(),
            message: format!(
                "config file is {} bytes, exceeding the {} byte limit",
                content.len(),
                MAX_CONFIG_FILE_SIZE
            ),
        });
    }

    let value: toml::Value = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(Some(value))
}

/// `$LIT_HOME/config.toml` when set, otherwise `~/.lit/config.toml`.
fn user_config_path<S: ::std::hash::BuildHasher>(
    env_vars: &HashMap<String, String, S>,
) -> ConfigResult<PathBuf> {
    if let Some(lit_home) = env_vars.get("LIT_HOME").filter(|h| !h.is_empty()) {
        let dir = PathBuf::from(lit_home);
        if !dir.is_absolute() {
            return Err(ConfigError::EnvError {
                var_name: "LIT_HOME".to_owned(),
                message: format!("'{lit_home}' is not an absolute path"),
            });
        }
        return Ok(dir.join("config.toml"));
    }
    let home = directories::BaseDirs::new()
        .map(|d| d.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDir)?;
    Ok(home.join(".lit").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env() -> HashMap<String, String> {
        HashMap::new()
    }

    #[test]
    fn test_defaults_deserialize_to_config() {
        let config: Config = toml::from_str(DEFAULTS_TOML).unwrap();
        assert_eq!(config.expiration.day_options, vec![7, 30, 60, 90]);
        assert!(config.expiration.allow_custom);
        assert_eq!(config.logging.level, "info");
        assert!(config.catalog.path.is_none());
    }

    #[test]
    fn test_load_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = load_layers(None, &dir.path().join("config.toml"), &no_env()).unwrap();

        assert!(resolved.loaded_files.is_empty());
        assert_eq!(resolved.config.logging.format, "compact");
        assert_eq!(
            resolved.source_of("logging.level"),
            Some(ConfigLayer::Defaults)
        );
    }

    #[test]
    fn test_user_layer_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let user = dir.path().join("config.toml");
        std::fs::write(
            &user,
            "[expiration]\nday_options = [1, 14]\n\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();

        let resolved = load_layers(None, &user, &no_env()).unwrap();

        assert_eq!(resolved.config.expiration.day_options, vec![1, 14]);
        assert!(resolved.config.expiration.allow_custom);
        assert_eq!(resolved.config.logging.level, "debug");
        assert_eq!(resolved.source_of("logging.level"), Some(ConfigLayer::User));
        assert_eq!(resolved.loaded_files.len(), 1);
    }

    #[test]
    fn test_user_layer_beats_system_layer() {
        let dir = tempfile::tempdir().unwrap();
        let system = dir.path().join("system.toml");
        let user = dir.path().join("user.toml");
        std::fs::write(&system, "[logging]\nlevel = \"warn\"\nformat = \"json\"\n").unwrap();
        std::fs::write(&user, "[logging]\nlevel = \"error\"\n").unwrap();

        let resolved = load_layers(Some(&system), &user, &no_env()).unwrap();

        assert_eq!(resolved.config.logging.level, "error");
        assert_eq!(resolved.config.logging.format, "json");
        assert_eq!(resolved.loaded_files.len(), 2);
    }

    #[test]
    fn test_env_fallback_applies_to_defaults_only() {
        let dir = tempfile::tempdir().unwrap();
        let user = dir.path().join("config.toml");
        std::fs::write(&user, "[logging]\nlevel = \"warn\"\n").unwrap();

        let mut env = HashMap::new();
        env.insert("LIT_LOG_LEVEL".to_owned(), "trace".to_owned());
        env.insert("LIT_LOG_FORMAT".to_owned(), "json".to_owned());
        env.insert("LIT_CATALOG_PATH".to_owned(), "/srv/catalog.toml".to_owned());

        let resolved = load_layers(None, &user, &env).unwrap();

        assert_eq!(resolved.config.logging.level, "warn");
        assert_eq!(resolved.config.logging.format, "json");
        assert_eq!(
            resolved.config.catalog.path,
            Some(PathBuf::from("/srv/catalog.toml"))
        );
        assert_eq!(
            resolved.source_of("catalog.path"),
            Some(ConfigLayer::Environment)
        );
    }

    #[test]
    fn test_invalid_layer_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let user = dir.path().join("config.toml");
        std::fs::write(&user, "[expiration]\nday_options = []\n").unwrap();

        let result = load_layers(None, &user, &no_env());
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn test_malformed_layer_fails_parse() {
        let dir = tempfile::tempdir().unwrap();
        let user = dir.path().join("config.toml");
        std::fs::write(&user, "[logging\nlevel = ").unwrap();

        let result = load_layers(None, &user, &no_env());
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_load_file_nonexistent() {
        let result = load_file(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_load_file_partial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[catalog]\npath = \"/etc/lit/catalog.toml\"\n").unwrap();

        let config = load_file(&path).unwrap();
        assert_eq!(
            config.catalog.path,
            Some(PathBuf::from("/etc/lit/catalog.toml"))
        );
        assert_eq!(config.expiration.day_options, vec![7, 30, 60, 90]);
    }

    #[test]
    fn test_lit_home_selects_user_path() {
        let mut env = HashMap::new();
        env.insert("LIT_HOME".to_owned(), "/opt/lit".to_owned());
        assert_eq!(
            user_config_path(&env).unwrap(),
            PathBuf::from("/opt/lit/config.toml")
        );
    }

    #[test]
    fn test_relative_lit_home_rejected() {
        let mut env = HashMap::new();
        env.insert("LIT_HOME".to_owned(), "relative/lit".to_owned());
        assert!(matches!(
            user_config_path(&env),
            Err(ConfigError::EnvError { .. })
        ));
    }

    #[test]
    fn test_oversized_config_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("huge.toml");
        let data = "x = \"".to_owned() + &"a".repeat(1_100_000) + "\"";
        std::fs::write(&file_path, data).unwrap();

        let result = try_load_file(&file_path);
        assert!(
            matches!(result, Err(ConfigError::ValidationError { .. })),
            "oversized file should fail validation, got {result:?}"
        );
    }
}
