//! Deep merge of TOML layers with per-field source tracking.
//!
//! Merging works on raw [`toml::Value`] trees so that a key absent from an
//! overlay never clobbers the layer beneath it.

use std::collections::BTreeMap;
use std::fmt;

/// Where a configuration value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigLayer {
    /// Embedded `defaults.toml`.
    Defaults,
    /// `/etc/lit/config.toml`.
    System,
    /// `~/.lit/config.toml` or `$LIT_HOME/config.toml`.
    User,
    /// A `LIT_*` environment variable.
    Environment,
}

impl ConfigLayer {
    /// Whether the value was set by a config file.
    #[must_use]
    pub fn is_file(self) -> bool {
        matches!(self, Self::System | Self::User)
    }
}

impl fmt::Display for ConfigLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defaults => write!(f, "defaults"),
            Self::System => write!(f, "system"),
            Self::User => write!(f, "user"),
            Self::Environment => write!(f, "env"),
        }
    }
}

/// Dotted field path → layer that last set it.
pub type FieldSources = BTreeMap<String, ConfigLayer>;

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_owned()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Record every leaf of `value` as coming from `layer`.
pub fn record_leaves(
    value: &toml::Value,
    prefix: &str,
    layer: ConfigLayer,
    sources: &mut FieldSources,
) {
    if let toml::Value::Table(table) = value {
        for (key, child) in table {
            record_leaves(child, &join_path(prefix, key), layer, sources);
        }
    } else {
        sources.insert(prefix.to_owned(), layer);
    }
}

/// Deep-merge `overlay` into `base`, recording the layer of each leaf set.
///
/// Tables merge per key; scalars and arrays from the overlay replace the
/// base value.
pub fn deep_merge_tracking(
    base: &mut toml::Value,
    overlay: &toml::Value,
    prefix: &str,
    layer: ConfigLayer,
    sources: &mut FieldSources,
) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let path = join_path(prefix, key);
                match base_table.get_mut(key) {
                    Some(base_val) if overlay_val.is_table() => {
                        deep_merge_tracking(base_val, overlay_val, &path, layer, sources);
                    },
                    Some(base_val) => {
                        *base_val = overlay_val.clone();
                        sources.insert(path, layer);
                    },
                    None => {
                        base_table.insert(key.clone(), overlay_val.clone());
                        record_leaves(overlay_val, &path, layer, sources);
                    },
                }
            }
        },
        (base, overlay) => {
            *base = overlay.clone();
            sources.insert(prefix.to_owned(), layer);
        },
    }
}
