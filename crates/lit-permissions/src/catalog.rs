//! The permission catalog: capability → scope patterns.
//!
//! The built-in catalog is compiled into the binary from `catalog.toml`.
//! A deployment may instead load a catalog file of the same shape once at
//! startup. Either way the catalog is validated up front and never mutated.

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::capability::Capability;
use crate::error::{PermissionError, PermissionResult};
use crate::pattern::ScopePattern;

/// Embedded built-in catalog.
const BUILTIN_CATALOG_TOML: &str = include_str!("catalog.toml");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(rename = "capability", default)]
    entries: Vec<CatalogFileEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFileEntry {
    name: String,
    scopes: Vec<String>,
}

/// Immutable mapping from every [`Capability`] to its ordered scope patterns.
#[derive(Debug, Clone)]
pub struct PermissionCatalog {
    scopes: [Vec<ScopePattern>; Capability::COUNT],
    order: Vec<Capability>,
}

impl PermissionCatalog {
    /// The catalog compiled into this crate.
    ///
    /// # Errors
    ///
    /// Returns a [`PermissionError`] if the embedded table is malformed.
    pub fn builtin() -> PermissionResult<Self> {
        Self::parse(BUILTIN_CATALOG_TOML, "<builtin catalog>")
    }

    /// Parse a catalog from TOML source.
    ///
    /// # Errors
    ///
    /// Returns a [`PermissionError`] if the TOML is malformed, names an
    /// unknown capability, repeats or omits a capability, has an empty entry,
    /// or contains an invalid pattern.
    pub fn from_toml_str(source: &str) -> PermissionResult<Self> {
        Self::parse(source, "<inline catalog>")
    }

    /// Load a catalog from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionError::CatalogRead`] if the file cannot be read,
    /// or any validation error from [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> PermissionResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| PermissionError::CatalogRead {
            path: path.display().to_string(),
            source: e,
        })?;
        let catalog = Self::parse(&source, &path.display().to_string())?;
        info!(path = %path.display(), "loaded permission catalog");
        Ok(catalog)
    }

    fn parse(source: &str, origin: &str) -> PermissionResult<Self> {
        let file: CatalogFile =
            toml::from_str(source).map_err(|e| PermissionError::CatalogParse {
                path: origin.to_owned(),
                source: e,
            })?;

        let mut slots: [Option<Vec<ScopePattern>>; Capability::COUNT] = Default::default();
        let mut order = Vec::with_capacity(Capability::COUNT);

        for entry in file.entries {
            let capability: Capability = entry.name.parse()?;
            let slot = &mut slots[capability.index()];
            if slot.is_some() {
                return Err(PermissionError::DuplicateCatalogEntry {
                    capability: entry.name,
                });
            }
            if entry.scopes.is_empty() {
                return Err(PermissionError::EmptyCatalogEntry {
                    capability: entry.name,
                });
            }

            let patterns = entry
                .scopes
                .into_iter()
                .map(ScopePattern::new)
                .collect::<PermissionResult<Vec<_>>>()?;

            if let Some(baseline) = patterns.iter().find(|p| p.is_read_baseline()) {
                return Err(PermissionError::InvalidPattern {
                    pattern: baseline.to_string(),
                    reason: format!(
                        "the read-only baseline is implicit and cannot be assigned to '{capability}'"
                    ),
                });
            }

            *slot = Some(patterns);
            order.push(capability);
        }

        if let Some(missing) = Capability::ALL
            .into_iter()
            .find(|cap| slots[cap.index()].is_none())
        {
            return Err(PermissionError::MissingCatalogEntry {
                capability: missing.to_string(),
            });
        }

        debug!(origin, capabilities = order.len(), "parsed permission catalog");

        Ok(Self {
            scopes: slots.map(Option::unwrap_or_default),
            order,
        })
    }

    /// Scope patterns unlocked by `capability`, in catalog order.
    #[must_use]
    pub fn scopes_for(&self, capability: Capability) -> &[ScopePattern] {
        &self.scopes[capability.index()]
    }

    /// Scope patterns for a capability given by wire name.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionError::UnknownCapability`] if `name` is not a
    /// known capability.
    pub fn scopes_for_name(&self, name: &str) -> PermissionResult<&[ScopePattern]> {
        let capability: Capability = name.parse()?;
        Ok(self.scopes_for(capability))
    }

    /// Capabilities in catalog declaration order.
    #[must_use]
    pub fn capabilities(&self) -> &[Capability] {
        &self.order
    }

    /// Catalog entries in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (Capability, &[ScopePattern])> + '_ {
        self.order.iter().map(|cap| (*cap, self.scopes_for(*cap)))
    }

    /// Capabilities whose patterns cover `uri`.
    #[must_use]
    pub fn capabilities_granting(&self, uri: &str) -> Vec<Capability> {
        self.entries()
            .filter(|(_, patterns)| patterns.iter().any(|p| p.matches(uri)))
            .map(|(cap, _)| cap)
            .collect()
    }
}
