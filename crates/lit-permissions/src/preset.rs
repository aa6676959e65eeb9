//! Permission presets and session classification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::capability::{Capability, CapabilitySet};
use crate::error::PermissionError;

/// A named shortcut that bulk-assigns capability toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Every capability.
    #[default]
    Admin,
    /// Only the implicit read baseline.
    ReadOnly,
    /// Fees, Loop and Pool.
    Liquidity,
    /// Send and receive.
    Payments,
    /// Whatever the user toggled.
    Custom,
}

impl Preset {
    /// Every preset, in display order.
    pub const ALL: [Self; 5] = [
        Self::Admin,
        Self::ReadOnly,
        Self::Liquidity,
        Self::Payments,
        Self::Custom,
    ];

    /// Wire name (e.g. `read-only`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::ReadOnly => "read-only",
            Self::Liquidity => "liquidity",
            Self::Payments => "payments",
            Self::Custom => "custom",
        }
    }

    /// Human-readable title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::ReadOnly => "Read-Only",
            Self::Liquidity => "Liquidity Manager",
            Self::Payments => "Payments Manager",
            Self::Custom => "Custom",
        }
    }

    /// One-line description of what the preset grants.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Admin => "User has all permissions.",
            Self::ReadOnly => "User can only view node data, not take any actions.",
            Self::Liquidity => "User can only set fees, use Loop, and use Pool.",
            Self::Payments => "User can only send and receive payments.",
            Self::Custom => "Create a session with fully custom permissions.",
        }
    }

    /// The toggle assignment this preset imposes.
    ///
    /// `None` for [`Preset::Custom`], which leaves the current toggles alone.
    #[must_use]
    pub fn assignment(self) -> Option<CapabilitySet> {
        match self {
            Self::Admin => Some(CapabilitySet::all()),
            Self::ReadOnly => Some(CapabilitySet::none()),
            Self::Liquidity => Some(CapabilitySet::of([
                Capability::SetFees,
                Capability::Loop,
                Capability::Pool,
            ])),
            Self::Payments => Some(CapabilitySet::of([Capability::Send, Capability::Receive])),
            Self::Custom => None,
        }
    }

    /// The session classification this preset produces.
    #[must_use]
    pub const fn session_type(self) -> SessionType {
        match self {
            Self::Admin => SessionType::Admin,
            Self::ReadOnly => SessionType::ReadOnly,
            Self::Liquidity | Self::Payments | Self::Custom => SessionType::Custom,
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.as_str() == s)
            .ok_or_else(|| PermissionError::UnknownPreset { name: s.to_owned() })
    }
}

/// Derived session trust tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    /// All capabilities, no explicit scope list.
    Admin,
    /// Read baseline only, no explicit scope list.
    ReadOnly,
    /// Explicit scope list required.
    Custom,
}

impl SessionType {
    /// Whether sessions of this type carry an explicit scope list.
    #[must_use]
    pub const fn requires_scopes(self) -> bool {
        matches!(self, Self::Custom)
    }

    /// Macaroon session type name understood by the issuer.
    #[must_use]
    pub const fn macaroon_type(self) -> &'static str {
        match self {
            Self::Admin => "TYPE_MACAROON_ADMIN",
            Self::ReadOnly => "TYPE_MACAROON_READONLY",
            Self::Custom => "TYPE_MACAROON_CUSTOM",
        }
    }
}

impl From<Preset> for SessionType {
    fn from(preset: Preset) -> Self {
        preset.session_type()
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::ReadOnly => write!(f, "read_only"),
            Self::Custom => write!(f, "custom"),
        }
    }
}
