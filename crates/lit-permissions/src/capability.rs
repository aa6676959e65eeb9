//! Capabilities and the per-capability toggle set.
//!
//! A [`Capability`] is a user-togglable group of node operations. The set is
//! closed and known at compile time, so the toggle map is an enum-indexed
//! array ([`CapabilitySet`]) rather than a string-keyed map.

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};

use crate::error::PermissionError;

/// A named, user-togglable access-control unit.
///
/// Declaration order is significant: it is the order in which the built-in
/// catalog lists capabilities and therefore the order of resolved scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    /// Open a channel to another peer.
    OpenChannel,
    /// Close a channel to another peer.
    CloseChannel,
    /// Set fees for channels.
    SetFees,
    /// Use Loop to manage liquidity.
    Loop,
    /// Buy and sell liquidity in the Pool marketplace.
    Pool,
    /// Send funds from the node.
    Send,
    /// Receive funds on the node.
    Receive,
}

impl Capability {
    /// Number of capabilities.
    pub const COUNT: usize = 7;

    /// Every capability, in declaration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::OpenChannel,
        Self::CloseChannel,
        Self::SetFees,
        Self::Loop,
        Self::Pool,
        Self::Send,
        Self::Receive,
    ];

    /// Position of this capability in [`Capability::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Wire name (e.g. `openChannel`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenChannel => "openChannel",
            Self::CloseChannel => "closeChannel",
            Self::SetFees => "setFees",
            Self::Loop => "loop",
            Self::Pool => "pool",
            Self::Send => "send",
            Self::Receive => "receive",
        }
    }

    /// Human-readable title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::OpenChannel => "Open Channel",
            Self::CloseChannel => "Close Channel",
            Self::SetFees => "Set Fees",
            Self::Loop => "Loop",
            Self::Pool => "Pool",
            Self::Send => "Send",
            Self::Receive => "Receive",
        }
    }

    /// One-line description of what the capability allows.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::OpenChannel => "Open a channel to another peer.",
            Self::CloseChannel => "Close a channel to another peer.",
            Self::SetFees => "Set fees for your channels.",
            Self::Loop => "Use Loop to manage liquidity.",
            Self::Pool => "Buy and sell liquidity in Pool marketplace.",
            Self::Send => "Send funds from this node.",
            Self::Receive => "Receive funds on this node.",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|cap| cap.as_str() == s)
            .ok_or_else(|| PermissionError::UnknownCapability { name: s.to_owned() })
    }
}

/// Per-capability boolean toggles.
///
/// Every capability always has a value; there is no way to look up a key
/// that does not exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CapabilitySet([bool; Capability::COUNT]);

impl CapabilitySet {
    /// A set with every capability disabled.
    #[must_use]
    pub const fn none() -> Self {
        Self([false; Capability::COUNT])
    }

    /// A set with every capability enabled.
    #[must_use]
    pub const fn all() -> Self {
        Self([true; Capability::COUNT])
    }

    /// A set with exactly the given capabilities enabled.
    #[must_use]
    pub fn of(capabilities: impl IntoIterator<Item = Capability>) -> Self {
        let mut set = Self::none();
        for cap in capabilities {
            set.set(cap, true);
        }
        set
    }

    /// Whether `capability` is enabled.
    #[must_use]
    pub const fn contains(&self, capability: Capability) -> bool {
        self.0[capability.index()]
    }

    /// Enable or disable a capability.
    pub fn set(&mut self, capability: Capability, enabled: bool) {
        self.0[capability.index()] = enabled;
    }

    /// Flip a capability and return its new value.
    pub fn toggle(&mut self, capability: Capability) -> bool {
        let slot = &mut self.0[capability.index()];
        *slot = !*slot;
        *slot
    }

    /// Set every capability to `enabled`.
    pub fn set_all(&mut self, enabled: bool) {
        self.0 = [enabled; Capability::COUNT];
    }

    /// Every capability with its toggle value, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Capability, bool)> + '_ {
        Capability::ALL
            .into_iter()
            .map(|cap| (cap, self.contains(cap)))
    }

    /// Enabled capabilities, in declaration order.
    pub fn enabled(&self) -> impl Iterator<Item = Capability> + '_ {
        Capability::ALL
            .into_iter()
            .filter(|cap| self.contains(*cap))
    }

    /// Number of enabled capabilities.
    #[must_use]
    pub fn count(&self) -> usize {
        self.0.iter().filter(|enabled| **enabled).count()
    }

    /// Whether no capability is enabled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.0.contains(&true)
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self::of(iter)
    }
}

impl Serialize for CapabilitySet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Capability::COUNT))?;
        for (cap, enabled) in self.iter() {
            map.serialize_entry(cap.as_str(), &enabled)?;
        }
        map.end()
    }
}
