//! Expiration choices and their resolution to a concrete instant.

use std::fmt;
use std::num::NonZeroU32;

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{SessionError, SessionResult};

/// Expiry used for sessions that never expire.
pub const NEVER_EXPIRES: DateTime<Utc> = DateTime::<Utc>::MAX_UTC;

/// How long a session should remain valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ExpirationChoice {
    /// A number of days from the moment of submission.
    Days(NonZeroU32),
    /// No expiry.
    #[default]
    Never,
    /// An explicit calendar date held alongside the choice.
    Custom,
}

impl ExpirationChoice {
    /// `Days(n)`, or `None` for zero.
    #[must_use]
    pub fn days(n: u32) -> Option<Self> {
        NonZeroU32::new(n).map(Self::Days)
    }

    /// Parse a choice the way a select box reports it.
    ///
    /// Positive integers become [`ExpirationChoice::Days`], `never` and
    /// `custom` map to their variants, and anything else falls back to
    /// [`ExpirationChoice::Never`].
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        let trimmed = value.trim();
        if let Ok(n) = trimmed.parse::<u32>()
            && let Some(choice) = Self::days(n)
        {
            return choice;
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "never" => Self::Never,
            "custom" => Self::Custom,
            _ => {
                warn!(value = %value, "unrecognised expiration choice, using never");
                Self::Never
            },
        }
    }

    /// Human-readable label, e.g. `30 Days`.
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::Days(n) if n.get() == 1 => "1 Day".to_owned(),
            Self::Days(n) => format!("{n} Days"),
            Self::Never => "Never".to_owned(),
            Self::Custom => "Custom".to_owned(),
        }
    }
}

impl fmt::Display for ExpirationChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Days(n) => write!(f, "{n}"),
            Self::Never => f.write_str("never"),
            Self::Custom => f.write_str("custom"),
        }
    }
}

impl From<ExpirationChoice> for String {
    fn from(choice: ExpirationChoice) -> Self {
        choice.to_string()
    }
}

impl From<String> for ExpirationChoice {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

/// The options offered to the operator: each day count, then never, then
/// custom when allowed. Zero day counts are skipped.
#[must_use]
pub fn expiration_options(day_options: &[u32], allow_custom: bool) -> Vec<ExpirationChoice> {
    day_options
        .iter()
        .filter_map(|n| ExpirationChoice::days(*n))
        .chain(std::iter::once(ExpirationChoice::Never))
        .chain(allow_custom.then_some(ExpirationChoice::Custom))
        .collect()
}

/// Resolve a choice to the instant the session stops being valid.
///
/// `explicit_date` is only consulted for [`ExpirationChoice::Custom`].
///
/// # Errors
///
/// Returns [`SessionError::ExpirationOverflow`] if `now + days` is out of
/// range and [`SessionError::InvalidExpirationDate`] if a custom date cannot
/// be parsed.
pub fn resolve_expiration(
    choice: ExpirationChoice,
    explicit_date: &str,
    now: DateTime<Utc>,
) -> SessionResult<DateTime<Utc>> {
    match choice {
        ExpirationChoice::Days(n) => now
            .checked_add_days(Days::new(u64::from(n.get())))
            .ok_or(SessionError::ExpirationOverflow { days: n.get() }),
        ExpirationChoice::Never => Ok(NEVER_EXPIRES),
        ExpirationChoice::Custom => {
            let expires_at = parse_expiration_date(explicit_date)?;
            if expires_at <= now {
                warn!(%expires_at, %now, "custom expiration date is in the past");
            }
            Ok(expires_at)
        },
    }
}

/// Parse an explicit expiration date.
///
/// Accepts `YYYY-MM-DD` and `mm/dd/yyyy` (both UTC midnight) and RFC 3339
/// timestamps.
///
/// # Errors
///
/// Returns [`SessionError::InvalidExpirationDate`] for anything else.
pub fn parse_expiration_date(input: &str) -> SessionResult<DateTime<Utc>> {
    let trimmed = input.trim();

    for format in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date.and_time(NaiveTime::MIN).and_utc());
        }
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| SessionError::InvalidExpirationDate {
            input: input.to_owned(),
        })
}
