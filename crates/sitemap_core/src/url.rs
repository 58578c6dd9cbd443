//! Sitemap URL records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How frequently the page at a location is likely to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    /// Changes each time it is accessed.
    Always,
    /// Changes hourly.
    Hourly,
    /// Changes daily.
    Daily,
    /// Changes weekly.
    Weekly,
    /// Changes monthly.
    Monthly,
    /// Changes yearly.
    Yearly,
    /// Archived; never changes.
    Never,
}

impl ChangeFreq {
    /// All variants, in protocol order.
    pub const ALL: [Self; 7] = [
        Self::Always,
        Self::Hourly,
        Self::Daily,
        Self::Weekly,
        Self::Monthly,
        Self::Yearly,
        Self::Never,
    ];

    /// Returns the protocol spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown change frequency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown change frequency: {0:?}")]
pub struct ParseChangeFreqError(String);

impl FromStr for ChangeFreq {
    type Err = ParseChangeFreqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|freq| freq.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseChangeFreqError(s.to_string()))
    }
}

/// A single sitemap entry.
///
/// Optional fields are serialized in declaration order and omitted when
/// unset. Values are written verbatim; callers are responsible for escaping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Url {
    /// Location of the page.
    pub loc: String,

    /// Last modification date, already formatted (W3C datetime).
    #[serde(default, rename = "lastmod", skip_serializing_if = "Option::is_none")]
    pub last_mod: Option<String>,

    /// Expected change frequency.
    #[serde(default, rename = "changefreq", skip_serializing_if = "Option::is_none")]
    pub change_freq: Option<ChangeFreq>,

    /// Priority relative to other pages on the site, 0.0 to 1.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<f32>,
}

impl Url {
    /// Creates an entry with only a location.
    pub fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            ..Self::default()
        }
    }

    /// Sets the last modification date.
    #[must_use]
    pub fn with_last_mod(mut self, last_mod: impl Into<String>) -> Self {
        self.last_mod = Some(last_mod.into());
        self
    }

    /// Sets the change frequency.
    #[must_use]
    pub fn with_change_freq(mut self, change_freq: ChangeFreq) -> Self {
        self.change_freq = Some(change_freq);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: f32) -> Self {
        self.priority = Some(priority);
        self
    }
}

impl From<&str> for Url {
    fn from(loc: &str) -> Self {
        Self::new(loc)
    }
}

impl From<String> for Url {
    fn from(loc: String) -> Self {
        Self::new(loc)
    }
}
