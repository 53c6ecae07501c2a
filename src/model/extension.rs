use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A Chrome Web Store extension identifier: exactly 32 characters in `a-z`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtensionId(String);

impl ExtensionId {
    pub const LEN: usize = 32;

    /// Returns `None` unless `s` matches `^[a-z]{32}$`.
    pub fn parse(s: &str) -> Option<Self> {
        if s.len() == Self::LEN && s.bytes().all(|b| b.is_ascii_lowercase()) {
            Some(Self(s.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExtensionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ExtensionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Whether an extension is still listed in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Unavailable,
    /// The probe gave no conclusive answer. Not the same as `Unavailable`.
    Indeterminate,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Available => "available",
            Availability::Unavailable => "unavailable",
            Availability::Indeterminate => "indeterminate",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Availability::Available => "Published",
            Availability::Unavailable => "Removed",
            Availability::Indeterminate => "Unknown",
        }
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One installed extension, as reported to the output layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionRecord {
    pub id: ExtensionId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub disabled: bool,
    pub availability: Availability,
}

impl ExtensionRecord {
    /// The name to show a human, falling back to the identifier.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.id.as_str())
    }
}

/// Complete inventory of one profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryReport {
    pub scan_time: DateTime<Utc>,
    pub profile: PathBuf,
    pub records: Vec<ExtensionRecord>,
}

impl InventoryReport {
    pub fn new(profile: PathBuf, records: Vec<ExtensionRecord>) -> Self {
        Self {
            scan_time: Utc::now(),
            profile,
            records,
        }
    }

    pub fn enabled(&self) -> impl Iterator<Item = &ExtensionRecord> {
        self.records.iter().filter(|r| !r.disabled)
    }

    pub fn disabled(&self) -> impl Iterator<Item = &ExtensionRecord> {
        self.records.iter().filter(|r| r.disabled)
    }

    pub fn count(&self, availability: Availability) -> usize {
        self.records
            .iter()
            .filter(|r| r.availability == availability)
            .count()
    }
}

/// Chromium-family browsers whose profiles share the same on-disk layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    Chrome,
    Chromium,
    Brave,
    Edge,
    Vivaldi,
}

impl Browser {
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chrome => "chrome",
            Browser::Chromium => "chromium",
            Browser::Brave => "brave",
            Browser::Edge => "edge",
            Browser::Vivaldi => "vivaldi",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Browser::Chrome => "Chrome",
            Browser::Chromium => "Chromium",
            Browser::Brave => "Brave",
            Browser::Edge => "Edge",
            Browser::Vivaldi => "Vivaldi",
        }
    }
}

impl std::fmt::Display for Browser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Browser {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chrome" => Ok(Browser::Chrome),
            "chromium" => Ok(Browser::Chromium),
            "brave" => Ok(Browser::Brave),
            "edge" => Ok(Browser::Edge),
            "vivaldi" => Ok(Browser::Vivaldi),
            _ => Err(format!(
                "Unknown browser: {}. Use: chrome, chromium, brave, edge, vivaldi",
                s
            )),
        }
    }
}
