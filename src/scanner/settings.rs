//! Profile-wide extension settings.
//!
//! Chromium keeps per-extension state under `extensions.settings` in the
//! profile's `Secure Preferences` file, and on some platforms in plain
//! `Preferences`. Both files are optional.

use super::manifest::strip_bom;
use crate::error::ScanError;
use crate::model::ExtensionId;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Settings files in precedence order (earlier wins).
const SETTINGS_FILES: &[&str] = &["Secure Preferences", "Preferences"];

const DISABLED_STATE: f64 = 0.0;

/// One `extensions.settings.<id>` object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsEntry {
    /// Numeric `state`; `0` means disabled.
    pub state: Option<f64>,
    /// `manifest.name` as recorded by the browser.
    pub name: Option<String>,
}

impl SettingsEntry {
    /// Reads an entry field by field. A field of the wrong type is treated as
    /// absent without affecting the others.
    ///
    /// Returns `None` if `value` is not an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        Some(Self {
            state: object.get("state").and_then(Value::as_f64),
            name: value
                .pointer("/manifest/name")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }

    pub fn is_disabled(&self) -> bool {
        self.state == Some(DISABLED_STATE)
    }

    pub fn manifest_name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Known settings keyed by extension id. Empty when nothing could be read.
#[derive(Debug, Clone, Default)]
pub struct ExtensionSettings {
    entries: HashMap<ExtensionId, SettingsEntry>,
}

impl ExtensionSettings {
    pub fn get(&self, id: &ExtensionId) -> Option<&SettingsEntry> {
        self.entries.get(id)
    }

    /// Absent entries count as enabled.
    pub fn is_disabled(&self, id: &ExtensionId) -> bool {
        self.get(id).map(SettingsEntry::is_disabled).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn merge_missing(&mut self, other: HashMap<ExtensionId, SettingsEntry>) {
        for (id, entry) in other {
            self.entries.entry(id).or_insert(entry);
        }
    }
}

impl FromIterator<(ExtensionId, SettingsEntry)> for ExtensionSettings {
    fn from_iter<T: IntoIterator<Item = (ExtensionId, SettingsEntry)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Reads extension settings from a profile directory.
///
/// Never fails: unreadable or malformed documents contribute nothing.
pub fn read_settings(profile_dir: &Path) -> ExtensionSettings {
    let mut settings = ExtensionSettings::default();

    for file in SETTINGS_FILES {
        let path = profile_dir.join(file);
        if !path.exists() {
            continue;
        }

        match read_settings_file(&path) {
            Ok(entries) => {
                debug!(
                    path = %path.display(),
                    count = entries.len(),
                    "loaded extension settings"
                );
                settings.merge_missing(entries);
            }
            Err(err) => debug!("ignoring settings file: {}", err),
        }
    }

    settings
}

fn read_settings_file(path: &Path) -> Result<HashMap<ExtensionId, SettingsEntry>, ScanError> {
    let content = fs::read_to_string(path).map_err(|source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let document: Value =
        serde_json::from_str(strip_bom(&content)).map_err(|source| ScanError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(parse_settings_document(&document))
}

/// Extracts `extensions.settings` from a preferences document.
///
/// Keys that are not extension ids and entries that are not objects are
/// skipped individually.
pub fn parse_settings_document(document: &Value) -> HashMap<ExtensionId, SettingsEntry> {
    let Some(map) = document
        .get("extensions")
        .and_then(|e| e.get("settings"))
        .and_then(|s| s.as_object())
    else {
        return HashMap::new();
    };

    map.iter()
        .filter_map(|(key, value)| {
            let id = ExtensionId::parse(key)?;
            let entry = SettingsEntry::from_value(value)?;
            Some((id, entry))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    const ID_A: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const ID_B: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

    fn id(s: &str) -> ExtensionId {
        ExtensionId::parse(s).unwrap()
    }

    #[test]
    fn test_missing_files_yield_empty_settings() {
        let dir = TempDir::new().unwrap();
        assert!(read_settings(dir.path()).is_empty());
    }

    #[test]
    fn test_malformed_json_yields_empty_settings() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Secure Preferences"), "{ not json").unwrap();
        assert!(read_settings(dir.path()).is_empty());
    }

    #[test]
    fn test_wrong_shape_yields_empty_settings() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("Secure Preferences"),
            r#"{"extensions": {"settings": [1, 2, 3]}}"#,
        )
        .unwrap();
        assert!(read_settings(dir.path()).is_empty());
    }

    #[test]
    fn test_state_zero_is_disabled() {
        let doc = json!({
            "extensions": { "settings": {
                ID_A: { "state": 0 },
                ID_B: { "state": 1 }
            }}
        });
        let settings: ExtensionSettings = parse_settings_document(&doc).into_iter().collect();

        assert!(settings.is_disabled(&id(ID_A)));
        assert!(!settings.is_disabled(&id(ID_B)));
    }

    #[test]
    fn test_absent_state_or_entry_is_enabled() {
        let doc = json!({ "extensions": { "settings": { ID_A: {} } } });
        let settings: ExtensionSettings = parse_settings_document(&doc).into_iter().collect();

        assert!(!settings.is_disabled(&id(ID_A)));
        assert!(!settings.is_disabled(&id(ID_B)));
    }

    #[test]
    fn test_bad_entries_are_skipped_individually() {
        let doc = json!({
            "extensions": { "settings": {
                ID_A: "oops",
                ID_B: { "state": 0, "manifest": { "name": "Reader" } },
                "not-an-id": { "state": 0 }
            }}
        });
        let entries = parse_settings_document(&doc);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[&id(ID_B)].manifest_name(), Some("Reader"));
    }

    #[test]
    fn test_malformed_manifest_keeps_disabled_state() {
        let doc = json!({
            "extensions": { "settings": {
                ID_A: { "state": 0, "manifest": { "name": { "message": "x" } } },
                ID_B: { "state": 0, "manifest": "broken" }
            }}
        });
        let settings: ExtensionSettings = parse_settings_document(&doc).into_iter().collect();

        assert!(settings.is_disabled(&id(ID_A)));
        assert!(settings.is_disabled(&id(ID_B)));
        assert_eq!(settings.get(&id(ID_A)).unwrap().manifest_name(), None);
    }

    #[test]
    fn test_state_types() {
        let doc = json!({
            "extensions": { "settings": {
                ID_A: { "state": 0.0 },
                ID_B: { "state": "0", "manifest": { "name": "Reader" } }
            }}
        });
        let settings: ExtensionSettings = parse_settings_document(&doc).into_iter().collect();

        assert!(settings.is_disabled(&id(ID_A)));
        assert!(!settings.is_disabled(&id(ID_B)));
        assert_eq!(settings.get(&id(ID_B)).unwrap().manifest_name(), Some("Reader"));
    }

    #[test]
    fn test_secure_preferences_take_precedence() {
        let dir = TempDir::new().unwrap();
        let secure = json!({ "extensions": { "settings": { ID_A: { "state": 0 } } } });
        let plain = json!({ "extensions": { "settings": {
            ID_A: { "state": 1 },
            ID_B: { "state": 0 }
        }}});
        fs::write(dir.path().join("Secure Preferences"), secure.to_string()).unwrap();
        fs::write(dir.path().join("Preferences"), plain.to_string()).unwrap();

        let settings = read_settings(dir.path());

        assert_eq!(settings.len(), 2);
        assert!(settings.is_disabled(&id(ID_A)));
        assert!(settings.is_disabled(&id(ID_B)));
    }

    #[test]
    fn test_corrupt_secure_preferences_falls_back_to_preferences() {
        let dir = TempDir::new().unwrap();
        let plain = json!({ "extensions": { "settings": { ID_A: { "state": 0 } } } });
        fs::write(dir.path().join("Secure Preferences"), "garbage").unwrap();
        fs::write(dir.path().join("Preferences"), plain.to_string()).unwrap();

        let settings = read_settings(dir.path());
        assert!(settings.is_disabled(&id(ID_A)));
    }
}
