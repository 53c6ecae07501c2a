use crate::error::ScanError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const MANIFEST_FILE: &str = "manifest.json";

const PLACEHOLDER_PREFIX: &str = "__MSG_";

#[derive(Deserialize)]
struct ChromeManifest {
    #[serde(default)]
    name: Option<serde_json::Value>,
}

/// The `name` field of a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestName {
    Literal(String),
    /// A `__MSG_*` localization key; not a display name by itself.
    Placeholder(String),
    Missing,
}

impl ManifestName {
    pub fn classify(name: Option<&str>) -> Self {
        match name {
            Some(n) if is_placeholder(n) => ManifestName::Placeholder(n.to_string()),
            Some(n) if !n.trim().is_empty() => ManifestName::Literal(n.to_string()),
            _ => ManifestName::Missing,
        }
    }
}

pub fn is_placeholder(name: &str) -> bool {
    name.starts_with(PLACEHOLDER_PREFIX)
}

/// Some extension packers write a UTF-8 byte order mark.
pub(crate) fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}

/// Reads the manifest in `version_dir` and classifies its `name`.
pub fn read_manifest_name(version_dir: &Path) -> Result<ManifestName, ScanError> {
    let path = version_dir.join(MANIFEST_FILE);
    let content = fs::read_to_string(&path).map_err(|source| ScanError::Io {
        path: path.clone(),
        source,
    })?;
    let manifest: ChromeManifest = serde_json::from_str(strip_bom(&content))
        .map_err(|source| ScanError::Json { path, source })?;

    Ok(ManifestName::classify(
        manifest.name.as_ref().and_then(|v| v.as_str()),
    ))
}
