//! Installed extension discovery.
//!
//! A Chromium profile stores each extension under
//! `Extensions/<id>/<version>/manifest.json`, with one directory per
//! side-by-side installed version. [`ExtensionScanner`] walks that layout,
//! picks the highest version of each extension and resolves its name.
//!
//! # Example
//!
//! ```no_run
//! use extlist::scanner::{read_settings, ExtensionScanner};
//! use std::path::Path;
//!
//! let profile = Path::new("/home/me/.config/google-chrome/Default");
//! let settings = read_settings(profile);
//! let scanned = ExtensionScanner::new(profile.join("Extensions")).scan(&settings)?;
//!
//! for ext in scanned {
//!     println!("{} {:?}", ext.id, ext.name);
//! }
//! # Ok::<(), extlist::InventoryError>(())
//! ```

mod manifest;
mod settings;
mod version;

pub use manifest::{is_placeholder, read_manifest_name, ManifestName, MANIFEST_FILE};
pub use settings::{parse_settings_document, read_settings, ExtensionSettings, SettingsEntry};
pub use version::{highest_version, VersionDir};

use crate::error::{InventoryError, ScanError};
use crate::model::ExtensionId;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// What the filesystem says about one extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedExtension {
    pub id: ExtensionId,
    /// Highest installed version directory, if any.
    pub version_dir: Option<VersionDir>,
    /// Resolved display name. `None` when no usable name was found.
    pub name: Option<String>,
}

impl ScannedExtension {
    pub fn version(&self) -> Option<&str> {
        self.version_dir.as_ref().map(VersionDir::version)
    }
}

pub struct ExtensionScanner {
    root: PathBuf,
}

impl ExtensionScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lists extension ids present under the root, sorted.
    ///
    /// # Errors
    ///
    /// Fails only if the root itself cannot be read.
    pub fn extension_ids(&self) -> Result<Vec<ExtensionId>, InventoryError> {
        let entries = fs::read_dir(&self.root).map_err(|source| {
            InventoryError::ReadExtensionsRoot {
                path: self.root.clone(),
                source,
            }
        })?;

        let mut ids: Vec<ExtensionId> = entries
            .flatten()
            .filter(|e| e.path().is_dir())
            .filter_map(|e| ExtensionId::parse(&e.file_name().to_string_lossy()))
            .collect();
        ids.sort();
        Ok(ids)
    }

    /// Scans every extension under the root.
    ///
    /// Per-extension problems never fail the scan; they leave the affected
    /// fields unset.
    pub fn scan(
        &self,
        settings: &ExtensionSettings,
    ) -> Result<Vec<ScannedExtension>, InventoryError> {
        Ok(self
            .extension_ids()?
            .into_iter()
            .map(|id| self.scan_extension(id, settings))
            .collect())
    }

    pub fn scan_extension(
        &self,
        id: ExtensionId,
        settings: &ExtensionSettings,
    ) -> ScannedExtension {
        let ext_path = self.root.join(id.as_str());

        let version_dir = latest_version_dir(&ext_path).unwrap_or_else(|err| {
            debug!(%id, "cannot list versions: {}", err);
            None
        });

        let Some(version_dir) = version_dir else {
            debug!(%id, "no version directory");
            return ScannedExtension {
                id,
                version_dir: None,
                name: None,
            };
        };

        let manifest_name = match read_manifest_name(&ext_path.join(version_dir.name())) {
            Ok(name) => name,
            Err(err) => {
                debug!(%id, "unreadable manifest: {}", err);
                ManifestName::Missing
            }
        };

        let name = resolve_name(&id, manifest_name, settings);

        ScannedExtension {
            id,
            version_dir: Some(version_dir),
            name,
        }
    }
}

fn latest_version_dir(ext_path: &Path) -> Result<Option<VersionDir>, ScanError> {
    let entries = fs::read_dir(ext_path).map_err(|source| ScanError::Io {
        path: ext_path.to_path_buf(),
        source,
    })?;

    Ok(highest_version(
        entries
            .flatten()
            .filter(|e| e.path().is_dir())
            .map(|e| e.file_name().to_string_lossy().into_owned()),
    ))
}

/// Turns a manifest name into a display name.
///
/// Placeholders resolve through the settings entry's copy of the manifest.
/// When that is missing or itself a placeholder the name stays unset.
pub fn resolve_name(
    id: &ExtensionId,
    manifest_name: ManifestName,
    settings: &ExtensionSettings,
) -> Option<String> {
    match manifest_name {
        ManifestName::Literal(name) => Some(name),
        ManifestName::Placeholder(key) => {
            let resolved = settings
                .get(id)
                .and_then(SettingsEntry::manifest_name)
                .filter(|n| !is_placeholder(n) && !n.trim().is_empty())
                .map(str::to_string);
            if resolved.is_none() {
                debug!(%id, key = %key, "unresolved localized name");
            }
            resolved
        }
        ManifestName::Missing => None,
    }
}
