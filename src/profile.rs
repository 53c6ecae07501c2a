//! Locating the extensions directory inside a profile path.

use crate::error::InventoryError;
use std::path::{Path, PathBuf};

pub const EXTENSIONS_DIR: &str = "Extensions";
pub const DEFAULT_PROFILE: &str = "Default";

/// A resolved profile: the directory holding the settings documents and its
/// `Extensions` subdirectory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileLayout {
    pub profile_dir: PathBuf,
    pub extensions_dir: PathBuf,
}

impl ProfileLayout {
    /// Accepts either a profile directory or a browser user-data directory.
    ///
    /// Tries `<path>/Extensions` first, then `<path>/Default/Extensions`.
    ///
    /// # Errors
    ///
    /// [`InventoryError::ExtensionsRootNotFound`] if neither exists.
    pub fn resolve(path: &Path) -> Result<Self, InventoryError> {
        let path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

        for profile_dir in [path.clone(), path.join(DEFAULT_PROFILE)] {
            let extensions_dir = profile_dir.join(EXTENSIONS_DIR);
            if extensions_dir.is_dir() {
                return Ok(Self {
                    profile_dir,
                    extensions_dir,
                });
            }
        }

        Err(InventoryError::ExtensionsRootNotFound { profile: path })
    }
}
