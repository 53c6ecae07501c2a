//! Cross-platform path resolution.
//!
//! Default profile locations for Chromium-family browsers. Lookups return
//! `None` if the directory doesn't exist or can't be determined.

use crate::model::Browser;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Linux,
    MacOS,
    Windows,
}

impl Os {
    pub fn current() -> Self {
        #[cfg(target_os = "macos")]
        return Os::MacOS;
        #[cfg(target_os = "windows")]
        return Os::Windows;
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        return Os::Linux;
    }
}

/// Browser user-data directory, relative to the platform base directory.
///
/// - Linux: relative to `~/.config`
/// - macOS: relative to `~/Library/Application Support`
/// - Windows: relative to `%LOCALAPPDATA%`
fn user_data_segments(browser: Browser, os: Os) -> &'static [&'static str] {
    match (browser, os) {
        (Browser::Chrome, Os::Linux) => &["google-chrome"],
        (Browser::Chrome, Os::MacOS) => &["Google", "Chrome"],
        (Browser::Chrome, Os::Windows) => &["Google", "Chrome", "User Data"],
        (Browser::Chromium, Os::Linux) => &["chromium"],
        (Browser::Chromium, Os::MacOS) => &["Chromium"],
        (Browser::Chromium, Os::Windows) => &["Chromium", "User Data"],
        (Browser::Brave, Os::Linux) => &["BraveSoftware", "Brave-Browser"],
        (Browser::Brave, Os::MacOS) => &["BraveSoftware", "Brave-Browser"],
        (Browser::Brave, Os::Windows) => &["BraveSoftware", "Brave-Browser", "User Data"],
        (Browser::Edge, Os::Linux) => &["microsoft-edge"],
        (Browser::Edge, Os::MacOS) => &["Microsoft Edge"],
        (Browser::Edge, Os::Windows) => &["Microsoft", "Edge", "User Data"],
        (Browser::Vivaldi, Os::Linux) => &["vivaldi"],
        (Browser::Vivaldi, Os::MacOS) => &["Vivaldi"],
        (Browser::Vivaldi, Os::Windows) => &["Vivaldi", "User Data"],
    }
}

fn base_dir(os: Os) -> Option<PathBuf> {
    match os {
        Os::Linux => dirs::config_dir(),
        Os::MacOS => Some(dirs::home_dir()?.join("Library").join("Application Support")),
        Os::Windows => dirs::data_local_dir(),
    }
}

/// Returns the browser's user-data directory (the parent of `Default`).
///
/// Returns `None` if the directory doesn't exist.
pub fn default_profile_dir(browser: Browser) -> Option<PathBuf> {
    let os = Os::current();
    let mut path = base_dir(os)?;
    for segment in user_data_segments(browser, os) {
        path.push(segment);
    }

    if path.exists() {
        Some(path)
    } else {
        None
    }
}
