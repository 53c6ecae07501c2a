//! The inventory pipeline: scan, probe, merge, order.
//!
//! # Example
//!
//! ```no_run
//! use extlist::checker::WebStoreProber;
//! use extlist::inventory::{Inventory, InventoryOptions};
//! use extlist::profile::ProfileLayout;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let layout = ProfileLayout::resolve(Path::new("/home/me/.config/google-chrome"))?;
//!     let prober = WebStoreProber::new()?;
//!
//!     let report = Inventory::new(InventoryOptions::new(layout)).collect(&prober).await?;
//!     for record in report.enabled() {
//!         println!("{} {}", record.display_name(), record.availability);
//!     }
//!     Ok(())
//! }
//! ```

use crate::checker::AvailabilityProber;
use crate::error::InventoryError;
use crate::model::{Availability, ExtensionRecord, InventoryReport};
use crate::profile::ProfileLayout;
use crate::scanner::{read_settings, ExtensionScanner, ExtensionSettings, ScannedExtension};
use std::cmp::Ordering;
use tracing::{debug, info};

/// Everything the pipeline needs to know about one run.
#[derive(Debug, Clone)]
pub struct InventoryOptions {
    pub layout: ProfileLayout,
}

impl InventoryOptions {
    pub fn new(layout: ProfileLayout) -> Self {
        Self { layout }
    }
}

pub struct Inventory {
    options: InventoryOptions,
}

impl Inventory {
    pub fn new(options: InventoryOptions) -> Self {
        Self { options }
    }

    /// Runs the whole pipeline for one profile.
    ///
    /// Extensions are processed one at a time, so the prober sees strictly
    /// sequential requests.
    ///
    /// # Errors
    ///
    /// Only if the extensions directory itself cannot be read. Problems with
    /// individual extensions degrade their record instead.
    pub async fn collect(
        &self,
        prober: &dyn AvailabilityProber,
    ) -> Result<InventoryReport, InventoryError> {
        self.collect_with_progress(prober, |_, _| {}).await
    }

    /// Like [`collect`](Self::collect), calling `progress(done, total)` after
    /// each extension.
    pub async fn collect_with_progress<F>(
        &self,
        prober: &dyn AvailabilityProber,
        mut progress: F,
    ) -> Result<InventoryReport, InventoryError>
    where
        F: FnMut(usize, usize),
    {
        let layout = &self.options.layout;
        let settings = read_settings(&layout.profile_dir);
        debug!(entries = settings.len(), "extension settings");

        let scanned = ExtensionScanner::new(&layout.extensions_dir).scan(&settings)?;

        let total = scanned.len();
        info!(
            total,
            root = %layout.extensions_dir.display(),
            prober = prober.name(),
            "scanning extensions"
        );

        let mut records = Vec::with_capacity(total);
        for (done, ext) in scanned.into_iter().enumerate() {
            let availability = Availability::from_probe(&ext.id, prober.probe(&ext.id).await);
            records.push(merge(ext, &settings, availability));
            progress(done + 1, total);
        }

        sort_records(&mut records);

        Ok(InventoryReport::new(layout.profile_dir.clone(), records))
    }
}

/// Builds the record for one extension from its three sources.
pub fn merge(
    scanned: ScannedExtension,
    settings: &ExtensionSettings,
    availability: Availability,
) -> ExtensionRecord {
    let disabled = settings.is_disabled(&scanned.id);
    let version = scanned.version().map(str::to_string);

    ExtensionRecord {
        id: scanned.id,
        name: scanned.name,
        version,
        disabled,
        availability,
    }
}

/// Enabled before disabled, then by case-insensitive name. Unnamed records
/// sort as the empty string; ties fall back to the id.
pub fn compare_records(a: &ExtensionRecord, b: &ExtensionRecord) -> Ordering {
    a.disabled
        .cmp(&b.disabled)
        .then_with(|| sort_key(a).cmp(&sort_key(b)))
        .then_with(|| a.id.cmp(&b.id))
}

pub fn sort_records(records: &mut [ExtensionRecord]) {
    records.sort_by(compare_records);
}

fn sort_key(record: &ExtensionRecord) -> String {
    record.name.as_deref().unwrap_or("").to_lowercase()
}
