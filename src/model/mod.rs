//! Core data types for extensions and inventory results.
//!
//! - [`ExtensionId`] - A validated store identifier
//! - [`Availability`] - Store listing status
//! - [`ExtensionRecord`] - One installed extension
//! - [`InventoryReport`] - Complete, ordered inventory of a profile
//! - [`Browser`] - Chromium-family browser whose profile is scanned
//!
//! # Example
//!
//! ```
//! use extlist::{Availability, ExtensionId, ExtensionRecord, InventoryReport};
//!
//! let record = ExtensionRecord {
//!     id: ExtensionId::parse("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa").unwrap(),
//!     name: Some("Tab Saver".to_string()),
//!     version: Some("1.2".to_string()),
//!     disabled: false,
//!     availability: Availability::Available,
//! };
//! let report = InventoryReport::new("/tmp/profile".into(), vec![record]);
//!
//! println!("Found {} extensions", report.records.len());
//! ```

mod extension;

pub use extension::*;
