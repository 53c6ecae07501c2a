pub mod checker;
pub mod config;
pub mod error;
pub mod inventory;
pub mod model;
pub mod output;
pub mod platform;
pub mod profile;
pub mod scanner;

pub use config::Config;
pub use error::{InventoryError, ProbeError};
pub use inventory::{Inventory, InventoryOptions};
pub use model::{Availability, Browser, ExtensionId, ExtensionRecord, InventoryReport};
pub use profile::ProfileLayout;
