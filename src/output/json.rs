use crate::model::InventoryReport;
use anyhow::Result;

pub fn print_json(report: &InventoryReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{}", json);
    Ok(())
}
