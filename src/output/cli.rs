use crate::model::{Availability, InventoryReport};
use anyhow::Result;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct ExtensionRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Store")]
    store: String,
    #[tabled(rename = "ID")]
    id: String,
}

pub fn print_cli_table(report: &InventoryReport) -> Result<()> {
    println!("{}", generate_table_string(report));
    Ok(())
}

pub(crate) fn generate_table_string(report: &InventoryReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Scan completed at: {}\nProfile: {}\n\n",
        report.scan_time.format("%Y-%m-%d %H:%M:%S UTC"),
        report.profile.display()
    ));

    if report.records.is_empty() {
        out.push_str("No extensions found.\n");
        return out;
    }

    let rows: Vec<ExtensionRow> = report
        .records
        .iter()
        .map(|r| ExtensionRow {
            name: truncate(r.display_name(), 40),
            version: r.version.clone().unwrap_or_else(|| "-".to_string()),
            state: if r.disabled { "disabled" } else { "enabled" }.to_string(),
            store: r.availability.display_name().to_string(),
            id: r.id.to_string(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    out.push_str(&table);
    out.push('\n');

    out.push_str(&format!(
        "\n{} extensions ({} enabled, {} disabled); {} removed from the store, {} unknown\n",
        report.records.len(),
        report.enabled().count(),
        report.disabled().count(),
        report.count(Availability::Unavailable),
        report.count(Availability::Indeterminate)
    ));

    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
