//! HTML report output format.
//!
//! A self-contained page with enabled and disabled extensions in separate
//! sections. Each entry links to its store listing; removed listings are
//! struck through.

use crate::model::{Availability, ExtensionRecord, InventoryReport};
use anyhow::Result;

const STORE_DETAIL_URL: &str = "https://chrome.google.com/webstore/detail/";

/// Generate and print HTML report output
pub fn print_html(report: &InventoryReport) -> Result<()> {
    let html = generate_html_string(report);
    println!("{}", html);
    Ok(())
}

/// Generate HTML as a string (for file output)
pub fn generate_html_string(report: &InventoryReport) -> String {
    let mut html = String::new();

    html.push_str(&format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Chrome extensions</title>
    <style>
        body {{ color: #333; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; }}
        a.unavailable {{ opacity: 0.75; text-decoration: line-through; }}
        a.indeterminate {{ font-style: italic; }}
        .version {{ color: #888; }}
        .empty {{ color: #888; }}
        footer {{ color: #888; font-size: 0.8rem; margin-top: 2rem; }}
    </style>
</head>
<body>
    <header>
        <h1>Chrome extensions</h1>
        <p>{}</p>
    </header>
"#,
        report.scan_time.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    push_section(&mut html, "Enabled extensions", report.enabled());
    push_section(&mut html, "Disabled extensions", report.disabled());

    html.push_str(&format!(
        r#"    <footer>
        {} extensions, {} removed from the store, {} unknown. Generated by extlist.
    </footer>
</body>
</html>
"#,
        report.records.len(),
        report.count(Availability::Unavailable),
        report.count(Availability::Indeterminate)
    ));

    html
}

fn push_section<'a>(
    html: &mut String,
    title: &str,
    records: impl Iterator<Item = &'a ExtensionRecord>,
) {
    html.push_str(&format!("    <section>\n        <h2>{}</h2>\n", title));

    let mut empty = true;
    for record in records {
        empty = false;
        html.push_str(&format!("        {}\n", render_entry(record)));
    }

    if empty {
        html.push_str("        <p class=\"empty\">None</p>\n");
    }

    html.push_str("    </section>\n");
}

fn render_entry(record: &ExtensionRecord) -> String {
    let class = match record.availability {
        Availability::Available => "",
        Availability::Unavailable => r#" class="unavailable""#,
        Availability::Indeterminate => r#" class="indeterminate""#,
    };

    let version = record
        .version
        .as_deref()
        .map(|v| format!(" <span class=\"version\">{}</span>", html_escape(v)))
        .unwrap_or_default();

    format!(
        r#"<p><a{} href="{}{}">{}</a>{}</p>"#,
        class,
        STORE_DETAIL_URL,
        record.id,
        html_escape(record.display_name()),
        version
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExtensionId;

    fn record(
        id: &str,
        name: Option<&str>,
        disabled: bool,
        availability: Availability,
    ) -> ExtensionRecord {
        ExtensionRecord {
            id: ExtensionId::parse(id).unwrap(),
            name: name.map(str::to_string),
            version: Some("1.0".to_string()),
            disabled,
            availability,
        }
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_unavailable_is_struck_through() {
        let entry = render_entry(&record(
            "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
            Some("Gone"),
            false,
            Availability::Unavailable,
        ));
        assert!(entry.contains(r#"class="unavailable""#));
        assert!(entry.contains(
            "https://chrome.google.com/webstore/detail/aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"
        ));
    }

    #[test]
    fn test_indeterminate_is_not_marked_unavailable() {
        let entry = render_entry(&record(
            "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
            Some("Maybe"),
            false,
            Availability::Indeterminate,
        ));
        assert!(!entry.contains("unavailable"));
    }

    #[test]
    fn test_unnamed_uses_id_label() {
        let entry = render_entry(&record(
            "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
            None,
            false,
            Availability::Available,
        ));
        assert!(entry.contains(">aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa</a>"));
    }

    #[test]
    fn test_sections() {
        let report = InventoryReport::new(
            "/profile".into(),
            vec![
                record(
                    "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
                    Some("On"),
                    false,
                    Availability::Available,
                ),
                record(
                    "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb",
                    Some("Off"),
                    true,
                    Availability::Available,
                ),
            ],
        );

        let html = generate_html_string(&report);
        let enabled = html.find("Enabled extensions").unwrap();
        let disabled = html.find("Disabled extensions").unwrap();
        let on = html.find(">On</a>").unwrap();
        let off = html.find(">Off</a>").unwrap();

        assert!(enabled < on && on < disabled && disabled < off);
    }

    #[test]
    fn test_empty_sections() {
        let report = InventoryReport::new("/profile".into(), Vec::new());
        let html = generate_html_string(&report);
        assert_eq!(html.matches(r#"<p class="empty">None</p>"#).count(), 2);
    }
}
