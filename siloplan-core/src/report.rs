// Link plan report rendering

use crate::model::{LinkPlan, Page};
use crate::verify::{SILO_RULES, VerificationResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n";
const THIN_RULE: &str = "────────────────────────────────────────────────────────────────────────────────\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
    Markdown,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            _ => None,
        }
    }
}

/// Render a report in the requested format
pub fn render_report(
    format: ReportFormat,
    plan: &LinkPlan,
    verification: &VerificationResult,
) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(generate_text_report(plan, verification)),
        ReportFormat::Json => generate_json_report(plan, verification),
        ReportFormat::Markdown => Ok(generate_markdown_report(plan, verification)),
    }
}

pub fn generate_text_report(plan: &LinkPlan, verification: &VerificationResult) -> String {
    let mut report = String::new();

    report.push_str(RULE);
    report.push_str("                          REVERSE SILO LINKING PLAN\n");
    report.push_str(RULE);
    report.push('\n');

    report.push_str(&format!("Silo Type:    {}\n", plan.silo_type));
    report.push_str(&format!("Chain Pages:  {}\n", plan.chain.len()));
    report.push_str(&format!("Entries:      {}\n", plan.entries.len()));
    report.push_str(&format!("Links:        {}\n", plan.total_links()));
    report.push('\n');

    if !plan.chain.is_empty() {
        report.push_str(RULE);
        report.push_str("CHAIN ORDER\n");
        report.push_str(RULE);
        report.push('\n');
        report.push_str(&format_chain(&plan.chain));
        report.push('\n');
    }

    if !plan.entries.is_empty() {
        report.push_str(RULE);
        report.push_str("LINKS TO ADD\n");
        report.push_str(RULE);
        report.push('\n');

        for (idx, entry) in plan.entries.iter().enumerate() {
            report.push_str(&format!(
                "[{}] From: {} - {}\n",
                idx + 1,
                entry.source_label,
                entry.source_url
            ));
            for (link_idx, link) in entry.target_links.iter().enumerate() {
                report.push_str(&format!("  {}. Link to:     {}\n", link_idx + 1, link.url));
                report.push_str(&format!("     Anchor Text: {}\n", link.anchor_text));
            }
            report.push('\n');
            report.push_str(THIN_RULE);
            report.push('\n');
        }
    }

    report.push_str(RULE);
    report.push_str("VERIFY YOUR SILO\n");
    report.push_str(RULE);
    report.push('\n');
    for rule in SILO_RULES {
        report.push_str(&format!("  [ ] {}\n", rule));
    }
    report.push('\n');
    report.push_str(&format!("{}\n", verification.display_message()));

    report
}

pub fn generate_json_report(
    plan: &LinkPlan,
    verification: &VerificationResult,
) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "Siloplan",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json"
            },
            "silo_type": plan.silo_type.as_str(),
            "summary": {
                "chain_pages": plan.chain.len(),
                "entries": plan.entries.len(),
                "links": plan.total_links()
            },
            "chain": plan.chain,
            "entries": plan.entries,
            "verification": verification,
            "rules": SILO_RULES
        }
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn generate_markdown_report(plan: &LinkPlan, verification: &VerificationResult) -> String {
    let mut report = String::new();

    report.push_str("# Reverse Silo Linking Plan\n\n");
    report.push_str(&format!("This is a **{}**.\n\n", plan.silo_type));

    if !plan.chain.is_empty() {
        report.push_str("## Chain Order\n\n");
        for (idx, page) in plan.chain.iter().enumerate() {
            report.push_str(&format!("{}. {} - `{}`\n", idx + 1, page.label(), page.url));
        }
        report.push('\n');
    }

    if !plan.entries.is_empty() {
        report.push_str("## Links To Add\n\n");
        for entry in &plan.entries {
            report.push_str(&format!(
                "### From: {} - {}\n\n",
                entry.source_label, entry.source_url
            ));
            report.push_str("| Link to | Anchor Text |\n");
            report.push_str("|---------|-------------|\n");
            for link in &entry.target_links {
                report.push_str(&format!(
                    "| {} | {} |\n",
                    escape_markdown_cell(&link.url),
                    escape_markdown_cell(&link.anchor_text)
                ));
            }
            report.push('\n');
        }
    }

    report.push_str("## Verify Your Silo\n\n");
    for rule in SILO_RULES {
        report.push_str(&format!("- [ ] {}\n", rule));
    }
    report.push_str(&format!("\n> {}\n", verification.display_message()));

    report
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

fn format_chain(chain: &[Page]) -> String {
    let mut result = String::new();
    for (i, page) in chain.iter().enumerate() {
        let prefix = if i == chain.len() - 1 { "└── " } else { "├── " };
        let url = if page.url.trim().is_empty() {
            "(no url)"
        } else {
            page.url.as_str()
        };
        result.push_str(&format!("{}{}  {}\n", prefix, page.label(), url));
    }
    result
}

fn escape_markdown_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
