//! Markdown reports rendered from a document snapshot.

use crate::model::{ChecklistDocument, Item};
use chrono::NaiveDate;
use std::fmt::Write;

pub const SUMMARY_FILE_NAME: &str = "cx-checklist.md";
pub const DETAILED_FILE_NAME: &str = "cx-checklist-detailed-report.md";

fn status_mark(item: &Item) -> &'static str {
    if item.completed {
        "✓"
    } else {
        "□"
    }
}

/// Table cells cannot contain raw pipes or line breaks.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Title, date, and one `Status | Task | Priority` table per category.
pub fn summary_report(doc: &ChecklistDocument, generated_on: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}\n", doc.title);
    let _ = writeln!(out, "Generated on: {generated_on}\n");
    let _ = writeln!(out, "Overall progress: {}\n", doc.progress());

    for category in &doc.categories {
        let _ = writeln!(out, "## {} ({})\n", category.title, category.progress());
        out.push_str("| Status | Task | Priority |\n");
        out.push_str("|:------:|------|----------|\n");
        for item in &category.items {
            let _ = writeln!(
                out,
                "| {} | {} | {} |",
                status_mark(item),
                cell(&item.title),
                item.priority
            );
        }
        out.push('\n');
    }
    out
}

/// Every item with its action, rationale, and insight.
pub fn detailed_report(doc: &ChecklistDocument, generated_on: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}\n", doc.title);
    let _ = writeln!(out, "Detailed Report - Generated on: {generated_on}\n");

    for category in &doc.categories {
        let _ = writeln!(out, "## {}\n", category.title);
        for item in &category.items {
            let _ = writeln!(
                out,
                "### {} {} ({})\n",
                status_mark(item),
                item.title,
                item.priority
            );
            let _ = writeln!(out, "**Action:**\n{}\n", item.action);
            let _ = writeln!(out, "**Why:**\n{}\n", item.reason);
            let _ = writeln!(out, "**Expert Insight:**\n{}\n", item.insight);
        }
    }
    out
}
