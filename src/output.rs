//! @ai:module:intent Format stores, katas and check reports for display
//! @ai:module:layer infrastructure
//! @ai:module:public_api OutputFormat, format_check_report, format_store, format_module, format_kata, to_json
//! @ai:module:depends_on check, store, model, blank
//! @ai:module:stateless true

use crate::blank::BlankMarker;
use crate::check::{CheckReport, Issue, Severity};
use crate::model::{Kata, Module};
use crate::store::ContentStore;
use colored::Colorize;
use serde::Serialize;

/// @ai:intent Output format options
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    JsonPretty,
}

/// @ai:intent Format a check report as a string
/// @ai:effects pure
pub fn format_check_report(report: &CheckReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(report, false),
        OutputFormat::JsonPretty => to_json(report, true),
        OutputFormat::Text => format_check_report_text(report),
    }
}

fn format_check_report_text(report: &CheckReport) -> String {
    let mut output = String::new();

    // Issues grouped by document, then by module/kata, in first-seen order.
    let mut groups: Vec<(&str, Vec<(String, Vec<&Issue>)>)> = Vec::new();
    for issue in &report.issues {
        let origin = issue.location.origin.as_str();
        let pos = match groups.iter().position(|(o, _)| *o == origin) {
            Some(pos) => pos,
            None => {
                groups.push((origin, Vec::new()));
                groups.len() - 1
            }
        };

        let place = issue.location.to_string();
        let places = &mut groups[pos].1;
        match places.iter_mut().find(|(p, _)| *p == place) {
            Some((_, issues)) => issues.push(issue),
            None => places.push((place, vec![issue])),
        }
    }

    for (origin, places) in &groups {
        output.push_str(&format!("{}\n", origin.bold()));

        for (place, issues) in places {
            output.push_str(&format!("  {}\n", place.dimmed()));

            for issue in issues {
                let tag = match issue.severity {
                    Severity::Error => format!("{} {}", "error", issue.code).red().bold(),
                    Severity::Warning => format!("{} {}", "warn", issue.code).yellow().bold(),
                    Severity::Info => format!("{} {}", "info", issue.code).blue(),
                };
                output.push_str(&format!("    {}: {}\n", tag, issue.message));

                if let Some(suggestion) = &issue.suggestion {
                    output.push_str(&format!("      {} {}\n", "=>".cyan(), suggestion));
                }
            }
        }
        output.push('\n');
    }

    let verdict = if report.errors > 0 {
        "FAILED".red().bold()
    } else {
        "PASSED".green().bold()
    };
    output.push_str(&format!(
        "{}: {} errors, {} warnings across {} files ({} modules, {} katas)\n",
        verdict,
        report.errors,
        report.warnings,
        report.files_checked,
        report.modules_checked,
        report.katas_checked
    ));

    output
}

/// @ai:intent Format a whole store: JSON as the document format, text as a listing
/// @ai:effects pure
pub fn format_store(store: &ContentStore, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => store.to_json(false).unwrap_or_default(),
        OutputFormat::JsonPretty => store.to_json(true).unwrap_or_default(),
        OutputFormat::Text => {
            let mut output = String::new();
            for (idx, module) in store.iter().enumerate() {
                output.push_str(&format!(
                    "{:>3}  {} ({} katas)\n",
                    idx,
                    module.title.bold(),
                    module.len()
                ));
            }
            output.push_str(&format!(
                "\n{} modules, {} katas\n",
                store.len(),
                store.kata_count()
            ));
            output
        }
    }
}

/// @ai:intent Format one module with a line per kata
/// @ai:effects pure
pub fn format_module(module: &Module, marker: &BlankMarker, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(module, false),
        OutputFormat::JsonPretty => to_json(module, true),
        OutputFormat::Text => {
            let mut output = format!("{}\n", module.title.bold());

            for (idx, kata) in module.katas.iter().enumerate() {
                let summary = kata.preparagraph.lines().next().unwrap_or("");
                output.push_str(&format!(
                    "  {:>3}  {} {}\n",
                    idx,
                    format!("[{} blanks]", kata.blank_count(marker)).dimmed(),
                    summary
                ));
            }

            output
        }
    }
}

/// @ai:intent Format one kata, highlighting its blanks in text mode
/// @ai:effects pure
pub fn format_kata(kata: &Kata, marker: &BlankMarker, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(kata, false),
        OutputFormat::JsonPretty => to_json(kata, true),
        OutputFormat::Text => {
            let mut output = String::new();

            if !kata.preparagraph.is_empty() {
                output.push_str(&kata.preparagraph);
                output.push_str("\n\n");
            }

            let blank = marker.token().yellow().bold().to_string();
            let highlighted = marker
                .fill(&kata.code, &vec![blank; kata.blank_count(marker)])
                .unwrap_or_else(|_| kata.code.clone());
            for line in highlighted.lines() {
                output.push_str(&format!("    {}\n", line));
            }

            output.push_str(&format!(
                "\n{} {}\n",
                "solutions:".cyan(),
                kata.solutions.join(", ")
            ));

            if !kata.postparagraph.is_empty() {
                output.push('\n');
                output.push_str(&kata.postparagraph);
                output.push('\n');
            }

            output
        }
    }
}

/// @ai:intent Format any serializable value as JSON
/// @ai:effects pure
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> String {
    if pretty {
        serde_json::to_string_pretty(value).unwrap_or_default()
    } else {
        serde_json::to_string(value).unwrap_or_default()
    }
}
