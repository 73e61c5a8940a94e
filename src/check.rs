//! @ai:module:intent Check kata content for schema and authoring problems
//! @ai:module:layer application
//! @ai:module:public_api check_documents, check_path, CheckReport, Issue, IssueLocation, Severity
//! @ai:module:depends_on document, model, blank, config, error
//! @ai:module:stateless true

use crate::blank::BlankMarker;
use crate::config::{CheckConfig, StoreConfig};
use crate::document::{module_slots, parse_document, walk_documents, Document};
use crate::error::{Error, Result};
use crate::model::{Kata, Module};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// @ai:intent Severity level for check issues
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// @ai:intent Where an issue was found
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IssueLocation {
    pub origin: String,
    pub module: Option<usize>,
    pub kata: Option<usize>,
}

/// @ai:intent A single problem found in the content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub code: String,
    pub message: String,
    pub location: IssueLocation,
    pub suggestion: Option<String>,
}

/// @ai:intent Result of checking one or more documents
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CheckReport {
    pub files_checked: usize,
    pub modules_checked: usize,
    pub katas_checked: usize,
    pub issues: Vec<Issue>,
    pub errors: usize,
    pub warnings: usize,
}

impl IssueLocation {
    pub fn document(origin: &str) -> Self {
        Self {
            origin: origin.to_string(),
            module: None,
            kata: None,
        }
    }

    pub fn module(origin: &str, module: usize) -> Self {
        Self {
            module: Some(module),
            ..Self::document(origin)
        }
    }

    pub fn kata(origin: &str, module: usize, kata: usize) -> Self {
        Self {
            kata: Some(kata),
            ..Self::module(origin, module)
        }
    }
}

impl fmt::Display for IssueLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.module, self.kata) {
            (Some(m), Some(k)) => write!(f, "module {}, kata {}", m, k),
            (Some(m), None) => write!(f, "module {}", m),
            _ => write!(f, "document"),
        }
    }
}

impl CheckReport {
    /// @ai:intent Check if the content passed (no errors)
    pub fn passed(&self) -> bool {
        self.errors == 0
    }

    /// @ai:intent Merge another report into this one
    pub fn merge(&mut self, other: CheckReport) {
        self.files_checked += other.files_checked;
        self.modules_checked += other.modules_checked;
        self.katas_checked += other.katas_checked;
        self.issues.extend(other.issues);
        self.errors += other.errors;
        self.warnings += other.warnings;
    }

    /// @ai:intent First issue that should fail a load under the given strictness
    /// @ai:effects pure
    pub fn first_failure(&self, deny_warnings: bool) -> Option<&Issue> {
        self.issues.iter().find(|i| match i.severity {
            Severity::Error => true,
            Severity::Warning => deny_warnings,
            Severity::Info => false,
        })
    }

    fn push(&mut self, issue: Issue) {
        match issue.severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
            Severity::Info => {}
        }
        self.issues.push(issue);
    }
}

/// @ai:intent Check every module of every document, numbering modules across documents
/// @ai:effects pure
pub fn check_documents(
    documents: &[Document],
    marker: &BlankMarker,
    config: &CheckConfig,
) -> CheckReport {
    let mut next_module = 0;
    let numbered: Vec<(usize, &Document)> = documents
        .iter()
        .map(|doc| {
            let first = next_module;
            next_module += doc.modules.len();
            (first, doc)
        })
        .collect();

    check_numbered(&numbered, marker, config)
}

/// @ai:intent Check a file or every document in a directory, reporting load and walk failures as issues
/// @ai:pre path exists
/// @ai:post module indexes match what a directory load would assign
/// @ai:effects fs:read
pub fn check_path(path: &Path, config: &StoreConfig) -> Result<CheckReport> {
    if !path.exists() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} does not exist", path.display()),
        )));
    }

    let marker = config.blank_marker()?;
    let entries: Vec<Result<PathBuf>> = if path.is_file() {
        vec![Ok(path.to_path_buf())]
    } else {
        walk_documents(path, &config.content.extension).collect()
    };

    let mut documents: Vec<(usize, Document)> = Vec::with_capacity(entries.len());
    let mut failures = CheckReport::default();
    let mut next_module = 0;

    for entry in entries {
        let file_path = match entry {
            Ok(file_path) => file_path,
            Err(e) => {
                let origin = match &e {
                    Error::Walk(walk) => walk.path().unwrap_or(path).display().to_string(),
                    _ => path.display().to_string(),
                };
                failures.push(load_failure(&origin, &e));
                continue;
            }
        };

        let origin = file_path.display().to_string();
        let text = match std::fs::read_to_string(&file_path) {
            Ok(text) => text,
            Err(source) => {
                failures.files_checked += 1;
                failures.push(load_failure(
                    &origin,
                    &Error::FileRead {
                        path: file_path.clone(),
                        source,
                    },
                ));
                continue;
            }
        };

        tracing::debug!("Checking content document {}", origin);
        match parse_document(&text, &origin) {
            Ok(doc) => {
                let first = next_module;
                next_module += doc.modules.len();
                documents.push((first, doc));
            }
            Err(e) => {
                // keep the failed document's modules in the numbering
                next_module += module_slots(&text);
                failures.files_checked += 1;
                failures.push(load_failure(&origin, &e));
            }
        }
    }

    let numbered: Vec<(usize, &Document)> = documents.iter().map(|(i, d)| (*i, d)).collect();
    let mut report = check_numbered(&numbered, &marker, &config.check);
    report.merge(failures);
    Ok(report)
}

fn load_failure(origin: &str, error: &Error) -> Issue {
    Issue {
        severity: Severity::Error,
        code: "E000".to_string(),
        message: format!("Failed to load document: {}", error),
        location: IssueLocation::document(origin),
        suggestion: None,
    }
}

fn check_numbered(
    documents: &[(usize, &Document)],
    marker: &BlankMarker,
    config: &CheckConfig,
) -> CheckReport {
    let mut report = CheckReport {
        files_checked: documents.len(),
        ..Default::default()
    };
    let mut seen_titles: HashMap<&str, usize> = HashMap::new();

    for (first, doc) in documents {
        for (offset, module) in doc.modules.iter().enumerate() {
            let module_idx = first + offset;
            check_module(&mut report, module, &doc.origin, module_idx, marker, config);

            if !module.title.trim().is_empty() {
                if let Some(first) = seen_titles.get(module.title.as_str()) {
                    report.push(Issue {
                        severity: Severity::Warning,
                        code: "W004".to_string(),
                        message: format!(
                            "Module title `{}` already used by module {}",
                            module.title, first
                        ),
                        location: IssueLocation::module(&doc.origin, module_idx),
                        suggestion: Some("Give each module a distinct title".to_string()),
                    });
                } else {
                    seen_titles.insert(module.title.as_str(), module_idx);
                }
            }
        }
    }

    report
}

fn check_module(
    report: &mut CheckReport,
    module: &Module,
    origin: &str,
    module_idx: usize,
    marker: &BlankMarker,
    config: &CheckConfig,
) {
    report.modules_checked += 1;
    report.katas_checked += module.katas.len();

    if module.title.trim().is_empty() {
        report.push(Issue {
            severity: Severity::Warning,
            code: "W005".to_string(),
            message: "Module has an empty title".to_string(),
            location: IssueLocation::module(origin, module_idx),
            suggestion: None,
        });
    }

    if module.katas.is_empty() {
        report.push(Issue {
            severity: Severity::Info,
            code: "I001".to_string(),
            message: format!("Module `{}` has no katas", module.title),
            location: IssueLocation::module(origin, module_idx),
            suggestion: None,
        });
    }

    for (kata_idx, kata) in module.katas.iter().enumerate() {
        let location = IssueLocation::kata(origin, module_idx, kata_idx);
        check_kata(report, kata, location, marker, config);
    }
}

fn check_kata(
    report: &mut CheckReport,
    kata: &Kata,
    location: IssueLocation,
    marker: &BlankMarker,
    config: &CheckConfig,
) {
    let blanks = kata.blank_count(marker);

    if blanks != kata.solutions.len() {
        report.push(Issue {
            severity: Severity::Error,
            code: "E001".to_string(),
            message: format!(
                "Kata has {} blank markers but {} solutions",
                blanks,
                kata.solutions.len()
            ),
            location: location.clone(),
            suggestion: Some(format!(
                "Provide exactly one solution per `{}` in reading order",
                marker.token()
            )),
        });
    }

    if blanks == 0 && config.require_blanks {
        report.push(Issue {
            severity: Severity::Error,
            code: "E002".to_string(),
            message: "Kata code has no blank markers; every kata needs at least one".to_string(),
            location: location.clone(),
            suggestion: Some(format!("Mark the answer positions with `{}`", marker.token())),
        });
    } else if blanks == 0 && config.warn_no_blanks {
        report.push(Issue {
            severity: Severity::Warning,
            code: "W001".to_string(),
            message: "Kata code has no blank markers (allowed only because require_blanks is off)"
                .to_string(),
            location: location.clone(),
            suggestion: Some(format!("Mark the answer positions with `{}`", marker.token())),
        });
    }

    if config.warn_empty_preparagraph && kata.preparagraph.trim().is_empty() {
        report.push(Issue {
            severity: Severity::Warning,
            code: "W002".to_string(),
            message: "Kata has an empty preparagraph".to_string(),
            location: location.clone(),
            suggestion: None,
        });
    }

    if let Some(idx) = kata.solutions.iter().position(|s| s.trim().is_empty()) {
        report.push(Issue {
            severity: Severity::Warning,
            code: "W003".to_string(),
            message: format!("Solution {} is empty", idx),
            location,
            suggestion: None,
        });
    }
}
