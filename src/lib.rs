//! @ai:module:intent Load, check and serve fill-in-the-blank koan exercise content
//! @ai:module:layer infrastructure
//! @ai:module:public_api model, blank, document, check, store, evaluator, config, output, error
//! @ai:module:stateless true
//!
//! # Kata store
//!
//! Content is a JSON document holding one module (or an array of modules). Each
//! module is an ordered list of katas: a preparagraph, a code snippet with `__`
//! blanks, one solution literal per blank, and a postparagraph.
//!
//! ## Example
//!
//! ```rust,no_run
//! use kata_store::{ContentStore, StoreConfig};
//! use std::path::Path;
//!
//! let store = ContentStore::load_path(Path::new("content"), &StoreConfig::default()).unwrap();
//! let extractors = store.get(0).unwrap();
//! println!("{} has {} katas", extractors.title, extractors.katas.len());
//! ```

pub mod blank;
pub mod check;
pub mod config;
pub mod document;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod output;
pub mod store;

pub use blank::{BlankMarker, BlankPosition, DEFAULT_BLANK_MARKER};
pub use check::{check_documents, check_path, CheckReport, Issue, IssueLocation, Severity};
pub use config::{CheckConfig, ContentConfig, StoreConfig};
pub use document::{parse_document, read_document, Document};
pub use error::{Error, Result};
pub use evaluator::{attempt, Evaluator, LiteralEvaluator, Verdict};
pub use model::{Kata, Module};
pub use output::{format_check_report, format_kata, format_module, format_store, to_json, OutputFormat};
pub use store::ContentStore;
