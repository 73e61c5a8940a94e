//! @ai:module:intent Parse content documents into typed modules
//! @ai:module:layer application
//! @ai:module:public_api Document, parse_document, read_document, find_documents, walk_documents, module_slots
//! @ai:module:depends_on model, error
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::model::{Kata, Module};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// @ai:intent Modules parsed from one source, tagged with where they came from
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub origin: String,
    pub modules: Vec<Module>,
}

/// Module shape before its katas are typed, so kata errors can name their index.
#[derive(Deserialize)]
struct RawModule {
    title: String,
    modules: Vec<Value>,
}

/// @ai:intent Parse a JSON document holding one module object or an array of them
/// @ai:post module and kata order matches the input
/// @ai:effects pure
pub fn parse_document(text: &str, origin: &str) -> Result<Document> {
    let value: Value = serde_json::from_str(text).map_err(|e| {
        Error::malformed(
            origin,
            format!("line {}, column {}", e.line(), e.column()),
            e.to_string(),
        )
    })?;

    let modules = match value {
        Value::Object(_) => vec![parse_module(value, origin, 0)?],
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| parse_module(item, origin, idx))
            .collect::<Result<Vec<_>>>()?,
        other => {
            return Err(Error::malformed(
                origin,
                "document root",
                format!(
                    "expected a module object or an array of modules, found {}",
                    json_kind(&other)
                ),
            ))
        }
    };

    Ok(Document {
        origin: origin.to_string(),
        modules,
    })
}

/// @ai:intent Read and parse a document from disk
/// @ai:effects fs:read
pub fn read_document(path: &Path) -> Result<Document> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!("Parsing content document {}", path.display());
    parse_document(&text, &path.display().to_string())
}

/// @ai:intent Walk a directory for content documents, ordered by file name, yielding walk failures in place
/// @ai:post symlinked documents are followed like regular files
/// @ai:effects fs:read
pub fn walk_documents<'a>(
    dir: &Path,
    extension: &'a str,
) -> impl Iterator<Item = Result<PathBuf>> + 'a {
    WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(e) => {
                let matches = e.file_type().is_file()
                    && e.path()
                        .extension()
                        .map(|ext| ext == extension)
                        .unwrap_or(false);
                matches.then(|| Ok(e.into_path()))
            }
            Err(e) => Some(Err(Error::Walk(e))),
        })
}

/// @ai:intent Find content documents under a directory, ordered by file name
/// @ai:post fails on the first entry that cannot be walked, including a missing root
/// @ai:effects fs:read
pub fn find_documents(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    walk_documents(dir, extension).collect()
}

/// @ai:intent Count the top-level module slots of a document that failed to parse
/// @ai:post 0 when the text is not JSON at all
/// @ai:effects pure
pub fn module_slots(text: &str) -> usize {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(_)) => 1,
        Ok(Value::Array(items)) => items.len(),
        _ => 0,
    }
}

fn parse_module(value: Value, origin: &str, index: usize) -> Result<Module> {
    let location = format!("module {}", index);

    if !value.is_object() {
        return Err(Error::malformed(
            origin,
            location,
            format!("expected a module object, found {}", json_kind(&value)),
        ));
    }

    let raw: RawModule = serde_json::from_value(value)
        .map_err(|e| Error::malformed(origin, location.as_str(), e.to_string()))?;

    let katas = raw
        .modules
        .into_iter()
        .enumerate()
        .map(|(kata_idx, item)| {
            serde_json::from_value::<Kata>(item).map_err(|e| {
                Error::malformed(
                    origin,
                    format!("{}, kata {}", location, kata_idx),
                    e.to_string(),
                )
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Module {
        title: raw.title,
        katas,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
