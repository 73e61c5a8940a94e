//! @ai:module:intent Immutable, validated, ordered store of kata modules
//! @ai:module:layer application
//! @ai:module:public_api ContentStore
//! @ai:module:depends_on document, check, config, model, blank, error
//! @ai:module:stateless false
//! @ai:module:thread_safe true

use crate::blank::BlankMarker;
use crate::check::check_documents;
use crate::config::StoreConfig;
use crate::document::{find_documents, parse_document, read_document, Document};
use crate::error::{Error, Result};
use crate::model::{Kata, Module};
use std::path::Path;

/// @ai:intent Read-only collection of modules in authoring order
/// @ai:invariant every kata has exactly one solution per blank marker
#[derive(Debug, Clone)]
pub struct ContentStore {
    modules: Vec<Module>,
    marker: BlankMarker,
}

impl ContentStore {
    /// @ai:intent Load a JSON document with the default configuration
    /// @ai:post modules are in document order
    /// @ai:effects pure
    /// @ai:example ContentStore::load(r#"{"title":"T","modules":[]}"#) -> Ok(store with 1 module)
    pub fn load(source: &str) -> Result<Self> {
        Self::load_with(source, "<inline>", &StoreConfig::default())
    }

    /// @ai:intent Load a JSON document, naming its origin in errors
    /// @ai:effects pure
    pub fn load_with(source: &str, origin: &str, config: &StoreConfig) -> Result<Self> {
        let doc = parse_document(source, origin)?;
        Self::from_documents(vec![doc], config)
    }

    /// @ai:intent Load a single document file
    /// @ai:effects fs:read
    pub fn load_file(path: &Path, config: &StoreConfig) -> Result<Self> {
        let doc = read_document(path)?;
        Self::from_documents(vec![doc], config)
    }

    /// @ai:intent Load every document under a directory, ordered by file name
    /// @ai:post fails as a whole if any document fails or any entry cannot be walked
    /// @ai:effects fs:read
    pub fn load_dir(dir: &Path, config: &StoreConfig) -> Result<Self> {
        let docs = find_documents(dir, &config.content.extension)?
            .iter()
            .map(|p| read_document(p))
            .collect::<Result<Vec<_>>>()?;
        Self::from_documents(docs, config)
    }

    /// @ai:intent Load a file or a directory depending on what the path points to
    /// @ai:effects fs:read
    pub fn load_path(path: &Path, config: &StoreConfig) -> Result<Self> {
        if path.is_dir() {
            Self::load_dir(path, config)
        } else {
            Self::load_file(path, config)
        }
    }

    /// @ai:intent Build a store from in-memory modules, validating them like a load
    /// @ai:effects pure
    pub fn from_modules(modules: Vec<Module>, config: &StoreConfig) -> Result<Self> {
        let doc = Document {
            origin: "<memory>".to_string(),
            modules,
        };
        Self::from_documents(vec![doc], config)
    }

    /// @ai:intent Validate parsed documents and flatten them into a store
    /// @ai:effects pure
    pub fn from_documents(documents: Vec<Document>, config: &StoreConfig) -> Result<Self> {
        let marker = config.blank_marker()?;
        let report = check_documents(&documents, &marker, &config.check);

        if let Some(issue) = report.first_failure(config.check.deny_warnings) {
            return Err(Error::malformed(
                issue.location.origin.as_str(),
                issue.location.to_string(),
                format!("{} ({})", issue.message, issue.code),
            ));
        }

        let modules: Vec<Module> = documents.into_iter().flat_map(|d| d.modules).collect();
        tracing::info!(
            "Loaded {} modules with {} katas ({} warnings)",
            modules.len(),
            modules.iter().map(Module::len).sum::<usize>(),
            report.warnings
        );

        Ok(Self { modules, marker })
    }

    /// @ai:intent Get a module by position
    /// @ai:effects pure
    pub fn get(&self, index: usize) -> Result<&Module> {
        self.modules.get(index).ok_or_else(|| Error::NotFound {
            what: "module".to_string(),
            index,
            count: self.modules.len(),
        })
    }

    /// @ai:intent Get a kata by module and kata position
    /// @ai:effects pure
    pub fn kata(&self, module_index: usize, kata_index: usize) -> Result<&Kata> {
        let module = self.get(module_index)?;
        module.katas.get(kata_index).ok_or_else(|| Error::NotFound {
            what: format!("kata in module `{}`", module.title),
            index: kata_index,
            count: module.katas.len(),
        })
    }

    /// @ai:intent Find the first module with the given title
    pub fn find(&self, title: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.title == title)
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Module> {
        self.modules.iter()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn kata_count(&self) -> usize {
        self.modules.iter().map(Module::len).sum()
    }

    pub fn blank_marker(&self) -> &BlankMarker {
        &self.marker
    }

    /// @ai:intent Serialize back to the document format
    /// @ai:post one module serializes as an object, any other count as an array
    /// @ai:effects pure
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = match self.modules.as_slice() {
            [single] if pretty => serde_json::to_string_pretty(single)?,
            [single] => serde_json::to_string(single)?,
            all if pretty => serde_json::to_string_pretty(all)?,
            all => serde_json::to_string(all)?,
        };
        Ok(json)
    }
}

impl PartialEq for ContentStore {
    fn eq(&self, other: &Self) -> bool {
        self.modules == other.modules && self.marker.token() == other.marker.token()
    }
}

impl<'a> IntoIterator for &'a ContentStore {
    type Item = &'a Module;
    type IntoIter = std::slice::Iter<'a, Module>;

    fn into_iter(self) -> Self::IntoIter {
        self.modules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use std::sync::Arc;
    use tempfile::TempDir;

    const EXTRACTORS: &str = include_str!("../content/extractors.json");

    fn write(dir: &Path, name: &str, content: &str) {
        let mut file = std::fs::File::create(dir.join(name)).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    fn module_doc(title: &str, code: &str, solutions: &str) -> String {
        format!(
            r#"{{ "title": "{}", "modules": [
  {{ "preparagraph": "p", "code": "{}", "solutions": {}, "postparagraph": "" }}
] }}"#,
            title, code, solutions
        )
    }

    #[test]
    fn test_load_extractors() {
        let store = ContentStore::load(EXTRACTORS).unwrap();

        assert_eq!(store.len(), 1);
        let module = store.get(0).unwrap();
        assert_eq!(module.title, "Extractors");
        assert_eq!(module.katas.len(), 7);
        assert_eq!(module.katas[0].solutions, vec!["\"Where's Batman?\"".to_string()]);
    }

    #[test]
    fn test_extractors_second_kata() {
        let store = ContentStore::load(EXTRACTORS).unwrap();
        let kata = store.kata(0, 1).unwrap();

        assert_eq!(kata.solutions, vec!["\"Chevy\"", "\"Camaro\"", "1978", "120"]);
    }

    #[test]
    fn test_extractors_solutions_match_blanks() {
        let store = ContentStore::load(EXTRACTORS).unwrap();
        let marker = store.blank_marker();

        for module in &store {
            for kata in &module.katas {
                assert_eq!(kata.solutions.len(), marker.count(&kata.code), "{}", kata.code);
            }
        }
        assert_eq!(store.kata_count(), 7);
    }

    #[test]
    fn test_load_preserves_order() {
        let text = r#"[
  { "title": "Zeta", "modules": [] },
  { "title": "Alpha", "modules": [] },
  { "title": "Mu", "modules": [] }
]"#;
        let store = ContentStore::load(text).unwrap();
        let titles: Vec<_> = store.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Zeta", "Alpha", "Mu"]);
    }

    #[test]
    fn test_mismatch_is_malformed() {
        let text = module_doc("T", "a(__) b(__)", r#"["1"]"#);
        match ContentStore::load(&text).unwrap_err() {
            Error::Malformed { location, message, .. } => {
                assert_eq!(location, "module 0, kata 0");
                assert!(message.contains("E001"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_get_out_of_bounds() {
        let store = ContentStore::load(EXTRACTORS).unwrap();

        let err = store.get(1).unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(err, Error::NotFound { index: 1, count: 1, .. }));
        assert!(store.kata(0, 7).unwrap_err().is_not_found());
        assert!(store.kata(3, 0).unwrap_err().is_not_found());
    }

    #[test]
    fn test_round_trip() {
        let store = ContentStore::load(EXTRACTORS).unwrap();

        let compact = ContentStore::load(&store.to_json(false).unwrap()).unwrap();
        let pretty = ContentStore::load(&store.to_json(true).unwrap()).unwrap();

        assert_eq!(compact, store);
        assert_eq!(pretty, store);
    }

    #[test]
    fn test_round_trip_many_modules() {
        let text = r#"[
  { "title": "A", "modules": [] },
  { "title": "B", "modules": [] }
]"#;
        let store = ContentStore::load(text).unwrap();
        let json = store.to_json(false).unwrap();

        assert!(json.starts_with('['));
        assert_eq!(ContentStore::load(&json).unwrap(), store);
    }

    #[test]
    fn test_kata_without_blanks_fails_by_default() {
        let text = module_doc("T", "val x = 1", "[]");
        match ContentStore::load(&text).unwrap_err() {
            Error::Malformed { message, .. } => assert!(message.contains("E002")),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_deny_warnings() {
        let text = module_doc("T", "val x = 1", "[]");
        let mut config = StoreConfig::default();
        config.check.require_blanks = false;
        assert!(ContentStore::load_with(&text, "t.json", &config).is_ok());

        config.check.deny_warnings = true;
        assert!(ContentStore::load_with(&text, "t.json", &config)
            .unwrap_err()
            .is_malformed());
    }

    #[test]
    fn test_custom_blank_marker() {
        let mut config = StoreConfig::default();
        config.content.blank_marker = "???".to_string();

        let text = module_doc("T", "x shouldBe ???", r#"["1"]"#);
        let store = ContentStore::load_with(&text, "t.json", &config).unwrap();
        assert_eq!(store.blank_marker().token(), "???");

        let text = module_doc("T", "x should be(__)", r#"["1"]"#);
        assert!(ContentStore::load_with(&text, "t.json", &config).is_err());
    }

    #[test]
    fn test_load_dir_in_file_name_order() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "02_options.json", &module_doc("Options", "x(__)", r#"["None"]"#));
        write(temp.path(), "01_extractors.json", EXTRACTORS);
        write(temp.path(), "README.md", "# not content");

        let store = ContentStore::load_path(temp.path(), &StoreConfig::default()).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(0).unwrap().title, "Extractors");
        assert_eq!(store.find("Options").unwrap().katas[0].solutions, vec!["None"]);
    }

    #[test]
    fn test_load_dir_is_atomic() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "01_good.json", EXTRACTORS);
        write(temp.path(), "02_bad.json", &module_doc("Bad", "x(__)", "[]"));

        let err = ContentStore::load_dir(temp.path(), &StoreConfig::default()).unwrap_err();
        match err {
            Error::Malformed { origin, .. } => assert!(origin.ends_with("02_bad.json")),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_load_dir_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let err = ContentStore::load_dir(&temp.path().join("not-here"), &StoreConfig::default())
            .unwrap_err();
        assert!(matches!(err, Error::Walk(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_load_dir_follows_symlinked_documents() {
        let temp = TempDir::new().unwrap();
        let shared = temp.path().join("shared");
        let content = temp.path().join("content");
        std::fs::create_dir_all(&shared).unwrap();
        std::fs::create_dir_all(&content).unwrap();
        write(&shared, "linked.json", EXTRACTORS);
        std::os::unix::fs::symlink(shared.join("linked.json"), content.join("01_linked.json"))
            .unwrap();

        let via_file =
            ContentStore::load_file(&content.join("01_linked.json"), &StoreConfig::default())
                .unwrap();
        let via_dir = ContentStore::load_dir(&content, &StoreConfig::default()).unwrap();

        assert_eq!(via_dir.len(), 1);
        assert_eq!(via_dir, via_file);
    }

    #[test]
    fn test_load_file_missing() {
        let temp = TempDir::new().unwrap();
        let err = ContentStore::load_file(&temp.path().join("missing.json"), &StoreConfig::default())
            .unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }

    #[test]
    fn test_shared_across_threads() {
        let store = Arc::new(ContentStore::load(EXTRACTORS).unwrap());

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.kata(0, i).unwrap().solutions.len())
            })
            .collect();

        let counts: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(counts, vec![1, 4, 2, 2]);
    }
}
