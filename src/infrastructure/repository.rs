//! File system repository for catalogs, locales and published documents

use crate::domain::catalog::{parse_catalog, Question};
use crate::domain::{PublishedDocument, TagInfoDocument, TranslationTable};
use crate::error::{Result, TagInfoError};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use walkdir::WalkDir;

fn locale_file_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^(?:[^_]+_)?(?P<lang>[^_.][^.]*)\.(?:arb|json)$").unwrap()
    })
}

/// Language code encoded in a locale file name (`app_en.arb` -> `en`)
pub fn locale_language(filename: &str) -> Option<&str> {
    locale_file_regex()
        .captures(filename)
        .and_then(|c| c.name("lang"))
        .map(|m| m.as_str())
}

/// Abstract repository for generator inputs and outputs
pub trait TagInfoRepository {
    /// Get the directory relative paths are resolved against
    fn root(&self) -> &Path;

    /// Load and concatenate question catalogs in the given order
    fn load_catalog(&self, paths: &[PathBuf]) -> Result<Vec<Question>>;

    /// Load translations from locale files or directories
    fn load_translations(
        &self,
        paths: &[PathBuf],
        language: Option<&str>,
    ) -> Result<TranslationTable>;

    /// Read the change-detection view of a previously published document
    fn read_document(&self, path: &Path) -> Result<Option<PublishedDocument>>;

    /// Persist a document, replacing any previous one
    fn write_document(&self, path: &Path, document: &TagInfoDocument) -> Result<()>;
}

/// File system implementation of TagInfoRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Repository rooted at the current working directory
    pub fn current() -> Result<Self> {
        Ok(FileSystemRepository::new(std::env::current_dir()?))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    /// Files below `dir` accepted by `filter`, in sorted path order
    fn collect_files(dir: &Path, filter: impl Fn(&Path) -> bool) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| filter(p.as_path()))
            .collect();
        files.sort();
        files
    }

    fn has_extension(path: &Path, extensions: &[&str]) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| extensions.contains(&e))
    }

    fn matches_language(path: &Path, language: Option<&str>) -> bool {
        let Some(language) = language else {
            return true;
        };

        path.file_name()
            .and_then(|n| n.to_str())
            .and_then(locale_language)
            .is_some_and(|lang| lang == language)
    }
}

impl TagInfoRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_catalog(&self, paths: &[PathBuf]) -> Result<Vec<Question>> {
        let mut questions = Vec::new();

        for path in paths {
            let path = self.resolve(path);
            let files = if path.is_dir() {
                Self::collect_files(&path, |p| Self::has_extension(p, &["json"]))
            } else if path.is_file() {
                vec![path]
            } else {
                return Err(TagInfoError::CatalogNotFound(path));
            };

            for file in files {
                let content = fs::read_to_string(&file)?;
                let parsed = parse_catalog(&content, &file.display().to_string())?;
                log::debug!("Loaded {} questions from {}", parsed.len(), file.display());
                questions.extend(parsed);
            }
        }

        Ok(questions)
    }

    fn load_translations(
        &self,
        paths: &[PathBuf],
        language: Option<&str>,
    ) -> Result<TranslationTable> {
        let mut table = TranslationTable::new();

        for path in paths {
            let path = self.resolve(path);
            let files = if path.is_dir() {
                Self::collect_files(&path, |p| {
                    Self::has_extension(p, &["arb", "json"]) && Self::matches_language(p, language)
                })
            } else if path.is_file() {
                vec![path]
            } else {
                return Err(TagInfoError::Config(format!(
                    "Locale path not found: {}",
                    path.display()
                )));
            };

            for file in files {
                let content = fs::read_to_string(&file)?;
                let loaded = table.load_json(&content).map_err(|e| {
                    TagInfoError::Config(format!("Failed to parse {}: {}", file.display(), e))
                })?;
                log::debug!("Loaded {} translations from {}", loaded, file.display());
            }
        }

        Ok(table)
    }

    fn read_document(&self, path: &Path) -> Result<Option<PublishedDocument>> {
        let path = self.resolve(path);

        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Writes to a temp file in the same directory, then renames into place.
    ///
    /// On Windows, `rename` does not overwrite existing files, so the
    /// destination is removed first.
    fn write_document(&self, path: &Path, document: &TagInfoDocument) -> Result<()> {
        let path = self.resolve(path);

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_name = format!(
            "{}.tmp-{}",
            path.file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("taginfo.json"),
            std::process::id()
        );
        let tmp_path = path.with_file_name(tmp_name);

        fs::write(&tmp_path, document.to_pretty_json()?)?;

        if cfg!(windows) && path.exists() {
            fs::remove_file(&path)?;
        }

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tags::TagAggregator;
    use crate::domain::TagInfoDocumentBuilder;
    use crate::infrastructure::Config;
    use tempfile::TempDir;

    fn setup() -> (TempDir, FileSystemRepository) {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        (temp, repo)
    }

    const CATALOG_A: &str =
        r#"[{"question": {"text": "A"}, "answer": {"input": [{"osm_tags": {"a": "1"}}]}}]"#;
    const CATALOG_B: &str =
        r#"[{"question": {"text": "B"}, "answer": {"input": [{"osm_tags": {"b": "1"}}]}}]"#;

    #[test]
    fn test_locale_language() {
        assert_eq!(locale_language("app_en.arb"), Some("en"));
        assert_eq!(locale_language("app_pt_BR.arb"), Some("pt_BR"));
        assert_eq!(locale_language("de.json"), Some("de"));
        assert_eq!(locale_language("README.md"), None);
    }

    #[test]
    fn test_load_catalog_files_in_argument_order() {
        let (temp, repo) = setup();
        fs::write(temp.path().join("a.json"), CATALOG_A).unwrap();
        fs::write(temp.path().join("b.json"), CATALOG_B).unwrap();

        let questions = repo
            .load_catalog(&[PathBuf::from("b.json"), PathBuf::from("a.json")])
            .unwrap();
        let texts: Vec<&str> = questions.iter().map(|q| q.text_ref()).collect();
        assert_eq!(texts, vec!["B", "A"]);
    }

    #[test]
    fn test_load_catalog_directory_sorted() {
        let (temp, repo) = setup();
        let dir = temp.path().join("catalog");
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("nested/b.json"), CATALOG_B).unwrap();
        fs::write(dir.join("a.json"), CATALOG_A).unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let questions = repo.load_catalog(&[PathBuf::from("catalog")]).unwrap();
        let texts: Vec<&str> = questions.iter().map(|q| q.text_ref()).collect();
        assert_eq!(texts, vec!["A", "B"]);
    }

    #[test]
    fn test_load_missing_catalog() {
        let (_temp, repo) = setup();
        let result = repo.load_catalog(&[PathBuf::from("missing.json")]);
        assert!(matches!(result, Err(TagInfoError::CatalogNotFound(_))));
    }

    #[test]
    fn test_load_translations_filters_language() {
        let (temp, repo) = setup();
        let dir = temp.path().join("l10n");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("app_en.arb"), r#"{"q": "Bench?"}"#).unwrap();
        fs::write(dir.join("app_de.arb"), r#"{"q": "Sitzbank?"}"#).unwrap();

        let table = repo
            .load_translations(&[PathBuf::from("l10n")], Some("en"))
            .unwrap();
        assert_eq!(table.resolve("@q"), "Bench?");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_load_translations_without_language_reads_all() {
        let (temp, repo) = setup();
        let dir = temp.path().join("l10n");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("app_de.arb"), r#"{"q": "Sitzbank?"}"#).unwrap();
        fs::write(dir.join("app_en.arb"), r#"{"r": "Lit?"}"#).unwrap();

        let table = repo.load_translations(&[PathBuf::from("l10n")], None).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_read_missing_document() {
        let (_temp, repo) = setup();
        assert!(repo.read_document(Path::new("taginfo.json")).unwrap().is_none());
    }

    #[test]
    fn test_write_and_read_document() {
        let (temp, repo) = setup();
        let questions = parse_catalog(CATALOG_A, "test").unwrap();
        let registry = TagAggregator::aggregate(&questions).unwrap();
        let config = Config::default();
        let translations = TranslationTable::new();
        let document = TagInfoDocumentBuilder::new(config.data_url, config.project, &translations)
            .build(&registry)
            .unwrap();

        repo.write_document(Path::new("out/taginfo.json"), &document)
            .unwrap();
        assert!(temp.path().join("out/taginfo.json").exists());

        let read = repo
            .read_document(Path::new("out/taginfo.json"))
            .unwrap()
            .unwrap();
        assert_eq!(read, PublishedDocument::from(&document));
        assert_eq!(read.content_hash(), document.content_hash());

        let leftovers: Vec<_> = fs::read_dir(temp.path().join("out"))
            .unwrap()
            .filter_map(|e| e.ok())
            .collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn test_read_document_tolerates_unknown_shape() {
        let (temp, repo) = setup();
        fs::write(
            temp.path().join("taginfo.json"),
            r#"{
                "data_format": 0,
                "project": {"content_hash": "abc123", "maintainers": ["x"]},
                "tags": [{"key": "bench", "object_types": ["polygon"], "extra": 1}]
            }"#,
        )
        .unwrap();

        let read = repo.read_document(Path::new("taginfo.json")).unwrap().unwrap();
        assert_eq!(read.content_hash(), Some("abc123"));
        assert!(read.data_updated.is_none());
    }

    #[test]
    fn test_read_document_without_project() {
        let (temp, repo) = setup();
        fs::write(temp.path().join("taginfo.json"), r#"{"tags": []}"#).unwrap();

        let read = repo.read_document(Path::new("taginfo.json")).unwrap().unwrap();
        assert_eq!(read.content_hash(), None);
    }

    #[test]
    fn test_read_document_rejects_invalid_json() {
        let (temp, repo) = setup();
        fs::write(temp.path().join("taginfo.json"), "not json").unwrap();

        let result = repo.read_document(Path::new("taginfo.json"));
        assert!(matches!(result, Err(TagInfoError::Json(_))));
    }
}
