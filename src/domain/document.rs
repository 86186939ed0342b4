//! Taginfo project document and change detection
//!
//! The document is rebuilt on every run. Its content hash covers everything
//! except the hash itself and `data_updated`, so an unchanged catalog yields
//! the same hash and no new document is published.

use crate::domain::object_type::ObjectType;
use crate::domain::tags::{DescriptionComposer, TagRegistry};
use crate::domain::TranslationTable;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Taginfo project file format version
pub const DATA_FORMAT: u32 = 1;

/// Format of `data_updated` (ISO-8601 basic, UTC)
pub const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Static project metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub name: String,
    pub description: String,
    pub project_url: String,
    pub doc_url: String,
    pub icon_url: String,
    pub contact_name: String,
    pub contact_email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    #[serde(flatten)]
    pub metadata: ProjectMetadata,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
}

/// One finalized tag of the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagEntry {
    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    pub object_types: Vec<ObjectType>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagInfoDocument {
    pub data_format: u32,
    pub data_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_updated: Option<String>,

    pub project: ProjectInfo,

    #[serde(default)]
    pub tags: Vec<TagEntry>,
}

/// The fields covered by the content hash
#[derive(Serialize)]
struct HashedContent<'a> {
    data_format: u32,
    data_url: &'a str,
    project: &'a ProjectMetadata,
    tags: &'a [TagEntry],
}

impl TagInfoDocument {
    pub fn content_hash(&self) -> Option<&str> {
        self.project.content_hash.as_deref()
    }

    /// Compute the SHA-256 digest of the document's semantic content
    pub fn compute_content_hash(&self) -> Result<String> {
        let content = HashedContent {
            data_format: self.data_format,
            data_url: &self.data_url,
            project: &self.project.metadata,
            tags: &self.tags,
        };

        let bytes = serde_json::to_vec(&content)?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(format!("{:x}", hasher.finalize()))
    }

    /// Set `data_updated` to the given time
    pub fn stamp(&mut self, now: DateTime<Utc>) {
        self.data_updated = Some(now.format(TIMESTAMP_FORMAT).to_string());
    }

    /// Render as pretty-printed JSON with four-space indentation
    pub fn to_pretty_json(&self) -> Result<String> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)?;

        let mut output = String::from_utf8_lossy(&buffer).into_owned();
        output.push('\n');
        Ok(output)
    }
}

/// Builder assembling a document from an aggregated registry
pub struct TagInfoDocumentBuilder<'a> {
    data_url: String,
    project: ProjectMetadata,
    translations: &'a TranslationTable,
}

impl<'a> TagInfoDocumentBuilder<'a> {
    pub fn new(
        data_url: impl Into<String>,
        project: ProjectMetadata,
        translations: &'a TranslationTable,
    ) -> Self {
        TagInfoDocumentBuilder {
            data_url: data_url.into(),
            project,
            translations,
        }
    }

    /// Build the document with its content hash set and no timestamp.
    pub fn build(&self, registry: &TagRegistry) -> Result<TagInfoDocument> {
        let composer = DescriptionComposer::new(self.translations);

        let tags = registry
            .iter()
            .map(|(identity, record)| TagEntry {
                key: identity.key.clone(),
                value: identity.value.clone(),
                object_types: record.object_types.iter().copied().collect(),
                description: composer.compose(&record.questions),
            })
            .collect();

        let mut document = TagInfoDocument {
            data_format: DATA_FORMAT,
            data_url: self.data_url.clone(),
            data_updated: None,
            project: ProjectInfo {
                metadata: self.project.clone(),
                content_hash: None,
            },
            tags,
        };

        document.project.content_hash = Some(document.compute_content_hash()?);
        Ok(document)
    }
}

/// What change detection needs from a previously published document.
///
/// Only `project.content_hash` is read, so files written by older versions
/// or edited by hand still compare as long as they are JSON objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PublishedDocument {
    #[serde(default)]
    pub data_updated: Option<String>,

    #[serde(default)]
    pub project: PublishedProject,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PublishedProject {
    #[serde(default)]
    pub content_hash: Option<String>,
}

impl PublishedDocument {
    pub fn content_hash(&self) -> Option<&str> {
        self.project.content_hash.as_deref()
    }
}

impl From<&TagInfoDocument> for PublishedDocument {
    fn from(document: &TagInfoDocument) -> Self {
        PublishedDocument {
            data_updated: document.data_updated.clone(),
            project: PublishedProject {
                content_hash: document.project.content_hash.clone(),
            },
        }
    }
}

/// Outcome of comparing a fresh document with the previous one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Publication {
    /// Content is identical; the previous artifact must be left untouched
    Unchanged,
    /// Content changed; the stamped document should be persisted
    Changed(TagInfoDocument),
}

/// Whether `new` differs from the previously published document.
///
/// A missing previous document, or one without a stored hash, always
/// warrants publication.
pub fn should_publish(new: &TagInfoDocument, previous: Option<&PublishedDocument>) -> bool {
    match previous.and_then(PublishedDocument::content_hash) {
        Some(previous_hash) => new.content_hash() != Some(previous_hash),
        None => true,
    }
}

/// Decide on publication and stamp the document if it changed.
pub fn prepare_publication(
    mut new: TagInfoDocument,
    previous: Option<&PublishedDocument>,
    now: DateTime<Utc>,
) -> Publication {
    if !should_publish(&new, previous) {
        return Publication::Unchanged;
    }

    new.stamp(now);
    Publication::Changed(new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::parse_catalog;
    use crate::domain::tags::TagAggregator;
    use chrono::TimeZone;

    fn metadata() -> ProjectMetadata {
        ProjectMetadata {
            name: "Test".to_string(),
            description: "Test project".to_string(),
            project_url: "https://example.org/".to_string(),
            doc_url: "https://example.org/doc".to_string(),
            icon_url: "https://example.org/icon.png".to_string(),
            contact_name: "Tester".to_string(),
            contact_email: "test@example.org".to_string(),
        }
    }

    fn build(catalog: &str) -> TagInfoDocument {
        let questions = parse_catalog(catalog, "test").unwrap();
        let registry = TagAggregator::aggregate(&questions).unwrap();
        let translations = TranslationTable::new();
        TagInfoDocumentBuilder::new("https://example.org/taginfo.json", metadata(), &translations)
            .build(&registry)
            .unwrap()
    }

    const CATALOG: &str = r#"[
        {"question": {"text": "Q1"},
         "answer": {"input": [{"osm_tags": {"bench": "yes"}}], "constructor": {"name": "x"}},
         "conditions": [{"osm_element": "OpenWay"}]},
        {"question": {"text": "Q2"},
         "answer": {"input": [{"osm_tags": {"bench": "yes"}}]},
         "conditions": [{"osm_element": "Node"}]}
    ]"#;

    const CATALOG_WITH_EXTRA_QUESTION: &str = r#"[
        {"question": {"text": "Q1"},
         "answer": {"input": [{"osm_tags": {"bench": "yes"}}], "constructor": {"name": "x"}},
         "conditions": [{"osm_element": "OpenWay"}]},
        {"question": {"text": "Q2"},
         "answer": {"input": [{"osm_tags": {"bench": "yes"}}]},
         "conditions": [{"osm_element": "Node"}]},
        {"question": {"text": "Q3"},
         "answer": {"input": [{"osm_tags": {"bench": "yes"}}]}}
    ]"#;

    fn published(catalog: &str, hour: u32) -> PublishedDocument {
        match prepare_publication(build(catalog), None, time(hour)) {
            Publication::Changed(doc) => PublishedDocument::from(&doc),
            Publication::Unchanged => panic!("Expected first run to publish"),
        }
    }

    fn time(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, hour, 30, 0).unwrap()
    }

    #[test]
    fn test_build_flattens_registry() {
        let document = build(CATALOG);

        assert_eq!(document.data_format, 1);
        assert!(document.data_updated.is_none());
        assert_eq!(document.tags.len(), 2);

        let bench = &document.tags[0];
        assert_eq!(bench.key, "bench");
        assert_eq!(bench.value.as_deref(), Some("yes"));
        assert_eq!(bench.object_types, vec![ObjectType::Way]);
        assert_eq!(bench.description, "Added by \"Q1\" and \"Q2\" questions.");

        let name = &document.tags[1];
        assert_eq!(name.key, "name");
        assert!(name.value.is_none());
    }

    #[test]
    fn test_key_only_tags_omit_value_field() {
        let document = build(CATALOG);
        let json = serde_json::to_value(&document).unwrap();
        let name = &json["tags"][1];
        assert_eq!(name["key"], "name");
        assert!(name.get("value").is_none());
        assert_eq!(json["project"]["name"], "Test");
        assert!(json["project"]["content_hash"].is_string());
    }

    #[test]
    fn test_hash_is_stable_and_ignores_timestamp() {
        let first = build(CATALOG);
        let mut second = build(CATALOG);
        second.stamp(time(10));

        assert_eq!(first.content_hash(), second.content_hash());
        assert_eq!(
            second.compute_content_hash().unwrap(),
            first.content_hash().unwrap()
        );
    }

    #[test]
    fn test_hash_changes_with_metadata() {
        let document = build(CATALOG);
        let mut changed = document.clone();
        changed.project.metadata.contact_email = "other@example.org".to_string();
        assert_ne!(
            changed.compute_content_hash().unwrap(),
            document.compute_content_hash().unwrap()
        );
    }

    #[test]
    fn test_first_run_always_publishes() {
        let document = build(CATALOG);
        assert!(should_publish(&document, None));

        match prepare_publication(document, None, time(9)) {
            Publication::Changed(doc) => {
                assert_eq!(doc.data_updated.as_deref(), Some("20250314T093000Z"));
            }
            Publication::Unchanged => panic!("Expected first run to publish"),
        }
    }

    #[test]
    fn test_identical_rerun_does_not_publish() {
        let previous = published(CATALOG, 9);

        let rerun = build(CATALOG);
        assert!(!should_publish(&rerun, Some(&previous)));
        assert_eq!(
            prepare_publication(rerun, Some(&previous), time(11)),
            Publication::Unchanged
        );
        assert_eq!(previous.data_updated.as_deref(), Some("20250314T093000Z"));
    }

    #[test]
    fn test_new_contributing_question_publishes() {
        let previous = published(CATALOG, 9);

        let changed = build(CATALOG_WITH_EXTRA_QUESTION);
        assert_eq!(
            changed.tags[0].description,
            "Added by \"Q1\", \"Q2\" and \"Q3\" questions."
        );

        match prepare_publication(changed, Some(&previous), time(11)) {
            Publication::Changed(doc) => {
                assert_eq!(doc.data_updated.as_deref(), Some("20250314T113000Z"));
                assert_ne!(doc.content_hash(), previous.content_hash());
            }
            Publication::Unchanged => panic!("Expected changed content to publish"),
        }
    }

    #[test]
    fn test_previous_without_hash_publishes() {
        let mut previous = build(CATALOG);
        previous.project.content_hash = None;
        assert!(should_publish(
            &build(CATALOG),
            Some(&PublishedDocument::from(&previous))
        ));
        assert!(should_publish(&build(CATALOG), Some(&PublishedDocument::default())));
    }

    #[test]
    fn test_previous_with_foreign_fields_still_compares() {
        let hash = build(CATALOG).content_hash().unwrap().to_string();
        let json = format!(
            r#"{{
                "data_format": "one",
                "data_updated": "20240101T000000Z",
                "project": {{"name": 7, "content_hash": "{hash}", "extra": true}},
                "tags": [{{"key": "bench", "object_types": ["polygon"]}}],
                "generator": "legacy"
            }}"#
        );

        let previous: PublishedDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(previous.content_hash(), Some(hash.as_str()));
        assert_eq!(
            prepare_publication(build(CATALOG), Some(&previous), time(11)),
            Publication::Unchanged
        );
    }

    #[test]
    fn test_pretty_json_round_trips_through_parse() {
        let document = build(CATALOG);
        let json = document.to_pretty_json().unwrap();
        assert!(json.starts_with("{\n    \"data_format\": 1,"));
        assert!(json.ends_with("}\n"));

        let parsed: TagInfoDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, document);
    }
}
