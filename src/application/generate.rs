//! Taginfo generation use case
//!
//! Orchestrates a full run: load the catalog and translations, aggregate,
//! build the document and publish it only if its content changed.

use crate::domain::document::prepare_publication;
use crate::domain::tags::TagAggregator;
use crate::domain::{Publication, TagInfoDocument, TagInfoDocumentBuilder};
use crate::error::Result;
use crate::infrastructure::{Config, TagInfoRepository};
use chrono::Utc;
use std::path::{Path, PathBuf};

/// Sources shared by every use case that builds a document
#[derive(Debug, Clone, Default)]
pub struct SourceOptions {
    /// Catalog files or directories, concatenated in order
    pub catalogs: Vec<PathBuf>,

    /// Locale files or directories
    pub locales: Vec<PathBuf>,

    /// Explicit configuration file
    pub config: Option<PathBuf>,
}

/// Options for generation
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub sources: SourceOptions,

    /// Document path; also the previous document compared against
    pub output: PathBuf,

    /// Decide without writing
    pub dry_run: bool,
}

/// Result of a generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOutcome {
    pub output: PathBuf,
    pub tag_count: usize,
    pub published: bool,
}

/// Build a fresh, unstamped document from the configured sources.
pub fn build_document(
    repository: &impl TagInfoRepository,
    sources: &SourceOptions,
) -> Result<TagInfoDocument> {
    let config = Config::discover(sources.config.as_deref(), repository.root())?;

    let questions = repository.load_catalog(&sources.catalogs)?;
    let translations =
        repository.load_translations(&sources.locales, config.language.as_deref())?;
    log::info!(
        "Loaded {} questions and {} translations",
        questions.len(),
        translations.len()
    );

    let registry = TagAggregator::aggregate(&questions)?;

    let builder = TagInfoDocumentBuilder::new(config.data_url, config.project, &translations);
    builder.build(&registry)
}

/// Service for generating the taginfo document
pub struct GenerateService<R: TagInfoRepository> {
    repository: R,
}

impl<R: TagInfoRepository> GenerateService<R> {
    pub fn new(repository: R) -> Self {
        GenerateService { repository }
    }

    /// Execute the generation
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A catalog is missing or malformed
    /// - A question names an unknown element type
    /// - The previous document cannot be parsed
    /// - File I/O fails
    ///
    /// Nothing is written when any step fails.
    pub fn execute(&self, options: GenerateOptions) -> Result<GenerateOutcome> {
        let document = build_document(&self.repository, &options.sources)?;
        let tag_count = document.tags.len();

        let previous = self.repository.read_document(&options.output)?;
        match previous.as_ref() {
            None => log::info!("No previous document at {}", options.output.display()),
            Some(previous) => log::debug!(
                "Previous document updated {}, hash {}",
                previous.data_updated.as_deref().unwrap_or("unknown"),
                previous.content_hash().unwrap_or("none")
            ),
        }

        let published = match prepare_publication(document, previous.as_ref(), Utc::now()) {
            Publication::Unchanged => {
                log::info!("Content hash unchanged, skipping publication");
                false
            }
            Publication::Changed(document) => {
                log::info!(
                    "Content changed (hash {})",
                    document.content_hash().unwrap_or_default()
                );
                if !options.dry_run {
                    self.repository.write_document(&options.output, &document)?;
                }
                true
            }
        };

        Ok(GenerateOutcome {
            output: self.resolve_output(&options.output),
            tag_count,
            published,
        })
    }

    fn resolve_output(&self, output: &Path) -> PathBuf {
        self.repository.root().join(output)
    }
}
