//! List tags use case

use crate::application::generate::{build_document, SourceOptions};
use crate::domain::document::TagEntry;
use crate::error::Result;
use crate::infrastructure::TagInfoRepository;

/// Service for listing aggregated tags without publishing them.
pub struct ListTagsService<R: TagInfoRepository> {
    repository: R,
}

impl<R: TagInfoRepository> ListTagsService<R> {
    /// Create a new list tags service.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Aggregate the sources and return the finalized tags in document order.
    pub fn execute(&self, sources: &SourceOptions) -> Result<Vec<TagEntry>> {
        let document = build_document(&self.repository, sources)?;
        Ok(document.tags)
    }
}
