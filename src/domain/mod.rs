//! Domain layer - Tag aggregation and taginfo document generation

pub mod catalog;
pub mod document;
pub mod object_type;
pub mod tags;
pub mod translation;

pub use catalog::Question;
pub use document::{
    ProjectMetadata, Publication, PublishedDocument, TagInfoDocument, TagInfoDocumentBuilder,
};
pub use object_type::ObjectType;
pub use translation::TranslationTable;
