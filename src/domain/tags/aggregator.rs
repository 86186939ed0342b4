//! Tag aggregation - folding catalog tag occurrences into a registry
//!
//! Every question contributes its answer tags under the object types of its
//! first condition. Occurrences of the same tag identity collapse into one
//! record that remembers every contributing question in catalog order.
//!
//! The object types of a record are fixed by the first question that
//! contributes its identity. Later questions only extend the question list,
//! even when their own object types differ.

use super::TagIdentity;
use crate::domain::catalog::Question;
use crate::domain::object_type::{self, ObjectTypes};
use crate::error::Result;
use std::collections::HashMap;

/// Aggregated data for one tag identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    pub object_types: ObjectTypes,

    /// Text references of contributing questions, duplicates included
    pub questions: Vec<String>,
}

/// Tag identities in first-encounter order
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    records: Vec<(TagIdentity, TagRecord)>,
    index: HashMap<TagIdentity, usize>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one tag occurrence into the registry.
    ///
    /// Returns `true` if the identity was new.
    pub fn fold(
        &mut self,
        identity: TagIdentity,
        object_types: &ObjectTypes,
        question_ref: &str,
    ) -> bool {
        if let Some(&position) = self.index.get(&identity) {
            log::debug!("Merging '{}' from question '{}'", identity, question_ref);
            self.records[position].1.questions.push(question_ref.to_string());
            return false;
        }

        self.index.insert(identity.clone(), self.records.len());
        self.records.push((
            identity,
            TagRecord {
                object_types: object_types.clone(),
                questions: vec![question_ref.to_string()],
            },
        ));
        true
    }

    pub fn get(&self, identity: &TagIdentity) -> Option<&TagRecord> {
        self.index.get(identity).map(|&i| &self.records[i].1)
    }

    /// Records in first-encounter order
    pub fn iter(&self) -> impl Iterator<Item = (&TagIdentity, &TagRecord)> {
        self.records.iter().map(|(identity, record)| (identity, record))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Aggregator walking a question catalog
pub struct TagAggregator;

impl TagAggregator {
    /// Aggregate all tags of a catalog into a registry.
    ///
    /// # Errors
    ///
    /// Fails with `UnknownElementType` if any question's condition names an
    /// unknown element type. No partial registry is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use taginfo_gen::domain::catalog::parse_catalog;
    /// use taginfo_gen::domain::tags::{TagAggregator, TagIdentity};
    ///
    /// let catalog = parse_catalog(
    ///     r#"[{"question": {"text": "Bench?"},
    ///          "answer": {"input": [{"osm_tags": {"bench": "yes"}}]}}]"#,
    ///     "example",
    /// )
    /// .unwrap();
    ///
    /// let registry = TagAggregator::aggregate(&catalog).unwrap();
    /// let record = registry.get(&TagIdentity::with_value("bench", "yes")).unwrap();
    /// assert_eq!(record.questions, vec!["Bench?".to_string()]);
    /// ```
    pub fn aggregate(questions: &[Question]) -> Result<TagRegistry> {
        let mut registry = TagRegistry::new();

        for question in questions {
            Self::fold_question(&mut registry, question)?;
        }

        log::info!(
            "Aggregated {} tag identities from {} questions",
            registry.len(),
            questions.len()
        );

        Ok(registry)
    }

    fn fold_question(registry: &mut TagRegistry, question: &Question) -> Result<()> {
        let Some(inputs) = question.answer.input.as_ref() else {
            log::debug!("Skipping question '{}': no answer input", question.text_ref());
            return Ok(());
        };

        let object_types = object_type::resolve(question.element_spec())?;
        let text_ref = question.text_ref();

        for input in inputs {
            let Some(tags) = input.tags()? else {
                continue;
            };
            for (key, value) in tags {
                registry.fold(
                    TagIdentity::new(key, value.map(str::to_string)),
                    &object_types,
                    text_ref,
                );
            }
        }

        if let Some(constructor) = question.answer.constructor.as_ref() {
            for key in constructor.keys() {
                registry.fold(TagIdentity::key_only(key.as_str()), &object_types, text_ref);
            }
        }

        Ok(())
    }
}
