//! Provenance descriptions for aggregated tags

use crate::domain::TranslationTable;

/// Composes the human-readable description of a tag from its questions
pub struct DescriptionComposer<'a> {
    translations: &'a TranslationTable,
}

impl<'a> DescriptionComposer<'a> {
    pub fn new(translations: &'a TranslationTable) -> Self {
        DescriptionComposer { translations }
    }

    /// Compose a description listing every contributing question.
    ///
    /// Order and duplicates of `question_refs` are kept as given.
    ///
    /// # Examples
    ///
    /// ```
    /// use taginfo_gen::domain::tags::DescriptionComposer;
    /// use taginfo_gen::domain::TranslationTable;
    ///
    /// let translations = TranslationTable::new();
    /// let composer = DescriptionComposer::new(&translations);
    /// let refs = vec!["Q1".to_string(), "Q2".to_string(), "Q3".to_string()];
    /// assert_eq!(
    ///     composer.compose(&refs),
    ///     "Added by \"Q1\", \"Q2\" and \"Q3\" questions."
    /// );
    /// ```
    pub fn compose(&self, question_refs: &[String]) -> String {
        let quoted: Vec<String> = question_refs
            .iter()
            .map(|r| format!("\"{}\"", self.translations.resolve(r)))
            .collect();

        match quoted.split_last() {
            None => String::new(),
            Some((only, [])) => format!("Added by {} question.", only),
            Some((last, rest)) => {
                format!("Added by {} and {} questions.", rest.join(", "), last)
            }
        }
    }
}
