//! Output formatting utilities

use crate::application::GenerateOutcome;
use crate::domain::document::TagEntry;

/// Format a list of tags for display.
pub fn format_tag_list(tags: &[TagEntry]) -> String {
    if tags.is_empty() {
        return "No tags found".to_string();
    }

    let mut output = String::new();
    for tag in tags {
        let identity = match &tag.value {
            Some(value) => format!("{}={}", tag.key, value),
            None => tag.key.clone(),
        };
        let object_types: Vec<&str> = tag.object_types.iter().map(|t| t.as_str()).collect();

        output.push_str(&format!(
            "{}  [{}]  {}\n",
            identity,
            object_types.join(","),
            tag.description
        ));
    }

    output
}

/// Format the result of a generation run.
pub fn format_outcome(outcome: &GenerateOutcome, dry_run: bool) -> String {
    match (outcome.published, dry_run) {
        (true, false) => format!(
            "Published {} ({} tags)",
            outcome.output.display(),
            outcome.tag_count
        ),
        (true, true) => format!(
            "Would publish {} ({} tags)",
            outcome.output.display(),
            outcome.tag_count
        ),
        (false, _) => format!("No changes; {} left untouched", outcome.output.display()),
    }
}
