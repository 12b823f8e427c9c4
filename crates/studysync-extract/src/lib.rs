use std::path::Path;

use thiserror::Error;

pub mod document;
pub mod section;
pub mod topics;

pub use document::{SourceKind, read_document_text, read_document_text_from_bytes};
pub use section::slice_subject_section;
pub use topics::{KeywordFamily, dedupe_topics, expand_overview_line, matching_family};

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to extract PDF text: {0}")]
    Pdf(String),
}

/// Options controlling topic extraction.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Subject whose section is sliced out of the document.
    pub subject: String,
    /// Lines with more words than this are never topics.
    pub max_topic_words: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            subject: "Mathematics".to_string(),
            max_topic_words: 11,
        }
    }
}

/// Extract candidate topics from a syllabus file (PDF or plain text).
///
/// Pipeline:
/// 1. Read the document text via the appropriate reader
/// 2. Slice out the requested subject's section (whole document if absent)
/// 3. Expand "overview of content" lines into their enumerated items
/// 4. Filter remaining lines against the keyword families
/// 5. Deduplicate case-insensitively, preserving document order
pub fn extract_topics_from_file(
    path: &Path,
    options: &ExtractOptions,
) -> Result<Vec<String>, ExtractError> {
    let text = document::read_document_text(path)?;
    Ok(extract_topics_from_text(&text, options))
}

/// Run the extraction pipeline over already-loaded document text.
pub fn extract_topics_from_text(text: &str, options: &ExtractOptions) -> Vec<String> {
    let scope = match section::slice_subject_section(text, &options.subject) {
        Some(slice) => slice,
        None => {
            // No heading for the requested subject; the file may cover a
            // single subject with no headings at all. Scan everything.
            tracing::debug!(subject = %options.subject, "subject heading not found, scanning whole document");
            text.to_string()
        }
    };

    let mut candidates = Vec::new();
    for line in scope.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(items) = topics::expand_overview_line(line) {
            for item in items {
                if !topics::is_noise(&item, options.max_topic_words) {
                    candidates.push(item);
                }
            }
            continue;
        }

        if !topics::is_noise(line, options.max_topic_words) && topics::matching_family(line).is_some()
        {
            candidates.push(line.to_string());
        }
    }

    topics::dedupe_topics(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYLLABUS: &str = "\
Course Handbook 2025\n\
\n\
English\n\
Shakespeare and the modern novel\n\
\n\
Mathematics\n\
Overview of content: number, algebra, geometry and measures\n\
Topic 1: Fractions and decimals\n\
Solving linear equations\n\
A very long descriptive paragraph line that should never be treated as a topic by the filter\n\
Probability of combined events\n\
\n\
Science\n\
Cells and organisms\n";

    #[test]
    fn test_pipeline_slices_to_mathematics() {
        let topics = extract_topics_from_text(SYLLABUS, &ExtractOptions::default());
        assert!(topics.contains(&"number".to_string()));
        assert!(topics.contains(&"Topic 1: Fractions and decimals".to_string()));
        assert!(topics.contains(&"Solving linear equations".to_string()));
        assert!(topics.contains(&"Probability of combined events".to_string()));
        // Lines from other subjects' sections must not leak in
        assert!(!topics.iter().any(|t| t.contains("Shakespeare")));
        assert!(!topics.iter().any(|t| t.contains("Cells")));
    }

    #[test]
    fn test_pipeline_drops_long_lines() {
        let topics = extract_topics_from_text(SYLLABUS, &ExtractOptions::default());
        assert!(!topics.iter().any(|t| t.contains("descriptive paragraph")));
    }

    #[test]
    fn test_pipeline_whole_document_fallback() {
        let text = "Algebra basics\nQuadratic equations\n";
        let topics = extract_topics_from_text(text, &ExtractOptions::default());
        assert_eq!(topics, vec!["Algebra basics", "Quadratic equations"]);
    }

    #[test]
    fn test_pipeline_other_subject() {
        let options = ExtractOptions {
            subject: "Science".to_string(),
            ..Default::default()
        };
        let topics = extract_topics_from_text(SYLLABUS, &options);
        // "Cells and organisms" has no maths keyword, so the Science slice
        // yields nothing from the family filter
        assert!(topics.is_empty());
    }

    #[test]
    fn test_pipeline_empty_document() {
        let topics = extract_topics_from_text("", &ExtractOptions::default());
        assert!(topics.is_empty());
    }

    #[test]
    fn test_pipeline_dedupes_across_expansion_and_lines() {
        let text = "\
Mathematics\n\
Overview of content: algebra, statistics\n\
Algebra\n\
statistics\n";
        let topics = extract_topics_from_text(text, &ExtractOptions::default());
        assert_eq!(topics, vec!["algebra", "statistics"]);
    }
}
