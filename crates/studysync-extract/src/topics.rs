//! Line-level topic heuristics: keyword families, overview expansion, dedup.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// A named family of lowercase keywords that mark a line as topic-shaped.
#[derive(Debug, Clone, Copy)]
pub struct KeywordFamily {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

/// Built-in families: the Mathematics syllabus domains plus a generic
/// structure family ("Topic 3", "Unit 2" style lines).
pub const KEYWORD_FAMILIES: &[KeywordFamily] = &[
    KeywordFamily {
        name: "number",
        keywords: &[
            "number",
            "fraction",
            "decimal",
            "percentage",
            "indices",
            "surds",
            "standard form",
            "rounding",
        ],
    },
    KeywordFamily {
        name: "algebra",
        keywords: &[
            "algebra",
            "equation",
            "inequalit",
            "sequence",
            "graph",
            "formula",
            "function",
            "expression",
        ],
    },
    KeywordFamily {
        name: "ratio",
        keywords: &["ratio", "proportion", "rates of change", "scale factor"],
    },
    KeywordFamily {
        name: "geometry",
        keywords: &[
            "geometry",
            "angle",
            "shape",
            "area",
            "volume",
            "perimeter",
            "pythagoras",
            "trigonometry",
            "vector",
            "transformation",
            "circle",
            "congruen",
        ],
    },
    KeywordFamily {
        name: "probability",
        keywords: &["probability", "outcome", "relative frequency", "venn"],
    },
    KeywordFamily {
        name: "statistics",
        keywords: &[
            "statistics",
            "data",
            "average",
            "mean",
            "median",
            "histogram",
            "scatter",
            "sampling",
        ],
    },
    KeywordFamily {
        name: "structure",
        keywords: &["topic", "unit", "chapter", "module", "theme"],
    },
];

/// Phrase marking a line whose tail enumerates topics.
static OVERVIEW_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)overview of content").unwrap());

/// Return the name of the first keyword family the line matches, if any.
pub fn matching_family(line: &str) -> Option<&'static str> {
    let lower = line.to_lowercase();
    KEYWORD_FAMILIES
        .iter()
        .find(|family| family.keywords.iter().any(|kw| lower.contains(kw)))
        .map(|family| family.name)
}

/// Expand an overview line into its enumerated topic candidates.
///
/// The tail after the phrase (leading `:` or `-` stripped) is split on
/// commas; a leading "and " on a piece (Oxford-comma style "a, b, and c")
/// is stripped. Returns `None` for lines without the phrase.
pub fn expand_overview_line(line: &str) -> Option<Vec<String>> {
    let phrase = OVERVIEW_RE.find(line)?;

    let tail = &line[phrase.end()..];
    let tail = tail.trim_start_matches([':', '-', '\u{2013}', ' ', '\t']);

    let items = tail
        .split(',')
        .map(|piece| {
            let piece = piece.trim();
            piece.strip_prefix("and ").unwrap_or(piece).trim()
        })
        .filter(|piece| !piece.is_empty())
        .map(|piece| piece.to_string())
        .collect();

    Some(items)
}

static PAGE_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(?:page\s+)?\d+$").unwrap());

/// Lines that can never be topics: blank, too long, bare page numbers, URLs.
pub fn is_noise(line: &str, max_topic_words: usize) -> bool {
    if line.is_empty() {
        return true;
    }
    if line.split_whitespace().count() > max_topic_words {
        return true;
    }
    if PAGE_NUMBER_RE.is_match(line) {
        return true;
    }
    let lower = line.to_lowercase();
    lower.contains("http://") || lower.contains("https://") || lower.contains("www.")
}

/// Case-insensitive dedup preserving first-occurrence order.
pub fn dedupe_topics(candidates: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|topic| seen.insert(topic.to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_family_basic() {
        assert_eq!(matching_family("Solving linear equations"), Some("algebra"));
        assert_eq!(matching_family("Probability trees"), Some("probability"));
        assert_eq!(matching_family("Topic 4: Revision"), Some("structure"));
        assert_eq!(matching_family("Shakespeare"), None);
    }

    #[test]
    fn test_matching_family_is_case_insensitive() {
        assert_eq!(matching_family("ALGEBRA AND GRAPHS"), Some("algebra"));
    }

    #[test]
    fn test_expand_overview_basic() {
        let items =
            expand_overview_line("Overview of content: number, algebra, geometry").unwrap();
        assert_eq!(items, vec!["number", "algebra", "geometry"]);
    }

    #[test]
    fn test_expand_overview_oxford_comma() {
        let items =
            expand_overview_line("Overview of content: number, algebra, and statistics").unwrap();
        assert_eq!(items, vec!["number", "algebra", "statistics"]);
    }

    #[test]
    fn test_expand_overview_keeps_compound_topics() {
        // "geometry and measures" is a single strand name, not two topics
        let items =
            expand_overview_line("Overview of content - ratio, geometry and measures").unwrap();
        assert_eq!(items, vec!["ratio", "geometry and measures"]);
    }

    #[test]
    fn test_expand_overview_case_insensitive_phrase() {
        let items = expand_overview_line("OVERVIEW OF CONTENT: algebra").unwrap();
        assert_eq!(items, vec!["algebra"]);
    }

    #[test]
    fn test_expand_overview_empty_tail() {
        let items = expand_overview_line("Overview of content:").unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_expand_non_overview_line() {
        assert!(expand_overview_line("Algebra, geometry").is_none());
    }

    #[test]
    fn test_noise_rejects_long_lines() {
        let long = "this line has rather a lot of words in it and keeps going on";
        assert!(is_noise(long, 11));
        assert!(!is_noise("Solving equations", 11));
    }

    #[test]
    fn test_noise_rejects_page_numbers_and_urls() {
        assert!(is_noise("12", 11));
        assert!(is_noise("Page 3", 11));
        assert!(is_noise("see https://example.org/syllabus", 11));
        assert!(is_noise("www.examboard.org", 11));
        assert!(is_noise("", 11));
    }

    #[test]
    fn test_dedupe_preserves_order_case_insensitively() {
        let deduped = dedupe_topics(vec![
            "Algebra".to_string(),
            "Geometry".to_string(),
            "algebra".to_string(),
            "ALGEBRA".to_string(),
            "Statistics".to_string(),
        ]);
        assert_eq!(deduped, vec!["Algebra", "Geometry", "Statistics"]);
    }
}
