use once_cell::sync::Lazy;
use regex::Regex;

/// Subject names recognized as section headings.
///
/// A heading is a line consisting solely of one of these names
/// (case-insensitive, optional trailing colon). The list covers the common
/// GCSE subject set; syllabi bundle several subjects into one handbook and
/// the extractor scopes itself to one of them.
pub const SUBJECT_HEADINGS: &[&str] = &[
    "Mathematics",
    "English",
    "Science",
    "Physics",
    "Chemistry",
    "Biology",
    "History",
    "Geography",
    "Computer Science",
    "French",
    "Spanish",
    "German",
    "Religious Studies",
    "Art",
    "Music",
    "Physical Education",
];

static HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    // Multi-word names tolerate any interior whitespace (PDF extraction can
    // collapse or widen runs of spaces).
    let alternation = SUBJECT_HEADINGS
        .iter()
        .map(|name| regex::escape(name).replace(' ', r"\s+"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?im)^[ \t]*({alternation})[ \t]*:?[ \t]*\r?$")).unwrap()
});

/// Locate the requested subject's section in the document text.
///
/// Returns the contiguous run of lines strictly between the subject's heading
/// and the next recognized subject heading (or end of document). The first
/// heading for the subject wins. Returns `None` when the document has no
/// heading for the subject.
pub fn slice_subject_section(text: &str, subject: &str) -> Option<String> {
    let matches: Vec<_> = HEADING_RE.captures_iter(text).collect();

    let start_idx = matches.iter().position(|caps| {
        let name = normalize_heading(caps.get(1).map_or("", |m| m.as_str()));
        name.eq_ignore_ascii_case(subject)
    })?;

    let section_start = matches[start_idx].get(0).unwrap().end();
    let section_end = matches
        .get(start_idx + 1)
        .map(|caps| caps.get(0).unwrap().start())
        .unwrap_or(text.len());

    Some(text[section_start..section_end].to_string())
}

/// Collapse interior whitespace so "Computer  Science" compares equal to
/// "Computer Science".
fn normalize_heading(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
