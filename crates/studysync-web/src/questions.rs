//! Placeholder practice-question generation: a random stem applied to a
//! random selected topic.

const QUESTION_STEMS: &[&str] = &["Explain", "Define", "Discuss", "Give an example of"];

/// Topic used when the guide has no selected topics.
const FALLBACK_TOPIC: &str = "General Knowledge";

/// Generate `count` placeholder questions from the given topics.
pub fn generate_questions(topics: &[String], count: usize) -> Vec<String> {
    (0..count)
        .map(|_| {
            let topic = if topics.is_empty() {
                FALLBACK_TOPIC
            } else {
                &topics[fastrand::usize(..topics.len())]
            };
            let stem = QUESTION_STEMS[fastrand::usize(..QUESTION_STEMS.len())];
            format!("{stem} {topic}.")
        })
        .collect()
}
