//! HTML rendering: static templates embedded at compile time with simple
//! placeholder substitution; list fragments are built here and injected.

use axum::response::Html;

use studysync_store::{StudyGuide, Topic, User};

const INDEX_HTML: &str = include_str!("../../../templates/index.html");
const LOGIN_HTML: &str = include_str!("../../../templates/login.html");
const REGISTER_HTML: &str = include_str!("../../../templates/register.html");
const GUIDE_HTML: &str = include_str!("../../../templates/guide.html");
const QUESTIONS_HTML: &str = include_str!("../../../templates/questions.html");
const ERROR_HTML: &str = include_str!("../../../templates/error.html");

/// Escape text for interpolation into HTML.
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render the home page: upload form for logged-in users, their guides below.
pub fn render_index(user: Option<&User>, guides: &[StudyGuide]) -> Html<String> {
    let (user_line, main) = match user {
        Some(user) => {
            let mut rows = String::new();
            for guide in guides {
                rows.push_str(&format!(
                    "<li><a href=\"/guides/{}\">{}</a>{}</li>\n",
                    guide.id,
                    escape(&guide.original_name),
                    guide
                        .exam_board
                        .as_deref()
                        .map(|b| format!(" <small>({})</small>", escape(b)))
                        .unwrap_or_default(),
                ));
            }
            if rows.is_empty() {
                rows.push_str("<li><em>No study guides yet.</em></li>\n");
            }

            let user_line = format!(
                "Signed in as <strong>{}</strong> \
                 <form method=\"post\" action=\"/logout\" class=\"inline\">\
                 <button type=\"submit\">Log out</button></form>",
                escape(&user.display_name)
            );
            let main = format!(
                "<h2>Upload a syllabus</h2>\n\
                 <form method=\"post\" action=\"/upload\" enctype=\"multipart/form-data\">\n\
                 <p><input type=\"file\" name=\"file\" required></p>\n\
                 <p><input type=\"text\" name=\"exam_board\" placeholder=\"Exam board (e.g. AQA)\">\n\
                 <input type=\"text\" name=\"year\" placeholder=\"Year\"></p>\n\
                 <p><button type=\"submit\">Upload and extract topics</button></p>\n\
                 </form>\n\
                 <h2>Your study guides</h2>\n<ul>\n{rows}</ul>"
            );
            (user_line, main)
        }
        None => (
            "<a href=\"/login\">Log in</a> or <a href=\"/register\">register</a>".to_string(),
            "<p>Upload a syllabus, curate the extracted topics, and generate \
             practice questions. Log in to get started.</p>"
                .to_string(),
        ),
    };

    Html(
        INDEX_HTML
            .replace("{{ user_line }}", &user_line)
            .replace("{{ main }}", &main),
    )
}

pub fn render_login(error: Option<&str>) -> Html<String> {
    Html(LOGIN_HTML.replace("{{ error }}", &error_fragment(error)))
}

pub fn render_register(error: Option<&str>) -> Html<String> {
    Html(REGISTER_HTML.replace("{{ error }}", &error_fragment(error)))
}

/// Render a guide's topic list with selection checkboxes.
pub fn render_guide(guide: &StudyGuide, topics: &[Topic]) -> Html<String> {
    let mut rows = String::new();
    for topic in topics {
        rows.push_str(&format!(
            "<li><label><input type=\"checkbox\" name=\"topic\" value=\"{}\"{}> {}</label></li>\n",
            topic.id,
            if topic.selected { " checked" } else { "" },
            escape(&topic.title),
        ));
    }
    if rows.is_empty() {
        rows.push_str("<li><em>No topics were extracted from this document.</em></li>\n");
    }

    Html(
        GUIDE_HTML
            .replace("{{ guide_id }}", &guide.id.to_string())
            .replace("{{ guide_name }}", &escape(&guide.original_name))
            .replace("{{ meta }}", &guide_meta(guide))
            .replace("{{ topic_rows }}", &rows),
    )
}

/// Render the generated practice questions for a guide.
pub fn render_questions(guide: &StudyGuide, questions: &[String]) -> Html<String> {
    let mut rows = String::new();
    for question in questions {
        rows.push_str(&format!("<li>{}</li>\n", escape(question)));
    }

    Html(
        QUESTIONS_HTML
            .replace("{{ guide_id }}", &guide.id.to_string())
            .replace("{{ guide_name }}", &escape(&guide.original_name))
            .replace("{{ question_rows }}", &rows),
    )
}

pub fn render_error(status: u16, message: &str) -> String {
    ERROR_HTML
        .replace("{{ status }}", &status.to_string())
        .replace("{{ message }}", &escape(message))
}

fn error_fragment(error: Option<&str>) -> String {
    match error {
        Some(msg) => format!("<p class=\"error\">{}</p>", escape(msg)),
        None => String::new(),
    }
}

fn guide_meta(guide: &StudyGuide) -> String {
    let mut parts = Vec::new();
    if let Some(board) = &guide.exam_board {
        parts.push(escape(board));
    }
    if let Some(year) = &guide.year {
        parts.push(escape(year));
    }
    parts.join(" · ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape("<b>\"a\" & 'b'</b>"),
            "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_render_guide_escapes_titles() {
        let guide = StudyGuide {
            id: 1,
            user_id: Some(1),
            filename: "uploads/x.txt".to_string(),
            original_name: "maths.txt".to_string(),
            exam_board: None,
            year: None,
            created_at: 0,
        };
        let topics = vec![Topic {
            id: 7,
            study_guide_id: 1,
            title: "<script>alert(1)</script>".to_string(),
            selected: true,
        }];

        let html = render_guide(&guide, &topics).0;
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("value=\"7\" checked"));
    }

    #[test]
    fn test_render_index_logged_out() {
        let html = render_index(None, &[]).0;
        assert!(html.contains("/login"));
        assert!(!html.contains("enctype"));
    }
}
