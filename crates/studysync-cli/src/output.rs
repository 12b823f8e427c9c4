use std::io::Write;
use std::path::Path;

use owo_colors::OwoColorize;

use studysync_extract::matching_family;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the extracted topic list, one numbered line per topic, with the
/// matching keyword family dimmed after each title.
pub fn print_topics(
    w: &mut dyn Write,
    file: &Path,
    subject: &str,
    topics: &[String],
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w, "Extracting {} topics from {}...", subject, file.display())?;

    if topics.is_empty() {
        writeln!(w, "No topics found.")?;
        return Ok(());
    }

    writeln!(w, "Found {} topics:", topics.len())?;
    for (i, topic) in topics.iter().enumerate() {
        let family = matching_family(topic).unwrap_or("enumerated");
        if color.enabled() {
            writeln!(
                w,
                "{:3}. {} {}",
                i + 1,
                topic.green(),
                format!("[{family}]").dimmed()
            )?;
        } else {
            writeln!(w, "{:3}. {} [{family}]", i + 1, topic)?;
        }
    }
    Ok(())
}
