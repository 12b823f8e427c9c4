use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod output;

use output::ColorMode;
use studysync_extract::{ExtractOptions, extract_topics_from_file};
use studysync_store::Store;

/// StudySync - extract syllabus topics and maintain the application database
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract topics from a syllabus file (PDF or plain text)
    Extract {
        /// Path to the syllabus file
        file_path: PathBuf,

        /// Subject section to scope extraction to
        #[arg(long, default_value = "Mathematics")]
        subject: String,

        /// Lines with more words than this are never topics
        #[arg(long)]
        max_words: Option<usize>,

        /// Emit the topic list as JSON
        #[arg(long)]
        json: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Create (or upgrade) the application database schema
    InitDb {
        /// Path to the SQLite database
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Extract {
            file_path,
            subject,
            max_words,
            json,
            no_color,
        } => extract(file_path, subject, max_words, json, no_color),
        Command::InitDb { path } => init_db(&path),
    }
}

fn extract(
    file_path: PathBuf,
    subject: String,
    max_words: Option<usize>,
    json: bool,
    no_color: bool,
) -> anyhow::Result<()> {
    let mut options = ExtractOptions {
        subject,
        ..Default::default()
    };
    if let Some(max_words) = max_words {
        options.max_topic_words = max_words;
    }

    let topics = extract_topics_from_file(&file_path, &options)?;

    let stdout = std::io::stdout();
    let mut w = stdout.lock();

    if json {
        writeln!(w, "{}", serde_json::to_string_pretty(&topics)?)?;
        return Ok(());
    }

    let color = ColorMode(!no_color);
    output::print_topics(&mut w, &file_path, &options.subject, &topics, color)?;
    Ok(())
}

fn init_db(path: &PathBuf) -> anyhow::Result<()> {
    Store::open(path)?;
    println!("Database ready at {}", path.display());
    Ok(())
}
