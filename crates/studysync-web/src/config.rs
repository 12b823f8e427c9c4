//! Runtime configuration: TOML file cascade with environment overrides.
//!
//! Precedence: env vars > CWD `.studysync.toml` > platform config > defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use studysync_extract::ExtractOptions;

/// Sessions older than this are purged at startup (14 days).
pub const SESSION_MAX_AGE_SECS: u64 = 14 * 24 * 60 * 60;

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub server: Option<ServerConfig>,
    pub storage: Option<StorageConfig>,
    pub extraction: Option<ExtractionConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    pub database_path: Option<String>,
    pub uploads_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub subject: Option<String>,
    pub max_topic_words: Option<usize>,
}

/// Platform config directory path: `<config_dir>/studysync/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("studysync").join("config.toml"))
}

/// Load config by cascading CWD `.studysync.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(&PathBuf::from(".studysync.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &PathBuf) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        server: Some(ServerConfig {
            port: overlay
                .server
                .as_ref()
                .and_then(|s| s.port)
                .or(base.server.as_ref().and_then(|s| s.port)),
        }),
        storage: Some(StorageConfig {
            database_path: overlay
                .storage
                .as_ref()
                .and_then(|s| s.database_path.clone())
                .or(base.storage.as_ref().and_then(|s| s.database_path.clone())),
            uploads_dir: overlay
                .storage
                .as_ref()
                .and_then(|s| s.uploads_dir.clone())
                .or(base.storage.as_ref().and_then(|s| s.uploads_dir.clone())),
        }),
        extraction: Some(ExtractionConfig {
            subject: overlay
                .extraction
                .as_ref()
                .and_then(|e| e.subject.clone())
                .or(base.extraction.as_ref().and_then(|e| e.subject.clone())),
            max_topic_words: overlay
                .extraction
                .as_ref()
                .and_then(|e| e.max_topic_words)
                .or(base.extraction.as_ref().and_then(|e| e.max_topic_words)),
        }),
    }
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub database_path: PathBuf,
    pub uploads_dir: PathBuf,
    pub options: ExtractOptions,
}

impl Settings {
    /// Resolve settings: env vars > config file > defaults.
    pub fn resolve(file: ConfigFile) -> Settings {
        let defaults = ExtractOptions::default();

        let port = std::env::var("STUDYSYNC_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(file.server.as_ref().and_then(|s| s.port))
            .unwrap_or(8000);

        let database_path = std::env::var("STUDYSYNC_DB")
            .ok()
            .or(file.storage.as_ref().and_then(|s| s.database_path.clone()))
            .unwrap_or_else(|| "studysync.db".to_string());

        let uploads_dir = std::env::var("STUDYSYNC_UPLOADS")
            .ok()
            .or(file.storage.as_ref().and_then(|s| s.uploads_dir.clone()))
            .unwrap_or_else(|| "uploads".to_string());

        let subject = std::env::var("STUDYSYNC_SUBJECT")
            .ok()
            .or(file.extraction.as_ref().and_then(|e| e.subject.clone()))
            .unwrap_or(defaults.subject);

        let max_topic_words = file
            .extraction
            .as_ref()
            .and_then(|e| e.max_topic_words)
            .unwrap_or(defaults.max_topic_words);

        Settings {
            port,
            database_path: PathBuf::from(database_path),
            uploads_dir: PathBuf::from(uploads_dir),
            options: ExtractOptions {
                subject,
                max_topic_words,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overlay_wins() {
        let base = ConfigFile {
            server: Some(ServerConfig { port: Some(8000) }),
            storage: Some(StorageConfig {
                database_path: Some("base.db".to_string()),
                uploads_dir: None,
            }),
            extraction: None,
        };
        let overlay = ConfigFile {
            server: Some(ServerConfig { port: Some(9000) }),
            storage: Some(StorageConfig {
                database_path: None,
                uploads_dir: Some("up".to_string()),
            }),
            extraction: Some(ExtractionConfig {
                subject: Some("Science".to_string()),
                max_topic_words: None,
            }),
        };

        let merged = merge(base, overlay);
        assert_eq!(merged.server.as_ref().unwrap().port, Some(9000));
        let storage = merged.storage.as_ref().unwrap();
        assert_eq!(storage.database_path.as_deref(), Some("base.db"));
        assert_eq!(storage.uploads_dir.as_deref(), Some("up"));
        assert_eq!(
            merged.extraction.as_ref().unwrap().subject.as_deref(),
            Some("Science")
        );
    }

    #[test]
    fn test_parse_toml() {
        let parsed: ConfigFile = toml::from_str(
            r#"
            [server]
            port = 9001

            [extraction]
            subject = "Physics"
            max_topic_words = 8
            "#,
        )
        .unwrap();
        assert_eq!(parsed.server.unwrap().port, Some(9001));
        let extraction = parsed.extraction.unwrap();
        assert_eq!(extraction.subject.as_deref(), Some("Physics"));
        assert_eq!(extraction.max_topic_words, Some(8));
    }
}
