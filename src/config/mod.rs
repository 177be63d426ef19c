use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::utils::validate_base_url;

/// Playlist processed when nothing else is configured
pub const DEFAULT_PLAYLIST_ID: &str = "PLkDaE6sCZn6FNC6YRfRQc_FbeQrF8BwGI";

/// Environment variables consulted for the Data API key, in order
pub const API_KEY_ENV_VARS: &[&str] = &["google_key", "YOUTUBE_API_KEY"];

/// Largest page the playlistItems endpoint will return
pub const MAX_PAGE_SIZE: u32 = 50;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// YouTube Data API settings
    pub youtube: YoutubeConfig,

    /// Transcript service settings
    pub transcript: TranscriptConfig,

    /// Application settings
    pub app: AppConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeConfig {
    /// Data API key
    pub api_key: String,

    /// Base URL of the Data API
    pub api_base_url: String,

    /// Items requested per playlist page
    pub page_size: u32,

    /// Upper bound on playlist pages fetched in one run
    pub max_pages: usize,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptConfig {
    /// Base URL hosting watch pages and caption tracks
    pub base_url: String,

    /// Preferred caption languages, most preferred first
    pub languages: Vec<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Playlist to transcribe
    pub playlist_id: String,

    /// Existing directory receiving `<video_id>_transcript.txt` files
    pub output_dir: PathBuf,
}

impl Default for YoutubeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base_url: "https://www.googleapis.com/youtube/v3".to_string(),
            page_size: MAX_PAGE_SIZE,
            max_pages: 1000,
            timeout_secs: 30,
        }
    }
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.youtube.com".to_string(),
            languages: vec!["en".to_string()],
            timeout_secs: 30,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            playlist_id: DEFAULT_PLAYLIST_ID.to_string(),
            output_dir: PathBuf::from("./samples/prompt_guides"),
        }
    }
}

impl Config {
    /// Load configuration from defaults, an optional YAML file and the environment.
    ///
    /// An explicit `path` must exist; otherwise the local and per-user config files are
    /// used when present. A `.env` file must already be loaded by the caller.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.apply_env(|var| std::env::var(var).ok());
        Ok(config)
    }

    /// Parse a YAML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs_err::read_to_string(path)
            .context("Failed to read config file")?;

        let config: Config = serde_yaml::from_str(&content)
            .context("Failed to parse config file")?;

        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Get configuration file path
    fn config_path() -> Option<PathBuf> {
        let local_config = PathBuf::from("config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir().map(|dir| dir.join("playlist-transcriber").join("config.yaml"))
    }

    /// Let the first non-empty API key variable override the file
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = API_KEY_ENV_VARS
            .iter()
            .filter_map(|var| lookup(*var))
            .find(|value| !value.trim().is_empty())
        {
            self.youtube.api_key = key;
        }
    }

    /// Apply command line overrides
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(key) = &cli.api_key {
            self.youtube.api_key = key.clone();
        }
        if let Some(playlist_id) = &cli.playlist_id {
            self.app.playlist_id = playlist_id.clone();
        }
        if let Some(output_dir) = &cli.output_dir {
            self.app.output_dir = output_dir.clone();
        }
        if let Some(max_pages) = cli.max_pages {
            self.youtube.max_pages = max_pages;
        }
        if !cli.languages.is_empty() {
            self.transcript.languages = cli.languages.clone();
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.youtube.api_key.trim().is_empty() {
            anyhow::bail!(
                "YouTube Data API key must be configured (set {} or pass --api-key)",
                API_KEY_ENV_VARS[0]
            );
        }

        if !(1..=MAX_PAGE_SIZE).contains(&self.youtube.page_size) {
            anyhow::bail!("Page size must be between 1 and {}", MAX_PAGE_SIZE);
        }

        if self.youtube.max_pages == 0 {
            anyhow::bail!("Maximum page count must be greater than zero");
        }

        if self.app.playlist_id.trim().is_empty() {
            anyhow::bail!("Playlist id must not be empty");
        }

        if self.transcript.languages.is_empty() {
            anyhow::bail!("At least one transcript language must be configured");
        }

        validate_base_url(&self.youtube.api_base_url).context("Invalid Data API base URL")?;
        validate_base_url(&self.transcript.base_url).context("Invalid transcript base URL")?;

        Ok(())
    }

    /// Display current configuration
    pub fn display(&self) {
        println!("Current Configuration:");
        println!("  Playlist: {}", self.app.playlist_id);
        println!("  Output Directory: {}", self.app.output_dir.display());
        println!(
            "  API Key: {}",
            if self.youtube.api_key.is_empty() { "(not set)" } else { "(set)" }
        );
        println!("  Page Size: {}", self.youtube.page_size);
        println!("  Max Pages: {}", self.youtube.max_pages);
        println!("  Languages: {}", self.transcript.languages.join(", "));
    }
}
