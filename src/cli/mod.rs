use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "playlist-transcriber",
    about = "Playlist Transcriber - Save plain-text transcripts for every video in a YouTube playlist",
    version,
    long_about = "Enumerates a YouTube playlist through the Data API, downloads each video's captions and writes them without timestamps to <video_id>_transcript.txt. Running without arguments processes the built-in playlist."
)]
pub struct Cli {
    /// YouTube Data API key
    #[arg(long, env = "google_key", hide_env_values = true, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Playlist to transcribe (defaults to the configured playlist)
    #[arg(short, long, value_name = "PLAYLIST_ID")]
    pub playlist_id: Option<String>,

    /// Existing directory that receives the transcript files
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Stop paging after this many playlist pages
    #[arg(long, value_name = "COUNT")]
    pub max_pages: Option<usize>,

    /// Preferred caption language, repeat for fallbacks
    #[arg(short, long = "language", value_name = "LANG")]
    pub languages: Vec<String>,

    /// Configuration file (YAML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub show_config: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable progress indicators
    #[arg(short, long)]
    pub quiet: bool,
}
