//! Playlist Transcriber - save plain-text transcripts for every video in a YouTube playlist
//!
//! The library enumerates a playlist through the YouTube Data API, fetches each video's
//! caption track, drops the timing data and writes one text file per video.

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod transcript;
pub mod utils;
pub mod youtube;

#[cfg(test)]
mod test_support;

pub use cli::Cli;
pub use config::Config;
pub use error::{ApiError, TranscriptError};
pub use pipeline::{BatchSummary, TranscriptionPipeline, VideoOutcome};
pub use transcript::{normalize, TranscriptSegment, TranscriptSource};
pub use youtube::{PlaylistPage, VideoPlatform, YoutubeClient};

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;
