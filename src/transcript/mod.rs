use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod watch_page;

pub use watch_page::WatchPageTranscripts;

use crate::error::TranscriptError;

/// One timed caption unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Caption text
    pub text: String,

    /// Start offset in seconds
    pub start: f64,

    /// Display duration in seconds
    pub duration: f64,
}

impl TranscriptSegment {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }
}

/// A service that returns a video's transcript as ordered segments
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    async fn fetch(&self, video_id: &str) -> Result<Vec<TranscriptSegment>, TranscriptError>;
}

/// Drop timing data and join segment texts with single spaces, keeping their order
pub fn normalize(segments: &[TranscriptSegment]) -> String {
    segments
        .iter()
        .map(|segment| segment.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
