use thiserror::Error;

/// Failures from the YouTube Data API (playlist listing and video metadata)
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("API key rejected: {message}")]
    Unauthorized { message: String },

    #[error("Resource not found: {message}")]
    NotFound { message: String },

    #[error("API quota exhausted: {message}")]
    QuotaExceeded { message: String },

    #[error("API request failed with HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed API response: {0}")]
    MalformedResponse(String),

    #[error("Playlist pagination did not terminate after {pages} pages")]
    PaginationLimit { pages: usize },
}

/// Failures while retrieving a single video's transcript.
///
/// Each of these is confined to its video; the batch records it and moves on.
#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("Invalid video id: {video_id}")]
    InvalidVideoId { video_id: String },

    #[error("Video {video_id} is unavailable")]
    VideoUnavailable { video_id: String },

    #[error("Transcripts are disabled for video {video_id}")]
    TranscriptsDisabled { video_id: String },

    #[error("No transcript for video {video_id} in {requested:?} (available: {available:?})")]
    NoTranscriptFound {
        video_id: String,
        requested: Vec<String>,
        available: Vec<String>,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Transcript request failed with HTTP {status}")]
    Http { status: u16 },

    #[error("Malformed transcript response: {0}")]
    MalformedResponse(String),
}
