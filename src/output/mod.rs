use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Path of the transcript file for a video
pub fn transcript_path(output_dir: &Path, video_id: &str) -> PathBuf {
    output_dir.join(format!("{}_transcript.txt", video_id))
}

/// Write a transcript as UTF-8, replacing any previous file for the same video.
///
/// The output directory must already exist. Returns the path written so the caller
/// can report it.
pub fn save_transcript(output_dir: &Path, video_id: &str, transcript: &str) -> Result<PathBuf> {
    let path = transcript_path(output_dir, video_id);

    fs_err::write(&path, transcript)
        .with_context(|| format!("Failed to write transcript for {}", video_id))?;

    tracing::debug!("Wrote {} bytes to {}", transcript.len(), path.display());
    Ok(path)
}
