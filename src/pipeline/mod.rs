use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;

use crate::config::Config;
use crate::error::TranscriptError;
use crate::output::save_transcript;
use crate::transcript::{normalize, TranscriptSource, WatchPageTranscripts};
use crate::utils::format_duration;
use crate::youtube::{collect_video_ids, VideoPlatform, YoutubeClient};

/// What happened to one video in the batch
#[derive(Debug)]
pub enum VideoOutcome {
    /// Transcript written to this path
    Saved(PathBuf),

    /// Transcript could not be retrieved; the batch moved on
    Skipped(TranscriptError),
}

/// Result of a full playlist run
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Number of videos found in the playlist
    pub total: usize,

    /// Files written, in playlist order
    pub saved: Vec<PathBuf>,

    /// Videos whose transcript could not be retrieved
    pub skipped: Vec<(String, TranscriptError)>,
}

/// Enumerate a playlist, then fetch, normalize and save each transcript in turn
pub struct TranscriptionPipeline {
    config: Config,
    platform: Box<dyn VideoPlatform>,
    transcripts: Box<dyn TranscriptSource>,
    show_progress: bool,
}

impl TranscriptionPipeline {
    /// Create a pipeline backed by the YouTube Data API and watch page captions
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let platform = YoutubeClient::new(&config.youtube)
            .context("Failed to create YouTube Data API client")?;
        let transcripts = WatchPageTranscripts::new(&config.transcript)
            .context("Failed to create transcript client")?;

        Ok(Self::with_sources(config, Box::new(platform), Box::new(transcripts)))
    }

    /// Create a pipeline over arbitrary sources
    pub fn with_sources(
        config: Config,
        platform: Box<dyn VideoPlatform>,
        transcripts: Box<dyn TranscriptSource>,
    ) -> Self {
        Self {
            config,
            platform,
            transcripts,
            show_progress: true,
        }
    }

    /// Enable or disable the progress bar
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Process every video in the configured playlist.
    ///
    /// Transcript failures are recorded and skipped. Playlist and filesystem
    /// errors abort the run; files written before the abort are kept.
    pub async fn run(&self) -> Result<BatchSummary> {
        let started = Instant::now();
        let playlist_id = &self.config.app.playlist_id;

        tracing::info!("Listing videos in playlist {}", playlist_id);
        let video_ids = collect_video_ids(
            self.platform.as_ref(),
            playlist_id,
            self.config.youtube.max_pages,
        )
        .await
        .with_context(|| format!("Failed to list playlist {}", playlist_id))?;
        tracing::info!("Found {} videos", video_ids.len());

        let progress = if self.show_progress {
            let progress = ProgressBar::new(video_ids.len() as u64);
            progress.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            progress
        } else {
            ProgressBar::hidden()
        };

        let mut summary = BatchSummary {
            total: video_ids.len(),
            ..BatchSummary::default()
        };

        for video_id in video_ids {
            progress.set_message(video_id.clone());

            match self.process_video(&video_id, &progress).await? {
                VideoOutcome::Saved(path) => summary.saved.push(path),
                VideoOutcome::Skipped(err) => summary.skipped.push((video_id, err)),
            }

            progress.inc(1);
        }

        progress.finish_and_clear();
        tracing::info!(
            "Saved {} of {} transcripts ({} skipped) in {}",
            summary.saved.len(),
            summary.total,
            summary.skipped.len(),
            format_duration(started.elapsed().as_secs_f64())
        );

        Ok(summary)
    }

    /// Fetch, normalize and save one video's transcript.
    ///
    /// Nothing is written unless the transcript was retrieved in full.
    pub async fn transcribe_video(&self, video_id: &str) -> Result<VideoOutcome> {
        self.process_video(video_id, &ProgressBar::hidden()).await
    }

    async fn process_video(&self, video_id: &str, progress: &ProgressBar) -> Result<VideoOutcome> {
        match self.transcripts.fetch(video_id).await {
            Ok(segments) => {
                tracing::debug!("Fetched {} segments for {}", segments.len(), video_id);
                let text = normalize(&segments);
                let path = save_transcript(&self.config.app.output_dir, video_id, &text)?;
                progress.suspend(|| println!("Transcript saved to {}", path.display()));
                Ok(VideoOutcome::Saved(path))
            }
            Err(err) => {
                tracing::warn!("Skipping {}: {}", video_id, err);
                progress.suspend(|| println!("Failure"));
                Ok(VideoOutcome::Skipped(err))
            }
        }
    }
}
