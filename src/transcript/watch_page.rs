use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use super::{TranscriptSegment, TranscriptSource};
use crate::config::TranscriptConfig;
use crate::error::TranscriptError;
use crate::utils::is_valid_video_id;

const CAPTION_TRACKS_MARKER: &str = "\"captionTracks\":";
const PLAYABILITY_MARKER: &str = "\"playabilityStatus\":{\"status\":\"";

/// Caption track advertised in a watch page's player response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    language_code: String,
    #[serde(default)]
    kind: Option<String>,
}

impl CaptionTrack {
    /// Auto-generated (speech recognition) tracks are marked `asr`
    fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

#[derive(Debug, Deserialize)]
struct Json3Transcript {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Json3Event {
    #[serde(default)]
    t_start_ms: u64,
    #[serde(default)]
    d_duration_ms: u64,
    segs: Option<Vec<Json3Seg>>,
}

#[derive(Debug, Deserialize)]
struct Json3Seg {
    #[serde(default)]
    utf8: String,
}

/// Transcript source that reads caption tracks linked from the public watch page
pub struct WatchPageTranscripts {
    client: Client,
    base_url: Url,
    languages: Vec<String>,
}

impl WatchPageTranscripts {
    pub fn new(config: &TranscriptConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US"));

        let client = Client::builder()
            .user_agent(concat!("playlist-transcriber/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: Url::parse(&config.base_url)?,
            languages: config.languages.clone(),
        })
    }

    async fn get_text(&self, url: Url) -> Result<String, TranscriptError> {
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TranscriptError::Http {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    async fn fetch_watch_page(&self, video_id: &str) -> Result<String, TranscriptError> {
        let mut url = self
            .base_url
            .join("watch")
            .map_err(|e| TranscriptError::MalformedResponse(e.to_string()))?;
        url.query_pairs_mut().append_pair("v", video_id);

        self.get_text(url).await
    }

    async fn fetch_track(
        &self,
        track: &CaptionTrack,
    ) -> Result<Vec<TranscriptSegment>, TranscriptError> {
        let url = track_url(&self.base_url, &track.base_url)?;
        let body = self.get_text(url).await?;

        parse_json3(&body)
    }
}

#[async_trait]
impl TranscriptSource for WatchPageTranscripts {
    async fn fetch(&self, video_id: &str) -> Result<Vec<TranscriptSegment>, TranscriptError> {
        if !is_valid_video_id(video_id) {
            return Err(TranscriptError::InvalidVideoId {
                video_id: video_id.to_string(),
            });
        }

        let html = self.fetch_watch_page(video_id).await?;
        let tracks = extract_caption_tracks(video_id, &html)?;

        let track = select_track(&tracks, &self.languages).ok_or_else(|| {
            TranscriptError::NoTranscriptFound {
                video_id: video_id.to_string(),
                requested: self.languages.clone(),
                available: tracks.iter().map(|t| t.language_code.clone()).collect(),
            }
        })?;

        tracing::debug!(
            "Using {} caption track '{}' for {}",
            if track.is_generated() { "generated" } else { "manual" },
            track.language_code,
            video_id
        );

        self.fetch_track(track).await
    }
}

/// Pull the caption track list out of a watch page
fn extract_caption_tracks(video_id: &str, html: &str) -> Result<Vec<CaptionTrack>, TranscriptError> {
    if html.contains("class=\"g-recaptcha\"") {
        return Err(TranscriptError::Http { status: 429 });
    }

    let Some(index) = html.find(CAPTION_TRACKS_MARKER) else {
        return Err(match playability_status(html) {
            Some(status) if status != "OK" => TranscriptError::VideoUnavailable {
                video_id: video_id.to_string(),
            },
            _ => TranscriptError::TranscriptsDisabled {
                video_id: video_id.to_string(),
            },
        });
    };

    let rest = &html[index + CAPTION_TRACKS_MARKER.len()..];
    let mut stream = serde_json::Deserializer::from_str(rest).into_iter::<Vec<CaptionTrack>>();

    match stream.next() {
        Some(Ok(tracks)) if !tracks.is_empty() => Ok(tracks),
        Some(Ok(_)) => Err(TranscriptError::TranscriptsDisabled {
            video_id: video_id.to_string(),
        }),
        Some(Err(e)) => Err(TranscriptError::MalformedResponse(e.to_string())),
        None => Err(TranscriptError::MalformedResponse(
            "caption track list is truncated".to_string(),
        )),
    }
}

fn playability_status(html: &str) -> Option<&str> {
    let start = html.find(PLAYABILITY_MARKER)? + PLAYABILITY_MARKER.len();
    let rest = &html[start..];
    rest.find('"').map(|end| &rest[..end])
}

/// Pick a track by language preference, manual tracks before generated ones per language
fn select_track<'a>(tracks: &'a [CaptionTrack], languages: &[String]) -> Option<&'a CaptionTrack> {
    languages.iter().find_map(|language| {
        let matching = |generated: bool| {
            tracks
                .iter()
                .find(|t| &t.language_code == language && t.is_generated() == generated)
        };
        matching(false).or_else(|| matching(true))
    })
}

/// Resolve a track URL against the watch page host and request the JSON caption format
fn track_url(base: &Url, track_url: &str) -> Result<Url, TranscriptError> {
    let mut url = base
        .join(track_url)
        .map_err(|e| TranscriptError::MalformedResponse(format!("bad caption URL: {}", e)))?;

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "fmt")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(pairs)
        .append_pair("fmt", "json3");

    Ok(url)
}

/// Convert a `json3` caption body into ordered segments
fn parse_json3(body: &str) -> Result<Vec<TranscriptSegment>, TranscriptError> {
    if body.trim().is_empty() {
        return Err(TranscriptError::MalformedResponse(
            "empty caption response".to_string(),
        ));
    }

    let transcript: Json3Transcript = serde_json::from_str(body)
        .map_err(|e| TranscriptError::MalformedResponse(e.to_string()))?;

    let segments = transcript
        .events
        .into_iter()
        .filter_map(|event| {
            let text: String = event.segs?.into_iter().map(|seg| seg.utf8).collect();
            if text.trim().is_empty() {
                return None;
            }
            Some(TranscriptSegment {
                text,
                start: event.t_start_ms as f64 / 1000.0,
                duration: event.d_duration_ms as f64 / 1000.0,
            })
        })
        .collect();

    Ok(segments)
}
