use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

pub mod playlist;

pub use playlist::collect_video_ids;

use crate::config::YoutubeConfig;
use crate::error::ApiError;

/// One page of playlist items
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistPage {
    /// Video ids in playlist order
    pub video_ids: Vec<String>,

    /// Continuation cursor, absent on the final page
    pub next_page_token: Option<String>,
}

/// Read access to the video platform's metadata API
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoPlatform: Send + Sync {
    /// Fetch one page of a playlist, continuing from `page_token` when given
    async fn playlist_page(
        &self,
        playlist_id: &str,
        page_token: Option<String>,
    ) -> Result<PlaylistPage, ApiError>;

    /// Look up a video's display title; `None` when the API returns no matching item
    async fn video_title(&self, video_id: &str) -> Result<Option<String>, ApiError>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemListResponse {
    #[serde(default)]
    items: Vec<PlaylistItem>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItem {
    content_details: PlaylistItemContentDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemContentDetails {
    video_id: String,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    snippet: VideoSnippet,
}

#[derive(Debug, Deserialize)]
struct VideoSnippet {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    reason: String,
}

/// YouTube Data API v3 client authenticated with an API key
pub struct YoutubeClient {
    client: Client,
    base_url: String,
    api_key: String,
    page_size: u32,
}

impl YoutubeClient {
    pub fn new(config: &YoutubeConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            page_size: config.page_size,
        })
    }

    /// GET `<base>/<resource>` and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = format!("{}/{}", self.base_url, resource);
        tracing::debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(classify_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| ApiError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl VideoPlatform for YoutubeClient {
    async fn playlist_page(
        &self,
        playlist_id: &str,
        page_token: Option<String>,
    ) -> Result<PlaylistPage, ApiError> {
        let page_size = self.page_size.to_string();
        let mut query = vec![
            ("part", "contentDetails"),
            ("playlistId", playlist_id),
            ("maxResults", page_size.as_str()),
        ];
        if let Some(token) = page_token.as_deref() {
            query.push(("pageToken", token));
        }

        let response: PlaylistItemListResponse = self.get_json("playlistItems", &query).await?;
        Ok(response.into())
    }

    async fn video_title(&self, video_id: &str) -> Result<Option<String>, ApiError> {
        let response: VideoListResponse = self
            .get_json("videos", &[("part", "snippet"), ("id", video_id)])
            .await?;

        Ok(response.into_title())
    }
}

impl From<PlaylistItemListResponse> for PlaylistPage {
    fn from(response: PlaylistItemListResponse) -> Self {
        Self {
            video_ids: response
                .items
                .into_iter()
                .map(|item| item.content_details.video_id)
                .collect(),
            // An empty token ends pagination just like a missing one
            next_page_token: response.next_page_token.filter(|token| !token.is_empty()),
        }
    }
}

impl VideoListResponse {
    fn into_title(self) -> Option<String> {
        self.items.into_iter().next().map(|item| item.snippet.title)
    }
}

const QUOTA_REASONS: [&str; 3] = ["quotaExceeded", "rateLimitExceeded", "dailyLimitExceeded"];
const KEY_REASONS: [&str; 2] = ["keyInvalid", "keyExpired"];

/// Map a non-success Data API response onto a typed error
fn classify_error(status: StatusCode, body: &str) -> ApiError {
    let parsed = serde_json::from_str::<ErrorResponse>(body).ok();

    let message = parsed
        .as_ref()
        .map(|r| r.error.message.clone())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        });

    let reasons: Vec<&str> = parsed
        .as_ref()
        .map(|r| r.error.errors.iter().map(|e| e.reason.as_str()).collect())
        .unwrap_or_default();
    let has_reason = |wanted: &[&str]| reasons.iter().any(|r| wanted.contains(r));

    if has_reason(&QUOTA_REASONS[..]) {
        ApiError::QuotaExceeded { message }
    } else if status == StatusCode::UNAUTHORIZED
        || status == StatusCode::FORBIDDEN
        || has_reason(&KEY_REASONS[..])
    {
        ApiError::Unauthorized { message }
    } else if status == StatusCode::NOT_FOUND {
        ApiError::NotFound { message }
    } else {
        ApiError::Api {
            status: status.as_u16(),
            message,
        }
    }
}
