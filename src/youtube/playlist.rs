use super::VideoPlatform;
use crate::error::ApiError;

/// Collect every video id in a playlist by following continuation cursors.
///
/// Stops after `max_pages` requests with [`ApiError::PaginationLimit`] if the service
/// keeps returning a cursor. Any request failure aborts the enumeration.
pub async fn collect_video_ids(
    platform: &dyn VideoPlatform,
    playlist_id: &str,
    max_pages: usize,
) -> Result<Vec<String>, ApiError> {
    let mut video_ids = Vec::new();
    let mut page_token: Option<String> = None;

    for page_number in 1..=max_pages {
        let page = platform.playlist_page(playlist_id, page_token.take()).await?;

        tracing::debug!(
            "Playlist {} page {}: {} items, more: {}",
            playlist_id,
            page_number,
            page.video_ids.len(),
            page.next_page_token.is_some()
        );

        video_ids.extend(page.video_ids);

        match page.next_page_token {
            Some(token) => page_token = Some(token),
            None => return Ok(video_ids),
        }
    }

    Err(ApiError::PaginationLimit { pages: max_pages })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube::{MockVideoPlatform, PlaylistPage};
    use mockall::predicate::eq;
    use mockall::Sequence;

    fn page(ids: &[&str], next: Option<&str>) -> PlaylistPage {
        PlaylistPage {
            video_ids: ids.iter().map(|id| id.to_string()).collect(),
            next_page_token: next.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_follows_cursor_chain() {
        let mut platform = MockVideoPlatform::new();
        let mut seq = Sequence::new();

        let responses = [
            (None, page(&["v1", "v2"], Some("c1"))),
            (Some("c1"), page(&["v3"], Some("c2"))),
            (Some("c2"), page(&["v4", "v5"], None)),
        ];
        for (token, response) in responses {
            platform
                .expect_playlist_page()
                .with(eq("PL1"), eq(token.map(str::to_string)))
                .times(1)
                .in_sequence(&mut seq)
                .return_once(move |_, _| Ok(response));
        }

        let ids = collect_video_ids(&platform, "PL1", 10).await.unwrap();
        assert_eq!(ids, vec!["v1", "v2", "v3", "v4", "v5"]);
    }

    #[tokio::test]
    async fn test_single_page() {
        let mut platform = MockVideoPlatform::new();
        platform
            .expect_playlist_page()
            .times(1)
            .return_once(|_, _| Ok(page(&["only"], None)));

        let ids = collect_video_ids(&platform, "PL1", 1).await.unwrap();
        assert_eq!(ids, vec!["only"]);
    }

    #[tokio::test]
    async fn test_stops_at_page_limit() {
        let mut platform = MockVideoPlatform::new();
        platform
            .expect_playlist_page()
            .times(3)
            .returning(|_, _| Ok(page(&["again"], Some("same"))));

        let err = collect_video_ids(&platform, "PL1", 3).await.unwrap_err();
        assert!(matches!(err, ApiError::PaginationLimit { pages: 3 }));
    }

    #[tokio::test]
    async fn test_request_failure_aborts() {
        let mut platform = MockVideoPlatform::new();
        let mut seq = Sequence::new();
        platform
            .expect_playlist_page()
            .times(1)
            .in_sequence(&mut seq)
            .return_once(|_, _| Ok(page(&["v1"], Some("c1"))));
        platform
            .expect_playlist_page()
            .times(1)
            .in_sequence(&mut seq)
            .return_once(|_, _| {
                Err(ApiError::Unauthorized {
                    message: "API key not valid".to_string(),
                })
            });

        let err = collect_video_ids(&platform, "PL1", 10).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized { .. }));
    }
}
