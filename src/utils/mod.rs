use anyhow::Result;
use url::Url;

/// Characters that are not allowed in filenames on common filesystems
const ILLEGAL_FILENAME_CHARS: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Validate a base URL and return the parsed form
pub fn validate_base_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url)
        .map_err(|_| anyhow::anyhow!("Invalid URL format: {}", url))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        anyhow::bail!("URL must use HTTP or HTTPS protocol");
    }

    Ok(parsed)
}

/// Remove characters that are illegal in filenames, keeping everything else in order
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .filter(|c| !ILLEGAL_FILENAME_CHARS.contains(c))
        .collect()
}

/// YouTube video ids are 11 characters of URL-safe base64
pub fn is_valid_video_id(video_id: &str) -> bool {
    video_id.len() == 11
        && video_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Format duration in human-readable format
pub fn format_duration(seconds: f64) -> String {
    let total_seconds = seconds as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("a/b*c?.txt"), "abc.txt");
        assert_eq!(sanitize_filename(r#"\/*?:"<>|"#), "");
        assert_eq!(sanitize_filename("Prompt Guide: Part 1"), "Prompt Guide Part 1");
        assert_eq!(sanitize_filename("  spaced  "), "  spaced  ");
        assert_eq!(sanitize_filename("naïve — ok"), "naïve — ok");
    }

    #[test]
    fn test_is_valid_video_id() {
        assert!(is_valid_video_id("dQw4w9WgXcQ"));
        assert!(is_valid_video_id("a-b_c1D2e3F"));
        assert!(!is_valid_video_id("short"));
        assert!(!is_valid_video_id("dQw4w9WgXcQ1"));
        assert!(!is_valid_video_id("dQw4w9WgX/Q"));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(30.0), "30s");
        assert_eq!(format_duration(90.0), "1m 30s");
        assert_eq!(format_duration(3661.0), "1h 1m 1s");
    }

    #[test]
    fn test_validate_base_url() {
        assert!(validate_base_url("https://www.googleapis.com/youtube/v3").is_ok());
        assert!(validate_base_url("http://localhost:8080").is_ok());
        assert!(validate_base_url("ftp://example.com").is_err());
        assert!(validate_base_url("not-a-url").is_err());
    }
}
