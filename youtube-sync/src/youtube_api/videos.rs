//! YouTube Videos API types.

use crate::youtube_api::VideoMetadata;
use crate::youtube_api::types::PageInfo;
use eyre::Context;
use jiff::Span;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Response structure for the `videos.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos/list>
#[derive(Debug, Serialize, Deserialize)]
pub struct VideoListResponse {
    /// The value will be `youtube#videoListResponse`.
    pub kind: String,
    #[serde(default)]
    pub items: VecDeque<Video>,
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

/// A `video` resource represents a YouTube video.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#resource>
#[derive(Debug, Serialize, Deserialize)]
pub struct Video {
    /// The ID that YouTube uses to uniquely identify the video.
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<VideoStatistics>,
    #[serde(rename = "contentDetails", skip_serializing_if = "Option::is_none")]
    pub content_details: Option<VideoContentDetails>,
}

/// Statistics about the video.
///
/// YouTube encodes every count as a string.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#statistics>
#[derive(Debug, Serialize, Deserialize)]
pub struct VideoStatistics {
    /// The number of times the video has been viewed.
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
    /// The number of users who have indicated that they liked the video.
    #[serde(rename = "likeCount")]
    pub like_count: Option<String>,
    /// The number of comments for the video.
    #[serde(rename = "commentCount")]
    pub comment_count: Option<String>,
}

/// See: <https://developers.google.com/youtube/v3/docs/videos#contentDetails>
#[derive(Debug, Serialize, Deserialize)]
pub struct VideoContentDetails {
    /// The length of the video as an ISO 8601 duration, such as `PT15M33S`.
    pub duration: String,
}

impl Video {
    /// Requires the `statistics` and `contentDetails` parts.
    ///
    /// A video whose owner hides its view count is reported with zero views.
    pub fn into_metadata(self) -> eyre::Result<VideoMetadata> {
        let view_count = match self.statistics.and_then(|s| s.view_count) {
            Some(count) => count
                .parse()
                .with_context(|| format!("parse view count of video {}", self.id))?,
            None => 0,
        };
        let duration = self
            .content_details
            .ok_or_else(|| eyre::eyre!("video {} returned without content details", self.id))?
            .duration;
        let duration = parse_duration_seconds(&duration)
            .with_context(|| format!("parse duration of video {}", self.id))?;
        Ok(VideoMetadata {
            id: self.id,
            view_count,
            duration,
        })
    }
}

/// Converts an ISO 8601 duration as used by YouTube (`PT1H2M3S`, `P1DT2H`, `P0D`) to seconds.
pub fn parse_duration_seconds(iso: &str) -> eyre::Result<i64> {
    let span: Span = iso
        .parse()
        .with_context(|| format!("invalid ISO 8601 duration {iso:?}"))?;
    if span.get_years() != 0 || span.get_months() != 0 {
        eyre::bail!("duration {iso:?} uses calendar units");
    }
    let days = i64::from(span.get_weeks()) * 7 + i64::from(span.get_days());
    Ok(days * 86_400
        + i64::from(span.get_hours()) * 3_600
        + span.get_minutes() * 60
        + span.get_seconds())
}
