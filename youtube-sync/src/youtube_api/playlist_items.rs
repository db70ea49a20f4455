//! YouTube PlaylistItems API types.

use crate::youtube_api::PlaylistVideo;
use crate::youtube_api::types::{PageInfo, ResourceId, ThumbnailDetails, thumbnail_urls};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Response structure for the `playlistItems.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/playlistItems/list>
#[derive(Debug, Serialize, Deserialize)]
pub struct PlaylistItemListResponse {
    /// The value will be `youtube#playlistItemListResponse`.
    pub kind: String,
    #[serde(default)]
    pub items: VecDeque<PlaylistItem>,
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

/// A `playlistItem` resource identifies a video included in a playlist.
///
/// See: <https://developers.google.com/youtube/v3/docs/playlistItems#resource>
#[derive(Debug, Serialize, Deserialize)]
pub struct PlaylistItem {
    /// The ID of the playlist entry itself, not of the video.
    pub id: String,
    pub snippet: PlaylistItemSnippet,
    #[serde(rename = "contentDetails", skip_serializing_if = "Option::is_none")]
    pub content_details: Option<PlaylistItemContentDetails>,
}

/// See: <https://developers.google.com/youtube/v3/docs/playlistItems#snippet>
#[derive(Debug, Serialize, Deserialize)]
pub struct PlaylistItemSnippet {
    /// When the item was added to the playlist.
    #[serde(rename = "publishedAt")]
    pub published_at: Timestamp,
    /// The ID of the channel that owns the playlist.
    #[serde(rename = "channelId")]
    pub channel_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnails: ThumbnailDetails,
    #[serde(rename = "resourceId")]
    pub resource_id: ResourceId,
    /// The ID of the channel that uploaded the video.
    ///
    /// Missing for private and deleted videos.
    #[serde(rename = "videoOwnerChannelId", skip_serializing_if = "Option::is_none")]
    pub video_owner_channel_id: Option<String>,
}

/// See: <https://developers.google.com/youtube/v3/docs/playlistItems#contentDetails>
#[derive(Debug, Serialize, Deserialize)]
pub struct PlaylistItemContentDetails {
    #[serde(rename = "videoId")]
    pub video_id: String,
    /// When the video was published. Missing for private videos.
    #[serde(rename = "videoPublishedAt", skip_serializing_if = "Option::is_none")]
    pub video_published_at: Option<Timestamp>,
}

impl PlaylistItem {
    /// Describes the video this entry refers to, or `None` if the entry is not a video.
    pub fn into_playlist_video(self) -> Option<PlaylistVideo> {
        let snippet = self.snippet;
        let id = snippet
            .resource_id
            .video_id
            .or_else(|| self.content_details.as_ref().map(|d| d.video_id.clone()))?;
        let published_at = self
            .content_details
            .and_then(|d| d.video_published_at)
            .unwrap_or(snippet.published_at);
        Some(PlaylistVideo {
            id,
            title: snippet.title,
            description: snippet.description,
            published_at,
            thumbnails: thumbnail_urls(snippet.thumbnails),
            channel_id: snippet.video_owner_channel_id.unwrap_or(snippet.channel_id),
        })
    }
}
