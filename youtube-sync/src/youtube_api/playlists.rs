//! YouTube Playlists API types.

use crate::youtube_api::PlaylistInfo;
use crate::youtube_api::types::{PageInfo, ThumbnailDetails, thumbnail_urls};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Response structure for the `playlists.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/playlists/list>
#[derive(Debug, Serialize, Deserialize)]
pub struct PlaylistListResponse {
    /// The value will be `youtube#playlistListResponse`.
    pub kind: String,
    #[serde(default)]
    pub items: VecDeque<Playlist>,
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

/// A `playlist` resource represents a YouTube playlist.
///
/// See: <https://developers.google.com/youtube/v3/docs/playlists#resource>
#[derive(Debug, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub snippet: PlaylistSnippet,
    #[serde(rename = "contentDetails")]
    pub content_details: PlaylistContentDetails,
}

/// See: <https://developers.google.com/youtube/v3/docs/playlists#snippet>
#[derive(Debug, Serialize, Deserialize)]
pub struct PlaylistSnippet {
    /// The ID of the channel that published the playlist.
    #[serde(rename = "channelId")]
    pub channel_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnails: ThumbnailDetails,
}

/// See: <https://developers.google.com/youtube/v3/docs/playlists#contentDetails>
#[derive(Debug, Serialize, Deserialize)]
pub struct PlaylistContentDetails {
    /// The number of videos in the playlist.
    #[serde(rename = "itemCount")]
    pub item_count: u64,
}

impl From<Playlist> for PlaylistInfo {
    fn from(playlist: Playlist) -> Self {
        PlaylistInfo {
            id: playlist.id,
            channel_id: playlist.snippet.channel_id,
            title: playlist.snippet.title,
            description: playlist.snippet.description,
            video_count: playlist.content_details.item_count,
            thumbnails: thumbnail_urls(playlist.snippet.thumbnails),
        }
    }
}
