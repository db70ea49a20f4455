//! YouTube Channels API types.

use crate::youtube_api::types::{PageInfo, ThumbnailDetails, thumbnail_urls};
use crate::youtube_api::{AccountInfo, ChannelInfo, UploadsPlaylistId};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Response structure for the `channels.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels/list>
#[derive(Debug, Serialize, Deserialize)]
pub struct ChannelListResponse {
    /// Identifies the API resource's type.
    ///
    /// The value will be `youtube#channelListResponse`.
    pub kind: String,
    /// A list of channels that match the request criteria.
    ///
    /// YouTube leaves this field out entirely when nothing matched.
    #[serde(default)]
    pub items: VecDeque<Channel>,
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

/// A `channel` resource contains information about a YouTube channel.
///
/// Which parts are present depends on the `part` parameter of the request.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels#resource>
#[derive(Debug, Serialize, Deserialize)]
pub struct Channel {
    /// The ID that YouTube uses to uniquely identify the channel.
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<ChannelSnippet>,
    #[serde(rename = "contentDetails", skip_serializing_if = "Option::is_none")]
    pub content_details: Option<ChannelContentDetails>,
}

/// Basic details about the channel.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels#snippet>
#[derive(Debug, Serialize, Deserialize)]
pub struct ChannelSnippet {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnails: ThumbnailDetails,
}

/// See: <https://developers.google.com/youtube/v3/docs/channels#contentDetails>
#[derive(Debug, Serialize, Deserialize)]
pub struct ChannelContentDetails {
    #[serde(rename = "relatedPlaylists")]
    pub related_playlists: RelatedPlaylists,
}

/// Playlists associated with the channel.
///
/// `watchHistory` and `watchLater` are only reported for the authenticated user's own channel,
/// and not at all on some accounts.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RelatedPlaylists {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploads: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<String>,
    #[serde(rename = "watchHistory", skip_serializing_if = "Option::is_none")]
    pub watch_history: Option<String>,
    #[serde(rename = "watchLater", skip_serializing_if = "Option::is_none")]
    pub watch_later: Option<String>,
}

impl Channel {
    fn related_playlists(&self) -> Option<&RelatedPlaylists> {
        self.content_details.as_ref().map(|d| &d.related_playlists)
    }

    pub fn uploads_playlist_id(&self) -> Option<UploadsPlaylistId> {
        let uploads = self.related_playlists()?.uploads.as_ref()?;
        Some(UploadsPlaylistId {
            channel_id: self.id.clone(),
            uploads_playlist_id: uploads.clone(),
        })
    }

    /// Requires the `snippet` and `contentDetails` parts.
    pub fn into_channel_info(self) -> eyre::Result<ChannelInfo> {
        let uploads_playlist_id = self
            .related_playlists()
            .and_then(|p| p.uploads.clone())
            .ok_or_else(|| eyre::eyre!("channel {} has no uploads playlist", self.id))?;
        let snippet = self
            .snippet
            .ok_or_else(|| eyre::eyre!("channel {} returned without snippet", self.id))?;
        Ok(ChannelInfo {
            id: self.id,
            title: snippet.title,
            thumbnails: thumbnail_urls(snippet.thumbnails),
            uploads_playlist_id,
        })
    }

    /// Requires the `snippet` and `contentDetails` parts.
    pub fn into_account_info(self) -> eyre::Result<AccountInfo> {
        let related = self.content_details.map(|d| d.related_playlists).unwrap_or_default();
        let snippet = self
            .snippet
            .ok_or_else(|| eyre::eyre!("channel {} returned without snippet", self.id))?;
        Ok(AccountInfo {
            id: self.id,
            title: snippet.title,
            watch_history_playlist_id: related.watch_history,
            watch_later_playlist_id: related.watch_later,
        })
    }
}
