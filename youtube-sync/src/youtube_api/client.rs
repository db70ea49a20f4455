//! HTTP client for the YouTube Data API v3.

use crate::youtube_api::{
    AccountInfo, ChannelInfo, MAX_IDS_PER_REQUEST, PlaylistInfo, PlaylistVideo, SubscribedChannel,
    UploadsPlaylistId, VideoMetadata, YouTubeApi,
    channels::{Channel, ChannelListResponse},
    playlist_items::{PlaylistItem, PlaylistItemListResponse},
    playlists::PlaylistListResponse,
    subscriptions::{Subscription, SubscriptionListResponse},
    types::PageStream,
    videos::VideoListResponse,
};
use eyre::Context;
use http::Method;
use serde::de::DeserializeOwned;
use std::collections::VecDeque;
use tokio_stream::{Stream, StreamExt};
use tracing::{Instrument, instrument};

/// Where the YouTube Data API v3 lives.
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Client for the read-only parts of the YouTube Data API v3 that subscription syncing needs.
///
/// Requests are authorized with a bearer access token obtained elsewhere; the client never
/// refreshes it. Once the token expires, every call fails until a new client is built.
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    access_token: String,
    base_url: String,
    /// `maxResults` for paginated list calls (1-50).
    page_size: u32,
    /// HTTP client for API requests
    client: reqwest::Client,
}

impl YouTubeClient {
    /// Creates a client that talks to [`DEFAULT_BASE_URL`].
    pub fn new(access_token: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            access_token: access_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: 50,
            client,
        }
    }

    /// Sends requests to `base_url` instead, such as a local proxy.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets how many items paginated calls ask for per page. Clamped to 1-50.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, 50);
        self
    }

    /// Makes an authenticated HTTP request to the YouTube API and parses the JSON response.
    ///
    /// Fails on any non-success status, including the response body in the error since
    /// YouTube explains quota and permission problems there.
    #[instrument(skip(self), level = tracing::Level::TRACE)]
    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        query_params: &[(&str, &str)],
    ) -> eyre::Result<T> {
        let url = format!("{}/{}", self.base_url, resource);
        let method = Method::GET;

        let response = self
            .client
            .request(method.clone(), &url)
            .bearer_auth(&self.access_token)
            .query(query_params)
            .send()
            .await
            .with_context(|| format!("send {} request to YouTube API: {}", method, url))?;

        let status_code = response.status();
        if !status_code.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(eyre::eyre!(
                "YouTube API {} request failed with status {}: {}",
                method,
                status_code,
                error_text
            ));
        }

        response
            .json()
            .await
            .with_context(|| format!("parse YouTube {} API response as JSON", resource))
    }

    /// Calls `channels.list` for up to [`MAX_IDS_PER_REQUEST`] channel ids.
    async fn list_channels_internal(
        &self,
        part: &str,
        channel_ids: &[String],
    ) -> eyre::Result<ChannelListResponse> {
        let ids = channel_ids.join(",");
        let max_results = MAX_IDS_PER_REQUEST.to_string();
        let query_params = [
            ("part", part),
            ("id", ids.as_str()),
            ("maxResults", max_results.as_str()),
        ];
        let channels: ChannelListResponse = self.get_json("channels", &query_params).await?;

        tracing::debug!(
            requested = channel_ids.len(),
            returned_items = channels.items.len(),
            "fetched channels"
        );

        Ok(channels)
    }

    /// Calls `playlists.list` for up to [`MAX_IDS_PER_REQUEST`] playlist ids.
    async fn list_playlists_internal(
        &self,
        playlist_ids: &[String],
    ) -> eyre::Result<PlaylistListResponse> {
        let ids = playlist_ids.join(",");
        let max_results = MAX_IDS_PER_REQUEST.to_string();
        let query_params = [
            ("part", "id,snippet,contentDetails"),
            ("id", ids.as_str()),
            ("maxResults", max_results.as_str()),
        ];
        let playlists: PlaylistListResponse = self.get_json("playlists", &query_params).await?;

        tracing::debug!(
            requested = playlist_ids.len(),
            returned_items = playlists.items.len(),
            "fetched playlists"
        );

        Ok(playlists)
    }

    /// Calls `subscriptions.list` for one page of the channels that `channel_id` follows.
    async fn list_subscriptions_internal(
        &self,
        channel_id: &str,
        page_token: Option<String>,
    ) -> eyre::Result<SubscriptionListResponse> {
        let max_results = self.page_size.to_string();
        let mut query_params = vec![
            ("part", "snippet"),
            ("channelId", channel_id),
            ("maxResults", max_results.as_str()),
        ];

        // Add pageToken if provided
        if let Some(ref token) = page_token {
            query_params.push(("pageToken", token.as_str()));
        }

        let subscriptions: SubscriptionListResponse =
            self.get_json("subscriptions", &query_params).await?;

        tracing::debug!(
            channel_id,
            total_results = subscriptions.page_info.total_results,
            returned_items = subscriptions.items.len(),
            "fetched subscriptions"
        );

        Ok(subscriptions)
    }

    /// Calls `playlistItems.list` for one page of a playlist's entries.
    async fn list_playlist_items_internal(
        &self,
        playlist_id: &str,
        page_token: Option<String>,
    ) -> eyre::Result<PlaylistItemListResponse> {
        let max_results = self.page_size.to_string();
        let mut query_params = vec![
            ("part", "snippet,contentDetails"),
            ("playlistId", playlist_id),
            ("maxResults", max_results.as_str()),
        ];

        if let Some(ref token) = page_token {
            query_params.push(("pageToken", token.as_str()));
        }

        let items: PlaylistItemListResponse =
            self.get_json("playlistItems", &query_params).await?;

        tracing::debug!(
            playlist_id,
            total_results = items.page_info.total_results,
            returned_items = items.items.len(),
            "fetched playlist items"
        );

        Ok(items)
    }

    /// Calls `videos.list` for up to [`MAX_IDS_PER_REQUEST`] video ids.
    async fn list_videos_internal(&self, video_ids: &[String]) -> eyre::Result<VideoListResponse> {
        let ids = video_ids.join(",");
        let query_params = [("part", "id,statistics,contentDetails"), ("id", ids.as_str())];
        let videos: VideoListResponse = self.get_json("videos", &query_params).await?;

        tracing::debug!(
            requested = video_ids.len(),
            returned_items = videos.items.len(),
            "fetched video statistics"
        );

        Ok(videos)
    }

    /// Returns a paginated stream of the channels that `channel_id` is subscribed to.
    fn subscription_pages<'a>(
        &'a self,
        channel_id: &'a str,
    ) -> impl Stream<Item = eyre::Result<VecDeque<Subscription>>> + Send + 'a {
        PageStream::new(move |page_token| async move {
            let response = self
                .list_subscriptions_internal(channel_id, page_token)
                .await?;
            Ok((response.items, response.next_page_token))
        })
    }
}

impl YouTubeApi for YouTubeClient {
    /// Uses `channels.list` with `mine=true`.
    ///
    /// See: <https://developers.google.com/youtube/v3/docs/channels/list>
    #[instrument(skip(self))]
    async fn get_account_info(&self) -> eyre::Result<AccountInfo> {
        let query_params = [("part", "id,snippet,contentDetails"), ("mine", "true")];
        let response: ChannelListResponse = self.get_json("channels", &query_params).await?;
        let channel = response
            .items
            .into_iter()
            .next()
            .ok_or_else(|| eyre::eyre!("the authenticated account has no channel"))?;
        channel.into_account_info()
    }

    #[instrument(skip(self))]
    async fn get_channel_info(&self, channel_id: &str) -> eyre::Result<ChannelInfo> {
        let response = self
            .list_channels_internal("id,snippet,contentDetails", &[channel_id.to_string()])
            .await?;
        response
            .items
            .into_iter()
            .next()
            .ok_or_else(|| eyre::eyre!("channel not found: {}", channel_id))?
            .into_channel_info()
    }

    #[instrument(skip(self))]
    async fn get_playlist_info(&self, playlist_id: &str) -> eyre::Result<PlaylistInfo> {
        let response = self
            .list_playlists_internal(&[playlist_id.to_string()])
            .await?;
        response
            .items
            .into_iter()
            .next()
            .map(PlaylistInfo::from)
            .ok_or_else(|| eyre::eyre!("playlist not found: {}", playlist_id))
    }

    #[instrument(skip(self, playlist_ids), fields(count = playlist_ids.len()))]
    async fn get_playlists(&self, playlist_ids: &[String]) -> eyre::Result<Vec<PlaylistInfo>> {
        let mut playlists = Vec::with_capacity(playlist_ids.len());
        for batch in playlist_ids.chunks(MAX_IDS_PER_REQUEST) {
            let response = self.list_playlists_internal(batch).await?;
            playlists.extend(response.items.into_iter().map(PlaylistInfo::from));
        }
        Ok(playlists)
    }

    #[instrument(skip(self))]
    async fn get_subscribed_channels(
        &self,
        channel_id: &str,
    ) -> eyre::Result<Vec<SubscribedChannel>> {
        let mut channels = Vec::new();
        let mut pages = std::pin::pin!(self.subscription_pages(channel_id));
        while let Some(page) = pages.next().await {
            let page = page.context("fetch subscriptions page")?;
            channels.extend(
                page.into_iter()
                    .filter_map(Subscription::into_subscribed_channel),
            );
        }
        Ok(channels)
    }

    #[instrument(skip(self, channel_ids), fields(count = channel_ids.len()))]
    async fn get_uploads_playlist_ids(
        &self,
        channel_ids: &[String],
    ) -> eyre::Result<Vec<UploadsPlaylistId>> {
        let mut uploads = Vec::with_capacity(channel_ids.len());
        for batch in channel_ids.chunks(MAX_IDS_PER_REQUEST) {
            let response = self.list_channels_internal("id,contentDetails", batch).await?;
            uploads.extend(response.items.iter().filter_map(Channel::uploads_playlist_id));
        }
        Ok(uploads)
    }

    fn playlist_video_pages<'a>(
        &'a self,
        playlist_id: &'a str,
    ) -> impl Stream<Item = eyre::Result<VecDeque<PlaylistVideo>>> + Send + 'a {
        let span = tracing::info_span!("playlist_video_pages", playlist_id);
        PageStream::new(move |page_token| {
            async move {
                let response = self
                    .list_playlist_items_internal(playlist_id, page_token)
                    .await?;
                let videos = response
                    .items
                    .into_iter()
                    .filter_map(PlaylistItem::into_playlist_video)
                    .collect::<VecDeque<_>>();
                Ok((videos, response.next_page_token))
            }
            .instrument(span.clone())
        })
    }

    #[instrument(skip(self, video_ids), fields(count = video_ids.len()))]
    async fn get_videos_metadata(&self, video_ids: &[String]) -> eyre::Result<Vec<VideoMetadata>> {
        let mut metadata = Vec::with_capacity(video_ids.len());
        for batch in video_ids.chunks(MAX_IDS_PER_REQUEST) {
            let response = self.list_videos_internal(batch).await?;
            for video in response.items {
                let video_id = video.id.clone();
                match video.into_metadata() {
                    Ok(video) => metadata.push(video),
                    Err(e) => {
                        tracing::warn!(
                            video_id = %video_id,
                            error = %e,
                            "skipping video with unusable statistics"
                        );
                    }
                }
            }
        }
        Ok(metadata)
    }
}
