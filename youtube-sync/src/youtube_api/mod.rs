//! Remote lookups against the YouTube Data API v3.
//!
//! The sync engine only ever talks to YouTube through the [`YouTubeApi`] trait, which
//! returns the flattened records defined here. [`client::YouTubeClient`] is the HTTP
//! implementation; the wire formats it parses live in the per-endpoint modules.

use crate::records::Thumbnails;
use jiff::Timestamp;
use std::collections::VecDeque;
use std::future::Future;
use tokio_stream::Stream;

pub mod channels;
pub mod client;
pub mod playlist_items;
pub mod playlists;
pub mod subscriptions;
pub mod types;
pub mod videos;

/// The YouTube API accepts at most this many comma-separated ids per list request.
pub const MAX_IDS_PER_REQUEST: usize = 50;

/// The channel owned by the authenticated user, along with its special playlists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountInfo {
    /// The ID of the channel owned by the account.
    pub id: String,
    pub title: String,
    pub watch_history_playlist_id: Option<String>,
    pub watch_later_playlist_id: Option<String>,
}

/// Basic details about a channel, including where its uploads are listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    pub id: String,
    pub title: String,
    pub thumbnails: Thumbnails,
    pub uploads_playlist_id: String,
}

/// Playlist metadata as reported by `playlists.list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistInfo {
    pub id: String,
    /// The channel that owns the playlist.
    pub channel_id: String,
    pub title: String,
    pub description: String,
    pub video_count: u64,
    pub thumbnails: Thumbnails,
}

/// A channel the account has subscribed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscribedChannel {
    pub id: String,
    pub title: String,
    pub thumbnails: Thumbnails,
}

/// Maps a channel to the ID of its uploads playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadsPlaylistId {
    pub channel_id: String,
    pub uploads_playlist_id: String,
}

/// One entry of a playlist, describing the video it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistVideo {
    pub id: String,
    pub title: String,
    pub description: String,
    pub published_at: Timestamp,
    pub thumbnails: Thumbnails,
    /// The channel that uploaded the video (not necessarily the playlist owner).
    pub channel_id: String,
}

/// The frequently changing parts of a video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoMetadata {
    pub id: String,
    pub view_count: i64,
    /// Length of the video in seconds.
    pub duration: i64,
}

/// Asynchronous lookups the sync engine needs from YouTube.
///
/// Batched lookups accept any number of ids; implementations are responsible for splitting
/// them into requests of at most [`MAX_IDS_PER_REQUEST`]. Ids that YouTube does not know
/// about are simply missing from the result.
pub trait YouTubeApi {
    /// Looks up the channel of the authenticated account.
    fn get_account_info(&self) -> impl Future<Output = eyre::Result<AccountInfo>> + Send;

    fn get_channel_info(
        &self,
        channel_id: &str,
    ) -> impl Future<Output = eyre::Result<ChannelInfo>> + Send;

    fn get_playlist_info(
        &self,
        playlist_id: &str,
    ) -> impl Future<Output = eyre::Result<PlaylistInfo>> + Send;

    fn get_playlists(
        &self,
        playlist_ids: &[String],
    ) -> impl Future<Output = eyre::Result<Vec<PlaylistInfo>>> + Send;

    /// Lists every channel that `channel_id` is subscribed to, across all result pages.
    fn get_subscribed_channels(
        &self,
        channel_id: &str,
    ) -> impl Future<Output = eyre::Result<Vec<SubscribedChannel>>> + Send;

    fn get_uploads_playlist_ids(
        &self,
        channel_ids: &[String],
    ) -> impl Future<Output = eyre::Result<Vec<UploadsPlaylistId>>> + Send;

    /// Returns the entries of a playlist one page at a time.
    ///
    /// The stream must be lazy: a page is only requested once the consumer polls for it, so
    /// that dropping the stream ends pagination early.
    fn playlist_video_pages<'a>(
        &'a self,
        playlist_id: &'a str,
    ) -> impl Stream<Item = eyre::Result<VecDeque<PlaylistVideo>>> + Send + 'a;

    fn get_videos_metadata(
        &self,
        video_ids: &[String],
    ) -> impl Future<Output = eyre::Result<Vec<VideoMetadata>>> + Send;
}
