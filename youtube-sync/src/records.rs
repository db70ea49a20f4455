//! Canonical records handed to the subscription store, and the builders that shape YouTube
//! API results into them.
//!
//! Records that refer to the same playlist share it through an [`Arc`], so a channel's
//! uploads playlist and a subscription's playlist can be the very same record.

use crate::youtube_api::{AccountInfo, ChannelInfo, PlaylistInfo, PlaylistVideo, SubscribedChannel};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Thumbnail URLs keyed by size label.
pub type Thumbnails = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: String,
    pub title: String,
    pub description: String,
    pub video_count: u64,
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: String,
    pub title: String,
    pub thumbnails: Thumbnails,
    pub uploads_playlist: Option<Arc<Playlist>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountState {
    Active,
    /// The account's authorization was revoked or has expired.
    Unauthorized,
    /// The account was disabled by the user.
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub channel: Channel,
    pub title: String,
    pub state: AccountState,
    pub last_error: Option<String>,
    pub watch_history_playlist: Option<Arc<Playlist>>,
    pub watch_later_playlist: Option<Arc<Playlist>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionType {
    Channel,
    Playlist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionState {
    Active,
    /// The subscribed channel or playlist no longer exists upstream.
    Unavailable,
}

/// A followed channel or playlist.
///
/// Subscriptions without an owning account are *incognito*: they were created ad hoc rather
/// than discovered from an account's subscriptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Assigned by the store once the subscription is persisted.
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub subscription_type: SubscriptionType,
    pub playlist: Option<Arc<Playlist>>,
    pub channel: Channel,
    pub state: SubscriptionState,
    pub last_error: Option<String>,
    pub account: Option<Arc<Account>>,
}

impl Subscription {
    pub fn is_incognito(&self) -> bool {
        self.account.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub title: String,
    pub description: String,
    pub published_at: Timestamp,
    pub thumbnails: Thumbnails,
    /// Length in seconds, or [`Video::UNFETCHED`].
    pub duration: i64,
    /// Number of views, or [`Video::UNFETCHED`].
    pub view_count: i64,
    pub channel: Channel,
    pub watched: bool,
    pub last_update: Timestamp,
}

impl Video {
    /// Marks a duration or view count that has not been fetched yet.
    pub const UNFETCHED: i64 = -1;
}

pub fn build_playlist(info: PlaylistInfo) -> Playlist {
    Playlist {
        id: info.id,
        title: info.title,
        description: info.description,
        video_count: info.video_count,
        thumbnails: info.thumbnails,
    }
}

pub fn build_channel(info: ChannelInfo, uploads_playlist: Option<Arc<Playlist>>) -> Channel {
    Channel {
        id: info.id,
        title: info.title,
        thumbnails: info.thumbnails,
        uploads_playlist,
    }
}

pub fn build_subscribed_channel(
    info: SubscribedChannel,
    uploads_playlist: Option<Arc<Playlist>>,
) -> Channel {
    Channel {
        id: info.id,
        title: info.title,
        thumbnails: info.thumbnails,
        uploads_playlist,
    }
}

/// Builds an active account record for `account_id`.
pub fn build_account(
    account_id: &str,
    info: AccountInfo,
    channel: Channel,
    watch_history_playlist: Option<Arc<Playlist>>,
    watch_later_playlist: Option<Arc<Playlist>>,
) -> Account {
    Account {
        id: account_id.to_string(),
        channel,
        title: info.title,
        state: AccountState::Active,
        last_error: None,
        watch_history_playlist,
        watch_later_playlist,
    }
}

/// Builds an active subscription to a channel that `account` follows.
///
/// The subscription's playlist is the channel's uploads playlist.
pub fn build_account_subscription(account: Arc<Account>, channel: Channel) -> Subscription {
    Subscription {
        id: None,
        subscription_type: SubscriptionType::Channel,
        playlist: channel.uploads_playlist.clone(),
        channel,
        state: SubscriptionState::Active,
        last_error: None,
        account: Some(account),
    }
}

/// Builds an incognito subscription to `channel`'s uploads.
pub fn build_incognito_channel_subscription(channel: Channel) -> Subscription {
    Subscription {
        id: None,
        subscription_type: SubscriptionType::Channel,
        playlist: channel.uploads_playlist.clone(),
        channel,
        state: SubscriptionState::Active,
        last_error: None,
        account: None,
    }
}

/// Builds an incognito subscription to `playlist`, which is owned by `channel`.
pub fn build_incognito_playlist_subscription(
    playlist: Arc<Playlist>,
    channel: Channel,
) -> Subscription {
    Subscription {
        id: None,
        subscription_type: SubscriptionType::Playlist,
        playlist: Some(playlist),
        channel,
        state: SubscriptionState::Active,
        last_error: None,
        account: None,
    }
}

/// Builds a freshly listed video whose statistics are still unknown.
///
/// `channel` is usually a placeholder until the uploader has been looked up.
pub fn build_video(item: PlaylistVideo, channel: Channel, fetched_at: Timestamp) -> Video {
    Video {
        id: item.id,
        title: item.title,
        description: item.description,
        published_at: item.published_at,
        thumbnails: item.thumbnails,
        duration: Video::UNFETCHED,
        view_count: Video::UNFETCHED,
        channel,
        watched: false,
        last_update: fetched_at,
    }
}

/// Builds the stand-in channel a video refers to before its uploader has been looked up.
///
/// Only the ID is known at that point; the uploads playlist is the playlist being listed.
pub(crate) fn placeholder_channel(channel_id: &str, listed_playlist: &Arc<Playlist>) -> Channel {
    Channel {
        id: channel_id.to_string(),
        title: String::new(),
        thumbnails: Thumbnails::new(),
        uploads_playlist: Some(Arc::clone(listed_playlist)),
    }
}
