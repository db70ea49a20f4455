//! YouTube Subscriptions API types.

use crate::youtube_api::SubscribedChannel;
use crate::youtube_api::types::{PageInfo, ResourceId, ThumbnailDetails, thumbnail_urls};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Response structure for the `subscriptions.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/subscriptions/list>
#[derive(Debug, Serialize, Deserialize)]
pub struct SubscriptionListResponse {
    /// The value will be `youtube#subscriptionListResponse`.
    pub kind: String,
    #[serde(default)]
    pub items: VecDeque<Subscription>,
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

/// A `subscription` resource records that a user follows a channel.
///
/// See: <https://developers.google.com/youtube/v3/docs/subscriptions#resource>
#[derive(Debug, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub snippet: SubscriptionSnippet,
}

/// See: <https://developers.google.com/youtube/v3/docs/subscriptions#snippet>
#[derive(Debug, Serialize, Deserialize)]
pub struct SubscriptionSnippet {
    /// The title of the subscribed channel.
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// The channel being subscribed to.
    #[serde(rename = "resourceId")]
    pub resource_id: ResourceId,
    #[serde(default)]
    pub thumbnails: ThumbnailDetails,
}

impl Subscription {
    /// Describes the subscribed channel, or `None` if the subscription is not to a channel.
    pub fn into_subscribed_channel(self) -> Option<SubscribedChannel> {
        Some(SubscribedChannel {
            id: self.snippet.resource_id.channel_id?,
            title: self.snippet.title,
            thumbnails: thumbnail_urls(self.snippet.thumbnails),
        })
    }
}
