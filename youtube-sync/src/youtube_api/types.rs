//! Shared wire types and paging infrastructure for the YouTube API client.

use crate::records::Thumbnails;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context as TaskContext, Poll};
use tokio_stream::Stream;

type OneFuturePage<'a, F, T> =
    Pin<Box<dyn Future<Output = eyre::Result<(F, (VecDeque<T>, Option<String>))>> + 'a + Send>>;

/// A stream of result pages from a YouTube API list endpoint.
///
/// Each item is one full page. The request for the following page is only issued when the
/// stream is polled again, so a consumer that stops polling after some page never causes the
/// next one to be fetched. Only supports forward pagination.
pub struct PageStream<'a, T, F> {
    /// Future representing the currently pending API request, if any
    pending_request: Option<OneFuturePage<'a, F, T>>,
    /// Whether we've reached the end of all available data
    is_done: bool,
}

impl<'a, T, F> PageStream<'a, T, F> {
    /// Create a new PageStream that will fetch the first page when first polled.
    ///
    /// `fetcher` is given the page token of the page to fetch (`None` for the first page) and
    /// resolves to that page's items along with the token for the page after it.
    pub fn new<Fut>(fetcher: F) -> Self
    where
        F: Fn(Option<String>) -> Fut,
        F: Send + 'a,
        Fut: Future<Output = eyre::Result<(VecDeque<T>, Option<String>)>> + Send + 'a,
    {
        let first_page = async move {
            let results = fetcher(None).await?;
            Ok((fetcher, results))
        };
        Self {
            pending_request: Some(Box::pin(first_page)),
            is_done: false,
        }
    }
}

impl<'a, T, F> Unpin for PageStream<'a, T, F> {}

impl<'a, T, F, Fut> Stream for PageStream<'a, T, F>
where
    F: Fn(Option<String>) -> Fut,
    F: Send + 'a,
    Fut: Future<Output = eyre::Result<(VecDeque<T>, Option<String>)>> + Send + 'a,
{
    type Item = eyre::Result<VecDeque<T>>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<Option<Self::Item>> {
        if self.is_done {
            return Poll::Ready(None);
        }

        let Some(pending) = self.pending_request.as_mut() else {
            self.is_done = true;
            return Poll::Ready(None);
        };

        match pending.as_mut().poll(cx) {
            Poll::Ready(Ok((fetcher, (items, next_token)))) => {
                if let Some(next_token) = next_token {
                    // Set up the future for the next page, but leave it unpolled until the
                    // consumer asks for another page.
                    self.pending_request = Some(Box::pin(async move {
                        let results = fetcher(Some(next_token)).await?;
                        Ok((fetcher, results))
                    }));
                } else {
                    self.is_done = true;
                    self.pending_request = None;
                }
                Poll::Ready(Some(Ok(items)))
            }
            Poll::Ready(Err(e)) => {
                self.pending_request = None;
                self.is_done = true;
                Poll::Ready(Some(Err(e)))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Paging details for lists of resources.
///
/// See: <https://developers.google.com/youtube/v3/docs/pageInfo>
#[derive(Debug, Serialize, Deserialize)]
pub struct PageInfo {
    /// The total number of results in the result set.
    #[serde(rename = "totalResults")]
    pub total_results: u32,
    /// The number of results included in the API response.
    #[serde(rename = "resultsPerPage")]
    pub results_per_page: u32,
}

/// Identifies the resource that a subscription or playlist item refers to.
///
/// Which of the ID fields is present depends on `kind`.
///
/// See: <https://developers.google.com/youtube/v3/docs/playlistItems#snippet.resourceId>
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceId {
    /// The type of the referenced resource, such as `youtube#video` or `youtube#channel`.
    pub kind: String,
    #[serde(rename = "videoId", skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    #[serde(rename = "channelId", skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
}

/// A single thumbnail image associated with a resource.
///
/// See: <https://developers.google.com/youtube/v3/docs/thumbnails>
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Thumbnails keyed by size label (`default`, `medium`, `high`, `standard`, `maxres`).
pub type ThumbnailDetails = BTreeMap<String, Thumbnail>;

/// Flattens thumbnail details into the label-to-URL mapping stored on records.
pub fn thumbnail_urls(details: ThumbnailDetails) -> Thumbnails {
    details
        .into_iter()
        .map(|(label, thumbnail)| (label, thumbnail.url))
        .collect()
}
