use super::DataSource;
use crate::records::{self, Channel, Playlist, Video};
use crate::youtube_api::YouTubeApi;
use eyre::Context;
use indexmap::IndexMap;
use jiff::Timestamp;
use std::collections::HashMap;
use std::sync::Arc;
use tokio_stream::StreamExt;
use tracing::instrument;

impl<A, I> DataSource<A, I>
where
    A: YouTubeApi,
{
    /// Lists the videos of `playlist`, one page at a time, for as long as `should_continue`
    /// agrees.
    ///
    /// `should_continue` is called with each page's videos right after the page arrives, and
    /// returning `false` stops before the next page is requested. This lets callers cap how
    /// much they fetch, or stop once they reach a video they already know.
    ///
    /// The returned videos have unfetched duration and view count (see
    /// [`fetch_view_count_updates`](Self::fetch_view_count_updates)). Each uploader is looked
    /// up once no matter how many of the videos it uploaded, and the videos only refer to
    /// those looked-up channels. The videos passed to `should_continue` still refer to
    /// stand-in channels that only carry an ID.
    #[instrument(skip(self, playlist, should_continue), fields(playlist_id = %playlist.id))]
    pub async fn fetch_videos<F>(
        &self,
        playlist: &Arc<Playlist>,
        mut should_continue: F,
    ) -> eyre::Result<Vec<Video>>
    where
        F: FnMut(&[Video]) -> bool,
    {
        let fetched_at = Timestamp::now();
        let mut videos: Vec<Video> = Vec::new();
        let mut pages = std::pin::pin!(self.api.playlist_video_pages(&playlist.id));
        while let Some(page) = pages.next().await {
            let page = page.context("fetch playlist page")?;
            let page_start = videos.len();
            videos.extend(page.into_iter().map(|item| {
                let channel = records::placeholder_channel(&item.channel_id, playlist);
                records::build_video(item, channel, fetched_at)
            }));

            tracing::trace!(page_videos = videos.len() - page_start, "fetched page");
            if !should_continue(&videos[page_start..]) {
                break;
            }
        }

        // keyed by the id the videos refer to, not the id YouTube answers with
        let mut channels: HashMap<String, Channel> = HashMap::new();
        for video in &videos {
            if channels.contains_key(&video.channel.id) {
                continue;
            }
            let channel = self.resolve_uploader(&video.channel.id, playlist).await?;
            channels.insert(video.channel.id.clone(), channel);
        }

        for video in &mut videos {
            if let Some(channel) = channels.get(&video.channel.id) {
                video.channel = channel.clone();
            }
        }

        tracing::debug!(
            videos = videos.len(),
            channels = channels.len(),
            "fetched playlist videos"
        );

        Ok(videos)
    }

    /// Looks up a channel, reusing `listed` if it is the channel's uploads playlist.
    async fn resolve_uploader(
        &self,
        channel_id: &str,
        listed: &Arc<Playlist>,
    ) -> eyre::Result<Channel> {
        let info = self
            .api
            .get_channel_info(channel_id)
            .await
            .with_context(|| format!("fetch uploader channel {channel_id}"))?;
        let uploads = if info.uploads_playlist_id == listed.id {
            Arc::clone(listed)
        } else {
            let uploads = self
                .api
                .get_playlist_info(&info.uploads_playlist_id)
                .await
                .with_context(|| format!("fetch uploads playlist of {channel_id}"))?;
            Arc::new(records::build_playlist(uploads))
        };
        Ok(records::build_channel(info, Some(uploads)))
    }

    /// Refreshes the view count and duration of `videos`.
    ///
    /// Returns the videos for which either value changed, in the order YouTube returned them.
    /// Videos YouTube no longer knows about are left untouched.
    #[instrument(skip(self, videos), fields(count = videos.len()))]
    pub async fn fetch_view_count_updates<'v>(
        &self,
        videos: &'v mut [Video],
    ) -> eyre::Result<Vec<&'v Video>> {
        // the last of several videos with the same id is the one that gets updated
        let mut index_by_id: IndexMap<String, usize> = IndexMap::new();
        for (index, video) in videos.iter().enumerate() {
            index_by_id.insert(video.id.clone(), index);
        }

        let ids: Vec<String> = index_by_id.keys().cloned().collect();
        let metadata = self
            .api
            .get_videos_metadata(&ids)
            .await
            .context("fetch video statistics")?;

        let mut updated = Vec::new();
        for stats in metadata {
            let Some(&index) = index_by_id.get(&stats.id) else {
                tracing::debug!(video_id = %stats.id, "skipping statistics for unknown video");
                continue;
            };
            let video = &mut videos[index];
            if video.view_count == stats.view_count && video.duration == stats.duration {
                continue;
            }
            video.view_count = stats.view_count;
            video.duration = stats.duration;
            updated.push(index);
        }

        tracing::debug!(updated = updated.len(), "reconciled view counts");

        let videos: &'v [Video] = videos;
        Ok(updated.into_iter().map(|index| &videos[index]).collect())
    }
}
