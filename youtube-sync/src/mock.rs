//! In-memory stand-ins for YouTube and the signed-in identity.
//!
//! [`FakeYouTube`] serves canned records and counts every call it receives, so tests can
//! assert not only on results but on how many lookups an operation needed. Its playlist
//! listings are served through the real [`PageStream`], one counted fetch per page.

use crate::identity::IdentityResolver;
use crate::records::Thumbnails;
use crate::youtube_api::types::PageStream;
use crate::youtube_api::{
    AccountInfo, ChannelInfo, PlaylistInfo, PlaylistVideo, SubscribedChannel, UploadsPlaylistId,
    VideoMetadata, YouTubeApi,
};
use jiff::Timestamp;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio_stream::Stream;

pub fn playlist_info(id: &str, channel_id: &str, title: &str, video_count: u64) -> PlaylistInfo {
    PlaylistInfo {
        id: id.to_string(),
        channel_id: channel_id.to_string(),
        title: title.to_string(),
        description: format!("{title} description"),
        video_count,
        thumbnails: Thumbnails::from([(
            "default".to_string(),
            format!("https://i.ytimg.com/pl/{id}/default.jpg"),
        )]),
    }
}

pub fn playlist_video(id: &str, channel_id: &str) -> PlaylistVideo {
    PlaylistVideo {
        id: id.to_string(),
        title: format!("video {id}"),
        description: String::new(),
        published_at: Timestamp::from_second(1_700_000_000).expect("valid timestamp"),
        thumbnails: Thumbnails::new(),
        channel_id: channel_id.to_string(),
    }
}

#[derive(Debug, Default)]
pub struct FakeYouTube {
    account: Option<AccountInfo>,
    channels: HashMap<String, ChannelInfo>,
    playlists: HashMap<String, PlaylistInfo>,
    subscriptions: HashMap<String, Vec<SubscribedChannel>>,
    playlist_pages: HashMap<String, Vec<Vec<PlaylistVideo>>>,
    metadata: HashMap<String, VideoMetadata>,
    calls: Mutex<HashMap<&'static str, usize>>,
}

impl FakeYouTube {
    /// A YouTube where account `1234` owns channel `UCme` with playlists `UUme`, `HL`, `WL`.
    pub fn with_account() -> Self {
        let mut api = Self {
            account: Some(AccountInfo {
                id: "UCme".to_string(),
                title: "Me".to_string(),
                watch_history_playlist_id: Some("HL".to_string()),
                watch_later_playlist_id: Some("WL".to_string()),
            }),
            ..Self::default()
        };
        api.add_channel("UCme", "Me", "UUme");
        api.add_playlist(playlist_info("HL", "UCme", "History", 30));
        api.add_playlist(playlist_info("WL", "UCme", "Watch later", 3));
        api
    }

    /// Adds a channel along with its uploads playlist.
    pub fn add_channel(&mut self, id: &str, title: &str, uploads_playlist_id: &str) {
        self.channels.insert(
            id.to_string(),
            ChannelInfo {
                id: id.to_string(),
                title: title.to_string(),
                thumbnails: Thumbnails::from([(
                    "default".to_string(),
                    format!("https://yt3.ggpht.com/{id}"),
                )]),
                uploads_playlist_id: uploads_playlist_id.to_string(),
            },
        );
        self.add_playlist(playlist_info(
            uploads_playlist_id,
            id,
            &format!("Uploads from {title}"),
            10,
        ));
    }

    /// Makes lookups of `alias` answer with channel `id`, which must already exist.
    pub fn alias_channel(&mut self, alias: &str, id: &str) {
        let channel = self.channels[id].clone();
        self.channels.insert(alias.to_string(), channel);
    }

    pub fn add_playlist(&mut self, playlist: PlaylistInfo) {
        self.playlists.insert(playlist.id.clone(), playlist);
    }

    pub fn playlist_mut(&mut self, id: &str) -> &mut PlaylistInfo {
        self.playlists.get_mut(id).expect("playlist exists")
    }

    pub fn remove_playlist(&mut self, id: &str) {
        self.playlists.remove(id);
    }

    pub fn remove_channel(&mut self, id: &str) {
        self.channels.remove(id);
    }

    /// Makes `subscriber` follow each of `channel_ids`, which must already exist.
    pub fn follow(&mut self, subscriber: &str, channel_ids: &[&str]) {
        let followed = channel_ids.iter().map(|id| {
            let channel = &self.channels[*id];
            SubscribedChannel {
                id: channel.id.clone(),
                title: channel.title.clone(),
                thumbnails: channel.thumbnails.clone(),
            }
        });
        let followed: Vec<_> = followed.collect();
        self.subscriptions
            .entry(subscriber.to_string())
            .or_default()
            .extend(followed);
    }

    pub fn set_pages(&mut self, playlist_id: &str, pages: Vec<Vec<PlaylistVideo>>) {
        self.playlist_pages.insert(playlist_id.to_string(), pages);
    }

    pub fn set_metadata(&mut self, video_id: &str, view_count: i64, duration: i64) {
        self.metadata.insert(
            video_id.to_string(),
            VideoMetadata {
                id: video_id.to_string(),
                view_count,
                duration,
            },
        );
    }

    /// How often the named call (or `"playlist_page"` for page fetches) was made.
    pub fn calls(&self, call: &str) -> usize {
        self.calls.lock().unwrap().get(call).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    fn record(&self, call: &'static str) {
        *self.calls.lock().unwrap().entry(call).or_default() += 1;
    }
}

impl YouTubeApi for FakeYouTube {
    async fn get_account_info(&self) -> eyre::Result<AccountInfo> {
        self.record("get_account_info");
        self.account
            .clone()
            .ok_or_else(|| eyre::eyre!("the authenticated account has no channel"))
    }

    async fn get_channel_info(&self, channel_id: &str) -> eyre::Result<ChannelInfo> {
        self.record("get_channel_info");
        self.channels
            .get(channel_id)
            .cloned()
            .ok_or_else(|| eyre::eyre!("channel not found: {}", channel_id))
    }

    async fn get_playlist_info(&self, playlist_id: &str) -> eyre::Result<PlaylistInfo> {
        self.record("get_playlist_info");
        self.playlists
            .get(playlist_id)
            .cloned()
            .ok_or_else(|| eyre::eyre!("playlist not found: {}", playlist_id))
    }

    async fn get_playlists(&self, playlist_ids: &[String]) -> eyre::Result<Vec<PlaylistInfo>> {
        self.record("get_playlists");
        Ok(playlist_ids
            .iter()
            .filter_map(|id| self.playlists.get(id).cloned())
            .collect())
    }

    async fn get_subscribed_channels(
        &self,
        channel_id: &str,
    ) -> eyre::Result<Vec<SubscribedChannel>> {
        self.record("get_subscribed_channels");
        Ok(self
            .subscriptions
            .get(channel_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_uploads_playlist_ids(
        &self,
        channel_ids: &[String],
    ) -> eyre::Result<Vec<UploadsPlaylistId>> {
        self.record("get_uploads_playlist_ids");
        Ok(channel_ids
            .iter()
            .filter_map(|id| self.channels.get(id))
            .map(|channel| UploadsPlaylistId {
                channel_id: channel.id.clone(),
                uploads_playlist_id: channel.uploads_playlist_id.clone(),
            })
            .collect())
    }

    fn playlist_video_pages<'a>(
        &'a self,
        playlist_id: &'a str,
    ) -> impl Stream<Item = eyre::Result<VecDeque<PlaylistVideo>>> + Send + 'a {
        PageStream::new(move |page_token: Option<String>| async move {
            self.record("playlist_page");
            let pages = self
                .playlist_pages
                .get(playlist_id)
                .ok_or_else(|| eyre::eyre!("playlist not found: {}", playlist_id))?;
            let index = match page_token {
                Some(token) => token.parse::<usize>()?,
                None => 0,
            };
            let page = pages.get(index).cloned().unwrap_or_default();
            let next = (index + 1 < pages.len()).then(|| (index + 1).to_string());
            Ok::<_, eyre::Report>((VecDeque::from(page), next))
        })
    }

    async fn get_videos_metadata(&self, video_ids: &[String]) -> eyre::Result<Vec<VideoMetadata>> {
        self.record("get_videos_metadata");
        Ok(video_ids
            .iter()
            .filter_map(|id| self.metadata.get(id).cloned())
            .collect())
    }
}

#[derive(Debug, Default)]
pub struct FakeIdentity {
    active: Option<String>,
    fail: bool,
    lookups: AtomicUsize,
}

impl FakeIdentity {
    pub fn new(active: Option<&str>) -> Self {
        Self {
            active: active.map(String::from),
            ..Self::default()
        }
    }

    /// An identity subsystem that reports an error on every lookup.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl IdentityResolver for FakeIdentity {
    async fn active_account_id(&self) -> eyre::Result<Option<String>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            eyre::bail!("identity permission was not granted");
        }
        Ok(self.active.clone())
    }
}
