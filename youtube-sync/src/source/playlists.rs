use super::DataSource;
use crate::records::Playlist;
use crate::youtube_api::{PlaylistInfo, YouTubeApi};
use eyre::Context;
use std::collections::HashMap;
use tracing::instrument;

/// Copies `fetched` onto `cached` if any tracked attribute differs.
///
/// Returns whether `cached` changed.
fn apply_playlist_update(cached: &mut Playlist, fetched: PlaylistInfo) -> bool {
    if cached.title == fetched.title
        && cached.description == fetched.description
        && cached.thumbnails == fetched.thumbnails
        && cached.video_count == fetched.video_count
    {
        return false;
    }
    cached.title = fetched.title;
    cached.description = fetched.description;
    cached.thumbnails = fetched.thumbnails;
    cached.video_count = fetched.video_count;
    true
}

impl<A, I> DataSource<A, I>
where
    A: YouTubeApi,
{
    /// Re-fetches `playlists` and brings the ones that changed upstream up to date.
    ///
    /// Returns the updated playlists in the order YouTube returned them. Playlists YouTube
    /// reports that are not in `playlists` are ignored.
    #[instrument(skip(self, playlists), fields(count = playlists.len()))]
    pub async fn fetch_playlist_updates<'p>(
        &self,
        playlists: &'p mut [Playlist],
    ) -> eyre::Result<Vec<&'p Playlist>> {
        let ids: Vec<String> = playlists.iter().map(|p| p.id.clone()).collect();
        let fetched = self
            .api
            .get_playlists(&ids)
            .await
            .context("fetch playlists")?;

        let index_by_id: HashMap<String, usize> = ids
            .into_iter()
            .enumerate()
            .map(|(index, id)| (id, index))
            .collect();

        let mut updated = Vec::new();
        for info in fetched {
            let Some(&index) = index_by_id.get(&info.id) else {
                tracing::debug!(playlist_id = %info.id, "skipping playlist that was not requested");
                continue;
            };
            if apply_playlist_update(&mut playlists[index], info) {
                updated.push(index);
            }
        }

        tracing::debug!(updated = updated.len(), "reconciled playlists");

        let playlists: &'p [Playlist] = playlists;
        Ok(updated.into_iter().map(|index| &playlists[index]).collect())
    }
}
