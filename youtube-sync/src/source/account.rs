use super::DataSource;
use crate::error::AccountError;
use crate::identity::IdentityResolver;
use crate::records::{self, Account, Playlist};
use crate::youtube_api::YouTubeApi;
use eyre::Context;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;

impl<A, I> DataSource<A, I>
where
    A: YouTubeApi,
    I: IdentityResolver,
{
    /// Resolves the account that is signed in right now.
    ///
    /// Fails with [`AccountError::NoActiveAccount`] if nobody is signed in.
    #[instrument(skip(self))]
    pub async fn resolve_current_account(&self) -> eyre::Result<Account> {
        let Some(account_id) = self.identity.active_account_id().await? else {
            return Err(AccountError::NoActiveAccount.into());
        };
        self.resolve_account(&account_id).await
    }

    /// Builds the full record for `account_id`, which must be the signed-in account.
    ///
    /// The identity is re-checked first, so an account switch in the environment between
    /// choosing `account_id` and calling this fails with [`AccountError::AccountMismatch`]
    /// before anything is requested from YouTube.
    #[instrument(skip(self))]
    pub async fn resolve_account(&self, account_id: &str) -> eyre::Result<Account> {
        let active = self.identity.active_account_id().await?;
        if active.as_deref() != Some(account_id) {
            return Err(AccountError::AccountMismatch {
                requested: account_id.to_string(),
                active,
            }
            .into());
        }

        let account_info = self
            .api
            .get_account_info()
            .await
            .context("fetch account info")?;
        let channel_info = self
            .api
            .get_channel_info(&account_info.id)
            .await
            .context("fetch account channel")?;

        let wanted: Vec<String> = [
            Some(&channel_info.uploads_playlist_id),
            account_info.watch_history_playlist_id.as_ref(),
            account_info.watch_later_playlist_id.as_ref(),
        ]
        .into_iter()
        .flatten()
        .cloned()
        .collect();
        let mut playlists: HashMap<String, Arc<Playlist>> = self
            .api
            .get_playlists(&wanted)
            .await
            .context("fetch account playlists")?
            .into_iter()
            .map(|info| (info.id.clone(), Arc::new(records::build_playlist(info))))
            .collect();

        let mut take = |id: Option<&String>| {
            let playlist = id.and_then(|id| playlists.remove(id));
            if playlist.is_none() && id.is_some() {
                tracing::warn!(playlist_id = ?id, "account playlist not returned by YouTube");
            }
            playlist
        };
        let uploads = take(Some(&channel_info.uploads_playlist_id));
        let watch_history = take(account_info.watch_history_playlist_id.as_ref());
        let watch_later = take(account_info.watch_later_playlist_id.as_ref());

        tracing::debug!(
            account_id,
            channel_id = %channel_info.id,
            "resolved account"
        );

        let channel = records::build_channel(channel_info, uploads);
        Ok(records::build_account(
            account_id,
            account_info,
            channel,
            watch_history,
            watch_later,
        ))
    }
}
