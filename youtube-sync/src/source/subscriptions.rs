use super::DataSource;
use crate::identity::IdentityResolver;
use crate::records::{self, Account, Playlist, Subscription};
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
    /// Discovers the channels `account` is subscribed to.
    ///
    /// Returns one channel subscription per followed channel, in the order YouTube lists them.
    /// A channel whose uploads playlist could not be looked up still gets a subscription, just
    /// without a playlist; it is up to the caller to retry those later.
    #[instrument(skip(self, account), fields(account_id = %account.id))]
    pub async fn fetch_subscriptions(&self, account: &Arc<Account>) -> eyre::Result<Vec<Subscription>> {
        let followed = self
            .api
            .get_subscribed_channels(&account.channel.id)
            .await
            .context("fetch subscribed channels")?;

        let channel_ids: Vec<String> = followed.iter().map(|c| c.id.clone()).collect();
        let uploads_ids = self
            .api
            .get_uploads_playlist_ids(&channel_ids)
            .await
            .context("fetch uploads playlist ids")?;
        let playlist_ids: Vec<String> = uploads_ids
            .into_iter()
            .map(|u| u.uploads_playlist_id)
            .collect();

        // keyed by owning channel
        let mut uploads: HashMap<String, Arc<Playlist>> = HashMap::new();
        for info in self
            .api
            .get_playlists(&playlist_ids)
            .await
            .context("fetch uploads playlists")?
        {
            uploads.insert(info.channel_id.clone(), Arc::new(records::build_playlist(info)));
        }

        let subscriptions: Vec<Subscription> = followed
            .into_iter()
            .map(|info| {
                let playlist = uploads.get(&info.id).cloned();
                if playlist.is_none() {
                    tracing::warn!(channel_id = %info.id, "no uploads playlist for subscribed channel");
                }
                let channel = records::build_subscribed_channel(info, playlist);
                records::build_account_subscription(Arc::clone(account), channel)
            })
            .collect();

        tracing::debug!(
            subscriptions = subscriptions.len(),
            with_playlist = subscriptions.iter().filter(|s| s.playlist.is_some()).count(),
            "fetched subscriptions"
        );

        Ok(subscriptions)
    }

    /// Builds an incognito subscription to the uploads of channel `channel_id`.
    #[instrument(skip(self))]
    pub async fn resolve_incognito_channel_subscription(
        &self,
        channel_id: &str,
    ) -> eyre::Result<Subscription> {
        let channel_info = self
            .api
            .get_channel_info(channel_id)
            .await
            .context("fetch channel info")?;
        let uploads = self
            .api
            .get_playlist_info(&channel_info.uploads_playlist_id)
            .await
            .context("fetch uploads playlist")?;

        let channel = records::build_channel(
            channel_info,
            Some(Arc::new(records::build_playlist(uploads))),
        );
        Ok(records::build_incognito_channel_subscription(channel))
    }

    /// Builds an incognito subscription to playlist `playlist_id`.
    ///
    /// When the playlist is its owner's uploads playlist, the subscription's playlist and the
    /// channel's uploads playlist are the same record and it is only fetched once.
    #[instrument(skip(self))]
    pub async fn resolve_incognito_playlist_subscription(
        &self,
        playlist_id: &str,
    ) -> eyre::Result<Subscription> {
        let playlist_info = self
            .api
            .get_playlist_info(playlist_id)
            .await
            .context("fetch playlist info")?;
        let channel_info = self
            .api
            .get_channel_info(&playlist_info.channel_id)
            .await
            .context("fetch playlist owner")?;
        let playlist = Arc::new(records::build_playlist(playlist_info));

        let uploads = if channel_info.uploads_playlist_id == playlist.id {
            Arc::clone(&playlist)
        } else {
            let info = self
                .api
                .get_playlist_info(&channel_info.uploads_playlist_id)
                .await
                .context("fetch owner's uploads playlist")?;
            Arc::new(records::build_playlist(info))
        };

        let channel = records::build_channel(channel_info, Some(uploads));
        Ok(records::build_incognito_playlist_subscription(playlist, channel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{FakeIdentity, FakeYouTube, playlist_info};
    use crate::records::{SubscriptionState, SubscriptionType};
    use pretty_assertions::assert_eq;

    fn api() -> FakeYouTube {
        let mut api = FakeYouTube::with_account();
        api.add_channel("UCzeta", "Zeta", "UUzeta");
        api.add_channel("UCalpha", "Alpha", "UUalpha");
        api.add_channel("UCmid", "Mid", "UUmid");
        api.add_playlist(playlist_info("PLmix", "UCalpha", "Alpha's mix", 4));
        api
    }

    async fn account(source: &DataSource<FakeYouTube, FakeIdentity>) -> Arc<Account> {
        Arc::new(source.resolve_account("1234").await.unwrap())
    }

    #[tokio::test]
    async fn subscriptions_follow_youtube_order() {
        let mut api = api();
        api.follow("UCme", &["UCzeta", "UCalpha", "UCmid"]);
        let source = DataSource::new(api, FakeIdentity::new(Some("1234")));
        let account = account(&source).await;

        let subscriptions = source.fetch_subscriptions(&account).await.unwrap();
        let ids: Vec<_> = subscriptions.iter().map(|s| s.channel.id.as_str()).collect();
        assert_eq!(ids, ["UCzeta", "UCalpha", "UCmid"]);

        for subscription in &subscriptions {
            assert_eq!(subscription.subscription_type, SubscriptionType::Channel);
            assert_eq!(subscription.state, SubscriptionState::Active);
            assert_eq!(subscription.id, None);
            assert!(!subscription.is_incognito());
            assert!(Arc::ptr_eq(subscription.account.as_ref().unwrap(), &account));

            let playlist = subscription.playlist.as_ref().unwrap();
            let uploads = subscription.channel.uploads_playlist.as_ref().unwrap();
            assert!(Arc::ptr_eq(playlist, uploads));
        }
        assert_eq!(subscriptions[1].playlist.as_ref().unwrap().id, "UUalpha");
        assert_eq!(subscriptions[1].channel.title, "Alpha");
    }

    #[tokio::test]
    async fn missing_uploads_playlist_degrades_to_absent() {
        let mut api = api();
        api.follow("UCme", &["UCzeta", "UCalpha"]);
        api.remove_playlist("UUzeta");
        let source = DataSource::new(api, FakeIdentity::new(Some("1234")));
        let account = account(&source).await;

        let subscriptions = source.fetch_subscriptions(&account).await.unwrap();
        assert_eq!(subscriptions.len(), 2);
        assert_eq!(subscriptions[0].playlist, None);
        assert_eq!(subscriptions[0].channel.uploads_playlist, None);
        assert_eq!(subscriptions[1].playlist.as_ref().unwrap().id, "UUalpha");
    }

    #[tokio::test]
    async fn no_subscriptions() {
        let source = DataSource::new(api(), FakeIdentity::new(Some("1234")));
        let account = account(&source).await;
        assert!(source.fetch_subscriptions(&account).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn incognito_channel_subscription() {
        let source = DataSource::new(api(), FakeIdentity::new(None));
        let subscription = source
            .resolve_incognito_channel_subscription("UCalpha")
            .await
            .unwrap();

        assert!(subscription.is_incognito());
        assert_eq!(subscription.subscription_type, SubscriptionType::Channel);
        assert_eq!(subscription.channel.id, "UCalpha");
        let playlist = subscription.playlist.as_ref().unwrap();
        assert_eq!(playlist.id, "UUalpha");
        assert!(Arc::ptr_eq(
            playlist,
            subscription.channel.uploads_playlist.as_ref().unwrap()
        ));
        // does not depend on who is signed in
        assert_eq!(source.identity.lookups(), 0);
    }

    #[tokio::test]
    async fn incognito_uploads_playlist_is_fetched_once() {
        let source = DataSource::new(api(), FakeIdentity::new(None));
        let subscription = source
            .resolve_incognito_playlist_subscription("UUalpha")
            .await
            .unwrap();

        assert!(subscription.is_incognito());
        assert_eq!(subscription.subscription_type, SubscriptionType::Playlist);
        let playlist = subscription.playlist.as_ref().unwrap();
        let uploads = subscription.channel.uploads_playlist.as_ref().unwrap();
        assert!(Arc::ptr_eq(playlist, uploads));
        assert_eq!(source.api().calls("get_playlist_info"), 1);
    }

    #[tokio::test]
    async fn incognito_playlist_fetches_owner_uploads_separately() {
        let source = DataSource::new(api(), FakeIdentity::new(None));
        let subscription = source
            .resolve_incognito_playlist_subscription("PLmix")
            .await
            .unwrap();

        assert_eq!(subscription.playlist.as_ref().unwrap().id, "PLmix");
        assert_eq!(subscription.channel.id, "UCalpha");
        assert_eq!(
            subscription.channel.uploads_playlist.as_ref().unwrap().id,
            "UUalpha"
        );
        assert_eq!(source.api().calls("get_playlist_info"), 2);
    }

    #[tokio::test]
    async fn unknown_playlist_fails() {
        let source = DataSource::new(api(), FakeIdentity::new(None));
        let err = source
            .resolve_incognito_playlist_subscription("PLgone")
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("playlist not found: PLgone"), "{err:#}");
    }
}
