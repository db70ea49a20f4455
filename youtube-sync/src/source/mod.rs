//! The synchronization and change-detection engine.
//!
//! [`DataSource`] decides what to fetch from YouTube and how to turn the results into records
//! and changesets for the subscription store. It never touches the store itself.
//!
//! Initial sync of an account goes through [`DataSource::resolve_account`] and
//! [`DataSource::fetch_subscriptions`]. Periodic refreshes use
//! [`DataSource::fetch_playlist_updates`], [`DataSource::fetch_videos`] and
//! [`DataSource::fetch_view_count_updates`], which are independent of any account.
//!
//! Reconciling operations update the caller's cached records in place and return the
//! records they changed. That return value is what needs persisting.

mod account;
mod playlists;
mod subscriptions;
mod videos;

/// Synchronizes local subscription records with YouTube.
///
/// The collaborators are bound at construction and never replaced.
#[derive(Debug)]
pub struct DataSource<A, I> {
    api: A,
    identity: I,
}

impl<A, I> DataSource<A, I> {
    pub fn new(api: A, identity: I) -> Self {
        Self { api, identity }
    }

    #[cfg(test)]
    pub(crate) fn api(&self) -> &A {
        &self.api
    }
}
