//! Who is signed in right now.

use std::future::Future;

/// Reports the account that is currently active in the host environment.
pub trait IdentityResolver {
    /// Returns the ID of the signed-in account, or `None` if nobody is signed in.
    ///
    /// Fails if the environment's identity subsystem reports an error.
    fn active_account_id(&self) -> impl Future<Output = eyre::Result<Option<String>>> + Send;
}

/// An identity fixed at construction, typically taken from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    account_id: Option<String>,
}

impl StaticIdentity {
    pub fn new(account_id: Option<String>) -> Self {
        Self { account_id }
    }
}

impl IdentityResolver for StaticIdentity {
    async fn active_account_id(&self) -> eyre::Result<Option<String>> {
        Ok(self.account_id.clone())
    }
}
