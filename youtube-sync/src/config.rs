//! Settings for `youtube-sync-cli`.

use crate::youtube_api::client::DEFAULT_BASE_URL;
use eyre::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

const ACCESS_TOKEN_VAR: &str = "YOUTUBE_ACCESS_TOKEN";
const ACCOUNT_ID_VAR: &str = "YOUTUBE_ACCOUNT_ID";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// OAuth access token with the `youtube.readonly` scope.
    pub access_token: Option<String>,
    /// The account that is considered signed in.
    pub account_id: Option<String>,
    pub api_base_url: String,
    /// Items requested per page of a listing, at most 50.
    pub page_size: u32,
    /// How many videos to list per uploads playlist.
    pub max_videos: usize,
    /// Default `tracing` directive, used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_token: None,
            account_id: None,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            page_size: 50,
            max_videos: 200,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Reads the config at `path` and applies environment overrides.
    ///
    /// A missing file is the same as an empty one.
    pub async fn load(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        let mut config = if tokio::fs::try_exists(path)
            .await
            .with_context(|| format!("check for config file {}", path.display()))?
        {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("read config file {}", path.display()))?;
            Self::from_json(&raw)?
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Self::default()
        };
        config.apply_overrides(|var| std::env::var(var).ok());
        Ok(config)
    }

    pub fn from_json(raw: &str) -> eyre::Result<Self> {
        let mut config: Self = serde_json::from_str(raw).context("parse config as JSON")?;
        config.page_size = config.page_size.clamp(1, 50);
        Ok(config)
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(token) = lookup(ACCESS_TOKEN_VAR).filter(|t| !t.is_empty()) {
            self.access_token = Some(token);
        }
        if let Some(account_id) = lookup(ACCOUNT_ID_VAR).filter(|a| !a.is_empty()) {
            self.account_id = Some(account_id);
        }
    }

    pub fn access_token(&self) -> eyre::Result<&str> {
        self.access_token.as_deref().ok_or_else(|| {
            eyre::eyre!("no access token configured (set {ACCESS_TOKEN_VAR} or access_token)")
        })
    }
}
