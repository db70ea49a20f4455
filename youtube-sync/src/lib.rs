pub mod config;
pub mod error;
pub mod identity;
#[cfg(test)]
mod mock;
pub mod records;
pub mod source;
pub mod youtube_api;

pub use error::AccountError;
pub use identity::{IdentityResolver, StaticIdentity};
pub use source::DataSource;
pub use youtube_api::YouTubeApi;
pub use youtube_api::client::YouTubeClient;
