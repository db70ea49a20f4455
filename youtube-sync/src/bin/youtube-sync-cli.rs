use eyre::Context;
use std::io::IsTerminal;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use youtube_sync::config::Config;
use youtube_sync::{DataSource, StaticIdentity, YouTubeClient};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "youtube-sync.json".to_string());
    let config = Config::load(&config_path).await?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .parse_lossy(std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_filter.clone())),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let yt = YouTubeClient::new(config.access_token()?, reqwest::Client::new())
        .with_base_url(&config.api_base_url)
        .with_page_size(config.page_size);
    let source = DataSource::new(yt, StaticIdentity::new(config.account_id.clone()));

    let account = Arc::new(
        source
            .resolve_current_account()
            .await
            .context("resolve signed-in account")?,
    );
    eprintln!("==> {} ({})", account.title, account.channel.id);

    let subscriptions = source
        .fetch_subscriptions(&account)
        .await
        .context("discover subscriptions")?;

    let mut summary = Vec::with_capacity(subscriptions.len());
    for subscription in &subscriptions {
        let Some(playlist) = &subscription.playlist else {
            eprintln!("skipping {}: no uploads playlist", subscription.channel.title);
            continue;
        };

        let mut listed = 0;
        let mut videos = source
            .fetch_videos(playlist, |page| {
                listed += page.len();
                listed < config.max_videos
            })
            .await
            .with_context(|| format!("list videos of {}", subscription.channel.id))?;
        videos.truncate(config.max_videos);

        let updated = source
            .fetch_view_count_updates(&mut videos)
            .await
            .with_context(|| format!("fetch statistics for {}", playlist.id))?
            .len();

        let views: i64 = videos.iter().map(|v| v.view_count.max(0)).sum();
        eprintln!(
            "{:>5} videos {:>12} views  {}",
            videos.len(),
            views,
            subscription.channel.title
        );
        summary.push(serde_json::json!({
            "channel": subscription.channel,
            "playlist": playlist,
            "videos": videos.len(),
            "statisticsUpdated": updated,
            "totalViews": views,
            "latest": videos.first(),
        }));
    }

    let out = serde_json::json!({
        "account": account,
        "subscriptions": summary,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&out).context("serialize summary")?
    );

    Ok(())
}
