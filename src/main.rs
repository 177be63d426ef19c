use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use playlist_transcriber::{Cli, Config, TranscriptionPipeline};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before clap reads environment-backed options
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "playlist_transcriber=debug"
    } else {
        "playlist_transcriber=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_cli(&cli);

    if cli.show_config {
        config.display();
        return Ok(());
    }

    let pipeline = TranscriptionPipeline::new(config)?.with_progress(!cli.quiet);
    let summary = pipeline.run().await?;

    for (video_id, err) in &summary.skipped {
        tracing::debug!("{} skipped: {}", video_id, err);
    }

    Ok(())
}
