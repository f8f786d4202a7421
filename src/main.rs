use chrono::Datelike;
use clap::Parser;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use sdofetch::client::SdoClient;
use sdofetch::download::{download_batch, select_records};
use sdofetch::error::SdoError;
use sdofetch::progress::style_spinner;
use sdofetch::types::{Args, ProxyMode};
use sdofetch::utils::{build_client, init_tracing};

#[tokio::main]
async fn main() -> Result<(), SdoError> {
    let args = Args::parse();

    // Initialize tracing with log level control
    init_tracing(args.log_level, args.debug);

    if args.batch_size == 0 {
        return Err(SdoError::ArgNotValid(
            "batch-size must be >= 1".to_string(),
        ));
    }

    let proxy_mode = if args.proxy.is_some() {
        ProxyMode::Custom
    } else {
        args.proxy_mode
    };
    let http = build_client(
        &args.user_agent,
        Duration::from_secs(args.timeout),
        proxy_mode,
        args.proxy.as_deref(),
    )?;
    let client = SdoClient::new(http, &args.base_url);

    // Liveness ticker beside the pipeline; shares nothing with it and is
    // told to stop through the watch channel once the pipeline settles.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let heartbeat_handle = tokio::spawn(heartbeat(shutdown_rx));

    let result = run(&client, &args).await;

    let _ = shutdown_tx.send(true);
    let _ = heartbeat_handle.await;

    result
}

async fn run(client: &SdoClient, args: &Args) -> Result<(), SdoError> {
    let (year, month, day) = match args.date {
        Some(date) => (
            format!("{:04}", date.year()),
            format!("{:02}", date.month()),
            format!("{:02}", date.day()),
        ),
        None => newest_day(client).await?,
    };

    info!("Fetching index for {}/{}/{}", year, month, day);
    let records = client.fetch_images(&year, &month, &day).await?;
    info!("Day lists {} images", records.len());

    let selected = select_records(&records, args.channel, args.resolution);
    if selected.is_empty() {
        warn!("No images match the requested channel/resolution");
        return Ok(());
    }

    info!(
        "Downloading {} images into {}",
        selected.len(),
        args.cache_dir.display()
    );
    download_batch(client, &selected, &args.cache_dir, args.batch_size).await?;

    info!("All images saved");
    Ok(())
}

/// Walks the index down to the newest year/month/day the archive lists.
async fn newest_day(client: &SdoClient) -> Result<(String, String, String), SdoError> {
    let pb = indicatif::ProgressBar::new_spinner();
    pb.set_style(style_spinner());
    pb.set_message("Locating newest archive day...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let year = client
        .fetch_years()
        .await?
        .pop()
        .ok_or_else(|| SdoError::EmptyListing("no years under the archive root".to_string()))?;
    let month = client
        .fetch_months(&year)
        .await?
        .pop()
        .ok_or_else(|| SdoError::EmptyListing(format!("no months under {year}")))?;
    let day = client
        .fetch_days(&year, &month)
        .await?
        .pop()
        .ok_or_else(|| SdoError::EmptyListing(format!("no days under {year}/{month}")))?;

    pb.finish_and_clear();
    debug!(year = %year, month = %month, day = %day, "Newest archive day located");
    Ok((year, month, day))
}

/// Periodic liveness tick, independent of the download pipeline.
async fn heartbeat(mut shutdown: watch::Receiver<bool>) {
    let mut tick = tokio::time::interval(Duration::from_secs(30));
    tick.tick().await; // the first tick fires immediately
    loop {
        tokio::select! {
            _ = tick.tick() => debug!("Still running"),
            _ = shutdown.changed() => return,
        }
    }
}
