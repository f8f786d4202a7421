use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use std::path::Path;
use tokio::{
    fs::{self, File},
    io::AsyncWriteExt,
};
use tracing::{debug, instrument};

use crate::client::SdoClient;
use crate::error::SdoError;
use crate::progress::style_download_bar;
use crate::types::{Channel, ImageRecord};

/// Returns one image's bytes, from the cache when present, otherwise from
/// the archive.
///
/// A cache entry is a file named exactly `record.filename` under
/// `cache_dir`; its presence alone is authoritative, there is no freshness
/// check. On a miss the body is streamed into `<filename>.part` and renamed
/// into place once the stream is exhausted, so a file under the final name
/// always holds complete bytes. Concurrent fetches of the same filename are
/// not locked against each other; listings never repeat a filename, so the
/// orchestrator cannot trigger that race.
#[instrument(skip(client, record, cache_dir), fields(filename = %record.filename))]
pub async fn fetch_image_bytes(
    client: &SdoClient,
    record: &ImageRecord,
    cache_dir: &Path,
) -> Result<Vec<u8>, SdoError> {
    let cached = cache_dir.join(&record.filename);
    if fs::try_exists(&cached).await? {
        debug!("Cache hit");
        return Ok(fs::read(&cached).await?);
    }

    let url = client.image_url(record);
    debug!(url = %url, "Cache miss, downloading");

    let resp = client.http().get(&url).send().await?;
    if !resp.status().is_success() {
        return Err(SdoError::DownloadStatus(resp.status()));
    }

    let part = cache_dir.join(format!("{}.part", record.filename));
    match stream_to_file(resp, &part).await {
        Ok(bytes) => {
            fs::rename(&part, &cached).await?;
            Ok(bytes)
        }
        Err(err) => {
            // Never leave something a later run could mistake for a hit.
            let _ = fs::remove_file(&part).await;
            Err(err)
        }
    }
}

/// Streams the response body to `path` chunk by chunk while accumulating it
/// in memory.
async fn stream_to_file(resp: reqwest::Response, path: &Path) -> Result<Vec<u8>, SdoError> {
    let mut file = File::create(path).await?;
    let mut stream = resp.bytes_stream();
    let mut bytes = Vec::new();

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result?;
        file.write_all(&chunk).await?;
        bytes.extend_from_slice(&chunk);
    }
    file.flush().await?;

    Ok(bytes)
}

/// Selects the records matching `channel`, and `resolution` when given.
pub fn select_records(
    records: &[ImageRecord],
    channel: Channel,
    resolution: Option<u32>,
) -> Vec<ImageRecord> {
    records
        .iter()
        .filter(|r| r.channel == channel && resolution.is_none_or(|res| r.resolution == res))
        .cloned()
        .collect()
}

/// Downloads every record into the cache, at most `batch_size` in flight at
/// a time.
///
/// Records are partitioned into groups of `batch_size`; each group's fetches
/// run concurrently and the group fully settles before the next one starts,
/// bounding peak connections to the archive. All fetches of a group run to
/// completion even when one fails; the first failure propagates once the
/// group has settled.
#[instrument(skip(client, records, cache_dir), fields(count = records.len()))]
pub async fn download_batch(
    client: &SdoClient,
    records: &[ImageRecord],
    cache_dir: &Path,
    batch_size: usize,
) -> Result<(), SdoError> {
    fs::create_dir_all(cache_dir).await?;

    let pb = ProgressBar::new(records.len() as u64);
    pb.set_style(style_download_bar());
    pb.set_message("Downloading");

    for group in records.chunks(batch_size.max(1)) {
        let results: Vec<Result<(), SdoError>> = stream::iter(group)
            .map(|record| {
                let pb = pb.clone();
                async move {
                    let bytes = fetch_image_bytes(client, record, cache_dir).await?;
                    debug!(filename = %record.filename, bytes = bytes.len(), "Image ready");
                    pb.inc(1);
                    Ok(())
                }
            })
            .buffer_unordered(group.len())
            .collect()
            .await;

        for result in results {
            result?;
        }
    }

    pb.finish_with_message("Download completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(filename: &str) -> ImageRecord {
        ImageRecord::decode(filename).unwrap()
    }

    #[test]
    fn selects_by_channel_and_resolution() {
        let records = [
            record("20231020_061705_512_0193.jpg"),
            record("20231020_061705_1024_0193.jpg"),
            record("20231020_061705_512_0131.jpg"),
        ];

        let all_193 = select_records(&records, Channel::Aia0193, None);
        assert_eq!(all_193.len(), 2);

        let small_193 = select_records(&records, Channel::Aia0193, Some(512));
        assert_eq!(small_193.len(), 1);
        assert_eq!(small_193[0].filename, "20231020_061705_512_0193.jpg");

        assert!(select_records(&records, Channel::Aia1700, None).is_empty());
    }
}
