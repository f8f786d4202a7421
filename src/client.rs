use chrono::Datelike;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::error::SdoError;
use crate::listing::parse_listing;
use crate::types::ImageRecord;

/// Root of NASA's SDO browse image archive.
pub const ARCHIVE_URL: &str = "https://sdo.gsfc.nasa.gov/assets/img/browse";

/// Client for the year/month/day directory hierarchy of the browse archive.
///
/// Cheap to clone; all clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct SdoClient {
    client: Client,
    base_url: String,
}

impl SdoClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client, base_url }
    }

    pub fn http(&self) -> &Client {
        &self.client
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the directory listing at the given depth, every segment
    /// followed by a slash.
    fn listing_url(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        url.push('/');
        for segment in segments {
            url.push_str(segment);
            url.push('/');
        }
        url
    }

    /// Fetches one autoindex page and returns its entry names.
    #[instrument(skip(self, suffix))]
    async fn fetch_table(&self, segments: &[&str], suffix: &str) -> Result<Vec<String>, SdoError> {
        let url = self.listing_url(segments);
        debug!(url = %url, "Fetching directory listing");

        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(SdoError::ListingStatus(resp.status()));
        }

        let body = resp.text().await?;
        Ok(parse_listing(&body, suffix))
    }

    /// Years available at the archive root, in the server's listing order.
    pub async fn fetch_years(&self) -> Result<Vec<String>, SdoError> {
        self.fetch_table(&[], "/").await
    }

    pub async fn fetch_months(&self, year: &str) -> Result<Vec<String>, SdoError> {
        self.fetch_table(&[year], "/").await
    }

    pub async fn fetch_days(&self, year: &str, month: &str) -> Result<Vec<String>, SdoError> {
        self.fetch_table(&[year, month], "/").await
    }

    /// Lists one day's images as decoded records.
    ///
    /// Entries that do not satisfy the filename grammar are dropped with a
    /// warning instead of failing the whole listing.
    pub async fn fetch_images(
        &self,
        year: &str,
        month: &str,
        day: &str,
    ) -> Result<Vec<ImageRecord>, SdoError> {
        let entries = self.fetch_table(&[year, month, day], "").await?;
        Ok(entries
            .into_iter()
            .filter_map(|entry| match ImageRecord::decode(&entry) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!("{err}");
                    None
                }
            })
            .collect())
    }

    /// Canonical URL of one image, derived from the record's timestamp with
    /// zero-padded month and day.
    pub fn image_url(&self, record: &ImageRecord) -> String {
        let ts = record.timestamp;
        format!(
            "{}/{}/{:02}/{:02}/{}",
            self.base_url,
            ts.year(),
            ts.month(),
            ts.day(),
            record.filename
        )
    }
}
