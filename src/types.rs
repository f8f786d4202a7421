use chrono::NaiveDateTime;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::client::ARCHIVE_URL;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "A fast, concurrent downloader for the NASA SDO browse image archive."
)]
pub struct Args {
    /// Imaging channel to download
    #[arg(long, short = 'c', value_enum)]
    pub channel: Channel,

    /// Only download images with this square resolution in pixels
    #[arg(long, short = 'r')]
    pub resolution: Option<u32>,

    /// Archive day to fetch, YYYY-MM-DD (if not provided, the newest day is used)
    #[arg(long, short = 'd')]
    pub date: Option<chrono::NaiveDate>,

    /// Directory where downloaded images are cached
    #[arg(long, short = 'o', default_value = "images")]
    pub cache_dir: PathBuf,

    /// Base URL of the browse archive
    #[arg(long, default_value = ARCHIVE_URL)]
    pub base_url: String,

    /// Number of concurrent downloads per batch
    #[arg(long, default_value_t = 20)]
    pub batch_size: usize,

    /// Request timeout in seconds, applied to every request
    #[arg(long, default_value_t = 300)]
    pub timeout: u64,

    /// User-Agent to send in every request
    #[arg(long, short = 'A', default_value = "sdofetch/0.1.0")]
    pub user_agent: String,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Enable debug mode (sets log level to debug and enables detailed output)
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Proxy URL (automatically enables --proxy-mode custom)
    #[arg(long, short = 'x')]
    pub proxy: Option<String>,

    /// Proxy mode: auto (env), off (disable), custom (use --proxy)
    #[arg(long, value_enum, default_value_t = ProxyMode::Auto)]
    pub proxy_mode: ProxyMode,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum ProxyMode {
    Auto,
    Off,
    Custom,
}

/// Imaging channel of the observatory, identified in filenames by a short
/// token (see [`Channel::token`]).
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Aia0193,
    Aia0304,
    Aia0171,
    Aia0211,
    Aia0131,
    Aia0335,
    Aia0094,
    Aia1600,
    Aia1700,
    /// Composite of AIA 211, 193 and 171
    Aia211193171,
    /// Composite of AIA 304, 211 and 171
    Aia304211171,
    /// Composite of AIA 094, 335 and 193
    Aia094335193,
    /// AIA 171 blended with an HMI magnetogram
    Aia171Hmib,
    HmiMagnetogram,
    HmiColorizedMagnetogram,
    HmiIntensitygramColored,
    HmiIntensitygramFlattened,
    HmiIntensitygram,
    HmiDopplergram,
}

/// One discoverable image file of the archive, decoded from a listing entry
/// like `20120213_235957_1024_0304.jpg`.
///
/// Only constructible through [`ImageRecord::decode`]; a record always holds
/// a filename that satisfies the archive's naming grammar.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageRecord {
    /// Original listing entry, also the cache key.
    pub filename: String,
    /// Capture date and time from the filename's first two segments.
    pub timestamp: NaiveDateTime,
    /// Pixel width of the square image.
    pub resolution: u32,
    pub channel: Channel,
}
