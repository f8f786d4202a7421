use reqwest::{
    Client, Proxy,
    header::{HeaderMap, HeaderValue, USER_AGENT},
};
use std::time::Duration;
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

use crate::error::SdoError;
use crate::types::{LogLevel, ProxyMode};

/// Initializes the tracing subscriber for logging.
///
/// Configures `tracing_subscriber::FmtSubscriber` to output logs to stderr.
/// Supports two modes:
/// 1. **User Mode (default)**: Clean output without timestamps or module paths.
/// 2. **Debug Mode (`debug_mode = true`)**: Detailed output with timestamps, file paths, and line numbers.
pub fn init_tracing(level: LogLevel, debug_mode: bool) {
    let trace_level = if debug_mode {
        if matches!(level, LogLevel::Trace) {
            Level::TRACE
        } else {
            Level::DEBUG
        }
    } else {
        match level {
            LogLevel::Off => return,
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(trace_level)
        .with_writer(std::io::stderr);

    if debug_mode {
        builder
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        builder
            .with_target(false)
            .without_time()
            .with_level(true)
            .init();
    }
}

/// Builds and configures the HTTP client the whole run shares.
///
/// Sets the User-Agent, the uniform request timeout applied to every
/// listing fetch and image download, and the proxy settings (auto, off, or
/// custom).
pub fn build_client(
    ua: &str,
    timeout: Duration,
    proxy_mode: ProxyMode,
    proxy: Option<&str>,
) -> Result<Client, SdoError> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_str(ua)?);

    debug!(
        user_agent = %ua,
        timeout_secs = timeout.as_secs(),
        proxy_mode = ?proxy_mode,
        proxy = ?proxy,
        "Building HTTP client"
    );

    let mut builder = Client::builder().default_headers(headers).timeout(timeout);

    match proxy_mode {
        ProxyMode::Auto => {}
        ProxyMode::Off => {
            builder = builder.no_proxy();
            debug!("Proxy disabled");
        }
        ProxyMode::Custom => {
            let proxy_url = proxy.ok_or_else(|| {
                SdoError::ArgNotValid("proxy-mode custom requires --proxy <URL>".to_string())
            })?;
            builder = builder.no_proxy();
            builder = builder.proxy(Proxy::all(proxy_url)?);
            debug!(proxy = %proxy_url, "Proxy enabled (custom)");
        }
    }

    let client = builder.build()?;

    Ok(client)
}
