pub mod api;
pub mod config;
pub mod downloader;
pub mod error;
pub mod logging;
pub mod payload;

use config::Config;
use downloader::DownloaderClient;
use error::Result;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub downloader: DownloaderClient,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        let downloader =
            DownloaderClient::new(config.downloader_base_url.clone(), config.upstream_timeout)?;
        Ok(Self { downloader })
    }
}
