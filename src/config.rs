use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use crate::error::{AppError, Result};

/// Downstream endpoint; the percent-encoded post URL is appended directly.
pub const DOWNLOADER_BASE_URL: &str =
    "https://pinterestdownloader.io/frontendService/DownloaderService?url=";

pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(20);

const BIND_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 5000;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub downloader_base_url: String,
    pub upstream_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_values(env::var("PORT").ok(), DOWNLOADER_BASE_URL)
    }

    /// Builds a config from a raw `PORT` value, defaulting to 5000 when unset.
    pub fn from_values(port: Option<String>, downloader_base_url: &str) -> Result<Self> {
        let port = match port {
            Some(port) => port
                .trim()
                .parse::<u16>()
                .map_err(|e| AppError::Config(format!("Invalid port: {}", e)))?,
            None => DEFAULT_PORT,
        };

        Ok(Config {
            server_addr: SocketAddr::new(BIND_ADDR, port),
            downloader_base_url: downloader_base_url.to_string(),
            upstream_timeout: UPSTREAM_TIMEOUT,
        })
    }
}
