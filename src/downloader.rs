use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ORIGIN, REFERER, USER_AGENT};
use reqwest::{Client, ClientBuilder};
use serde_json::Value;
use std::time::Duration;
use once_cell::sync::Lazy;
use tracing::{error, info, warn};

use crate::error::{AppError, Result};
use crate::payload::{normalize, preview, PREVIEW_CHARS};

// The downloader only answers requests that look like they come from its own front end.
static IMPERSONATION_HEADERS: Lazy<HeaderMap> = Lazy::new(|| {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
        ),
    );
    headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
    headers.insert(REFERER, HeaderValue::from_static("https://pinterestdownloader.io/"));
    headers.insert(ORIGIN, HeaderValue::from_static("https://pinterestdownloader.io"));
    headers
});

// Logged on the non-JSON path; the caller-facing preview is longer.
const LOG_PREVIEW_CHARS: usize = 200;

/// Client for the third-party downloader service.
#[derive(Clone, Debug)]
pub struct DownloaderClient {
    client: Client,
    base_url: String,
}

impl DownloaderClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = ClientBuilder::new()
            .default_headers(IMPERSONATION_HEADERS.clone())
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves `post_url` through the downloader and returns the unwrapped payload.
    pub async fn fetch(&self, post_url: &str) -> Result<Value> {
        let target = target_url(&self.base_url, post_url);
        info!(target_url = %target, "fetching data from downloader");

        let response = self.client.get(&target).send().await.map_err(|e| {
            let err = AppError::from(e);
            error!(error = %err, details = ?err_details(&err), "downloader request failed");
            err
        })?;

        let status = response.status().as_u16();
        let status_error = response.error_for_status_ref().err();
        if let Some(status_err) = status_error {
            let details = status_err.to_string();
            let text = response.text().await.map_err(|e| {
                let err = AppError::from(e);
                error!(status, error = %err, details = ?err_details(&err), "failed to read downloader error body");
                err
            })?;
            let body = serde_json::from_str::<Value>(&text)
                .unwrap_or_else(|_| Value::String(preview(&text, PREVIEW_CHARS)));
            warn!(status, details = %details, "downloader returned HTTP error");
            return Err(AppError::UpstreamStatus { details, status, body });
        }

        let text = response.text().await.map_err(|e| {
            let err = AppError::from(e);
            error!(error = %err, details = ?err_details(&err), "failed to read downloader body");
            err
        })?;

        match serde_json::from_str::<Value>(&text) {
            Ok(data) => Ok(normalize(data)),
            Err(_) => {
                warn!(
                    target_url = %target,
                    content = %preview(&text, LOG_PREVIEW_CHARS),
                    "downloader response was not valid JSON"
                );
                Err(AppError::UpstreamMalformed {
                    status,
                    preview: preview(&text, PREVIEW_CHARS),
                })
            }
        }
    }
}

fn err_details(err: &AppError) -> Option<&str> {
    match err {
        AppError::UpstreamUnreachable { details }
        | AppError::UpstreamTimeout { details }
        | AppError::UpstreamTransport { details } => Some(details),
        _ => None,
    }
}

/// Appends `post_url` to `base_url`, percent-encoding everything outside the
/// unreserved set so `/`, `:`, `?` and `&` never reach the outbound query raw.
pub fn target_url(base_url: &str, post_url: &str) -> String {
    let encoded = urlencoding::encode(post_url);
    let mut result = String::with_capacity(base_url.len() + encoded.len());
    result.push_str(base_url);
    result.push_str(&encoded);
    result
}
