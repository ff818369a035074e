use serde::{Deserialize, Serialize};

/// Raw query pairs; repeated keys are kept rather than rejected.
#[derive(Deserialize, Debug, Default)]
#[serde(transparent)]
pub struct PinterestDataQuery {
    pairs: Vec<(String, String)>,
}

impl PinterestDataQuery {
    /// The first non-empty `url` value.
    pub fn post_url(&self) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, value)| key == "url" && !value.is_empty())
            .map(|(_, value)| value.as_str())
    }
}

impl From<Vec<(String, String)>> for PinterestDataQuery {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }
}

#[derive(Serialize, Debug)]
pub struct HomeResponse {
    pub message: &'static str,
    pub usage: &'static str,
}

impl Default for HomeResponse {
    fn default() -> Self {
        Self {
            message: "Pinterest Downloader Proxy API is running.",
            usage: "Send a GET request to /get_pinterest_data?url=<PINTEREST_POST_URL>",
        }
    }
}
