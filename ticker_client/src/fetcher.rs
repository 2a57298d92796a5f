//! Batched quote fetching over HTTP.
//!
//! One GET per render cycle carries the whole comma-joined watch-list. The
//! endpoint answers in the legacy `gb2312` encoding, which reqwest decodes
//! when asked for text with that charset.
use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use ticker_common::{Result, TickerError};

/// Quote endpoint; the comma-joined code list is appended directly.
const BASE_URL: &str = "https://qt.gtimg.cn/q=";
/// Fixed per-request timeout.
const TIMEOUT: Duration = Duration::from_secs(10);
/// Charset of the response body.
const RESPONSE_CHARSET: &str = "gb2312";

/// Blocking HTTP fetcher for the quote endpoint.
pub struct QuoteFetcher {
    client: Client,
}

impl QuoteFetcher {
    /// Build the underlying HTTP client with the fixed request timeout.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(TIMEOUT)
            .build()
            .map_err(|e| TickerError::Network(e.to_string()))?;
        Ok(QuoteFetcher { client })
    }

    /// Fetch raw decoded quote text for the comma-joined `query` of codes.
    ///
    /// Any transport failure (timeout, connection error) surfaces as
    /// [`TickerError::Network`] so the driver can report it inline and keep
    /// cycling. The response status is not checked; a non-quote body simply
    /// decodes to text carrying no records.
    pub fn fetch(&self, query: &str) -> Result<String> {
        let url = request_url(query);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| TickerError::Network(e.to_string()))?;
        response
            .text_with_charset(RESPONSE_CHARSET)
            .map_err(|e| TickerError::Network(e.to_string()))
    }
}

/// Full request URL for a comma-joined code list.
fn request_url(query: &str) -> String {
    format!("{}{}", BASE_URL, query)
}
