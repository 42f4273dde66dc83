// src/core/net.rs
//
// Blocking HTTPS GET with browser-like headers.

use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, USER_AGENT};

use crate::config::consts::{ACCEPT_LANGUAGE as LANG, FETCH_TIMEOUT_SECS, USER_AGENT as UA};
use crate::error::{Result, TrackerError};

pub fn client() -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(UA));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(LANG));

    Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
        .build()
        .map_err(|e| TrackerError::transport("<client>", e))
}

/// GET `url`; any non-2xx status is a transport error.
pub fn http_get(client: &Client, url: &str) -> Result<String> {
    let resp = client
        .get(url)
        .send()
        .map_err(|e| TrackerError::transport(url, e))?;

    let status = resp.status();
    debug!("Net: GET {url} → {status}");
    if !status.is_success() {
        return Err(TrackerError::transport(url, format!("HTTP error: {status}")));
    }
    resp.text().map_err(|e| TrackerError::transport(url, e))
}
