// src/product.rs
use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Stable identifier of a tracked product.
///
/// Taken from the `/dp/<ID>/` path segment when the listing URL has one,
/// otherwise the first 8 hex chars of SHA-256 over the trimmed URL.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn from_url(url: &str) -> Self {
        let url = url.trim();
        if let Some(code) = catalog_code(url) {
            return ProductId(s!(code));
        }
        ProductId(digest_prefix(url))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        ProductId(s!(s))
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Path component of an absolute or scheme-less URL, without query/fragment.
fn url_path(url: &str) -> &str {
    let rest = match url.find("://") {
        Some(i) => &url[i + 3..],
        None => url,
    };
    // Query/fragment first, so a '/' inside them is never taken for the path.
    let rest = &rest[..rest.find(['?', '#']).unwrap_or(rest.len())];
    match rest.find('/') {
        Some(i) => &rest[i..],
        None => "",
    }
}

/// Segment right after a `dp` segment, if any.
fn catalog_code(url: &str) -> Option<&str> {
    let mut parts = url_path(url).split('/');
    while let Some(part) = parts.next() {
        if part == "dp" {
            return parts.next().filter(|p| !p.is_empty());
        }
    }
    None
}

fn digest_prefix(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    let full = hex::encode(hasher.finalize());
    s!(&full[..8])
}

/// Last-known state of a tracked product (catalog value; the id is the key).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub url: String,
    #[serde(default = "unknown_name")]
    pub name: String,
    #[serde(default)]
    pub last_price: Option<f64>,
}

fn unknown_name() -> String {
    s!("Unknown Product")
}

impl Product {
    pub fn new(url: &str, name: &str, price: f64) -> Self {
        Self { url: s!(url), name: s!(name), last_price: Some(price) }
    }
}

/// Name + price pulled off a listing page.
#[derive(Clone, Debug, PartialEq)]
pub struct Listing {
    pub name: String,
    pub price: f64,
}

/// Input guard used by the front ends: an http(s) URL on the tracked site.
pub fn looks_like_listing_url(url: &str) -> bool {
    let url = url.trim();
    url.starts_with("http") && url.contains(crate::config::consts::SITE_HOST_HINT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_from_dp_segment() {
        let id = ProductId::from_url("https://www.amazon.com/Some-Gadget/dp/B0ABCDEF12/ref=sr_1_1?th=1");
        assert_eq!(id.as_str(), "B0ABCDEF12");
    }

    #[test]
    fn id_ignores_dp_in_query() {
        let id = ProductId::from_url("https://www.amazon.com/gp/product?x=/dp/B0NOPE");
        assert_ne!(id.as_str(), "B0NOPE");
        assert_eq!(id.as_str().len(), 8);
    }

    #[test]
    fn id_ignores_dp_in_query_without_path() {
        for url in ["https://www.amazon.com?ref=/dp/B0NOPE", "https://www.amazon.com#/dp/B0NOPE"] {
            let id = ProductId::from_url(url);
            assert_ne!(id.as_str(), "B0NOPE", "{url}");
            assert_eq!(id.as_str().len(), 8);
        }
        // A real path is still read past the host.
        assert_eq!(ProductId::from_url("https://www.amazon.com/dp/B0YES?x=/dp/B0NO").as_str(), "B0YES");
    }

    #[test]
    fn fallback_id_is_stable_hex() {
        let a = ProductId::from_url("https://www.amazon.com/gp/product/B012345");
        let b = ProductId::from_url("  https://www.amazon.com/gp/product/B012345 ");
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 8);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        // sha256("abc") = ba7816bf...
        assert_eq!(digest_prefix("abc"), "ba7816bf");
    }

    #[test]
    fn trailing_dp_without_code_falls_back() {
        let id = ProductId::from_url("https://www.amazon.com/dp/");
        assert_eq!(id.as_str().len(), 8);
    }

    #[test]
    fn listing_url_guard() {
        assert!(looks_like_listing_url("https://www.amazon.co.uk/dp/B01"));
        assert!(!looks_like_listing_url("www.amazon.com/dp/B01"));
        assert!(!looks_like_listing_url("https://example.com/dp/B01"));
    }
}
