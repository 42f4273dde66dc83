// src/specs/product.rs
//! Extraction rules for a single product listing page.
//!
//! - Title: element `#productTitle`.
//! - Price: `span.a-offscreen`, then `span.a-price-whole`,
//!   `.a-price .a-offscreen`, `#price_inside_buybox`,
//!   `.a-price-range .a-offscreen`.

use log::{debug, warn};
use reqwest::blocking::Client;

use crate::core::{html, net, sanitize::parse_price};
use crate::error::{Result, TrackerError};
use crate::product::Listing;

/// One way of finding an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Locator {
    /// `#id`
    Id(&'static str),
    /// `tag.class`; an empty tag matches any element.
    TagClass { tag: &'static str, class: &'static str },
    /// `.outer .class`
    Descendant { outer: &'static str, class: &'static str },
}

impl Locator {
    /// Visible text of the first matching element that has any.
    pub fn find_text(&self, doc: &str) -> Option<String> {
        match *self {
            Locator::Id(id) => html::tags(doc)
                .filter(|t| !t.closing && t.attr("id") == Some(id))
                .map(|t| html::text_of(html::inner_html(doc, &t)))
                .find(|s| !s.is_empty()),

            Locator::TagClass { tag, class } => first_text_with_class(doc, tag, class),

            Locator::Descendant { outer, class } => html::tags(doc)
                .filter(|t| !t.closing && t.has_class(outer))
                .find_map(|t| first_text_with_class(html::inner_html(doc, &t), "", class)),
        }
    }
}

fn first_text_with_class(doc: &str, tag: &str, class: &str) -> Option<String> {
    html::tags(doc)
        .filter(|t| !t.closing && (tag.is_empty() || t.is(tag)) && t.has_class(class))
        .map(|t| html::text_of(html::inner_html(doc, &t)))
        .find(|s| !s.is_empty())
}

/// Ordered extraction strategies for one site layout.
#[derive(Clone, Copy, Debug)]
pub struct PageRules {
    pub title: &'static [Locator],
    pub price: &'static [Locator],
}

pub const LISTING_RULES: PageRules = PageRules {
    title: &[Locator::Id("productTitle")],
    price: &[
        Locator::TagClass { tag: "span", class: "a-offscreen" },
        Locator::TagClass { tag: "span", class: "a-price-whole" },
        Locator::Descendant { outer: "a-price", class: "a-offscreen" },
        Locator::Id("price_inside_buybox"),
        Locator::Descendant { outer: "a-price-range", class: "a-offscreen" },
    ],
};

impl Default for PageRules {
    fn default() -> Self {
        LISTING_RULES
    }
}

fn first_match(doc: &str, rules: &[Locator]) -> Option<(usize, String)> {
    rules
        .iter()
        .enumerate()
        .find_map(|(i, loc)| loc.find_text(doc).map(|text| (i, text)))
}

/// Pull name + price out of a listing document.
pub fn extract(doc: &str, rules: &PageRules) -> Result<Listing> {
    let (_, name) = first_match(doc, rules.title)
        .ok_or(TrackerError::Extraction { what: "title" })?;

    let (rule_ix, price_text) = first_match(doc, rules.price)
        .ok_or(TrackerError::Extraction { what: "price" })?;
    if rule_ix > 0 {
        debug!("Extract: price via fallback #{rule_ix} ({:?})", rules.price[rule_ix]);
    }

    let price = parse_price(&price_text)?;
    Ok(Listing { name, price })
}

/// Source of current listing data for a URL.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<Listing>;
}

/// Live fetcher: HTTPS GET + `extract`.
pub struct HttpFetcher {
    client: Client,
    rules: PageRules,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Ok(Self { client: net::client()?, rules: PageRules::default() })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Listing> {
        let doc = net::http_get(&self.client, url)?;
        extract(&doc, &self.rules).inspect_err(|e| warn!("Extract: {url}: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><head><title>Amazon.com</title>
        <script>var tpl = '<span class="a-offscreen">$0.01</span>';</script></head>
        <body>
          <span id="productTitle" class="a-size-large">
              Acme   Rocket Skates&nbsp;&amp; Helmet
          </span>
          <div class="a-section">
            <span class="a-price" data-a-size="xl">
              <span class="a-offscreen">$1,249.99</span>
              <span aria-hidden="true"><span class="a-price-whole">1,249.</span></span>
            </span>
          </div>
        </body></html>"#;

    #[test]
    fn extracts_title_and_primary_price() {
        let l = extract(PAGE, &LISTING_RULES).unwrap();
        assert_eq!(l.name, "Acme Rocket Skates & Helmet");
        assert_eq!(l.price, 1249.99);
    }

    #[test]
    fn falls_back_in_order() {
        let doc = r#"<h1 id="productTitle">Widget</h1>
            <span class="a-price-whole">19.</span>
            <div id="price_inside_buybox">$25.00</div>"#;
        assert_eq!(extract(doc, &LISTING_RULES).unwrap().price, 19.0);

        let doc = r#"<h1 id="productTitle">Widget</h1>
            <div id="price_inside_buybox"> $25.00 </div>"#;
        assert_eq!(extract(doc, &LISTING_RULES).unwrap().price, 25.0);
    }

    #[test]
    fn empty_primary_is_skipped() {
        let doc = r#"<span id="productTitle">W</span>
            <span class="a-offscreen"> </span>
            <div class="a-price-range"><em class="a-offscreen">$5.00 - $9.00</em></div>"#;
        assert_eq!(extract(doc, &LISTING_RULES).unwrap().price, 5.0);
    }

    #[test]
    fn missing_title_or_price() {
        let no_title = r#"<span class="a-offscreen">$1.00</span>"#;
        assert!(matches!(
            extract(no_title, &LISTING_RULES),
            Err(TrackerError::Extraction { what: "title" })
        ));

        let no_price = r#"<span id="productTitle">W</span><span class="price">$1</span>"#;
        assert!(matches!(
            extract(no_price, &LISTING_RULES),
            Err(TrackerError::Extraction { what: "price" })
        ));
    }

    #[test]
    fn unparseable_price() {
        let doc = r#"<span id="productTitle">W</span><span class="a-offscreen">See options</span>"#;
        assert!(matches!(extract(doc, &LISTING_RULES), Err(TrackerError::Parse { .. })));
    }

    #[test]
    fn rules_are_data() {
        const ALT: PageRules = PageRules {
            title: &[Locator::TagClass { tag: "h1", class: "name" }],
            price: &[Locator::Descendant { outer: "buy", class: "amount" }],
        };
        let doc = r#"<h1 class="name big">Gizmo</h1><div class="buy"><b class="amount">$7.25</b></div>"#;
        let l = extract(doc, &ALT).unwrap();
        assert_eq!((l.name.as_str(), l.price), ("Gizmo", 7.25));
    }
}
