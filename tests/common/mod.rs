// tests/common/mod.rs
//
// Shared fakes: a scripted site and a recording notifier.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use pricewatch::config::state::AppOptions;
use pricewatch::notify::{Alert, Notifier};
use pricewatch::product::Listing;
use pricewatch::specs::Fetch;
use pricewatch::{Result, Tracker, TrackerError};

pub fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("pricewatch_it_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

pub fn options(dir: &PathBuf) -> AppOptions {
    AppOptions { data_dir: dir.clone(), request_pause: Duration::ZERO }
}

/// What each URL currently shows. A URL with no page (or `None`) fails to fetch.
#[derive(Clone, Default)]
pub struct StubSite {
    pages: Rc<RefCell<HashMap<String, Option<(String, f64)>>>>,
    pub hits: Rc<RefCell<Vec<String>>>,
}

impl StubSite {
    pub fn set(&self, url: &str, name: &str, price: f64) {
        self.pages.borrow_mut().insert(url.to_string(), Some((name.to_string(), price)));
    }
    pub fn break_page(&self, url: &str) {
        self.pages.borrow_mut().insert(url.to_string(), None);
    }
}

impl Fetch for StubSite {
    fn fetch(&self, url: &str) -> Result<Listing> {
        self.hits.borrow_mut().push(url.to_string());
        match self.pages.borrow().get(url) {
            Some(Some((name, price))) => Ok(Listing { name: name.clone(), price: *price }),
            _ => Err(TrackerError::transport(url, "HTTP 503")),
        }
    }
}

#[derive(Clone, Default)]
pub struct Recorder {
    pub sent: Rc<RefCell<Vec<Alert>>>,
    pub fail: bool,
}

impl Notifier for Recorder {
    fn notify(&self, alert: &Alert) -> Result<()> {
        self.sent.borrow_mut().push(alert.clone());
        if self.fail {
            return Err(TrackerError::Notify("smtp down".into()));
        }
        Ok(())
    }
}

/// Fresh tracker over `dir` with a scripted site and a recording notifier.
pub fn tracker(dir: &PathBuf) -> (Tracker, StubSite, Recorder) {
    let site = StubSite::default();
    let rec = Recorder::default();
    let mut t = Tracker::open(options(dir), Box::new(site.clone()));
    t.set_notifier(Some(Box::new(rec.clone())));
    (t, site, rec)
}
