// tests/tracker_degraded.rs
//
// Startup and persistence problems degrade instead of failing.
mod common;

use std::fs;

use common::{options, tmp_dir, tracker, Recorder, StubSite};
use pricewatch::config::options::EmailSettings;
use pricewatch::detect::ChangeEvent;
use pricewatch::product::ProductId;
use pricewatch::progress::NullProgress;
use pricewatch::schedule::CheckTime;
use pricewatch::store::LoadOutcome;
use pricewatch::Tracker;

const URL_A: &str = "https://www.amazon.com/Widget/dp/B000000AAA";

#[test]
fn corrupt_catalog_starts_empty() {
    let dir = tmp_dir("corrupt");
    fs::write(dir.join("tracked_products.json"), "{ not json").unwrap();

    let t = Tracker::open(options(&dir), Box::new(StubSite::default()));
    assert!(t.catalog().is_empty());
    assert!(matches!(t.catalog_load(), LoadOutcome::Corrupt(_)));
}

#[test]
fn add_reports_unsaved_catalog() {
    let dir = tmp_dir("unsaved");
    // A non-empty directory where the catalog file should be.
    let blocker = dir.join("tracked_products.json");
    fs::create_dir_all(blocker.join("x")).unwrap();

    let (mut t, site, _rec) = tracker(&dir);
    site.set(URL_A, "Widget", 10.00);
    let out = t.add_product(URL_A).unwrap();

    assert!(!out.fully_saved());
    assert_eq!(out.warnings.len(), 1);
    assert!(t.catalog().contains(&ProductId::from_url(URL_A)));
    // History was still written.
    assert_eq!(t.history().records().unwrap().len(), 1);
    // The half-finished write was cleaned up.
    assert!(!dir.join("tracked_products.json.tmp").exists());
}

#[test]
fn check_reports_unsaved_catalog() {
    let dir = tmp_dir("check_unsaved");
    let (mut t, site, _rec) = tracker(&dir);
    site.set(URL_A, "Widget", 10.00);
    t.add_product(URL_A).unwrap();

    let catalog = dir.join("tracked_products.json");
    fs::remove_file(&catalog).unwrap();
    fs::create_dir_all(catalog.join("x")).unwrap();

    site.set(URL_A, "Widget", 8.00);
    let s = t.check_all(&mut NullProgress);

    assert_eq!(s.changed, 1);
    assert_eq!(s.catalog_saved, Some(false));
    assert_eq!(s.warnings.len(), 1);
    assert_eq!(t.catalog().get(&ProductId::from_url(URL_A)).unwrap().last_price, Some(8.00));
    assert!(!dir.join("tracked_products.json.tmp").exists());
}

#[test]
fn unreadable_history_falls_back_to_cached_price() {
    let dir = tmp_dir("history_unreadable");
    fs::write(
        dir.join("tracked_products.json"),
        format!(r#"{{"B000000AAA": {{"url": "{URL_A}", "name": "Widget", "last_price": 10.0}}}}"#),
    )
    .unwrap();
    // A directory where the history file should be: reads and appends both fail.
    fs::create_dir_all(dir.join("amazon_price_history.csv").join("x")).unwrap();

    let (mut t, site, rec) = tracker(&dir);
    let id = ProductId::from_url(URL_A);

    // Same as the cached price: not mistaken for a new product.
    site.set(URL_A, "Widget", 10.00);
    let s = t.check_all(&mut NullProgress);
    assert_eq!((s.checked, s.changed, s.failed), (1, 0, 0));
    assert_eq!(s.catalog_saved, None);
    assert!(rec.sent.borrow().is_empty());

    // A real move is still classified and announced, but the append fails.
    site.set(URL_A, "Widget", 8.00);
    let s = t.check_all(&mut NullProgress);
    assert_eq!(s.changed, 0);
    assert_eq!(s.warnings.len(), 1);
    assert_eq!(s.catalog_saved, Some(true));
    match rec.sent.borrow().as_slice() {
        [alert] => assert_eq!(alert.event, ChangeEvent::Dropped { previous: 10.0, delta: 2.0 }),
        other => panic!("expected one drop alert, got {other:?}"),
    }
    assert_eq!(t.catalog().get(&id).unwrap().last_price, Some(8.00));
}

#[test]
fn notifier_failure_does_not_stop_checks() {
    let dir = tmp_dir("notify_fail");
    let site = StubSite::default();
    let rec = Recorder { fail: true, ..Recorder::default() };
    let mut t = Tracker::open(options(&dir), Box::new(site.clone()));
    t.set_notifier(Some(Box::new(rec.clone())));

    site.set(URL_A, "Widget", 10.00);
    assert!(t.add_product(URL_A).is_ok());
    site.set(URL_A, "Widget", 7.00);
    let s = t.check_all(&mut NullProgress);

    assert_eq!(s.changed, 1);
    assert_eq!(rec.sent.borrow().len(), 2);
}

#[test]
fn empty_catalog_check_is_a_noop() {
    let dir = tmp_dir("empty");
    let (mut t, site, _rec) = tracker(&dir);
    let s = t.check_all(&mut NullProgress);
    assert_eq!((s.checked, s.changed, s.failed), (0, 0, 0));
    assert!(site.hits.borrow().is_empty());
}

#[test]
fn settings_persist_across_sessions() {
    let dir = tmp_dir("settings");
    {
        let (mut t, _site, _rec) = tracker(&dir);
        t.set_check_time(CheckTime::parse("18:45").unwrap()).unwrap();
        t.configure_email(Some(EmailSettings::gmail("me@gmail.com", "app-pass", "you@example.com")))
            .unwrap();
    }

    let t = Tracker::open(options(&dir), Box::new(StubSite::default()));
    assert_eq!(t.schedule().check_time, "18:45");
    assert!(t.alerts_enabled());
    assert_eq!(t.email().active().unwrap().recipient, "you@example.com");

    let mut t = t;
    t.configure_email(None).unwrap();
    assert!(!t.alerts_enabled());
    assert!(!dir.join("email_config.json").exists());
}
