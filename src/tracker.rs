// src/tracker.rs
//
// The tracking session: one explicit context object holding the catalog,
// stores, fetcher, notifier and settings. Created from the files in the data
// dir at startup; every operation goes through it.

use std::{thread, time::Duration};

use chrono::Local;
use log::{error, info, warn};

use crate::{
    config::{
        consts::TIMESTAMP_FMT,
        options::{EmailConfig, EmailSettings, ScheduleConfig},
        state::AppOptions,
    },
    detect::{detect, ChangeEvent},
    error::{Result, TrackerError},
    notify::{Alert, EmailNotifier, Notifier},
    product::{Listing, Product, ProductId},
    progress::Progress,
    schedule::CheckTime,
    specs::Fetch,
    store::{Catalog, CatalogStore, HistoryRecord, HistoryStore, LoadOutcome},
};

pub fn now_stamp() -> String {
    Local::now().format(TIMESTAMP_FMT).to_string()
}

/// Result of a successful `add_product`. `warnings` lists persistence
/// failures: the product is tracked in memory, but disk may disagree.
#[derive(Debug)]
pub struct AddOutcome {
    pub id: ProductId,
    pub product: Product,
    pub warnings: Vec<String>,
}

impl AddOutcome {
    pub fn fully_saved(&self) -> bool { self.warnings.is_empty() }
}

#[derive(Debug)]
pub struct RemoveOutcome {
    pub id: ProductId,
    pub product: Product,
    pub warnings: Vec<String>,
}

/// Totals for one `check_all` run.
#[derive(Debug, Default, PartialEq)]
pub struct CheckSummary {
    /// Products fetched and classified.
    pub checked: usize,
    /// Price events successfully appended to history.
    pub changed: usize,
    /// Products skipped because of fetch/extract/parse errors.
    pub failed: usize,
    /// `None` when nothing needed saving.
    pub catalog_saved: Option<bool>,
    pub warnings: Vec<String>,
}

pub struct Tracker {
    options: AppOptions,
    catalog: Catalog,
    catalog_store: CatalogStore,
    catalog_load: LoadOutcome,
    history: HistoryStore,
    fetcher: Box<dyn Fetch>,
    notifier: Option<Box<dyn Notifier>>,
    schedule: ScheduleConfig,
    email: EmailConfig,
}

impl Tracker {
    /// Load catalog + settings from `options.data_dir`. Never fails: missing or
    /// corrupt files degrade to empty/defaults.
    pub fn open(options: AppOptions, fetcher: Box<dyn Fetch>) -> Self {
        let catalog_store = CatalogStore::new(options.catalog_path());
        let (catalog, catalog_load) = catalog_store.load();
        let history = HistoryStore::new(options.history_path());
        let schedule = ScheduleConfig::load(&options.schedule_path());
        let email = EmailConfig::load(&options.email_path());

        let notifier = email
            .active()
            .map(|s| Box::new(EmailNotifier::new(s.clone())) as Box<dyn Notifier>);

        info!(
            "Init: products={}, schedule={}, email={}",
            catalog.len(),
            schedule.check_time,
            if notifier.is_some() { "on" } else { "off" }
        );

        Self {
            options,
            catalog,
            catalog_store,
            catalog_load,
            history,
            fetcher,
            notifier,
            schedule,
            email,
        }
    }

    /// Swap the alert channel (`None` = alerts off). Does not touch the email file.
    pub fn set_notifier(&mut self, notifier: Option<Box<dyn Notifier>>) {
        self.notifier = notifier;
    }

    /* ---------- accessors ---------- */

    pub fn options(&self) -> &AppOptions { &self.options }
    pub fn catalog(&self) -> &Catalog { &self.catalog }
    pub fn catalog_load(&self) -> &LoadOutcome { &self.catalog_load }
    pub fn history(&self) -> &HistoryStore { &self.history }
    pub fn schedule(&self) -> &ScheduleConfig { &self.schedule }
    pub fn email(&self) -> &EmailConfig { &self.email }
    pub fn alerts_enabled(&self) -> bool { self.notifier.is_some() }

    /* ---------- catalog mutations ---------- */

    pub fn add_product(&mut self, url: &str) -> Result<AddOutcome> {
        let url = url.trim();
        let id = ProductId::from_url(url);
        if self.catalog.contains(&id) {
            warn!("Add: {id} already tracked");
            return Err(TrackerError::Duplicate(id.to_string()));
        }

        let Listing { name, price } = self.fetcher.fetch(url)?;
        let product = Product::new(url, &name, price);
        self.catalog.insert(id.clone(), product.clone());
        info!("Add: {id} '{name}' @ {price:.2}");

        let timestamp = now_stamp();
        let mut warnings = Vec::new();

        let record = HistoryRecord {
            timestamp: timestamp.clone(),
            name: name.clone(),
            price,
            url: s!(url),
            product_id: id.clone(),
        };
        if let Err(e) = self.history.append(&record) {
            error!("Add: {e}");
            warnings.push(e.to_string());
        }
        if let Err(e) = self.catalog_store.save(&self.catalog) {
            error!("Add: {e}");
            warnings.push(e.to_string());
        }

        self.announce(&Alert { name, url: s!(url), price, event: ChangeEvent::New, timestamp });

        Ok(AddOutcome { id, product, warnings })
    }

    /// Drop from the catalog only; the product's history stays.
    pub fn remove_product(&mut self, id: &ProductId) -> Result<RemoveOutcome> {
        let product = self
            .catalog
            .remove(id)
            .ok_or_else(|| TrackerError::NotTracked(id.to_string()))?;
        info!("Remove: {id} '{}'", product.name);

        let mut warnings = Vec::new();
        if let Err(e) = self.catalog_store.save(&self.catalog) {
            error!("Remove: {e}");
            warnings.push(e.to_string());
        }
        Ok(RemoveOutcome { id: id.clone(), product, warnings })
    }

    /// Remove by 1-based position in the listing order.
    pub fn remove_at(&mut self, position: usize) -> Result<RemoveOutcome> {
        let id = self
            .catalog
            .id_at(position)
            .cloned()
            .ok_or_else(|| TrackerError::NotTracked(format!("#{position}")))?;
        self.remove_product(&id)
    }

    /* ---------- checking ---------- */

    /// Fetch every tracked product in catalog order, record and announce
    /// changes. One bad product never stops the run.
    pub fn check_all(&mut self, progress: &mut dyn Progress) -> CheckSummary {
        let mut summary = CheckSummary::default();
        if self.catalog.is_empty() {
            progress.log("No products to check. Add some products first.");
            return summary;
        }

        let ids = self.catalog.ids();
        info!("Check: {} product(s)", ids.len());
        progress.begin(ids.len());

        let timestamp = now_stamp();
        let mut dirty = false;

        for (i, id) in ids.iter().enumerate() {
            if i > 0 {
                pause(self.options.request_pause);
            }
            let Some(product) = self.catalog.get(id) else { continue };
            let url = product.url.clone();
            progress.item_start(id, &product.name);

            let listing = match self.fetcher.fetch(&url) {
                Ok(l) => l,
                Err(e) => {
                    warn!("Check: skipping {id}: {e}");
                    progress.item_failed(id, &e);
                    summary.failed += 1;
                    continue;
                }
            };
            summary.checked += 1;

            if let Some(p) = self.catalog.get_mut(id) {
                if p.name != listing.name {
                    info!("Check: {id} name → '{}'", listing.name);
                    p.name = listing.name.clone();
                    dirty = true;
                }
            }

            let last_logged = self.last_logged_price(id);
            let event = detect(listing.price, last_logged);
            progress.item_done(id, listing.price, &event);

            if !event.is_recordable() {
                continue;
            }

            let record = HistoryRecord {
                timestamp: timestamp.clone(),
                name: listing.name.clone(),
                price: listing.price,
                url: url.clone(),
                product_id: id.clone(),
            };
            match self.history.append(&record) {
                Ok(()) => summary.changed += 1,
                Err(e) => {
                    error!("Check: {e}");
                    summary.warnings.push(e.to_string());
                }
            }

            if let Some(p) = self.catalog.get_mut(id) {
                p.last_price = Some(listing.price);
            }
            dirty = true;

            self.announce(&Alert {
                name: listing.name,
                url,
                price: listing.price,
                event,
                timestamp: timestamp.clone(),
            });
        }

        if dirty {
            match self.catalog_store.save(&self.catalog) {
                Ok(()) => summary.catalog_saved = Some(true),
                Err(e) => {
                    error!("Check: {e}");
                    summary.warnings.push(e.to_string());
                    summary.catalog_saved = Some(false);
                }
            }
        }

        info!(
            "Check: done checked={} changed={} failed={}",
            summary.checked, summary.changed, summary.failed
        );
        progress.finish();
        summary
    }

    /// Last price in history. If the history cannot be read, fall back to the
    /// catalog's cached price so one bad read doesn't look like a new product.
    fn last_logged_price(&self, id: &ProductId) -> Option<f64> {
        match self.history.last_price(id) {
            Ok(p) => p,
            Err(e) => {
                error!("Check: history unreadable ({e}); using cached price for {id}");
                self.catalog.get(id).and_then(|p| p.last_price)
            }
        }
    }

    fn announce(&self, alert: &Alert) {
        if let Some(n) = &self.notifier {
            if let Err(e) = n.notify(alert) {
                error!("Email: {e}");
            }
        }
    }

    /* ---------- settings ---------- */

    pub fn set_check_time(&mut self, time: CheckTime) -> Result<()> {
        self.schedule.set_time(time);
        info!("Schedule: daily at {time}");
        self.schedule.save(&self.options.schedule_path())
    }

    /// `Some` enables alerts with these settings, `None` disables them
    /// (and removes the saved config).
    pub fn configure_email(&mut self, settings: Option<EmailSettings>) -> Result<()> {
        match settings {
            Some(s) => {
                self.notifier = Some(Box::new(EmailNotifier::new(s.clone())));
                self.email = EmailConfig::enabled(s);
                info!("Email: alerts enabled");
            }
            None => {
                self.notifier = None;
                self.email = EmailConfig::default();
                info!("Email: alerts disabled");
            }
        }
        self.email.save(&self.options.email_path())
    }
}

fn pause(d: Duration) {
    if !d.is_zero() {
        thread::sleep(d);
    }
}
