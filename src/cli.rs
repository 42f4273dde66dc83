// src/cli.rs
//
// Terminal front end: one-shot flags, or the numbered menu when no action
// flag is given.

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use chrono::Local;
use clap::Parser;
use color_eyre::eyre::eyre;
use log::LevelFilter;

use crate::{
    config::{
        consts::{SCHEDULER_TICK_SECS, TIMESTAMP_FMT},
        options::EmailSettings,
        state::AppOptions,
    },
    detect::ChangeEvent,
    error::TrackerError,
    file, logging,
    product::{looks_like_listing_url, ProductId},
    progress::Progress,
    schedule::{CheckTime, Scheduler},
    specs::HttpFetcher,
    tracker::{CheckSummary, Tracker},
};

const RULE: &str = "--------------------------------------------------";

#[derive(Parser, Debug)]
#[command(name = "pricewatch", version, about = "Track product prices and get told when they move")]
pub struct Args {
    /// Start tracking a product URL
    #[arg(long, value_name = "URL")]
    pub add: Option<String>,

    /// Stop tracking the product at this position in --list
    #[arg(long, value_name = "N")]
    pub remove: Option<usize>,

    /// Print tracked products
    #[arg(long)]
    pub list: bool,

    /// Check all prices once
    #[arg(long)]
    pub check: bool,

    /// Set the daily check time
    #[arg(long, value_name = "HH:MM")]
    pub schedule: Option<CheckTime>,

    /// Run the daily scheduler until Ctrl+C
    #[arg(long)]
    pub run_scheduler: bool,

    /// Where the history, catalog and settings live (default: $PRICEWATCH_DIR or .)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose debug log
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    fn has_action(&self) -> bool {
        self.add.is_some()
            || self.remove.is_some()
            || self.list
            || self.check
            || self.schedule.is_some()
            || self.run_scheduler
    }
}

/// Ctrl+C wiring. The handler can only be installed once per process, so it
/// stops the scheduler while one runs and exits otherwise.
#[derive(Clone)]
struct Signals {
    scheduling: Arc<AtomicBool>,
    stop: Arc<AtomicBool>,
}

impl Signals {
    fn install() -> color_eyre::Result<Self> {
        let signals = Self {
            scheduling: Arc::new(AtomicBool::new(false)),
            stop: Arc::new(AtomicBool::new(false)),
        };
        let s = signals.clone();
        ctrlc::set_handler(move || {
            if s.scheduling.load(Ordering::SeqCst) {
                s.stop.store(true, Ordering::SeqCst);
            } else {
                std::process::exit(130);
            }
        })?;
        Ok(signals)
    }
}

pub fn run() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let mut options = AppOptions::from_env();
    if let Some(dir) = &args.data_dir {
        options = options.with_data_dir(dir);
    }
    file::ensure_directory(&options.data_dir)?;
    let level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    logging::init(&options.data_dir, level);

    let signals = Signals::install()?;
    let mut tracker = Tracker::open(options, Box::new(HttpFetcher::new()?));
    print_startup(&tracker);

    if args.has_action() {
        run_flags(&mut tracker, &args, &signals)
    } else {
        menu(&mut tracker, &signals)
    }
}

fn print_startup(tracker: &Tracker) {
    use crate::store::LoadOutcome;
    match tracker.catalog_load() {
        LoadOutcome::Missing => {}
        LoadOutcome::Loaded(n) => println!("📂 Loaded {n} tracked products"),
        LoadOutcome::Corrupt(e) => println!("❌ Error loading products file: {e} (starting empty)"),
    }
    if tracker.alerts_enabled() {
        println!("📧 Email alerts loaded and enabled.");
    }
    println!("📅 Loaded schedule: Daily at {}", tracker.schedule().check_time);
}

/* ---------- flags ---------- */

fn run_flags(tracker: &mut Tracker, args: &Args, signals: &Signals) -> color_eyre::Result<()> {
    if let Some(time) = args.schedule {
        tracker.set_check_time(time)?;
        println!("✅ Schedule time set to: {time}");
    }
    if let Some(url) = &args.add {
        add(tracker, url)?;
    }
    if let Some(n) = args.remove {
        remove(tracker, n)?;
    }
    if args.list {
        list(tracker);
    }
    if args.check {
        check(tracker);
    }
    if args.run_scheduler {
        start_scheduler(tracker, signals);
    }
    Ok(())
}

/* ---------- menu ---------- */

fn menu(tracker: &mut Tracker, signals: &Signals) -> color_eyre::Result<()> {
    loop {
        println!("\n{}", "=".repeat(RULE.len()));
        println!("📦 Price Tracker");
        println!("{}", "=".repeat(RULE.len()));
        println!("1. Add product to track");
        println!("2. Remove product");
        println!("3. List tracked products");
        println!("4. Check all prices now");
        println!("5. Start scheduled monitoring");
        println!("6. Configure email alerts");
        println!("7. Change schedule time");
        println!("8. Exit");
        println!("{RULE}");
        println!("📅 Current schedule: Daily at {}", tracker.schedule().check_time);
        println!(
            "📧 Email alerts: {}",
            if tracker.alerts_enabled() { "Enabled" } else { "Disabled" }
        );
        println!("📦 Tracked products: {}", tracker.catalog().len());
        println!("{RULE}");

        let Some(choice) = prompt("Select an option (1-8): ")? else {
            return Ok(());
        };

        // Operation errors are shown and the menu continues.
        let outcome = match choice.as_str() {
            "1" => menu_add(tracker),
            "2" => menu_remove(tracker),
            "3" => {
                list(tracker);
                Ok(())
            }
            "4" => {
                check(tracker);
                Ok(())
            }
            "5" => menu_scheduler(tracker, signals),
            "6" => menu_email(tracker),
            "7" => menu_schedule_time(tracker),
            "8" => {
                println!("👋 Goodbye!");
                return Ok(());
            }
            _ => {
                println!("❌ Invalid option. Please try again.");
                Ok(())
            }
        };
        if let Err(e) = outcome {
            println!("❌ {e}");
        }
    }
}

fn menu_add(tracker: &mut Tracker) -> color_eyre::Result<()> {
    let Some(url) = prompt("\n🔗 Enter product URL: ")? else { return Ok(()) };
    if !looks_like_listing_url(&url) {
        println!("❌ Invalid product URL.");
        return Ok(());
    }
    add(tracker, &url)
}

fn menu_remove(tracker: &mut Tracker) -> color_eyre::Result<()> {
    if tracker.catalog().is_empty() {
        println!("❌ No products are currently being tracked.");
        return Ok(());
    }
    println!("\n📋 Currently tracked products:");
    for (i, (id, p)) in tracker.catalog().iter().enumerate() {
        println!("{}. {} (ID: {id})", i + 1, p.name);
    }
    let Some(text) = prompt("\nEnter the number of the product to remove (0 to cancel): ")? else {
        return Ok(());
    };
    match text.parse::<usize>() {
        Ok(0) => Ok(()),
        Ok(n) => remove(tracker, n),
        Err(_) => {
            println!("❌ Invalid input.");
            Ok(())
        }
    }
}

fn menu_scheduler(tracker: &mut Tracker, signals: &Signals) -> color_eyre::Result<()> {
    if tracker.catalog().is_empty() {
        println!("❌ No products to monitor. Add some products first.");
        return Ok(());
    }
    menu_schedule_time(tracker)?;
    start_scheduler(tracker, signals);
    Ok(())
}

fn menu_schedule_time(tracker: &mut Tracker) -> color_eyre::Result<()> {
    println!("\n⏰ Schedule Configuration");
    println!("Current scheduled time: {}", tracker.schedule().check_time);
    println!("Examples: 09:00, 14:30, 22:15");
    loop {
        let Some(text) =
            prompt("Enter your preferred check time (HH:MM) or press Enter to use current: ")?
        else {
            return Ok(());
        };
        if text.is_empty() {
            println!("✅ Using current time: {}", tracker.schedule().check_time);
            return Ok(());
        }
        match CheckTime::parse(&text) {
            Ok(time) => {
                if let Err(e) = tracker.set_check_time(time) {
                    println!("⚠️  Could not save schedule config: {e}");
                }
                println!("✅ Schedule time set to: {time}");
                return Ok(());
            }
            Err(e) => println!("❌ {e}"),
        }
    }
}

fn menu_email(tracker: &mut Tracker) -> color_eyre::Result<()> {
    let Some(choice) = prompt("📧 Enable email alerts for price changes? (yes/no): ")? else {
        return Ok(());
    };
    if !matches!(choice.to_lowercase().as_str(), "yes" | "y") {
        tracker.configure_email(None)?;
        println!("❎ Email alerts disabled.");
        return Ok(());
    }

    let ask = |label: &str| -> color_eyre::Result<String> {
        prompt(label)?.ok_or_else(|| eyre!("input closed"))
    };
    let username = ask("📨 Your Gmail address: ")?;
    let password = ask("🔐 App password (not your main Gmail password): ")?;
    let recipient = ask("📬 Recipient email: ")?;

    match tracker.configure_email(Some(EmailSettings::gmail(&username, &password, &recipient))) {
        Ok(()) => println!("✅ Email alerts enabled and configuration saved."),
        Err(e) => println!("✅ Email alerts enabled (config save failed: {e})."),
    }
    Ok(())
}

/* ---------- shared actions ---------- */

fn add(tracker: &mut Tracker, url: &str) -> color_eyre::Result<()> {
    println!("🔍 Fetching product details...");
    match tracker.add_product(url) {
        Ok(out) => {
            let price = out.product.last_price.unwrap_or_default();
            println!("✅ Added: {} (${price:.2})", out.product.name);
            if out.fully_saved() {
                println!("🎉 Product successfully added and all data saved!");
            } else {
                for w in &out.warnings {
                    println!("⚠️  {w}");
                }
                println!("⚠️  Product added but there were saving issues.");
            }
            Ok(())
        }
        Err(TrackerError::Duplicate(id)) => {
            println!("⚠️  Product already being tracked (ID: {id})");
            Ok(())
        }
        Err(e) => {
            if e.is_per_product() {
                println!("❌ Could not fetch product details. Product not added.");
            }
            Err(e.into())
        }
    }
}

fn remove(tracker: &mut Tracker, position: usize) -> color_eyre::Result<()> {
    match tracker.remove_at(position) {
        Ok(out) if out.warnings.is_empty() => println!("✅ Removed: {} (saved)", out.product.name),
        Ok(out) => println!("⚠️  Removed: {} (but save failed)", out.product.name),
        Err(TrackerError::NotTracked(_)) => println!("❌ Invalid selection."),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn list(tracker: &Tracker) {
    let catalog = tracker.catalog();
    if catalog.is_empty() {
        println!("❌ No products are currently being tracked.");
        return;
    }
    let line = "-".repeat(80);
    println!("\n📋 Tracked Products ({}):", catalog.len());
    println!("{line}");
    for (i, (id, p)) in catalog.iter().enumerate() {
        println!("{}. ID: {id}", i + 1);
        println!("   Name: {}", p.name);
        match p.last_price {
            Some(price) => println!("   Last Price: ${price:.2}"),
            None => println!("   Last Price: N/A"),
        }
        println!("   URL: {}", p.url);
        println!("{line}");
    }
}

fn check(tracker: &mut Tracker) {
    let summary = tracker.check_all(&mut ConsoleProgress::default());
    print_summary(&summary);
}

fn print_summary(s: &CheckSummary) {
    if s.checked == 0 && s.failed == 0 {
        return;
    }
    match s.catalog_saved {
        Some(true) => println!("\n✅ All changes saved successfully!"),
        Some(false) => println!("\n⚠️  Some changes may not have been saved."),
        None => {}
    }
    for w in &s.warnings {
        println!("⚠️  {w}");
    }
    println!(
        "\n🎯 Price check completed: {} checked, {} price changes saved, {} skipped.",
        s.checked, s.changed, s.failed
    );
}

fn start_scheduler(tracker: &mut Tracker, signals: &Signals) {
    let at = tracker.schedule().time();
    let mut scheduler = Scheduler::new();
    scheduler.arm(at, Local::now().naive_local());

    println!("\n⏰ Scheduled daily check at {at}");
    println!("📦 Monitoring {} products", tracker.catalog().len());
    println!("Press Ctrl+C to stop the scheduler");
    println!("{RULE}");
    if let Some(next) = scheduler.next_run() {
        println!("🕐 Next check scheduled for: {}", next.format(TIMESTAMP_FMT));
    }

    signals.stop.store(false, Ordering::SeqCst);
    signals.scheduling.store(true, Ordering::SeqCst);
    let runs = scheduler.run_until(
        &signals.stop,
        Duration::from_secs(SCHEDULER_TICK_SECS),
        || Local::now().naive_local(),
        || check(tracker),
    );
    signals.scheduling.store(false, Ordering::SeqCst);

    println!("\n\n👋 Scheduler stopped after {runs} check(s).");
    println!("Your products are still tracked. Run again to resume monitoring.");
}

/// One trimmed line from stdin; `None` on EOF.
fn prompt(label: &str) -> io::Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(s!(line.trim())))
}

/// Prints per-product lines as a check runs.
#[derive(Default)]
struct ConsoleProgress {
    total: usize,
    current: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        println!("\n🔍 Checking {total} products...");
    }

    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn item_start(&mut self, _id: &ProductId, name: &str) {
        self.current += 1;
        println!("\n📦 [{}/{}] Checking: {name}", self.current, self.total);
    }

    fn item_done(&mut self, _id: &ProductId, price: f64, event: &ChangeEvent) {
        match *event {
            ChangeEvent::New => println!("💲 First price check: ${price:.2}"),
            ChangeEvent::Dropped { previous, delta } => {
                println!("💲 Price changed 📉: ${price:.2} (was ${previous:.2}, change: -${delta:.2})")
            }
            ChangeEvent::Increased { previous, delta } => {
                println!("💲 Price changed 📈: ${price:.2} (was ${previous:.2}, change: +${delta:.2})")
            }
            ChangeEvent::Unchanged => println!("⏸️  No change (still ${price:.2})"),
        }
    }

    fn item_failed(&mut self, id: &ProductId, err: &TrackerError) {
        println!("⏭️  Skipping product {id}: {err}");
    }
}
