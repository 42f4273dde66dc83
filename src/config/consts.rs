// src/config/consts.rs

// Net config
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
pub const FETCH_TIMEOUT_SECS: u64 = 20;
pub const SITE_HOST_HINT: &str = "amazon.";

// Local files (relative to the data dir)
pub const DATA_DIR_ENV: &str = "PRICEWATCH_DIR";
pub const HISTORY_FILE: &str = "amazon_price_history.csv";
pub const CATALOG_FILE: &str = "tracked_products.json";
pub const SCHEDULE_FILE: &str = "schedule_config.json";
pub const EMAIL_FILE: &str = "email_config.json";
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";

pub const HISTORY_HEADERS: [&str; 5] =
    ["Timestamp", "Product Name", "Price (USD)", "Product URL", "Product ID"];
pub const TIMESTAMP_FMT: &str = "%Y-%m-%d %H:%M:%S";

// Change detection
pub const PRICE_EPSILON: f64 = 0.01;

// Check loop
pub const REQUEST_PAUSE_MS: u64 = 2_000; // be polite

// Scheduler
pub const DEFAULT_CHECK_TIME: &str = "09:00";
pub const SCHEDULER_TICK_SECS: u64 = 60;
pub const STOP_POLL_MS: u64 = 250;

// Mail
pub const DEFAULT_SMTP_SERVER: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;
