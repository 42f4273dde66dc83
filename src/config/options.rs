// src/config/options.rs
//
// Persisted settings: schedule time and email alerts. Absent or unreadable
// files fall back to defaults; nothing here is ever fatal.

use std::fmt;
use std::path::Path;

use chrono::Local;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::consts::*;
use crate::{
    error::Result,
    file::{read_json, remove_if_exists, write_json},
    schedule::CheckTime,
};

/* ---------------- Schedule ---------------- */

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub check_time: String,
    #[serde(default)]
    pub last_updated: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self { check_time: s!(DEFAULT_CHECK_TIME), last_updated: s!() }
    }
}

impl ScheduleConfig {
    /// Validated time; the default when the stored value is bad.
    pub fn time(&self) -> CheckTime {
        CheckTime::parse(&self.check_time).unwrap_or_default()
    }

    pub fn set_time(&mut self, time: CheckTime) {
        self.check_time = time.to_string();
        self.last_updated = Local::now().format(TIMESTAMP_FMT).to_string();
    }

    pub fn load(path: &Path) -> Self {
        match read_json::<ScheduleConfig>(path) {
            Ok(Some(cfg)) => {
                if CheckTime::parse(&cfg.check_time).is_err() {
                    warn!("Schedule: invalid stored time '{}', using {}", cfg.check_time, DEFAULT_CHECK_TIME);
                    return Self::default();
                }
                info!("Schedule: loaded daily at {}", cfg.check_time);
                cfg
            }
            Ok(None) => Self::default(),
            Err(e) => {
                warn!("Schedule: {e}; using {}", DEFAULT_CHECK_TIME);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_json(path, self)
    }
}

/* ---------------- Email ---------------- */

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailSettings {
    pub smtp_server: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    pub recipient: String,
}

impl EmailSettings {
    pub fn gmail(username: &str, password: &str, recipient: &str) -> Self {
        Self {
            smtp_server: s!(DEFAULT_SMTP_SERVER),
            smtp_port: DEFAULT_SMTP_PORT,
            username: s!(username.trim()),
            password: s!(password.trim()),
            recipient: s!(recipient.trim()),
        }
    }
}

// Never print the password.
impl fmt::Debug for EmailSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailSettings")
            .field("smtp_server", &self.smtp_server)
            .field("smtp_port", &self.smtp_port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("recipient", &self.recipient)
            .finish()
    }
}

/// On-disk shape of the email config file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailConfig {
    #[serde(default)]
    pub email_enabled: bool,
    #[serde(default)]
    pub email_config: Option<EmailSettings>,
}

impl EmailConfig {
    pub fn enabled(settings: EmailSettings) -> Self {
        Self { email_enabled: true, email_config: Some(settings) }
    }

    /// Settings to use, only when alerts are switched on.
    pub fn active(&self) -> Option<&EmailSettings> {
        if self.email_enabled { self.email_config.as_ref() } else { None }
    }

    pub fn load(path: &Path) -> Self {
        match read_json::<EmailConfig>(path) {
            Ok(Some(cfg)) => {
                if cfg.active().is_some() {
                    info!("Email: alerts loaded and enabled");
                }
                cfg
            }
            Ok(None) => Self::default(),
            Err(e) => {
                warn!("Email: {e}; alerts disabled");
                Self::default()
            }
        }
    }

    /// Enabled → write the file. Disabled → remove it.
    pub fn save(&self, path: &Path) -> Result<()> {
        if self.active().is_some() {
            write_json(path, self)
        } else {
            remove_if_exists(path)
        }
    }
}
