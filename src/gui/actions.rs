// src/gui/actions.rs
//
// Button actions. Layout lives in components/, the operations here.
// Everything runs on the UI thread.

use chrono::Local;
use log::{info, warn};

use crate::{
    config::options::EmailSettings,
    error::TrackerError,
    gui::{app::App, progress::GuiProgress},
    product::{looks_like_listing_url, ProductId},
    schedule::CheckTime,
};

pub fn add(app: &mut App) {
    let url = s!(app.gui.url_input.trim());
    if !looks_like_listing_url(&url) {
        app.status("Invalid product URL");
        return;
    }

    match app.tracker.add_product(&url) {
        Ok(out) => {
            app.gui.url_input.clear();
            let price = out.product.last_price.unwrap_or_default();
            if out.fully_saved() {
                app.status(format!("Added: {} (${price:.2})", out.product.name));
            } else {
                app.status(format!(
                    "Added: {} (${price:.2}), but saving failed: {}",
                    out.product.name,
                    out.warnings.join("; ")
                ));
            }
        }
        Err(TrackerError::Duplicate(id)) => app.status(format!("Already tracked (ID: {id})")),
        Err(e) => app.status(format!("Not added: {e}")),
    }
}

pub fn remove(app: &mut App, id: &ProductId) {
    match app.tracker.remove_product(id) {
        Ok(out) if out.warnings.is_empty() => app.status(format!("Removed: {}", out.product.name)),
        Ok(out) => app.status(format!("Removed: {} (save failed)", out.product.name)),
        Err(e) => app.status(format!("Error: {e}")),
    }
}

pub fn check(app: &mut App) {
    app.running = true;
    let mut prog = GuiProgress::new(app.status.clone());
    let summary = app.tracker.check_all(&mut prog);
    if summary.catalog_saved == Some(false) {
        app.status(format!("Check done, but saving failed: {}", summary.warnings.join("; ")));
    }
    app.running = false;
}

/// Parse the time field, persist it, and re-arm if the scheduler is running.
pub fn save_time(app: &mut App) -> Option<CheckTime> {
    let time = match CheckTime::parse(&app.gui.time_input) {
        Ok(t) => t,
        Err(e) => {
            app.status(e.to_string());
            return None;
        }
    };
    if let Err(e) = app.tracker.set_check_time(time) {
        warn!("GUI: {e}");
        app.status(format!("Schedule not saved: {e}"));
    } else {
        app.status(format!("Schedule time set to {time}"));
    }
    if app.scheduler.is_armed() {
        app.scheduler.arm(time, Local::now().naive_local());
    }
    Some(time)
}

pub fn arm(app: &mut App) {
    let Some(time) = save_time(app) else { return };
    app.scheduler.arm(time, Local::now().naive_local());
    if let Some(next) = app.scheduler.next_run() {
        info!("GUI: scheduler armed, next {next}");
        app.status(format!("Daily check at {time}, next {}", next.format("%Y-%m-%d %H:%M")));
    }
}

pub fn disarm(app: &mut App) {
    app.scheduler.disarm();
    info!("GUI: scheduler stopped");
    app.status("Scheduler stopped");
}

pub fn enable_email(app: &mut App) {
    let g = &app.gui;
    if g.email_user.trim().is_empty() || g.email_to.trim().is_empty() || g.email_pass.is_empty() {
        app.status("Fill in address, app password and recipient");
        return;
    }
    let settings = EmailSettings::gmail(g.email_user.trim(), g.email_pass.trim(), g.email_to.trim());
    match app.tracker.configure_email(Some(settings)) {
        Ok(()) => app.status("Email alerts enabled and saved"),
        Err(e) => app.status(format!("Email alerts enabled (save failed: {e})")),
    }
    app.gui.email_pass.clear();
    app.gui.email_open = false;
}

pub fn disable_email(app: &mut App) {
    match app.tracker.configure_email(None) {
        Ok(()) => app.status("Email alerts disabled"),
        Err(e) => app.status(format!("Email alerts disabled ({e})")),
    }
}
