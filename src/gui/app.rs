// src/gui/app.rs
use std::{
    error::Error,
    sync::{Arc, Mutex},
    time::Duration,
};

use chrono::Local;
use eframe::egui;
use log::{info, LevelFilter};

use crate::{
    config::{
        consts::SCHEDULER_TICK_SECS,
        state::{AppOptions, GuiState},
    },
    file, logging,
    schedule::Scheduler,
    specs::HttpFetcher,
    store::LoadOutcome,
    tracker::Tracker,
};

use super::{actions, components};

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    let app_options = AppOptions::from_env();
    file::ensure_directory(&app_options.data_dir)?;
    logging::init(&app_options.data_dir, LevelFilter::Info);

    let tracker = Tracker::open(app_options, Box::new(HttpFetcher::new()?));

    eframe::run_native(
        "Price Watch",
        options,
        Box::new(move |_cc| Ok(Box::new(App::new(tracker)))),
    )?;
    Ok(())
}

pub struct App {
    // single source of truth (UI thread only)
    pub tracker: Tracker,
    pub gui: GuiState,
    pub scheduler: Scheduler,

    // status line (progress writes here)
    pub status: Arc<Mutex<String>>,
    pub running: bool,
}

impl App {
    pub fn new(tracker: Tracker) -> Self {
        let mut gui = GuiState {
            time_input: tracker.schedule().check_time.clone(),
            ..GuiState::default()
        };
        if let Some(s) = tracker.email().active() {
            gui.email_user = s.username.clone();
            gui.email_to = s.recipient.clone();
        }

        let status = match tracker.catalog_load() {
            LoadOutcome::Missing => s!("No products yet"),
            LoadOutcome::Loaded(n) => format!("Loaded {n} tracked product(s)"),
            LoadOutcome::Corrupt(e) => format!("Products file unreadable, starting empty: {e}"),
        };
        info!("GUI: init, {status}");

        Self {
            tracker,
            gui,
            scheduler: Scheduler::new(),
            status: Arc::new(Mutex::new(status)),
            running: false,
        }
    }

    #[inline]
    pub fn status<T: Into<String>>(&self, msg: T) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }

    pub fn status_text(&self) -> String {
        self.status.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Fire a due scheduled check and ask to be woken for the next tick.
    fn poll_scheduler(&mut self, ctx: &egui::Context) {
        if !self.scheduler.is_armed() {
            return;
        }
        if self.scheduler.poll(Local::now().naive_local()) {
            info!("GUI: scheduled check");
            actions::check(self);
        }
        ctx.request_repaint_after(Duration::from_secs(SCHEDULER_TICK_SECS));
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_scheduler(ctx);

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.add_space(4.0);
            components::add_bar::draw(ui, self);
            ui.separator();
            components::settings_panel::draw(ui, self);
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.running {
                    ui.add(egui::Spinner::new().size(14.0));
                }
                ui.label(self.status_text());
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            components::product_table::draw(ui, self);
        });
    }
}
