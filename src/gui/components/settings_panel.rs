// src/gui/components/settings_panel.rs
//
// Schedule time + arm/disarm, and the email alert settings.

use eframe::egui;

use crate::gui::{actions, app::App};

#[derive(Clone, Copy)]
enum Click {
    SaveTime,
    Arm,
    Disarm,
    EnableEmail,
    DisableEmail,
}

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let mut click = None;

    ui.horizontal(|ui| {
        ui.label("Daily check at:");
        ui.add(
            egui::TextEdit::singleline(&mut app.gui.time_input)
                .hint_text("HH:MM")
                .desired_width(56.0)
                .font(egui::TextStyle::Monospace),
        );
        if ui.button("Save").clicked() {
            click = Some(Click::SaveTime);
        }

        if app.scheduler.is_armed() {
            if ui.button("Stop schedule").clicked() {
                click = Some(Click::Disarm);
            }
            if let Some(next) = app.scheduler.next_run() {
                ui.label(format!("next: {}", next.format("%Y-%m-%d %H:%M")));
            }
        } else if ui
            .add_enabled(!app.tracker.catalog().is_empty(), egui::Button::new("Start schedule"))
            .on_disabled_hover_text("Add some products first")
            .clicked()
        {
            click = Some(Click::Arm);
        }

        ui.separator();

        let enabled = app.tracker.alerts_enabled();
        ui.label(if enabled { "📧 Email alerts: on" } else { "📧 Email alerts: off" });
        ui.toggle_value(&mut app.gui.email_open, "Settings…");
        if enabled && ui.button("Disable").clicked() {
            click = Some(Click::DisableEmail);
        }
    });

    if app.gui.email_open {
        egui::Grid::new("email_form").num_columns(2).show(ui, |ui| {
            ui.label("Gmail address:");
            ui.text_edit_singleline(&mut app.gui.email_user);
            ui.end_row();

            ui.label("App password:");
            ui.add(egui::TextEdit::singleline(&mut app.gui.email_pass).password(true));
            ui.end_row();

            ui.label("Recipient:");
            ui.text_edit_singleline(&mut app.gui.email_to);
            ui.end_row();
        });
        if ui.button("Enable alerts").clicked() {
            click = Some(Click::EnableEmail);
        }
    }

    match click {
        Some(Click::SaveTime) => {
            actions::save_time(app);
        }
        Some(Click::Arm) => actions::arm(app),
        Some(Click::Disarm) => actions::disarm(app),
        Some(Click::EnableEmail) => actions::enable_email(app),
        Some(Click::DisableEmail) => actions::disable_email(app),
        None => {}
    }
}
