// src/gui/components/add_bar.rs
//
// URL entry + Add, and the Check now button.

use eframe::egui;

use crate::gui::{actions, app::App};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let mut add_clicked = false;
    let mut check_clicked = false;

    ui.horizontal(|ui| {
        ui.label("Product URL:");
        let field = ui.add(
            egui::TextEdit::singleline(&mut app.gui.url_input)
                .hint_text("https://www.amazon.com/dp/…")
                .desired_width(480.0),
        );
        let submitted = field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        let can_add = !app.running && !app.gui.url_input.trim().is_empty();
        if ui.add_enabled(can_add, egui::Button::new("Add")).clicked() || (submitted && can_add) {
            add_clicked = true;
        }

        ui.separator();

        let green = egui::Color32::from_rgb(40, 160, 70);
        let check = ui.add_enabled(
            !app.running && !app.tracker.catalog().is_empty(),
            egui::Button::new(egui::RichText::new("CHECK NOW").color(egui::Color32::BLACK).strong())
                .fill(green),
        );
        if check.clicked() {
            check_clicked = true;
        }
    });

    if add_clicked {
        actions::add(app);
    }
    if check_clicked {
        actions::check(app);
    }
}
