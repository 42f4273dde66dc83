// src/gui/components/product_table.rs
//
// Tracked products, in catalog order. Purely a view; the Remove button
// is applied after the table borrow ends.

use eframe::egui::{self, RichText};
use egui_extras::{Column, TableBuilder};

use crate::{
    gui::{actions, app::App},
    product::ProductId,
};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let catalog = app.tracker.catalog();
    if catalog.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.label(RichText::new("No products are being tracked. Paste a URL above.").weak());
        });
        return;
    }

    let mut remove: Option<ProductId> = None;
    let running = app.running;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::exact(28.0))
        .column(Column::initial(360.0).at_least(120.0).clip(true))
        .column(Column::initial(80.0))
        .column(Column::initial(100.0))
        .column(Column::remainder().clip(true))
        .column(Column::exact(70.0))
        .header(20.0, |mut header| {
            for title in ["#", "Name", "Price", "ID", "URL", ""] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for (i, (id, p)) in catalog.iter().enumerate() {
                body.row(20.0, |mut row| {
                    row.col(|ui| {
                        ui.label(format!("{}", i + 1));
                    });
                    row.col(|ui| {
                        ui.label(&p.name).on_hover_text(&p.name);
                    });
                    row.col(|ui| {
                        match p.last_price {
                            Some(price) => ui.monospace(format!("${price:.2}")),
                            None => ui.weak("N/A"),
                        };
                    });
                    row.col(|ui| {
                        ui.monospace(id.as_str());
                    });
                    row.col(|ui| {
                        ui.hyperlink_to(&p.url, &p.url);
                    });
                    row.col(|ui| {
                        if ui.add_enabled(!running, egui::Button::new("Remove")).clicked() {
                            remove = Some(id.clone());
                        }
                    });
                });
            }
        });

    if let Some(id) = remove {
        actions::remove(app, &id);
    }
}
