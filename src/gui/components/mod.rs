// src/gui/components/mod.rs
pub mod add_bar;
pub mod product_table;
pub mod settings_panel;
