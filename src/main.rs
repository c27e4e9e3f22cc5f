#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod config;
mod core;
mod ui;
mod utils;

use app::HtmlPngConverterApp;
use eframe::egui;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "HTML/CSS to PNG Converter",
        options,
        Box::new(|cc| Ok(Box::new(HtmlPngConverterApp::new(cc)))),
    )
}
