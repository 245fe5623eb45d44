mod api;
mod app;
mod catalog;
mod event;
mod notify;
mod theme;
mod ui;

use api::{ApiClient, DEFAULT_BASE_URL};
use app::StorefrontApp;
use eframe::egui;
use std::sync::mpsc;
use theme::Theme;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let (tx, rx) = mpsc::channel();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("vitrine-runtime")
        .build()?;

    let api = runtime.block_on(async { ApiClient::new(DEFAULT_BASE_URL, tx.clone()) })?;
    api.spawn_initial_load();

    let app = StorefrontApp::new(rx, api);
    let _runtime = runtime;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Vitrine",
        native_options,
        Box::new(move |creation_context| {
            Theme::default().apply_visuals(&creation_context.egui_ctx);
            Ok(Box::new(app))
        }),
    )?;

    Ok(())
}
