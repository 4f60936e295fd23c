/**
 * Storefront Desktop App - Main Entry Point
 *
 * Loads configuration, connects to the hosted backend and hands control to
 * eframe. Everything else lives in the library.
 */
use std::sync::Arc;

use eframe::egui;
use storefront::egui_app::backend::{RemoteBackend, SupabaseClient};
use storefront::egui_app::theme::styles;
use storefront::egui_app::{views, AppState, Config, Worker};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_filter().to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();
    tracing::info!("[STARTUP] connecting to {}", config.supabase_url());

    let backend: Arc<dyn RemoteBackend> = Arc::new(SupabaseClient::from_config(config.app())?);
    let worker = Worker::new()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([480.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Storefront",
        options,
        Box::new(move |cc| {
            styles::apply_global_theme(&cc.egui_ctx);
            let state = AppState::new(config, backend, worker);
            state.start();
            Ok(Box::new(StorefrontApp { state }))
        }),
    )?;
    Ok(())
}

/// Main application state
struct StorefrontApp {
    state: AppState,
}

impl eframe::App for StorefrontApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.process_events();

        views::render_top_bar(ctx, &mut self.state);
        views::render_main_panel(ctx, &mut self.state);
        views::render_dialogs(ctx, &mut self.state);

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
