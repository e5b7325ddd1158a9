mod backend_bridge;
mod controller;
mod ui;

use anyhow::Context as _;
use clap::Parser;
use client_core::{
    config::{load_settings, normalize_base_url},
    PageLocation,
};
use eframe::egui;

use crate::ui::theme::{PersistedGuiSettings, SETTINGS_STORAGE_KEY};
use crate::ui::{HeroesApp, StartupConfig};

#[derive(Debug, Parser)]
#[command(name = "heroes_gui", about = "Desktop superhero roster")]
struct Args {
    /// Roster service base URL; overrides heroes.toml and the environment.
    #[arg(long)]
    api_base_url: Option<String>,
    /// Page location to open, e.g. `?order=dsc` or `heroes://roster/?order=dsc`.
    #[arg(long)]
    location: Option<String>,
    /// Keep the roster in memory instead of talking to the service.
    #[arg(long, default_value_t = false)]
    local: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let mut settings = load_settings();
    if let Some(api_base_url) = args.api_base_url.as_deref() {
        settings.api_base_url = normalize_base_url(api_base_url);
    }
    let location = args
        .location
        .as_deref()
        .map(PageLocation::parse)
        .transpose()
        .with_context(|| format!("invalid --location {:?}", args.location))?;

    let startup = StartupConfig {
        api_base_url: settings.api_base_url.clone(),
        location,
        configured_location: settings.location(),
        local: args.local,
    };
    tracing::info!(
        api_base_url = %startup.api_base_url,
        local = startup.local,
        "starting heroes desktop gui"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Superhero Roster")
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([760.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Superhero Roster",
        options,
        Box::new(move |cc| {
            let persisted = cc.storage.and_then(|storage| {
                storage
                    .get_string(SETTINGS_STORAGE_KEY)
                    .and_then(|text| PersistedGuiSettings::from_json(&text))
            });
            Ok(Box::new(HeroesApp::bootstrap(startup, persisted)))
        }),
    )
    .map_err(|err| anyhow::anyhow!("desktop gui exited with error: {err}"))
}
