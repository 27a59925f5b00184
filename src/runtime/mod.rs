//! Console front end: a stand-in presentation layer that reads commands
//! from stdin and prints snapshots.

use std::env;
use std::path::Path;

use tracing::info;

use crate::config::LoggingSettings;
use crate::engine::Player;
use crate::library::MemoryCatalog;

mod commands;
mod event_loop;
mod settings;
mod startup;
mod status;


pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let loaded = settings::load_settings();
    let filter = loaded
        .as_ref()
        .map(|s| s.logging.filter.clone())
        .unwrap_or_else(|_| LoggingSettings::default().filter);
    startup::init_logging(&filter);
    let settings = settings::or_defaults(loaded);

    let catalog_path = env::args()
        .nth(1)
        .ok_or("usage: allegro <catalog.toml>")?;
    let catalog = MemoryCatalog::load(Path::new(&catalog_path))?;
    info!(path = %catalog_path, tracks = catalog.len(), "catalog ready");

    let player = Player::new(settings.engine.clone())?;
    startup::apply_playback_defaults(&player, &catalog, &settings)?;

    event_loop::run(&player, &catalog, &settings)
}
