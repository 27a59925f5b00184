use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config;
use crate::engine::{EngineCmd, Player, RepeatMode};
use crate::error::Result;
use crate::library::TrackCatalog;

/// Install the stderr subscriber. `RUST_LOG` wins over `default_filter`.
pub fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Commands that bring a fresh engine to the configured starting state.
pub fn startup_commands(
    catalog: &impl TrackCatalog,
    settings: &config::Settings,
) -> Vec<EngineCmd> {
    let mut cmds = vec![EngineCmd::SetRepeat(RepeatMode::from(settings.playback.repeat))];

    if settings.playback.enqueue_catalog {
        cmds.extend(catalog.tracks().into_iter().map(EngineCmd::Enqueue));
    }
    // Shuffle last so the freshly queued catalog is what gets shuffled.
    if settings.playback.shuffle {
        cmds.push(EngineCmd::ToggleShuffle);
    }
    cmds
}

pub fn apply_playback_defaults(
    player: &Player,
    catalog: &impl TrackCatalog,
    settings: &config::Settings,
) -> Result<()> {
    let cmds = startup_commands(catalog, settings);
    info!(commands = cmds.len(), "applying playback defaults");
    for cmd in cmds {
        player.send(cmd)?;
    }
    Ok(())
}
