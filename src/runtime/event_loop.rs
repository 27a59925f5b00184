use std::io::{self, BufRead};
use std::sync::Arc;
use std::thread;

use tracing::{debug, warn};

use crate::config::{self, UiSettings};
use crate::engine::{PlaybackState, Player, RepeatMode};
use crate::library::{MemoryCatalog, TrackId};

use super::commands::{HELP, Input, parse_line};
use super::status::{queue_listing, status_line};

/// The parts of a snapshot worth a new status line; elapsed time alone is not.
#[derive(Debug, PartialEq, Eq)]
struct Headline {
    track: Option<TrackId>,
    playing: bool,
    queued: usize,
    shuffled: bool,
    repeat: RepeatMode,
}

impl Headline {
    fn of(state: &PlaybackState) -> Self {
        Self {
            track: state.current_track.as_ref().map(|t| t.id.clone()),
            playing: state.is_playing,
            queued: state.queue.len(),
            shuffled: state.is_shuffled,
            repeat: state.repeat_mode,
        }
    }
}

fn spawn_printer(player: &Player, ui: UiSettings) {
    let rx = player.subscribe();
    let spawned = thread::Builder::new()
        .name("allegro-printer".to_string())
        .spawn(move || {
            let mut last: Option<Headline> = None;
            for state in rx {
                let headline = Headline::of(&state);
                if last.as_ref() != Some(&headline) {
                    println!("{}", status_line(&state, &ui));
                    last = Some(headline);
                }
            }
        });
    if let Err(e) = spawned {
        warn!(error = %e, "status printer unavailable");
    }
}

/// Read commands from stdin until `quit` or end of input.
pub fn run(
    player: &Player,
    catalog: &MemoryCatalog,
    settings: &config::Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    spawn_printer(player, settings.ui.clone());

    for line in io::stdin().lock().lines() {
        let line = line?;
        match parse_line(&line, catalog, &settings.controls) {
            Ok(None) => {}
            Ok(Some(Input::Quit)) => break,
            Ok(Some(Input::Help)) => println!("{HELP}"),
            Ok(Some(Input::Status)) => {
                let state: Arc<PlaybackState> = player.snapshot();
                println!("{}", queue_listing(&state, &settings.ui));
            }
            Ok(Some(Input::Engine(cmds))) => {
                for cmd in cmds {
                    player.send(cmd)?;
                }
            }
            Err(e) => println!("error: {e}"),
        }
    }

    debug!("input closed, shutting down");
    player.quit();
    Ok(())
}
