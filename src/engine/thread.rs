use std::sync::mpsc::Receiver;
use std::thread::{self, JoinHandle};

use tracing::{debug, info};

use crate::error::{Error, Result};

use super::controller::PlayerController;
use super::types::{EngineCmd, EngineMsg};

/// Move `controller` onto its own thread. Commands and ticks share one
/// channel, so they are applied strictly one after another.
pub(super) fn spawn_engine_thread(
    rx: Receiver<EngineMsg>,
    mut controller: PlayerController,
) -> Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("allegro-engine".to_string())
        .spawn(move || {
            info!("playback engine started");

            // The controller keeps a sender for its clocks, so the channel never
            // disconnects on its own; `Quit` is the way out.
            while let Ok(msg) = rx.recv() {
                match msg {
                    EngineMsg::Command(EngineCmd::Quit) => {
                        controller.handle(EngineCmd::Quit);
                        break;
                    }
                    EngineMsg::Command(cmd) => controller.handle(cmd),
                    EngineMsg::Tick(generation) => controller.on_tick(generation),
                }
            }

            debug!("playback engine stopped");
        })
        .map_err(Error::Spawn)
}
