use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crate::config::EngineSettings;
use crate::error::{Error, Result};

use super::clock::Ticker;
use super::controller::PlayerController;
use super::state::{PlaybackState, StateAggregator};
use super::thread::spawn_engine_thread;
use super::types::{EngineCmd, EngineMsg};

/// Handle to a running engine thread.
pub struct Player {
    tx: Sender<EngineMsg>,
    state: Arc<StateAggregator>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl Player {
    /// Start the engine thread. The controller is built here, so its first
    /// snapshot is already published when this returns.
    pub fn new(settings: EngineSettings) -> Result<Self> {
        let (tx, rx) = mpsc::channel::<EngineMsg>();
        let state = Arc::new(StateAggregator::new());

        let controller =
            PlayerController::new(&settings, state.clone(), Ticker::Thread(tx.clone()));
        let engine_handle = spawn_engine_thread(rx, controller)?;

        Ok(Self {
            tx,
            state,
            join: Mutex::new(Some(engine_handle)),
        })
    }

    pub fn send(&self, cmd: EngineCmd) -> Result<()> {
        self.tx
            .send(EngineMsg::Command(cmd))
            .map_err(|_| Error::EngineStopped)
    }

    /// Snapshot stream starting with the latest snapshot.
    pub fn subscribe(&self) -> Receiver<Arc<PlaybackState>> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> Arc<PlaybackState> {
        self.state.latest()
    }

    /// Stop playback and wait for the engine thread to exit. Idempotent.
    pub fn quit(&self) {
        let _ = self.send(EngineCmd::Quit);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.quit();
    }
}
