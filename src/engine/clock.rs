//! The ticking task behind a playing track.
//!
//! A clock never touches playback state itself. Its worker only sends
//! `EngineMsg::Tick(generation)` into the engine channel; the controller
//! applies a tick only if the generation still names the live clock.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread::{self, Thread};
use std::time::{Duration, Instant};

use tracing::{trace, warn};

use super::types::EngineMsg;

/// How clocks produce ticks.
#[derive(Debug, Clone)]
pub(crate) enum Ticker {
    /// Spawn a worker thread per clock that ticks into the engine channel.
    Thread(Sender<EngineMsg>),
    /// No worker; the owner calls `PlayerController::tick` itself.
    Manual,
}

/// Handle to one running clock. Dropping it cancels the worker.
#[derive(Debug)]
pub(crate) struct PlaybackClock {
    generation: u64,
    cancelled: Arc<AtomicBool>,
    worker: Option<Thread>,
}

impl PlaybackClock {
    pub fn start(generation: u64, interval: Duration, ticker: &Ticker) -> Self {
        let cancelled = Arc::new(AtomicBool::new(false));

        let worker = match ticker {
            Ticker::Manual => None,
            Ticker::Thread(tx) => {
                let tx = tx.clone();
                let flag = cancelled.clone();
                let spawned = thread::Builder::new()
                    .name(format!("allegro-clock-{generation}"))
                    .spawn(move || run_worker(generation, interval, &flag, &tx));
                match spawned {
                    Ok(handle) => Some(handle.thread().clone()),
                    Err(e) => {
                        // Playback stays flagged as playing but time will not advance.
                        warn!(generation, error = %e, "failed to spawn clock worker");
                        None
                    }
                }
            }
        };

        Self {
            generation,
            cancelled,
            worker,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Stop the worker. Ticks already in flight are rejected by generation.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for PlaybackClock {
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::Release);
        if let Some(worker) = &self.worker {
            worker.unpark();
        }
    }
}

fn run_worker(generation: u64, interval: Duration, cancelled: &AtomicBool, tx: &Sender<EngineMsg>) {
    let mut deadline = Instant::now() + interval;
    loop {
        // park_timeout may wake early (unpark or spuriously); re-check the deadline.
        loop {
            if cancelled.load(Ordering::Acquire) {
                trace!(generation, "clock worker cancelled");
                return;
            }
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            thread::park_timeout(deadline - now);
        }
        if tx.send(EngineMsg::Tick(generation)).is_err() {
            return;
        }
        deadline += interval;
    }
}
