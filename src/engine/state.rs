//! Published playback snapshots and their fan-out.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::library::Track;

use super::types::{PlaybackSpeed, RepeatMode};

/// One immutable, consistent view of the engine.
#[derive(Debug, Clone, Default)]
pub struct PlaybackState {
    /// Increments by one on every publish.
    pub version: u64,
    pub current_track: Option<Arc<Track>>,
    pub queue: Vec<Arc<Track>>,
    pub is_playing: bool,
    pub elapsed: Duration,
    pub speed: PlaybackSpeed,
    pub is_shuffled: bool,
    pub repeat_mode: RepeatMode,
}

impl PlaybackState {
    /// Time left on the current track, if any.
    pub fn remaining(&self) -> Option<Duration> {
        self.current_track
            .as_ref()
            .map(|t| t.duration.saturating_sub(self.elapsed))
    }

    /// Equal in everything but `version`.
    pub fn same_content(&self, other: &Self) -> bool {
        self.current_track == other.current_track
            && self.queue == other.queue
            && self.is_playing == other.is_playing
            && self.elapsed == other.elapsed
            && self.speed == other.speed
            && self.is_shuffled == other.is_shuffled
            && self.repeat_mode == other.repeat_mode
    }
}

#[derive(Debug, Default)]
struct Inner {
    latest: Arc<PlaybackState>,
    subscribers: Vec<Sender<Arc<PlaybackState>>>,
}

/// Latest-value cell with subscribers. Written by the controller only.
///
/// Publishing and subscribing take the same lock, so a new subscriber gets
/// exactly the latest snapshot followed by every later one, in order.
#[derive(Debug, Default)]
pub struct StateAggregator {
    inner: Mutex<Inner>,
}

impl StateAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish `state` unless it matches the latest snapshot. Returns whether
    /// a new version went out.
    pub fn publish(&self, mut state: PlaybackState) -> bool {
        let mut inner = self.lock();
        if inner.latest.same_content(&state) {
            return false;
        }
        state.version = inner.latest.version + 1;
        let state = Arc::new(state);
        inner.latest = state.clone();
        inner.subscribers.retain(|tx| tx.send(state.clone()).is_ok());
        true
    }

    /// Subscribe to the snapshot stream, starting with the latest snapshot.
    pub fn subscribe(&self) -> Receiver<Arc<PlaybackState>> {
        let (tx, rx) = mpsc::channel();
        let mut inner = self.lock();
        if tx.send(inner.latest.clone()).is_ok() {
            inner.subscribers.push(tx);
        }
        rx
    }

    pub fn latest(&self) -> Arc<PlaybackState> {
        self.lock().latest.clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
