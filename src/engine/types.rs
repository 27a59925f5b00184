//! Engine-related small types.
//!
//! This module defines the repeat mode, the playback speed quantum and the
//! command set accepted by the engine thread.

use std::time::Duration;

use crate::config::RepeatModeSetting;
use crate::library::Track;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum RepeatMode {
    /// Stop when the queue runs out.
    #[default]
    Off,
    /// Re-queue each finished track at the back, cycling the queue.
    All,
    /// Repeat the current track when it ends.
    One,
}

impl RepeatMode {
    /// Next mode in the `Off -> All -> One -> Off` cycle.
    pub fn cycled(self) -> Self {
        match self {
            Self::Off => Self::All,
            Self::All => Self::One,
            Self::One => Self::Off,
        }
    }
}

impl From<RepeatModeSetting> for RepeatMode {
    fn from(setting: RepeatModeSetting) -> Self {
        match setting {
            RepeatModeSetting::Off => Self::Off,
            RepeatModeSetting::All => Self::All,
            RepeatModeSetting::One => Self::One,
        }
    }
}

/// Elapsed time added by one clock tick. Always positive.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PlaybackSpeed(Duration);

impl PlaybackSpeed {
    /// Smallest quantum any floor can go down to.
    pub const MIN_QUANTUM: Duration = Duration::from_millis(1);

    /// A zero quantum is raised to `MIN_QUANTUM`.
    pub fn new(quantum: Duration) -> Self {
        Self(quantum.max(Self::MIN_QUANTUM))
    }

    pub fn quantum(self) -> Duration {
        self.0
    }

    pub fn increased(self, delta: Duration) -> Self {
        Self(self.0.saturating_add(delta))
    }

    /// Subtract `delta`, never going below `floor` (nor `MIN_QUANTUM`).
    /// A quantum already at or under the floor is left alone.
    pub fn decreased(self, delta: Duration, floor: Duration) -> Self {
        let floor = floor.max(Self::MIN_QUANTUM);
        if self.0 <= floor {
            return self;
        }
        Self(self.0.saturating_sub(delta).max(floor))
    }
}

impl Default for PlaybackSpeed {
    fn default() -> Self {
        Self(Duration::from_secs(1))
    }
}

#[derive(Debug, Clone)]
pub enum EngineCmd {
    /// Resume the current track.
    Play,
    /// Play these tracks now, then resume whatever was playing.
    PlayTracks(Vec<Track>),
    Pause,
    Stop,
    Next,
    /// Restart the current track's timeline and halt.
    Previous,
    AdvanceBy(Duration),
    RewindBy(Duration),
    SeekStarted,
    /// Scrub finished at the given position.
    SeekFinished(Duration),
    ToggleShuffle,
    CycleRepeat,
    SetRepeat(RepeatMode),
    IncreaseSpeed(Duration),
    DecreaseSpeed(Duration),
    Enqueue(Track),
    ClearQueue,
    /// Stop playback and shut the engine thread down.
    Quit,
}

/// Everything the engine thread receives: commands from the handle and
/// ticks from the live clock.
#[derive(Debug)]
pub(crate) enum EngineMsg {
    Command(EngineCmd),
    Tick(u64),
}
