//! The playback engine: queue, clock, controller and snapshot fan-out.
//!
//! `Player` runs a `PlayerController` on its own thread and feeds it
//! `EngineCmd`s; embedders that want to drive time themselves can build a
//! `PlayerController::manual` and call `tick` from their own timer.

mod clock;
mod controller;
mod player;
mod queue;
mod state;
mod thread;
mod types;

pub use controller::PlayerController;
pub use player::Player;
pub use queue::PlaybackQueue;
pub use state::{PlaybackState, StateAggregator};
pub use types::{EngineCmd, PlaybackSpeed, RepeatMode};
