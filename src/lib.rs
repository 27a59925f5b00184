//! allegro: a logical playback engine.
//!
//! The engine models what should be playing and for how long: a play queue,
//! a ticking clock per playing track, and a stream of immutable snapshots
//! for whoever presents them. It decodes no audio.

pub mod config;
pub mod engine;
pub mod error;
pub mod library;
pub mod runtime;

pub use error::{Error, Result};
