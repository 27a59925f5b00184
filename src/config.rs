//! Configuration loader and schema types.
//!
//! This module exposes the settings schema (engine timing, playback
//! defaults, console output, logging) and helpers to load it from disk
//! and the environment.

mod load;
mod schema;

pub use load::{default_config_path, resolve_config_path};
pub use schema::*;
