//! Crate-wide error type.
//!
//! Engine commands never fail (invalid preconditions are no-ops); errors
//! only come from the edges: configuration, catalog loading and the
//! engine thread's lifecycle.

use std::path::PathBuf;

use thiserror::Error;

use crate::library::TrackId;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to load configuration: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read catalog {path}: {source}")]
    CatalogIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    CatalogParse(#[from] toml::de::Error),

    #[error("duplicate track id in catalog: {0}")]
    DuplicateTrack(TrackId),

    #[error("failed to spawn engine thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("playback engine has stopped")]
    EngineStopped,
}

pub type Result<T> = std::result::Result<T, Error>;
