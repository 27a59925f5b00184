//! Read-only track lookup.
//!
//! The engine never writes back to the catalog; it only receives `Track`
//! values resolved through it.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

use super::model::{Track, TrackId};

/// Lookup of track metadata by id.
pub trait TrackCatalog {
    fn get(&self, id: &TrackId) -> Option<Track>;

    /// All tracks, in catalog order.
    fn tracks(&self) -> Vec<Track>;
}

/// In-memory catalog, usually loaded from a TOML manifest.
#[derive(Debug, Default, Clone)]
pub struct MemoryCatalog {
    tracks: Vec<Track>,
    by_id: HashMap<TrackId, usize>,
}

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    tracks: Vec<ManifestEntry>,
}

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    id: TrackId,
    title: String,
    #[serde(default)]
    artist: String,
    #[serde(default)]
    album: String,
    duration_ms: u64,
    track_number: Option<u32>,
}

impl From<ManifestEntry> for Track {
    fn from(e: ManifestEntry) -> Self {
        Track {
            id: e.id,
            title: e.title,
            artist_name: e.artist,
            album_title: e.album,
            duration: Duration::from_millis(e.duration_ms),
            track_number: e.track_number,
        }
    }
}

impl MemoryCatalog {
    /// Build a catalog from `tracks`, rejecting duplicate ids.
    pub fn from_tracks(tracks: Vec<Track>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(tracks.len());
        for (i, t) in tracks.iter().enumerate() {
            if by_id.insert(t.id.clone(), i).is_some() {
                return Err(Error::DuplicateTrack(t.id.clone()));
            }
        }
        Ok(Self { tracks, by_id })
    }

    /// Parse a TOML manifest (`[[tracks]]` tables).
    pub fn from_toml(text: &str) -> Result<Self> {
        let manifest: Manifest = toml::from_str(text)?;
        Self::from_tracks(manifest.tracks.into_iter().map(Track::from).collect())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::CatalogIo {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_toml(&text)?;
        debug!(path = %path.display(), tracks = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl TrackCatalog for MemoryCatalog {
    fn get(&self, id: &TrackId) -> Option<Track> {
        self.by_id.get(id).map(|&i| self.tracks[i].clone())
    }

    fn tracks(&self) -> Vec<Track> {
        self.tracks.clone()
    }
}
