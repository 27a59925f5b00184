use std::fmt;
use std::time::Duration;

use serde::Deserialize;

/// Stable identifier of a track in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TrackId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TrackId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Metadata of a playable item. No audio bytes, only what the engine needs
/// to sequence it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist_name: String,
    pub album_title: String,
    pub duration: Duration,
    pub track_number: Option<u32>,
}

impl Track {
    pub fn new(id: impl Into<TrackId>, title: impl Into<String>, duration: Duration) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist_name: String::new(),
            album_title: String::new(),
            duration,
            track_number: None,
        }
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist_name = artist.into();
        self
    }

    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album_title = album.into();
        self
    }

    pub fn with_track_number(mut self, number: u32) -> Self {
        self.track_number = Some(number);
        self
    }
}
