use crate::config::TrackDisplayField;

use super::model::Track;

/// Build a display string for a track according to the provided `fields` and separator.
///
/// This composes metadata fields (artist, title, album, track number, id) in the
/// configured order and falls back to `title` when no parts were produced.
pub fn display_from_fields(track: &Track, fields: &[TrackDisplayField], sep: &str) -> String {
    let mut parts: Vec<String> = Vec::new();

    for f in fields {
        match f {
            TrackDisplayField::Display => {
                // "display" is shorthand for "artist - title".
                if let Some(a) = non_empty(&track.artist_name) {
                    parts.push(a.to_string());
                }
                if let Some(t) = non_empty(&track.title) {
                    parts.push(t.to_string());
                }
            }
            TrackDisplayField::Title => {
                if let Some(t) = non_empty(&track.title) {
                    parts.push(t.to_string());
                }
            }
            TrackDisplayField::Artist => {
                if let Some(a) = non_empty(&track.artist_name) {
                    parts.push(a.to_string());
                }
            }
            TrackDisplayField::Album => {
                if let Some(a) = non_empty(&track.album_title) {
                    parts.push(a.to_string());
                }
            }
            TrackDisplayField::TrackNumber => {
                if let Some(n) = track.track_number {
                    parts.push(format!("{n:02}"));
                }
            }
            TrackDisplayField::Id => {
                parts.push(track.id.to_string());
            }
        }
    }

    if parts.is_empty() {
        track.title.clone()
    } else {
        parts.join(sep)
    }
}

fn non_empty(s: &str) -> Option<&str> {
    Some(s.trim()).filter(|s| !s.is_empty())
}
