use super::*;
use crate::config::TrackDisplayField;
use crate::error::Error;
use std::time::Duration;

fn song() -> Track {
    Track::new("t1", "Song", Duration::from_secs(200))
        .with_artist("Artist")
        .with_album("Album")
        .with_track_number(4)
}

#[test]
fn display_from_fields_can_format_artist_title() {
    let t = song();
    assert_eq!(
        display_from_fields(&t, &[TrackDisplayField::Artist, TrackDisplayField::Title], " - "),
        "Artist - Song"
    );

    let mut padded = song();
    padded.artist_name = "  Artist  ".into();
    assert_eq!(
        display_from_fields(&padded, &[TrackDisplayField::Display], " - "),
        "Artist - Song"
    );

    let mut no_artist = song();
    no_artist.artist_name.clear();
    assert_eq!(
        display_from_fields(&no_artist, &[TrackDisplayField::Artist, TrackDisplayField::Title], " - "),
        "Song"
    );
}

#[test]
fn display_from_fields_formats_track_number_and_falls_back_to_title() {
    let t = song();
    assert_eq!(
        display_from_fields(&t, &[TrackDisplayField::TrackNumber, TrackDisplayField::Album], ". "),
        "04. Album"
    );

    let bare = Track::new("t2", "Bare", Duration::ZERO);
    assert_eq!(display_from_fields(&bare, &[TrackDisplayField::Artist], " - "), "Bare");
    assert_eq!(display_from_fields(&bare, &[], " - "), "Bare");
}

#[test]
fn catalog_parses_manifest_in_order() {
    let catalog = MemoryCatalog::from_toml(
        r#"
[[tracks]]
id = "b"
title = "Second"
artist = "Someone"
duration_ms = 90000

[[tracks]]
id = "a"
title = "First"
album = "Record"
duration_ms = 60500
track_number = 1
"#,
    )
    .unwrap();

    assert_eq!(catalog.len(), 2);
    let tracks = catalog.tracks();
    assert_eq!(tracks[0].id, TrackId::new("b"));
    assert_eq!(tracks[1].id, TrackId::new("a"));

    let a = catalog.get(&TrackId::new("a")).unwrap();
    assert_eq!(a.title, "First");
    assert_eq!(a.album_title, "Record");
    assert!(a.artist_name.is_empty());
    assert_eq!(a.duration, Duration::from_millis(60_500));
    assert_eq!(a.track_number, Some(1));
    assert!(catalog.get(&TrackId::new("missing")).is_none());
}

#[test]
fn catalog_rejects_duplicate_ids() {
    let err = MemoryCatalog::from_toml(
        r#"
[[tracks]]
id = "x"
title = "One"
duration_ms = 1

[[tracks]]
id = "x"
title = "Two"
duration_ms = 2
"#,
    )
    .unwrap_err();
    assert!(matches!(err, Error::DuplicateTrack(id) if id.as_str() == "x"));
}

#[test]
fn catalog_rejects_negative_durations() {
    let err = MemoryCatalog::from_toml(
        r#"
[[tracks]]
id = "x"
title = "One"
duration_ms = -5
"#,
    )
    .unwrap_err();
    assert!(matches!(err, Error::CatalogParse(_)));
}

#[test]
fn catalog_load_reads_file_and_reports_missing_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.toml");
    std::fs::write(
        &path,
        r#"
[[tracks]]
id = "only"
title = "Only"
duration_ms = 1000
"#,
    )
    .unwrap();

    let catalog = MemoryCatalog::load(&path).unwrap();
    assert_eq!(catalog.len(), 1);

    let err = MemoryCatalog::load(&dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, Error::CatalogIo { .. }));
}
