use std::time::Duration;

use crate::config::{TimeField, UiSettings};
use crate::engine::{PlaybackState, RepeatMode};
use crate::library::display_from_fields;

fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Build the time text (elapsed/total/remaining) per `UiSettings`.
fn time_text(state: &PlaybackState, total: Duration, ui: &UiSettings) -> Option<String> {
    let parts: Vec<String> = ui
        .now_playing_time_fields
        .iter()
        .map(|f| match f {
            TimeField::Elapsed => format_mmss(state.elapsed),
            TimeField::Total => format_mmss(total),
            TimeField::Remaining => {
                format!("-{}", format_mmss(state.remaining().unwrap_or_default()))
            }
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(&ui.now_playing_time_separator))
    }
}

fn repeat_text(mode: RepeatMode) -> &'static str {
    match mode {
        RepeatMode::Off => "off",
        RepeatMode::All => "all",
        RepeatMode::One => "one",
    }
}

/// One-line summary of `state`.
pub fn status_line(state: &PlaybackState, ui: &UiSettings) -> String {
    let mut parts: Vec<String> = Vec::new();

    let flag = match (&state.current_track, state.is_playing) {
        (None, _) => "stopped",
        (Some(_), true) => "playing",
        (Some(_), false) => "paused",
    };
    parts.push(format!("[{flag}]"));

    if let Some(track) = &state.current_track {
        let song = display_from_fields(
            track,
            &ui.now_playing_track_fields,
            &ui.now_playing_track_separator,
        );
        match time_text(state, track.duration, ui) {
            Some(time) => parts.push(format!("{song} [{time}]")),
            None => parts.push(song),
        }
    }

    parts.push(format!("queue: {}", state.queue.len()));
    if state.is_shuffled {
        parts.push("shuffle".to_string());
    }
    parts.push(format!("repeat: {}", repeat_text(state.repeat_mode)));
    parts.push(format!("speed: {:.2}s/tick", state.speed.quantum().as_secs_f64()));

    parts.join("  ")
}

/// Status line followed by the numbered queue.
pub fn queue_listing(state: &PlaybackState, ui: &UiSettings) -> String {
    let mut out = status_line(state, ui);
    for (i, track) in state.queue.iter().enumerate() {
        let song = display_from_fields(
            track,
            &ui.now_playing_track_fields,
            &ui.now_playing_track_separator,
        );
        out.push_str(&format!(
            "\n  {:>3}. {} ({}) [{}]",
            i + 1,
            song,
            format_mmss(track.duration),
            track.id
        ));
    }
    out
}
