//! Console command parsing.

use std::time::Duration;

use thiserror::Error;

use crate::config::ControlsSettings;
use crate::engine::EngineCmd;
use crate::library::{Track, TrackCatalog, TrackId};

pub const HELP: &str = "\
commands:
  play [id...]   resume, or play the given tracks now
  pause | stop | next | prev
  ff [secs]      skip forward
  rw [secs]      skip back
  seek <pos>     jump to a position (secs or m:ss)
  shuffle        toggle shuffle
  repeat         cycle repeat mode (off, all, one)
  faster | slower
  add <id...>    append to the queue
  clear          empty the queue
  status         show the current state and queue
  help | quit";

#[derive(Debug)]
pub enum Input {
    Engine(Vec<EngineCmd>),
    Status,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command `{0}` (try `help`)")]
    UnknownCommand(String),
    #[error("no track with id `{0}`")]
    UnknownTrack(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("`{0}` is not a valid time")]
    InvalidTime(String),
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_line(
    line: &str,
    catalog: &impl TrackCatalog,
    controls: &ControlsSettings,
) -> Result<Option<Input>, ParseError> {
    let mut words = line.split_whitespace();
    let Some(word) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let scrub = Duration::from_secs(controls.scrub_seconds);
    let step = Duration::from_millis(controls.speed_step_ms);

    let cmds = match word.to_ascii_lowercase().as_str() {
        "quit" | "q" | "exit" => return Ok(Some(Input::Quit)),
        "help" | "?" => return Ok(Some(Input::Help)),
        "status" | "s" => return Ok(Some(Input::Status)),
        "play" | "p" => {
            if args.is_empty() {
                vec![EngineCmd::Play]
            } else {
                vec![EngineCmd::PlayTracks(resolve(catalog, &args)?)]
            }
        }
        "pause" => vec![EngineCmd::Pause],
        "stop" => vec![EngineCmd::Stop],
        "next" | "n" => vec![EngineCmd::Next],
        "prev" | "previous" => vec![EngineCmd::Previous],
        "ff" => vec![EngineCmd::AdvanceBy(optional_time(&args, scrub)?)],
        "rw" => vec![EngineCmd::RewindBy(optional_time(&args, scrub)?)],
        "seek" => {
            let pos = args.first().ok_or(ParseError::MissingArgument("seek"))?;
            vec![EngineCmd::SeekStarted, EngineCmd::SeekFinished(parse_time(pos)?)]
        }
        "shuffle" => vec![EngineCmd::ToggleShuffle],
        "repeat" => vec![EngineCmd::CycleRepeat],
        "faster" | "+" => vec![EngineCmd::IncreaseSpeed(step)],
        "slower" | "-" => vec![EngineCmd::DecreaseSpeed(step)],
        "add" => {
            if args.is_empty() {
                return Err(ParseError::MissingArgument("add"));
            }
            resolve(catalog, &args)?
                .into_iter()
                .map(EngineCmd::Enqueue)
                .collect()
        }
        "clear" => vec![EngineCmd::ClearQueue],
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };
    Ok(Some(Input::Engine(cmds)))
}

fn resolve(catalog: &impl TrackCatalog, ids: &[&str]) -> Result<Vec<Track>, ParseError> {
    ids.iter()
        .map(|id| {
            catalog
                .get(&TrackId::new(*id))
                .ok_or_else(|| ParseError::UnknownTrack(id.to_string()))
        })
        .collect()
}

fn optional_time(args: &[&str], default: Duration) -> Result<Duration, ParseError> {
    args.first().map_or(Ok(default), |a| parse_time(a))
}

/// `90` or `1:30`.
pub fn parse_time(s: &str) -> Result<Duration, ParseError> {
    let invalid = || ParseError::InvalidTime(s.to_string());
    let secs = match s.split_once(':') {
        Some((m, rest)) => {
            let m: u64 = m.parse().map_err(|_| invalid())?;
            let rest: u64 = rest.parse().map_err(|_| invalid())?;
            if rest >= 60 {
                return Err(invalid());
            }
            m.checked_mul(60)
                .and_then(|m| m.checked_add(rest))
                .ok_or_else(invalid)?
        }
        None => s.parse().map_err(|_| invalid())?,
    };
    Ok(Duration::from_secs(secs))
}
