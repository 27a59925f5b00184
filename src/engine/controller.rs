//! Command surface of the engine.
//!
//! `PlayerController` owns the queue, the current-track cell and the single
//! live clock. Every public command applies its transition through the
//! private `do_*` helpers and then publishes exactly once, so observers
//! never see the intermediate steps of a compound command.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, trace};

use crate::config::EngineSettings;
use crate::library::Track;

use super::clock::{PlaybackClock, Ticker};
use super::queue::PlaybackQueue;
use super::state::{PlaybackState, StateAggregator};
use super::types::{EngineCmd, PlaybackSpeed, RepeatMode};

pub struct PlayerController {
    queue: PlaybackQueue,
    current: Option<Arc<Track>>,
    playing: bool,
    elapsed: Duration,
    speed: PlaybackSpeed,
    min_speed: Duration,
    repeat: RepeatMode,

    tick_interval: Duration,
    ticker: Ticker,
    clock: Option<PlaybackClock>,
    last_generation: u64,

    aggregator: Arc<StateAggregator>,
}

impl PlayerController {
    /// A controller whose clocks spawn no workers; time only moves when the
    /// owner calls `tick`.
    pub fn manual(settings: &EngineSettings, aggregator: Arc<StateAggregator>) -> Self {
        Self::new(settings, aggregator, Ticker::Manual)
    }

    pub(crate) fn new(
        settings: &EngineSettings,
        aggregator: Arc<StateAggregator>,
        ticker: Ticker,
    ) -> Self {
        let mut controller = Self {
            queue: PlaybackQueue::new(),
            current: None,
            playing: false,
            elapsed: Duration::ZERO,
            speed: PlaybackSpeed::new(Duration::from_millis(settings.speed_ms)),
            min_speed: Duration::from_millis(settings.min_speed_ms),
            repeat: RepeatMode::default(),
            tick_interval: Duration::from_millis(settings.tick_interval_ms.max(1)),
            ticker,
            clock: None,
            last_generation: 0,
            aggregator,
        };
        controller.publish();
        controller
    }

    /// Dispatch one engine command. `Quit` stops playback; shutting the
    /// thread down is the caller's business.
    pub fn handle(&mut self, cmd: EngineCmd) {
        debug!(?cmd, "engine command");
        match cmd {
            EngineCmd::Play => self.play(),
            EngineCmd::PlayTracks(tracks) => self.play_tracks(tracks),
            EngineCmd::Pause => self.pause(),
            EngineCmd::Stop | EngineCmd::Quit => self.stop(),
            EngineCmd::Next => self.next(),
            EngineCmd::Previous => self.previous(),
            EngineCmd::AdvanceBy(d) => self.advance_by(d),
            EngineCmd::RewindBy(d) => self.rewind_by(d),
            EngineCmd::SeekStarted => self.on_seeking_started(),
            EngineCmd::SeekFinished(d) => self.on_seeking_finished(d),
            EngineCmd::ToggleShuffle => self.on_shuffle(),
            EngineCmd::CycleRepeat => self.on_repeat(),
            EngineCmd::SetRepeat(mode) => self.set_repeat_mode(mode),
            EngineCmd::IncreaseSpeed(d) => self.increase_speed(d),
            EngineCmd::DecreaseSpeed(d) => self.decrease_speed(d),
            EngineCmd::Enqueue(track) => self.add_to_queue(track),
            EngineCmd::ClearQueue => self.remove_all_from_queue(),
        }
    }

    pub fn play(&mut self) {
        self.do_play();
        self.publish();
    }

    pub fn play_track(&mut self, track: Track) {
        self.play_tracks(vec![track]);
    }

    /// Play `tracks` now; whatever was playing resumes after them.
    pub fn play_tracks(&mut self, tracks: Vec<Track>) {
        if tracks.is_empty() {
            return;
        }
        let resume = if self.playing { self.current.clone() } else { None };
        self.do_pause();
        self.queue.enqueue_many(tracks, resume);
        self.do_next();
        self.publish();
    }

    pub fn pause(&mut self) {
        self.do_pause();
        self.publish();
    }

    pub fn stop(&mut self) {
        self.do_stop();
        self.publish();
    }

    pub fn next(&mut self) {
        self.do_next();
        self.publish();
    }

    /// Restart the current track's timeline and halt. There is no history;
    /// this never goes back to an earlier track.
    pub fn previous(&mut self) {
        self.do_stop();
        self.publish();
    }

    pub fn advance_by(&mut self, amount: Duration) {
        let Some(duration) = self.current_duration() else {
            return;
        };
        let target = self.elapsed.saturating_add(amount).min(duration);
        self.seek_to(target);
        self.publish();
    }

    pub fn rewind_by(&mut self, amount: Duration) {
        if self.current.is_none() {
            return;
        }
        let target = self.elapsed.saturating_sub(amount);
        self.seek_to(target);
        self.publish();
    }

    pub fn on_seeking_started(&mut self) {
        self.do_pause();
        self.publish();
    }

    pub fn on_seeking_finished(&mut self, position: Duration) {
        self.cancel_clock();
        self.playing = false;
        if let Some(duration) = self.current_duration() {
            self.elapsed = position.min(duration);
        }
        self.do_play();
        self.publish();
    }

    pub fn on_shuffle(&mut self) {
        if self.queue.is_shuffled() {
            self.queue.unshuffle();
        } else {
            self.queue.shuffle_with(&mut rand::rng());
        }
        debug!(shuffled = self.queue.is_shuffled(), "shuffle toggled");
        self.publish();
    }

    pub fn on_repeat(&mut self) {
        self.repeat = self.repeat.cycled();
        debug!(repeat = ?self.repeat, "repeat mode cycled");
        self.publish();
    }

    pub fn set_repeat_mode(&mut self, mode: RepeatMode) {
        self.repeat = mode;
        self.publish();
    }

    pub fn increase_speed(&mut self, delta: Duration) {
        self.speed = self.speed.increased(delta);
        self.publish();
    }

    pub fn decrease_speed(&mut self, delta: Duration) {
        self.speed = self.speed.decreased(delta, self.min_speed);
        self.publish();
    }

    pub fn add_to_queue(&mut self, track: Track) {
        self.queue.enqueue(track);
        self.publish();
    }

    pub fn remove_all_from_queue(&mut self) {
        self.queue.clear();
        self.publish();
    }

    pub fn current_track(&self) -> Option<Arc<Track>> {
        self.current.clone()
    }

    /// Replace the current track directly. Playback halts at zero.
    pub fn set_current_track(&mut self, track: Option<Track>) {
        self.cancel_clock();
        self.playing = false;
        self.elapsed = Duration::ZERO;
        self.current = track.map(Arc::new);
        self.publish();
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn is_clock_running(&self) -> bool {
        self.clock.is_some()
    }

    /// Generation of the live clock, if one is running.
    pub fn clock_generation(&self) -> Option<u64> {
        self.clock.as_ref().map(PlaybackClock::generation)
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Arc<PlaybackState> {
        self.aggregator.latest()
    }

    /// Apply a tick from the clock with `generation`. Ticks from any clock
    /// other than the live one are dropped.
    pub(crate) fn on_tick(&mut self, generation: u64) {
        if self.clock_generation() != Some(generation) || !self.playing {
            trace!(generation, "stale tick dropped");
            return;
        }
        let Some(duration) = self.current_duration() else {
            self.cancel_clock();
            return;
        };

        self.elapsed = self.elapsed.saturating_add(self.speed.quantum()).min(duration);
        trace!(generation, elapsed = ?self.elapsed, "tick");
        if self.elapsed >= duration {
            self.finish_track();
        }
        self.publish();
    }

    /// Drive one tick of the live clock by hand.
    pub fn tick(&mut self) {
        if let Some(generation) = self.clock_generation() {
            self.on_tick(generation);
        }
    }

    fn do_play(&mut self) {
        if self.playing {
            return;
        }
        let Some(track) = self.current.as_ref() else {
            return;
        };
        let remaining = track.duration.saturating_sub(self.elapsed);
        debug!(track = %track.id, ?remaining, "starting clock");
        self.playing = true;
        self.start_clock();
    }

    fn do_pause(&mut self) {
        self.cancel_clock();
        self.playing = false;
    }

    fn do_stop(&mut self) {
        self.cancel_clock();
        self.playing = false;
        self.elapsed = Duration::ZERO;
    }

    fn do_next(&mut self) {
        let Some(track) = self.queue.dequeue_front() else {
            return;
        };
        self.cancel_clock();
        self.playing = false;
        self.elapsed = Duration::ZERO;
        info!(track = %track.id, title = %track.title, "now playing");
        self.current = Some(track);
        self.do_play();
    }

    fn seek_to(&mut self, target: Duration) {
        let was_playing = self.playing;
        self.do_pause();
        self.elapsed = target;
        if was_playing {
            self.do_play();
        }
    }

    /// Completion hook: the live clock reached the track's duration.
    fn finish_track(&mut self) {
        self.cancel_clock();
        self.playing = false;
        self.elapsed = Duration::ZERO;

        let Some(finished) = self.current.clone() else {
            return;
        };
        info!(track = %finished.id, repeat = ?self.repeat, "track finished");

        match self.repeat {
            RepeatMode::One => {
                self.do_play();
                return;
            }
            RepeatMode::All => self.queue.enqueue_shared(finished),
            RepeatMode::Off => {}
        }

        if self.queue.is_empty() {
            info!("queue exhausted, playback stopped");
        } else {
            self.do_next();
        }
    }

    fn start_clock(&mut self) {
        self.cancel_clock();
        self.last_generation += 1;
        self.clock = Some(PlaybackClock::start(
            self.last_generation,
            self.tick_interval,
            &self.ticker,
        ));
    }

    fn cancel_clock(&mut self) {
        if let Some(clock) = self.clock.take() {
            trace!(generation = clock.generation(), "clock cancelled");
            clock.cancel();
        }
    }

    fn current_duration(&self) -> Option<Duration> {
        self.current.as_ref().map(|t| t.duration)
    }

    fn publish(&self) {
        self.aggregator.publish(PlaybackState {
            version: 0,
            current_track: self.current.clone(),
            queue: self.queue.tracks(),
            is_playing: self.playing,
            elapsed: self.elapsed,
            speed: self.speed,
            is_shuffled: self.queue.is_shuffled(),
            repeat_mode: self.repeat,
        });
    }
}

impl Drop for PlayerController {
    fn drop(&mut self) {
        self.cancel_clock();
    }
}
