//! The pending play queue.
//!
//! Every entry carries an ordering key assigned on insertion: appends get a
//! key after every other entry, front splices get keys before every other
//! entry. Unshuffled, the queue is always sorted by key, so un-shuffling is
//! a stable sort.

use std::collections::VecDeque;
use std::sync::Arc;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::library::Track;

#[derive(Debug, Clone)]
struct QueueEntry {
    key: i64,
    track: Arc<Track>,
}

#[derive(Debug, Default)]
pub struct PlaybackQueue {
    entries: VecDeque<QueueEntry>,
    next_back_key: i64,
    next_front_key: i64,
    shuffled: bool,
}

impl PlaybackQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, track: Track) {
        self.enqueue_shared(Arc::new(track));
    }

    pub fn enqueue_shared(&mut self, track: Arc<Track>) {
        let key = self.next_back_key;
        self.next_back_key += 1;
        self.entries.push_back(QueueEntry { key, track });
    }

    /// Splice `tracks` in at the front for a "play these now" command.
    ///
    /// One existing copy of each incoming track is removed from its old
    /// position. `resume` (the track that was playing) goes right after the
    /// new list unless the list already contains it.
    pub fn enqueue_many(&mut self, tracks: Vec<Track>, resume: Option<Arc<Track>>) {
        let mut batch: Vec<Arc<Track>> = tracks.into_iter().map(Arc::new).collect();

        for t in &batch {
            self.remove_first(t);
        }
        if let Some(r) = resume {
            if !batch.iter().any(|t| **t == *r) {
                self.remove_first(&r);
                batch.push(r);
            }
        }

        // Keys decrease towards the front; assign from the back of the batch.
        for track in batch.into_iter().rev() {
            self.next_front_key -= 1;
            self.entries.push_front(QueueEntry {
                key: self.next_front_key,
                track,
            });
        }
    }

    pub fn dequeue_front(&mut self) -> Option<Arc<Track>> {
        self.entries.pop_front().map(|e| e.track)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    /// Pending tracks, front first.
    pub fn tracks(&self) -> Vec<Arc<Track>> {
        self.entries.iter().map(|e| e.track.clone()).collect()
    }

    /// Uniformly shuffle the pending entries and mark the queue shuffled.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.entries.make_contiguous().shuffle(rng);
        self.shuffled = true;
    }

    /// Restore insertion order and mark the queue unshuffled.
    pub fn unshuffle(&mut self) {
        self.entries.make_contiguous().sort_by_key(|e| e.key);
        self.shuffled = false;
    }

    fn remove_first(&mut self, track: &Track) {
        if let Some(pos) = self.entries.iter().position(|e| *e.track == *track) {
            self.entries.remove(pos);
        }
    }
}
