//! Cooperative wakeup scheduling for the playback controller
//!
//! Single-threaded task queue standing in for the display-refresh callback,
//! one-shot timeout, and repeating interval the scrubber schedules itself
//! with. Entries are identified by [`TaskId`]; a cancelled id is removed
//! from the queue and is guaranteed never to be delivered afterwards.

mod clock;

pub use clock::{Clock, ManualClock, SystemClock};

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Display-refresh cadence used for frame requests (~60 Hz).
const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

/// Handle to a scheduled wakeup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

struct Entry {
    id: TaskId,
    due: Instant,
    /// `Some` for repeating intervals; the entry re-arms on delivery.
    period: Option<Duration>,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    entries: Vec<Entry>,
}

/// Deadline queue owned by one scrubber
pub struct Scheduler {
    clock: Arc<dyn Clock>,
    frame_interval: Duration,
    inner: Mutex<Inner>,
}

impl Scheduler {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_frame_interval(clock, DEFAULT_FRAME_INTERVAL)
    }

    pub fn with_frame_interval(clock: Arc<dyn Clock>, frame_interval: Duration) -> Self {
        Self {
            clock,
            frame_interval,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Schedule one wakeup at the next display-refresh boundary
    pub fn request_frame(&self) -> TaskId {
        self.insert(self.frame_interval, None)
    }

    /// Schedule one wakeup after `delay`
    pub fn schedule_timeout(&self, delay: Duration) -> TaskId {
        self.insert(delay, None)
    }

    /// Schedule a repeating wakeup every `period`; the id stays stable
    /// across deliveries until cancelled
    pub fn schedule_interval(&self, period: Duration) -> TaskId {
        self.insert(period, Some(period))
    }

    fn insert(&self, delay: Duration, period: Option<Duration>) -> TaskId {
        let due = self.clock.now() + delay;
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        let id = TaskId(inner.next_id);
        inner.entries.push(Entry { id, due, period });
        id
    }

    /// Remove a scheduled wakeup. After this returns the id is never
    /// delivered again. Returns whether the entry was still pending.
    pub fn cancel(&self, id: TaskId) -> bool {
        let mut inner = self.inner.lock();
        let before = inner.entries.len();
        inner.entries.retain(|e| e.id != id);
        inner.entries.len() != before
    }

    /// Earliest pending deadline, if any
    pub fn next_deadline(&self) -> Option<Instant> {
        self.inner.lock().entries.iter().map(|e| e.due).min()
    }

    /// Deliver the earliest entry due at or before `now`. Periodic entries
    /// re-arm in place; one-shots are removed.
    pub fn pop_due(&self, now: Instant) -> Option<TaskId> {
        let mut inner = self.inner.lock();
        let idx = inner
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= now)
            .min_by_key(|(_, e)| e.due)
            .map(|(idx, _)| idx)?;

        let id = inner.entries[idx].id;
        match inner.entries[idx].period {
            Some(period) => inner.entries[idx].due += period,
            None => {
                inner.entries.swap_remove(idx);
            }
        }
        Some(id)
    }

    pub fn is_idle(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }
}
