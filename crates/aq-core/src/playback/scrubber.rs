//! Scrubber implementation
//!
//! Advances an ordered sequence of years over time and notifies observers.
//! Timing comes in two mutually exclusive strategies chosen at
//! construction: frame-driven (no configured delay; every advancement
//! requests the next display-refresh wakeup itself) and interval-driven
//! (a repeating timer at the configured delay). While running, exactly one
//! strategy holds a live handle; `stop` cancels and clears every handle so
//! a stale wakeup can neither fire nor be cancelled twice.

use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use super::{Direction, FrameSubscriber, PlaybackState, ScrubberConfig};
use crate::schedule::{Scheduler, TaskId};
use crate::{CoreError, Year};

/// Scrubber state stored internally
#[derive(Debug)]
struct ScrubberState {
    index: usize,
    direction: Direction,
    /// Pending display-refresh wakeup (frame-driven mode).
    frame: Option<TaskId>,
    /// Pending one-shot loop-delay wakeup.
    timer: Option<TaskId>,
    /// Repeating tick wakeup (interval-driven mode).
    interval: Option<TaskId>,
}

impl ScrubberState {
    fn is_running(&self) -> bool {
        self.frame.is_some() || self.timer.is_some() || self.interval.is_some()
    }
}

enum Wake {
    Frame,
    Interval,
    LoopDelay,
}

/// The playback controller driving the year scrubber
pub struct Scrubber {
    values: Vec<Year>,
    delay: Option<Duration>,
    looping: bool,
    loop_delay: Option<Duration>,
    alternate: bool,
    scheduler: Arc<Scheduler>,
    state: RwLock<ScrubberState>,
    subscribers: RwLock<Vec<Weak<dyn FrameSubscriber>>>,
}

impl std::fmt::Debug for Scrubber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scrubber")
            .field("values", &self.values)
            .field("delay", &self.delay)
            .field("looping", &self.looping)
            .field("loop_delay", &self.loop_delay)
            .field("alternate", &self.alternate)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Scrubber {
    /// Create a new scrubber over a non-empty frame sequence
    pub fn new(
        values: Vec<Year>,
        config: ScrubberConfig,
        scheduler: Arc<Scheduler>,
    ) -> Result<Self, CoreError> {
        if values.is_empty() {
            return Err(CoreError::EmptyFrameSequence);
        }

        let state = ScrubberState {
            index: config.initial_index.min(values.len() - 1),
            direction: config.direction,
            frame: None,
            timer: None,
            interval: None,
        };

        let scrubber = Self {
            values,
            delay: config.delay_ms.map(Duration::from_millis),
            looping: config.looping,
            loop_delay: config.loop_delay_ms.map(Duration::from_millis),
            alternate: config.alternate,
            scheduler,
            state: RwLock::new(state),
            subscribers: RwLock::new(Vec::new()),
        };

        if config.autoplay {
            scrubber.start();
        }
        Ok(scrubber)
    }

    /// The frame sequence
    pub fn values(&self) -> &[Year] {
        &self.values
    }

    pub fn current_index(&self) -> usize {
        self.state.read().index
    }

    pub fn current_value(&self) -> Year {
        self.values[self.state.read().index]
    }

    pub fn direction(&self) -> Direction {
        self.state.read().direction
    }

    pub fn is_running(&self) -> bool {
        self.state.read().is_running()
    }

    pub fn playback_state(&self) -> PlaybackState {
        if self.is_running() {
            PlaybackState::Running
        } else {
            PlaybackState::Stopped
        }
    }

    /// Add a subscriber
    pub fn subscribe(&self, subscriber: Arc<dyn FrameSubscriber>) {
        self.subscribers.write().push(Arc::downgrade(&subscriber));
    }

    /// Begin playback. No-op if already running.
    pub fn start(&self) {
        let mut state = self.state.write();
        if state.is_running() {
            return;
        }
        match self.delay {
            None => state.frame = Some(self.scheduler.request_frame()),
            Some(delay) => state.interval = Some(self.scheduler.schedule_interval(delay)),
        }
        drop(state);
        tracing::debug!("playback started");
    }

    /// Pause playback, cancelling any pending wakeup. No-op if stopped.
    pub fn stop(&self) {
        let mut state = self.state.write();
        if !state.is_running() {
            return;
        }
        self.cancel_pending(&mut state);
        drop(state);
        tracing::debug!("playback stopped");
    }

    /// Play/pause button behavior: stop when running; otherwise reset the
    /// direction (backward only when alternating from the last frame),
    /// advance one frame immediately, then resume scheduling.
    pub fn toggle(&self) {
        if self.is_running() {
            self.stop();
            return;
        }
        {
            let mut state = self.state.write();
            state.direction = if self.alternate && state.index == self.values.len() - 1 {
                Direction::Backward
            } else {
                Direction::Forward
            };
        }
        self.step();
        self.start();
    }

    /// External user scrub to a frame position. Manual interaction
    /// implicitly pauses playback; the move itself still notifies.
    pub fn scrub_to(&self, index: usize) {
        let value = {
            let mut state = self.state.write();
            if state.is_running() {
                self.cancel_pending(&mut state);
            }
            state.index = index.min(self.values.len() - 1);
            self.values[state.index]
        };
        self.notify(value);
    }

    /// Advance one frame in the current direction, wrapping at the ends,
    /// and notify subscribers with the new value
    pub fn step(&self) {
        let value = {
            let mut state = self.state.write();
            let len = self.values.len() as i64;
            let next = (state.index as i64 + state.direction.signum() + len) % len;
            state.index = next as usize;
            self.values[state.index]
        };
        self.notify(value);
    }

    /// Boundary policy, evaluated before each scheduled advancement
    fn tick(&self) {
        let mut state = self.state.write();

        let at_terminal = match state.direction {
            Direction::Forward => state.index == self.values.len() - 1,
            Direction::Backward => state.index == 0,
        };

        if at_terminal {
            if !self.looping {
                self.cancel_pending(&mut state);
                return;
            }
            if self.alternate {
                state.direction = state.direction.flipped();
            }
            if let Some(delay) = self.loop_delay {
                self.cancel_pending(&mut state);
                state.timer = Some(self.scheduler.schedule_timeout(delay));
                return;
            }
        }

        // Frame-driven timing reschedules itself before advancing; the
        // interval entry re-arms inside the scheduler.
        if self.delay.is_none() {
            state.frame = Some(self.scheduler.request_frame());
        }
        drop(state);
        self.step();
    }

    /// Earliest pending wakeup deadline, for the driver loop
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    /// Deliver every wakeup due at or before `now` into the state machine
    pub fn pump(&self, now: Instant) {
        while let Some(id) = self.scheduler.pop_due(now) {
            self.on_wake(id);
        }
    }

    fn on_wake(&self, id: TaskId) {
        let wake = {
            let mut state = self.state.write();
            if state.frame == Some(id) {
                state.frame = None;
                Some(Wake::Frame)
            } else if state.interval == Some(id) {
                Some(Wake::Interval)
            } else if state.timer == Some(id) {
                state.timer = None;
                Some(Wake::LoopDelay)
            } else {
                // Cancelled between queueing and delivery; never observable.
                None
            }
        };

        match wake {
            Some(Wake::Frame) | Some(Wake::Interval) => self.tick(),
            Some(Wake::LoopDelay) => {
                self.step();
                self.start();
            }
            None => {}
        }
    }

    fn cancel_pending(&self, state: &mut ScrubberState) {
        if let Some(id) = state.frame.take() {
            self.scheduler.cancel(id);
        }
        if let Some(id) = state.timer.take() {
            self.scheduler.cancel(id);
        }
        if let Some(id) = state.interval.take() {
            self.scheduler.cancel(id);
        }
    }

    /// Notify all subscribers of the new frame value
    fn notify(&self, value: Year) {
        let mut subscribers = self.subscribers.write();

        // Remove any dead weak references
        subscribers.retain(|weak| weak.strong_count() > 0);

        for weak in subscribers.iter() {
            if let Some(subscriber) = weak.upgrade() {
                subscriber.on_frame_change(value);
            }
        }
    }
}
